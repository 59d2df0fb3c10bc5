use std::collections::VecDeque;

use eframe::egui::{pos2, vec2, Color32, Painter, Pos2, Rect, Rounding};

use super::error::ChartError;
use super::grid;
use super::segment::{ChartSegment, LINE_COUNT};
use super::BACKGROUND_COLOR;

/// Center x of a freshly placed segment's reveal edge. A new segment starts
/// mostly off-screen left so its zero-initialized history fills up before it
/// scrolls into view; this must stay left of the label gutter's midpoint
/// ([`grid::GUTTER_WIDTH`] / 2) or the zeros become visible on first draw.
const LEFT_REVEAL: f32 = 30.0;

/// Owns the segment pool and the scrolling illusion.
///
/// Segments are kept newest-first; the head is always the segment currently
/// accepting writes, so no separate reference to it needs to survive a
/// recycle or reorder. The pool grows
/// only while the oldest segment is still on-screen when a replacement is
/// needed, which bounds the live count near `viewport_width / LINE_COUNT + 1`
/// once steady state is reached.
pub struct ChartEngine {
    viewport: Rect,
    colors: Vec<Color32>,
    segments: VecDeque<ChartSegment>,
}

impl ChartEngine {
    /// Builds an engine for a fixed viewport, one channel per color.
    ///
    /// Degenerate geometry is rejected here so tick processing never has to
    /// fail: a height at or below the grid margins would collapse the
    /// vertical step to zero.
    pub fn new(width: f32, height: f32, colors: Vec<Color32>) -> Result<Self, ChartError> {
        if colors.is_empty() {
            return Err(ChartError::NoChannels);
        }
        if !(width > 0.0) || !(height > 2.0 * grid::MARGIN) {
            return Err(ChartError::ViewportTooSmall { width, height });
        }
        Ok(Self {
            viewport: Rect::from_min_size(Pos2::ZERO, vec2(width, height)),
            colors,
            segments: VecDeque::new(),
        })
    }

    fn initial_position(&self) -> Pos2 {
        pos2(
            LEFT_REVEAL - LINE_COUNT as f32 / 2.0,
            self.viewport.height() / 2.0,
        )
    }

    fn push_new_segment(&mut self) {
        let mut segment = ChartSegment::new(self.viewport.height(), &self.colors);
        segment.set_position(self.initial_position());
        self.segments.push_front(segment);
    }

    /// Processes one tick: write the sample, roll segments over when the head
    /// fills, and advance the scroll position of every live segment by one
    /// point.
    pub fn add_sample(&mut self, sample: &[f64]) {
        if self.segments.is_empty() {
            self.push_new_segment();
        }
        let head = self
            .segments
            .front_mut()
            .expect("segment pool is never empty past allocation");
        if head.add(sample) {
            self.recycle();
            // The sample that filled the old head is also the first sample of
            // the new one, so the polylines meet exactly at the seam.
            self.segments
                .front_mut()
                .expect("recycle always leaves a head segment")
                .add(sample);
        }
        for segment in &mut self.segments {
            segment.translate(1.0);
        }
    }

    /// Readies a head segment after the previous one filled.
    ///
    /// The tail is the oldest segment: either it is still visible, meaning
    /// the pool is not large enough yet and a new segment is allocated, or it
    /// has scrolled fully off-screen and is reset, repositioned, and moved to
    /// the head as the youngest segment again.
    fn recycle(&mut self) {
        let tail_visible = self
            .segments
            .back()
            .map_or(true, |segment| segment.is_visible(self.viewport));
        if tail_visible {
            self.push_new_segment();
            log::debug!("segment pool grew to {}", self.segments.len());
        } else {
            let mut segment = self
                .segments
                .pop_back()
                .expect("recycle is only reached after the pool was seeded");
            segment.reset();
            segment.set_position(self.initial_position());
            self.segments.push_front(segment);
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Largest |value| seen by any live segment.
    pub fn max_abs_value(&self) -> f64 {
        self.segments
            .iter()
            .map(|segment| segment.max_abs_value())
            .fold(1.0, f64::max)
    }

    /// Returns whether any segment changed since the last call, clearing the
    /// flags. The caller uses this to schedule a repaint.
    pub fn take_dirty(&mut self) -> bool {
        let mut dirty = false;
        for segment in &mut self.segments {
            dirty |= segment.take_dirty();
        }
        dirty
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport.width(), self.viewport.height())
    }

    /// Paints background, grid, and every visible segment with `top_left` as
    /// the chart's on-screen origin. Fully off-screen segments are skipped.
    pub fn draw(&self, painter: &Painter, top_left: Pos2) {
        let offset = top_left.to_vec2();
        let screen = self.viewport.translate(offset);
        painter.rect_filled(screen, Rounding::same(0.0), BACKGROUND_COLOR);
        let clipped = painter.with_clip_rect(screen);
        grid::draw_grid_lines(&clipped, screen);
        for segment in self.segments.iter().rev() {
            if segment.is_visible(self.viewport) {
                segment.draw(&clipped, offset);
            }
        }
        grid::draw_axis_gutter(painter, screen);
    }
}
