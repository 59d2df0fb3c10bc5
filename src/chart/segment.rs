use eframe::egui::{pos2, vec2, Color32, Painter, Pos2, Rect, Stroke, Vec2};

use super::grid;
use super::history::SampleHistory;

/// Number of line pieces a segment draws per channel. Each piece is one
/// point wide, so a segment covers `LINE_COUNT` points of horizontal space.
pub const LINE_COUNT: usize = 64;

/// A bounded, reusable window of chart history rendered as polylines.
///
/// The fill cursor starts one past `line_count` (drawing N pieces needs N+1
/// values) and walks down to zero as samples arrive; the segment is full when
/// it reaches zero. Segments are recycled with `reset` rather than dropped.
pub struct ChartSegment {
    line_count: usize,
    fill_cursor: usize,
    pub(crate) history: Vec<SampleHistory>,
    position: Pos2,
    height: f32,
    max_abs_value: f64,
    dirty: bool,
}

impl ChartSegment {
    pub fn new(height: f32, colors: &[Color32]) -> Self {
        Self::with_line_count(LINE_COUNT, height, colors)
    }

    pub fn with_line_count(line_count: usize, height: f32, colors: &[Color32]) -> Self {
        let index_size = line_count + 1;
        let history = colors
            .iter()
            .map(|&color| SampleHistory::new(index_size, color))
            .collect();
        Self {
            line_count,
            fill_cursor: index_size,
            history,
            position: Pos2::ZERO,
            height,
            max_abs_value: 1.0,
            dirty: true,
        }
    }

    pub fn is_full(&self) -> bool {
        self.fill_cursor == 0
    }

    /// Appends one multi-channel sample.
    ///
    /// While the segment has room the cursor moves down one slot and each
    /// channel value lands there, so the newest sample always occupies the
    /// lowest unfilled index. The segment is marked dirty either way, and the
    /// running peak tracks every incoming sample even once the segment is
    /// full. Returns whether the segment is now full.
    pub fn add(&mut self, sample: &[f64]) -> bool {
        if self.fill_cursor > 0 {
            self.fill_cursor -= 1;
            for c in 0..sample.len().min(self.history.len()) {
                self.history[c][self.fill_cursor] = sample[c];
            }
        }
        for &value in sample {
            if value.abs() > self.max_abs_value {
                self.max_abs_value = value.abs();
            }
        }
        self.dirty = true;
        self.is_full()
    }

    /// Clears every channel and rewinds the cursor so the segment can be
    /// refilled from scratch.
    pub fn reset(&mut self) {
        for history in &mut self.history {
            history.reset();
        }
        self.fill_cursor = self.line_count + 1;
        self.dirty = true;
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    /// Shifts the segment horizontally; pure position update, the stored
    /// samples are untouched.
    pub fn translate(&mut self, dx: f32) {
        self.position.x += dx;
    }

    /// Screen-space frame centered on the segment's position.
    pub fn frame(&self) -> Rect {
        Rect::from_center_size(self.position, vec2(self.line_count as f32, self.height))
    }

    pub fn is_visible(&self, viewport: Rect) -> bool {
        viewport.intersects(self.frame())
    }

    /// Largest |value| seen so far across all channels. Not applied to the
    /// render scale; exposed for captions and future auto-scaling.
    pub fn max_abs_value(&self) -> f64 {
        self.max_abs_value
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Strokes every channel as `line_count` unit-spaced pieces. Piece `i`
    /// connects `(i, h[i]*dy)` to `(i+1, h[i+1]*dy)` relative to the vertical
    /// center; positive values are drawn above it.
    pub fn draw(&self, painter: &Painter, offset: Vec2) {
        let frame = self.frame().translate(offset);
        let dy = grid::dy_grid(self.height);
        let left = frame.left();
        let cy = frame.center().y;
        for history in &self.history {
            debug_assert_eq!(history.len(), self.line_count + 1);
            let stroke = Stroke::new(1.5, history.color());
            for i in 0..self.line_count {
                let a = pos2(left + i as f32, cy - history[i] as f32 * dy);
                let b = pos2(left + (i + 1) as f32, cy - history[i + 1] as f32 * dy);
                painter.line_segment([a, b], stroke);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_channel(line_count: usize) -> ChartSegment {
        ChartSegment::with_line_count(line_count, 100.0, &[Color32::RED])
    }

    #[test]
    fn fills_back_to_front_until_full() {
        let mut segment = one_channel(4);
        for (i, value) in [1.0, 2.0, 3.0, 4.0, 5.0].iter().enumerate() {
            let full = segment.add(&[*value]);
            assert_eq!(full, i == 4);
        }
        assert!(segment.is_full());
        // Oldest value at the top index, newest at index 0.
        let history = &segment.history[0];
        assert_eq!(history[4], 1.0);
        assert_eq!(history[3], 2.0);
        assert_eq!(history[2], 3.0);
        assert_eq!(history[1], 4.0);
        assert_eq!(history[0], 5.0);
    }

    #[test]
    fn partial_fill_leaves_lower_indices_zero() {
        let mut segment = one_channel(4);
        segment.add(&[7.0]);
        segment.add(&[8.0]);
        let history = &segment.history[0];
        assert_eq!(history[4], 7.0);
        assert_eq!(history[3], 8.0);
        for i in 0..3 {
            assert_eq!(history[i], 0.0);
        }
    }

    #[test]
    fn add_on_a_full_segment_keeps_data_but_tracks_peak() {
        let mut segment = one_channel(2);
        for value in [1.0, 1.0, 1.0] {
            segment.add(&[value]);
        }
        assert!(segment.is_full());
        segment.take_dirty();
        assert!(segment.add(&[-6.0]));
        assert_eq!(segment.history[0][0], 1.0);
        assert_eq!(segment.max_abs_value(), 6.0);
        // Dirty even though no slot was written.
        assert!(segment.take_dirty());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut segment = one_channel(4);
        for value in [1.0, 2.0, 3.0] {
            segment.add(&[value]);
        }
        segment.reset();
        segment.reset();
        assert!(!segment.is_full());
        for i in 0..5 {
            assert_eq!(segment.history[0][i], 0.0);
        }
        // A full refill works after recycling.
        for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
            segment.add(&[value]);
        }
        assert!(segment.is_full());
    }

    #[test]
    fn visibility_is_frame_intersection() {
        let mut segment = one_channel(4);
        let viewport = Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0));
        segment.set_position(pos2(50.0, 50.0));
        assert!(segment.is_visible(viewport));
        segment.set_position(pos2(150.0, 50.0));
        assert!(!segment.is_visible(viewport));
    }

    #[test]
    fn channels_clamp_to_the_shorter_side() {
        let mut segment = ChartSegment::with_line_count(4, 100.0, &[Color32::RED, Color32::BLUE]);
        segment.add(&[1.0]);
        assert_eq!(segment.history[0][4], 1.0);
        assert_eq!(segment.history[1][4], 0.0);
    }
}
