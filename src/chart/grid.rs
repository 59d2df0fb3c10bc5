//! Grid geometry and the static parts of the chart surface.

use eframe::egui::{pos2, vec2, Align2, Color32, FontId, Painter, Rect, Rounding, Stroke};

use super::{BACKGROUND_COLOR, GRID_LINE_COLOR};

/// Vertical space kept clear above and below the grid, in points.
pub const MARGIN: f32 = 7.5;

/// Width of the axis-label gutter painted over the left edge of the chart.
pub const GUTTER_WIDTH: f32 = 32.0;

const NOTCH_LABELS: [&str; 7] = ["+3.0", "+2.0", "+1.0", "0.0", "-1.0", "-2.0", "-3.0"];

/// Vertical distance between grid notches. Seven lines (-3..+3 units) fit in
/// the height minus the two margins, leaving six spaces in between.
pub fn dy_grid(height: f32) -> f32 {
    (height - 2.0 * MARGIN) / 6.0
}

/// Screen y for a grid notch `n` units above center.
fn notch_y(rect: Rect, n: i32) -> f32 {
    rect.center().y - n as f32 * dy_grid(rect.height())
}

/// Strokes the seven horizontal reference lines across `rect`.
pub fn draw_grid_lines(painter: &Painter, rect: Rect) {
    let stroke = Stroke::new(1.0, GRID_LINE_COLOR);
    for n in -3..=3 {
        let y = notch_y(rect, n);
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
    }
}

/// Paints the label gutter on top of the segment layer: an opaque strip with
/// the unit labels and short notch ticks. Drawn last so fresh segments slide
/// out from underneath it.
pub fn draw_axis_gutter(painter: &Painter, rect: Rect) {
    let gutter = Rect::from_min_size(rect.min, vec2(GUTTER_WIDTH, rect.height()));
    painter.rect_filled(gutter, Rounding::same(0.0), BACKGROUND_COLOR);

    let stroke = Stroke::new(1.0, GRID_LINE_COLOR);
    for n in -3..=3 {
        let y = notch_y(rect, n);
        painter.line_segment(
            [
                pos2(gutter.right() - 6.0, y),
                pos2(gutter.right(), y),
            ],
            stroke,
        );
    }

    for (i, label) in NOTCH_LABELS.iter().enumerate() {
        let y = notch_y(rect, 3 - i as i32);
        painter.text(
            pos2(gutter.right() - 8.0, y),
            Align2::RIGHT_CENTER,
            *label,
            FontId::proportional(10.0),
            Color32::BLACK,
        );
    }
}
