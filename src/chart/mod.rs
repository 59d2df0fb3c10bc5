//! Scrolling chart engine: a bounded pool of reusable segments that fakes an
//! infinitely scrolling multi-channel waveform.

pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod segment;

pub use engine::ChartEngine;
pub use error::ChartError;

use eframe::egui::Color32;

pub const BACKGROUND_COLOR: Color32 = Color32::WHITE;
pub const GRID_LINE_COLOR: Color32 = Color32::from_gray(178);
pub const X_COLOR: Color32 = Color32::from_rgb(255, 0, 0);
pub const Y_COLOR: Color32 = Color32::from_rgb(0, 170, 0);
pub const Z_COLOR: Color32 = Color32::from_rgb(0, 0, 255);

/// Channel colors in fan-out order, matching [`crate::types::Vec3::to_array`].
pub fn axis_colors() -> Vec<Color32> {
    vec![X_COLOR, Y_COLOR, Z_COLOR]
}
