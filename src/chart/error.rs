use thiserror::Error;

/// Configuration problems rejected when a chart is constructed.
///
/// None of these can occur at tick time; a degenerate viewport would produce
/// zero-length grid spacing downstream, so it is refused up front.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("viewport {width}x{height} is too small for the chart grid")]
    ViewportTooSmall { width: f32, height: f32 },
    #[error("chart needs at least one channel color")]
    NoChannels,
}
