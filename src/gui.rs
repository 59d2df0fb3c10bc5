use std::time::Duration;

use eframe::egui::{self, vec2, RichText};

use crate::chart::{self, ChartEngine, ChartError};
use crate::config::{AppConfig, MAX_UPDATE_HZ, MIN_UPDATE_HZ};
use crate::source::{MotionSource, SimulatedMotion};
use crate::types::Vec3;
use crate::velocity::VelocityIntegrator;

const CHART_WIDTH: f32 = 512.0;
const CHART_HEIGHT: f32 = 160.0;

pub struct MotionScopeApp {
    source: Box<dyn MotionSource>,
    chart: ChartEngine,
    integrator: Option<VelocityIntegrator>,
    latest: Vec3,
    update_hz: f64,
    running: bool,
}

impl MotionScopeApp {
    pub fn new(config: &AppConfig) -> Result<Self, ChartError> {
        let source = SimulatedMotion::new(config.update_hz, config.amplitude_g, config.noise_g);
        Self::with_source(Box::new(source), config)
    }

    /// Injection point for the motion source: the app owns the tick loop, the
    /// caller owns where the samples come from.
    pub fn with_source(
        source: Box<dyn MotionSource>,
        config: &AppConfig,
    ) -> Result<Self, ChartError> {
        let chart = ChartEngine::new(CHART_WIDTH, CHART_HEIGHT, chart::axis_colors())?;
        Ok(Self {
            source,
            chart,
            integrator: None,
            latest: Vec3::ZERO,
            update_hz: config.update_hz,
            running: false,
        })
    }

    fn toggle_running(&mut self) {
        if self.running {
            self.running = false;
            self.source.stop();
            log::info!("capture stopped");
        } else {
            self.source.set_rate_hz(self.update_hz);
            if self.source.start() {
                self.running = true;
                log::info!("capture started at {} Hz", self.update_hz);
            } else {
                log::warn!("motion source unavailable, staying idle");
            }
        }
    }

    /// One round of the tick loop: drain the source and fan each frame out to
    /// the chart and the integrator. The first frame only seeds the
    /// integrator's left endpoint.
    fn pump(&mut self) {
        for frame in self.source.poll() {
            self.chart.add_sample(&frame.accel.to_array());
            match self.integrator.as_mut() {
                Some(integrator) => integrator.add(frame.accel, frame.dt),
                None => self.integrator = Some(VelocityIntegrator::new(frame.accel)),
            }
            self.latest = frame.accel;
        }
    }

    fn speed(&self) -> f64 {
        self.integrator
            .as_ref()
            .map_or(0.0, VelocityIntegrator::magnitude)
    }

    fn axis_readout(&self, ui: &mut egui::Ui) {
        let axes = [
            ("x", self.latest.x, chart::X_COLOR),
            ("y", self.latest.y, chart::Y_COLOR),
            ("z", self.latest.z, chart::Z_COLOR),
        ];
        for (name, value, color) in axes {
            ui.label(
                RichText::new(format!("{name} {} g", format_fixed(value, 6, 4)))
                    .monospace()
                    .color(color),
            );
        }
    }
}

impl eframe::App for MotionScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.running {
            self.pump();
            // Wake up again before the next sample is due.
            ctx.request_repaint_after(Duration::from_secs_f64(0.5 / self.update_hz));
        }
        if self.chart.take_dirty() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("MotionScope");
            ui.horizontal(|ui| {
                let label = if self.running { "Stop" } else { "Start" };
                if ui.button(label).clicked() {
                    self.toggle_running();
                }
                ui.add_enabled(
                    !self.running,
                    egui::Slider::new(&mut self.update_hz, MIN_UPDATE_HZ..=MAX_UPDATE_HZ)
                        .text("Hz"),
                );
                if ui.button("Reset velocity").clicked() {
                    if let Some(integrator) = self.integrator.as_mut() {
                        integrator.reset();
                    }
                }
            });
            ui.separator();

            let (width, height) = self.chart.viewport_size();
            let (response, painter) = ui.allocate_painter(vec2(width, height), egui::Sense::hover());
            self.chart.draw(&painter, response.rect.min);

            ui.separator();
            ui.horizontal(|ui| {
                self.axis_readout(ui);
            });
            let velocity = self
                .integrator
                .as_ref()
                .map_or(Vec3::ZERO, VelocityIntegrator::value);
            ui.label(
                RichText::new(format!(
                    "v ({} {} {}) · |v| {} m/s",
                    format_fixed(velocity.x, 6, 4),
                    format_fixed(velocity.y, 6, 4),
                    format_fixed(velocity.z, 6, 4),
                    format_fixed(self.speed(), 6, 4),
                ))
                .monospace(),
            );
            ui.label(format!(
                "segments {} · peak |a| {:.2} g",
                self.chart.segment_count(),
                self.chart.max_abs_value()
            ));
        });
    }
}

/// Fixed-width decimal readout, `width` characters with `precision` digits
/// after the point. Values too wide spill over instead of truncating.
fn format_fixed(value: f64, width: usize, precision: usize) -> String {
    format!("{value:>width$.precision$}")
}
