#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod chart;
mod config;
mod gui;
mod source;
mod types;
mod velocity;

use std::path::Path;

use anyhow::{anyhow, Context};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::AppConfig::load_or_default(Path::new("motionscope.json"));
    let app = gui::MotionScopeApp::new(&config).context("failed to set up the chart")?;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([640.0, 400.0])
        .with_min_inner_size([600.0, 360.0])
        .with_title("MotionScope");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native("MotionScope", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| anyhow!("eframe: {err}"))
}
