#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod command;
mod controller;
mod error;
mod serial_port;
mod settings;

use settings::Settings;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Arduino DAC Control")
            .with_inner_size([360.0, 560.0])
            .with_min_inner_size([340.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Arduino DAC Control",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::DacPanelApp::new(cc, &settings)))),
    )
}
