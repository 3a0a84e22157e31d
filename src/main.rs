//! Entry point for the egui-based prediction panel.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use lifepanel::config::{self, PanelSettings};
use lifepanel::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use lifepanel::form::messages;
use lifepanel::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = match config::load_or_default() {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::error!("Failed to load config: {err}");
            None
        }
    };

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([900.0, 760.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Esperanza de vida",
        native_options,
        Box::new(move |_cc| Ok(launch(settings))),
    )?;
    Ok(())
}

fn launch(settings: Option<PanelSettings>) -> Box<dyn eframe::App> {
    match build_app(settings) {
        Ok(app) => Box::new(app),
        Err(fallback) => Box::new(fallback),
    }
}

fn build_app(settings: Option<PanelSettings>) -> Result<EguiApp, LaunchError> {
    let Some(settings) = settings else {
        return Err(LaunchError {
            message: messages::CONFIG_LOAD_FAILED.to_string(),
        });
    };
    EguiApp::new(&settings).map_err(|err| LaunchError {
        message: err.to_string(),
    })
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(messages::LAUNCH_FAILED);
                ui.label(&self.message);
            });
        });
    }
}
