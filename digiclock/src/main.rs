//! digiclock — a full-screen or windowed digital clock
//!
//! Starts on a settings form. "Start Clock" switches to a large `HH:MM`
//! display with a blinking colon; escape switches back.

mod app;
mod clock_screen;
mod face;
mod logging;
mod settings;
mod settings_screen;

use app::{DigitalClockApp, SETTINGS_WINDOW_SIZE};
use clockcore::theme::install_fonts;
use clockcore::ClockTheme;
use eframe::NativeOptions;
use settings::ClockFont;
use tracing::info;

const APP_TITLE: &str = "Digital Clock App";

fn main() -> eframe::Result<()> {
    if let Err(err) = logging::init() {
        eprintln!("[digiclock] logging unavailable: {err}");
    }

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(SETTINGS_WINDOW_SIZE)
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| {
            ClockTheme::default().apply(&cc.egui_ctx);
            let fonts = ClockFont::system_fonts();
            let loaded = install_fonts(&cc.egui_ctx, &fonts);
            info!(loaded, offered = fonts.len(), "fonts installed");
            Box::new(DigitalClockApp::new())
        }),
    )
}
