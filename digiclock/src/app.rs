//! Application shell: which screen is showing and how big the window is.

use std::time::Instant;

use chrono::{DateTime, Utc};
use clockcore::theme::consume_special_keys;
use clockcore::RepaintController;
use egui::{Context, ViewportCommand};
use tracing::info;

use crate::clock_screen::{ClockEvent, ClockScreen};
use crate::settings::ClockSettings;
use crate::settings_screen::{SettingsEvent, SettingsScreen};

/// Window size while the settings form is up.
pub const SETTINGS_WINDOW_SIZE: egui::Vec2 = egui::vec2(400.0, 500.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Settings,
    Clock,
}

pub struct DigitalClockApp {
    screen: Screen,
    settings: SettingsScreen,
    clock: ClockScreen,
    repaint: RepaintController,
}

impl Default for DigitalClockApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitalClockApp {
    pub fn new() -> Self {
        Self {
            screen: Screen::Settings,
            settings: SettingsScreen::new(),
            clock: ClockScreen::new(),
            repaint: RepaintController::new(),
        }
    }

    #[cfg(test)]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Stop the clock and go back to the form in a normal window.
    pub fn show_settings(&mut self) -> Vec<ViewportCommand> {
        let was_running = self.clock.is_running();
        self.clock.stop();
        self.screen = Screen::Settings;
        self.repaint.mark_needs_repaint();
        info!(was_running, "showing settings");

        vec![
            ViewportCommand::Fullscreen(false),
            ViewportCommand::InnerSize(SETTINGS_WINDOW_SIZE),
        ]
    }

    /// Switch to the clock. The digits are sized from the resolution preset
    /// in `settings`, not from the window that actually results.
    pub fn show_clock(&mut self, settings: ClockSettings, now: Instant, utc: DateTime<Utc>) -> Vec<ViewportCommand> {
        self.screen = Screen::Clock;

        let mut commands = match settings.size_mode.window_size() {
            None => vec![ViewportCommand::Fullscreen(true)],
            Some(size) => vec![ViewportCommand::Fullscreen(false), ViewportCommand::InnerSize(size)],
        };
        commands.push(ViewportCommand::Focus);
        // Lay out once more with the new window geometry
        self.repaint.mark_needs_repaint();

        self.clock.start(settings, now, utc);
        let target = settings.resolution;
        self.clock.resize(target.height, target.width, settings.size_mode);
        info!(
            mode = settings.size_mode.label(),
            resolution = %target,
            font_px = self.clock.font_pixel_size(),
            "showing clock"
        );

        commands
    }

    /// One frame at `now`. `update` calls this with the real clocks.
    fn run_frame(&mut self, ctx: &Context, now: Instant, utc: DateTime<Utc>) {
        let focus = consume_special_keys(ctx);

        let commands = match self.screen {
            Screen::Settings => match self.settings.show(ctx) {
                Some(SettingsEvent::Start(settings)) => self.show_clock(settings, now, utc),
                Some(SettingsEvent::Window(action)) => action.viewport_command().into_iter().collect(),
                None => Vec::new(),
            },
            Screen::Clock => match self.clock.show(ctx, now, utc) {
                Some(ClockEvent::ReturnToSettings) => self.show_settings(),
                None => Vec::new(),
            },
        };
        for command in commands {
            ctx.send_viewport_cmd(command);
        }
        focus.restore(ctx);

        self.repaint.end_frame(ctx, self.clock.next_tick_in(now));
    }
}

impl eframe::App for DigitalClockApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.run_frame(ctx, Instant::now(), Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Resolution, SizeMode};
    use crate::settings_screen::ColorTarget;
    use chrono::TimeZone;
    use egui::Color32;
    use std::time::Duration;

    fn utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap()
    }

    fn medium_1366() -> ClockSettings {
        ClockSettings {
            size_mode: SizeMode::Medium,
            resolution: Resolution::new(1366, 768),
            ..ClockSettings::default()
        }
    }

    #[test]
    fn test_starts_on_settings() {
        let app = DigitalClockApp::new();
        assert_eq!(app.screen(), Screen::Settings);
        assert!(!app.clock.is_running());
    }

    #[test]
    fn test_medium_clock_window_and_font() {
        let mut app = DigitalClockApp::new();
        let commands = app.show_clock(medium_1366(), Instant::now(), utc());

        assert_eq!(app.screen(), Screen::Clock);
        assert!(app.clock.is_running());
        assert_eq!(app.clock.font_pixel_size(), 384);
        assert_eq!(app.clock.face().map(|f| f.text()), Some("11:00".to_owned()));

        assert!(matches!(commands[0], ViewportCommand::Fullscreen(false)));
        assert!(matches!(commands[1], ViewportCommand::InnerSize(size) if size == egui::vec2(800.0, 400.0)));
        assert!(matches!(commands[2], ViewportCommand::Focus));
    }

    #[test]
    fn test_small_clock_window() {
        let mut app = DigitalClockApp::new();
        let settings = ClockSettings {
            size_mode: SizeMode::Small,
            ..ClockSettings::default()
        };
        let commands = app.show_clock(settings, Instant::now(), utc());
        assert!(matches!(commands[1], ViewportCommand::InnerSize(size) if size == egui::vec2(400.0, 200.0)));
        assert_eq!(app.clock.font_pixel_size(), 324);
    }

    #[test]
    fn test_full_screen_clock() {
        let mut app = DigitalClockApp::new();
        let commands = app.show_clock(ClockSettings::default(), Instant::now(), utc());
        assert!(matches!(commands[0], ViewportCommand::Fullscreen(true)));
        assert!(!commands.iter().any(|c| matches!(c, ViewportCommand::InnerSize(_))));
        assert_eq!(app.clock.font_pixel_size(), 594);
    }

    #[test]
    fn test_back_to_settings_stops_tick() {
        let t0 = Instant::now();
        let mut app = DigitalClockApp::new();
        app.show_clock(medium_1366(), t0, utc());
        let commands = app.show_settings();

        assert_eq!(app.screen(), Screen::Settings);
        assert!(!app.clock.is_running());
        assert_eq!(app.clock.advance(t0 + Duration::from_secs(10), utc()), 0);
        assert!(matches!(commands[0], ViewportCommand::Fullscreen(false)));
        assert!(matches!(commands[1], ViewportCommand::InnerSize(size) if size == SETTINGS_WINDOW_SIZE));
    }

    #[test]
    fn test_form_changes_do_not_reach_running_clock() {
        let mut app = DigitalClockApp::new();
        let SettingsEvent::Start(snapshot) = app.settings.start() else {
            panic!("expected Start");
        };
        app.show_clock(snapshot, Instant::now(), utc());

        app.settings.set_color(ColorTarget::Background, Color32::WHITE);
        app.settings.set_color(ColorTarget::Text, Color32::BLUE);
        app.settings.set_size_mode(SizeMode::Small);

        let running = app.clock.settings().copied().unwrap();
        assert_eq!(running, ClockSettings::default());
        assert_eq!(app.clock.font_pixel_size(), 594);
    }

    #[test]
    fn test_escape_frame_returns_to_settings() {
        let t0 = Instant::now();
        let mut app = DigitalClockApp::new();
        let settings = ClockSettings {
            size_mode: SizeMode::Small,
            resolution: Resolution::new(1280, 600),
            ..ClockSettings::default()
        };
        app.show_clock(settings, t0, utc());

        let ctx = Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            app.run_frame(ctx, t0 + Duration::from_millis(100), utc());
        });
        assert_eq!(app.screen(), Screen::Clock);

        let escape = egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::Escape,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::default(),
            }],
            ..Default::default()
        };
        let _ = ctx.run(escape, |ctx| {
            app.run_frame(ctx, t0 + Duration::from_millis(600), utc());
        });
        assert_eq!(app.screen(), Screen::Settings);
        assert!(!app.clock.is_running());
        assert_eq!(app.clock.next_tick_in(t0), None);
    }

    #[test]
    fn test_settings_frame_without_input_stays_put() {
        let mut app = DigitalClockApp::new();
        let ctx = Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            app.run_frame(ctx, Instant::now(), utc());
        });
        assert_eq!(app.screen(), Screen::Settings);
        assert!(!app.clock.is_running());
    }
}
