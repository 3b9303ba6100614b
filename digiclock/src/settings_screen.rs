//! The settings form
//!
//! Holds the working copy of [`ClockSettings`]. Every control writes straight
//! into it through one of the `set_*` handlers; "Start Clock" hands a copy to
//! the shell as [`SettingsEvent::Start`].

use clockcore::theme::ClockTheme;
use clockcore::widgets::{status_bar, window_control_buttons, ColorSwatch, WindowAction};
use egui::color_picker::{color_picker_color32, Alpha};
use egui::{Align2, Color32, ComboBox, Context, Vec2};
use tracing::{debug, info};

use crate::settings::{ClockFont, ClockSettings, GmtOffset, Resolution, SizeMode};

/// Events raised by the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Start the clock with this snapshot.
    Start(ClockSettings),
    /// A window control (close, minimize) was clicked.
    Window(WindowAction),
}

/// Which color a picker dialog edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Background,
    Text,
}

impl ColorTarget {
    fn title(self) -> &'static str {
        match self {
            ColorTarget::Background => "Select Background Color",
            ColorTarget::Text => "Select Text Color",
        }
    }
}

/// An open color picker. The pending color only reaches the settings when
/// the user confirms.
#[derive(Debug, Clone, Copy)]
struct ColorDialog {
    target: ColorTarget,
    pending: Color32,
}

pub struct SettingsScreen {
    theme: ClockTheme,
    working: ClockSettings,
    dialog: Option<ColorDialog>,
    show_about: bool,
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self {
            theme: ClockTheme::default(),
            working: ClockSettings::default(),
            dialog: None,
            show_about: false,
        }
    }

    /// The working copy as it stands.
    #[cfg(test)]
    pub fn settings(&self) -> &ClockSettings {
        &self.working
    }

    pub fn color(&self, target: ColorTarget) -> Color32 {
        match target {
            ColorTarget::Background => self.working.background,
            ColorTarget::Text => self.working.text_color,
        }
    }

    pub fn set_color(&mut self, target: ColorTarget, color: Color32) {
        match target {
            ColorTarget::Background => self.working.background = color,
            ColorTarget::Text => self.working.text_color = color,
        }
        debug!(?target, ?color, "color changed");
    }

    pub fn set_size_mode(&mut self, size_mode: SizeMode) {
        self.working.size_mode = size_mode;
    }

    /// Values outside the allowed range are clamped.
    pub fn set_gmt_offset(&mut self, hours: i32) {
        self.working.gmt_offset = GmtOffset::new(hours);
    }

    pub fn set_font(&mut self, font: ClockFont) {
        self.working.font = font;
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.working.resolution = resolution;
    }

    pub fn reset(&mut self) {
        self.working = ClockSettings::default();
        self.dialog = None;
    }

    pub fn open_color_dialog(&mut self, target: ColorTarget) {
        self.dialog = Some(ColorDialog {
            target,
            pending: self.color(target),
        });
    }

    #[cfg(test)]
    pub fn is_color_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Commit the picked color, like pressing "ok".
    pub fn confirm_color_dialog(&mut self) {
        if let Some(dialog) = self.dialog.take() {
            self.set_color(dialog.target, dialog.pending);
        }
    }

    /// Throw the picked color away, like pressing "cancel".
    pub fn cancel_color_dialog(&mut self) {
        self.dialog = None;
    }

    /// Snapshot for the clock.
    pub fn start(&self) -> SettingsEvent {
        info!(
            mode = self.working.size_mode.label(),
            resolution = %self.working.resolution,
            "start requested"
        );
        SettingsEvent::Start(self.working)
    }

    pub fn show(&mut self, ctx: &Context) -> Option<SettingsEvent> {
        let mut event = None;

        let strip = self.theme.strip_frame();
        let win_action = egui::TopBottomPanel::top("menu_bar")
            .show(ctx, |ui| {
                strip
                    .show(ui, |ui| {
                        egui::menu::bar(ui, |ui| {
                            let action = window_control_buttons(ui);
                            ui.menu_button("clock", |ui| {
                                if ui.button("start clock").clicked() {
                                    event = Some(self.start());
                                    ui.close_menu();
                                }
                                ui.separator();
                                if ui.button("reset to defaults").clicked() {
                                    self.reset();
                                    ui.close_menu();
                                }
                            });
                            ui.menu_button("help", |ui| {
                                if ui.button("about").clicked() {
                                    self.show_about = true;
                                    ui.close_menu();
                                }
                            });
                            action
                        })
                        .inner
                    })
                    .inner
            })
            .inner;
        if win_action != WindowAction::None {
            event = Some(SettingsEvent::Window(win_action));
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar(ui, "escape returns here from the clock");
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let theme = self.theme;
            theme.strip_frame().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(theme.heading("Digital Clock Settings"));
                });
            });
            ui.add_space(12.0);

            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing(theme.grid_spacing)
                .show(ui, |ui| {
                    self.controls(ui);
                });

            ui.add_space(16.0);
            let start = egui::Button::new(theme.heading("Start Clock"));
            if ui.add_sized([ui.available_width(), 50.0], start).clicked() {
                event = Some(self.start());
            }
        });

        self.draw_color_dialog(ctx);
        self.draw_about(ctx);

        event
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        for target in [ColorTarget::Background, ColorTarget::Text] {
            ui.label(match target {
                ColorTarget::Background => "Background Color:",
                ColorTarget::Text => "Text Color:",
            });
            if ui.add(ColorSwatch::new("Select Color", self.color(target)).min_width(140.0)).clicked() {
                self.open_color_dialog(target);
            }
            ui.end_row();
        }

        ui.label("Clock Size:");
        let mut size_mode = self.working.size_mode;
        ComboBox::from_id_source("size_mode")
            .selected_text(size_mode.label())
            .show_ui(ui, |ui| {
                for mode in SizeMode::ALL {
                    ui.selectable_value(&mut size_mode, mode, mode.label());
                }
            });
        if size_mode != self.working.size_mode {
            self.set_size_mode(size_mode);
        }
        ui.end_row();

        ui.label("GMT Offset:");
        ui.horizontal(|ui| {
            let mut hours = self.working.gmt_offset.hours();
            if ui.add_enabled(hours > GmtOffset::MIN, egui::Button::new("-")).clicked() {
                hours -= 1;
            }
            ui.add(
                egui::DragValue::new(&mut hours)
                    .clamp_range(GmtOffset::MIN..=GmtOffset::MAX)
                    .speed(0.1),
            );
            if ui.add_enabled(hours < GmtOffset::MAX, egui::Button::new("+")).clicked() {
                hours += 1;
            }
            if hours != self.working.gmt_offset.hours() {
                self.set_gmt_offset(hours);
            }
        });
        ui.end_row();

        ui.label("Font Family:");
        let mut font = self.working.font;
        ComboBox::from_id_source("font_family")
            .selected_text(font.label())
            .show_ui(ui, |ui| {
                for choice in ClockFont::ALL {
                    ui.selectable_value(&mut font, choice, choice.label());
                }
            });
        if font != self.working.font {
            self.set_font(font);
        }
        ui.end_row();

        ui.label("Monitor Resolution:");
        let mut resolution = self.working.resolution;
        ComboBox::from_id_source("resolution")
            .selected_text(resolution.to_string())
            .show_ui(ui, |ui| {
                for preset in Resolution::PRESETS {
                    ui.selectable_value(&mut resolution, preset, preset.to_string());
                }
            });
        if resolution != self.working.resolution {
            self.set_resolution(resolution);
        }
        ui.end_row();
    }

    fn draw_color_dialog(&mut self, ctx: &Context) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };

        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new(dialog.target.title())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                color_picker_color32(ui, &mut dialog.pending, Alpha::Opaque);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    confirmed = ui.button("ok").clicked();
                    cancelled = ui.button("cancel").clicked();
                });
            });

        if confirmed {
            self.confirm_color_dialog();
        } else if cancelled {
            self.cancel_color_dialog();
        }
    }

    fn draw_about(&mut self, ctx: &Context) {
        if !self.show_about {
            return;
        }
        egui::Window::new("about")
            .collapsible(false)
            .resizable(false)
            .default_width(260.0)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.heading("Digital Clock");
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label("a large HH:MM clock for any screen");
                    ui.label("escape leaves the clock");
                    ui.add_space(12.0);
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                    ui.add_space(4.0);
                });
            });
    }
}
