//! Clock theme
//!
//! The settings form is drawn in plain black and white with 1px outlines.
//! The clock face itself takes its colors from the user's settings, so the
//! only color helper here is the contrast rule used for labels on swatches.
//!
//! Fonts: egui ships a proportional and a monospace font. Every other family
//! the clock offers is looked up on disk and registered under its own name.
//! A family whose file cannot be found is still registered, chained to the
//! built-in monospace font, so drawing with it never panics.

use std::path::{Path, PathBuf};

use egui::epaint::Shadow;
use egui::{
    Color32, FontData, FontDefinitions, FontFamily, Frame, Id, RichText, Rounding, Stroke, TextStyle, Vec2, Visuals,
};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Named colors used by the clock.
pub struct ClockColors;

impl ClockColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const RED: Color32 = Color32::from_rgb(255, 0, 0);
}

/// HSL lightness of a color, `(max + min) / 2` over its RGB channels.
pub fn lightness(color: Color32) -> u8 {
    let [r, g, b, _] = color.to_array();
    let max = r.max(g).max(b) as u16;
    let min = r.min(g).min(b) as u16;
    ((max + min) / 2) as u8
}

/// Label color readable on top of `background`: white on dark, black on light.
pub fn contrast_text_color(background: Color32) -> Color32 {
    if lightness(background) < 128 {
        ClockColors::WHITE
    } else {
        ClockColors::BLACK
    }
}

/// Look of the settings form: black on white, square 1px outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTheme {
    pub body_size: f32,
    /// Form title and the start button.
    pub heading_size: f32,
    /// Gap between the cells of the settings grid.
    pub grid_spacing: Vec2,
    pub outline: Stroke,
}

impl Default for ClockTheme {
    fn default() -> Self {
        Self {
            body_size: 14.0,
            heading_size: 16.0,
            grid_spacing: egui::vec2(12.0, 10.0),
            outline: Stroke::new(1.0, ClockColors::BLACK),
        }
    }
}

impl ClockTheme {
    /// Install the form's visuals and text sizes on `ctx`. The clock face
    /// sizes its own digits and is unaffected.
    pub fn apply(&self, ctx: &egui::Context) {
        let visuals = self.visuals();
        ctx.style_mut(|style| {
            style.visuals = visuals;
            for (text_style, font) in style.text_styles.iter_mut() {
                match text_style {
                    TextStyle::Heading => font.size = self.heading_size,
                    TextStyle::Small => {}
                    _ => font.size = self.body_size,
                }
            }
        });
    }

    fn visuals(&self) -> Visuals {
        let mut visuals = Visuals::light();
        visuals.panel_fill = ClockColors::WHITE;
        visuals.window_fill = ClockColors::WHITE;
        visuals.extreme_bg_color = ClockColors::WHITE;
        visuals.window_stroke = self.outline;
        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_shadow = Shadow::NONE;
        visuals.popup_shadow = Shadow::NONE;

        let widgets = &mut visuals.widgets;
        for state in [
            &mut widgets.noninteractive,
            &mut widgets.inactive,
            &mut widgets.hovered,
            &mut widgets.active,
            &mut widgets.open,
        ] {
            state.bg_fill = ClockColors::WHITE;
            state.weak_bg_fill = ClockColors::WHITE;
            state.bg_stroke = self.outline;
            state.fg_stroke = self.outline;
            state.rounding = Rounding::ZERO;
        }
        widgets.hovered.bg_stroke.width = self.outline.width * 2.0;
        visuals
    }

    /// Bold text at heading size.
    pub fn heading(&self, text: impl Into<String>) -> RichText {
        RichText::new(text).size(self.heading_size).strong()
    }

    /// Outlined white strip around the menu row and the form title.
    pub fn strip_frame(&self) -> Frame {
        Frame::none()
            .fill(ClockColors::WHITE)
            .stroke(self.outline)
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
    }
}

/// A font family offered to the user, and the file names it is known by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemFont {
    pub family: &'static str,
    pub files: &'static [&'static str],
}

#[derive(Error, Debug)]
pub enum FontLoadError {
    #[error("no font file for {family} in {searched} search directories")]
    NotFound { family: &'static str, searched: usize },
    #[error("failed to read font file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// How deep below each search directory font files are looked for.
/// Distributions nest fonts as `truetype/<vendor>/<file>`.
const FONT_SEARCH_DEPTH: usize = 3;

/// Directories searched for font files, most specific first.
pub fn font_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    // Next to the executable, for bundled fonts
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            dirs.push(dir.join("fonts"));
        }
    }

    if let Some(user) = directories::UserDirs::new() {
        if let Some(font_dir) = user.font_dir() {
            dirs.push(font_dir.to_path_buf());
        }
        dirs.push(user.home_dir().join(".fonts"));
    }

    for system in [
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/Library/Fonts",
        "/System/Library/Fonts/Supplemental",
        "C:\\Windows\\Fonts",
    ] {
        dirs.push(PathBuf::from(system));
    }

    dirs
}

fn find_in(dir: &Path, files: &[&str]) -> Option<PathBuf> {
    WalkDir::new(dir)
        .max_depth(FONT_SEARCH_DEPTH + 1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| files.iter().any(|f| f.eq_ignore_ascii_case(name)))
        })
        .map(|entry| entry.into_path())
}

/// Find the file backing `font` in the first directory that has one.
pub fn locate_font(font: &SystemFont, dirs: &[PathBuf]) -> Result<PathBuf, FontLoadError> {
    dirs.iter()
        .find_map(|dir| find_in(dir, font.files))
        .ok_or(FontLoadError::NotFound {
            family: font.family,
            searched: dirs.len(),
        })
}

/// Read the bytes of `font` from the first matching file under `dirs`.
pub fn load_font(font: &SystemFont, dirs: &[PathBuf]) -> Result<Vec<u8>, FontLoadError> {
    let path = locate_font(font, dirs)?;
    std::fs::read(&path).map_err(|source| FontLoadError::Io { path, source })
}

/// Register every font in `fonts` as `FontFamily::Name(family)`.
///
/// Families found on disk come first in their chain, followed by the
/// built-in monospace fonts as glyph fallback. Returns how many families
/// were backed by a real file.
pub fn install_fonts(ctx: &egui::Context, fonts: &[SystemFont]) -> usize {
    install_fonts_from(ctx, fonts, &font_search_dirs())
}

/// [`install_fonts`] with explicit search directories.
pub fn install_fonts_from(ctx: &egui::Context, fonts: &[SystemFont], dirs: &[PathBuf]) -> usize {
    let mut defs = FontDefinitions::default();
    let monospace = defs
        .families
        .get(&FontFamily::Monospace)
        .cloned()
        .unwrap_or_default();
    let mut loaded = 0;

    for font in fonts {
        let mut chain = monospace.clone();
        match load_font(font, dirs) {
            Ok(data) => {
                defs.font_data
                    .insert(font.family.to_owned(), FontData::from_owned(data));
                chain.insert(0, font.family.to_owned());
                loaded += 1;
                debug!(family = font.family, "loaded system font");
            }
            Err(err) => {
                warn!(family = font.family, %err, "using built-in monospace instead");
            }
        }
        defs.families.insert(FontFamily::Name(font.family.into()), chain);
    }

    ctx.set_fonts(defs);
    loaded
}

/// Id under which a Shift+Tab pin waits for the next frame.
fn pinned_focus_id() -> Id {
    Id::new("clockcore::pinned_focus")
}

/// Strip zoom shortcuts and Tab from this frame's input.
///
/// Zooming would rescale the clock away from its computed pixel size, and
/// Tab would cycle focus through the form. Call at the top of `update()`
/// and call [`FocusPin::restore`] on the result once the frame's widgets
/// are drawn.
///
/// egui reads Tab in `begin_frame`, before `update()` runs, and the focused
/// widget hands focus on as soon as it is drawn. Stripping the event cannot
/// stop that, so the focus held before the press is put back afterwards.
pub fn consume_special_keys(ctx: &egui::Context) -> FocusPin {
    // Shift+Tab moves focus one frame late; undo it now.
    if let Some(id) = ctx.data(|d| d.get_temp::<Id>(pinned_focus_id())) {
        ctx.data_mut(|d| d.remove::<Id>(pinned_focus_id()));
        ctx.memory_mut(|mem| mem.request_focus(id));
    }

    let tab_pressed = ctx.input(|i| {
        i.events
            .iter()
            .any(|e| matches!(e, egui::Event::Key { key: egui::Key::Tab, pressed: true, .. }))
    });
    let focused = ctx.memory(|mem| mem.focused());

    ctx.input_mut(|i| {
        i.events.retain(|event| match event {
            egui::Event::Key { key: egui::Key::Tab, .. } => false,
            egui::Event::Key { key, modifiers, .. } if modifiers.command => {
                !matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals)
            }
            _ => true,
        });
    });

    FocusPin { tab_pressed, focused }
}

/// Keyboard focus as it was when [`consume_special_keys`] ran.
#[must_use = "call `restore` after the frame's widgets are drawn"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusPin {
    tab_pressed: bool,
    focused: Option<Id>,
}

impl FocusPin {
    /// Undo any focus change Tab made this frame.
    pub fn restore(self, ctx: &egui::Context) {
        if !self.tab_pressed {
            return;
        }
        match self.focused {
            Some(id) => {
                ctx.memory_mut(|mem| mem.request_focus(id));
                ctx.data_mut(|d| d.insert_temp(pinned_focus_id(), id));
            }
            None => {
                if let Some(id) = ctx.memory(|mem| mem.focused()) {
                    ctx.memory_mut(|mem| mem.surrender_focus(id));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::FontId;

    #[test]
    fn test_lightness_matches_hsl() {
        assert_eq!(lightness(ClockColors::BLACK), 0);
        assert_eq!(lightness(ClockColors::WHITE), 255);
        // Pure red: (255 + 0) / 2
        assert_eq!(lightness(ClockColors::RED), 127);
        assert_eq!(lightness(Color32::from_rgb(200, 100, 50)), 125);
    }

    #[test]
    fn test_contrast_text_color() {
        assert_eq!(contrast_text_color(ClockColors::BLACK), ClockColors::WHITE);
        assert_eq!(contrast_text_color(ClockColors::RED), ClockColors::WHITE);
        assert_eq!(contrast_text_color(ClockColors::WHITE), ClockColors::BLACK);
        assert_eq!(contrast_text_color(Color32::from_rgb(255, 255, 0)), ClockColors::BLACK);
        // Threshold: 128 is already light
        assert_eq!(contrast_text_color(Color32::from_rgb(128, 128, 128)), ClockColors::BLACK);
        assert_eq!(contrast_text_color(Color32::from_rgb(127, 127, 127)), ClockColors::WHITE);
    }

    const TEST_FONT: SystemFont = SystemFont {
        family: "Test Mono",
        files: &["TestMono-Regular.ttf", "testmono.otf"],
    };

    #[test]
    fn test_locate_font_in_nested_directory() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("truetype").join("test");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("TestMono-Regular.ttf"), b"not really a font").unwrap();

        let dirs = vec![root.path().join("missing"), root.path().to_path_buf()];
        let found = locate_font(&TEST_FONT, &dirs).unwrap();
        assert_eq!(found, nested.join("TestMono-Regular.ttf"));
        assert_eq!(load_font(&TEST_FONT, &dirs).unwrap(), b"not really a font");
    }

    #[test]
    fn test_locate_font_ignores_case() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("TESTMONO.OTF"), b"x").unwrap();
        let dirs = vec![root.path().to_path_buf()];
        assert!(locate_font(&TEST_FONT, &dirs).is_ok());
    }

    #[test]
    fn test_missing_font_reports_not_found() {
        let root = tempfile::tempdir().unwrap();
        let dirs = vec![root.path().to_path_buf()];
        match locate_font(&TEST_FONT, &dirs) {
            Err(FontLoadError::NotFound { family, searched }) => {
                assert_eq!(family, "Test Mono");
                assert_eq!(searched, 1);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_family_still_renders() {
        let root = tempfile::tempdir().unwrap();
        let ctx = egui::Context::default();
        let loaded = install_fonts_from(&ctx, &[TEST_FONT], &[root.path().to_path_buf()]);
        assert_eq!(loaded, 0);

        // Fonts take effect on the next frame.
        let _ = ctx.run(egui::RawInput::default(), |_| {});
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let font = FontId::new(24.0, FontFamily::Name("Test Mono".into()));
            let galley = ctx.fonts(|f| f.layout_no_wrap("12:34".to_owned(), font, ClockColors::BLACK));
            assert!(galley.size().x > 0.0);
        });
    }

    fn key(key: egui::Key, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    fn input(events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput {
            events,
            ..Default::default()
        }
    }

    #[test]
    fn test_consume_special_keys_strips_zoom_and_tab() {
        let ctx = egui::Context::default();
        let command = egui::Modifiers {
            command: true,
            ..Default::default()
        };
        let raw = input(vec![
            key(egui::Key::Tab, egui::Modifiers::default()),
            key(egui::Key::Plus, command),
            key(egui::Key::Escape, egui::Modifiers::default()),
        ]);
        let _ = ctx.run(raw, |ctx| {
            let pin = consume_special_keys(ctx);
            ctx.input(|i| {
                assert_eq!(i.events.len(), 1);
                assert!(i.key_pressed(egui::Key::Escape));
            });
            pin.restore(ctx);
        });
    }

    /// One frame with two buttons, run the way `update()` runs it.
    fn two_button_frame(ctx: &egui::Context, raw: egui::RawInput) -> (Id, Id) {
        let mut ids = (Id::NULL, Id::NULL);
        let _ = ctx.run(raw, |ctx| {
            let pin = consume_special_keys(ctx);
            egui::CentralPanel::default().show(ctx, |ui| {
                ids = (ui.button("a").id, ui.button("b").id);
            });
            pin.restore(ctx);
        });
        ids
    }

    fn focused(ctx: &egui::Context) -> Option<Id> {
        ctx.memory(|mem| mem.focused())
    }

    #[test]
    fn test_tab_does_not_move_focus() {
        let ctx = egui::Context::default();
        let (a, _) = two_button_frame(&ctx, input(vec![]));
        ctx.memory_mut(|mem| mem.request_focus(a));
        two_button_frame(&ctx, input(vec![]));
        assert_eq!(focused(&ctx), Some(a));

        two_button_frame(&ctx, input(vec![key(egui::Key::Tab, egui::Modifiers::default())]));
        assert_eq!(focused(&ctx), Some(a));
        two_button_frame(&ctx, input(vec![]));
        assert_eq!(focused(&ctx), Some(a));
    }

    #[test]
    fn test_shift_tab_does_not_move_focus() {
        let ctx = egui::Context::default();
        let (_, b) = two_button_frame(&ctx, input(vec![]));
        ctx.memory_mut(|mem| mem.request_focus(b));
        two_button_frame(&ctx, input(vec![]));

        let shift = egui::Modifiers {
            shift: true,
            ..Default::default()
        };
        two_button_frame(&ctx, input(vec![key(egui::Key::Tab, shift)]));
        assert_eq!(focused(&ctx), Some(b));
        two_button_frame(&ctx, input(vec![]));
        assert_eq!(focused(&ctx), Some(b));
    }

    #[test]
    fn test_tab_does_not_grab_focus_when_nothing_is_focused() {
        let ctx = egui::Context::default();
        two_button_frame(&ctx, input(vec![]));
        two_button_frame(&ctx, input(vec![key(egui::Key::Tab, egui::Modifiers::default())]));
        assert_eq!(focused(&ctx), None);
        two_button_frame(&ctx, input(vec![]));
        assert_eq!(focused(&ctx), None);
    }

    #[test]
    fn test_apply_sets_form_text_sizes() {
        let ctx = egui::Context::default();
        let theme = ClockTheme::default();
        theme.apply(&ctx);
        let style = ctx.style();
        assert_eq!(style.text_styles[&TextStyle::Heading].size, theme.heading_size);
        assert_eq!(style.text_styles[&TextStyle::Body].size, theme.body_size);
        assert_eq!(style.visuals.panel_fill, ClockColors::WHITE);
        assert_eq!(style.visuals.widgets.hovered.bg_stroke.width, 2.0);
    }
}
