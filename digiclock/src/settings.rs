//! Clock settings
//!
//! `ClockSettings` is a small `Copy` value. The settings form owns a working
//! copy and mutates it; the clock receives its own copy when it starts, so
//! nothing the form does afterwards can reach a running clock.

use std::fmt;

use chrono::{FixedOffset, Offset, Utc};
use clockcore::theme::{ClockColors, SystemFont};
use egui::{Color32, FontFamily};

/// How large the clock is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeMode {
    Small,
    Medium,
    FullScreen,
}

impl SizeMode {
    pub const ALL: [SizeMode; 3] = [SizeMode::Small, SizeMode::Medium, SizeMode::FullScreen];

    pub fn label(self) -> &'static str {
        match self {
            SizeMode::Small => "Small",
            SizeMode::Medium => "Medium",
            SizeMode::FullScreen => "Full Screen",
        }
    }

    /// Share of the target height used as font pixel size, in percent.
    pub fn font_percent(self) -> u32 {
        match self {
            SizeMode::Small => 30,
            SizeMode::Medium => 50,
            SizeMode::FullScreen => 55,
        }
    }

    /// Font pixel size for a target height. Width never matters, so the
    /// digits fit vertically the same way on every aspect ratio.
    pub fn font_pixel_size(self, target_height: u32) -> u32 {
        target_height * self.font_percent() / 100
    }

    /// Fixed window size for the windowed modes, `None` for full screen.
    pub fn window_size(self) -> Option<egui::Vec2> {
        match self {
            SizeMode::Small => Some(egui::vec2(400.0, 200.0)),
            SizeMode::Medium => Some(egui::vec2(800.0, 400.0)),
            SizeMode::FullScreen => None,
        }
    }
}

/// Fixed hour shift from UTC. No daylight saving time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GmtOffset(i8);

impl GmtOffset {
    pub const MIN: i32 = -12;
    pub const MAX: i32 = 14;

    /// Offset of `hours`, clamped into `MIN..=MAX`.
    pub fn new(hours: i32) -> Self {
        Self(hours.clamp(Self::MIN, Self::MAX) as i8)
    }

    pub fn hours(self) -> i32 {
        i32::from(self.0)
    }

    pub fn seconds(self) -> i32 {
        self.hours() * 3600
    }

    /// The offset as a chrono time zone.
    pub fn fixed_offset(self) -> FixedOffset {
        let zone = FixedOffset::east_opt(self.seconds());
        debug_assert!(zone.is_some(), "{self} outside chrono's offset range");
        zone.unwrap_or_else(|| Utc.fix())
    }
}

impl fmt::Display for GmtOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTC{:+}", self.0)
    }
}

/// Font families the clock can be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockFont {
    Monospace,
    LiberationMono,
    DejaVuSansMono,
    CourierNew,
    FreeMono,
    UbuntuMono,
}

impl ClockFont {
    pub const ALL: [ClockFont; 6] = [
        ClockFont::Monospace,
        ClockFont::LiberationMono,
        ClockFont::DejaVuSansMono,
        ClockFont::CourierNew,
        ClockFont::FreeMono,
        ClockFont::UbuntuMono,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ClockFont::Monospace => "Monospace",
            ClockFont::LiberationMono => "Liberation Mono",
            ClockFont::DejaVuSansMono => "DejaVu Sans Mono",
            ClockFont::CourierNew => "Courier New",
            ClockFont::FreeMono => "FreeMono",
            ClockFont::UbuntuMono => "Ubuntu Mono",
        }
    }

    /// Where the font lives on disk. `None` for the built-in monospace font.
    pub fn system_font(self) -> Option<SystemFont> {
        let files: &'static [&'static str] = match self {
            ClockFont::Monospace => return None,
            ClockFont::LiberationMono => &["LiberationMono-Regular.ttf"],
            ClockFont::DejaVuSansMono => &["DejaVuSansMono.ttf"],
            ClockFont::CourierNew => &["Courier_New.ttf", "cour.ttf", "Courier New.ttf"],
            ClockFont::FreeMono => &["FreeMono.ttf", "FreeMono.otf"],
            ClockFont::UbuntuMono => &["UbuntuMono-R.ttf", "UbuntuMono-Regular.ttf"],
        };
        Some(SystemFont {
            family: self.label(),
            files,
        })
    }

    /// Every family that has to be registered with egui at startup.
    pub fn system_fonts() -> Vec<SystemFont> {
        Self::ALL.iter().filter_map(|f| f.system_font()).collect()
    }

    /// egui family for this font. Named families are registered by
    /// `clockcore::theme::install_fonts`.
    pub fn family(self) -> FontFamily {
        match self {
            ClockFont::Monospace => FontFamily::Monospace,
            other => FontFamily::Name(other.label().into()),
        }
    }
}

/// Nominal size of the monitor the clock is shown on.
///
/// Only used to size the font. It is whatever the user picked, not what the
/// display actually measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const PRESETS: [Resolution; 11] = [
        Resolution::new(1920, 1080),
        Resolution::new(1680, 1050),
        Resolution::new(1600, 900),
        Resolution::new(1440, 900),
        Resolution::new(1366, 768),
        Resolution::new(1360, 768),
        Resolution::new(1280, 1024),
        Resolution::new(1280, 960),
        Resolution::new(1280, 800),
        Resolution::new(1280, 720),
        Resolution::new(1280, 600),
    ];
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Everything the user can choose about the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSettings {
    pub background: Color32,
    pub text_color: Color32,
    pub size_mode: SizeMode,
    pub gmt_offset: GmtOffset,
    pub font: ClockFont,
    pub resolution: Resolution,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            background: ClockColors::BLACK,
            text_color: ClockColors::RED,
            size_mode: SizeMode::FullScreen,
            gmt_offset: GmtOffset::new(-3),
            font: ClockFont::Monospace,
            resolution: Resolution::new(1920, 1080),
        }
    }
}
