//! What the clock shows: shifted time, `HH:MM`, and the blinking colon.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId};

use crate::settings::GmtOffset;

/// `utc` moved by a fixed number of hours. Daylight saving is never applied.
pub fn local_time(utc: DateTime<Utc>, offset: GmtOffset) -> DateTime<FixedOffset> {
    utc.with_timezone(&offset.fixed_offset())
}

/// One rendering of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockFace {
    pub hours: u32,
    pub minutes: u32,
    pub colon_visible: bool,
}

impl ClockFace {
    pub fn at(utc: DateTime<Utc>, offset: GmtOffset, colon_visible: bool) -> Self {
        let local = local_time(utc, offset);
        Self {
            hours: local.hour(),
            minutes: local.minute(),
            colon_visible,
        }
    }

    /// `HH:MM`. The colon is always part of the text, hidden or not.
    pub fn text(&self) -> String {
        format!("{:02}:{:02}", self.hours, self.minutes)
    }

    /// The colon is drawn transparent rather than left out, so the digits
    /// keep their position while it blinks.
    pub fn colon_color(&self, text_color: Color32) -> Color32 {
        if self.colon_visible {
            text_color
        } else {
            Color32::TRANSPARENT
        }
    }

    pub fn layout_job(&self, font_id: FontId, text_color: Color32) -> LayoutJob {
        let digits = TextFormat {
            font_id: font_id.clone(),
            color: text_color,
            ..Default::default()
        };
        let colon = TextFormat {
            font_id,
            color: self.colon_color(text_color),
            ..Default::default()
        };

        let mut job = LayoutJob::default();
        job.append(&format!("{:02}", self.hours), 0.0, digits.clone());
        job.append(":", 0.0, colon);
        job.append(&format!("{:02}", self.minutes), 0.0, digits);
        job
    }
}
