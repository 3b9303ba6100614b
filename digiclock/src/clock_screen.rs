//! The clock display
//!
//! The screen is driven by the shell: `start` hands it a settings snapshot
//! and starts the 500 ms tick, `resize` sizes the digits, `stop` halts the
//! tick. Pressing escape only reports [`ClockEvent::ReturnToSettings`]; the
//! tick keeps running until the shell calls `stop`.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use clockcore::TickTimer;
use egui::{CentralPanel, Context, FontId, Frame, Key, Sense};
use tracing::{debug, info, trace};

use crate::face::ClockFace;
use crate::settings::{ClockSettings, SizeMode};

/// Font size used until the first `resize`.
const DEFAULT_FONT_PX: u32 = 48;

/// Events raised by the clock screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    ReturnToSettings,
}

pub struct ClockScreen {
    /// Snapshot received in `start`. Never modified here.
    settings: Option<ClockSettings>,
    timer: TickTimer,
    colon_visible: bool,
    face: Option<ClockFace>,
    font_px: u32,
    /// Request keyboard focus on the next frame
    claim_focus: bool,
}

impl Default for ClockScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockScreen {
    pub fn new() -> Self {
        Self {
            settings: None,
            timer: TickTimer::default(),
            colon_visible: true,
            face: None,
            font_px: DEFAULT_FONT_PX,
            claim_focus: false,
        }
    }

    /// Take a settings snapshot, draw the current time straight away with the
    /// colon showing, and start ticking.
    pub fn start(&mut self, settings: ClockSettings, now: Instant, utc: DateTime<Utc>) {
        info!(
            offset = %settings.gmt_offset,
            font = settings.font.label(),
            "clock started"
        );
        self.settings = Some(settings);
        self.colon_visible = true;
        self.face = Some(ClockFace::at(utc, settings.gmt_offset, self.colon_visible));
        self.timer.start(now);
        self.claim_focus = true;
    }

    /// Halt the tick. Harmless when already stopped.
    pub fn stop(&mut self) {
        if self.timer.is_running() {
            debug!("clock stopped");
        }
        self.timer.stop();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Size the digits from the target height; the width plays no part.
    pub fn resize(&mut self, target_height: u32, target_width: u32, size_mode: SizeMode) {
        self.font_px = size_mode.font_pixel_size(target_height);
        debug!(
            target_height,
            target_width,
            mode = size_mode.label(),
            font_px = self.font_px,
            "clock resized"
        );
    }

    pub fn font_pixel_size(&self) -> u32 {
        self.font_px
    }

    #[cfg(test)]
    pub fn settings(&self) -> Option<&ClockSettings> {
        self.settings.as_ref()
    }

    #[cfg(test)]
    pub fn face(&self) -> Option<ClockFace> {
        self.face
    }

    /// Apply every tick that fell due by `now`. Returns the number applied.
    pub fn advance(&mut self, now: Instant, utc: DateTime<Utc>) -> u32 {
        let ticks = self.timer.poll(now);
        if ticks > 0 {
            self.on_tick(ticks, utc);
        }
        ticks
    }

    fn on_tick(&mut self, ticks: u32, utc: DateTime<Utc>) {
        let Some(settings) = self.settings else {
            return;
        };
        // One toggle per tick, even when several ticks are applied at once
        if ticks % 2 == 1 {
            self.colon_visible = !self.colon_visible;
        }
        let face = ClockFace::at(utc, settings.gmt_offset, self.colon_visible);
        trace!(ticks, time = %face.text(), colon = face.colon_visible, "tick");
        self.face = Some(face);
    }

    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_next(now)
    }

    pub fn show(&mut self, ctx: &Context, now: Instant, utc: DateTime<Utc>) -> Option<ClockEvent> {
        self.advance(now, utc);

        let settings = self.settings.unwrap_or_default();
        let font_px = self.font_px;
        let face = self.face;
        let claim_focus = std::mem::take(&mut self.claim_focus);

        CentralPanel::default()
            .frame(Frame::none().fill(settings.background))
            .show(ctx, |ui| {
                let area = ui.available_rect_before_wrap();
                let response = ui.allocate_rect(area, Sense::click());
                if claim_focus {
                    response.request_focus();
                }

                if let Some(face) = face {
                    let font = FontId::new(font_px as f32, settings.font.family());
                    let job = face.layout_job(font, settings.text_color);
                    let galley = ui.fonts(|f| f.layout_job(job));
                    let pos = area.center() - galley.size() / 2.0;
                    ui.painter().galley(pos, galley, settings.text_color);
                }
            });

        let escape = ctx.input(|i| i.key_pressed(Key::Escape));
        escape.then_some(ClockEvent::ReturnToSettings)
    }
}
