//! Tick timing and repaint scheduling
//!
//! egui is immediate mode and has no timers: a frame only runs when input
//! arrives or when someone asked for a repaint. The clock needs a steady
//! 500 ms beat, so the beat is modelled as a deadline:
//!
//! 1. [`TickTimer`] remembers when the next tick is due and, when polled,
//!    reports how many ticks fell due since the last poll.
//! 2. [`RepaintController`] turns the time left until that deadline into a
//!    `request_repaint_after`, so the event loop wakes up exactly when the
//!    next tick is due and sleeps otherwise.
//!
//! Starting and stopping the timer is always the caller's job. Nothing here
//! stops a timer on its own.

use std::time::{Duration, Instant};

/// Interval between clock ticks. Two ticks make one colon blink.
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// A repeating, deadline-based timer.
///
/// All methods take the current instant so the timer can be driven by a
/// fake clock in tests.
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval: Duration,
    /// `None` while stopped.
    next_due: Option<Instant>,
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero(), "tick interval must be non-zero");
        Self {
            interval,
            next_due: None,
        }
    }

    /// Start the timer, or restart it if it is already running.
    /// The first tick falls due one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Stop the timer. Stopping a stopped timer does nothing.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of ticks that fell due up to and including `now`.
    ///
    /// The deadline is moved past `now`, so every tick is reported exactly
    /// once. A stopped timer always reports zero.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let behind = now.duration_since(due).as_nanos() / self.interval.as_nanos().max(1);
        let ticks = u32::try_from(behind.saturating_add(1)).unwrap_or(u32::MAX);
        self.next_due = Some(due + self.interval * ticks);
        ticks
    }

    /// Time left until the next tick, or `None` while stopped.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Decides when the egui context should run the next frame.
///
/// Call [`mark_needs_repaint`](Self::mark_needs_repaint) when state changed
/// outside an input event (a screen switch, a window resize) and
/// [`end_frame`](Self::end_frame) at the bottom of `update()`.
#[derive(Debug, Default)]
pub struct RepaintController {
    needs_repaint: bool,
}

impl RepaintController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request one more frame as soon as possible.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    #[cfg(test)]
    fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Schedule the next frame:
    /// - a pending one-shot request repaints immediately,
    /// - otherwise a running timer repaints when its next tick is due,
    /// - otherwise nothing is scheduled and egui sleeps until input.
    pub fn end_frame(&mut self, ctx: &egui::Context, next_tick: Option<Duration>) {
        if std::mem::take(&mut self.needs_repaint) {
            ctx.request_repaint();
        } else if let Some(wait) = next_tick {
            ctx.request_repaint_after(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_stopped_timer_never_ticks() {
        let t0 = Instant::now();
        let mut timer = TickTimer::default();
        assert!(!timer.is_running());
        assert_eq!(timer.poll(t0 + ms(10_000)), 0);
        assert_eq!(timer.time_until_next(t0), None);
    }

    #[test]
    fn test_first_tick_after_one_interval() {
        let t0 = Instant::now();
        let mut timer = TickTimer::default();
        timer.start(t0);
        assert_eq!(timer.poll(t0 + ms(499)), 0);
        assert_eq!(timer.poll(t0 + ms(500)), 1);
        // Already reported, not again.
        assert_eq!(timer.poll(t0 + ms(500)), 0);
        assert_eq!(timer.poll(t0 + ms(999)), 0);
        assert_eq!(timer.poll(t0 + ms(1000)), 1);
    }

    #[test]
    fn test_late_poll_reports_every_missed_tick() {
        let t0 = Instant::now();
        let mut timer = TickTimer::default();
        timer.start(t0);
        assert_eq!(timer.poll(t0 + ms(1750)), 3);
        // Deadline stays on the original grid.
        assert_eq!(timer.time_until_next(t0 + ms(1750)), Some(ms(250)));
        assert_eq!(timer.poll(t0 + ms(2000)), 1);
    }

    #[test]
    fn test_stop_is_idempotent_and_silences_ticks() {
        let t0 = Instant::now();
        let mut timer = TickTimer::default();
        timer.start(t0);
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.poll(t0 + ms(5000)), 0);
    }

    #[test]
    fn test_restart_resets_the_deadline() {
        let t0 = Instant::now();
        let mut timer = TickTimer::default();
        timer.start(t0);
        timer.start(t0 + ms(400));
        assert_eq!(timer.poll(t0 + ms(500)), 0);
        assert_eq!(timer.poll(t0 + ms(900)), 1);
    }

    #[test]
    fn test_end_frame_consumes_one_shot_request() {
        let ctx = egui::Context::default();
        let mut repaint = RepaintController::new();
        repaint.mark_needs_repaint();
        assert!(repaint.needs_repaint());
        repaint.end_frame(&ctx, None);
        assert!(!repaint.needs_repaint());
        repaint.end_frame(&ctx, Some(ms(500)));
        assert!(!repaint.needs_repaint());
    }
}
