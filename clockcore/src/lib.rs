//! clockcore — shared library for the digital clock
//!
//! Theme and font loading, the tick timer that drives the clock face, and a
//! handful of small widgets used by the settings form.

pub mod repaint;
pub mod theme;
pub mod widgets;

pub use repaint::{RepaintController, TickTimer, TICK_INTERVAL};
pub use theme::ClockTheme;
