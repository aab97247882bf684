//! Timer core for the Pomodoro Timer.
//!
//! - `clock`: injectable time sources
//! - `interval`: a single countdown measured from an absolute start instant
//! - `mode`: the work/break timer pair and its modality state machine
//! - `controller`: intents, expiry polling, duration edits and notifications

pub mod clock;
pub mod controller;
pub mod interval;
pub mod mode;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::TimerController;
pub use interval::IntervalTimer;
pub use mode::{format_clock, format_minutes, Mode};
