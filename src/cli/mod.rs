//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Line commands typed during a session
//! - `session`: The interactive poll loop
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

pub use commands::{Cli, Commands, ConfigAction, RunArgs};
pub use display::Display;
pub use input::{parse_input, InputCommand, InputError, Step};
pub use session::{run_session, spawn_input_reader, Outcome, Session};
