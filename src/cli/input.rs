//! Line commands typed during an interactive session.

use std::fmt;

use thiserror::Error;

/// Direction of a duration edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Increase,
    Decrease,
}

impl Step {
    /// Signed factor applied to the configured step.
    pub fn sign(&self) -> f64 {
        match self {
            Step::Increase => 1.0,
            Step::Decrease => -1.0,
        }
    }
}

/// A command typed on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Play/stop button: start while inactive, stop otherwise
    Toggle,
    /// Start, or skip to the break while working
    Start,
    /// Stop the running timer
    Stop,
    /// Lengthen or shorten the work interval
    AdjustWork(Step),
    /// Lengthen or shorten the break interval
    AdjustBreak(Step),
    /// Switch to the named profile
    Profile(String),
    /// Print the current status
    Status,
    /// Print the command list
    Help,
    /// Leave the session
    Quit,
}

impl fmt::Display for InputCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputCommand::Toggle => f.write_str("toggle"),
            InputCommand::Start => f.write_str("start"),
            InputCommand::Stop => f.write_str("stop"),
            InputCommand::AdjustWork(Step::Increase) => f.write_str("work +"),
            InputCommand::AdjustWork(Step::Decrease) => f.write_str("work -"),
            InputCommand::AdjustBreak(Step::Increase) => f.write_str("break +"),
            InputCommand::AdjustBreak(Step::Decrease) => f.write_str("break -"),
            InputCommand::Profile(name) => write!(f, "profile {name}"),
            InputCommand::Status => f.write_str("status"),
            InputCommand::Help => f.write_str("help"),
            InputCommand::Quit => f.write_str("quit"),
        }
    }
}

/// Errors for lines that are not commands.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{command}` expects + or -, got {got:?}")]
    InvalidStep { command: &'static str, got: String },
}

/// Parses one input line.
///
/// An empty line is the play/stop button.
///
/// # Errors
///
/// Returns an error for unknown commands or malformed arguments.
pub fn parse_input(line: &str) -> Result<InputCommand, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(InputCommand::Toggle);
    };

    match head.to_lowercase().as_str() {
        "toggle" | "t" => Ok(InputCommand::Toggle),
        "start" | "s" => Ok(InputCommand::Start),
        "stop" | "x" => Ok(InputCommand::Stop),
        "work" | "w" => parse_step("work", words.next()).map(InputCommand::AdjustWork),
        "break" | "b" => parse_step("break", words.next()).map(InputCommand::AdjustBreak),
        "profile" | "p" => {
            let name = words.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                Err(InputError::MissingArgument {
                    command: "profile",
                    expected: "a profile name",
                })
            } else {
                Ok(InputCommand::Profile(name))
            }
        }
        "status" | "st" => Ok(InputCommand::Status),
        "help" | "h" | "?" => Ok(InputCommand::Help),
        "quit" | "q" | "exit" => Ok(InputCommand::Quit),
        _ => Err(InputError::Unknown(head.to_string())),
    }
}

fn parse_step(command: &'static str, arg: Option<&str>) -> Result<Step, InputError> {
    match arg {
        Some("+") | Some("up") => Ok(Step::Increase),
        Some("-") | Some("down") => Ok(Step::Decrease),
        Some(other) => Err(InputError::InvalidStep {
            command,
            got: other.to_string(),
        }),
        None => Err(InputError::MissingArgument {
            command,
            expected: "+ or -",
        }),
    }
}
