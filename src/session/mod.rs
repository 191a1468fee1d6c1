//! Interactive game session
//!
//! `Command` is what the operator can report, `GameSession` is the state
//! machine that consumes it.

mod command;
mod game;

pub use command::{Command, CommandError, parse_override};
pub use game::{GameSession, Outcome, SessionError, SessionState};
