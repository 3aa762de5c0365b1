use std::fmt;

use thiserror::Error;
use tracing::info;

/// Lifecycle of a debugging session. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing executed yet.
    Loaded,
    /// The cursor holds the next pending statement.
    Running,
    Completed,
}

impl SessionState {
    pub fn name(self) -> &'static str {
        match self {
            SessionState::Loaded => "Loaded",
            SessionState::Running => "Running",
            SessionState::Completed => "Completed",
        }
    }

    pub(super) fn transition(&mut self, next: SessionState) {
        debug_assert!(
            *self != SessionState::Completed || next == SessionState::Completed,
            "left the Completed state"
        );
        if *self != next {
            info!(from = self.name(), to = next.name(), "session state changed");
            *self = next;
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("program has completed")]
    Completed,
}

/// Answer to "what line are we on?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Line(u32),
    Completed,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Line(line) => write!(f, "line {line}"),
            Position::Completed => f.write_str("completed execution"),
        }
    }
}
