mod breakpoints;
mod commands;
mod context;
mod session;
mod splice;
mod stepping;

pub use breakpoints::{BreakpointError, Breakpoints, VisitPhase};
pub use commands::{Command, CommandError, HELP};
pub use context::DebugContext;
pub use session::{Position, SessionError, SessionState};
pub use splice::{detach, peek_next, reattach, Detached};
pub use stepping::{RunMode, StepEvent};
