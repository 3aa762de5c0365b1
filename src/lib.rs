//! Source-level debugger for nuPython-style programs.
//!
//! A parsed program is a chain of statement nodes. The debugger pauses the
//! chain's executor after a single statement by cutting the cursor's
//! outgoing link, and restores every link before the session ends.

pub mod config;
pub mod console;
pub mod debugger;
pub mod executor;
pub mod memory;
pub mod parser;
pub mod program;

pub use config::DebuggerConfig;
pub use console::{run_console, ConsoleExit};
pub use debugger::{DebugContext, RunMode, SessionState, StepEvent};
pub use executor::{Executor, Interpreter};
pub use memory::{Memory, Value};
pub use parser::parse_program;
pub use program::Chain;
