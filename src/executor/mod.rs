mod runner;

pub use runner::Interpreter;

use thiserror::Error;

use crate::memory::Memory;
use crate::program::{Chain, StmtId};

/// Semantic errors raised while executing a statement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecError {
    #[error("name '{0}' is not defined")]
    UndefinedVariable(String),

    #[error("unsupported operand types for {op}: {lhs} and {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in '{0}'")]
    Overflow(&'static str),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("invalid conversion: {0}")]
    InvalidConversion(String),

    #[error("output failed: {0}")]
    Output(String),
}

/// Where and why an execution stopped early.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecFailure {
    pub at: StmtId,
    pub error: ExecError,
}

/// `Ok` carries the last statement executed.
pub type Execution = Result<StmtId, ExecFailure>;

/// Runs statements forward from `start` along `next` links until the chain
/// ends or a statement fails.
pub trait Executor {
    fn execute(&mut self, chain: &Chain, start: StmtId, memory: &mut Memory) -> Execution;
}
