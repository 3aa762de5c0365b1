use tracing::{debug, info, warn};

use super::context::DebugContext;
use super::session::{SessionError, SessionState};
use super::splice;
use crate::executor::{ExecError, Executor};

/// Run modes for the debugger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Process exactly one statement.
    Step,
    /// Keep stepping until a breakpoint or the end of the program.
    Continue,
}

/// Outcome of a single step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepEvent {
    /// Paused before `line`; nothing was executed.
    BreakpointHit { line: u32 },
    /// `line` ran; `next_line` is `None` when the program finished.
    Executed { line: u32, next_line: Option<u32> },
    /// `line` raised a semantic error and the session completed.
    Failed { line: u32, error: ExecError },
}

impl<'c, E: Executor> DebugContext<'c, E> {
    pub fn resume(&mut self, mode: RunMode) -> Result<StepEvent, SessionError> {
        match mode {
            RunMode::Step => self.advance(),
            RunMode::Continue => self.run(),
        }
    }

    /// Process the cursor's statement.
    ///
    /// An armed line is visited twice: the first visit announces the
    /// breakpoint without executing, the second executes it.
    pub fn advance(&mut self) -> Result<StepEvent, SessionError> {
        let cursor = match (self.state, self.cursor) {
            (SessionState::Completed, _) | (_, None) => return Err(SessionError::Completed),
            (_, Some(cursor)) => cursor,
        };
        if self.state == SessionState::Loaded {
            self.state.transition(SessionState::Running);
        }

        let line = self.chain.line(cursor);
        if self.breakpoints.contains(line) {
            if !self.breakpoints.is_announced(line) {
                self.breakpoints.mark_announced(line);
                info!(line, "breakpoint hit");
                return Ok(StepEvent::BreakpointHit { line });
            }
            self.breakpoints.clear_announced(line);
        }

        let detached = match self.detached.take() {
            Some(detached) => detached,
            None => splice::detach(self.chain, cursor),
        };
        debug_assert_eq!(detached.node(), cursor);
        let lookahead = detached.successor();

        debug!(line, "executing");
        let outcome = self.executor.execute(&*self.chain, cursor, &mut self.memory);
        splice::reattach(self.chain, detached);

        match outcome {
            Err(failure) => {
                let line = self.chain.line(failure.at);
                warn!(line, error = %failure.error, "execution failed");
                self.cursor = None;
                self.state.transition(SessionState::Completed);
                Ok(StepEvent::Failed {
                    line,
                    error: failure.error,
                })
            }
            Ok(_) => {
                self.cursor = lookahead;
                match lookahead {
                    Some(next) => self.detached = Some(splice::detach(self.chain, next)),
                    None => self.state.transition(SessionState::Completed),
                }
                Ok(StepEvent::Executed {
                    line,
                    next_line: self.pending_line(),
                })
            }
        }
    }

    /// Step until the cursor reaches an armed line or the program ends.
    ///
    /// Reaching an armed line other than the one the run started from also
    /// performs that line's announce step before returning.
    pub fn run(&mut self) -> Result<StepEvent, SessionError> {
        if self.state == SessionState::Completed {
            return Err(SessionError::Completed);
        }
        let start_line = self.pending_line();

        let mut steps = 1usize;
        let mut last = self.advance()?;
        while let Some(line) = self.pending_line() {
            if self.breakpoints.contains(line) || self.state == SessionState::Completed {
                break;
            }
            last = self.advance()?;
            steps += 1;
        }

        if let Some(line) = self.pending_line() {
            if self.breakpoints.contains(line) && Some(line) != start_line {
                last = self.advance()?;
                steps += 1;
            }
        }

        debug!(steps, state = self.state.name(), "run stopped");
        Ok(last)
    }
}
