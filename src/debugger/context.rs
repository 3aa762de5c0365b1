use tracing::{debug, info};

use super::breakpoints::{BreakpointError, Breakpoints};
use super::session::{Position, SessionState};
use super::splice::{self, Detached};
use crate::executor::Executor;
use crate::memory::{Memory, Value};
use crate::program::{Chain, StmtId};

/// One debugging session over a borrowed statement chain.
///
/// While running, the cursor's outgoing link is cut so the executor stops
/// after one statement; `detached` holds the cut link. Dropping the context
/// (or calling [`DebugContext::quit`]) restores the chain.
pub struct DebugContext<'c, E: Executor> {
    pub(super) chain: &'c mut Chain,
    pub(super) executor: E,
    pub(super) memory: Memory,
    head: Option<StmtId>,
    pub(super) cursor: Option<StmtId>,
    pub(super) detached: Option<Detached>,
    pub(super) breakpoints: Breakpoints,
    pub(super) state: SessionState,
}

impl<'c, E: Executor> DebugContext<'c, E> {
    pub fn new(chain: &'c mut Chain, executor: E) -> Self {
        let lines = chain.lines();
        let head = chain.head();
        // An empty program has nothing pending.
        let state = if head.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Completed
        };
        info!(statements = chain.len(), lines = lines.len(), "session loaded");

        Self {
            chain,
            executor,
            memory: Memory::new(),
            head,
            cursor: head,
            detached: None,
            breakpoints: Breakpoints::new(lines),
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn position(&self) -> Position {
        let line_of = |id: Option<StmtId>| id.map(|id| self.chain.line(id));
        match (self.state, line_of(self.head), line_of(self.cursor)) {
            (SessionState::Loaded, Some(line), _) => Position::Line(line),
            (SessionState::Running, _, Some(line)) => Position::Line(line),
            _ => Position::Completed,
        }
    }

    /// Line of the statement the next step will process.
    pub fn pending_line(&self) -> Option<u32> {
        self.cursor.map(|id| self.chain.line(id))
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.memory.lookup(name)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn set_breakpoint(&mut self, line: u32) -> Result<(), BreakpointError> {
        self.breakpoints.add(line)
    }

    pub fn remove_breakpoint(&mut self, line: u32) -> Result<(), BreakpointError> {
        self.breakpoints.remove(line)
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    pub fn breakpoints(&self) -> Vec<u32> {
        self.breakpoints.list()
    }

    /// Put back any cut link so the whole chain is reachable from its head.
    /// A later step re-cuts the cursor's link as needed.
    pub fn restore_chain(&mut self) {
        if let Some(detached) = self.detached.take() {
            splice::reattach(self.chain, detached);
            debug!("chain restored");
        }
    }

    /// End the session, leaving the chain intact for its owner.
    pub fn quit(mut self) {
        self.restore_chain();
        info!(state = self.state.name(), "session ended");
    }

    /// Checks the link, registry and cursor invariants.
    pub fn invariants_hold(&self) -> bool {
        let link_ok = match &self.detached {
            Some(detached) => {
                self.cursor == Some(detached.node()) && self.chain.next(detached.node()).is_none()
            }
            None => true,
        };
        let cursor_ok = self.cursor.is_none() == (self.state == SessionState::Completed);
        link_ok && cursor_ok && self.breakpoints.is_consistent()
    }
}

impl<'c, E: Executor> Drop for DebugContext<'c, E> {
    fn drop(&mut self) {
        self.restore_chain();
    }
}
