use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakpointError {
    #[error("no such line")]
    NoSuchLine(u32),

    #[error("breakpoint already set")]
    AlreadySet(u32),

    #[error("no such breakpoint")]
    NoSuchBreakpoint(u32),
}

/// Whether the current visit to an armed line has been reported yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitPhase {
    Pending,
    Announced,
}

/// Armed breakpoint lines, restricted to lines that exist in the program.
pub struct Breakpoints {
    lines: BTreeSet<u32>,
    armed: BTreeMap<u32, VisitPhase>,
}

impl Breakpoints {
    pub fn new(lines: BTreeSet<u32>) -> Self {
        Self {
            lines,
            armed: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, line: u32) -> Result<(), BreakpointError> {
        if !self.has_line(line) {
            return Err(BreakpointError::NoSuchLine(line));
        }
        if self.armed.contains_key(&line) {
            return Err(BreakpointError::AlreadySet(line));
        }
        self.armed.insert(line, VisitPhase::Pending);
        debug!(line, "breakpoint set");
        Ok(())
    }

    pub fn remove(&mut self, line: u32) -> Result<(), BreakpointError> {
        if self.armed.remove(&line).is_none() {
            return Err(BreakpointError::NoSuchBreakpoint(line));
        }
        debug!(line, "breakpoint removed");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.armed.clear();
        debug!("breakpoints cleared");
    }

    /// Armed lines, ascending.
    pub fn list(&self) -> Vec<u32> {
        self.armed.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    pub fn has_line(&self, line: u32) -> bool {
        self.lines.contains(&line)
    }

    pub fn contains(&self, line: u32) -> bool {
        self.armed.contains_key(&line)
    }

    pub(super) fn is_announced(&self, line: u32) -> bool {
        self.armed.get(&line) == Some(&VisitPhase::Announced)
    }

    pub(super) fn mark_announced(&mut self, line: u32) {
        if let Some(phase) = self.armed.get_mut(&line) {
            *phase = VisitPhase::Announced;
        }
    }

    pub(super) fn clear_announced(&mut self, line: u32) {
        if let Some(phase) = self.armed.get_mut(&line) {
            *phase = VisitPhase::Pending;
        }
    }

    /// Every armed line is a program line.
    pub fn is_consistent(&self) -> bool {
        self.armed.keys().all(|&line| self.has_line(line))
    }
}
