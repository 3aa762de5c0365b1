//! Arena representation of a parsed program: a singly-linked chain of
//! statements addressed by stable indices.

mod types;

pub use types::{BinaryOp, Builtin, Expr, Stmt, StmtKind};

use std::collections::BTreeSet;

/// Stable handle to a statement inside a [`Chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StmtId(usize);

/// Statement chain in source order. The chain owns its nodes; callers only
/// ever rewrite `next` links through [`Chain::set_next`].
#[derive(Debug, Default)]
pub struct Chain {
    stmts: Vec<Stmt>,
    head: Option<StmtId>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain linking the statements in the given order.
    pub fn from_statements(stmts: Vec<(u32, StmtKind)>) -> Self {
        let mut chain = Self::new();
        for (line, kind) in stmts {
            chain.push(line, kind);
        }
        chain
    }

    /// Append a statement at the tail of the chain.
    pub fn push(&mut self, line: u32, kind: StmtKind) -> StmtId {
        let id = StmtId(self.stmts.len());
        if let Some(prev) = self.stmts.last_mut() {
            prev.next = Some(id);
        } else {
            self.head = Some(id);
        }
        self.stmts.push(Stmt {
            line,
            kind,
            next: None,
        });
        id
    }

    pub fn head(&self) -> Option<StmtId> {
        self.head
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.0]
    }

    pub fn line(&self, id: StmtId) -> u32 {
        self.stmts[id.0].line
    }

    pub fn next(&self, id: StmtId) -> Option<StmtId> {
        self.stmts[id.0].next
    }

    pub fn set_next(&mut self, id: StmtId, next: Option<StmtId>) {
        self.stmts[id.0].next = next;
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    /// Statements reachable from `head` by following `next`.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            at: self.head,
        }
    }

    /// Every line number reachable from `head`.
    pub fn lines(&self) -> BTreeSet<u32> {
        self.iter().map(|(_, stmt)| stmt.line).collect()
    }

    /// Line numbers in chain order, duplicates included.
    pub fn line_sequence(&self) -> Vec<u32> {
        self.iter().map(|(_, stmt)| stmt.line).collect()
    }
}

pub struct ChainIter<'a> {
    chain: &'a Chain,
    at: Option<StmtId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = (StmtId, &'a Stmt);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.at?;
        let stmt = self.chain.stmt(id);
        self.at = stmt.next;
        Some((id, stmt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_links_in_order() {
        let chain =
            Chain::from_statements(vec![(1, StmtKind::Pass), (3, StmtKind::Pass), (4, StmtKind::Pass)]);
        assert_eq!(chain.line_sequence(), vec![1, 3, 4]);
        assert_eq!(chain.lines().into_iter().collect::<Vec<_>>(), vec![1, 3, 4]);
    }

    #[test]
    fn traversal_stops_at_cut_link() {
        let mut chain = Chain::from_statements(vec![(1, StmtKind::Pass), (2, StmtKind::Pass)]);
        let head = chain.head().unwrap();
        chain.set_next(head, None);
        assert_eq!(chain.line_sequence(), vec![1]);
        assert_eq!(chain.len(), 2);
    }
}
