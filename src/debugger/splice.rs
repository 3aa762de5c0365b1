//! Link primitives for pausing a chain: cut a node's outgoing edge so the
//! executor stops after it, then put the edge back.

use tracing::trace;

use crate::program::{Chain, StmtId};

/// A cut link. The only way to restore the edge is to hand this back to
/// [`reattach`], which consumes it, so a link can neither be restored twice
/// nor restored without having been cut.
#[must_use = "a detached link must be reattached before the chain is released"]
#[derive(Debug)]
pub struct Detached {
    node: StmtId,
    successor: Option<StmtId>,
}

impl Detached {
    pub fn node(&self) -> StmtId {
        self.node
    }

    /// The node's true successor while its edge is cut.
    pub fn successor(&self) -> Option<StmtId> {
        self.successor
    }
}

/// Cut `node`'s outgoing edge, remembering where it pointed.
pub fn detach(chain: &mut Chain, node: StmtId) -> Detached {
    let successor = peek_next(chain, Some(node));
    chain.set_next(node, None);
    trace!(line = chain.line(node), "detached");
    Detached { node, successor }
}

/// Restore the edge cut by [`detach`]. Returns the restored successor.
pub fn reattach(chain: &mut Chain, detached: Detached) -> Option<StmtId> {
    debug_assert!(
        chain.next(detached.node).is_none(),
        "reattaching a link that was rewritten while detached"
    );
    chain.set_next(detached.node, detached.successor);
    trace!(line = chain.line(detached.node), "reattached");
    detached.successor
}

pub fn peek_next(chain: &Chain, node: Option<StmtId>) -> Option<StmtId> {
    node.and_then(|n| chain.next(n))
}
