//! Undo/redo as an explicit command log of owned snapshots.
//!
//! The log owns full copies of the states it records, keyed by shape handle;
//! it never holds references into the live scene. Structural operations
//! (adding and deleting shapes) are not journaled: slotmap keys cannot be
//! re-occupied, so the log covers the mutating operations whose handles stay
//! valid: cuts and per-shape edits.

use crate::mesh::plane::Plane;
use crate::scene::{Scene, ShapeKey, ShapeNode};

/// Maximum retained operations; the oldest fall off the front.
const HISTORY_LIMIT: usize = 50;

/// One recorded operation with owned before/after snapshots.
#[derive(Debug, Clone)]
pub enum HistoryOp {
    /// A committed cut across the whole scene.
    Cut {
        plane: Plane,
        before: Vec<(ShapeKey, ShapeNode)>,
        after: Vec<(ShapeKey, ShapeNode)>,
    },
    /// An edit of one shape (move, scale, recolor, visibility).
    Mutate {
        key: ShapeKey,
        before: Box<ShapeNode>,
        after: Box<ShapeNode>,
    },
}

#[derive(Debug, Default)]
pub struct History {
    undo: Vec<HistoryOp>,
    redo: Vec<HistoryOp>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Record a new operation. Anything on the redo side is invalidated.
    pub fn record(&mut self, op: HistoryOp) {
        self.undo.push(op);
        if self.undo.len() > HISTORY_LIMIT {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    /// Roll the most recent operation back. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        let Some(op) = self.undo.pop() else {
            return false;
        };
        Self::restore(&op, scene, false);
        self.redo.push(op);
        true
    }

    /// Re-apply the most recently undone operation.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(op) = self.redo.pop() else {
            return false;
        };
        Self::restore(&op, scene, true);
        self.undo.push(op);
        true
    }

    fn restore(op: &HistoryOp, scene: &mut Scene, forward: bool) {
        match op {
            HistoryOp::Cut { before, after, .. } => {
                let states = if forward { after } else { before };
                for (key, state) in states {
                    // Shapes deleted since the record was taken are skipped.
                    if let Some(node) = scene.get_mut(*key) {
                        *node = state.clone();
                    }
                }
            },
            HistoryOp::Mutate { key, before, after } => {
                let state = if forward { after } else { before };
                if let Some(node) = scene.get_mut(*key) {
                    *node = (**state).clone();
                }
            },
        }
    }
}
