//! Recoverable failures at the scene/session boundary.
//!
//! The cutting core itself never fails: it degrades (empty meshes, unsealed
//! caps) and reports the outcome through [`crate::cut::CutReport`], leaving
//! the decision to the caller. Errors here come from the bookkeeping layers
//! around it.

use crate::boolean::BooleanOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CarveError {
    /// A shape handle no longer resolves (deleted, or from another scene).
    #[error("shape handle is stale or unknown")]
    UnknownShape,
    /// A group handle no longer resolves.
    #[error("group handle is stale or unknown")]
    UnknownGroup,
    /// Boolean operations need two distinct shapes.
    #[error("boolean operands must be two distinct shapes")]
    IdenticalOperands,
    /// The boolean heuristic produced no usable geometry.
    #[error("boolean {op:?} produced a degenerate result")]
    DegenerateBoolean { op: BooleanOp },
    /// A commit or plane update was requested while no plane was active.
    #[error("no cutting plane is active")]
    NoActivePlane,
    /// Combining shapes into a group needs at least two members.
    #[error("a combined group needs at least two shapes")]
    GroupTooSmall,
    /// The shape kind carries no parameters to rebuild geometry from.
    #[error("shape kind cannot be rebuilt from its parameters")]
    NotRebuildable,
}
