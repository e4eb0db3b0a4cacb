//! Geometry core of an interactive 3D modeling sandbox: primitive solids
//! placed in a scene, destructively cut by arbitrary planes, and combined
//! with an approximate boolean engine.
//!
//! The cutting pipeline is the heart of the crate: epsilon-banded
//! plane/triangle clipping with attribute interpolation ([`cut::clip`]),
//! indexed mesh rebuilding with vertex dedup ([`cut`]), and cut-surface
//! reconstruction by a centroid fan ([`cut::cap`]). Booleans are a
//! deliberate centroid-threshold approximation ([`boolean`]), not exact CSG.
//!
//! The crate is the function-call surface behind a thin UI layer: the UI
//! translates pointer and slider events into [`session::CuttingSession`]
//! calls and reads replacement buffers back out of [`mesh::TriangleMesh`].
//!
//! # Modules
//! - [`mesh`]: buffer meshes, vertices, planes
//! - [`cut`]: plane/triangle clipping, cap building, the mesh cutter
//! - [`boolean`]: centroid-threshold subtract/union/intersect
//! - [`shapes`]: primitive generators and their parameter records
//! - [`scene`]: handle-addressed shape arena and combined groups
//! - [`session`]: the interactive cutting state machine
//! - [`history`]: undo/redo command log of owned snapshots

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod boolean;
pub mod cut;
pub mod errors;
pub mod float_types;
pub mod history;
pub mod mesh;
pub mod scene;
pub mod session;
pub mod shapes;

pub use boolean::{BooleanOp, boolean_op};
pub use cut::CutReport;
pub use errors::CarveError;
pub use float_types::{Precision, Real};
pub use history::History;
pub use mesh::TriangleMesh;
pub use mesh::plane::Plane;
pub use mesh::vertex::Vertex;
pub use scene::{Scene, ShapeKey};
pub use session::CuttingSession;
pub use shapes::ShapeKind;
