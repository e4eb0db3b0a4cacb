//! The interactive cutting session: plane adjustment, confirmation, commit.
//!
//! Two paths lead to a committed cut. The slider path keeps a live preview
//! plane that the render layer applies as a GPU clipping plane every frame
//! (cheap, idempotent, no geometry change) until the user applies it. The
//! click path builds a plane from a picked surface point and its face
//! normal, then waits for the user to choose which half survives.
//!
//! Committing is one-way: the cut is baked into every mesh by
//! [`Scene::cut_all`], and only the *record* of the plane can be cleared
//! afterwards, never the geometry.

use crate::cut::CutReport;
use crate::errors::CarveError;
use crate::float_types::{Precision, Real};
use crate::history::{History, HistoryOp};
use crate::mesh::plane::Plane;
use crate::scene::{Scene, ShapeKey};
use nalgebra::{Point3, Vector3};

/// Where a committed plane came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSource {
    Sliders,
    SurfaceClick,
}

/// A committed cut, kept for preview and bookkeeping. Removing a record
/// never restores geometry; the cut is already baked into the meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneRecord {
    pub plane: Plane,
    pub source: PlaneSource,
}

/// Which half survives when confirming a surface-click cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepSide {
    Front,
    Back,
}

/// Interaction state. Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CutState {
    Idle,
    /// Slider-driven plane with a live render-only preview.
    AdjustingPlane { plane: Plane },
    /// Plane picked from a clicked surface, awaiting a keep-side choice.
    PendingConfirm { plane: Plane },
}

#[derive(Debug)]
pub struct CuttingSession {
    state: CutState,
    committed: Vec<PlaneRecord>,
    pub precision: Precision,
    /// Clear the committed-plane list right after each commit. Geometry is
    /// unaffected either way.
    pub auto_clear: bool,
}

impl Default for CuttingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CuttingSession {
    pub fn new() -> Self {
        CuttingSession {
            state: CutState::Idle,
            committed: Vec::new(),
            precision: Precision::Standard,
            auto_clear: false,
        }
    }

    pub fn state(&self) -> CutState {
        self.state
    }

    pub fn committed_planes(&self) -> &[PlaneRecord] {
        &self.committed
    }

    /// Planes for the render layer to apply as GPU clipping planes each
    /// frame: every committed cut plus the one being adjusted or confirmed.
    /// Cheap and idempotent, and entirely separate from the destructive
    /// geometry cut.
    pub fn live_clip_planes(&self) -> Vec<Plane> {
        let mut planes: Vec<Plane> = self.committed.iter().map(|r| r.plane).collect();
        match self.state {
            CutState::AdjustingPlane { plane } | CutState::PendingConfirm { plane } => {
                planes.push(plane);
            },
            CutState::Idle => {},
        }
        planes
    }

    /// Enter slider-driven adjustment with the default axis-aligned plane.
    pub fn begin_adjust(&mut self) {
        self.state = CutState::AdjustingPlane {
            plane: Plane::new(Vector3::x(), 0.0),
        };
    }

    /// Update the preview plane from slider values. A degenerate normal
    /// falls back to +X here, before it can reach the cutting core.
    pub fn set_plane_from_controls(
        &mut self,
        origin: Point3<Real>,
        normal: Vector3<Real>,
    ) -> Result<(), CarveError> {
        let CutState::AdjustingPlane { .. } = self.state else {
            return Err(CarveError::NoActivePlane);
        };
        let normal = sanitize_normal(normal);
        self.state = CutState::AdjustingPlane {
            plane: Plane::from_point_normal(&origin, normal),
        };
        Ok(())
    }

    /// Start the click path: a plane through the picked surface point,
    /// oriented by the face normal, awaiting a keep-side choice.
    pub fn begin_surface_cut(&mut self, point: Point3<Real>, face_normal: Vector3<Real>) {
        let normal = sanitize_normal(face_normal);
        self.state = CutState::PendingConfirm {
            plane: Plane::from_point_normal(&point, normal),
        };
    }

    /// Bake the adjusted plane into every shape, group members included.
    /// Stays in adjustment mode so consecutive cuts can be lined up.
    pub fn commit_adjusted(
        &mut self,
        scene: &mut Scene,
        history: &mut History,
    ) -> Result<Vec<(ShapeKey, CutReport)>, CarveError> {
        let CutState::AdjustingPlane { plane } = self.state else {
            return Err(CarveError::NoActivePlane);
        };
        Ok(self.commit(plane, PlaneSource::Sliders, scene, history))
    }

    /// Resolve the click path. [`KeepSide::Back`] flips the plane (negated
    /// normal and offset) so the other half survives. Ends in `Idle`.
    pub fn confirm_surface_cut(
        &mut self,
        keep: KeepSide,
        scene: &mut Scene,
        history: &mut History,
    ) -> Result<Vec<(ShapeKey, CutReport)>, CarveError> {
        let CutState::PendingConfirm { plane } = self.state else {
            return Err(CarveError::NoActivePlane);
        };
        let plane = match keep {
            KeepSide::Front => plane,
            KeepSide::Back => plane.flipped(),
        };
        let reports = self.commit(plane, PlaneSource::SurfaceClick, scene, history);
        self.state = CutState::Idle;
        Ok(reports)
    }

    /// Abandon the pending plane without touching any geometry.
    pub fn cancel(&mut self) {
        self.state = CutState::Idle;
    }

    /// Drop all committed plane records. This clears preview and bookkeeping
    /// only; geometry already cut stays cut.
    pub fn clear_planes(&mut self) {
        self.committed.clear();
    }

    fn commit(
        &mut self,
        plane: Plane,
        source: PlaneSource,
        scene: &mut Scene,
        history: &mut History,
    ) -> Vec<(ShapeKey, CutReport)> {
        let before = scene.clone_states();
        let reports = scene.cut_all(&plane, self.precision);
        let after = scene.clone_states();
        history.record(HistoryOp::Cut { plane, before, after });

        self.committed.push(PlaneRecord { plane, source });
        if self.auto_clear {
            self.committed.clear();
        }
        reports
    }
}

/// Normalize a caller-supplied plane normal, falling back to +X when it is
/// too short to orient a plane.
fn sanitize_normal(normal: Vector3<Real>) -> Vector3<Real> {
    if normal.norm() > 1e-3 {
        normal.normalize()
    } else {
        Vector3::x()
    }
}
