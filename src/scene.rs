//! Scene arena: shapes addressed by stable handles, plus combined groups.
//!
//! Handles are slotmap keys owned by whoever placed the shape; there is no
//! name-based lookup anywhere. Removing a shape invalidates its key; stale
//! keys surface as [`CarveError::UnknownShape`] instead of aliasing another
//! object.

use crate::boolean::{BooleanOp, boolean_op};
use crate::cut::CutReport;
use crate::errors::CarveError;
use crate::float_types::{Precision, Real};
use crate::mesh::TriangleMesh;
use crate::mesh::plane::Plane;
use crate::shapes::ShapeKind;
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Stable handle to a shape in a [`Scene`].
    pub struct ShapeKey;
    /// Stable handle to a combined group.
    pub struct GroupKey;
}

/// One placed solid: geometry plus placement and display state.
#[derive(Debug, Clone)]
pub struct ShapeNode {
    pub kind: ShapeKind,
    pub mesh: TriangleMesh,
    pub position: Vector3<Real>,
    /// Euler XYZ rotation, radians.
    pub rotation: Vector3<Real>,
    pub scale: Vector3<Real>,
    /// Display color, 0xRRGGBB.
    pub color: u32,
    pub visible: bool,
    /// Set while the shape is locked into a combined group.
    pub group: Option<GroupKey>,
}

impl ShapeNode {
    pub fn new(kind: ShapeKind, mesh: TriangleMesh) -> Self {
        ShapeNode {
            kind,
            mesh,
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            color: 0x4a90e2,
            visible: true,
            group: None,
        }
    }

    /// Local→world matrix: translation · rotation · scale.
    pub fn world_transform(&self) -> Matrix4<Real> {
        let translation = Translation3::from(self.position).to_homogeneous();
        let rotation =
            Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
                .to_homogeneous();
        let scaling = Matrix4::new_nonuniform_scaling(&self.scale);
        translation * rotation * scaling
    }
}

/// Serializable per-shape record for the config layer. Restoring a record
/// rebuilds the pristine primitive: geometry baked by cuts or booleans is
/// not re-derivable from it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeRecord {
    pub kind: ShapeKind,
    pub position: [Real; 3],
    pub rotation: [Real; 3],
    pub scale: [Real; 3],
    pub color: u32,
    pub visible: bool,
}

/// Shapes locked together into one unit. Members stay in the scene arena;
/// cuts and previews reach them exactly like loose shapes.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub members: Vec<ShapeKey>,
}

#[derive(Debug, Default)]
pub struct Scene {
    shapes: SlotMap<ShapeKey, ShapeNode>,
    groups: SlotMap<GroupKey, Group>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Instantiate `kind` at `position` and return its handle.
    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        position: Vector3<Real>,
    ) -> Result<ShapeKey, CarveError> {
        let mesh = kind.build().ok_or(CarveError::NotRebuildable)?;
        let mut node = ShapeNode::new(kind, mesh);
        node.position = position;
        Ok(self.shapes.insert(node))
    }

    /// Insert a pre-built node (boolean results, restored snapshots).
    pub fn insert_node(&mut self, node: ShapeNode) -> ShapeKey {
        self.shapes.insert(node)
    }

    /// Remove a shape, returning the owned node. Its key becomes stale and
    /// it is dropped from any group it was locked into.
    pub fn remove_shape(&mut self, key: ShapeKey) -> Result<ShapeNode, CarveError> {
        let node = self.shapes.remove(key).ok_or(CarveError::UnknownShape)?;
        if let Some(group_key) = node.group
            && let Some(group) = self.groups.get_mut(group_key)
        {
            group.members.retain(|&m| m != key);
        }
        Ok(node)
    }

    pub fn get(&self, key: ShapeKey) -> Option<&ShapeNode> {
        self.shapes.get(key)
    }

    pub fn get_mut(&mut self, key: ShapeKey) -> Option<&mut ShapeNode> {
        self.shapes.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeKey, &ShapeNode)> {
        self.shapes.iter()
    }

    /// Owned clones of every shape state, keyed by handle. History records
    /// are built from these so the log never holds live references.
    pub fn clone_states(&self) -> Vec<(ShapeKey, ShapeNode)> {
        self.shapes.iter().map(|(k, n)| (k, n.clone())).collect()
    }

    /// Duplicate a shape, offsetting the copy so it does not sit inside the
    /// original. The copy is never part of the source's group.
    pub fn duplicate(
        &mut self,
        key: ShapeKey,
        offset: Vector3<Real>,
    ) -> Result<ShapeKey, CarveError> {
        let mut node = self
            .shapes
            .get(key)
            .ok_or(CarveError::UnknownShape)?
            .clone();
        node.position += offset;
        node.group = None;
        Ok(self.shapes.insert(node))
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.groups.clear();
    }

    /// Lock two or more shapes into a combined group. A shape already locked
    /// elsewhere is moved into the new group.
    pub fn combine(&mut self, keys: &[ShapeKey]) -> Result<GroupKey, CarveError> {
        if keys.len() < 2 {
            return Err(CarveError::GroupTooSmall);
        }
        if keys.iter().any(|&k| !self.shapes.contains_key(k)) {
            return Err(CarveError::UnknownShape);
        }

        let group_key = self.groups.insert(Group { members: keys.to_vec() });
        for &key in keys {
            let node = &mut self.shapes[key];
            if let Some(old) = node.group
                && old != group_key
                && let Some(old_group) = self.groups.get_mut(old)
            {
                old_group.members.retain(|&m| m != key);
            }
            node.group = Some(group_key);
        }
        Ok(group_key)
    }

    /// Unlock a combined group, returning the freed members.
    pub fn break_group(&mut self, key: GroupKey) -> Result<Vec<ShapeKey>, CarveError> {
        let group = self.groups.remove(key).ok_or(CarveError::UnknownGroup)?;
        for &member in &group.members {
            if let Some(node) = self.shapes.get_mut(member) {
                node.group = None;
            }
        }
        Ok(group.members)
    }

    pub fn group(&self, key: GroupKey) -> Option<&Group> {
        self.groups.get(key)
    }

    /// Bake a committed cutting plane into every shape, group members
    /// included, one after another on the calling thread. Returns a report
    /// per shape; emptied shapes are left in place for the caller to judge.
    pub fn cut_all(
        &mut self,
        plane: &Plane,
        precision: Precision,
    ) -> Vec<(ShapeKey, CutReport)> {
        let mut reports = Vec::with_capacity(self.shapes.len());
        for (key, node) in self.shapes.iter_mut() {
            let world = node.world_transform();
            let report = node.mesh.cut_by_plane(&world, plane, precision);
            reports.push((key, report));
        }
        log::debug!("cut committed across {} shape(s)", reports.len());
        reports
    }

    /// Combine `main` and `tool` with the boolean heuristic. The result
    /// adopts `main`'s placement and color; both sources are removed and
    /// their keys become stale.
    pub fn apply_boolean(
        &mut self,
        main: ShapeKey,
        tool: ShapeKey,
        op: BooleanOp,
    ) -> Result<ShapeKey, CarveError> {
        if main == tool {
            return Err(CarveError::IdenticalOperands);
        }
        let main_node = self.shapes.get(main).ok_or(CarveError::UnknownShape)?;
        let tool_node = self.shapes.get(tool).ok_or(CarveError::UnknownShape)?;

        let mesh = boolean_op(&main_node.mesh, &tool_node.mesh, op)
            .ok_or(CarveError::DegenerateBoolean { op })?;

        let mut result = ShapeNode::new(ShapeKind::BooleanResult { op }, mesh);
        result.position = main_node.position;
        result.rotation = main_node.rotation;
        result.scale = main_node.scale;
        result.color = main_node.color;

        self.remove_shape(main)?;
        self.remove_shape(tool)?;
        Ok(self.shapes.insert(result))
    }

    /// Snapshot every shape's persistable metadata for the config layer.
    pub fn snapshot(&self) -> Vec<ShapeRecord> {
        self.shapes
            .values()
            .map(|node| ShapeRecord {
                kind: node.kind,
                position: node.position.into(),
                rotation: node.rotation.into(),
                scale: node.scale.into(),
                color: node.color,
                visible: node.visible,
            })
            .collect()
    }

    /// Replace the scene with the shapes described by `records`. Each one is
    /// rebuilt as a pristine primitive: prior cuts are gone, and records of
    /// boolean results cannot be rebuilt at all and are skipped.
    pub fn restore(&mut self, records: &[ShapeRecord]) -> Vec<ShapeKey> {
        self.clear();
        let mut keys = Vec::with_capacity(records.len());
        for record in records {
            let Some(mesh) = record.kind.build() else {
                log::warn!("skipping {:?}: not rebuildable from parameters", record.kind);
                continue;
            };
            let mut node = ShapeNode::new(record.kind, mesh);
            node.position = Vector3::from(record.position);
            node.rotation = Vector3::from(record.rotation);
            node.scale = Vector3::from(record.scale);
            node.color = record.color;
            node.visible = record.visible;
            keys.push(self.shapes.insert(node));
        }
        keys
    }
}
