use carve3d::boolean::BooleanOp;
use carve3d::errors::CarveError;
use carve3d::float_types::Precision;
use carve3d::mesh::plane::Plane;
use carve3d::scene::Scene;
use carve3d::shapes::ShapeKind;
use nalgebra::Vector3;

#[test]
fn add_get_remove_round_trip() {
    let mut scene = Scene::new();
    let key = scene
        .add_shape(ShapeKind::cube(), Vector3::new(1.0, 0.0, 2.0))
        .unwrap();

    let node = scene.get(key).unwrap();
    assert_eq!(node.position, Vector3::new(1.0, 0.0, 2.0));
    assert_eq!(node.mesh.triangle_count(), 12);
    assert!(node.visible);

    let removed = scene.remove_shape(key).unwrap();
    assert_eq!(removed.mesh.triangle_count(), 12);
    assert!(scene.get(key).is_none());
    assert!(matches!(
        scene.remove_shape(key),
        Err(CarveError::UnknownShape)
    ));
}

#[test]
fn boolean_result_kind_cannot_be_added_directly() {
    let mut scene = Scene::new();
    let err = scene.add_shape(
        ShapeKind::BooleanResult { op: BooleanOp::Union },
        Vector3::zeros(),
    );
    assert_eq!(err.unwrap_err(), CarveError::NotRebuildable);
}

#[test]
fn duplicate_offsets_the_copy() {
    let mut scene = Scene::new();
    let key = scene.add_shape(ShapeKind::sphere(), Vector3::zeros()).unwrap();
    let copy = scene.duplicate(key, Vector3::new(3.0, 0.0, 0.0)).unwrap();

    assert_eq!(scene.len(), 2);
    assert_eq!(scene.get(copy).unwrap().position, Vector3::new(3.0, 0.0, 0.0));
    assert_eq!(
        scene.get(copy).unwrap().mesh.triangle_count(),
        scene.get(key).unwrap().mesh.triangle_count()
    );
}

#[test]
fn combine_locks_and_break_unlocks() {
    let mut scene = Scene::new();
    let a = scene.add_shape(ShapeKind::cube(), Vector3::zeros()).unwrap();
    let b = scene
        .add_shape(ShapeKind::cylinder(), Vector3::new(2.0, 0.0, 0.0))
        .unwrap();

    assert_eq!(scene.combine(&[a]), Err(CarveError::GroupTooSmall));

    let group = scene.combine(&[a, b]).unwrap();
    assert_eq!(scene.get(a).unwrap().group, Some(group));
    assert_eq!(scene.get(b).unwrap().group, Some(group));
    assert_eq!(scene.group(group).unwrap().members.len(), 2);

    let freed = scene.break_group(group).unwrap();
    assert_eq!(freed.len(), 2);
    assert_eq!(scene.get(a).unwrap().group, None);
    assert!(scene.group(group).is_none());
}

#[test]
fn cut_all_reaches_group_members() {
    let mut scene = Scene::new();
    let a = scene.add_shape(ShapeKind::cube(), Vector3::zeros()).unwrap();
    let b = scene.add_shape(ShapeKind::cube(), Vector3::zeros()).unwrap();
    scene.combine(&[a, b]).unwrap();

    let plane = Plane::new(Vector3::y(), 0.0);
    let reports = scene.cut_all(&plane, Precision::Standard);
    assert_eq!(reports.len(), 2);
    for (_, report) in &reports {
        assert!(!report.emptied);
        assert!(report.cap_triangles >= 3);
    }
}

#[test]
fn apply_boolean_replaces_both_sources() {
    let mut scene = Scene::new();
    let main = scene
        .add_shape(ShapeKind::cube(), Vector3::new(1.0, 2.0, 3.0))
        .unwrap();
    scene.get_mut(main).unwrap().color = 0x00ff00;
    let tool = scene
        .add_shape(ShapeKind::cube(), Vector3::new(5.0, 0.0, 0.0))
        .unwrap();

    let result = scene.apply_boolean(main, tool, BooleanOp::Union).unwrap();

    assert_eq!(scene.len(), 1);
    assert!(scene.get(main).is_none());
    assert!(scene.get(tool).is_none());

    let node = scene.get(result).unwrap();
    assert_eq!(node.kind, ShapeKind::BooleanResult { op: BooleanOp::Union });
    assert_eq!(node.position, Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(node.color, 0x00ff00);
    assert_eq!(node.mesh.triangle_count(), 24);
}

#[test]
fn apply_boolean_rejects_identical_operands() {
    let mut scene = Scene::new();
    let key = scene.add_shape(ShapeKind::cube(), Vector3::zeros()).unwrap();
    assert_eq!(
        scene.apply_boolean(key, key, BooleanOp::Subtract),
        Err(CarveError::IdenticalOperands)
    );
}

#[test]
fn degenerate_boolean_keeps_the_scene_intact() {
    let mut scene = Scene::new();
    let main = scene.add_shape(ShapeKind::cube(), Vector3::zeros()).unwrap();
    let tool = scene.add_shape(ShapeKind::cube(), Vector3::zeros()).unwrap();

    // coincident local geometry: subtract drops every triangle
    let err = scene.apply_boolean(main, tool, BooleanOp::Subtract);
    assert_eq!(
        err,
        Err(CarveError::DegenerateBoolean { op: BooleanOp::Subtract })
    );
    // both operands survive a failed boolean
    assert_eq!(scene.len(), 2);
    assert!(scene.get(main).is_some());
}

#[test]
fn snapshot_restore_rebuilds_pristine_primitives() {
    let mut scene = Scene::new();
    let key = scene
        .add_shape(ShapeKind::cube(), Vector3::new(1.0, 0.0, 0.0))
        .unwrap();
    scene.get_mut(key).unwrap().color = 0x123456;
    scene.get_mut(key).unwrap().visible = false;

    // bake a cut, then persist and reload
    let plane = Plane::new(Vector3::x(), -1.0);
    scene.cut_all(&plane, Precision::Standard);
    let cut_triangles = scene.get(key).unwrap().mesh.triangle_count();
    assert_ne!(cut_triangles, 12);

    let records = scene.snapshot();
    let keys = scene.restore(&records);
    assert_eq!(keys.len(), 1);

    let node = scene.get(keys[0]).unwrap();
    assert_eq!(node.kind, ShapeKind::cube());
    assert_eq!(node.color, 0x123456);
    assert!(!node.visible);
    // the cut is not part of the record: restoring yields the pristine cube
    assert_eq!(node.mesh.triangle_count(), 12);
}

#[test]
fn restore_skips_records_that_cannot_be_rebuilt() {
    let mut scene = Scene::new();
    let main = scene.add_shape(ShapeKind::cube(), Vector3::zeros()).unwrap();
    let tool = scene
        .add_shape(ShapeKind::cube(), Vector3::new(5.0, 0.0, 0.0))
        .unwrap();
    scene.apply_boolean(main, tool, BooleanOp::Union).unwrap();

    let records = scene.snapshot();
    let keys = scene.restore(&records);
    assert!(keys.is_empty());
    assert!(scene.is_empty());
}

#[test]
fn records_serialize_for_the_config_layer() {
    let mut scene = Scene::new();
    scene
        .add_shape(ShapeKind::torus(), Vector3::new(0.5, 1.5, -2.0))
        .unwrap();

    let records = scene.snapshot();
    let json = serde_json::to_string(&records).unwrap();
    let parsed: Vec<carve3d::scene::ShapeRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, records);

    let keys = scene.restore(&parsed);
    assert_eq!(keys.len(), 1);
}
