use carve3d::cut::{build_cap, collect_intersection_points};
use carve3d::float_types::Real;
use carve3d::mesh::plane::Plane;
use nalgebra::{Point3, Vector3};

#[test]
fn square_ring_fans_from_the_centroid() {
    let plane = Plane::new(Vector3::x(), 0.0);
    let points = vec![
        Point3::new(0.0, -1.0, -1.0),
        Point3::new(0.0, 1.0, -1.0),
        Point3::new(0.0, 1.0, 1.0),
        Point3::new(0.0, -1.0, 1.0),
    ];

    let cap = build_cap(&points, &plane);
    assert!(!cap.is_empty());
    // centroid + 4 ring points, one fan triangle per ring edge
    assert_eq!(cap.vertices.len(), 5);
    assert_eq!(cap.triangle_count(), 4);

    for vertex in &cap.vertices {
        assert!(
            plane.signed_distance(&vertex.pos).abs() < 1e-9,
            "cap vertex must lie in the cutting plane"
        );
        assert_eq!(vertex.normal, plane.normal);
    }
    // centroid comes first
    assert_eq!(cap.vertices[0].pos, Point3::origin());
}

#[test]
fn near_identical_points_are_welded() {
    let plane = Plane::new(Vector3::x(), 0.0);
    let points = vec![
        Point3::new(0.0, -1.0, -1.0),
        Point3::new(0.0, -1.0, -1.0 + 1e-4), // within the weld threshold
        Point3::new(0.0, 1.0, -1.0),
        Point3::new(0.0, 0.0, 1.0),
    ];

    let cap = build_cap(&points, &plane);
    assert_eq!(cap.vertices.len(), 4); // centroid + 3 welded ring points
    assert_eq!(cap.triangle_count(), 3);
}

#[test]
fn fewer_than_three_points_leave_the_cut_open() {
    let plane = Plane::new(Vector3::x(), 0.0);

    assert!(build_cap(&[], &plane).is_empty());
    assert!(
        build_cap(
            &[Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, -1.0, 0.0)],
            &plane
        )
        .is_empty()
    );

    // three raw points that weld down to two
    let collapsing = [
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 1e-4),
        Point3::new(0.0, -1.0, 0.0),
    ];
    assert!(build_cap(&collapsing, &plane).is_empty());
}

#[test]
fn cap_indices_reference_the_fan_block() {
    let plane = Plane::new(Vector3::z(), 0.0);
    let points: Vec<Point3<Real>> = (0..6)
        .map(|i| {
            let a = i as Real / 6.0 * std::f64::consts::TAU;
            Point3::new(a.cos(), a.sin(), 0.0)
        })
        .collect();

    let cap = build_cap(&points, &plane);
    assert_eq!(cap.triangle_count(), 6);
    let max = *cap.indices.iter().max().unwrap() as usize;
    assert!(max < cap.vertices.len());
    // every fan triangle starts at the centroid
    for tri in cap.indices.chunks_exact(3) {
        assert_eq!(tri[0], 0);
    }
}

#[test]
fn crossing_edges_are_collected_once_per_edge() {
    let plane = Plane::new(Vector3::x(), 0.0);
    let mut points = Vec::new();

    // straddling triangle: two of three edges cross
    collect_intersection_points(
        &[
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(-1.0, 0.5, 0.0),
        ],
        &plane,
        1e-4,
        &mut points,
    );
    assert_eq!(points.len(), 2);
    for p in &points {
        assert!(plane.signed_distance(p).abs() < 1e-9);
    }

    // fully-front triangle contributes nothing
    points.clear();
    collect_intersection_points(
        &[
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ],
        &plane,
        1e-4,
        &mut points,
    );
    assert!(points.is_empty());
}
