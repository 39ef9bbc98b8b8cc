use glam::{DVec2, DVec3};

use super::*;

#[test]
fn axis_embed_project_roundtrip() {
  let p = DVec3::new(1.0, 2.0, 3.0);
  for axis in Axis::ALL {
    let uv = axis.project(p);
    let w = p[axis.index()];
    assert_eq!(axis.embed(w, uv), p);
  }
}

#[test]
fn ccw_polyline_has_positive_area() {
  let square = Polyline::new(vec![
    DVec2::new(0.0, 0.0),
    DVec2::new(1.0, 0.0),
    DVec2::new(1.0, 1.0),
    DVec2::new(0.0, 1.0),
    DVec2::new(0.0, 0.0),
  ]);
  assert!(square.is_closed());
  assert_eq!(square.signed_area(), 1.0);

  let mut reversed = square.points.clone();
  reversed.reverse();
  assert_eq!(Polyline::new(reversed).signed_area(), -1.0);
}

#[test]
fn open_runs_are_not_closed() {
  let open = Polyline::new(vec![DVec2::ZERO, DVec2::ONE]);
  assert!(!open.is_closed());
  assert!(!Polyline::new(vec![DVec2::ZERO]).is_closed());
  assert!(!Polyline::default().is_closed());
}

#[test]
fn triangle_normal_follows_winding() {
  let tri = Triangle::new(
    DVec3::ZERO,
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(0.0, 1.0, 0.0),
  );
  assert_eq!(tri.normal(), DVec3::new(0.0, 0.0, 1.0));
  assert_eq!(tri.area(), 0.5);
}

#[test]
fn aabb_grows_to_cover_points() {
  let mut bounds = Aabb::empty();
  assert!(!bounds.is_valid());
  bounds.encapsulate(DVec3::new(1.0, -2.0, 0.5));
  bounds.encapsulate(DVec3::new(-1.0, 3.0, 0.0));
  assert!(bounds.is_valid());
  assert_eq!(bounds.min, DVec3::new(-1.0, -2.0, 0.0));
  assert_eq!(bounds.max, DVec3::new(1.0, 3.0, 0.5));
}

#[test]
fn quad_corners_wind_with_outward_side() {
  let quad = AxisQuad {
    axis: Axis::Z,
    w: 2.0,
    min: DVec2::new(0.0, 0.0),
    max: DVec2::new(1.0, 1.0),
    outward: true,
  };
  let [a, b, c, _] = quad.corners();
  let normal = (b - a).cross(c - a);
  assert!(normal.z > 0.0);

  let flipped = AxisQuad {
    outward: false,
    ..quad
  };
  let [a, b, c, _] = flipped.corners();
  let normal = (b - a).cross(c - a);
  assert!(normal.z < 0.0);
}

#[test]
fn mesh_push_tracks_bounds() {
  let mut mesh = TriangleMesh::new();
  assert!(mesh.is_empty());
  mesh.push(Triangle::new(
    DVec3::ZERO,
    DVec3::new(2.0, 0.0, 0.0),
    DVec3::new(0.0, 2.0, 1.0),
  ));
  assert_eq!(mesh.triangle_count(), 1);
  assert_eq!(mesh.bounds.max, DVec3::new(2.0, 2.0, 1.0));
}
