use glam::DVec2;

use super::*;

#[test]
fn straight_boundaries_stay_two_points() {
  let field = |p: DVec2| p.y - 0.5;
  let out = refine_segment(
    &field,
    DVec2::new(0.0, 0.5),
    DVec2::new(1.0, 0.5),
    DVec2::ZERO,
    DVec2::ONE,
    1.0,
  );
  assert_eq!(out, vec![DVec2::new(0.0, 0.5), DVec2::new(1.0, 0.5)]);
}

#[test]
fn short_segments_are_left_alone() {
  // Curved field, but the span is far below the refinement threshold.
  let field = |p: DVec2| p.length() - 1.0;
  let p = DVec2::new(1.0, 0.0);
  let q = DVec2::new(0.9999, 0.0141);
  let out = refine_segment(&field, p, q, DVec2::ZERO, DVec2::ONE, 1.0);
  assert_eq!(out.len(), 2);
}

#[test]
fn curved_boundaries_gain_surface_points() {
  let field = |p: DVec2| p.length() - 1.0;
  let p = DVec2::new(1.0, 0.0);
  let q = DVec2::new(0.0, 1.0);
  let out = refine_segment(&field, p, q, DVec2::ZERO, DVec2::ONE, 1.0);

  assert!(out.len() > 2, "chord across a quarter circle must subdivide");
  assert_eq!(out[0], p);
  assert_eq!(out[out.len() - 1], q);
  // Inserted points are pulled onto the circle.
  for point in &out[1..out.len() - 1] {
    assert!(field(*point).abs() < 0.05, "off-surface point {point}");
  }
}

#[test]
fn inserted_points_stay_inside_the_face() {
  // Zero set bows outside the face; corrections must clamp to the top edge.
  let field = |p: DVec2| p.y - 1.06;
  let out = refine_segment(
    &field,
    DVec2::new(0.0, 1.0),
    DVec2::new(1.0, 1.0),
    DVec2::ZERO,
    DVec2::ONE,
    1.0,
  );
  assert!(out.len() > 2);
  for point in &out {
    assert!(point.y <= 1.0 && point.x >= 0.0 && point.x <= 1.0);
  }
}

#[test]
fn recursion_depth_is_bounded() {
  // A wiggly field can never force more points than full-depth subdivision.
  let field = |p: DVec2| p.y - 0.5 - 0.2 * (20.0 * p.x).sin();
  let out = refine_segment(
    &field,
    DVec2::new(0.0, 0.5),
    DVec2::new(1.0, 0.5),
    DVec2::ZERO,
    DVec2::ONE,
    1.0,
  );
  // Depth 3 splits one segment into at most 2^3 spans (7 interior points).
  assert!(out.len() <= 2 + 7, "got {} points", out.len());
}
