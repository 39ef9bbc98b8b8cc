use glam::DVec2;

use super::*;
use crate::error::PolygonizeError;
use crate::samplers::Annulus;

#[test]
fn unit_circle_yields_one_closed_ccw_loop() {
  let field = |p: DVec2| p.length_squared() - 1.0;
  let polylines = get_contour(
    DVec2::splat(-1.2),
    DVec2::splat(1.2),
    DVec2::splat(0.1),
    &field,
  )
  .unwrap();

  assert_eq!(polylines.len(), 1);
  let lp = &polylines[0];
  assert!(lp.is_closed());
  assert!(lp.points.len() > 20);
  for p in &lp.points {
    assert!((p.length() - 1.0).abs() < 0.05, "vertex off the circle: {p}");
  }
  // Interior on the left makes the outer boundary counter-clockwise.
  assert!(lp.signed_area() > 0.0);
  // And the enclosed area approximates the disc.
  assert!((lp.signed_area() - std::f64::consts::PI).abs() < 0.1);
}

#[test]
fn nested_rings_orient_oppositely() {
  let field = |p: DVec2| {
    let r2 = p.length_squared();
    (r2 - 1.0) * (r2 - 0.25)
  };
  let polylines = get_contour(
    DVec2::splat(-1.2),
    DVec2::splat(1.2),
    DVec2::splat(0.05),
    &field,
  )
  .unwrap();

  assert_eq!(polylines.len(), 2);
  let mut outer = None;
  let mut inner = None;
  for lp in &polylines {
    let mean_radius: f64 =
      lp.points.iter().map(|p| p.length()).sum::<f64>() / lp.points.len() as f64;
    if mean_radius > 0.75 {
      outer = Some(lp);
    } else {
      inner = Some(lp);
    }
  }
  let (outer, inner) = (outer.expect("outer ring"), inner.expect("inner ring"));
  assert!(outer.signed_area() > 0.0, "outer boundary must be CCW");
  assert!(inner.signed_area() < 0.0, "hole must be CW");
  for p in &outer.points {
    assert!((p.length() - 1.0).abs() < 0.05);
  }
  for p in &inner.points {
    assert!((p.length() - 0.5).abs() < 0.05);
  }
}

#[test]
fn annulus_sampler_matches_product_field() {
  let polylines = get_contour(
    DVec2::splat(-1.2),
    DVec2::splat(1.2),
    DVec2::splat(0.05),
    &Annulus::new(0.5, 1.0),
  )
  .unwrap();
  assert_eq!(polylines.len(), 2);
}

#[test]
fn uniform_fields_produce_nothing() {
  let all_outside = |_: DVec2| 1.0;
  let all_inside = |_: DVec2| -1.0;
  let bounds = (DVec2::splat(-2.0), DVec2::splat(2.0));
  let res = DVec2::splat(0.5);
  assert!(get_contour(bounds.0, bounds.1, res, &all_outside).unwrap().is_empty());
  // A region entirely inside the object has no boundary to extract either.
  assert!(get_contour(bounds.0, bounds.1, res, &all_inside).unwrap().is_empty());
}

#[test]
fn empty_regions_yield_empty_output() {
  let field = |p: DVec2| p.length() - 1.0;
  let res = DVec2::splat(0.1);
  let p = DVec2::splat(1.0);
  assert!(get_contour(p, p, res, &field).unwrap().is_empty());
  assert!(get_contour(DVec2::new(2.0, 0.0), DVec2::new(1.0, 3.0), res, &field)
    .unwrap()
    .is_empty());
}

#[test]
fn bad_resolutions_are_rejected() {
  let field = |p: DVec2| p.length() - 1.0;
  let lo = DVec2::splat(-1.0);
  let hi = DVec2::splat(1.0);
  for res in [
    DVec2::new(0.0, 0.1),
    DVec2::new(0.1, -0.5),
    DVec2::new(f64::NAN, 0.1),
    DVec2::new(0.1, f64::INFINITY),
  ] {
    let err = get_contour(lo, hi, res, &field).unwrap_err();
    assert!(matches!(err, PolygonizeError::InvalidArgument(_)), "{res}");
  }
}

#[test]
fn all_vertices_stay_inside_the_bounds() {
  let field = |p: DVec2| p.length() - 1.0;
  let lo = DVec2::splat(-1.2);
  let hi = DVec2::splat(1.2);
  let polylines = get_contour(lo, hi, DVec2::splat(0.07), &field).unwrap();
  for lp in &polylines {
    for p in &lp.points {
      assert!(p.x >= lo.x && p.x <= hi.x && p.y >= lo.y && p.y <= hi.y);
    }
  }
}

#[test]
fn output_is_bit_exact_across_runs() {
  let field = |p: DVec2| (p.length_squared() - 1.0) * (p.length_squared() - 0.25);
  let run = || {
    get_contour(
      DVec2::splat(-1.2),
      DVec2::splat(1.2),
      DVec2::splat(0.05),
      &field,
    )
    .unwrap()
  };
  assert_eq!(run(), run());
}

#[test]
fn anisotropic_resolution_is_honored() {
  let field = |p: DVec2| p.length() - 1.0;
  let polylines = get_contour(
    DVec2::splat(-1.2),
    DVec2::splat(1.2),
    DVec2::new(0.05, 0.2),
    &field,
  )
  .unwrap();
  assert_eq!(polylines.len(), 1);
  assert!(polylines[0].is_closed());
}
