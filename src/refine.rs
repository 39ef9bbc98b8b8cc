//! Midpoint refinement of face segments against the field.
//!
//! A straight line between two edge crossings cuts corners wherever the zero
//! set bends inside a face. Each segment midpoint is tested against the
//! field; when it deviates, the midpoint is pulled onto the zero set with a
//! Newton step along the finite-difference gradient and both halves recurse.

use glam::DVec2;

use crate::field::Field2;

/// Maximum subdivision depth per segment.
pub const MAX_REFINE_DEPTH: u32 = 3;

/// Refine the segment `p -> q` into a polyline tracking the zero set.
///
/// `res` scales every tolerance: spans shorter than `res² / 200` (squared
/// length) stay unsplit, midpoints within `res / 40` of the zero set are
/// accepted as-is, and the gradient stencil steps by `res / 100`. Inserted
/// points are clamped to the face rectangle `[lo, hi]` so vertices never
/// leave the sampled region.
pub fn refine_segment<F: Field2 + ?Sized>(
  field: &F,
  p: DVec2,
  q: DVec2,
  lo: DVec2,
  hi: DVec2,
  res: f64,
) -> Vec<DVec2> {
  let mut points = Vec::with_capacity(2);
  points.push(p);
  subdivide(field, p, q, lo, hi, res, 0, &mut points);
  points.push(q);
  points
}

/// Push the interior points of `p -> q`, exclusive of both ends.
fn subdivide<F: Field2 + ?Sized>(
  field: &F,
  p: DVec2,
  q: DVec2,
  lo: DVec2,
  hi: DVec2,
  res: f64,
  depth: u32,
  out: &mut Vec<DVec2>,
) {
  if depth >= MAX_REFINE_DEPTH {
    return;
  }
  if p.distance_squared(q) <= res * res / 200.0 {
    return;
  }

  let mid = (p + q) * 0.5;
  let midval = field.evaluate(mid);
  if midval.abs() < res / 40.0 {
    return;
  }

  // One Newton step along the central-difference gradient.
  let h = res / 100.0;
  let grad = DVec2::new(
    field.evaluate(DVec2::new(mid.x + h, mid.y)) - field.evaluate(DVec2::new(mid.x - h, mid.y)),
    field.evaluate(DVec2::new(mid.x, mid.y + h)) - field.evaluate(DVec2::new(mid.x, mid.y - h)),
  ) / (2.0 * h);

  let len_sq = grad.length_squared();
  if len_sq < 1e-12 {
    return;
  }
  let step = grad * (midval / len_sq);
  if step.length_squared() > res * res {
    // Gradient too flat to trust a correction this large.
    return;
  }
  let corrected = (mid - step).clamp(lo, hi);

  subdivide(field, p, corrected, lo, hi, res, depth + 1, out);
  out.push(corrected);
  subdivide(field, corrected, q, lo, hi, res, depth + 1, out);
}

#[cfg(test)]
#[path = "refine_test.rs"]
mod refine_test;
