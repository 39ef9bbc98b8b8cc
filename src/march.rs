//! Marching-squares segment extraction for a single grid face.
//!
//! A face is a 2D cell with four signed corner values (a value <= 0 means the
//! corner is inside the object). The 16 sign patterns collapse to the classic
//! marching-squares cases; each active case emits one or two oriented
//! segments whose endpoints are the cached edge crossings.
//!
//! Orientation invariant: the interior lies to the left of every emitted
//! segment. The two saddle patterns (diagonal corners sharing a sign) are
//! ambiguous from the corners alone; the field's value at the face center
//! decides which diagonal the boundary separates.

use glam::DVec2;
use smallvec::{smallvec, SmallVec};

use crate::field::Field2;
use crate::refine::refine_segment;

/// Signed field values at the four face corners.
#[derive(Clone, Copy, Debug)]
pub struct FaceCorners {
  /// Value at (x0, y0).
  pub sw: f64,
  /// Value at (x1, y0).
  pub se: f64,
  /// Value at (x0, y1).
  pub nw: f64,
  /// Value at (x1, y1).
  pub ne: f64,
}

/// Cached zero crossings on the four face edges.
///
/// Each value is the crossing coordinate along its edge; it is only read
/// when that edge actually straddles zero.
#[derive(Clone, Copy, Debug)]
pub struct FaceCrossings {
  /// x of the crossing on the south edge (y = y0).
  pub south: f64,
  /// x of the crossing on the north edge (y = y1).
  pub north: f64,
  /// y of the crossing on the west edge (x = x0).
  pub west: f64,
  /// y of the crossing on the east edge (x = x1).
  pub east: f64,
}

/// Refined segments extracted from one face; at most two entries.
pub type FaceSegments = SmallVec<[Vec<DVec2>; 2]>;

/// Extract the oriented boundary segments crossing the face `[lo, hi]`.
///
/// Each raw segment is refined against the field (see
/// [`refine_segment`]) before being returned; point-degenerate segments are
/// discarded.
pub fn face_segments<F: Field2 + ?Sized>(
  lo: DVec2,
  hi: DVec2,
  field: &F,
  corners: FaceCorners,
  crossings: FaceCrossings,
) -> FaceSegments {
  let inside = |v: f64| v <= 0.0;
  let sw = inside(corners.sw);
  let se = inside(corners.se);
  let nw = inside(corners.nw);
  let ne = inside(corners.ne);

  let s = DVec2::new(crossings.south, lo.y);
  let n = DVec2::new(crossings.north, hi.y);
  let w = DVec2::new(lo.x, crossings.west);
  let e = DVec2::new(hi.x, crossings.east);

  let raw: SmallVec<[(DVec2, DVec2); 2]> = match (sw, se, nw, ne) {
    (false, false, false, false) | (true, true, true, true) => SmallVec::new(),
    // One corner inside.
    (true, false, false, false) => smallvec![(s, w)],
    (false, true, false, false) => smallvec![(e, s)],
    (false, false, true, false) => smallvec![(w, n)],
    (false, false, false, true) => smallvec![(n, e)],
    // One corner outside.
    (false, true, true, true) => smallvec![(w, s)],
    (true, false, true, true) => smallvec![(s, e)],
    (true, true, false, true) => smallvec![(n, w)],
    (true, true, true, false) => smallvec![(e, n)],
    // Half/half splits.
    (true, true, false, false) => smallvec![(e, w)],
    (false, false, true, true) => smallvec![(w, e)],
    (true, false, true, false) => smallvec![(s, n)],
    (false, true, false, true) => smallvec![(n, s)],
    // Saddles: the face center decides which diagonal stays connected.
    (true, false, false, true) => {
      if inside(field.evaluate((lo + hi) * 0.5)) {
        smallvec![(n, w), (s, e)]
      } else {
        smallvec![(s, w), (n, e)]
      }
    }
    (false, true, true, false) => {
      if inside(field.evaluate((lo + hi) * 0.5)) {
        smallvec![(w, s), (e, n)]
      } else {
        smallvec![(w, n), (e, s)]
      }
    }
  };

  let res = (hi.x - lo.x).min(hi.y - lo.y);
  raw
    .into_iter()
    .filter(|(p, q)| p != q)
    .map(|(p, q)| refine_segment(field, p, q, lo, hi, res))
    .collect()
}

#[cfg(test)]
#[path = "march_test.rs"]
mod march_test;
