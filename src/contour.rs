//! 2D sweep: cells → oriented segments → closed, cleaned polylines.

use glam::DVec2;
use rayon::prelude::*;

use crate::error::{PolygonizeError, Result};
use crate::field::Field2;
use crate::grid::{CornerValues2, EdgeCrossings2, Grid2, CHUNK_SLICES};
use crate::loops::{clean_loops, stitch_loops};
use crate::march::{face_segments, FaceCorners, FaceCrossings};
use crate::types::Polyline;

/// Endpoint quantization for loop stitching, relative to the min step.
const STITCH_EPS_FRAC: f64 = 1e-6;

/// Colinearity tolerance for polyline cleanup, relative to the min step.
const COLINEAR_TOL_FRAC: f64 = 1e-4;

/// Extract the closed boundary polylines of `{p : field(p) <= 0}` over
/// `[p1, p2]` at the given per-axis resolution.
///
/// Each returned polyline repeats its first point at the end. Outer
/// boundaries wind counter-clockwise and holes clockwise (the interior is
/// always on the left of traversal). Output is deterministic: identical
/// inputs produce bit-identical polylines regardless of thread scheduling.
///
/// An empty region (`p1 >= p2` on any axis) yields an empty set. Boundary
/// pieces that leave the region cannot close into loops and are dropped.
///
/// # Errors
///
/// `InvalidArgument` when any resolution component is zero, negative, or
/// non-finite.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "contour::get_contour"))]
pub fn get_contour<F: Field2 + ?Sized>(
  p1: DVec2,
  p2: DVec2,
  res: DVec2,
  field: &F,
) -> Result<Vec<Polyline>> {
  if !(res.x > 0.0 && res.y > 0.0 && res.is_finite()) {
    return Err(PolygonizeError::InvalidArgument(format!(
      "resolution must be positive and finite, got {res}"
    )));
  }
  if !(p1.x < p2.x && p1.y < p2.y) {
    return Ok(Vec::new());
  }

  let grid = Grid2::new(p1, p2, res);
  let values = CornerValues2::build(&grid, field);
  let crossings_x = EdgeCrossings2::build_x(&grid, &values, field);
  let crossings_y = EdgeCrossings2::build_y(&grid, &values, field);

  // March rows in parallel; chunk outputs concatenate in row order so the
  // stitcher always sees the same canonical segment order.
  let [nx, ny] = grid.cells;
  let rows: Vec<usize> = (0..ny).collect();
  let per_chunk: Vec<Vec<Vec<DVec2>>> = rows
    .par_chunks(CHUNK_SLICES)
    .map(|chunk| {
      let mut segments = Vec::new();
      for &j in chunk {
        for i in 0..nx {
          let corners = FaceCorners {
            sw: values.get(i, j),
            se: values.get(i + 1, j),
            nw: values.get(i, j + 1),
            ne: values.get(i + 1, j + 1),
          };
          let face_crossings = FaceCrossings {
            south: crossings_x.get(i, j),
            north: crossings_x.get(i, j + 1),
            west: crossings_y.get(i, j),
            east: crossings_y.get(i + 1, j),
          };
          segments.extend(face_segments(
            grid.corner(i, j),
            grid.corner(i + 1, j + 1),
            field,
            corners,
            face_crossings,
          ));
        }
      }
      segments
    })
    .collect();

  let segments: Vec<Vec<DVec2>> = per_chunk.into_iter().flatten().collect();
  let stitched = stitch_loops(segments, grid.min_step() * STITCH_EPS_FRAC);

  #[cfg(feature = "tracing")]
  if stitched.dropped > 0 {
    tracing::warn!(
      dropped = stitched.dropped,
      "unmatched boundary segments dropped"
    );
  }

  Ok(clean_loops(
    stitched.loops,
    grid.min_step() * COLINEAR_TOL_FRAC,
  ))
}

#[cfg(test)]
#[path = "contour_test.rs"]
mod contour_test;
