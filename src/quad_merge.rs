//! Coplanar axis-quad coalescing.
//!
//! Flat cell faces arrive from tessellation as one quad per cell. Merging
//! quads that share a complete edge in the same plane collapses those tilings
//! into a handful of large rectangles before the final triangle split, which
//! cuts the triangle count dramatically on boxy fields.

use crate::types::{AxisQuad, Triangle};

/// Merge coplanar axis-aligned quads until no pair can be coalesced.
///
/// Two quads merge when they lie in the same plane with the same outward
/// side, share a full edge (within `tol`), and their union is again a
/// rectangle. The result is deterministic regardless of input order: quads
/// are re-sorted into canonical order every pass.
pub fn merge_quads(quads: Vec<AxisQuad>, tol: f64) -> Vec<AxisQuad> {
  let mut current = quads;
  loop {
    current.sort_by(|a, b| {
      (a.axis.index() as u8, a.outward as u8)
        .cmp(&(b.axis.index() as u8, b.outward as u8))
        .then(a.w.total_cmp(&b.w))
        .then(a.min.x.total_cmp(&b.min.x))
        .then(a.min.y.total_cmp(&b.min.y))
    });

    let before = current.len();
    let mut result: Vec<AxisQuad> = Vec::with_capacity(before);
    'quads: for q in current.drain(..) {
      // Candidates sit at the tail of the result thanks to the sort.
      for r in result.iter_mut().rev() {
        if r.axis != q.axis || r.outward != q.outward || (r.w - q.w).abs() > tol {
          break;
        }
        if let Some(joined) = try_union(*r, q, tol) {
          *r = joined;
          continue 'quads;
        }
      }
      result.push(q);
    }

    if result.len() == before {
      return result;
    }
    current = result;
  }
}

/// Union of two coplanar quads when they share a complete edge.
fn try_union(a: AxisQuad, b: AxisQuad, tol: f64) -> Option<AxisQuad> {
  let close = |x: f64, y: f64| (x - y).abs() <= tol;

  let u_adjacent = close(a.max.x, b.min.x) || close(b.max.x, a.min.x);
  let v_matches = close(a.min.y, b.min.y) && close(a.max.y, b.max.y);
  let v_adjacent = close(a.max.y, b.min.y) || close(b.max.y, a.min.y);
  let u_matches = close(a.min.x, b.min.x) && close(a.max.x, b.max.x);

  if (u_adjacent && v_matches) || (v_adjacent && u_matches) {
    return Some(AxisQuad {
      min: a.min.min(b.min),
      max: a.max.max(b.max),
      ..a
    });
  }
  None
}

/// Split quads into triangles along the min-to-max diagonal.
///
/// The shared diagonal keeps the split consistent between runs and between
/// quads of either orientation.
pub fn triangulate_quads(quads: &[AxisQuad]) -> Vec<Triangle> {
  let mut triangles = Vec::with_capacity(quads.len() * 2);
  for quad in quads {
    let [c0, c1, c2, c3] = quad.corners();
    triangles.push(Triangle::new(c0, c1, c2));
    triangles.push(Triangle::new(c0, c2, c3));
  }
  triangles
}

#[cfg(test)]
#[path = "quad_merge_test.rs"]
mod quad_merge_test;
