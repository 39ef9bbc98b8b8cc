//! Tessellation of cell-boundary loops into triangles and axis quads.
//!
//! Flat regions of the field produce loops that are axis-aligned rectangles;
//! those are emitted as [`AxisQuad`]s so the merge pass can coalesce them
//! across cells before triangulation. Everything else is ear-clipped in the
//! loop's best-fit plane. Loops that wrap a cell corner are not planar, but
//! their projection along the Newell normal stays simple in practice; a
//! stalled clip falls back to a centroid fan.

use glam::{DVec2, DVec3};

use crate::types::{Axis, AxisQuad, Triangle};

/// Triangles and mergeable quads produced from one loop.
#[derive(Clone, Debug, Default)]
pub struct Tessellation {
  pub triangles: Vec<Triangle>,
  pub quads: Vec<AxisQuad>,
}

/// Tessellate one closed loop.
///
/// `minres` is the smallest grid step; the axis-aligned rectangle test uses
/// `minres / 100` as its plane and edge tolerance. Triangles inherit the
/// loop's winding, so a loop that is counter-clockwise seen from outside the
/// object yields outward-facing triangles.
pub fn tessellate_loop(loop_points: &[DVec3], minres: f64) -> Tessellation {
  let mut out = Tessellation::default();

  // Strip consecutive duplicates and the closing repeat.
  let mut pts: Vec<DVec3> = Vec::with_capacity(loop_points.len());
  for &p in loop_points {
    if pts.last() != Some(&p) {
      pts.push(p);
    }
  }
  if pts.len() > 1 && pts.first() == pts.last() {
    pts.pop();
  }

  if pts.len() < 3 {
    return out;
  }
  if pts.len() == 3 {
    out.triangles.push(Triangle::new(pts[0], pts[1], pts[2]));
    return out;
  }
  if pts.len() == 4 {
    if let Some(quad) = axis_rectangle(&pts, minres / 100.0) {
      out.quads.push(quad);
      return out;
    }
  }
  ear_clip(&pts, &mut out.triangles);
  out
}

/// Detect a 4-point loop forming an axis-aligned rectangle.
fn axis_rectangle(pts: &[DVec3], tol: f64) -> Option<AxisQuad> {
  'axes: for axis in Axis::ALL {
    let w = pts[0][axis.index()];
    if pts.iter().any(|p| (p[axis.index()] - w).abs() > tol) {
      continue;
    }

    let uv = [
      axis.project(pts[0]),
      axis.project(pts[1]),
      axis.project(pts[2]),
      axis.project(pts[3]),
    ];
    // Every edge must run along exactly one in-plane axis.
    for i in 0..4 {
      let a = uv[i];
      let b = uv[(i + 1) % 4];
      let runs_u = (b.x - a.x).abs() > tol;
      let runs_v = (b.y - a.y).abs() > tol;
      if runs_u == runs_v {
        continue 'axes;
      }
    }

    let min = uv[0].min(uv[1]).min(uv[2]).min(uv[3]);
    let max = uv[0].max(uv[1]).max(uv[2]).max(uv[3]);
    // Winding in the cyclic in-plane pair decides the outward side.
    let mut area2 = 0.0;
    for i in 0..4 {
      let a = uv[i];
      let b = uv[(i + 1) % 4];
      area2 += (b.x - a.x) * (b.y + a.y);
    }
    return Some(AxisQuad {
      axis,
      w,
      min,
      max,
      outward: area2 < 0.0,
    });
  }
  None
}

/// Newell normal of a closed 3D polygon (not normalized).
fn newell_normal(pts: &[DVec3]) -> DVec3 {
  let mut n = DVec3::ZERO;
  for i in 0..pts.len() {
    let a = pts[i];
    let b = pts[(i + 1) % pts.len()];
    n.x += (a.y - b.y) * (a.z + b.z);
    n.y += (a.z - b.z) * (a.x + b.x);
    n.z += (a.x - b.x) * (a.y + b.y);
  }
  n
}

/// Ear-clip a loop in its best-fit plane, emitting triangles in loop order.
fn ear_clip(pts: &[DVec3], out: &mut Vec<Triangle>) {
  let normal = newell_normal(pts);
  let len = normal.length();
  if len < 1e-18 {
    fan_remainder(pts, &(0..pts.len()).collect::<Vec<_>>(), out);
    return;
  }
  let n = normal / len;

  // Right-handed in-plane basis; the projection then winds counter-clockwise
  // because the Newell normal came from the same loop.
  let u_axis = if n.x.abs() < 0.9 {
    DVec3::X.cross(n).normalize()
  } else {
    DVec3::Y.cross(n).normalize()
  };
  let v_axis = n.cross(u_axis);
  let proj: Vec<DVec2> = pts
    .iter()
    .map(|p| DVec2::new(p.dot(u_axis), p.dot(v_axis)))
    .collect();

  let mut idx: Vec<usize> = (0..pts.len()).collect();
  while idx.len() > 3 {
    let m = idx.len();
    let mut clipped = false;
    for i in 0..m {
      let ia = idx[(i + m - 1) % m];
      let ib = idx[i];
      let ic = idx[(i + 1) % m];
      let a = proj[ia];
      let b = proj[ib];
      let c = proj[ic];
      if (b - a).perp_dot(c - b) <= 0.0 {
        continue; // reflex or degenerate corner
      }
      let blocked = idx.iter().any(|&j| {
        j != ia && j != ib && j != ic && point_in_triangle(proj[j], a, b, c)
      });
      if blocked {
        continue;
      }
      out.push(Triangle::new(pts[ia], pts[ib], pts[ic]));
      idx.remove(i);
      clipped = true;
      break;
    }
    if !clipped {
      // Non-simple projection; fan the remainder instead of spinning.
      fan_remainder(pts, &idx, out);
      return;
    }
  }
  out.push(Triangle::new(pts[idx[0]], pts[idx[1]], pts[idx[2]]));
}

/// Fan the active vertices around their centroid.
fn fan_remainder(pts: &[DVec3], idx: &[usize], out: &mut Vec<Triangle>) {
  if idx.len() < 3 {
    return;
  }
  let centroid = idx.iter().map(|&i| pts[i]).sum::<DVec3>() / idx.len() as f64;
  for k in 0..idx.len() {
    let a = pts[idx[k]];
    let b = pts[idx[(k + 1) % idx.len()]];
    out.push(Triangle::new(a, b, centroid));
  }
}

/// CCW point-in-triangle test, boundary inclusive.
fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
  (b - a).perp_dot(p - a) >= 0.0
    && (c - b).perp_dot(p - b) >= 0.0
    && (a - c).perp_dot(p - c) >= 0.0
}

#[cfg(test)]
#[path = "tessellate_test.rs"]
mod tessellate_test;
