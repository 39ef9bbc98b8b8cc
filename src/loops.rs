//! Loop assembly: stitching oriented segments into closed loops, plus 2D
//! polyline cleanup.
//!
//! Segments arrive with the object interior on their left; stitching
//! preserves that orientation, so assembled loops wind counter-clockwise
//! around material and clockwise around holes.

use std::collections::HashMap;

use glam::{DVec2, DVec3};

use crate::types::Polyline;

/// Point that can be quantized for endpoint matching.
pub trait StitchPoint: Copy + PartialEq {
  /// Integer key at the given quantization size.
  fn quantize(self, eps: f64) -> [i64; 3];
}

impl StitchPoint for DVec2 {
  #[inline]
  fn quantize(self, eps: f64) -> [i64; 3] {
    [(self.x / eps).round() as i64, (self.y / eps).round() as i64, 0]
  }
}

impl StitchPoint for DVec3 {
  #[inline]
  fn quantize(self, eps: f64) -> [i64; 3] {
    [
      (self.x / eps).round() as i64,
      (self.y / eps).round() as i64,
      (self.z / eps).round() as i64,
    ]
  }
}

/// Outcome of stitching a bag of segments.
#[derive(Debug)]
pub struct StitchOutput<P> {
  /// Closed loops; each repeats its first point at the end, bit-exactly.
  pub loops: Vec<Vec<P>>,
  /// Segments discarded because no unconsumed successor matched their tail.
  pub dropped: u64,
}

/// Join oriented segments sharing endpoints into closed loops.
///
/// Every segment is consumed exactly once. Walks start at the lowest-index
/// unconsumed segment and always extend with the lowest-index segment whose
/// start matches the current tail, so the result is deterministic for a
/// given segment order. `eps` is the endpoint quantization size and must be
/// far below the grid step.
///
/// A chain that cannot be closed indicates a bug upstream or a field that
/// violated the intermediate-value theorem on an edge (or a boundary leaving
/// the sampled region); its segments are dropped and counted.
pub fn stitch_loops<P: StitchPoint>(segments: Vec<Vec<P>>, eps: f64) -> StitchOutput<P> {
  let mut starts: HashMap<[i64; 3], Vec<usize>> = HashMap::with_capacity(segments.len());
  for (i, seg) in segments.iter().enumerate() {
    if seg.len() >= 2 {
      starts.entry(seg[0].quantize(eps)).or_default().push(i);
    }
  }

  let mut consumed = vec![false; segments.len()];
  let mut loops = Vec::new();
  let mut dropped = 0u64;

  for first in 0..segments.len() {
    if consumed[first] || segments[first].len() < 2 {
      continue;
    }
    consumed[first] = true;
    let start_key = segments[first][0].quantize(eps);
    let mut chain: Vec<P> = segments[first].clone();
    let mut links = 1u64;

    let closed = loop {
      let tail = chain[chain.len() - 1];
      if chain.len() > 2 && tail.quantize(eps) == start_key {
        break true;
      }
      let successor = starts
        .get(&tail.quantize(eps))
        .and_then(|bucket| bucket.iter().copied().find(|&j| !consumed[j]));
      match successor {
        Some(j) => {
          consumed[j] = true;
          links += 1;
          chain.extend_from_slice(&segments[j][1..]);
        }
        None => break false,
      }
    };

    if closed {
      // Snap the closure bit-exact.
      let head = chain[0];
      let last = chain.len() - 1;
      chain[last] = head;
      loops.push(chain);
    } else {
      dropped += links;
    }
  }

  StitchOutput { loops, dropped }
}

/// Collapse colinear runs, drop degenerate loops, and re-close the
/// survivors.
///
/// `tol` is the maximum distance a middle point may sit from its
/// neighbours' chord and still be removed.
pub fn clean_loops(loops: Vec<Vec<DVec2>>, tol: f64) -> Vec<Polyline> {
  loops
    .into_iter()
    .filter_map(|points| clean_loop(points, tol))
    .collect()
}

fn clean_loop(points: Vec<DVec2>, tol: f64) -> Option<Polyline> {
  // Work on the open ring.
  let mut ring = points;
  if ring.len() > 1 && ring.first() == ring.last() {
    ring.pop();
  }
  ring.dedup_by(|a, b| a.distance_squared(*b) <= tol * tol);

  // Remove middle points lying on their neighbours' chord, to a fixed point.
  let mut changed = true;
  while changed && ring.len() >= 3 {
    changed = false;
    let mut i = 0;
    while i < ring.len() && ring.len() >= 3 {
      let len = ring.len();
      let prev = ring[(i + len - 1) % len];
      let next = ring[(i + 1) % len];
      if chord_distance(prev, ring[i], next) <= tol {
        ring.remove(i);
        changed = true;
      } else {
        i += 1;
      }
    }
  }

  if ring.len() < 3 {
    return None;
  }
  let first = ring[0];
  ring.push(first);
  Some(Polyline::new(ring))
}

/// Distance from `b` to the chord through `a` and `c`.
fn chord_distance(a: DVec2, b: DVec2, c: DVec2) -> f64 {
  let ac = c - a;
  let len = ac.length();
  if len < f64::EPSILON {
    return b.distance(a);
  }
  ac.perp_dot(b - a).abs() / len
}

#[cfg(test)]
#[path = "loops_test.rs"]
mod loops_test;
