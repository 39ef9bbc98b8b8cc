//! 3D sweep: cube faces → face segments → per-cell loops → triangles.
//!
//! Each cell of the grid is treated as a small closed box: the boundary of
//! the object inside the cell traces a closed loop over the cell's six
//! faces. Face segments come from the 2D marching machinery on each face
//! plane; a cell gathers its three lower faces in natural orientation and
//! its three upper faces reversed, which makes every stitched loop wind
//! counter-clockwise seen from outside the object. Loops tessellate into
//! triangles and axis quads; quads are merged globally before the final
//! split.
//!
//! Faces are shared: two cells flanking a face read the same slab-local
//! entry, and the z-planes between slabs are recomputed bit-identically from
//! the same caches, so the mesh never cracks along cell boundaries.

use glam::{DVec2, DVec3};
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::error::{PolygonizeError, Result};
use crate::field::{Field3, PlaneSlice};
use crate::grid::{CornerValues3, EdgeCrossings3, Grid3, CHUNK_SLICES};
use crate::loops::stitch_loops;
use crate::march::{face_segments, FaceCorners, FaceCrossings};
use crate::metrics::{PhaseTimer, SweepStats};
use crate::quad_merge::{merge_quads, triangulate_quads};
use crate::tessellate::tessellate_loop;
use crate::types::{Axis, AxisQuad, Triangle, TriangleMesh};

/// Endpoint quantization for loop stitching, relative to the min step.
const STITCH_EPS_FRAC: f64 = 1e-6;

/// Plane and edge tolerance for quad merging, relative to the min step.
const MERGE_TOL_FRAC: f64 = 1e-6;

/// Segments on one cube face, embedded in 3D.
type FaceSegs3 = SmallVec<[Vec<DVec3>; 2]>;

/// Polygonize `{p : field(p) <= 0}` over the box `[p1, p2]` into a triangle
/// mesh at the given per-axis resolution.
///
/// Triangles wind counter-clockwise seen from outside the object. Where the
/// object crosses the box boundary the mesh is capped flat against the box
/// faces. Output is deterministic: identical inputs produce bit-identical
/// triangles regardless of thread scheduling.
///
/// An empty region (`p1 >= p2` on any axis) yields an empty mesh.
///
/// # Errors
///
/// `InvalidArgument` when any resolution component is zero, negative, or
/// non-finite.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mesh::get_mesh"))]
pub fn get_mesh<F: Field3 + ?Sized>(
  p1: DVec3,
  p2: DVec3,
  res: DVec3,
  field: &F,
) -> Result<TriangleMesh> {
  if !(res.x > 0.0 && res.y > 0.0 && res.z > 0.0 && res.is_finite()) {
    return Err(PolygonizeError::InvalidArgument(format!(
      "resolution must be positive and finite, got {res}"
    )));
  }
  if !(p1.x < p2.x && p1.y < p2.y && p1.z < p2.z) {
    return Ok(TriangleMesh::new());
  }

  let mut stats = SweepStats::default();
  let grid = Grid3::new(p1, p2, res);

  let timer = PhaseTimer::start();
  let values = CornerValues3::build(&grid, field);
  stats.corner_us = timer.elapsed_us();

  let timer = PhaseTimer::start();
  let crossings_x = EdgeCrossings3::build(&grid, &values, field, Axis::X);
  let crossings_y = EdgeCrossings3::build(&grid, &values, field, Axis::Y);
  let crossings_z = EdgeCrossings3::build(&grid, &values, field, Axis::Z);
  stats.crossing_us = timer.elapsed_us();

  let minres = grid.min_step();
  let eps = minres * STITCH_EPS_FRAC;
  let caches = SweepCaches {
    grid: &grid,
    values: &values,
    crossings_x: &crossings_x,
    crossings_y: &crossings_y,
    crossings_z: &crossings_z,
  };

  let timer = PhaseTimer::start();
  let nz = grid.cells[2];
  let slabs: Vec<usize> = (0..nz).collect();
  let per_chunk: Vec<SlabOutput> = slabs
    .par_chunks(CHUNK_SLICES)
    .map(|chunk| {
      let mut out = SlabOutput::default();
      for &k in chunk {
        sweep_slab(k, field, &caches, minres, eps, &mut out);
      }
      out
    })
    .collect();

  let mut triangles = Vec::new();
  let mut quads = Vec::new();
  for slab in per_chunk {
    triangles.extend(slab.triangles);
    quads.extend(slab.quads);
    stats.dropped_segments += slab.dropped;
    stats.loops += slab.loops;
  }
  stats.extract_us = timer.elapsed_us();

  let timer = PhaseTimer::start();
  let merged = merge_quads(quads, minres * MERGE_TOL_FRAC);
  triangles.extend(triangulate_quads(&merged));
  stats.assemble_us = timer.elapsed_us();

  #[cfg(feature = "tracing")]
  if stats.dropped_segments > 0 {
    tracing::warn!(
      dropped = stats.dropped_segments,
      "unmatched boundary segments dropped"
    );
  }

  let mut mesh = TriangleMesh::new();
  for tri in triangles {
    mesh.push(tri);
  }
  mesh.stats = stats;
  Ok(mesh)
}

/// Read-only caches shared by every slab task.
struct SweepCaches<'a> {
  grid: &'a Grid3,
  values: &'a CornerValues3,
  crossings_x: &'a EdgeCrossings3,
  crossings_y: &'a EdgeCrossings3,
  crossings_z: &'a EdgeCrossings3,
}

/// Geometry and counters collected by one slab task.
#[derive(Default)]
struct SlabOutput {
  triangles: Vec<Triangle>,
  quads: Vec<AxisQuad>,
  dropped: u64,
  loops: u64,
}

/// March every cell of the z-slab `[z_k, z_k+1]`.
///
/// Face segments are computed once into slab-local arrays; the two cells
/// flanking an interior face read the same entry.
fn sweep_slab<F: Field3 + ?Sized>(
  k: usize,
  field: &F,
  caches: &SweepCaches<'_>,
  minres: f64,
  eps: f64,
  out: &mut SlabOutput,
) {
  let [nx, ny, _] = caches.grid.cells;

  // X faces: planes x = x(ix) for ix in 0..=nx, one per cell row.
  let mut x_faces = Vec::with_capacity((nx + 1) * ny);
  for j in 0..ny {
    for ix in 0..=nx {
      x_faces.push(face_segs(field, caches, Axis::X, ix, j, k));
    }
  }
  // Y faces: planes y = y(jy) for jy in 0..=ny.
  let mut y_faces = Vec::with_capacity(nx * (ny + 1));
  for jy in 0..=ny {
    for i in 0..nx {
      y_faces.push(face_segs(field, caches, Axis::Y, i, jy, k));
    }
  }
  // Z planes bounding the slab.
  let mut z_lo = Vec::with_capacity(nx * ny);
  let mut z_hi = Vec::with_capacity(nx * ny);
  for j in 0..ny {
    for i in 0..nx {
      z_lo.push(face_segs(field, caches, Axis::Z, i, j, k));
      z_hi.push(face_segs(field, caches, Axis::Z, i, j, k + 1));
    }
  }

  let mut bag: Vec<Vec<DVec3>> = Vec::new();
  for j in 0..ny {
    for i in 0..nx {
      bag.clear();
      extend_natural(&mut bag, &x_faces[j * (nx + 1) + i]);
      extend_reversed(&mut bag, &x_faces[j * (nx + 1) + i + 1]);
      extend_natural(&mut bag, &y_faces[j * nx + i]);
      extend_reversed(&mut bag, &y_faces[(j + 1) * nx + i]);
      extend_natural(&mut bag, &z_lo[j * nx + i]);
      extend_reversed(&mut bag, &z_hi[j * nx + i]);
      if bag.is_empty() {
        continue;
      }

      let stitched = stitch_loops(std::mem::take(&mut bag), eps);
      out.dropped += stitched.dropped;
      for cell_loop in &stitched.loops {
        out.loops += 1;
        let tess = tessellate_loop(cell_loop, minres);
        out.triangles.extend(tess.triangles);
        out.quads.extend(tess.quads);
      }
    }
  }
}

fn extend_natural(bag: &mut Vec<Vec<DVec3>>, segs: &FaceSegs3) {
  for seg in segs {
    bag.push(seg.clone());
  }
}

fn extend_reversed(bag: &mut Vec<Vec<DVec3>>, segs: &FaceSegs3) {
  for seg in segs {
    bag.push(seg.iter().rev().copied().collect());
  }
}

/// March one cube face and embed the segments in 3D.
///
/// `(i, j, k)` is the lattice index of the face's lower corner; the index
/// along `axis` selects the face plane. Corner values and edge crossings
/// come from the shared caches, never from fresh field evaluations.
fn face_segs<F: Field3 + ?Sized>(
  field: &F,
  caches: &SweepCaches<'_>,
  axis: Axis,
  i: usize,
  j: usize,
  k: usize,
) -> FaceSegs3 {
  let grid = caches.grid;
  let values = caches.values;

  let (w, lo, hi, corners, crossings) = match axis {
    Axis::X => (
      grid.x(i),
      DVec2::new(grid.y(j), grid.z(k)),
      DVec2::new(grid.y(j + 1), grid.z(k + 1)),
      FaceCorners {
        sw: values.get(i, j, k),
        se: values.get(i, j + 1, k),
        nw: values.get(i, j, k + 1),
        ne: values.get(i, j + 1, k + 1),
      },
      FaceCrossings {
        south: caches.crossings_y.get(i, j, k),
        north: caches.crossings_y.get(i, j, k + 1),
        west: caches.crossings_z.get(i, j, k),
        east: caches.crossings_z.get(i, j + 1, k),
      },
    ),
    Axis::Y => (
      grid.y(j),
      DVec2::new(grid.z(k), grid.x(i)),
      DVec2::new(grid.z(k + 1), grid.x(i + 1)),
      FaceCorners {
        sw: values.get(i, j, k),
        se: values.get(i, j, k + 1),
        nw: values.get(i + 1, j, k),
        ne: values.get(i + 1, j, k + 1),
      },
      FaceCrossings {
        south: caches.crossings_z.get(i, j, k),
        north: caches.crossings_z.get(i + 1, j, k),
        west: caches.crossings_x.get(i, j, k),
        east: caches.crossings_x.get(i, j, k + 1),
      },
    ),
    Axis::Z => (
      grid.z(k),
      DVec2::new(grid.x(i), grid.y(j)),
      DVec2::new(grid.x(i + 1), grid.y(j + 1)),
      FaceCorners {
        sw: values.get(i, j, k),
        se: values.get(i + 1, j, k),
        nw: values.get(i, j + 1, k),
        ne: values.get(i + 1, j + 1, k),
      },
      FaceCrossings {
        south: caches.crossings_x.get(i, j, k),
        north: caches.crossings_x.get(i, j + 1, k),
        west: caches.crossings_y.get(i, j, k),
        east: caches.crossings_y.get(i + 1, j, k),
      },
    ),
  };

  let slice = PlaneSlice::new(field, axis, w);
  face_segments(lo, hi, &slice, corners, crossings)
    .into_iter()
    .map(|seg| seg.into_iter().map(|uv| axis.embed(w, uv)).collect())
    .collect()
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
