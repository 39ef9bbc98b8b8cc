//! Uniform sampling grids with halo'd corner and edge-crossing caches.
//!
//! Both caches are built once, in parallel, before any cell is marched, and
//! are read-only afterwards. Corner lattices over-allocate by +2 per axis and
//! edge lattices by +1 along their own axis, so neighbouring-cell lookups
//! never go out of bounds.
//!
//! The crossing caches are what keeps adjacent cells crack-free: both cells
//! sharing an edge read the *same* cached coordinate, so their boundary
//! segments meet bit-exactly.

use glam::{DVec2, DVec3};
use rayon::prelude::*;

use crate::field::{Field2, Field3};
use crate::interpolate::interpolate;
use crate::types::Axis;

/// Slices (3D) or rows (2D) grouped into one parallel task.
pub const CHUNK_SLICES: usize = 32;

// =============================================================================
// 2D
// =============================================================================

/// Cell layout of a 2D sweep.
#[derive(Clone, Copy, Debug)]
pub struct Grid2 {
  /// Lower corner of the region.
  pub origin: DVec2,
  /// Cell counts per axis.
  pub cells: [usize; 2],
  /// Actual step after rounding the cell counts up.
  pub step: DVec2,
}

impl Grid2 {
  pub fn new(p1: DVec2, p2: DVec2, res: DVec2) -> Self {
    let nx = ((p2.x - p1.x) / res.x).ceil().max(1.0) as usize;
    let ny = ((p2.y - p1.y) / res.y).ceil().max(1.0) as usize;
    Self {
      origin: p1,
      cells: [nx, ny],
      step: DVec2::new((p2.x - p1.x) / nx as f64, (p2.y - p1.y) / ny as f64),
    }
  }

  #[inline]
  pub fn x(&self, i: usize) -> f64 {
    self.origin.x + i as f64 * self.step.x
  }

  #[inline]
  pub fn y(&self, j: usize) -> f64 {
    self.origin.y + j as f64 * self.step.y
  }

  #[inline]
  pub fn corner(&self, i: usize, j: usize) -> DVec2 {
    DVec2::new(self.x(i), self.y(j))
  }

  /// Smallest step over both axes.
  #[inline]
  pub fn min_step(&self) -> f64 {
    self.step.x.min(self.step.y)
  }
}

/// Dense cache of field values at 2D grid corners (+2 halo per axis).
pub struct CornerValues2 {
  data: Vec<f64>,
  width: usize,
}

impl CornerValues2 {
  /// Evaluate the field over the halo'd lattice, one rayon task per
  /// [`CHUNK_SLICES`] rows.
  pub fn build<F: Field2 + ?Sized>(grid: &Grid2, field: &F) -> Self {
    let width = grid.cells[0] + 2;
    let height = grid.cells[1] + 2;
    let mut data = vec![0.0; width * height];

    data
      .par_chunks_mut(width * CHUNK_SLICES)
      .enumerate()
      .for_each(|(chunk, rows)| {
        let j0 = chunk * CHUNK_SLICES;
        for (dj, row) in rows.chunks_mut(width).enumerate() {
          let y = grid.y(j0 + dj);
          for (i, value) in row.iter_mut().enumerate() {
            *value = field.evaluate(DVec2::new(grid.x(i), y));
          }
        }
      });

    Self { data, width }
  }

  #[inline]
  pub fn get(&self, i: usize, j: usize) -> f64 {
    self.data[j * self.width + i]
  }
}

/// Zero-crossing coordinates on 2D grid edges along one axis.
///
/// An entry exists for every edge; it holds the crossing coordinate, or the
/// lower endpoint coordinate when the edge does not straddle zero.
pub struct EdgeCrossings2 {
  data: Vec<f64>,
  width: usize,
}

impl EdgeCrossings2 {
  /// Crossings along x-directed edges: entry `(i, j)` covers the edge from
  /// corner `(i, j)` to `(i + 1, j)`.
  pub fn build_x<F: Field2 + ?Sized>(grid: &Grid2, values: &CornerValues2, field: &F) -> Self {
    let width = grid.cells[0] + 1;
    let res = grid.step.x;
    let mut data = vec![0.0; width * (grid.cells[1] + 2)];

    data
      .par_chunks_mut(width * CHUNK_SLICES)
      .enumerate()
      .for_each(|(chunk, rows)| {
        let j0 = chunk * CHUNK_SLICES;
        for (dj, row) in rows.chunks_mut(width).enumerate() {
          let j = j0 + dj;
          let y = grid.y(j);
          for (i, slot) in row.iter_mut().enumerate() {
            *slot = interpolate(
              (grid.x(i), values.get(i, j)),
              (grid.x(i + 1), values.get(i + 1, j)),
              |x| field.evaluate(DVec2::new(x, y)),
              res,
            );
          }
        }
      });

    Self { data, width }
  }

  /// Crossings along y-directed edges: entry `(i, j)` covers the edge from
  /// corner `(i, j)` to `(i, j + 1)`.
  pub fn build_y<F: Field2 + ?Sized>(grid: &Grid2, values: &CornerValues2, field: &F) -> Self {
    let width = grid.cells[0] + 2;
    let res = grid.step.y;
    let mut data = vec![0.0; width * (grid.cells[1] + 1)];

    data
      .par_chunks_mut(width * CHUNK_SLICES)
      .enumerate()
      .for_each(|(chunk, rows)| {
        let j0 = chunk * CHUNK_SLICES;
        for (dj, row) in rows.chunks_mut(width).enumerate() {
          let j = j0 + dj;
          for (i, slot) in row.iter_mut().enumerate() {
            let x = grid.x(i);
            *slot = interpolate(
              (grid.y(j), values.get(i, j)),
              (grid.y(j + 1), values.get(i, j + 1)),
              |y| field.evaluate(DVec2::new(x, y)),
              res,
            );
          }
        }
      });

    Self { data, width }
  }

  #[inline]
  pub fn get(&self, i: usize, j: usize) -> f64 {
    self.data[j * self.width + i]
  }
}

// =============================================================================
// 3D
// =============================================================================

/// Cell layout of a 3D sweep.
#[derive(Clone, Copy, Debug)]
pub struct Grid3 {
  pub origin: DVec3,
  pub cells: [usize; 3],
  pub step: DVec3,
}

impl Grid3 {
  pub fn new(p1: DVec3, p2: DVec3, res: DVec3) -> Self {
    let nx = ((p2.x - p1.x) / res.x).ceil().max(1.0) as usize;
    let ny = ((p2.y - p1.y) / res.y).ceil().max(1.0) as usize;
    let nz = ((p2.z - p1.z) / res.z).ceil().max(1.0) as usize;
    Self {
      origin: p1,
      cells: [nx, ny, nz],
      step: DVec3::new(
        (p2.x - p1.x) / nx as f64,
        (p2.y - p1.y) / ny as f64,
        (p2.z - p1.z) / nz as f64,
      ),
    }
  }

  #[inline]
  pub fn x(&self, i: usize) -> f64 {
    self.origin.x + i as f64 * self.step.x
  }

  #[inline]
  pub fn y(&self, j: usize) -> f64 {
    self.origin.y + j as f64 * self.step.y
  }

  #[inline]
  pub fn z(&self, k: usize) -> f64 {
    self.origin.z + k as f64 * self.step.z
  }

  /// Corner coordinate along one axis.
  #[inline]
  pub fn axis_coord(&self, axis: Axis, index: usize) -> f64 {
    self.origin[axis.index()] + index as f64 * self.step[axis.index()]
  }

  #[inline]
  pub fn corner(&self, i: usize, j: usize, k: usize) -> DVec3 {
    DVec3::new(self.x(i), self.y(j), self.z(k))
  }

  /// Smallest step over the three axes.
  #[inline]
  pub fn min_step(&self) -> f64 {
    self.step.x.min(self.step.y).min(self.step.z)
  }
}

/// Dense cache of field values at 3D grid corners (+2 halo per axis).
///
/// Layout is z-slowest so each parallel task fills whole z-slabs.
pub struct CornerValues3 {
  data: Vec<f64>,
  dims: [usize; 3],
}

impl CornerValues3 {
  pub fn build<F: Field3 + ?Sized>(grid: &Grid3, field: &F) -> Self {
    let dims = [grid.cells[0] + 2, grid.cells[1] + 2, grid.cells[2] + 2];
    let slab = dims[0] * dims[1];
    let mut data = vec![0.0; slab * dims[2]];

    data
      .par_chunks_mut(slab * CHUNK_SLICES)
      .enumerate()
      .for_each(|(chunk, slabs)| {
        let k0 = chunk * CHUNK_SLICES;
        for (dk, plane) in slabs.chunks_mut(slab).enumerate() {
          let z = grid.z(k0 + dk);
          for j in 0..dims[1] {
            let y = grid.y(j);
            let row = &mut plane[j * dims[0]..(j + 1) * dims[0]];
            for (i, value) in row.iter_mut().enumerate() {
              *value = field.evaluate(DVec3::new(grid.x(i), y, z));
            }
          }
        }
      });

    Self { data, dims }
  }

  #[inline]
  pub fn get(&self, i: usize, j: usize, k: usize) -> f64 {
    self.data[(k * self.dims[1] + j) * self.dims[0] + i]
  }
}

/// Zero-crossing coordinates on 3D grid edges along one axis.
pub struct EdgeCrossings3 {
  data: Vec<f64>,
  dims: [usize; 3],
}

impl EdgeCrossings3 {
  /// Run the interpolator over every edge along `axis`, reading endpoint
  /// values from the corner cache (the field is never re-evaluated at a
  /// corner).
  pub fn build<F: Field3 + ?Sized>(
    grid: &Grid3,
    values: &CornerValues3,
    field: &F,
    axis: Axis,
  ) -> Self {
    let mut dims = [grid.cells[0] + 2, grid.cells[1] + 2, grid.cells[2] + 2];
    dims[axis.index()] = grid.cells[axis.index()] + 1;
    let slab = dims[0] * dims[1];
    let res = grid.step[axis.index()];
    let mut data = vec![0.0; slab * dims[2]];

    data
      .par_chunks_mut(slab * CHUNK_SLICES)
      .enumerate()
      .for_each(|(chunk, slabs)| {
        let k0 = chunk * CHUNK_SLICES;
        for (dk, plane) in slabs.chunks_mut(slab).enumerate() {
          let k = k0 + dk;
          for j in 0..dims[1] {
            let row = &mut plane[j * dims[0]..(j + 1) * dims[0]];
            for (i, slot) in row.iter_mut().enumerate() {
              let lower = [i, j, k];
              let mut upper = lower;
              upper[axis.index()] += 1;
              let origin = grid.corner(i, j, k);
              let g = |t: f64| {
                let mut p = origin;
                p[axis.index()] = t;
                field.evaluate(p)
              };
              *slot = interpolate(
                (
                  grid.axis_coord(axis, lower[axis.index()]),
                  values.get(lower[0], lower[1], lower[2]),
                ),
                (
                  grid.axis_coord(axis, upper[axis.index()]),
                  values.get(upper[0], upper[1], upper[2]),
                ),
                g,
                res,
              );
            }
          }
        }
      });

    Self { data, dims }
  }

  #[inline]
  pub fn get(&self, i: usize, j: usize, k: usize) -> f64 {
    self.data[(k * self.dims[1] + j) * self.dims[0] + i]
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
