//! implicit_mesh - polygonization core for implicit geometry
//!
//! This crate turns a signed scalar field over 2D or 3D space (the object is
//! everything where the field is <= 0) into a polygonal boundary at a
//! caller-chosen resolution: closed polylines in 2D, a triangle mesh in 3D.
//!
//! # Pipeline
//!
//! ```text
//! field F ──► corner cache V ──► edge-crossing caches M (hybrid root finder)
//!                 │
//!                 ▼
//!   per face: marching-squares segments ──► midpoint refinement
//!                 │
//!     2D          ▼          3D
//!   ┌─────────────┴───────────────┐
//!   │ stitch all segments into    │ per cell: stitch six faces' segments
//!   │ loops, clean colinear runs  │ into loops, tessellate into triangles
//!   │ ──► Vec<Polyline>           │ and axis quads, merge coplanar quads
//!   └─────────────────────────────┘ globally ──► TriangleMesh
//! ```
//!
//! Both sweeps run data-parallel over the outermost axis (rayon, chunked
//! slices) and are deterministic: identical inputs give bit-identical
//! output.
//!
//! # Example
//!
//! ```ignore
//! use glam::DVec3;
//! use implicit_mesh::get_mesh;
//!
//! let sphere = |p: DVec3| p.length() - 1.0;
//! let mesh = get_mesh(
//!   DVec3::splat(-1.5),
//!   DVec3::splat(1.5),
//!   DVec3::splat(0.1),
//!   &sphere,
//! )?;
//! println!("{} triangles", mesh.triangle_count());
//! ```

pub mod error;
pub mod field;
pub mod grid;
pub mod interpolate;
pub mod loops;
pub mod march;
pub mod metrics;
pub mod quad_merge;
pub mod refine;
pub mod samplers;
pub mod tessellate;
pub mod types;

mod contour;
mod mesh;

pub use contour::get_contour;
pub use error::{PolygonizeError, Result};
pub use field::{Field2, Field3, PlaneSlice};
pub use interpolate::interpolate;
pub use mesh::get_mesh;
pub use metrics::SweepStats;
pub use types::{Aabb, Axis, AxisQuad, Polyline, Triangle, TriangleMesh};
