//! Core geometry types shared across the polygonization pipeline.

use glam::{DVec2, DVec3};

use crate::metrics::SweepStats;

/// Coordinate axis of the sampling grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
  X,
  Y,
  Z,
}

impl Axis {
  /// All three axes in order.
  pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

  /// Index into `[_; 3]`-shaped data.
  #[inline]
  pub fn index(self) -> usize {
    match self {
      Axis::X => 0,
      Axis::Y => 1,
      Axis::Z => 2,
    }
  }

  /// Embed an in-plane point into 3D on the plane `axis = w`.
  ///
  /// The in-plane pair (u, v) is cyclic: X → (y, z), Y → (z, x), Z → (x, y).
  #[inline]
  pub fn embed(self, w: f64, uv: DVec2) -> DVec3 {
    match self {
      Axis::X => DVec3::new(w, uv.x, uv.y),
      Axis::Y => DVec3::new(uv.y, w, uv.x),
      Axis::Z => DVec3::new(uv.x, uv.y, w),
    }
  }

  /// Project a 3D point onto the cyclic in-plane pair.
  #[inline]
  pub fn project(self, p: DVec3) -> DVec2 {
    match self {
      Axis::X => DVec2::new(p.y, p.z),
      Axis::Y => DVec2::new(p.z, p.x),
      Axis::Z => DVec2::new(p.x, p.y),
    }
  }
}

/// Ordered run of 2D points. Closed iff the first and last points are equal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
  pub points: Vec<DVec2>,
}

impl Polyline {
  pub fn new(points: Vec<DVec2>) -> Self {
    Self { points }
  }

  /// True when the run returns to its starting point.
  pub fn is_closed(&self) -> bool {
    self.points.len() > 1 && self.points.first() == self.points.last()
  }

  /// Signed area of the closed run (shoelace). Positive for counter-clockwise
  /// traversal, which is what outer boundaries use; holes come out negative.
  pub fn signed_area(&self) -> f64 {
    let mut sum = 0.0;
    for w in self.points.windows(2) {
      sum += (w[1].x - w[0].x) * (w[1].y + w[0].y);
    }
    -sum / 2.0
  }
}

/// Three points in space, wound counter-clockwise seen from outside the
/// object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
  pub a: DVec3,
  pub b: DVec3,
  pub c: DVec3,
}

impl Triangle {
  pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
    Self { a, b, c }
  }

  /// Non-normalized face normal (right-hand rule over a → b → c).
  #[inline]
  pub fn normal(&self) -> DVec3 {
    (self.b - self.a).cross(self.c - self.a)
  }

  /// Surface area.
  pub fn area(&self) -> f64 {
    self.normal().length() / 2.0
  }
}

/// Axis-aligned bounding box with inverted-empty construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  pub min: DVec3,
  pub max: DVec3,
}

impl Aabb {
  /// Box with inverted extents, ready for encapsulation.
  pub fn empty() -> Self {
    Self {
      min: DVec3::splat(f64::INFINITY),
      max: DVec3::splat(f64::NEG_INFINITY),
    }
  }

  /// Expand to include a point.
  #[inline]
  pub fn encapsulate(&mut self, p: DVec3) {
    self.min = self.min.min(p);
    self.max = self.max.max(p);
  }

  /// True once at least one point has been encapsulated.
  pub fn is_valid(&self) -> bool {
    self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
  }
}

impl Default for Aabb {
  fn default() -> Self {
    Self::empty()
  }
}

/// Axis-aligned rectangle lying on a grid plane, kept separate from the
/// triangle stream so the merge pass can coalesce flat regions first.
///
/// `outward` is true when the object's outward normal points along +`axis`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisQuad {
  /// Normal axis of the plane the rectangle lies in.
  pub axis: Axis,
  /// Plane coordinate along `axis`.
  pub w: f64,
  /// In-plane lower corner (cyclic pair, see [`Axis::embed`]).
  pub min: DVec2,
  /// In-plane upper corner.
  pub max: DVec2,
  pub outward: bool,
}

impl AxisQuad {
  /// Corner points in emission order: counter-clockwise seen from the
  /// outward side, starting at the minimum corner.
  pub fn corners(&self) -> [DVec3; 4] {
    let c = [
      self.axis.embed(self.w, self.min),
      self.axis.embed(self.w, DVec2::new(self.max.x, self.min.y)),
      self.axis.embed(self.w, self.max),
      self.axis.embed(self.w, DVec2::new(self.min.x, self.max.y)),
    ];
    if self.outward {
      c
    } else {
      [c[0], c[3], c[2], c[1]]
    }
  }
}

/// Polygonization result: an ordered triangle soup with its bounds and the
/// sweep's counters.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh {
  pub triangles: Vec<Triangle>,
  /// Bounding box over every emitted vertex.
  pub bounds: Aabb,
  /// Counters and phase timings from the sweep that produced this mesh.
  pub stats: SweepStats,
}

impl TriangleMesh {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.triangles.is_empty()
  }

  pub fn triangle_count(&self) -> usize {
    self.triangles.len()
  }

  /// Append a triangle, growing the bounds.
  pub fn push(&mut self, tri: Triangle) {
    self.bounds.encapsulate(tri.a);
    self.bounds.encapsulate(tri.b);
    self.bounds.encapsulate(tri.c);
    self.triangles.push(tri);
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
