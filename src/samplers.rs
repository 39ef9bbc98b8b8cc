//! Analytic signed fields for tests, benches, and debugging.
//!
//! Deterministic shapes that are easy to verify by eye. Use them to exercise
//! the sweep without dragging in a full modeling front-end.

use glam::{DVec2, DVec3};

use crate::field::{Field2, Field3};

/// Sphere: Euclidean distance to the surface.
#[derive(Clone, Debug)]
pub struct Sphere {
  pub center: DVec3,
  pub radius: f64,
}

impl Sphere {
  pub fn new(radius: f64) -> Self {
    Self {
      center: DVec3::ZERO,
      radius,
    }
  }

  pub fn with_center(mut self, center: DVec3) -> Self {
    self.center = center;
    self
  }
}

impl Field3 for Sphere {
  fn evaluate(&self, p: DVec3) -> f64 {
    (p - self.center).length() - self.radius
  }
}

/// Axis-aligned cube under the Chebyshev norm:
/// `max(|x|, |y|, |z|) - half_extent`.
///
/// Exactly flat faces, which makes it the canonical stress test for quad
/// merging.
#[derive(Clone, Debug)]
pub struct Cube {
  pub center: DVec3,
  pub half_extent: f64,
}

impl Cube {
  pub fn new(half_extent: f64) -> Self {
    Self {
      center: DVec3::ZERO,
      half_extent,
    }
  }

  pub fn with_center(mut self, center: DVec3) -> Self {
    self.center = center;
    self
  }
}

impl Field3 for Cube {
  fn evaluate(&self, p: DVec3) -> f64 {
    let d = (p - self.center).abs();
    d.x.max(d.y).max(d.z) - self.half_extent
  }
}

/// Half-space on the back side of the plane `normal · p = offset`.
#[derive(Clone, Debug)]
pub struct HalfSpace {
  pub normal: DVec3,
  pub offset: f64,
}

impl HalfSpace {
  pub fn new(normal: DVec3, offset: f64) -> Self {
    Self { normal, offset }
  }
}

impl Field3 for HalfSpace {
  fn evaluate(&self, p: DVec3) -> f64 {
    p.dot(self.normal) - self.offset
  }
}

/// Torus around the Z axis.
#[derive(Clone, Debug)]
pub struct Torus {
  /// Distance from the axis to the tube center.
  pub major: f64,
  /// Tube radius.
  pub minor: f64,
}

impl Torus {
  pub fn new(major: f64, minor: f64) -> Self {
    Self { major, minor }
  }
}

impl Field3 for Torus {
  fn evaluate(&self, p: DVec3) -> f64 {
    let ring = DVec2::new(p.x, p.y).length() - self.major;
    DVec2::new(ring, p.z).length() - self.minor
  }
}

/// Circle: Euclidean distance to the rim.
#[derive(Clone, Debug)]
pub struct Circle {
  pub center: DVec2,
  pub radius: f64,
}

impl Circle {
  pub fn new(radius: f64) -> Self {
    Self {
      center: DVec2::ZERO,
      radius,
    }
  }

  pub fn with_center(mut self, center: DVec2) -> Self {
    self.center = center;
    self
  }
}

impl Field2 for Circle {
  fn evaluate(&self, p: DVec2) -> f64 {
    (p - self.center).length() - self.radius
  }
}

/// Ring between two concentric circles around the origin.
#[derive(Clone, Debug)]
pub struct Annulus {
  pub inner: f64,
  pub outer: f64,
}

impl Annulus {
  pub fn new(inner: f64, outer: f64) -> Self {
    Self { inner, outer }
  }
}

impl Field2 for Annulus {
  fn evaluate(&self, p: DVec2) -> f64 {
    let mid = (self.inner + self.outer) / 2.0;
    let half_width = (self.outer - self.inner) / 2.0;
    (p.length() - mid).abs() - half_width
  }
}
