//! Caller-supplied implicit field interfaces.
//!
//! A field is a pure scalar function over space; the object is everything
//! where the value is <= 0. Fields must be re-entrant: the sweep evaluates
//! them concurrently from rayon workers. Values must be finite over the
//! query region -- NaN or infinite samples propagate into the caches and can
//! produce malformed segments.

use glam::{DVec2, DVec3};

use crate::types::Axis;

/// Scalar field over the plane.
pub trait Field2: Sync {
  fn evaluate(&self, p: DVec2) -> f64;
}

/// Scalar field over space.
pub trait Field3: Sync {
  fn evaluate(&self, p: DVec3) -> f64;
}

impl<F> Field2 for F
where
  F: Fn(DVec2) -> f64 + Sync,
{
  #[inline]
  fn evaluate(&self, p: DVec2) -> f64 {
    self(p)
  }
}

impl<F> Field3 for F
where
  F: Fn(DVec3) -> f64 + Sync,
{
  #[inline]
  fn evaluate(&self, p: DVec3) -> f64 {
    self(p)
  }
}

/// A 3D field restricted to an axis-aligned plane.
///
/// Captures the fixed axis and plane coordinate and exposes the field on the
/// cyclic in-plane pair (see [`Axis::embed`]). This is how cube faces are
/// marched with the 2D machinery.
pub struct PlaneSlice<'a, F: ?Sized> {
  field: &'a F,
  axis: Axis,
  w: f64,
}

impl<'a, F: Field3 + ?Sized> PlaneSlice<'a, F> {
  pub fn new(field: &'a F, axis: Axis, w: f64) -> Self {
    Self { field, axis, w }
  }
}

impl<F: Field3 + ?Sized> Field2 for PlaneSlice<'_, F> {
  #[inline]
  fn evaluate(&self, uv: DVec2) -> f64 {
    self.field.evaluate(self.axis.embed(self.w, uv))
  }
}
