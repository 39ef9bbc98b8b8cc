//! Zero-crossing location along a single grid edge.
//!
//! Hybrid root finder: regula falsi (secant on the signed endpoint values)
//! while it makes progress, guaranteed-halving bisection once it stagnates.
//! Secant alone collapses when the field is near-tangent at one end of the
//! edge -- a neighbouring coordinate dominates locally and the surface barely
//! dips across zero -- so progress is measured by how much each step shrinks
//! the bracketing value it replaces.

/// Secant steps before bisection takes over unconditionally.
const SECANT_STEPS: u32 = 4;

/// Bisection halvings before settling for the better endpoint.
const BISECTION_STEPS: u32 = 5;

/// A secant step counts as progress when the new bracketing value shrinks
/// below this fraction of the value it replaced.
const PROGRESS_RATIO: f64 = 0.3;

/// Locate the zero crossing between samples `(a, f_a)` and `(b, f_b)` of the
/// edge-restricted field `g`.
///
/// Always returns a coordinate in `[min(a, b), max(a, b)]` and evaluates `g`
/// at most 9 times. When the endpoint values do not straddle zero the result
/// is `a`; callers never read the entry in that case. Exact zeros
/// short-circuit to their endpoint, which also covers the degenerate
/// `f_a = f_b = 0` edge.
///
/// `_res` is the grid step along the edge, reserved for a resolution-scaled
/// stopping tolerance; it is not currently consulted.
pub fn interpolate<G: Fn(f64) -> f64>(a: (f64, f64), b: (f64, f64), g: G, _res: f64) -> f64 {
  let (pa, fa) = a;
  let (pb, fb) = b;
  if fa * fb > 0.0 {
    return pa;
  }
  if fa == 0.0 {
    return pa;
  }
  if fb == 0.0 {
    return pb;
  }
  // Order the bracket so the positive value comes first.
  if fa > 0.0 {
    secant(pa, fa, pb, fb, &g, 1)
  } else {
    secant(pb, fb, pa, fa, &g, 1)
  }
}

/// One regula-falsi step on a bracket with `fp > 0 > fm`.
fn secant<G: Fn(f64) -> f64>(p: f64, fp: f64, m: f64, fm: f64, g: &G, step: u32) -> f64 {
  let mid = p + (m - p) * fp / (fp - fm);
  let val = g(mid);
  if val == 0.0 {
    return mid;
  }

  // Replace the endpoint whose sign matches the new sample.
  let (p2, fp2, m2, fm2, replaced) = if val > 0.0 {
    (mid, val, m, fm, fp)
  } else {
    (p, fp, mid, val, fm)
  };

  if (val / replaced).abs() < PROGRESS_RATIO && step < SECANT_STEPS {
    secant(p2, fp2, m2, fm2, g, step + 1)
  } else {
    bisect(p2, fp2, m2, fm2, g, BISECTION_STEPS)
  }
}

/// Guaranteed-halving fallback; exhaustion returns the endpoint with the
/// smaller magnitude.
fn bisect<G: Fn(f64) -> f64>(p: f64, fp: f64, m: f64, fm: f64, g: &G, left: u32) -> f64 {
  if left == 0 {
    return if fp.abs() <= fm.abs() { p } else { m };
  }
  let mid = 0.5 * (p + m);
  let val = g(mid);
  if val == 0.0 {
    return mid;
  }
  if val > 0.0 {
    bisect(mid, val, m, fm, g, left - 1)
  } else {
    bisect(p, fp, mid, val, g, left - 1)
  }
}

#[cfg(test)]
#[path = "interpolate_test.rs"]
mod interpolate_test;
