use std::cell::Cell;

use super::*;

#[test]
fn linear_fields_are_located_exactly() {
  for c in [0.01, 0.5, 0.99] {
    let g = |t: f64| t - c;
    let x = interpolate((0.0, g(0.0)), (1.0, g(1.0)), g, 0.1);
    assert!((x - c).abs() < 1e-6, "c = {c}, got {x}");
  }
}

#[test]
fn dyadic_linear_root_is_bit_exact() {
  let g = |t: f64| t - 0.5;
  assert_eq!(interpolate((0.0, -0.5), (1.0, 0.5), g, 0.1), 0.5);
}

#[test]
fn near_tangent_fields_still_converge() {
  // Tiny slope: the bracketing values barely shrink in absolute terms, which
  // is exactly the regime the bisection fallback exists for.
  let eps = 1e-8;
  for c in [0.1, 0.5, 0.9] {
    let g = move |t: f64| eps * (t - c);
    let x = interpolate((0.0, g(0.0)), (1.0, g(1.0)), g, 0.1);
    assert!((x - c).abs() < 1e-6, "c = {c}, got {x}");
  }
}

#[test]
fn cubic_tangency_stays_bracketed() {
  let g = |t: f64| (t - 0.5).powi(3);
  let x = interpolate((0.0, g(0.0)), (1.0, g(1.0)), g, 0.1);
  assert!((0.0..=1.0).contains(&x));
  assert!((x - 0.5).abs() < 0.1, "got {x}");
}

#[test]
fn result_stays_inside_the_bracket() {
  let g = |t: f64| (3.7 * t).sin();
  let root = std::f64::consts::PI / 3.7;
  for (a, b) in [(0.5, 1.2), (1.2, 0.5), (0.2, 1.0)] {
    let x = interpolate((a, g(a)), (b, g(b)), g, 0.1);
    assert!(x >= a.min(b) && x <= a.max(b));
    assert!((x - root).abs() < 1e-3, "got {x}, root {root}");
  }
}

#[test]
fn never_evaluates_more_than_nine_times() {
  let cases: Vec<Box<dyn Fn(f64) -> f64>> = vec![
    Box::new(|t| t - 0.3),
    Box::new(|t| (t - 0.5).powi(3)),
    Box::new(|t| 1e-8 * (t - 0.9)),
    Box::new(|t| t.tanh() - 0.46),
    Box::new(|t| (t - 0.01).powi(5)),
  ];
  for g in &cases {
    let count = Cell::new(0u32);
    let counted = |t: f64| {
      count.set(count.get() + 1);
      g(t)
    };
    let x = interpolate((0.0, g(0.0)), (1.0, g(1.0)), counted, 0.1);
    assert!(count.get() <= 9, "used {} evaluations", count.get());
    assert!((0.0..=1.0).contains(&x));
  }
}

#[test]
fn degenerate_inputs_return_an_endpoint() {
  let g = |_: f64| 1.0;
  // No sign change: first endpoint, value never used by callers.
  assert_eq!(interpolate((2.0, 1.0), (3.0, 1.0), g, 0.1), 2.0);
  // Exact zeros short-circuit.
  assert_eq!(interpolate((2.0, 0.0), (3.0, 5.0), g, 0.1), 2.0);
  assert_eq!(interpolate((2.0, 5.0), (3.0, 0.0), g, 0.1), 3.0);
  // Both endpoints on the surface.
  assert_eq!(interpolate((2.0, 0.0), (3.0, 0.0), g, 0.1), 2.0);
}
