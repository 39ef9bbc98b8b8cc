//! Error type for the sweep entry points.
//!
//! The pipeline itself is total: every stage produces a value for every
//! input. The only fallible surface is argument validation on entry.

use thiserror::Error;

/// Errors surfaced by the polygonization entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolygonizeError {
  /// The caller passed an argument the sweep cannot work with.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, PolygonizeError>;
