//! Error types for cloth configuration.

use crate::grid::MAX_DENSITY;
use core::fmt;

/// Errors surfaced when configuring a cloth.
///
/// The numeric kernel itself never fails: degenerate geometry is handled by
/// fallbacks and a zero time step is a no-op. Only configuration that would
/// leave the simulation in an invalid state is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Grid density must lie in `1..=MAX_DENSITY`.
    InvalidDensity { density: usize },
    /// Scene identifier does not name a preset.
    UnknownScene { id: u32 },
    /// A tunable parameter was NaN, infinite or out of range.
    InvalidParameter { name: &'static str, reason: &'static str },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidDensity { density } => {
                write!(f, "grid density must be between 1 and {} (got {})", MAX_DENSITY, density)
            }
            ClothError::UnknownScene { id } => write!(f, "unknown scene id {}", id),
            ClothError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{}`: {}", name, reason)
            }
        }
    }
}

impl core::error::Error for ClothError {}
