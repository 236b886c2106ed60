//! Longitude normalization into a caller-chosen 360° window.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Maps any finite longitude into the closed window `[west, west + 360]`
/// by repeated ±360° shifts.
///
/// The window is half-open in spirit but closed in practice: a longitude
/// exactly equal to `west + 360` is left untouched, matching the behaviour
/// grid readers rely on for seam columns.
///
/// # Examples
///
/// ```rust
/// use orca_quad::geometry::longitude::NormaliseLongitude;
///
/// let normalise = NormaliseLongitude::new(-180.0);
/// assert_eq!(normalise.apply(190.0), -170.0);
/// assert_eq!(normalise.apply(-190.0), 170.0);
/// assert_eq!(normalise.apply(0.0), 0.0);
/// assert_eq!(normalise.apply(720.0), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormaliseLongitude {
    west: f64,
    east: f64,
}

impl NormaliseLongitude {
    /// Create a normalizer for the window starting at `west` degrees.
    #[inline]
    #[must_use]
    pub const fn new(west: f64) -> Self {
        Self {
            west,
            east: west + 360.0,
        }
    }

    /// Western edge of the window, in degrees.
    #[inline]
    #[must_use]
    pub const fn west(&self) -> f64 {
        self.west
    }

    /// Eastern edge of the window, in degrees.
    #[inline]
    #[must_use]
    pub const fn east(&self) -> f64 {
        self.east
    }

    /// Shift `lon` by multiples of 360° until it lies within the window.
    #[inline]
    #[must_use]
    pub fn apply(&self, mut lon: f64) -> f64 {
        while lon < self.west {
            lon += 360.0;
        }
        while lon > self.east {
            lon -= 360.0;
        }
        lon
    }
}

impl Default for NormaliseLongitude {
    /// The window `[-180, 180]`, centred on the Greenwich meridian.
    fn default() -> Self {
        Self::new(-180.0)
    }
}
