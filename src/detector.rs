//! Detection of geometrically invalid grid cells.
//!
//! ORCA grids are curvilinear, globally connected meshes whose quadrilateral
//! cells can self-intersect, fold over the poles, or degenerate near grid
//! seams. [`InvalidElementDetector`] is the per-cell predicate: given the
//! four corners of a cell (ordered SW, SE, NE, NW, in lon/lat degrees) it
//! classifies the cell under an ordered chain of rules and lets the caller
//! fold the verdict into a [`Statistics`] accumulator.
//!
//! # Rule order
//!
//! 1. **2D orientation** (only below 45° latitude, where longitude
//!    differences are trustworthy): any west/east latitude delta or
//!    north/south longitude delta below `-1e-10` means the projected quad is
//!    inverted.
//! 2. **Oversized diagonal** (only below 60° latitude, only with a
//!    configured threshold): the larger squared opposite-corner distance in
//!    degree space exceeding the squared threshold flags fold-over artifacts
//!    of extended grids.
//! 3. **3D embedding** (no latitude gate): the corners projected onto the
//!    reference sphere must form a simple convex [`Quad3d`].
//! 4. **ORCA2 skew heuristic** (opt-in, only below 60° latitude and near the
//!    Greenwich meridian): a known artifact of the coarse ORCA2 grid where
//!    one longitude delta exceeds twice the other.
//!
//! The chain short-circuits at the first rule that fires, so a cell is
//! counted at most once per call.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

use crate::geometry::longitude::NormaliseLongitude;
use crate::geometry::point::PointLonLat;
use crate::geometry::quad::Quad3d;
use crate::geometry::sphere::Sphere;

/// Absolute tolerance for the 2D orientation deltas, guarding against
/// floating-point noise on values that are mathematically exactly zero.
const ORIENTATION_TOLERANCE: f64 = 1e-10;

/// Latitude (degrees) above which the 2D orientation check is suppressed:
/// meridian convergence makes longitude differences unreliable there.
const LAT_GATE_2D: f64 = 45.0;

/// Latitude (degrees) above which the diagonal and ORCA2 checks are
/// suppressed.
const LAT_GATE_MID: f64 = 60.0;

/// Half-width (degrees) of the Greenwich-meridian window in which the ORCA2
/// skew heuristic applies.
const ORCA2_SEAM_HALF_WIDTH: f64 = 20.0;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Errors raised when validating a [`DetectorConfig`].
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    /// The diagonal threshold must be zero (disabled) or positive.
    #[error("diagonal threshold must be non-negative, got {value}")]
    NegativeDiagonal {
        /// The rejected threshold value.
        value: f64,
    },
    /// The diagonal threshold must be a finite number.
    #[error("diagonal threshold must be finite, got {value}")]
    NonFiniteDiagonal {
        /// The rejected threshold value.
        value: f64,
    },
}

/// Configuration for [`InvalidElementDetector`], fixed at construction.
///
/// # Examples
///
/// ```rust
/// use orca_quad::detector::DetectorConfig;
///
/// let config = DetectorConfig::default();
/// assert!(!config.orca2);
/// assert_eq!(config.diagonal, 0.0);
///
/// let tuned = DetectorConfig { orca2: true, diagonal: 10.0 };
/// assert!(tuned.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Enable the skew heuristic tuned for the coarse ORCA2 grid near the
    /// equator/Greenwich-meridian seam. Default `false`.
    pub orca2: bool,
    /// Largest acceptable straight-line distance between opposite corners,
    /// in degrees. `0` disables the check. Default `0`.
    pub diagonal: f64,
}

impl DetectorConfig {
    /// Check the configuration for values the detector cannot honour.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NegativeDiagonal`] for a diagonal threshold
    /// below zero and [`ConfigError::NonFiniteDiagonal`] for NaN or infinite
    /// thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.diagonal.is_finite() {
            return Err(ConfigError::NonFiniteDiagonal {
                value: self.diagonal,
            });
        }
        if self.diagonal < 0.0 {
            return Err(ConfigError::NegativeDiagonal {
                value: self.diagonal,
            });
        }
        Ok(())
    }
}

// =============================================================================
// VERDICT AND STATISTICS
// =============================================================================

/// The outcome of classifying one grid cell.
///
/// Exactly one variant applies per call: the rule chain short-circuits at
/// the first failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellVerdict {
    /// The cell passed every applicable rule.
    Valid,
    /// The projected 2D shape is inverted (rule 1).
    Invalid2d,
    /// An opposite-corner distance exceeds the configured threshold (rule 2).
    DiagonalTooLarge,
    /// The sphere-embedded quad is folded or self-intersecting (rule 3).
    Invalid3d,
    /// The ORCA2 near-seam longitude-skew heuristic fired (rule 4).
    OrcaSkew,
}

impl CellVerdict {
    /// Whether this verdict rejects the cell.
    #[inline]
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        !matches!(self, Self::Valid)
    }
}

impl fmt::Display for CellVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "VALID"),
            Self::Invalid2d => write!(f, "INVALID_QUAD_2D"),
            Self::DiagonalTooLarge => write!(f, "DIAGONAL_TOO_LARGE"),
            Self::Invalid3d => write!(f, "INVALID_QUAD_3D"),
            Self::OrcaSkew => write!(f, "ORCA2_SKEW"),
        }
    }
}

/// Running counts of why cells were rejected.
///
/// Caller-owned and monotonically incremented; the detector never resets
/// it. Concurrent use requires one accumulator per thread, merged afterward
/// with `+`/`+=`.
///
/// Note the asymmetry inherited from the original classification: the ORCA2
/// skew heuristic increments only [`invalid_elements`](Self::invalid_elements),
/// so `invalid_elements` can exceed the sum of the three named sub-counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Cells rejected by any rule.
    pub invalid_elements: u64,
    /// Cells rejected by the 3D embedding check.
    pub invalid_quads_3d: u64,
    /// Cells rejected by the 2D orientation check.
    pub invalid_quads_2d: u64,
    /// Cells rejected by the oversized-diagonal check.
    pub diagonal_too_large: u64,
}

impl Statistics {
    /// Fold a classification verdict into the counters.
    pub fn record(&mut self, verdict: CellVerdict) {
        match verdict {
            CellVerdict::Valid => {}
            CellVerdict::Invalid2d => {
                self.invalid_quads_2d += 1;
                self.invalid_elements += 1;
            }
            CellVerdict::DiagonalTooLarge => {
                self.diagonal_too_large += 1;
                self.invalid_elements += 1;
            }
            CellVerdict::Invalid3d => {
                self.invalid_quads_3d += 1;
                self.invalid_elements += 1;
            }
            // The skew heuristic has no dedicated sub-counter.
            CellVerdict::OrcaSkew => {
                self.invalid_elements += 1;
            }
        }
    }
}

impl Add for Statistics {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for Statistics {
    fn add_assign(&mut self, rhs: Self) {
        self.invalid_elements += rhs.invalid_elements;
        self.invalid_quads_3d += rhs.invalid_quads_3d;
        self.invalid_quads_2d += rhs.invalid_quads_2d;
        self.diagonal_too_large += rhs.diagonal_too_large;
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid elements: {} (2d: {}, 3d: {}, diagonal: {})",
            self.invalid_elements,
            self.invalid_quads_2d,
            self.invalid_quads_3d,
            self.diagonal_too_large
        )
    }
}

// =============================================================================
// DETECTOR
// =============================================================================

/// Per-cell validity predicate for ORCA grid construction.
///
/// Configured once, invoked once per cell. Classification is a pure function
/// of the four corner points and the immutable configuration; the only side
/// effect is the caller-supplied [`Statistics`] mutation in
/// [`invalid_element`](Self::invalid_element).
///
/// # Examples
///
/// ```rust
/// use orca_quad::prelude::*;
///
/// let detector = InvalidElementDetector::new(DetectorConfig::default()).unwrap();
/// let mut stats = Statistics::default();
///
/// // A well-formed 1°x1° cell at the equator.
/// let invalid = detector.invalid_element(
///     PointLonLat::new(0.0, 0.0),
///     PointLonLat::new(1.0, 0.0),
///     PointLonLat::new(1.0, 1.0),
///     PointLonLat::new(0.0, 1.0),
///     &mut stats,
/// );
/// assert!(!invalid);
/// assert_eq!(stats, Statistics::default());
///
/// // NE latitude below SE: the projected quad is inverted.
/// let invalid = detector.invalid_element(
///     PointLonLat::new(0.0, 0.0),
///     PointLonLat::new(1.0, 0.0),
///     PointLonLat::new(1.0, -1.0),
///     PointLonLat::new(0.0, 1.0),
///     &mut stats,
/// );
/// assert!(invalid);
/// assert_eq!(stats.invalid_quads_2d, 1);
/// assert_eq!(stats.invalid_elements, 1);
/// ```
#[derive(Clone, Debug)]
pub struct InvalidElementDetector {
    config: DetectorConfig,
    sphere: Sphere,
    normalise: NormaliseLongitude,
}

impl InvalidElementDetector {
    /// Build a detector from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is rejected by
    /// [`DetectorConfig::validate`].
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            sphere: Sphere::earth(),
            normalise: NormaliseLongitude::new(-180.0),
        })
    }

    /// The configuration this detector was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Classify one cell, corners ordered SW, SE, NE, NW.
    ///
    /// Pure: evaluates the rule chain in order and returns the first rule
    /// that fires, or [`CellVerdict::Valid`]. Use
    /// [`Statistics::record`] (or [`invalid_element`](Self::invalid_element))
    /// to accumulate counts.
    #[must_use]
    pub fn classify(
        &self,
        p_sw: PointLonLat,
        p_se: PointLonLat,
        p_ne: PointLonLat,
        p_nw: PointLonLat,
    ) -> CellVerdict {
        let lat_max = p_sw
            .lat()
            .max(p_se.lat())
            .max(p_ne.lat())
            .max(p_nw.lat());

        if lat_max < LAT_GATE_2D && Self::invalid_quad_2d(p_sw, p_se, p_ne, p_nw) {
            return CellVerdict::Invalid2d;
        }
        if lat_max < LAT_GATE_MID && self.diagonal_too_large(p_sw, p_se, p_ne, p_nw) {
            return CellVerdict::DiagonalTooLarge;
        }
        if self.invalid_quad_3d(p_sw, p_se, p_ne, p_nw) {
            return CellVerdict::Invalid3d;
        }
        if self.config.orca2
            && lat_max < LAT_GATE_MID
            && self.orca2_skewed(p_sw, p_se, p_ne, p_nw)
        {
            return CellVerdict::OrcaSkew;
        }
        CellVerdict::Valid
    }

    /// Classify one cell and fold the verdict into `statistics`.
    ///
    /// Returns `true` if the cell is invalid. At most one sub-counter and
    /// `invalid_elements` are incremented per call.
    pub fn invalid_element(
        &self,
        p_sw: PointLonLat,
        p_se: PointLonLat,
        p_ne: PointLonLat,
        p_nw: PointLonLat,
        statistics: &mut Statistics,
    ) -> bool {
        let verdict = self.classify(p_sw, p_se, p_ne, p_nw);
        statistics.record(verdict);
        verdict.is_invalid()
    }

    /// Classify one cell, discarding the statistics.
    #[must_use]
    pub fn invalid_element_unrecorded(
        &self,
        p_sw: PointLonLat,
        p_se: PointLonLat,
        p_ne: PointLonLat,
        p_nw: PointLonLat,
    ) -> bool {
        self.classify(p_sw, p_se, p_ne, p_nw).is_invalid()
    }

    /// Rule 1: inverted 2D orientation of the projected quad.
    fn invalid_quad_2d(
        p_sw: PointLonLat,
        p_se: PointLonLat,
        p_ne: PointLonLat,
        p_nw: PointLonLat,
    ) -> bool {
        let dlat_w = p_nw.lat() - p_sw.lat();
        let dlat_e = p_ne.lat() - p_se.lat();
        let dlon_n = p_ne.lon() - p_nw.lon();
        let dlon_s = p_se.lon() - p_sw.lon();
        dlat_w < -ORIENTATION_TOLERANCE
            || dlat_e < -ORIENTATION_TOLERANCE
            || dlon_n < -ORIENTATION_TOLERANCE
            || dlon_s < -ORIENTATION_TOLERANCE
    }

    /// Rule 2: an opposite-corner distance beyond the configured maximum.
    fn diagonal_too_large(
        &self,
        p_sw: PointLonLat,
        p_se: PointLonLat,
        p_ne: PointLonLat,
        p_nw: PointLonLat,
    ) -> bool {
        if self.config.diagonal == 0.0 {
            return false;
        }
        // Squared comparison: extended grids fold over themselves, and the
        // fold shows up as an implausibly long diagonal.
        let threshold2 = self.config.diagonal * self.config.diagonal;
        let d2_nw_se = PointLonLat::distance2(&p_nw, &p_se);
        let d2_sw_ne = PointLonLat::distance2(&p_sw, &p_ne);
        d2_nw_se.max(d2_sw_ne) > threshold2
    }

    /// Rule 3: the sphere-embedded quad is not simple and convex.
    fn invalid_quad_3d(
        &self,
        p_sw: PointLonLat,
        p_se: PointLonLat,
        p_ne: PointLonLat,
        p_nw: PointLonLat,
    ) -> bool {
        let quad = Quad3d::new(
            self.sphere.xyz(p_sw),
            self.sphere.xyz(p_se),
            self.sphere.xyz(p_ne),
            self.sphere.xyz(p_nw),
        );
        !quad.validate()
    }

    /// Rule 4: anomalous longitude skew near the Greenwich seam (ORCA2).
    fn orca2_skewed(
        &self,
        p_sw: PointLonLat,
        p_se: PointLonLat,
        p_ne: PointLonLat,
        p_nw: PointLonLat,
    ) -> bool {
        let lon_min = self.normalise.apply(
            p_sw.lon()
                .min(p_se.lon())
                .min(p_ne.lon())
                .min(p_nw.lon()),
        );
        if lon_min <= -ORCA2_SEAM_HALF_WIDTH || lon_min >= ORCA2_SEAM_HALF_WIDTH {
            return false;
        }
        let dlon_n = p_ne.lon() - p_nw.lon();
        let dlon_s = p_se.lon() - p_sw.lon();
        dlon_n.max(dlon_s) > 2.0 * dlon_n.min(dlon_s)
    }
}

// =============================================================================
// TESTS
// =============================================================================
