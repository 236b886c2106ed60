//! # orca-quad
//!
//! Detection of geometrically invalid quadrilateral cells in ORCA-type
//! ocean/ice model grids.
//!
//! ORCA grids are tripolar, curvilinear global meshes. Their cells can
//! self-intersect, fold over the poles, or degenerate near grid seams (the
//! tripolar fold, and grid-specific artifacts at coarse resolution). This
//! crate provides the per-cell predicate a grid-construction pipeline calls
//! for every cell: given the four corner coordinates in lon/lat degrees
//! (ordered SW, SE, NE, NW), decide whether the cell is degenerate under a
//! combination of 2D-projected, 3D-embedded, and ORCA-specific heuristic
//! tests, and accumulate counts of why cells were rejected.
//!
//! # Features
//!
//! - Ordered rule chain returning a tagged [`CellVerdict`](detector::CellVerdict)
//!   (2D orientation, oversized diagonal, 3D sphere embedding, ORCA2 skew)
//! - Caller-owned [`Statistics`](detector::Statistics) accumulator with
//!   merge support for per-thread counting
//! - Typed, validated [`DetectorConfig`](detector::DetectorConfig)
//! - Self-contained spherical geometry: lon/lat points, longitude
//!   normalization, reference-sphere projection, and a 3D quadrilateral
//!   degeneracy test
//! - Serialization/Deserialization of the value types with
//!   [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use orca_quad::prelude::*;
//!
//! let detector = InvalidElementDetector::new(DetectorConfig {
//!     orca2: true,
//!     diagonal: 10.0,
//! })
//! .unwrap();
//!
//! let mut stats = Statistics::default();
//!
//! // The grid pipeline calls this once per cell.
//! let invalid = detector.invalid_element(
//!     PointLonLat::new(0.0, 0.0),
//!     PointLonLat::new(1.0, 0.0),
//!     PointLonLat::new(1.0, 1.0),
//!     PointLonLat::new(0.0, 1.0),
//!     &mut stats,
//! );
//! assert!(!invalid);
//!
//! // Or classify without touching counters.
//! let verdict = detector.classify(
//!     PointLonLat::new(0.0, 0.0),
//!     PointLonLat::new(1.0, 0.0),
//!     PointLonLat::new(1.0, -1.0),
//!     PointLonLat::new(0.0, 1.0),
//! );
//! assert_eq!(verdict, CellVerdict::Invalid2d);
//! ```
//!
//! # Classification invariants
//!
//! - The rule chain short-circuits: at most one rejection reason per call,
//!   so `invalid_elements` never double-counts a cell.
//! - Classification is a pure function of the corners and the immutable
//!   configuration; idempotent across calls.
//! - The ORCA2 skew heuristic increments only `invalid_elements` (no
//!   dedicated sub-counter), so the total may exceed the sum of the named
//!   sub-counters. This asymmetry is inherited deliberately.
//! - Concurrent use is safe with one [`Statistics`](detector::Statistics)
//!   per thread, merged afterward with `+`.

#![forbid(unsafe_code)]

/// The per-cell validity predicate and its configuration and statistics.
pub mod detector;

/// Geometric leaf types: lon/lat and Cartesian points, longitude
/// normalization, the reference sphere, and the 3D quadrilateral test.
pub mod geometry {
    pub mod longitude;
    pub mod point;
    pub mod quad;
    pub mod sphere;
    // Re-export the `geometry` modules.
    pub use self::longitude::*;
    pub use self::point::*;
    pub use self::quad::*;
    pub use self::sphere::*;
}

/// A prelude module that re-exports commonly used types.
pub mod prelude {
    pub use crate::detector::{
        CellVerdict, ConfigError, DetectorConfig, InvalidElementDetector, Statistics,
    };
    pub use crate::geometry::{
        longitude::NormaliseLongitude,
        point::{PointLonLat, PointXyz},
        quad::Quad3d,
        sphere::{Sphere, EARTH_RADIUS_M},
    };
}
