//! Geographic and Cartesian point types used by the cell checks.
//!
//! # Units
//!
//! [`PointLonLat`] stores plain floating-point degrees with no wrap-around
//! handling; callers that need a canonical longitude window apply
//! [`NormaliseLongitude`](crate::geometry::longitude::NormaliseLongitude)
//! explicitly. [`PointXyz`] is a Cartesian point on (or displacement near) a
//! reference sphere, produced by
//! [`Sphere::xyz`](crate::geometry::sphere::Sphere::xyz) and discarded after
//! the 3D check.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// LON/LAT POINT
// =============================================================================

/// A grid vertex in longitude/latitude degrees.
///
/// Points are immutable value types with no identity beyond their
/// coordinates; every check receives them by value.
///
/// # Examples
///
/// ```rust
/// use orca_quad::geometry::point::PointLonLat;
///
/// let p = PointLonLat::new(12.5, -45.0);
/// assert_eq!(p.lon(), 12.5);
/// assert_eq!(p.lat(), -45.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLonLat {
    lon: f64,
    lat: f64,
}

impl PointLonLat {
    /// Create a point from a longitude and a latitude in degrees.
    #[inline]
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Longitude in degrees.
    #[inline]
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    #[inline]
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Squared Euclidean distance between two points in degree space.
    ///
    /// This is deliberately *not* a great-circle metric: thresholds compared
    /// against it (the detector's `diagonal` option) are expressed in the
    /// same flat degree units.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orca_quad::geometry::point::PointLonLat;
    ///
    /// let a = PointLonLat::new(0.0, 0.0);
    /// let b = PointLonLat::new(3.0, 4.0);
    /// assert_eq!(PointLonLat::distance2(&a, &b), 25.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn distance2(a: &Self, b: &Self) -> f64 {
        let dlon = a.lon - b.lon;
        let dlat = a.lat - b.lat;
        dlon * dlon + dlat * dlat
    }
}

impl From<[f64; 2]> for PointLonLat {
    #[inline]
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self::new(lon, lat)
    }
}

impl fmt::Display for PointLonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

// =============================================================================
// CARTESIAN POINT
// =============================================================================

/// A Cartesian point in 3D space.
///
/// Doubles as a displacement vector: subtracting two points yields another
/// `PointXyz` carrying the edge vector, on which [`dot`](Self::dot) and
/// [`cross`](Self::cross) operate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointXyz {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl PointXyz {
    /// Create a point from its three components.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product with another vector.
    #[inline]
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another vector.
    #[inline]
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Euclidean norm.
    #[inline]
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl std::ops::Sub for PointXyz {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl fmt::Display for PointXyz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// =============================================================================
// TESTS
// =============================================================================
