//! Projection of geographic coordinates onto a reference sphere.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::geometry::point::{PointLonLat, PointXyz};

/// Mean Earth radius in metres, the value ORCA grid tooling conventionally
/// uses for its reference sphere.
pub const EARTH_RADIUS_M: f64 = 6_371_229.0;

/// A reference sphere mapping lon/lat degrees to Cartesian space.
///
/// The 3D degeneracy check is scale-invariant, so the radius only matters
/// to callers that reuse the projected coordinates for distances.
///
/// # Examples
///
/// ```rust
/// use orca_quad::geometry::sphere::Sphere;
/// use orca_quad::geometry::point::PointLonLat;
///
/// let sphere = Sphere::earth();
/// let origin = sphere.xyz(PointLonLat::new(0.0, 0.0));
/// assert!((origin.x - sphere.radius()).abs() < 1e-6);
/// assert!(origin.y.abs() < 1e-6 && origin.z.abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    radius: f64,
}

impl Sphere {
    /// A sphere with the given radius.
    #[inline]
    #[must_use]
    pub const fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// The Earth reference sphere ([`EARTH_RADIUS_M`]).
    #[inline]
    #[must_use]
    pub const fn earth() -> Self {
        Self::new(EARTH_RADIUS_M)
    }

    /// A unit sphere, convenient for scale-free tests.
    #[inline]
    #[must_use]
    pub const fn unit() -> Self {
        Self::new(1.0)
    }

    /// The sphere radius.
    #[inline]
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Project a lon/lat point (degrees) onto the sphere surface.
    ///
    /// Uses the conventional mapping `x = r·cosφ·cosλ`, `y = r·cosφ·sinλ`,
    /// `z = r·sinφ`. Deterministic for any finite input; longitudes outside
    /// `[-180, 180]` land where their wrapped equivalent would.
    #[must_use]
    pub fn xyz(&self, p: PointLonLat) -> PointXyz {
        let lambda = p.lon().to_radians();
        let phi = p.lat().to_radians();
        let r_cos_phi = self.radius * phi.cos();
        PointXyz::new(
            r_cos_phi * lambda.cos(),
            r_cos_phi * lambda.sin(),
            self.radius * phi.sin(),
        )
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::earth()
    }
}
