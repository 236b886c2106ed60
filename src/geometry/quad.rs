//! 3D quadrilateral degeneracy test.
//!
//! A grid cell whose flat lon/lat projection looks acceptable can still be
//! folded or self-intersecting once embedded on the sphere (tripolar fold,
//! grid seams). [`Quad3d::validate`] catches those cases.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::geometry::point::PointXyz;

/// A quadrilateral in 3D space, corners in perimeter order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad3d {
    corners: [PointXyz; 4],
}

impl Quad3d {
    /// Build a quad from four corners in perimeter order.
    #[inline]
    #[must_use]
    pub const fn new(p0: PointXyz, p1: PointXyz, p2: PointXyz, p3: PointXyz) -> Self {
        Self {
            corners: [p0, p1, p2, p3],
        }
    }

    /// The corners in the order they were given.
    #[inline]
    #[must_use]
    pub const fn corners(&self) -> &[PointXyz; 4] {
        &self.corners
    }

    /// Check that the quad is simple and convex.
    ///
    /// Computes the normal of the triangle at each corner (the two edges
    /// leaving that corner, crossed). For a simple convex quad all four
    /// normals point the same way; a bowtie or a reflex corner flips at
    /// least one of them. The test is winding-agnostic: reversing the whole
    /// perimeter flips every normal at once and still passes.
    ///
    /// Degenerate corners (collinear edges) produce a zero normal, which is
    /// treated as agreeing with everything; the flat 2D checks upstream are
    /// responsible for those.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orca_quad::geometry::point::PointXyz;
    /// use orca_quad::geometry::quad::Quad3d;
    ///
    /// let square = Quad3d::new(
    ///     PointXyz::new(0.0, 0.0, 0.0),
    ///     PointXyz::new(1.0, 0.0, 0.0),
    ///     PointXyz::new(1.0, 1.0, 0.0),
    ///     PointXyz::new(0.0, 1.0, 0.0),
    /// );
    /// assert!(square.validate());
    ///
    /// // Swap the two northern corners: the perimeter crosses itself.
    /// let bowtie = Quad3d::new(
    ///     PointXyz::new(0.0, 0.0, 0.0),
    ///     PointXyz::new(1.0, 0.0, 0.0),
    ///     PointXyz::new(0.0, 1.0, 0.0),
    ///     PointXyz::new(1.0, 1.0, 0.0),
    /// );
    /// assert!(!bowtie.validate());
    /// ```
    #[must_use]
    pub fn validate(&self) -> bool {
        let [p0, p1, p2, p3] = self.corners;

        let n0 = (p1 - p0).cross(&(p3 - p0));
        let n1 = (p2 - p1).cross(&(p0 - p1));
        let n2 = (p3 - p2).cross(&(p1 - p2));
        let n3 = (p0 - p3).cross(&(p2 - p3));

        // All pairwise dot products non-negative <=> corner normals agree.
        n0.dot(&n1) >= 0.0
            && n1.dot(&n2) >= 0.0
            && n2.dot(&n3) >= 0.0
            && n3.dot(&n0) >= 0.0
            && n0.dot(&n2) >= 0.0
            && n1.dot(&n3) >= 0.0
    }
}
