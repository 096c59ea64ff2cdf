use nalgebra::SMatrix;

use crate::geometry::{Hyperplane, Point};

/// Norms below this are treated as zero when normalizing gradients.
const GRADIENT_EPSILON: f64 = 1e-14;

/// Growth primitive of the decomposition: the image of the unit ball under
/// `x ↦ center + shape · x`.
///
/// The inverse of `shape` is carried alongside it. The only mutation after
/// construction is uniform scaling, so both stay exact without ever
/// re-inverting a matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid<const D: usize> {
    center: Point<D>,
    shape: SMatrix<f64, D, D>,
    shape_inv: SMatrix<f64, D, D>,
    min_semi_axis: f64,
}

impl<const D: usize> Ellipsoid<D> {
    /// Creates an axis-aligned ellipsoid. Returns `None` if any semi-axis is not
    /// strictly positive and finite.
    pub fn from_semi_axes(center: Point<D>, semi_axes: Point<D>) -> Option<Self> {
        if semi_axes.iter().any(|&a| !(a.is_finite() && a > 0.0)) {
            return None;
        }
        let shape = SMatrix::<f64, D, D>::from_diagonal(&semi_axes);
        let shape_inv = SMatrix::<f64, D, D>::from_diagonal(&semi_axes.map(|a| 1.0 / a));
        Some(Self {
            center,
            shape,
            shape_inv,
            min_semi_axis: semi_axes.min(),
        })
    }

    pub fn sphere(center: Point<D>, radius: f64) -> Option<Self> {
        Self::from_semi_axes(center, Point::repeat(radius))
    }

    pub fn center(&self) -> &Point<D> {
        &self.center
    }

    pub fn shape(&self) -> &SMatrix<f64, D, D> {
        &self.shape
    }

    /// Length of the shortest principal semi-axis.
    pub fn min_semi_axis(&self) -> f64 {
        self.min_semi_axis
    }

    /// Generalized distance `|shape⁻¹ (q - center)|`. Values below 1 mean `q`
    /// lies strictly inside.
    pub fn distance(&self, q: &Point<D>) -> f64 {
        (self.shape_inv * (q - self.center)).norm()
    }

    pub fn contains(&self, q: &Point<D>) -> bool {
        self.distance(q) < 1.0
    }

    /// Boundary point on the ray from the center through `q`. Points inside the
    /// ellipsoid are their own tangency location and are returned unchanged.
    ///
    /// A query only: the decomposer places its anchors directly on the ray and
    /// lets `shrink_to_exclude` bring the boundary to them, so after a shrinking
    /// cut this point coincides with the cut's anchor.
    pub fn closest_on_boundary(&self, q: &Point<D>) -> Point<D> {
        let d = self.distance(q);
        if d < 1.0 || !d.is_finite() {
            return *q;
        }
        self.center + (q - self.center) / d
    }

    /// Outward unit normal of the level set of the ellipsoid's quadratic form
    /// passing through `q`, i.e. the normalized gradient
    /// `shape⁻ᵀ shape⁻¹ (q - center)`. `None` at the center.
    pub fn tangent_normal(&self, q: &Point<D>) -> Option<Point<D>> {
        let local = self.shape_inv * (q - self.center);
        (self.shape_inv.transpose() * local).try_normalize(GRADIENT_EPSILON)
    }

    /// Extent of the ellipsoid beyond its center along the unit `direction`.
    pub fn support(&self, direction: &Point<D>) -> f64 {
        (self.shape.transpose() * direction).norm()
    }

    /// Uniformly shrinks the ellipsoid about its center until it no longer
    /// reaches past `plane`. The result touches the plane from the free side.
    ///
    /// Returns the applied scale factor (1 when the ellipsoid already lies on
    /// the free side), or `None` if the center itself is not strictly on the
    /// free side, in which case no shrink can succeed and nothing changes.
    pub fn shrink_to_exclude(&mut self, plane: &Hyperplane<D>) -> Option<f64> {
        let gap = -plane.signed_distance(&self.center);
        if !(gap > 0.0) {
            return None;
        }
        let reach = self.support(&plane.normal) / plane.normal.norm();
        let gap = gap / plane.normal.norm();
        if reach <= gap {
            return Some(1.0);
        }
        let scale = gap / reach;
        self.shape *= scale;
        self.shape_inv /= scale;
        self.min_semi_axis *= scale;
        Some(scale)
    }
}
