use nalgebra::SVector;

use crate::geometry::Hyperplane;

/// Generic axis-aligned bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// Creates the local box `[center - half_extents, center + half_extents]`.
    ///
    /// This is the convention used when decomposing along a path, where every
    /// waypoint only looks at obstacles within a fixed window around itself.
    pub fn around(center: [f64; D], half_extents: [f64; D]) -> Self {
        let mut min = [0.0; D];
        let mut max = [0.0; D];
        for i in 0..D {
            min[i] = center[i] - half_extents[i].abs();
            max[i] = center[i] + half_extents[i].abs();
        }
        Self { min, max }
    }

    /// Returns `true` if all bounds are finite and `min < max` on every axis.
    pub fn is_valid(&self) -> bool {
        (0..D).all(|i| self.min[i].is_finite() && self.max[i].is_finite() && self.min[i] < self.max[i])
    }

    /// Returns `true` if `point` lies in the open interior of the box.
    pub fn contains_strictly(&self, point: &[f64; D]) -> bool {
        (0..D).all(|i| point[i] > self.min[i] && point[i] < self.max[i])
    }

    pub fn center(&self) -> [f64; D] {
        let mut c = [0.0; D];
        for i in 0..D {
            c[i] = 0.5 * (self.min[i] + self.max[i]);
        }
        c
    }

    /// Hyper-volume of the box (area in 2D).
    pub fn volume(&self) -> f64 {
        (0..D).map(|i| self.max[i] - self.min[i]).product()
    }

    /// Distance from `point` to the nearest wall along each axis.
    pub(crate) fn wall_clearance(&self, point: &[f64; D]) -> [f64; D] {
        let mut clearance = [0.0; D];
        for i in 0..D {
            clearance[i] = (point[i] - self.min[i]).min(self.max[i] - point[i]);
        }
        clearance
    }

    /// The 2·D walls of the box as hyperplanes with outward normals, paired with
    /// their wall ids.
    ///
    /// Order: axis 0 min, axis 0 max, axis 1 min, axis 1 max, ...
    pub fn hyperplanes(&self) -> Vec<(Hyperplane<D>, i32)> {
        let mut planes = Vec::with_capacity(2 * D);
        for axis in 0..D {
            for is_max in [false, true] {
                let mut point = SVector::<f64, D>::from(self.center());
                let mut normal = SVector::<f64, D>::zeros();
                if is_max {
                    point[axis] = self.max[axis];
                    normal[axis] = 1.0;
                } else {
                    point[axis] = self.min[axis];
                    normal[axis] = -1.0;
                }
                planes.push((Hyperplane::new(point, normal), box_side(axis, is_max)));
            }
        }
        planes
    }
}

/// Calculates the ID for a bounding box wall based on the axis and direction.
///
/// The IDs start at -1 and decrease.
/// - Axis 0 (X) Min: -1
/// - Axis 0 (X) Max: -2
/// - Axis 1 (Y) Min: -3
/// - Axis 1 (Y) Max: -4
pub fn box_side(axis: usize, is_max: bool) -> i32 {
    -1 - (axis * 2 + if is_max { 1 } else { 0 }) as i32
}
