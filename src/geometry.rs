use nalgebra::SVector;

/// A point (or displacement) in D-dimensional space.
pub type Point<const D: usize> = SVector<f64, D>;

/// Oriented boundary of a half-space, given by an anchor `point` on the plane
/// and a `normal` pointing towards the excluded side.
///
/// The free side is `{ x : normal · (x - point) <= 0 }`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hyperplane<const D: usize> {
    pub point: Point<D>,
    pub normal: Point<D>,
}

impl<const D: usize> Hyperplane<D> {
    pub fn new(point: Point<D>, normal: Point<D>) -> Self {
        Self { point, normal }
    }

    pub fn from_arrays(point: [f64; D], normal: [f64; D]) -> Self {
        Self::new(Point::from(point), Point::from(normal))
    }

    /// `normal · (q - point)`. Positive on the excluded side.
    ///
    /// This is a true Euclidean distance only when `normal` has unit length.
    #[inline]
    pub fn signed_distance(&self, q: &Point<D>) -> f64 {
        self.normal.dot(&(q - self.point))
    }

    /// Strict exclusion: points on the plane itself belong to the free side.
    #[inline]
    pub fn excludes(&self, q: &Point<D>) -> bool {
        self.signed_distance(q) > 0.0
    }

    #[inline]
    pub fn contains(&self, q: &Point<D>) -> bool {
        !self.excludes(q)
    }

    /// Offset of the plane in the dual form `normal · x <= offset`.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.normal.dot(&self.point)
    }
}

/// Converts a slice of coordinate arrays into points.
pub(crate) fn to_points<const D: usize>(coords: &[[f64; D]]) -> Vec<Point<D>> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

/// Converts a flat `[x, y, x, y, ...]` buffer into points, ignoring a trailing
/// partial coordinate.
pub(crate) fn points_from_flat<const D: usize>(flat: &[f64]) -> Vec<Point<D>> {
    flat.chunks_exact(D)
        .map(|chunk| Point::from_iterator(chunk.iter().copied()))
        .collect()
}
