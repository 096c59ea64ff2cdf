use nalgebra::{DMatrix, DVector};

use crate::geometry::{Hyperplane, Point};
use crate::polyhedron::Polyhedron;

/// A single inequality `a · x <= b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearConstraint<const D: usize> {
    pub a: Point<D>,
    pub b: f64,
}

impl<const D: usize> LinearConstraint<D> {
    pub fn new(a: Point<D>, b: f64) -> Self {
        Self { a, b }
    }

    pub fn from_hyperplane(plane: &Hyperplane<D>) -> Self {
        Self::new(plane.normal, plane.offset())
    }

    /// `a · x - b`; non-positive when `x` satisfies the constraint.
    pub fn evaluate(&self, x: &Point<D>) -> f64 {
        self.a.dot(x) - self.b
    }

    pub fn is_satisfied(&self, x: &Point<D>, tolerance: f64) -> bool {
        self.evaluate(x) <= tolerance
    }
}

/// Matrix form `A x <= b` of a polyhedron, for use as linear constraints in an
/// optimizer. `A` has one row per hyperplane and `D` columns.
///
/// This is an independent snapshot; later changes to the source polyhedron do
/// not reach it.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraints<const D: usize> {
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl<const D: usize> LinearConstraints<D> {
    pub fn from_hyperplanes(planes: &[Hyperplane<D>]) -> Self {
        let a = DMatrix::from_fn(planes.len(), D, |i, j| planes[i].normal[j]);
        let b = DVector::from_iterator(planes.len(), planes.iter().map(|h| h.offset()));
        Self { a, b }
    }

    /// Builds the constraints with every row oriented so that `interior` is
    /// feasible: rows violated by `interior` are negated.
    pub fn oriented_towards(polyhedron: &Polyhedron<D>, interior: &Point<D>) -> Self {
        let mut constraints = Self::from_hyperplanes(polyhedron.hyperplanes());
        for i in 0..constraints.rows() {
            if constraints.row(i).evaluate(interior) > 0.0 {
                let mut row = constraints.a.row_mut(i);
                row.neg_mut();
                constraints.b[i] = -constraints.b[i];
            }
        }
        constraints
    }

    pub fn rows(&self) -> usize {
        self.b.len()
    }

    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    pub fn b(&self) -> &DVector<f64> {
        &self.b
    }

    pub fn row(&self, i: usize) -> LinearConstraint<D> {
        LinearConstraint::new(Point::from_fn(|j, _| self.a[(i, j)]), self.b[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = LinearConstraint<D>> + '_ {
        (0..self.rows()).map(move |i| self.row(i))
    }

    /// `true` if every row holds at `x` within `tolerance`.
    pub fn contains(&self, x: &Point<D>, tolerance: f64) -> bool {
        self.iter().all(|c| c.is_satisfied(x, tolerance))
    }

    pub fn into_parts(self) -> (DMatrix<f64>, DVector<f64>) {
        (self.a, self.b)
    }
}

impl<const D: usize> From<&Polyhedron<D>> for LinearConstraints<D> {
    fn from(polyhedron: &Polyhedron<D>) -> Self {
        polyhedron.to_linear_constraints()
    }
}

/// Dual form of `polyhedron` as `(A, b)`.
pub fn to_linear_constraints<const D: usize>(polyhedron: &Polyhedron<D>) -> (DMatrix<f64>, DVector<f64>) {
    polyhedron.to_linear_constraints().into_parts()
}
