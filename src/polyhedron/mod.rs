use itertools::Itertools;
use nalgebra::{Const, DimMin, SMatrix};

use crate::bounds::{box_side, BoundingBox};
use crate::constraints::LinearConstraints;
use crate::geometry::{Hyperplane, Point};

pub mod d2;

/// Determinants below this mark a set of planes as having no unique
/// intersection point.
const DETERMINANT_EPSILON: f64 = 1e-12;

/// Convex region given as the intersection of the free sides of an ordered
/// sequence of hyperplanes.
///
/// Every plane carries a source id: the (negative) wall id from
/// [`box_side`] for bounding-box walls, or the index of the obstacle the plane
/// was generated for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyhedron<const D: usize> {
    hyperplanes: Vec<Hyperplane<D>>,
    sources: Vec<i32>,
}

impl<const D: usize> Polyhedron<D> {
    pub fn new() -> Self {
        Self {
            hyperplanes: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Starts a polyhedron from the walls of `bounds`, reserving room for
    /// `capacity` further planes.
    pub fn from_bounding_box(bounds: &BoundingBox<D>, capacity: usize) -> Self {
        let mut poly = Self {
            hyperplanes: Vec::with_capacity(2 * D + capacity),
            sources: Vec::with_capacity(2 * D + capacity),
        };
        for (plane, id) in bounds.hyperplanes() {
            poly.add(plane, id);
        }
        poly
    }

    pub fn add(&mut self, plane: Hyperplane<D>, source: i32) {
        self.hyperplanes.push(plane);
        self.sources.push(source);
    }

    pub fn hyperplanes(&self) -> &[Hyperplane<D>] {
        &self.hyperplanes
    }

    pub fn sources(&self) -> &[i32] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.hyperplanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hyperplanes.is_empty()
    }

    /// Number of planes that are not bounding-box walls.
    pub fn generated_count(&self) -> usize {
        self.sources.iter().filter(|&&s| s >= 0).count()
    }

    /// Generated planes with the index of the obstacle each was cut for.
    pub fn generated(&self) -> impl Iterator<Item = (&Hyperplane<D>, usize)> + '_ {
        self.hyperplanes
            .iter()
            .zip(&self.sources)
            .filter(|(_, s)| **s >= 0)
            .map(|(h, &s)| (h, s as usize))
    }

    /// `true` if no plane excludes `x`.
    pub fn contains(&self, x: &Point<D>) -> bool {
        self.hyperplanes.iter().all(|h| h.contains(x))
    }

    /// `true` if some plane strictly excludes `q`.
    pub fn excludes(&self, q: &Point<D>) -> bool {
        !self.contains(q)
    }

    pub fn points_inside(&self, points: &[Point<D>]) -> Vec<Point<D>> {
        points.iter().filter(|p| self.contains(p)).copied().collect()
    }

    /// Recovers the bounding box from the wall planes, if all 2·D are present.
    pub fn bounding_box(&self) -> Option<BoundingBox<D>> {
        let mut min = [0.0; D];
        let mut max = [0.0; D];
        for axis in 0..D {
            min[axis] = self.wall(box_side(axis, false))?.point[axis];
            max[axis] = self.wall(box_side(axis, true))?.point[axis];
        }
        Some(BoundingBox::new(min, max))
    }

    fn wall(&self, id: i32) -> Option<&Hyperplane<D>> {
        self.sources
            .iter()
            .position(|&s| s == id)
            .map(|i| &self.hyperplanes[i])
    }

    /// Dual `A x <= b` form. Row `i` corresponds to hyperplane `i`.
    pub fn to_linear_constraints(&self) -> LinearConstraints<D> {
        LinearConstraints::from_hyperplanes(&self.hyperplanes)
    }
}

impl<const D: usize> Polyhedron<D>
where
    Const<D>: DimMin<Const<D>, Output = Const<D>>,
{
    /// Vertices of the region: every intersection of D planes that satisfies all
    /// planes within `tolerance`. Near-duplicates are merged.
    pub fn vertices(&self, tolerance: f64) -> Vec<Point<D>> {
        let planes: Vec<&Hyperplane<D>> = self.hyperplanes.iter().collect();
        let mut vertices: Vec<Point<D>> = Vec::new();
        for v in enumerate_vertices(&planes, tolerance) {
            let merge = tolerance.max(1e-9) * (1.0 + v.norm());
            if vertices.iter().all(|w| (w - v).norm() > merge) {
                vertices.push(v);
            }
        }
        vertices
    }

    /// Drops generated planes implied by the remaining ones.
    ///
    /// A plane goes only if every vertex of the region cut by the other kept
    /// planes satisfies it and every obstacle it strictly excludes is strictly
    /// excluded by another kept plane. Wall planes always stay. Survivors keep
    /// their order. Returns the number of planes removed.
    pub fn remove_redundant(&mut self, obstacles: &[Point<D>], tolerance: f64) -> usize {
        let n = self.hyperplanes.len();
        let mut keep = vec![true; n];

        for i in 0..n {
            if self.sources[i] < 0 {
                continue;
            }
            let plane = &self.hyperplanes[i];
            let others: Vec<&Hyperplane<D>> = (0..n)
                .filter(|&j| j != i && keep[j])
                .map(|j| &self.hyperplanes[j])
                .collect();

            let vertices = enumerate_vertices(&others, tolerance);
            if vertices.is_empty() || vertices.iter().any(|v| plane.signed_distance(v) > tolerance) {
                continue;
            }

            let load_bearing = obstacles
                .iter()
                .any(|q| plane.excludes(q) && !others.iter().any(|h| h.excludes(q)));
            if load_bearing {
                continue;
            }

            log::trace!("plane {} (source {}) is redundant", i, self.sources[i]);
            keep[i] = false;
        }

        let mut flags = keep.iter();
        self.hyperplanes.retain(|_| *flags.next().unwrap_or(&true));
        let mut flags = keep.iter();
        self.sources.retain(|_| *flags.next().unwrap_or(&true));
        keep.iter().filter(|k| !**k).count()
    }
}

/// Solves every D-subset of `planes` for its intersection point and keeps the
/// points feasible for all planes.
fn enumerate_vertices<const D: usize>(planes: &[&Hyperplane<D>], tolerance: f64) -> Vec<Point<D>>
where
    Const<D>: DimMin<Const<D>, Output = Const<D>>,
{
    let mut vertices = Vec::new();
    for subset in (0..planes.len()).combinations(D) {
        let a = SMatrix::<f64, D, D>::from_fn(|r, c| planes[subset[r]].normal[c]);
        if a.determinant().abs() < DETERMINANT_EPSILON {
            continue;
        }
        let Some(inv) = a.try_inverse() else {
            continue;
        };
        let b = Point::<D>::from_fn(|r, _| planes[subset[r]].offset());
        let x = inv * b;
        if planes.iter().all(|h| h.signed_distance(&x) <= tolerance) {
            vertices.push(x);
        }
    }
    vertices
}
