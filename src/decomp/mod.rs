//! Seed decomposition: carving a convex obstacle-free region around a point.
//!
//! The region starts as the bounding box. An ellipsoid centred on the seed,
//! initially the dilation radius clipped to the box, orders the obstacles by
//! their distance in the ellipsoid's own metric. The nearest obstacle not yet
//! excluded gets a separating hyperplane tangent to the ellipsoid's level set
//! just short of the obstacle. The ellipsoid then shrinks until it no longer
//! crosses the new plane. This repeats until every obstacle is excluded.

use nalgebra::{Const, DimMin};

use crate::bounds::BoundingBox;
use crate::ellipsoid::Ellipsoid;
use crate::error::DecompError;
use crate::geometry::{points_from_flat, to_points, Hyperplane, Point};
use crate::options::DecompOptions;
use crate::polyhedron::Polyhedron;

pub mod capacity;
pub mod path;

/// Decomposes free space around seed points for a fixed obstacle set.
///
/// Holds no state between calls: every decomposition owns its ellipsoid and
/// polyhedron, so one decomposer can serve many seeds from many threads.
#[derive(Clone, Debug)]
pub struct SeedDecomposer<const D: usize> {
    obstacles: Vec<Point<D>>,
    options: DecompOptions,
}

impl<const D: usize> SeedDecomposer<D>
where
    Const<D>: DimMin<Const<D>, Output = Const<D>>,
{
    pub fn new(obstacles: &[[f64; D]], options: DecompOptions) -> Result<Self, DecompError> {
        Self::from_points(to_points(obstacles), options)
    }

    /// Builds the decomposer from a flat `[x, y, (z,) x, y, (z,) ...]` buffer.
    pub fn from_flat(obstacles: &[f64], options: DecompOptions) -> Result<Self, DecompError> {
        Self::from_points(points_from_flat(obstacles), options)
    }

    pub fn from_points(obstacles: Vec<Point<D>>, options: DecompOptions) -> Result<Self, DecompError> {
        options.validate()?;
        if let Some(index) = obstacles.iter().position(|q| q.iter().any(|c| !c.is_finite())) {
            return Err(DecompError::NonFiniteObstacle { index });
        }
        Ok(Self { obstacles, options })
    }

    pub fn obstacles(&self) -> &[Point<D>] {
        &self.obstacles
    }

    pub fn options(&self) -> &DecompOptions {
        &self.options
    }

    /// Decomposes with unlimited capacity.
    pub fn decompose(&self, seed: &[f64; D], bounds: &BoundingBox<D>, dilation_radius: f64) -> Result<Polyhedron<D>, DecompError> {
        self.run(seed, bounds, dilation_radius, usize::MAX)
    }

    /// Decomposes but stops once `capacity` planes have been generated. The
    /// result is only guaranteed valid if fewer than `capacity` planes came
    /// out; see [`SeedDecomposer::decompose_with_capacity`].
    pub fn decompose_bounded(
        &self,
        seed: &[f64; D],
        bounds: &BoundingBox<D>,
        dilation_radius: f64,
        capacity: usize,
    ) -> Result<Polyhedron<D>, DecompError> {
        self.run(seed, bounds, dilation_radius, capacity)
    }

    fn run(&self, seed: &[f64; D], bounds: &BoundingBox<D>, dilation_radius: f64, capacity: usize) -> Result<Polyhedron<D>, DecompError> {
        if !bounds.is_valid() {
            return Err(DecompError::InvalidBoundingBox);
        }
        if !(dilation_radius.is_finite() && dilation_radius > 0.0) {
            return Err(DecompError::InvalidDilationRadius(dilation_radius));
        }
        if !bounds.contains_strictly(seed) {
            return Err(DecompError::SeedOutOfBounds { seed: seed.to_vec() });
        }

        let center = Point::from(*seed);
        let tolerance = self.options.degenerate_tolerance;
        for (index, q) in self.obstacles.iter().enumerate() {
            let distance = (q - center).norm();
            if distance <= tolerance {
                return Err(DecompError::DegenerateSeed { obstacle: index, distance });
            }
        }

        let clearance = bounds.wall_clearance(seed);
        let semi_axes = Point::<D>::from_fn(|i, _| dilation_radius.min(clearance[i]));
        let mut ellipsoid =
            Ellipsoid::from_semi_axes(center, semi_axes).ok_or_else(|| DecompError::SeedOutOfBounds { seed: seed.to_vec() })?;

        let mut polyhedron = Polyhedron::from_bounding_box(bounds, capacity.min(self.obstacles.len()));
        let mut remaining: Vec<usize> = (0..self.obstacles.len())
            .filter(|&i| polyhedron.contains(&self.obstacles[i]))
            .collect();

        let reach = 1.0 - self.options.boundary_margin;
        let mut generated = 0;
        while generated < capacity {
            let Some(slot) = closest_obstacle(&ellipsoid, &self.obstacles, &remaining) else {
                break;
            };
            let index = remaining[slot];
            let q = self.obstacles[index];
            let degenerate = || DecompError::DegenerateSeed {
                obstacle: index,
                distance: (q - center).norm(),
            };

            let anchor = center + (q - center) * reach;
            let normal = ellipsoid.tangent_normal(&anchor).ok_or_else(degenerate)?;
            let plane = Hyperplane::new(anchor, normal);
            if !plane.excludes(&q) {
                return Err(degenerate());
            }

            // A seed close to a wall starts with a thin ellipsoid. Only a cut that
            // takes it below the tolerance counts as a collapse.
            let thickness = ellipsoid.min_semi_axis();
            let scale = ellipsoid.shrink_to_exclude(&plane).ok_or_else(degenerate)?;
            if thickness >= tolerance && ellipsoid.min_semi_axis() < tolerance {
                return Err(degenerate());
            }
            debug_assert!(scale == 1.0 || (ellipsoid.closest_on_boundary(&q) - anchor).norm() <= 1e-9 * (1.0 + anchor.norm()));

            log::trace!(
                "obstacle {} cut at {:?} (ellipsoid distance {:.4}, scale {:.4})",
                index,
                anchor.as_slice(),
                ellipsoid.distance(&q),
                scale
            );

            polyhedron.add(plane, source_id(index)?);
            remaining.retain(|&i| plane.contains(&self.obstacles[i]));
            generated += 1;
        }

        if self.options.remove_redundant && remaining.is_empty() {
            let removed = polyhedron.remove_redundant(&self.obstacles, self.options.redundancy_tolerance);
            log::debug!("removed {} redundant hyperplanes", removed);
        }

        log::debug!(
            "decomposed seed {:?}: {} hyperplanes ({} generated, {} obstacles left)",
            seed,
            polyhedron.len(),
            generated,
            remaining.len()
        );
        Ok(polyhedron)
    }
}

/// Source id of the plane cut for obstacle `index`. Negative ids belong to box
/// walls, so indices must fit the non-negative range of `i32`.
fn source_id(index: usize) -> Result<i32, DecompError> {
    i32::try_from(index).map_err(|_| DecompError::ObstacleIndexOverflow { index })
}

/// Position in `remaining` of the obstacle nearest to the ellipsoid center in the
/// ellipsoid metric. Ties go to the smaller Euclidean distance, then to the
/// smaller obstacle index.
fn closest_obstacle<const D: usize>(ellipsoid: &Ellipsoid<D>, obstacles: &[Point<D>], remaining: &[usize]) -> Option<usize> {
    remaining
        .iter()
        .enumerate()
        .map(|(slot, &i)| {
            let q = &obstacles[i];
            (slot, ellipsoid.distance(q), (q - ellipsoid.center()).norm_squared(), i)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.2.total_cmp(&b.2)).then(a.3.cmp(&b.3)))
        .map(|(slot, ..)| slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(half: f64) -> BoundingBox<2> {
        BoundingBox::new([-half, -half], [half, half])
    }

    fn diamond_obstacles() -> Vec<[f64; 2]> {
        vec![[2.0, 0.0], [-2.0, 0.0], [0.0, 2.0], [0.0, -2.0]]
    }

    #[test]
    fn test_diamond_scenario() {
        let decomposer = SeedDecomposer::new(&diamond_obstacles(), DecompOptions::default()).unwrap();
        let poly = decomposer.decompose(&[0.0, 0.0], &square(5.0), 0.5).unwrap();

        assert_eq!(poly.generated_count(), 4);
        for (plane, source) in poly.generated() {
            let obstacle = decomposer.obstacles()[source];
            assert!((plane.point - obstacle).norm() < 1e-3);
            assert!(plane.excludes(&obstacle));
        }
        // Ties are resolved by input order.
        let order: Vec<usize> = poly.generated().map(|(_, s)| s).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert!(poly.area() < 16.0 + 1e-9);
        assert!(poly.area() < square(5.0).volume());
    }

    #[test]
    fn test_no_obstacles_yields_box() {
        let decomposer = SeedDecomposer::<2>::new(&[], DecompOptions::default()).unwrap();
        let poly = decomposer.decompose(&[1.0, 1.0], &square(5.0), 0.5).unwrap();
        assert_eq!(poly, Polyhedron::from_bounding_box(&square(5.0), 0));
    }

    #[test]
    fn test_seed_on_obstacle_is_degenerate() {
        let decomposer = SeedDecomposer::new(&diamond_obstacles(), DecompOptions::default()).unwrap();
        let err = decomposer.decompose(&[2.0, 0.0], &square(5.0), 0.5).unwrap_err();
        assert!(matches!(err, DecompError::DegenerateSeed { obstacle: 0, .. }));
    }

    #[test]
    fn test_seed_outside_box() {
        let decomposer = SeedDecomposer::new(&diamond_obstacles(), DecompOptions::default()).unwrap();
        let err = decomposer.decompose(&[6.0, 0.0], &square(5.0), 0.5).unwrap_err();
        assert!(matches!(err, DecompError::SeedOutOfBounds { .. }));
        let err = decomposer.decompose(&[5.0, 0.0], &square(5.0), 0.5).unwrap_err();
        assert!(matches!(err, DecompError::SeedOutOfBounds { .. }));
    }

    #[test]
    fn test_invalid_inputs() {
        let decomposer = SeedDecomposer::new(&diamond_obstacles(), DecompOptions::default()).unwrap();
        assert!(matches!(
            decomposer.decompose(&[0.0, 0.0], &square(5.0), 0.0),
            Err(DecompError::InvalidDilationRadius(_))
        ));
        assert!(matches!(
            decomposer.decompose(&[0.0, 0.0], &BoundingBox::new([1.0, 1.0], [-1.0, 2.0]), 0.5),
            Err(DecompError::InvalidBoundingBox)
        ));
        assert!(matches!(
            SeedDecomposer::new(&[[0.0, f64::INFINITY]], DecompOptions::default()),
            Err(DecompError::NonFiniteObstacle { index: 0 })
        ));
    }

    #[test]
    fn test_obstacles_outside_box_are_ignored() {
        let decomposer = SeedDecomposer::new(&[[7.0, 0.0], [0.0, -9.0]], DecompOptions::default()).unwrap();
        let poly = decomposer.decompose(&[0.0, 0.0], &square(5.0), 0.5).unwrap();
        assert_eq!(poly.generated_count(), 0);
    }

    #[test]
    fn test_obstacle_on_box_wall_gets_its_own_plane() {
        let decomposer = SeedDecomposer::new(&[[5.0, 0.0]], DecompOptions::default()).unwrap();
        let poly = decomposer.decompose(&[0.0, 0.0], &square(5.0), 0.5).unwrap();
        assert_eq!(poly.generated_count(), 1);
        assert!(poly.excludes(&Point::from([5.0, 0.0])));
    }

    #[test]
    fn test_shadowed_obstacle_needs_no_plane() {
        // The far obstacle hides behind the plane cut for the near one.
        let decomposer = SeedDecomposer::new(&[[3.0, 0.0], [1.0, 0.0]], DecompOptions::default()).unwrap();
        let poly = decomposer.decompose(&[0.0, 0.0], &square(5.0), 0.5).unwrap();
        assert_eq!(poly.generated_count(), 1);
        assert_eq!(poly.sources().last(), Some(&1));
    }

    #[test]
    fn test_ellipsoid_metric_orders_obstacles() {
        // Near a wall the ellipsoid is squashed along x, so the obstacle along y
        // is closer in its metric despite being farther away.
        let bounds = BoundingBox::new([-0.2, -5.0], [5.0, 5.0]);
        let decomposer = SeedDecomposer::new(&[[1.0, 0.0], [0.0, 1.5]], DecompOptions::default()).unwrap();
        let poly = decomposer.decompose(&[0.0, 0.0], &bounds, 1.0).unwrap();
        let order: Vec<usize> = poly.generated().map(|(_, s)| s).collect();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_closest_obstacle_tie_break() {
        let e = Ellipsoid::sphere(Point::from([0.0, 0.0]), 1.0).unwrap();
        let obstacles = [Point::from([0.0, 2.0]), Point::from([2.0, 0.0]), Point::from([1.0, 0.0])];
        assert_eq!(closest_obstacle(&e, &obstacles, &[0, 1, 2]), Some(2));
        assert_eq!(closest_obstacle(&e, &obstacles, &[1, 0]), Some(1));
        assert_eq!(closest_obstacle(&e, &obstacles, &[]), None);
    }

    #[test]
    fn test_seed_near_wall_ignores_unrelated_obstacles() {
        let seed = [-5.0 + 1e-10, 0.0];
        let decomposer = SeedDecomposer::<2>::new(&[], DecompOptions::default()).unwrap();
        let empty = decomposer.decompose(&seed, &square(5.0), 0.5).unwrap();
        assert_eq!(empty.generated_count(), 0);

        let decomposer = SeedDecomposer::new(&[[3.0, 0.0]], DecompOptions::default()).unwrap();
        let poly = decomposer.decompose(&seed, &square(5.0), 0.5).unwrap();
        assert_eq!(poly.generated_count(), 1);
        assert!(poly.contains(&Point::from(seed)));
        assert!(poly.excludes(&Point::from([3.0, 0.0])));
    }

    #[test]
    fn test_vanishing_gradient_is_degenerate() {
        // Passes the up-front distance check with a zero tolerance, but the
        // gradient at the anchor underflows.
        let options = DecompOptions {
            degenerate_tolerance: 0.0,
            ..DecompOptions::default()
        };
        let decomposer = SeedDecomposer::new(&[[3.0, 0.0], [1e-300, 0.0]], options).unwrap();
        let err = decomposer.decompose(&[0.0, 0.0], &square(5.0), 0.5).unwrap_err();
        assert!(matches!(err, DecompError::DegenerateSeed { obstacle: 1, .. }));
    }

    #[test]
    fn test_collapsing_cut_is_degenerate() {
        // The cut for the near obstacle shrinks the ellipsoid to 0.075 < 0.1.
        let options = DecompOptions {
            boundary_margin: 0.5,
            degenerate_tolerance: 0.1,
            ..DecompOptions::default()
        };
        let decomposer = SeedDecomposer::new(&[[4.0, 0.0], [0.15, 0.0]], options).unwrap();
        let err = decomposer.decompose(&[0.0, 0.0], &square(5.0), 0.5).unwrap_err();
        match err {
            DecompError::DegenerateSeed { obstacle, distance } => {
                assert_eq!(obstacle, 1);
                assert!((distance - 0.15).abs() < 1e-12);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_source_id_overflow() {
        assert_eq!(source_id(7).unwrap(), 7);
        assert_eq!(source_id(i32::MAX as usize).unwrap(), i32::MAX);
        assert!(matches!(
            source_id(i32::MAX as usize + 1),
            Err(DecompError::ObstacleIndexOverflow { .. })
        ));
    }

    #[test]
    fn test_bounded_run_truncates() {
        let decomposer = SeedDecomposer::new(&diamond_obstacles(), DecompOptions::default()).unwrap();
        let poly = decomposer.decompose_bounded(&[0.0, 0.0], &square(5.0), 0.5, 2).unwrap();
        assert_eq!(poly.generated_count(), 2);
    }

    #[test]
    fn test_remove_redundant_option() {
        let obstacles = [[1.0, 0.0], [1.0, 0.1], [1.0, -0.1], [1.0, 0.2]];
        let plain = SeedDecomposer::new(&obstacles, DecompOptions::default()).unwrap();
        let trimmed = SeedDecomposer::new(&obstacles, DecompOptions::default().with_remove_redundant(true)).unwrap();

        let a = plain.decompose(&[0.0, 0.0], &square(5.0), 0.5).unwrap();
        let b = trimmed.decompose(&[0.0, 0.0], &square(5.0), 0.5).unwrap();
        assert!(b.generated_count() <= a.generated_count());
        for q in trimmed.obstacles() {
            assert!(b.excludes(q));
        }
        assert!(b.contains(&Point::from([0.0, 0.0])));
    }
}
