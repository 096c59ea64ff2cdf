//! Capacity-retry driver and the dimension-specialized entry points.
//!
//! Callers that must size a hyperplane buffer before the decomposition runs
//! pass a capacity hint (`max_poly`). A run that fills the buffer may have been
//! cut short, so it is repeated with twice the capacity until the result fits.
//! The final polyhedron is the same one an unbounded run produces.

use nalgebra::{Const, DimMin};

use crate::bounds::BoundingBox;
use crate::decomp::SeedDecomposer;
use crate::error::DecompError;
use crate::options::DecompOptions;
use crate::polyhedron::Polyhedron;

/// Result of a capacity-driven decomposition.
#[derive(Clone, Debug, PartialEq)]
pub struct Decomposition<const D: usize> {
    pub polyhedron: Polyhedron<D>,
    /// Number of runs it took, including the successful one.
    pub attempts: usize,
    /// Capacity of the successful run.
    pub capacity: usize,
}

impl<const D: usize> SeedDecomposer<D>
where
    Const<D>: DimMin<Const<D>, Output = Const<D>>,
{
    /// Runs the decomposition starting at the `max_poly` capacity, doubling it
    /// while the generated plane count meets or exceeds it.
    ///
    /// Fails with [`DecompError::RetryLimitExceeded`] after `max_retries`
    /// attempts instead of returning a possibly truncated region.
    pub fn decompose_with_capacity(
        &self,
        seed: &[f64; D],
        bounds: &BoundingBox<D>,
        dilation_radius: f64,
    ) -> Result<Decomposition<D>, DecompError> {
        let max_retries = self.options().max_retries;
        let mut capacity = self.options().initial_capacity();

        for attempt in 1..=max_retries {
            let polyhedron = self.decompose_bounded(seed, bounds, dilation_radius, capacity)?;
            let count = polyhedron.generated_count();
            if count < capacity {
                log::debug!("decomposition fit in capacity {} after {} attempt(s)", capacity, attempt);
                return Ok(Decomposition {
                    polyhedron,
                    attempts: attempt,
                    capacity,
                });
            }
            if attempt == max_retries {
                break;
            }
            let next = capacity.saturating_mul(2);
            log::warn!("{} hyperplanes filled capacity {}, rerunning with {}", count, capacity, next);
            capacity = next;
        }

        Err(DecompError::RetryLimitExceeded {
            attempts: max_retries,
            capacity,
        })
    }
}

/// Seed decomposition with default options and the given capacity hint.
///
/// Returns a polyhedron containing `seed`, inside `bounds`, that strictly
/// excludes every obstacle.
pub fn seed_decomp<const D: usize>(
    seed: [f64; D],
    obstacles: &[[f64; D]],
    bounds: &BoundingBox<D>,
    dilation_radius: f64,
    max_poly: usize,
) -> Result<Polyhedron<D>, DecompError>
where
    Const<D>: DimMin<Const<D>, Output = Const<D>>,
{
    let options = DecompOptions::default().with_max_poly(max_poly);
    SeedDecomposer::new(obstacles, options)?
        .decompose_with_capacity(&seed, bounds, dilation_radius)
        .map(|d| d.polyhedron)
}

pub fn seed_decomp_2d(
    seed: [f64; 2],
    obstacles: &[[f64; 2]],
    bounds: &BoundingBox<2>,
    dilation_radius: f64,
    max_poly: usize,
) -> Result<Polyhedron<2>, DecompError> {
    seed_decomp(seed, obstacles, bounds, dilation_radius, max_poly)
}

pub fn seed_decomp_3d(
    seed: [f64; 3],
    obstacles: &[[f64; 3]],
    bounds: &BoundingBox<3>,
    dilation_radius: f64,
    max_poly: usize,
) -> Result<Polyhedron<3>, DecompError> {
    seed_decomp(seed, obstacles, bounds, dilation_radius, max_poly)
}
