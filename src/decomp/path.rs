use nalgebra::{Const, DimMin};
use rayon::prelude::*;

use crate::bounds::BoundingBox;
use crate::decomp::SeedDecomposer;
use crate::error::DecompError;
use crate::options::DecompOptions;
use crate::polyhedron::Polyhedron;

impl<const D: usize> SeedDecomposer<D>
where
    Const<D>: DimMin<Const<D>, Output = Const<D>>,
{
    /// Decomposes every waypoint of a path inside its own local box of
    /// `half_extents`, in parallel. Results are in waypoint order and identical
    /// to decomposing the waypoints one after another.
    pub fn decompose_path(
        &self,
        waypoints: &[[f64; D]],
        half_extents: [f64; D],
        dilation_radius: f64,
    ) -> Vec<Result<Polyhedron<D>, DecompError>> {
        waypoints
            .par_iter()
            .map(|waypoint| {
                let bounds = BoundingBox::around(*waypoint, half_extents);
                self.decompose_with_capacity(waypoint, &bounds, dilation_radius)
                    .map(|d| d.polyhedron)
            })
            .collect()
    }
}

/// Safe corridor along `waypoints`: one polyhedron per waypoint.
///
/// Fails with the error of the first waypoint (in path order) that could not
/// be decomposed.
pub fn decompose_path<const D: usize>(
    waypoints: &[[f64; D]],
    obstacles: &[[f64; D]],
    half_extents: [f64; D],
    dilation_radius: f64,
    options: DecompOptions,
) -> Result<Vec<Polyhedron<D>>, DecompError>
where
    Const<D>: DimMin<Const<D>, Output = Const<D>>,
{
    let decomposer = SeedDecomposer::new(obstacles, options)?;
    decomposer
        .decompose_path(waypoints, half_extents, dilation_radius)
        .into_iter()
        .collect()
}
