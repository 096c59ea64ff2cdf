//! # seed_decomp
//!
//! `seed_decomp` computes convex approximations of obstacle-free space around seed
//! points, for use as safe corridors in motion planning. It runs natively as well
//! as compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Seed decomposition**: an ellipsoid grown from the seed orders the obstacles and
//!   yields separating hyperplanes until every obstacle is excluded.
//! - **2D and 3D**: all geometry is generic over the dimension, with dedicated
//!   [`seed_decomp_2d`] and [`seed_decomp_3d`] entry points.
//! - **Linear constraints**: regions convert to the `A x <= b` form consumed by
//!   trajectory optimizers.
//! - **Capacity hints**: callers that size buffers up front pass `max_poly`; the
//!   decomposition reruns with a larger capacity until the result fits.
//! - **Parallel corridors**: whole paths are decomposed waypoint by waypoint with `rayon`.
//!
//! ## Example
//!
//! ```
//! use seed_decomp::{seed_decomp_2d, BoundingBox};
//!
//! let obstacles = [[2.0, 0.0], [-2.0, 0.0], [0.0, 2.0], [0.0, -2.0]];
//! let bounds = BoundingBox::new([-5.0, -5.0], [5.0, 5.0]);
//! let region = seed_decomp_2d([0.0, 0.0], &obstacles, &bounds, 0.5, 1).unwrap();
//!
//! assert_eq!(region.generated_count(), 4);
//! let (a, b) = seed_decomp::to_linear_constraints(&region);
//! assert_eq!(a.nrows(), b.len());
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`SeedDecomposer`] struct, which holds the obstacles
//! and options and decomposes any number of seeds.

mod bounds;
mod constraints;
mod decomp;
mod ellipsoid;
mod error;
mod geometry;
mod options;
mod polyhedron;
pub mod wasm;

pub use bounds::box_side;
pub use bounds::BoundingBox;
pub use constraints::to_linear_constraints;
pub use constraints::LinearConstraint;
pub use constraints::LinearConstraints;
pub use decomp::capacity::seed_decomp;
pub use decomp::capacity::seed_decomp_2d;
pub use decomp::capacity::seed_decomp_3d;
pub use decomp::capacity::Decomposition;
pub use decomp::path::decompose_path;
pub use decomp::SeedDecomposer;
pub use ellipsoid::Ellipsoid;
pub use error::DecompError;
pub use geometry::Hyperplane;
pub use geometry::Point;
pub use options::DecompOptions;
pub use polyhedron::Polyhedron;
