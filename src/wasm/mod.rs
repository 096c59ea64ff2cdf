//! WebAssembly bindings for the 2D and 3D decomposers.

pub mod d2;
pub mod d3;
pub mod utils;
