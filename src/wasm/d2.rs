use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::bounds::BoundingBox;
use crate::decomp::SeedDecomposer;
use crate::geometry::Point;
use crate::options::DecompOptions;
use crate::polyhedron::Polyhedron;
use crate::wasm::utils::{flat_constraint_a, flat_constraint_b, flat_normals, flat_points, parse_js_points};

// --- Bounding Box ---

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen]
impl BoundingBox2D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox2D {
        BoundingBox2D { min_x, min_y, max_x, max_y }
    }
}

impl From<BoundingBox2D> for BoundingBox<2> {
    fn from(b: BoundingBox2D) -> Self {
        Self { min: [b.min_x, b.min_y], max: [b.max_x, b.max_y] }
    }
}

// --- Region Wrapper ---

/// A decomposed 2D free-space region.
#[wasm_bindgen(js_name = Region2D)]
pub struct Region2D {
    inner: Polyhedron<2>,
}

#[wasm_bindgen(js_class = Region2D)]
impl Region2D {
    /// Number of hyperplanes, bounding-box walls included.
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize { self.inner.len() }
    #[wasm_bindgen(getter)]
    pub fn generated_count(&self) -> usize { self.inner.generated_count() }
    /// Anchor points as `[x, y, x, y, ...]`.
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> { flat_points(&self.inner) }
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> Vec<f64> { flat_normals(&self.inner) }
    /// Wall id (negative) or obstacle index for each hyperplane.
    #[wasm_bindgen(getter)]
    pub fn sources(&self) -> Vec<i32> { self.inner.sources().to_vec() }
    /// Row-major `A` of `A x <= b`.
    pub fn a(&self) -> Vec<f64> { flat_constraint_a(&self.inner) }
    pub fn b(&self) -> Vec<f64> { flat_constraint_b(&self.inner) }
    /// Boundary loop as `[x, y, x, y, ...]`, counter-clockwise.
    pub fn polygon(&self) -> Vec<f64> { self.inner.polygon().into_iter().flatten().collect() }
    pub fn area(&self) -> f64 { self.inner.area() }
    pub fn contains(&self, x: f64, y: f64) -> bool { self.inner.contains(&Point::from([x, y])) }
}

// --- Decomposer ---

#[wasm_bindgen(js_name = SeedDecomposer2D)]
pub struct SeedDecomposer2D {
    inner: SeedDecomposer<2>,
}

#[wasm_bindgen(js_class = SeedDecomposer2D)]
impl SeedDecomposer2D {
    /// Creates a decomposer from flat `[x, y, x, y, ...]` obstacle coordinates.
    #[wasm_bindgen(constructor)]
    pub fn new(obstacles: &[f64], max_poly: usize) -> Result<SeedDecomposer2D, JsError> {
        let options = DecompOptions::default().with_max_poly(max_poly);
        Ok(SeedDecomposer2D { inner: SeedDecomposer::from_flat(obstacles, options)? })
    }

    /// Creates a decomposer from `[[x1, y1], [x2, y2], ...]`.
    #[wasm_bindgen(js_name = fromPoints)]
    pub fn from_points(points: &Array, max_poly: usize) -> Result<SeedDecomposer2D, JsError> {
        let obstacles = parse_js_points::<2>(points)?;
        let options = DecompOptions::default().with_max_poly(max_poly);
        Ok(SeedDecomposer2D { inner: SeedDecomposer::new(&obstacles, options)? })
    }

    /// Creates a decomposer with options given as a JSON document.
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(obstacles: &[f64], options: &str) -> Result<SeedDecomposer2D, JsError> {
        let options = DecompOptions::from_json(options)?;
        Ok(SeedDecomposer2D { inner: SeedDecomposer::from_flat(obstacles, options)? })
    }

    #[wasm_bindgen(getter)]
    pub fn count_obstacles(&self) -> usize { self.inner.obstacles().len() }

    pub fn decompose(&self, x: f64, y: f64, bounds: BoundingBox2D, dilation_radius: f64) -> Result<Region2D, JsError> {
        let result = self.inner.decompose_with_capacity(&[x, y], &bounds.into(), dilation_radius)?;
        Ok(Region2D { inner: result.polyhedron })
    }

    /// Decomposes every waypoint of `[x, y, x, y, ...]` inside a local box of the
    /// given half extents.
    #[wasm_bindgen(js_name = decomposePath)]
    pub fn decompose_path(&self, waypoints: &[f64], half_x: f64, half_y: f64, dilation_radius: f64) -> Result<Vec<Region2D>, JsError> {
        let waypoints: Vec<[f64; 2]> = waypoints.chunks_exact(2).map(|w| [w[0], w[1]]).collect();
        self.inner
            .decompose_path(&waypoints, [half_x, half_y], dilation_radius)
            .into_iter()
            .map(|r| r.map(|inner| Region2D { inner }).map_err(JsError::from))
            .collect()
    }
}
