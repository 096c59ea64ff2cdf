use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::bounds::BoundingBox;
use crate::decomp::SeedDecomposer;
use crate::geometry::Point;
use crate::options::DecompOptions;
use crate::polyhedron::Polyhedron;
use crate::wasm::utils::{flat_constraint_a, flat_constraint_b, flat_normals, flat_points, flatten, parse_js_points};

// --- Bounding Box ---

/// Represents an axis-aligned bounding box in 3D space.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox3D {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

#[wasm_bindgen]
impl BoundingBox3D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> BoundingBox3D {
        BoundingBox3D { min_x, min_y, min_z, max_x, max_y, max_z }
    }
}

impl From<BoundingBox3D> for BoundingBox<3> {
    fn from(b: BoundingBox3D) -> Self {
        Self {
            min: [b.min_x, b.min_y, b.min_z],
            max: [b.max_x, b.max_y, b.max_z],
        }
    }
}

// --- Region Wrapper ---

/// A decomposed 3D free-space region.
#[wasm_bindgen(js_name = Region3D)]
pub struct Region3D {
    inner: Polyhedron<3>,
}

#[wasm_bindgen(js_class = Region3D)]
impl Region3D {
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize { self.inner.len() }
    #[wasm_bindgen(getter)]
    pub fn generated_count(&self) -> usize { self.inner.generated_count() }
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> { flat_points(&self.inner) }
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> Vec<f64> { flat_normals(&self.inner) }
    #[wasm_bindgen(getter)]
    pub fn sources(&self) -> Vec<i32> { self.inner.sources().to_vec() }
    pub fn a(&self) -> Vec<f64> { flat_constraint_a(&self.inner) }
    pub fn b(&self) -> Vec<f64> { flat_constraint_b(&self.inner) }
    /// Corner points of the region as `[x, y, z, ...]`, in no particular order.
    pub fn vertices(&self) -> Vec<f64> { flatten(self.inner.vertices(1e-9).iter()) }
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool { self.inner.contains(&Point::from([x, y, z])) }
}

// --- Decomposer ---

#[wasm_bindgen(js_name = SeedDecomposer3D)]
pub struct SeedDecomposer3D {
    inner: SeedDecomposer<3>,
}

#[wasm_bindgen(js_class = SeedDecomposer3D)]
impl SeedDecomposer3D {
    #[wasm_bindgen(constructor)]
    pub fn new(obstacles: &[f64], max_poly: usize) -> Result<SeedDecomposer3D, JsError> {
        let options = DecompOptions::default().with_max_poly(max_poly);
        Ok(SeedDecomposer3D { inner: SeedDecomposer::from_flat(obstacles, options)? })
    }

    #[wasm_bindgen(js_name = fromPoints)]
    pub fn from_points(points: &Array, max_poly: usize) -> Result<SeedDecomposer3D, JsError> {
        let obstacles = parse_js_points::<3>(points)?;
        let options = DecompOptions::default().with_max_poly(max_poly);
        Ok(SeedDecomposer3D { inner: SeedDecomposer::new(&obstacles, options)? })
    }

    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(obstacles: &[f64], options: &str) -> Result<SeedDecomposer3D, JsError> {
        let options = DecompOptions::from_json(options)?;
        Ok(SeedDecomposer3D { inner: SeedDecomposer::from_flat(obstacles, options)? })
    }

    #[wasm_bindgen(getter)]
    pub fn count_obstacles(&self) -> usize { self.inner.obstacles().len() }

    pub fn decompose(&self, x: f64, y: f64, z: f64, bounds: BoundingBox3D, dilation_radius: f64) -> Result<Region3D, JsError> {
        let result = self.inner.decompose_with_capacity(&[x, y, z], &bounds.into(), dilation_radius)?;
        Ok(Region3D { inner: result.polyhedron })
    }

    #[wasm_bindgen(js_name = decomposePath)]
    pub fn decompose_path(
        &self,
        waypoints: &[f64],
        half_x: f64,
        half_y: f64,
        half_z: f64,
        dilation_radius: f64,
    ) -> Result<Vec<Region3D>, JsError> {
        let waypoints: Vec<[f64; 3]> = waypoints.chunks_exact(3).map(|w| [w[0], w[1], w[2]]).collect();
        self.inner
            .decompose_path(&waypoints, [half_x, half_y, half_z], dilation_radius)
            .into_iter()
            .map(|r| r.map(|inner| Region3D { inner }).map_err(JsError::from))
            .collect()
    }
}
