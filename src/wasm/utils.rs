use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::geometry::Point;
use crate::polyhedron::Polyhedron;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_BOUNDS: &'static str = r#"
export const BOX_ID_X_MIN = -1;
export const BOX_ID_X_MAX = -2;
export const BOX_ID_Y_MIN = -3;
export const BOX_ID_Y_MAX = -4;
export const BOX_ID_Z_MIN = -5;
export const BOX_ID_Z_MAX = -6;
"#;

pub fn parse_js_point<const D: usize>(val: &JsValue) -> Option<[f64; D]> {
    let arr = val.dyn_ref::<Array>()?;
    if arr.length() < D as u32 {
        return None;
    }
    let mut point = [0.0; D];
    for i in 0..D {
        point[i] = arr.get(i as u32).as_f64()?;
    }
    Some(point)
}

/// Parses a JS array of `[x, y(, z)]` arrays.
pub fn parse_js_points<const D: usize>(points: &Array) -> Result<Vec<[f64; D]>, JsError> {
    (0..points.length())
        .map(|i| {
            parse_js_point(&points.get(i))
                .ok_or_else(|| JsError::new(&format!("point {} is not an array of {} numbers", i, D)))
        })
        .collect()
}

pub fn flatten<'a, const D: usize>(points: impl Iterator<Item = &'a Point<D>>) -> Vec<f64> {
    points.flat_map(|p| p.iter().copied()).collect()
}

pub fn flat_points<const D: usize>(poly: &Polyhedron<D>) -> Vec<f64> {
    flatten(poly.hyperplanes().iter().map(|h| &h.point))
}

pub fn flat_normals<const D: usize>(poly: &Polyhedron<D>) -> Vec<f64> {
    flatten(poly.hyperplanes().iter().map(|h| &h.normal))
}

/// Row-major `A` of the dual form.
pub fn flat_constraint_a<const D: usize>(poly: &Polyhedron<D>) -> Vec<f64> {
    let constraints = poly.to_linear_constraints();
    let a = constraints.a();
    (0..a.nrows())
        .flat_map(|i| (0..D).map(move |j| a[(i, j)]))
        .collect()
}

pub fn flat_constraint_b<const D: usize>(poly: &Polyhedron<D>) -> Vec<f64> {
    poly.to_linear_constraints().b().iter().copied().collect()
}
