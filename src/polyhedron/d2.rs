use crate::polyhedron::Polyhedron;

/// Planar view of a 2D region: its boundary as a counter-clockwise loop.
impl Polyhedron<2> {
    /// Boundary vertices of the region, counter-clockwise.
    ///
    /// Built by clipping the bounding rectangle with every generated plane, so it
    /// is empty if the polyhedron has no complete set of box walls.
    pub fn polygon(&self) -> Vec<[f64; 2]> {
        let Some(bounds) = self.bounding_box() else {
            return Vec::new();
        };

        let mut vertices = vec![
            bounds.min[0], bounds.min[1], // 0: Bottom-Left
            bounds.max[0], bounds.min[1], // 1: Bottom-Right
            bounds.max[0], bounds.max[1], // 2: Top-Right
            bounds.min[0], bounds.max[1], // 3: Top-Left
        ];
        let mut scratch = Vec::with_capacity(vertices.len());
        let mut dists = Vec::new();

        for (plane, _) in self.generated() {
            let point = [plane.point[0], plane.point[1]];
            let normal = [plane.normal[0], plane.normal[1]];
            clip_polygon(&mut vertices, &mut scratch, &mut dists, &point, &normal);
            if vertices.is_empty() {
                break;
            }
        }

        vertices.chunks_exact(2).map(|v| [v[0], v[1]]).collect()
    }

    pub fn area(&self) -> f64 {
        let poly = self.polygon();
        let n = poly.len();
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += poly[i][0] * poly[j][1] - poly[j][0] * poly[i][1];
        }
        (area * 0.5).abs()
    }
}

/// Clips a flat `[x, y, x, y, ...]` polygon in place, keeping the side where
/// `normal · (v - point) <= 0`.
fn clip_polygon(vertices: &mut Vec<f64>, scratch: &mut Vec<f64>, dists: &mut Vec<f64>, point: &[f64; 2], normal: &[f64; 2]) {
    let [px, py] = *point;
    let [nx, ny] = *normal;

    let num_verts = vertices.len() / 2;
    if num_verts < 3 {
        vertices.clear();
        return;
    }

    dists.clear();
    let mut all_inside = true;
    let mut all_outside = true;
    for i in 0..num_verts {
        let d = (vertices[i * 2] - px) * nx + (vertices[i * 2 + 1] - py) * ny;
        dists.push(d);
        if d > 1e-9 {
            all_inside = false;
        } else if d < -1e-9 {
            all_outside = false;
        }
    }

    if all_inside {
        return;
    }
    if all_outside {
        vertices.clear();
        return;
    }

    scratch.clear();
    for i in 0..num_verts {
        let j = (i + 1) % num_verts;
        let d_i = dists[i];
        let d_j = dists[j];
        let i_in = d_i <= 1e-9;
        let j_in = d_j <= 1e-9;

        if i_in {
            scratch.push(vertices[i * 2]);
            scratch.push(vertices[i * 2 + 1]);
        }
        if i_in != j_in {
            // Edge crosses the plane.
            let t = d_i / (d_i - d_j);
            let xi = vertices[i * 2];
            let yi = vertices[i * 2 + 1];
            scratch.push(xi + t * (vertices[j * 2] - xi));
            scratch.push(yi + t * (vertices[j * 2 + 1] - yi));
        }
    }

    std::mem::swap(vertices, scratch);
}
