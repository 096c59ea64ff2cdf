use plotters::prelude::*;
use rand::Rng;
use seed_decomp::{decompose_path, DecompOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_example("corridor_sine.svg", |x| 50.0 + 20.0 * (x * 0.08).sin())?;
    run_example("corridor_zigzag.svg", |x| 30.0 + (x % 40.0 - 20.0).abs() * 2.0)?;
    Ok(())
}

fn run_example<F>(filename: &str, centerline: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: Fn(f64) -> f64,
{
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root).build_cartesian_2d(0.0..100.0, 0.0..100.0)?;

    // Clutter everywhere except a channel around the centerline.
    let mut rng = rand::thread_rng();
    let mut obstacles = Vec::with_capacity(3000);
    while obstacles.len() < 3000 {
        let p = [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)];
        if (p[1] - centerline(p[0])).abs() > 6.0 {
            obstacles.push(p);
        }
    }

    let waypoints: Vec<[f64; 2]> = (0..=20)
        .map(|k| {
            let x = 5.0 + k as f64 * 4.5;
            [x, centerline(x)]
        })
        .collect();

    let regions = decompose_path(&waypoints, &obstacles, [6.0, 10.0], 2.0, DecompOptions::default())?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 0.0)],
        BLACK.stroke_width(2),
    )))?;

    for region in &regions {
        let mut poly: Vec<(f64, f64)> = region.polygon().iter().map(|v| (v[0], v[1])).collect();
        if poly.len() < 3 {
            continue;
        }

        chart.draw_series(std::iter::once(Polygon::new(poly.clone(), BLUE.mix(0.15).filled())))?;

        poly.push(poly[0]);
        chart.draw_series(std::iter::once(PathElement::new(poly, BLACK.mix(0.5))))?;
    }

    chart.draw_series(obstacles.iter().map(|p| Circle::new((p[0], p[1]), 1, RED.filled())))?;

    chart.draw_series(std::iter::once(PathElement::new(
        waypoints.iter().map(|w| (w[0], w[1])).collect::<Vec<_>>(),
        GREEN.stroke_width(2),
    )))?;
    chart.draw_series(waypoints.iter().map(|w| Circle::new((w[0], w[1]), 3, GREEN.filled())))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}
