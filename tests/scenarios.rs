use seed_decomp::{
    box_side, decompose_path, seed_decomp, seed_decomp_2d, seed_decomp_3d, to_linear_constraints, BoundingBox,
    DecompError, DecompOptions, Point, Polyhedron, SeedDecomposer,
};

fn square(half: f64) -> BoundingBox<2> {
    BoundingBox::new([-half, -half], [half, half])
}

#[test]
fn test_diamond_around_origin() {
    let obstacles = [[2.0, 0.0], [-2.0, 0.0], [0.0, 2.0], [0.0, -2.0]];
    let region = seed_decomp_2d([0.0, 0.0], &obstacles, &square(5.0), 0.5, 1).unwrap();

    assert_eq!(region.generated_count(), 4);
    for (plane, source) in region.generated() {
        let obstacle = Point::from(obstacles[source]);
        assert!((plane.point - obstacle).norm() < 1e-3, "plane {} is not anchored at its obstacle", source);
    }

    let area = region.area();
    assert!(area > 15.9 && area < 16.0, "area was {}", area);
    assert!(area < square(5.0).volume());
}

#[test]
fn test_empty_obstacles_give_the_box() {
    let region = seed_decomp_2d([0.0, 0.0], &[], &square(5.0), 0.5, 1).unwrap();
    assert_eq!(region.generated_count(), 0);
    assert_eq!(region, Polyhedron::from_bounding_box(&square(5.0), 0));

    let region = seed_decomp_3d([0.5; 3], &[], &BoundingBox::new([0.0; 3], [1.0; 3]), 0.5, 1).unwrap();
    assert_eq!(region.len(), 6);
    assert_eq!(
        region.sources(),
        &[box_side(0, false), box_side(0, true), box_side(1, false), box_side(1, true), box_side(2, false), box_side(2, true)]
    );
}

#[test]
fn test_seed_at_obstacle() {
    let obstacles = [[2.0, 0.0], [-2.0, 0.0], [0.0, 2.0], [0.0, -2.0]];
    let err = seed_decomp_2d([0.0, 2.0], &obstacles, &square(5.0), 0.5, 1).unwrap_err();
    assert!(matches!(err, DecompError::DegenerateSeed { obstacle: 2, .. }));
}

#[test]
fn test_seed_outside_bounds() {
    let err = seed_decomp_3d([0.0, 0.0, 4.0], &[], &BoundingBox::new([-1.0; 3], [1.0; 3]), 0.5, 1).unwrap_err();
    assert!(matches!(err, DecompError::SeedOutOfBounds { .. }));
}

#[test]
fn test_simultaneous_boundary_contacts_use_input_order() {
    // Exactly equidistant obstacles: every cut is a tie on distance.
    let obstacles = [[0.0, -1.5], [1.5, 0.0], [0.0, 1.5], [-1.5, 0.0]];
    let region = seed_decomp_2d([0.0, 0.0], &obstacles, &square(5.0), 0.5, 1).unwrap();
    let order: Vec<usize> = region.generated().map(|(_, s)| s).collect();
    assert_eq!(order, vec![0, 1, 2, 3]);

    let reversed: Vec<[f64; 2]> = obstacles.iter().rev().copied().collect();
    let region_rev = seed_decomp_2d([0.0, 0.0], &reversed, &square(5.0), 0.5, 1).unwrap();
    let order_rev: Vec<usize> = region_rev.generated().map(|(_, s)| s).collect();
    assert_eq!(order_rev, vec![0, 1, 2, 3]);

    // Same set of planes either way.
    assert!((region.area() - region_rev.area()).abs() < 1e-12);
}

#[test]
fn test_dual_form_holds_at_seed_3d() {
    let obstacles = [[1.0, 1.0, 0.0], [-1.0, 0.5, 0.2], [0.3, -1.2, 0.4], [0.0, 0.0, 1.5], [0.2, 0.1, -0.9]];
    let bounds = BoundingBox::new([-3.0; 3], [3.0; 3]);
    let region = seed_decomp([0.0; 3], &obstacles, &bounds, 0.4, 2).unwrap();
    let (a, b) = to_linear_constraints(&region);

    assert_eq!(a.nrows(), region.len());
    assert_eq!(a.ncols(), 3);
    for i in 0..a.nrows() {
        // Seed is the origin, so A·seed is zero.
        assert!(0.0 <= b[i]);
    }
    for q in obstacles {
        let q = Point::from(q);
        assert!((0..a.nrows()).any(|i| a[(i, 0)] * q[0] + a[(i, 1)] * q[1] + a[(i, 2)] * q[2] > b[i]));
    }
}

#[test]
fn test_options_from_json_drive_decomposition() {
    let options = DecompOptions::from_json(r#"{ "max_poly": 2, "max_retries": 1 }"#).unwrap();
    let obstacles = [[2.0, 0.0], [-2.0, 0.0], [0.0, 2.0], [0.0, -2.0]];
    let decomposer = SeedDecomposer::new(&obstacles, options).unwrap();
    let err = decomposer.decompose_with_capacity(&[0.0, 0.0], &square(5.0), 0.5).unwrap_err();
    assert!(matches!(err, DecompError::RetryLimitExceeded { attempts: 1, capacity: 2 }));
}

#[test]
fn test_path_corridor_overlaps() {
    let mut obstacles = Vec::new();
    for k in 0..=60 {
        let x = k as f64 * 0.2;
        obstacles.push([x, 1.2 + 0.3 * (x * 0.7).sin()]);
        obstacles.push([x, -1.2 + 0.3 * (x * 0.7).sin()]);
    }
    let waypoints: Vec<[f64; 2]> = (0..12).map(|k| [k as f64, 0.3 * (k as f64 * 0.7).sin()]).collect();

    let regions = decompose_path(&waypoints, &obstacles, [1.5, 2.0], 0.5, DecompOptions::default()).unwrap();
    assert_eq!(regions.len(), waypoints.len());
    for (k, region) in regions.iter().enumerate() {
        assert!(region.contains(&Point::from(waypoints[k])));
        for q in &obstacles {
            assert!(region.excludes(&Point::from(*q)));
        }
    }
}
