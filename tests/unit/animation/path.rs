use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 1920,
        height: 1080,
    }
}

fn fall() -> BakedPath {
    bake(
        &PathSpec::Fall {
            start: Point::new(1276.0, 480.0),
            end: Point::new(1176.0, 720.0),
            arc_height: 200.0,
            resolution: 100,
        },
        &mut Rng64::new(0),
    )
    .unwrap()
}

fn oval() -> BakedPath {
    bake(
        &PathSpec::Oval {
            start: Point::new(800.0, 335.0),
            loops: 5,
            radius_x: 960.0,
            radius_y: 150.0,
            tilt_rad: (-15f64).to_radians(),
            resolution: 200,
        },
        &mut Rng64::new(0),
    )
    .unwrap()
}

fn walk(seed: u64) -> BakedPath {
    bake(
        &PathSpec::Walk {
            start: Point::new(800.0, 600.0),
            segments: 3,
            points_per_segment: 30,
            margin: 200.0,
            bounds: canvas(),
        },
        &mut Rng64::new(seed),
    )
    .unwrap()
}

#[test]
fn query_endpoints_are_exact_samples() {
    for path in [fall(), oval(), walk(1)] {
        assert_eq!(path.query(0.0), path.points()[0]);
        assert_eq!(path.query(1.0), path.points()[path.len() - 1]);
        assert_eq!(path.query(0.0), path.first());
        assert_eq!(path.query(1.0), path.last());
    }
}

#[test]
fn query_clamps_out_of_range_progress() {
    let path = fall();
    assert_eq!(path.query(-3.0), path.first());
    assert_eq!(path.query(7.5), path.last());
    assert_eq!(path.query(f64::NAN), path.first());
}

#[test]
fn query_interpolates_between_neighbours() {
    let path = BakedPath::from_points(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 20.0),
    ])
    .unwrap();
    assert_eq!(path.query(0.25), Point::new(5.0, 0.0));
    assert_eq!(path.query(0.5), Point::new(10.0, 0.0));
    assert_eq!(path.query(0.75), Point::new(10.0, 10.0));
}

#[test]
fn single_point_path_always_returns_it() {
    let path = BakedPath::from_points(vec![Point::new(3.0, 4.0)]).unwrap();
    assert_eq!(path.query(0.0), Point::new(3.0, 4.0));
    assert_eq!(path.query(0.6), Point::new(3.0, 4.0));
    assert!(BakedPath::from_points(Vec::new()).is_err());
}

#[test]
fn fall_path_has_resolution_plus_one_samples_and_arcs_upward() {
    let path = fall();
    assert_eq!(path.len(), 101);
    assert_eq!(path.first(), Point::new(1276.0, 480.0));
    assert_eq!(path.last(), Point::new(1176.0, 720.0));

    // Midpoint: linear y 600 minus the full arc height.
    let mid = path.points()[50];
    assert!((mid.x - 1226.0).abs() < 1e-9);
    assert!((mid.y - 400.0).abs() < 1e-9);
}

#[test]
fn oval_path_starts_at_requested_point_and_closes_its_loops() {
    let path = oval();
    assert_eq!(path.len(), 201);
    let first = path.first();
    assert!((first.x - 800.0).abs() < 1e-9);
    assert!((first.y - 335.0).abs() < 1e-9);

    // Five whole revolutions bring the curve back to where it started.
    let last = path.last();
    assert!((last.x - 800.0).abs() < 1e-6);
    assert!((last.y - 335.0).abs() < 1e-6);
}

#[test]
fn walk_path_chains_segments_and_ends_at_center() {
    let path = walk(42);
    assert_eq!(path.len(), 90);
    assert_eq!(path.first(), Point::new(800.0, 600.0));
    assert_eq!(path.last(), Point::new(960.0, 540.0));

    // Each segment ends where the next begins.
    for seg in 0..2 {
        let end = path.points()[seg * 30 + 29];
        let next_start = path.points()[(seg + 1) * 30];
        assert_eq!(end, next_start);
        assert!((200.0..=1720.0).contains(&end.x));
        assert!((200.0..=880.0).contains(&end.y));
    }
}

#[test]
fn walk_targets_depend_on_seed_only() {
    assert_eq!(walk(9), walk(9));
    assert_ne!(walk(9), walk(10));
}

#[test]
fn bake_rejects_degenerate_parameters() {
    let mut rng = Rng64::new(0);
    assert!(
        bake(
            &PathSpec::Fall {
                start: Point::ZERO,
                end: Point::ZERO,
                arc_height: 1.0,
                resolution: 0,
            },
            &mut rng,
        )
        .is_err()
    );
    assert!(
        bake(
            &PathSpec::Walk {
                start: Point::ZERO,
                segments: 3,
                points_per_segment: 1,
                margin: 10.0,
                bounds: canvas(),
            },
            &mut rng,
        )
        .is_err()
    );
    assert!(
        bake(
            &PathSpec::Walk {
                start: Point::ZERO,
                segments: 3,
                points_per_segment: 30,
                margin: 600.0,
                bounds: canvas(),
            },
            &mut rng,
        )
        .is_err()
    );
}
