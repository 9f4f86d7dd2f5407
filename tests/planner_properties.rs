use proptest::prelude::*;

use wall_robot::common::DomainError;
use wall_robot::domains::coverage::*;

fn arb_wall() -> impl Strategy<Value = Wall> {
    (0.01f64..20.0, 0.01f64..20.0).prop_map(|(w, h)| Wall::new(w, h))
}

/// Obstacles anywhere around the wall, including zero and negative extents.
fn arb_obstacle() -> impl Strategy<Value = Obstacle> {
    prop_oneof![
        (-5.0f64..25.0, -5.0f64..25.0, 0.0f64..6.0, 0.0f64..6.0)
            .prop_map(|(x, y, w, h)| Obstacle::new(x, y, w, h)),
        // degenerate: a single sample point or an empty rectangle
        (0u32..40, 0u32..40).prop_map(|(i, j)| Obstacle::new(i as f64 * 0.5, j as f64 * 0.5, 0.0, 0.0)),
        (-5.0f64..25.0, -5.0f64..25.0, -3.0f64..0.0, -3.0f64..0.0)
            .prop_map(|(x, y, w, h)| Obstacle::new(x, y, w, h)),
        // far outside the wall
        (100.0f64..1000.0, -1000.0f64..-100.0).prop_map(|(x, y)| Obstacle::new(x, y, 5.0, 5.0)),
    ]
}

fn arb_obstacles() -> impl Strategy<Value = Vec<Obstacle>> {
    prop::collection::vec(arb_obstacle(), 0..8)
}

fn row_index(p: &TrajectoryPoint, step: f64) -> usize {
    (p.y / step).round() as usize
}

proptest! {
    #[test]
    fn open_wall_starts_at_origin_and_samples_full_grid(wall in arb_wall()) {
        let planner = CoveragePlanner::default();
        let path = planner.plan(&wall, &[]).unwrap();

        prop_assert_eq!(path.first(), Some(&TrajectoryPoint::new(0.0, 0.0)));
        let cols = (wall.width / planner.step()).floor() as usize + 1;
        let rows = (wall.height / planner.step()).floor() as usize + 1;
        prop_assert_eq!(path.len(), cols * rows);
    }

    #[test]
    fn obstacles_only_filter_the_open_scan(wall in arb_wall(), obstacles in arb_obstacles()) {
        let open = plan(&wall, &[]).unwrap();
        let expected: Vec<TrajectoryPoint> = open
            .into_iter()
            .filter(|p| !obstacles.iter().any(|o| o.contains(p.x, p.y)))
            .collect();
        prop_assert_eq!(plan(&wall, &obstacles).unwrap(), expected);
    }

    #[test]
    fn no_point_lies_inside_any_obstacle(wall in arb_wall(), obstacles in arb_obstacles()) {
        let path = plan(&wall, &obstacles).unwrap();
        for p in &path {
            for o in &obstacles {
                prop_assert!(
                    !(o.x <= p.x && p.x <= o.x + o.width && o.y <= p.y && p.y <= o.y + o.height),
                    "{:?} inside {:?}", p, o
                );
            }
        }
    }

    #[test]
    fn rows_alternate_direction(wall in arb_wall(), obstacles in arb_obstacles()) {
        let planner = CoveragePlanner::default();
        let path = planner.plan(&wall, &obstacles).unwrap();

        for pair in path.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (ra, rb) = (row_index(a, planner.step()), row_index(b, planner.step()));
            prop_assert!(ra <= rb);
            if ra == rb {
                if ra % 2 == 0 {
                    prop_assert!(a.x < b.x, "row {} not ascending: {:?} then {:?}", ra, a, b);
                } else {
                    prop_assert!(a.x > b.x, "row {} not descending: {:?} then {:?}", ra, a, b);
                }
            }
        }
    }

    #[test]
    fn custom_steps_stay_in_quadrant_and_avoid_obstacles(
        wall in arb_wall(),
        obstacles in arb_obstacles(),
        step in 0.1f64..2.0,
    ) {
        let planner = CoveragePlanner::new(step).unwrap();
        let path = planner.plan(&wall, &obstacles).unwrap();
        for p in &path {
            prop_assert!(p.x >= 0.0 && p.y >= 0.0);
            prop_assert!(!obstacles.iter().any(|o| o.contains(p.x, p.y)));
        }
    }

    #[test]
    fn non_positive_width_is_rejected(
        width in -100.0f64..=0.0,
        height in -100.0f64..100.0,
        obstacles in arb_obstacles(),
    ) {
        let result = plan(&Wall::new(width, height), &obstacles);
        prop_assert!(matches!(result, Err(DomainError::InvalidInput { .. })), "expected InvalidInput, got {:?}", result);
    }

    #[test]
    fn non_positive_height_is_rejected(
        width in -100.0f64..100.0,
        height in -100.0f64..=0.0,
        obstacles in arb_obstacles(),
    ) {
        let result = plan(&Wall::new(width, height), &obstacles);
        prop_assert!(matches!(result, Err(DomainError::InvalidInput { .. })), "expected InvalidInput, got {:?}", result);
    }

    #[test]
    fn walls_past_the_sample_limit_are_rejected(
        width in 3000.0f64..1e12,
        height in 3000.0f64..1e12,
        obstacles in arb_obstacles(),
    ) {
        // at least 6001 x 6001 samples with the default step
        let result = plan(&Wall::new(width, height), &obstacles);
        prop_assert!(matches!(result, Err(DomainError::InvalidInput { .. })), "expected InvalidInput, got {:?}", result);
    }
}
