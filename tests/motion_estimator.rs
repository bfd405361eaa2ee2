// Property tests for the per-move duration model

#[cfg(test)]
mod tests {
    use gcode_timer::{KinematicLimits, MoveEstimator, ProfileKind, Vector4};
    use proptest::prelude::*;

    fn axis() -> impl Strategy<Value = f64> {
        -200.0..200.0f64
    }

    fn point() -> impl Strategy<Value = Vector4> {
        (axis(), axis(), -5.0..50.0f64, -10.0..10.0f64)
            .prop_map(|(x, y, z, e)| Vector4::new(x, y, z, e))
    }

    fn limits() -> impl Strategy<Value = KinematicLimits> {
        (
            (1.0..5000.0f64, 1.0..5000.0f64, 0.0..500.0f64, 0.0..5000.0f64),
            (0.0..5000.0f64, 0.0..5000.0f64, 0.0..500.0f64),
            (0.0..50.0f64, 0.0..50.0f64, 0.0..5.0f64, 0.0..2000.0f64),
            0.01..=1.0f64,
            0.01..=1.0f64,
            0.1..4.0f64,
        )
            .prop_map(|(p, m, j, jerk_efficiency, accel_efficiency, speed_multiplier)| {
                KinematicLimits {
                    max_print_accel: Vector4::new(p.0, p.1, p.2, p.3),
                    max_move_accel: Vector4::new(m.0, m.1, m.2, 0.0),
                    max_jerk: Vector4::new(j.0, j.1, j.2, j.3),
                    jerk_efficiency,
                    accel_efficiency,
                    speed_multiplier,
                }
            })
    }

    proptest! {
        #[test]
        fn duration_is_finite_and_non_negative(
            limits in limits(),
            from in point(),
            to in point(),
            feed in 0.0..20000.0f64,
        ) {
            let estimator = MoveEstimator::new(&limits);
            let est = estimator.estimate(from, to, feed / 60.0);
            prop_assert!(est.duration.is_finite());
            prop_assert!(est.duration >= 0.0);
            prop_assert_eq!(est.target, to);
        }

        #[test]
        fn faster_multiplier_never_slows_a_move(
            from in point(),
            to in point(),
            feed in 60.0..20000.0f64,
            jerk_efficiency in 0.05..=1.0f64,
            slow in 0.1..3.0f64,
            bump in 0.0..3.0f64,
        ) {
            let base = KinematicLimits { jerk_efficiency, ..KinematicLimits::default() };
            let slow_limits = KinematicLimits { speed_multiplier: slow, ..base.clone() };
            let fast_limits = KinematicLimits { speed_multiplier: slow + bump, ..base };
            let slow_est = MoveEstimator::new(&slow_limits).estimate(from, to, feed / 60.0);
            let fast_est = MoveEstimator::new(&fast_limits).estimate(from, to, feed / 60.0);
            prop_assert!(fast_est.duration <= slow_est.duration + 1e-8 * slow_est.duration.max(1.0));
        }
    }

    #[test]
    fn test_reference_trace_for_slow_x_move() {
        let limits = KinematicLimits::default();
        let est = MoveEstimator::new(&limits).estimate(
            Vector4::ZERO,
            Vector4::new(10.0, 0.0, 0.0, 0.0),
            600.0 / 60.0,
        );
        assert_eq!(est.movement, Vector4::new(10.0, 0.0, 0.0, 0.0));
        assert_eq!(est.length, 10.0);
        assert_eq!(est.target_speed, Vector4::new(10.0, 0.0, 0.0, 0.0));
        assert!((est.jerk_speed.x - 15.0).abs() < 1e-9);
        assert_eq!(est.jerk_speed.y, 0.0);
        assert_eq!(est.accel_time, 0.0);
        assert_eq!(est.acceleration, 0.0);
        assert_eq!(est.profile, ProfileKind::Trapezoid);
        assert!((est.duration - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_move_is_governed_by_tightest_axis() {
        let limits = KinematicLimits::default();
        let est = MoveEstimator::new(&limits).estimate(
            Vector4::ZERO,
            Vector4::new(30.0, 40.0, 0.0, 0.0),
            50.0,
        );
        // Y carries the larger share of the direction, so it hits its
        // 15 mm/s ceiling first and X is scaled down with it.
        assert!((est.jerk_speed.y - 15.0).abs() < 1e-9);
        assert!((est.jerk_speed.x - 11.25).abs() < 1e-9);
        assert!(est.duration > 50.0 / 50.0);
    }

    #[test]
    fn test_efficiency_slows_moves() {
        let full = KinematicLimits::default();
        let half = KinematicLimits {
            jerk_efficiency: 0.5,
            accel_efficiency: 0.5,
            ..KinematicLimits::default()
        };
        let to = Vector4::new(80.0, 0.0, 0.0, 0.0);
        let a = MoveEstimator::new(&full).estimate(Vector4::ZERO, to, 100.0);
        let b = MoveEstimator::new(&half).estimate(Vector4::ZERO, to, 100.0);
        assert!(b.duration > a.duration);
    }
}
