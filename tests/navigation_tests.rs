// Control law scenarios checked against hand-computed commands.

use nalgebra::Point2;
use pose_controller::navigation::{normalize_angle, yaw_from_quaternion};
use pose_controller::{Goal, MotionController, NavigationConfig, Pose};
use rstest::rstest;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

const EPS: f64 = 1e-9;

fn controller() -> MotionController {
    MotionController::new(&NavigationConfig::default())
}

fn pose_at(x: f64, y: f64, yaw: f64) -> Pose {
    Pose::from_yaw(Point2::new(x, y), yaw)
}

#[rstest]
#[case::straight_ahead(1.0, 0.0, 0.5, 0.0)]
#[case::quarter_turn_left(0.0, 1.0, 0.5, 1.5 * FRAC_PI_2)]
#[case::quarter_turn_right(0.0, -1.0, 0.5, -1.5 * FRAC_PI_2)]
#[case::diagonal_close(0.3, 0.3, 0.5 * 0.18_f64.sqrt(), 1.5 * FRAC_PI_4)]
#[case::saturated_far(10.0, 0.0, 0.5, 0.0)]
fn test_command_from_origin(
    #[case] goal_x: f64,
    #[case] goal_y: f64,
    #[case] linear: f64,
    #[case] angular: f64,
) {
    let output = controller().compute(&pose_at(0.0, 0.0, 0.0), &Goal::new(goal_x, goal_y));

    assert!(!output.arrived);
    assert!((output.command.linear - linear).abs() < EPS, "linear {}", output.command.linear);
    assert!((output.command.angular - angular).abs() < EPS, "angular {}", output.command.angular);
}

#[test]
fn test_quarter_turn_is_not_capped() {
    let output = controller().compute(&pose_at(0.0, 0.0, 0.0), &Goal::new(0.0, 1.0));
    assert!((output.command.angular - 2.356194490192345).abs() < EPS);
}

#[test]
fn test_close_goal_arrives_with_exact_stop() {
    let output = controller().compute(&pose_at(0.0, 0.0, 0.0), &Goal::new(0.04, 0.0));
    assert!(output.arrived);
    assert_eq!(output.command.linear, 0.0);
    assert_eq!(output.command.angular, 0.0);
}

#[rstest]
#[case(0.07, 0.0)]
#[case(0.0, 0.09)]
#[case(-0.06, 0.03)]
fn test_deadband_suppresses_motion_without_arriving(#[case] goal_x: f64, #[case] goal_y: f64) {
    let output = controller().compute(&pose_at(0.0, 0.0, 0.0), &Goal::new(goal_x, goal_y));

    assert!(!output.arrived);
    assert!(output.command.is_stop());
    // The raw signal would not have been zero
    let raw = controller().proportional_command(output.distance, output.heading_error);
    assert!(raw.linear > 0.0);
}

#[test]
fn test_linear_never_exceeds_limit_outside_deadband() {
    let controller = controller();
    let pose = pose_at(0.3, -0.2, 0.8);

    for i in 0..40 {
        for j in 0..40 {
            let goal = Goal::new(-4.0 + 0.2 * i as f64, -4.0 + 0.2 * j as f64);
            let output = controller.compute(&pose, &goal);
            if output.distance <= 0.1 {
                assert!(output.command.is_stop());
                continue;
            }
            let expected = (0.5 * output.distance).min(0.5);
            assert!((output.command.linear - expected).abs() < EPS);
            assert!(output.command.linear <= 0.5);
        }
    }
}

#[test]
fn test_normalization_is_identity_on_its_range() {
    for n in 1..=360 {
        let e = -PI + 2.0 * PI * n as f64 / 360.0;
        assert!((normalize_angle(e) - e).abs() < EPS);
        assert!((normalize_angle(normalize_angle(e)) - normalize_angle(e)).abs() < EPS);
    }
}

#[rstest]
#[case::ahead(0.0, 2.0, 0.0)]
#[case::heading_wraps_positive(3.0, -1.0, -0.1)]
#[case::heading_wraps_negative(-3.0, -1.0, 0.1)]
fn test_heading_error_wraps(#[case] yaw: f64, #[case] goal_x: f64, #[case] goal_y: f64) {
    let output = controller().compute(&pose_at(0.0, 0.0, yaw), &Goal::new(goal_x, goal_y));
    assert!(output.heading_error > -PI && output.heading_error <= PI);
    assert!(output.heading_error.abs() < 0.3, "error {}", output.heading_error);
}

#[test]
fn test_yaw_formula_on_raw_components() {
    // 90 degrees about z: w = cos(45°), z = sin(45°)
    let q = nalgebra::Quaternion::new(FRAC_PI_4.cos(), 0.0, 0.0, FRAC_PI_4.sin());
    assert!((yaw_from_quaternion(&q) - FRAC_PI_2).abs() < EPS);
}
