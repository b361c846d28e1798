use arcball::{
    pointer_events, vector, ArcBall, ArcBallOptions, MouseButtons, PointerEvent, Viewport,
};
use nalgebra::{Matrix3, Matrix4, Unit, Vector3};
use pretty_assertions::assert_eq;

const VIEWPORT: Viewport = Viewport::new(800, 600);

fn run(arcball: &mut ArcBall, events: &[PointerEvent]) -> Vec<Matrix4<f32>> {
    events
        .iter()
        .filter_map(|e| arcball.update(e, VIEWPORT))
        .map(Matrix4::from)
        .collect()
}

fn rotation_part(m: &Matrix4<f32>) -> Matrix3<f32> {
    m.fixed_view::<3, 3>(0, 0).into_owned()
}

fn assert_close(a: &Matrix4<f32>, b: &Matrix4<f32>, eps: f32) {
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() <= eps, "\n{}\nis not close to\n{}", a, b);
    }
}

fn assert_orthonormal(m: &Matrix4<f32>) {
    let r = rotation_part(m);
    assert!((r.determinant() - 1.0).abs() < 1e-4, "det = {}", r.determinant());
    let rtr = r.transpose() * r;
    for (x, y) in rtr.iter().zip(Matrix3::<f32>::identity().iter()) {
        assert!((x - y).abs() < 1e-4, "RᵀR =\n{}", rtr);
    }
}

#[test]
fn test_project_stays_on_or_above_the_equator() {
    for x in (0..=800).step_by(20) {
        for y in (0..=600).step_by(20) {
            let p = VIEWPORT.project(x, y);
            assert!(p.z >= 0.0, "({}, {}) -> {:?}", x, y, p);
            assert!(!p.x.is_nan() && !p.y.is_nan() && !p.z.is_nan());
        }
    }
}

#[test]
fn test_project_corners_and_outside_lie_on_the_equator() {
    assert_eq!(VIEWPORT.project(0, 0).z, 0.0);
    assert_eq!(VIEWPORT.project(800, 600).z, 0.0);
    assert_eq!(VIEWPORT.project(-300, 2000).z, 0.0);
}

#[test]
fn test_center_press_then_same_move_is_noop() {
    let p = VIEWPORT.project(400, 300);
    assert_eq!((p.x, p.y, p.z), (0.0, 0.0, 0.625));

    let mut arcball = ArcBall::new();
    let changes = run(
        &mut arcball,
        &pointer_events![down(LEFT, 400, 300), move(LEFT, 400, 300)],
    );

    assert!(changes.is_empty());
    assert!(arcball.is_dragging());
    assert_eq!(arcball.transform(), arcball::identity());
    assert!(vector::is_degenerate(arcball.rotation_axis()));
}

#[test]
fn test_drag_rotates_by_scaled_angle() {
    let start = VIEWPORT.project(500, 300);
    let end = VIEWPORT.project(400, 250);

    let mut arcball = ArcBall::new();
    let changes = run(
        &mut arcball,
        &pointer_events![down(LEFT, 500, 300), move(LEFT, 400, 250)],
    );
    assert_eq!(changes.len(), 1);

    let axis = arcball.rotation_axis();
    assert!(!vector::is_degenerate(axis));
    assert!(axis.x < 0.0 && axis.y < 0.0);
    assert!(axis.y.abs() > axis.x.abs() && axis.x.abs() > axis.z.abs());

    let separation = vector::cos_angle(start, end).acos();
    let expected_angle = 0.1 * separation;
    assert!((separation.to_degrees() - 12.87).abs() < 0.05);

    let expected = Matrix4::from_axis_angle(
        &Unit::new_normalize(Vector3::new(axis.x, axis.y, axis.z)),
        expected_angle,
    );
    assert_close(&changes[0], &expected, 1e-6);

    // The skew-symmetric part of a rotation holds sin(angle) * axis.
    let r = rotation_part(&changes[0]);
    let skew = Vector3::new(
        r[(2, 1)] - r[(1, 2)],
        r[(0, 2)] - r[(2, 0)],
        r[(1, 0)] - r[(0, 1)],
    ) / 2.0;
    let angle = skew.norm().atan2((r.trace() - 1.0) / 2.0);
    assert!((angle - expected_angle).abs() < 1e-5, "{} != {}", angle, expected_angle);
}

#[test]
fn test_rotations_are_applied_in_world_space() {
    let initial = Matrix4::from_axis_angle(&Vector3::x_axis(), 0.7)
        * Matrix4::from_axis_angle(&Vector3::z_axis(), -0.3);

    let mut arcball = ArcBall::with_transform(initial);
    let changes = run(
        &mut arcball,
        &pointer_events![down(LEFT, 500, 300), move(LEFT, 400, 250)],
    );

    let mut fresh = ArcBall::new();
    let rotation = run(
        &mut fresh,
        &pointer_events![down(LEFT, 500, 300), move(LEFT, 400, 250)],
    );

    assert_close(&changes[0], &(rotation[0] * initial), 1e-6);
}

#[test]
fn test_long_drag_stays_orthonormal() {
    let options = ArcBallOptions::new().with_sensitivity(0.9);
    let mut arcball = ArcBall::with_options(options).unwrap();
    let mut events = pointer_events![down(LEFT, 10, 10)];
    for i in 0..200 {
        let x = 400 + ((i * 37) % 500) - 250;
        let y = 300 + ((i * 53) % 400) - 200;
        events.push(PointerEvent::Move {
            buttons: MouseButtons::LEFT,
            x,
            y,
        });
    }

    let changes = run(&mut arcball, &events);
    assert!(!changes.is_empty());
    for m in changes.iter() {
        assert_orthonormal(m);
        assert!(m.iter().all(|x| x.is_finite()));
    }
}

#[test]
fn test_drag_follows_the_previous_point() {
    let mut arcball = ArcBall::new();
    let changes = run(
        &mut arcball,
        &pointer_events![
            down(LEFT, 400, 300),
            move(LEFT, 450, 300),
            move(LEFT, 450, 300),
            move(LEFT, 500, 300),
        ],
    );

    // The repeated point is a no-op, and the last step continues from (450, 300).
    assert_eq!(changes.len(), 2);

    let mut single = ArcBall::new();
    let step = run(
        &mut single,
        &pointer_events![down(LEFT, 450, 300), move(LEFT, 500, 300)],
    );
    assert_close(&changes[1], &(step[0] * changes[0]), 1e-6);
}

#[test]
fn test_wheel_scales_uniformly() {
    let mut arcball = ArcBall::new();

    let up = run(&mut arcball, &pointer_events![wheel(1)]);
    assert_close(&up[0], &Matrix4::new_scaling(1.1), 1e-6);

    let mut arcball = ArcBall::new();
    let down = run(&mut arcball, &pointer_events![wheel(-1)]);
    assert_close(&down[0], &Matrix4::new_scaling(0.9), 1e-6);

    // A zero delta is not a positive one.
    let mut arcball = ArcBall::new();
    let zero = run(&mut arcball, &pointer_events![wheel(0)]);
    assert_close(&zero[0], &Matrix4::new_scaling(0.9), 1e-6);
}

#[test]
fn test_wheel_ticks_compound() {
    let mut arcball = ArcBall::new();
    let changes = run(
        &mut arcball,
        &pointer_events![wheel(1), wheel(120), wheel(3)],
    );
    assert_eq!(changes.len(), 3);
    assert_close(&changes[2], &Matrix4::new_scaling(1.1f32.powi(3)), 1e-5);

    let mut a = ArcBall::new();
    let mut b = ArcBall::new();
    run(&mut a, &pointer_events![wheel(1), wheel(-1)]);
    run(&mut b, &pointer_events![wheel(-1), wheel(1)]);
    assert_close(&Matrix4::from(a.transform()), &Matrix4::from(b.transform()), 1e-6);
    assert_close(&Matrix4::from(a.transform()), &Matrix4::new_scaling(0.99), 1e-6);
}

#[test]
fn test_wheel_ignores_drag_state() {
    let mut arcball = ArcBall::new();
    run(
        &mut arcball,
        &pointer_events![down(LEFT, 500, 300), wheel(1)],
    );
    assert!(arcball.is_dragging());
}

#[test]
fn test_unbound_buttons_do_not_drag() {
    let mut arcball = ArcBall::new();
    let changes = run(
        &mut arcball,
        &pointer_events![down(RIGHT, 500, 300), move(RIGHT, 400, 250)],
    );
    assert!(changes.is_empty());
    assert!(!arcball.is_dragging());

    arcball.set_buttons(MouseButtons::RIGHT | MouseButtons::MIDDLE);
    let changes = run(
        &mut arcball,
        &pointer_events![down(MIDDLE, 500, 300), move(MIDDLE, 400, 250), up(MIDDLE, 400, 250)],
    );
    assert_eq!(changes.len(), 1);
    assert!(!arcball.is_dragging());
}

#[test]
fn test_moving_without_the_button_does_not_rotate() {
    let mut arcball = ArcBall::new();
    let changes = run(
        &mut arcball,
        &pointer_events![down(LEFT, 500, 300), move(RIGHT, 400, 250)],
    );
    assert!(changes.is_empty());
    assert!(arcball.is_dragging());
}

#[test]
fn test_drag_keeps_the_buttons_it_started_with() {
    let mut arcball = ArcBall::new();
    run(&mut arcball, &pointer_events![down(LEFT, 500, 300)]);

    arcball.set_buttons(MouseButtons::RIGHT);
    let changes = run(&mut arcball, &pointer_events![move(LEFT, 400, 250)]);
    assert_eq!(changes.len(), 1);

    run(&mut arcball, &pointer_events![up(LEFT, 400, 250)]);
    assert!(!arcball.is_dragging());

    let changes = run(
        &mut arcball,
        &pointer_events![down(LEFT, 500, 300), move(LEFT, 400, 250)],
    );
    assert!(changes.is_empty());
}

#[test]
fn test_resize_between_drags() {
    let small = Viewport::new(100, 100);
    let mut arcball = ArcBall::new();
    for event in pointer_events![down(LEFT, 50, 50), move(LEFT, 70, 40), up(LEFT, 70, 40)] {
        arcball.update(&event, small);
    }
    assert_ne!(arcball.transform(), arcball::identity());
    arcball.reset_transform(arcball::identity());

    // The next drag projects onto the sphere of the larger viewport.
    let gesture = pointer_events![down(LEFT, 500, 300), move(LEFT, 400, 250)];
    let changes = run(&mut arcball, &gesture);

    let mut fresh = ArcBall::new();
    let expected = run(&mut fresh, &gesture);

    assert_eq!(changes.len(), 1);
    assert_close(&changes[0], &expected[0], 1e-6);
}

#[test]
fn test_empty_viewport_never_produces_nan() {
    let mut arcball = ArcBall::new();
    let empty = Viewport::new(0, 0);
    for event in pointer_events![down(LEFT, 0, 0), move(LEFT, 10, 10), move(LEFT, -5, 3)] {
        assert!(arcball.update(&event, empty).is_none());
    }
    assert_eq!(arcball.transform(), arcball::identity());
}

#[test]
fn test_sensitivity_setters() {
    let mut arcball = ArcBall::new();
    assert_eq!(arcball.sensitivity(), 0.1);

    assert!(arcball.set_sensitivity(0.0).is_err());
    assert!(arcball.set_sensitivity(f32::NAN).is_err());
    assert_eq!(arcball.sensitivity(), 0.1);

    arcball.set_sensitivity(0.5).unwrap();
    let changes = run(&mut arcball, &pointer_events![wheel(1)]);
    assert_close(&changes[0], &Matrix4::new_scaling(1.5), 1e-6);

    assert!(ArcBall::with_options(ArcBallOptions::new().with_sensitivity(0.0)).is_err());
    assert!(ArcBall::with_options(ArcBallOptions::new().with_sensitivity(1.5)).is_ok());
    assert!(arcball
        .set_options(ArcBallOptions::new().with_sensitivity(-1.0))
        .is_err());
    assert_eq!(arcball.options().sensitivity, 0.5);
}

#[test]
fn test_high_sensitivity_skips_collapsing_wheel_steps() {
    let options = ArcBallOptions::new().with_sensitivity(1.5);
    let mut arcball = ArcBall::with_options(options).unwrap();

    let changes = run(&mut arcball, &pointer_events![wheel(1)]);
    assert_eq!(changes.len(), 1);
    assert_close(&changes[0], &Matrix4::new_scaling(2.5), 1e-6);

    // Scaling by 1 - 1.5 would mirror the transform.
    let changes = run(&mut arcball, &pointer_events![wheel(-1), wheel(0)]);
    assert!(changes.is_empty());
    assert_close(&Matrix4::from(arcball.transform()), &Matrix4::new_scaling(2.5), 1e-6);

    // Scaling by exactly 0 would collapse it.
    arcball.set_sensitivity(1.0).unwrap();
    assert!(arcball.update(&PointerEvent::Wheel { delta: -1 }, VIEWPORT).is_none());

    // Drags still rotate, by more than the separation of the two points.
    let start = VIEWPORT.project(500, 300);
    let end = VIEWPORT.project(400, 250);
    arcball.reset_transform(arcball::identity());
    arcball.set_sensitivity(1.5).unwrap();
    let changes = run(
        &mut arcball,
        &pointer_events![down(LEFT, 500, 300), move(LEFT, 400, 250)],
    );
    let axis = arcball.rotation_axis();
    let expected = Matrix4::from_axis_angle(
        &Unit::new_normalize(Vector3::new(axis.x, axis.y, axis.z)),
        1.5 * vector::cos_angle(start, end).acos(),
    );
    assert_close(&changes[0], &expected, 1e-5);
}
