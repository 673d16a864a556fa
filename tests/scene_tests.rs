use approx::assert_relative_eq;
use impulse2d::*;

const GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

fn ball(radius: f32, position: Vec2, restitution: f32) -> RigidBody {
    RigidBody::sphere(
        radius,
        position,
        Material::new(1.2, restitution),
        Colour::WHITE,
    )
}

#[test]
fn fixed_timestep_is_deterministic() {
    // Power-of-two times so the accumulator arithmetic is exact and both
    // scenes run identical tick counts.
    let time_step = 1.0 / 64.0;

    let build = |scene: &mut PhysicsScene| {
        scene.add_body(RigidBody::rectangle(
            50.0,
            1.0,
            Vec2::new(0.0, -1.0),
            Material::fixed(0.2),
            Colour::WHITE,
        ));
        scene.add_body(ball(1.0, Vec2::new(0.0, 10.0), 0.3))
    };

    let mut coarse = PhysicsScene::new(time_step, GRAVITY);
    let coarse_ball = build(&mut coarse);
    let mut fine = PhysicsScene::new(time_step, GRAVITY);
    let fine_ball = build(&mut fine);

    // 32 ticks, inside the default per-update step cap.
    coarse.update(0.5);
    for _ in 0..32 {
        fine.update(time_step);
    }

    // Same tick count, same order of operations: bitwise-identical state.
    let a = coarse.body(coarse_ball).unwrap();
    let b = fine.body(fine_ball).unwrap();
    assert_eq!(a.position, b.position);
    assert_eq!(a.linear_velocity, b.linear_velocity);
}

#[test]
fn accumulator_is_associative_over_update_splits() {
    let gravity = Vec2::new(0.0, -10.0);
    let make = || {
        let mut scene = PhysicsScene::new(0.01, gravity);
        let handle = scene.add_body(ball(1.0, Vec2::new(0.0, 100.0), 0.0));
        (scene, handle)
    };

    // 0.025s at a 0.01 timestep runs exactly two ticks; with gravity applied
    // twice per tick the ball picks up 0.2 per tick.
    let (mut scene, handle) = make();
    scene.update(0.025);
    assert_relative_eq!(
        scene.body(handle).unwrap().linear_velocity.y,
        -0.4,
        epsilon = 1e-5
    );

    // Two updates of 0.01 end in the same state as one update of 0.02.
    let (mut split, split_ball) = make();
    split.update(0.01);
    split.update(0.01);
    let (mut joined, joined_ball) = make();
    joined.update(0.02);

    let a = split.body(split_ball).unwrap();
    let b = joined.body(joined_ball).unwrap();
    assert_eq!(a.position, b.position);
    assert_eq!(a.linear_velocity, b.linear_velocity);
}

#[test]
fn ball_comes_to_rest_on_a_static_floor() {
    let mut scene = PhysicsScene::new(0.01, GRAVITY);
    scene.add_body(RigidBody::rectangle(
        50.0,
        1.0,
        Vec2::new(0.0, 19.0),
        Material::fixed(0.0),
        Colour::WHITE,
    ));
    let handle = scene.add_body(ball(1.0, Vec2::new(0.0, 23.0), 0.05));

    for _ in 0..500 {
        scene.step();
    }

    // Floor top is at y = 20, so a unit sphere rests with its centre near
    // y = 21; the slop lets it sink slightly.
    let resting = scene.body(handle).unwrap();
    assert!(
        (resting.position.y - 21.0).abs() < 0.2,
        "ball should rest on the floor, centre at y = {}",
        resting.position.y
    );
    assert!(
        resting.linear_velocity.y.abs() < 1.0,
        "resting ball should have shed its vertical velocity, v.y = {}",
        resting.linear_velocity.y
    );
}

#[test]
fn ball_rests_on_a_segment_floor() {
    let mut scene = PhysicsScene::new(0.01, GRAVITY);
    scene.add_body(RigidBody::segment(
        Vec2::new(-30.0, 0.0),
        Vec2::new(30.0, 0.0),
        0.0,
        Colour::WHITE,
    ));
    let handle = scene.add_body(ball(1.0, Vec2::new(0.0, 4.0), 0.05));

    for _ in 0..500 {
        scene.step();
    }

    let resting = scene.body(handle).unwrap();
    assert!(
        (resting.position.y - 1.0).abs() < 0.2,
        "ball centre should sit one radius above the segment, y = {}",
        resting.position.y
    );
}

#[test]
fn restitution_dissipates_bounce_height() {
    let mut scene = PhysicsScene::new(0.01, GRAVITY);
    scene.add_body(RigidBody::rectangle(
        50.0,
        1.0,
        Vec2::new(0.0, -1.0),
        Material::fixed(0.0),
        Colour::WHITE,
    ));
    let handle = scene.add_body(ball(1.0, Vec2::new(0.0, 10.0), 0.5));

    let mut peak_after_bounce: f32 = 0.0;
    let mut bounced = false;
    for _ in 0..1500 {
        scene.step();
        let body = scene.body(handle).unwrap();
        if body.linear_velocity.y > 0.0 {
            bounced = true;
        }
        if bounced {
            peak_after_bounce = peak_after_bounce.max(body.position.y);
        }
    }

    assert!(bounced, "ball should rebound at least once");
    assert!(
        peak_after_bounce < 10.0,
        "rebound must not exceed the drop height, peaked at {}",
        peak_after_bounce
    );
}

#[test]
fn positional_correction_separates_overlapping_bodies() {
    let mut scene = PhysicsScene::new(0.01, Vec2::ZERO);
    let a = scene.add_body(ball(1.0, Vec2::ZERO, 0.0));
    let b = scene.add_body(ball(1.0, Vec2::new(1.0, 0.0), 0.0));

    let initial_gap = 1.0;
    let mut previous_gap = initial_gap;
    for _ in 0..60 {
        scene.step();
        let gap = scene
            .body(a)
            .unwrap()
            .position
            .distance(scene.body(b).unwrap().position);
        assert!(
            gap >= previous_gap - 1e-5,
            "separation must not regress: {gap} < {previous_gap}"
        );
        previous_gap = gap;
    }

    assert!(
        previous_gap > initial_gap,
        "deeply overlapping pair should have been pushed apart"
    );
}

#[test]
fn static_bodies_never_move() {
    let mut scene = PhysicsScene::new(0.01, GRAVITY);
    let floor = scene.add_body(RigidBody::rectangle(
        50.0,
        1.0,
        Vec2::ZERO,
        Material::fixed(0.3),
        Colour::WHITE,
    ));
    let wall = scene.add_body(RigidBody::rectangle(
        1.0,
        50.0,
        Vec2::new(10.0, 0.0),
        Material::fixed(0.3),
        Colour::WHITE,
    ));
    // Something dynamic to collide with both.
    scene.add_body(ball(1.0, Vec2::new(8.0, 3.0), 0.4).with_velocity(Vec2::new(5.0, 0.0)));

    for _ in 0..300 {
        scene.step();
    }

    assert_eq!(scene.body(floor).unwrap().position, Vec2::ZERO);
    assert_eq!(scene.body(wall).unwrap().position, Vec2::new(10.0, 0.0));
    assert_eq!(scene.body(floor).unwrap().linear_velocity, Vec2::ZERO);
}

#[test]
fn friction_slows_a_sliding_body() {
    let mut scene = PhysicsScene::new(0.01, GRAVITY);
    scene.add_body(RigidBody::rectangle(
        100.0,
        1.0,
        Vec2::new(0.0, -1.0),
        Material::fixed(0.0),
        Colour::WHITE,
    ));
    let handle = scene.add_body(
        ball(1.0, Vec2::new(-50.0, 1.0), 0.0).with_velocity(Vec2::new(20.0, 0.0)),
    );

    for _ in 0..200 {
        scene.step();
    }

    let slid = scene.body(handle).unwrap();
    assert!(
        slid.linear_velocity.x < 20.0,
        "friction should bleed horizontal speed, v.x = {}",
        slid.linear_velocity.x
    );
    assert!(slid.linear_velocity.x > -1.0, "friction must not reverse the slide");
}

#[test]
fn removing_a_body_mid_simulation_is_safe() {
    let mut scene = PhysicsScene::new(0.01, GRAVITY);
    let floor = scene.add_body(RigidBody::rectangle(
        50.0,
        1.0,
        Vec2::new(0.0, -1.0),
        Material::fixed(0.0),
        Colour::WHITE,
    ));
    let doomed = scene.add_body(ball(1.0, Vec2::new(0.0, 5.0), 0.2));
    let survivor = scene.add_body(ball(1.0, Vec2::new(5.0, 5.0), 0.2));

    for _ in 0..50 {
        scene.step();
    }

    let removed = scene.remove_body(doomed).expect("live handle");
    assert!(removed.position.y < 5.0);
    assert_eq!(scene.body_count(), 2);

    // Stale handle afterwards, and the scene keeps ticking.
    assert_eq!(
        scene.remove_body(doomed),
        Err(PhysicsError::BodyNotFound(doomed))
    );
    for _ in 0..50 {
        scene.step();
    }
    assert!(scene.body(survivor).is_some());
    assert!(scene.body(floor).is_some());
}

#[test]
fn slot_reuse_issues_a_distinct_handle() {
    let mut scene = PhysicsScene::default();
    let first = scene.add_body(ball(1.0, Vec2::ZERO, 0.0));
    scene.remove_body(first).unwrap();
    let second = scene.add_body(ball(1.0, Vec2::new(3.0, 0.0), 0.0));

    assert_ne!(first, second);
    assert!(scene.body(first).is_none());
    assert_relative_eq!(scene.body(second).unwrap().position.x, 3.0);
}

#[test]
fn displaced_barrier_is_flagged() {
    let mut scene = PhysicsScene::new(0.01, GRAVITY);
    let barrier = scene.add_body(RigidBody::barrier(
        Vec2::new(-10.0, 0.0),
        Vec2::new(10.0, 0.0),
        0.0,
        Colour::WHITE,
    ));

    // Gameplay code slides the barrier sideways.
    scene.body_mut(barrier).unwrap().translate(Vec2::new(2.0, 0.0));

    let segment = scene
        .body(barrier)
        .unwrap()
        .shape
        .as_segment()
        .expect("barrier is a segment");
    assert!(segment.displaced);
    assert_eq!(segment.end, Vec2::new(12.0, 0.0));
}
