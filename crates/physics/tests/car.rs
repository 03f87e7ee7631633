use glam::Vec2;
use physics::{ActionSpace, Command, KinematicCar, PhysicsError, Segment, Steer, Throttle};

#[test]
fn accelerating_moves_along_heading() {
    let mut car = KinematicCar::default();
    let start = car.pose().position;
    car.step(Command::new(Steer::Straight, Throttle::Accelerate));
    let moved = car.pose().position - start;
    // Default heading points up the screen (-y), commanded speed 0.5 * 10.
    assert!(moved.x.abs() < 1e-4);
    assert!((moved.y + 5.0).abs() < 1e-4);
    assert!((car.pose().speed - 5.0).abs() < 1e-4);
}

#[test]
fn parked_car_does_not_turn() {
    let mut car = KinematicCar::default();
    let heading = car.pose().heading;
    car.step(Command::new(Steer::Left, Throttle::Coast));
    assert_eq!(car.pose().heading, heading);
}

#[test]
fn turn_rate_scales_with_speed() {
    let mut car = KinematicCar::default();
    let heading = car.pose().heading;
    car.step(Command::new(Steer::Right, Throttle::Accelerate));
    // speed 5 against min_turn_speed 10 halves the 0.05 turn rate.
    assert!((car.pose().heading - heading - 0.025).abs() < 1e-6);

    let heading = car.pose().heading;
    car.step(Command::new(Steer::Left, Throttle::Accelerate));
    assert!((car.pose().heading - heading + 0.025).abs() < 1e-6);
}

#[test]
fn coasting_bleeds_speed() {
    let mut car = KinematicCar::default();
    car.step(Command::new(Steer::Straight, Throttle::Accelerate));
    car.step(Command::new(Steer::Straight, Throttle::Coast));
    assert!((car.velocity().length() - 4.5).abs() < 1e-4);
}

#[test]
fn reversing_moves_backwards() {
    let mut car = KinematicCar::default();
    let start = car.pose().position;
    car.step(Command::new(Steer::Straight, Throttle::Reverse));
    assert!(car.pose().position.y > start.y);
}

#[test]
fn reset_returns_to_spawn() {
    let mut car = KinematicCar::default();
    for _ in 0..10 {
        car.step(Command::new(Steer::Right, Throttle::Accelerate));
    }
    car.reset();
    assert_eq!(car.pose().position, KinematicCar::DEFAULT_SPAWN);
    assert_eq!(car.pose().heading, KinematicCar::DEFAULT_HEADING);
    assert_eq!(car.velocity(), Vec2::ZERO);
}

#[test]
fn overlap_detects_wall_through_body() {
    let car = KinematicCar::default();
    let through = Segment::new(Vec2::new(300.0, 300.0), Vec2::new(500.0, 300.0));
    let far = Segment::new(Vec2::new(300.0, 600.0), Vec2::new(500.0, 600.0));
    assert!(car.overlaps(&[through]));
    assert!(!car.overlaps(&[far]));
}

#[test]
fn action_spaces_map_indices_to_commands() {
    assert_eq!(ActionSpace::Steering.len(), 3);
    assert_eq!(ActionSpace::SteeringThrottle.len(), 6);
    assert_eq!(
        ActionSpace::Steering.command(0).unwrap(),
        Command::new(Steer::Left, Throttle::Accelerate)
    );
    assert_eq!(
        ActionSpace::SteeringThrottle.command(4).unwrap(),
        Command::new(Steer::Straight, Throttle::Coast)
    );
    assert_eq!(
        ActionSpace::Steering.command(3),
        Err(PhysicsError::ActionOutOfRange { index: 3, count: 3 })
    );
}
