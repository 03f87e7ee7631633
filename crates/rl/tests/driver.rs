use glam::Vec2;
use physics::{ActionSpace, KinematicCar, Pose, Segment, SensorConfig};
use rl::{
    ActionIndex, Adherence, CarTrackEnv, Driver, DriverConfig, DrivingWorld, Exploration, Policy,
    RewardShaping, RlError, TargetStrategy, Trainer,
};

/// Scripted world: stays put, reports a fixed adherence, counts calls.
struct ScriptedWorld {
    obstacles: Vec<Segment>,
    adherence: Adherence,
    actions: usize,
    actuated: Vec<ActionIndex>,
    resets: usize,
}

impl ScriptedWorld {
    fn new(adherence: Adherence) -> Self {
        let wall = Segment::new(Vec2::new(-100.0, -60.0), Vec2::new(100.0, -60.0));
        Self { obstacles: vec![wall], adherence, actions: 3, actuated: Vec::new(), resets: 0 }
    }
}

impl DrivingWorld for ScriptedWorld {
    fn pose(&self) -> Pose {
        Pose::new(Vec2::ZERO, -std::f32::consts::FRAC_PI_2)
    }

    fn obstacles(&self) -> &[Segment] {
        &self.obstacles
    }

    fn action_count(&self) -> usize {
        self.actions
    }

    fn actuate(&mut self, action: ActionIndex) {
        self.actuated.push(action);
    }

    fn adherence(&self) -> Adherence {
        self.adherence
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

fn driver(strategy: TargetStrategy) -> Driver {
    let config = DriverConfig { seed: 5, strategy, ..DriverConfig::default() };
    Driver::from_config(&config).unwrap()
}

#[test]
fn leaving_the_track_is_punished_and_resets() {
    let mut driver = driver(TargetStrategy::Nudge);
    let mut world = ScriptedWorld::new(Adherence::OffTrack);
    let report = driver.tick(&mut world);

    assert_eq!(report.tick, 0);
    assert_eq!(report.reward, -1.0);
    assert!(report.reset);
    assert!(report.loss.is_some());
    assert_eq!(world.resets, 1);
    assert_eq!(world.actuated, vec![report.action]);
    assert_eq!(driver.stats().resets, 1);
    assert_eq!(driver.stats().ticks_since_reset, 0);
}

#[test]
fn staying_on_track_accumulates_reward() {
    let mut driver = driver(TargetStrategy::ONE_HOT);
    let mut world = ScriptedWorld::new(Adherence::OnTrack);
    for i in 0..25 {
        let report = driver.tick(&mut world);
        assert_eq!(report.tick, i);
        assert!((report.reward - 0.1).abs() < 1e-6);
        assert!(!report.reset);
        assert!(report.action.index() < 3);
    }
    let stats = driver.stats();
    assert_eq!(stats.ticks, 25);
    assert_eq!(stats.resets, 0);
    assert_eq!(stats.best_run, 25);
    assert!((stats.total_reward - 2.5).abs() < 1e-4);
    assert_eq!(world.resets, 0);
    assert_eq!(driver.trainer().updates(), 25);
}

#[test]
fn readings_come_from_the_world_pose() {
    let mut driver = driver(TargetStrategy::Nudge);
    let mut world = ScriptedWorld::new(Adherence::OnTrack);
    let report = driver.tick(&mut world);
    assert_eq!(report.reading.len(), 5);
    // The centre ray points straight at the wall 60 units up, 10 behind the anchor.
    assert!((report.reading[0] - 50.0).abs() < 1e-3, "{:?}", report.reading);
    assert!(report.reading.iter().all(|d| (0.0..=300.0).contains(d)));
}

#[test]
fn continuous_scores_never_reset() {
    let mut driver = driver(TargetStrategy::SoftUniform { base: None });
    let mut world = ScriptedWorld::new(Adherence::Score(-0.5));
    let report = driver.tick(&mut world);
    assert!((report.reward + 0.5).abs() < 1e-6);
    assert!(!report.reset);
    assert_eq!(world.resets, 0);
}

#[test]
fn best_run_survives_resets() {
    let mut driver = driver(TargetStrategy::Nudge);
    let mut world = ScriptedWorld::new(Adherence::OnTrack);
    for _ in 0..4 {
        driver.tick(&mut world);
    }
    world.adherence = Adherence::OffTrack;
    driver.tick(&mut world);
    world.adherence = Adherence::OnTrack;
    driver.tick(&mut world);

    let stats = driver.stats();
    assert_eq!(stats.best_run, 5);
    assert_eq!(stats.ticks_since_reset, 1);
    assert_eq!(stats.resets, 1);
}

#[test]
fn mismatched_dimensions_are_caught() {
    let policy = Policy::mlp(3, 5, 3, 300.0, 0.01, 0).unwrap();
    let sensor = SensorConfig::default();
    let result = Driver::new(
        policy,
        Trainer::default(),
        sensor,
        RewardShaping::default(),
        Exploration::default(),
    );
    assert!(matches!(result, Err(RlError::DimensionMismatch { expected: 3, actual: 5, .. })));

    let driver = driver(TargetStrategy::Nudge);
    let mut world = ScriptedWorld::new(Adherence::OnTrack);
    assert!(driver.check_world(&world).is_ok());
    world.actions = 6;
    assert!(matches!(
        driver.check_world(&world),
        Err(RlError::DimensionMismatch { expected: 3, actual: 6, .. })
    ));
}

#[test]
fn car_crossing_a_road_side_is_put_back_at_spawn() {
    let spawn = KinematicCar::DEFAULT_SPAWN;
    let across = Segment::new(spawn - Vec2::new(60.0, 0.0), spawn + Vec2::new(60.0, 0.0));
    let mut env = CarTrackEnv::new(KinematicCar::default(), ActionSpace::Steering, vec![across]);
    let mut driver = driver(TargetStrategy::ONE_HOT);
    driver.check_world(&env).unwrap();

    let report = driver.tick(&mut env);
    assert_eq!(report.adherence, Adherence::OffTrack);
    assert!(report.reset);
    assert_eq!(env.car().pose().position, spawn);
}

#[test]
fn car_on_open_ground_keeps_driving() {
    let mut env = CarTrackEnv::new(KinematicCar::default(), ActionSpace::Steering, Vec::new());
    let mut driver = driver(TargetStrategy::Nudge);
    for _ in 0..10 {
        let report = driver.tick(&mut env);
        assert_eq!(report.adherence, Adherence::OnTrack);
        assert_eq!(&*report.reading, &[300.0; 5]);
    }
    assert_ne!(env.car().pose().position, KinematicCar::DEFAULT_SPAWN);
}

#[test]
fn swapping_the_track_puts_the_car_back_at_spawn() {
    let mut env = CarTrackEnv::new(KinematicCar::default(), ActionSpace::Steering, Vec::new());
    let mut driver = driver(TargetStrategy::Nudge);
    for _ in 0..5 {
        driver.tick(&mut env);
    }
    assert_ne!(env.car().pose().position, KinematicCar::DEFAULT_SPAWN);

    let wall = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
    env.set_obstacles(vec![wall]);
    assert_eq!(env.car().pose().position, KinematicCar::DEFAULT_SPAWN);
    assert_eq!(env.car().velocity(), Vec2::ZERO);
    assert_eq!(env.obstacles(), &[wall]);
}
