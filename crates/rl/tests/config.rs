use physics::{ActionSpace, CarParams, FanOrder, KinematicCar};
use rl::{
    Adherence, CarSettings, Driver, DriverConfig, Exploration, RewardShaping, RlError, SecondGuess,
    TargetStrategy,
};

#[test]
fn empty_json_gives_the_stock_driver() {
    let config: DriverConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, DriverConfig::default());
    assert_eq!(config.sensor.ray_count, 5);
    assert_eq!(config.hidden_units, 5);
    assert_eq!(config.strategy, TargetStrategy::Nudge);
    assert_eq!(config.second_guess, None);
    assert_eq!(config.action_space(), ActionSpace::Steering);

    let sensor = config.sensor.build().unwrap();
    assert!((sensor.angle_spread() - std::f32::consts::FRAC_PI_6).abs() < 1e-6);
    assert_eq!(sensor.max_length(), 300.0);
    assert_eq!(sensor.fan(), FanOrder::CenterOut);
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let json = r#"{
        "seed": 42,
        "sensor": { "ray_count": 7, "fan": "sweep" },
        "actions": "steering-throttle",
        "strategy": { "kind": "one-hot", "scale": 5.0, "max_epochs": 3 },
        "second_guess": { "confidence_threshold": 0.7, "probability": 0.3 },
        "exploration": { "start": 0.5, "decay": 0.99 }
    }"#;
    let config: DriverConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.seed, 42);
    assert_eq!(config.sensor.ray_count, 7);
    assert_eq!(config.sensor.max_length, 300.0);
    assert_eq!(config.action_space().len(), 6);
    assert_eq!(config.strategy, TargetStrategy::ONE_HOT);
    assert_eq!(config.second_guess, Some(SecondGuess::default()));
    assert_eq!(config.exploration.min, 0.0);

    let driver = Driver::from_config(&config).unwrap();
    assert_eq!(driver.policy().input_dim(), 7);
    assert_eq!(driver.policy().action_count(), 6);
    assert_eq!(driver.sensor().fan(), FanOrder::Sweep);
}

#[test]
fn soft_uniform_base_is_optional() {
    let strategy: TargetStrategy = serde_json::from_str(r#"{ "kind": "soft-uniform" }"#).unwrap();
    assert_eq!(strategy, TargetStrategy::SoftUniform { base: None });
    let strategy: TargetStrategy =
        serde_json::from_str(r#"{ "kind": "soft-uniform", "base": 0.2 }"#).unwrap();
    assert_eq!(strategy, TargetStrategy::SoftUniform { base: Some(0.2) });
}

#[test]
fn one_hot_spreading_is_opt_in() {
    let plain: TargetStrategy =
        serde_json::from_str(r#"{ "kind": "one-hot", "scale": 5.0, "max_epochs": 3 }"#).unwrap();
    assert_eq!(plain, TargetStrategy::ONE_HOT);
    let json = r#"{ "kind": "one-hot", "scale": 2.0, "max_epochs": 4, "spread_negative": true }"#;
    let spread: TargetStrategy = serde_json::from_str(json).unwrap();
    assert_eq!(spread, TargetStrategy::OneHot { scale: 2.0, max_epochs: 4, spread_negative: true });
}

#[test]
fn invalid_settings_are_rejected() {
    let mut config = DriverConfig::default();
    config.sensor.ray_count = 0;
    assert!(matches!(Driver::from_config(&config), Err(RlError::Physics(_))));

    let mut config = DriverConfig::default();
    config.exploration.start = 1.5;
    assert!(matches!(config.validate(), Err(RlError::InvalidConfig(_))));

    let mut config = DriverConfig::default();
    config.hidden_units = 0;
    assert!(config.validate().is_err());

    let mut config = DriverConfig::default();
    config.strategy = TargetStrategy::OneHot { scale: 5.0, max_epochs: 0, spread_negative: false };
    assert!(config.validate().is_err());

    let mut config = DriverConfig::default();
    config.reward.off_track = f32::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn exploration_decays_to_its_floor() {
    let constant = Exploration::constant(0.2);
    assert_eq!(constant.rate_at(0), 0.2);
    assert_eq!(constant.rate_at(10_000), 0.2);

    let decaying = Exploration { start: 0.4, min: 0.05, decay: 0.5 };
    assert!((decaying.rate_at(0) - 0.4).abs() < 1e-6);
    assert!((decaying.rate_at(1) - 0.2).abs() < 1e-6);
    assert!((decaying.rate_at(20) - 0.05).abs() < 1e-6);
}

#[test]
fn rewards_follow_adherence() {
    let shaping = RewardShaping::default();
    assert_eq!(shaping.reward(Adherence::OnTrack), 0.1);
    assert_eq!(shaping.reward(Adherence::OffTrack), -1.0);
    assert!((shaping.reward(Adherence::Score(0.5)) - 0.05).abs() < 1e-6);
    assert!((shaping.reward(Adherence::Score(-0.5)) + 0.5).abs() < 1e-6);
    assert_eq!(shaping.reward(Adherence::Score(f32::NAN)), 0.0);
    assert!(RewardShaping::requires_reset(Adherence::OffTrack));
    assert!(!RewardShaping::requires_reset(Adherence::Score(-1.0)));
}

#[test]
fn omitted_spread_fans_evenly_over_a_half_circle() {
    let config: DriverConfig = serde_json::from_str(r#"{ "sensor": { "ray_count": 3 } }"#).unwrap();
    let sensor = config.sensor.build().unwrap();
    assert!((sensor.angle_spread() - std::f32::consts::FRAC_PI_4).abs() < 1e-6);

    let json = r#"{ "sensor": { "ray_count": 3, "angle_spread_deg": 10.0 } }"#;
    let config: DriverConfig = serde_json::from_str(json).unwrap();
    let sensor = config.sensor.build().unwrap();
    assert!((sensor.angle_spread() - 10f32.to_radians()).abs() < 1e-6);
}

#[test]
fn car_handling_is_configurable() {
    let json = r#"{ "car": { "speed": 0.8, "air_friction": 0.3 } }"#;
    let config: DriverConfig = serde_json::from_str(json).unwrap();
    let params = config.car.params().unwrap();
    assert_eq!(params.speed, 0.8);
    assert_eq!(params.air_friction, 0.3);
    assert_eq!(params.turn_speed, CarParams::default().turn_speed);
    assert_eq!(params.length, CarParams::default().length);

    let car = config.car.build().unwrap();
    assert_eq!(car.pose().position, KinematicCar::DEFAULT_SPAWN);
    assert_eq!(CarSettings::default().params().unwrap(), CarParams::default());
}

#[test]
fn invalid_car_settings_are_rejected() {
    let mut config = DriverConfig::default();
    config.car.air_friction = 1.5;
    assert!(matches!(config.validate(), Err(RlError::InvalidConfig(_))));

    let mut config = DriverConfig::default();
    config.car.min_turn_speed = 0.0;
    assert!(matches!(Driver::from_config(&config), Err(RlError::InvalidConfig(_))));

    let settings = CarSettings { speed: f32::NAN, ..CarSettings::default() };
    assert!(settings.build().is_err());
}
