use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use physics::{cast_sensors, rectangle_edges, Pose, Segment, SensorConfig};

fn bench_cast_sensors(c: &mut Criterion) {
    // Forty road sides around the origin, four edges each.
    let obstacles: Vec<Segment> = (0..40)
        .flat_map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / 40.0;
            rectangle_edges(Vec2::from_angle(angle) * 250.0, 60.0, 20.0, angle + 1.5)
        })
        .collect();
    let config = SensorConfig::default();
    let pose = Pose::new(Vec2::ZERO, 0.3);

    c.bench_function("cast_sensors_5x160", |b| {
        b.iter(|| cast_sensors(black_box(&pose), black_box(&obstacles), &config));
    });
}

criterion_group!(benches, bench_cast_sensors);
criterion_main!(benches);
