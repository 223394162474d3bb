use rewind2d::*;
use std::time::Instant;

fn lcg(seed: &mut u32) -> u32 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    *seed
}

fn unit(seed: &mut u32) -> f64 {
    lcg(seed) as f64 / u32::MAX as f64
}

fn main() {
    let n = 200usize; // dynamic bodies
    let mut seed = 1u32;
    let mut world = World::empty(WorldSettings {
        has_air_resistance: true,
        ..Default::default()
    })
    .unwrap();
    for i in 0..n {
        let loc = Vector2::new(unit(&mut seed) * 2000.0, unit(&mut seed) * 1500.0);
        let vel = Vector2::new(unit(&mut seed) * 4.0 - 2.0, unit(&mut seed) * 4.0 - 2.0);
        let body = if i % 2 == 0 {
            Body::circle(BodyId(0), 0.5 + unit(&mut seed), loc)
        } else {
            Body::boxed(BodyId(0), Mass::Dynamic(1.0), loc, 12.0, 12.0)
        };
        world.add_body(body.with_velocity(vel)).unwrap();
    }
    world.add_body(Body::wall(BodyId(0), Vector2::new(1000.0, 1600.0), 2200.0, 20.0)).unwrap();

    let cfg = TimelineConfig::default();
    let mut timeline = Timeline::new(world, cfg.clone());
    let clock = SystemClock::new();
    for creating in [true, false] {
        let budget = cfg.budget(creating);
        let t0 = Instant::now();
        let added = timeline.precompute(&clock, budget);
        println!(
            "N={} creating={} budget=({} frames, {:.0}ms) added={} len={} took={:?}",
            n,
            creating,
            budget.max_frames,
            budget.max_ms,
            added,
            timeline.len(),
            t0.elapsed()
        );
    }

    let t1 = Instant::now();
    let mut sync = 0;
    for _ in 0..600 {
        sync += timeline.tick(false).synchronous;
    }
    println!(
        "600 ticks: cursor={} len={} synchronous={} took={:?}",
        timeline.cursor(),
        timeline.len(),
        sync,
        t1.elapsed()
    );
}
