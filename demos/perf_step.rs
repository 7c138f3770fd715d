use glam::Vec2;
use std::time::Instant;
use tumble::*;

fn lcg(seed: &mut u32) -> u32 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    *seed
}

fn unit(seed: &mut u32) -> f32 {
    lcg(seed) as f32 / u32::MAX as f32
}

fn main() {
    let mut world = PhysicsWorld::new(WorldConfig {
        iterations: 4,
        gravity: Vec2::new(0.0, -10.0),
        enable_timing: true,
    });
    world.add_extent(100.0).expect("valid extent width");

    let n = 200usize; // number of bodies; the pair loop is O(n^2)
    let mut seed = 1u32;
    for i in 0..n {
        let pos = Vec2::new(unit(&mut seed) * 90.0 - 45.0, unit(&mut seed) * 90.0 - 45.0);
        let vel = Vec2::new(unit(&mut seed) * 4.0 - 2.0, unit(&mut seed) * 4.0 - 2.0);
        let body = match i % 3 {
            0 => Body::circle(1.0, 0.5, pos, vel, 0.0, 0.0),
            1 => Body::triangle(1.0, 1.0, pos, vel, 0.0, 0.5),
            _ => Body::square(1.0, 1.0, pos, vel, 0.0, -0.5),
        };
        world.add_body(body.expect("valid body"));
    }

    let steps = 600usize;
    let dt = 1.0 / 60.0;
    let t0 = Instant::now();
    for _ in 0..steps {
        world.step(dt);
    }
    let total = t0.elapsed();

    let stats = world.debug_stats();
    if let Some(t) = world.timing() {
        println!(
            "N={} steps={} pairs/iter={} total={:.1}ms last: step={:.3}ms integrate={:.3}ms resolve={:.3}ms contacts={}",
            n,
            steps,
            stats.pairs_per_iteration,
            total.as_secs_f64() * 1000.0,
            t.step_ms,
            t.integrate_ms,
            t.resolve_ms,
            t.contacts
        );
    } else {
        println!(
            "N={} steps={} pairs/iter={} total={:?}",
            n, steps, stats.pairs_per_iteration, total
        );
    }
}
