use glam::Vec2;
use tumble::*;

fn main() {
    let mut world = PhysicsWorld::new(WorldConfig {
        iterations: 4,
        gravity: Vec2::new(0.0, -10.0),
        enable_timing: false,
    });
    world.add_extent(20.0).expect("valid extent width");

    let ball = world.add_body(
        Body::circle(1.0, 0.8, Vec2::new(-3.0, 6.0), Vec2::new(1.5, 0.0), 0.0, 0.0)
            .expect("valid circle"),
    );
    let wedge = world.add_body(
        Body::triangle(1.0, 2.0, Vec2::new(2.0, 4.0), Vec2::ZERO, 0.6, -0.4)
            .expect("valid triangle"),
    );
    let crate_ = world.add_body(
        Body::square(1.0, 2.0, Vec2::new(0.0, 8.0), Vec2::ZERO, 0.2, 0.8)
            .expect("valid square"),
    );
    println!("Inserted ball={ball:?} wedge={wedge:?} crate={crate_:?}");

    // Give the crate a sideways shove for the first tick.
    world
        .apply_force(crate_, Vec2::new(40.0, 0.0))
        .expect("valid body id");

    let dt = 1.0 / 60.0;
    for frame in 0..600 {
        world.step(dt);
        if frame % 60 == 0 {
            for (id, b) in world.bodies().iter().enumerate() {
                println!(
                    "t={:.1}s body={} pos=({:.2},{:.2}) vel=({:.2},{:.2}) rot={:.2}",
                    frame as f32 * dt,
                    id,
                    b.position.x,
                    b.position.y,
                    b.velocity.x,
                    b.velocity.y,
                    b.orientation
                );
            }
        }
    }

    let stats = world.debug_stats();
    println!(
        "done: boundaries={} bodies={} pairs/iter={}",
        stats.boundaries, stats.bodies, stats.pairs_per_iteration
    );
}
