use rewind2d::collision::{get_manifold, handle_collisions};
use rewind2d::*;

fn main() {
    let bodies = vec![
        Body::circle(BodyId(0), 1.0, Vector2::new(0.0, 0.0)).with_velocity(Vector2::new(2.0, 0.0)),
        Body::circle(BodyId(1), 1.0, Vector2::new(15.0, 0.0)).with_velocity(Vector2::new(-2.0, 0.0)),
        Body::boxed(BodyId(2), Mass::Dynamic(2.0), Vector2::new(0.0, 30.0), 20.0, 20.0),
        Body::wall(BodyId(3), Vector2::new(0.0, 42.0), 100.0, 10.0),
    ];

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if let Some(m) = get_manifold(&bodies, i, j) {
                println!(
                    "Manifold: {:?} vs {:?} depth={:.3} n=({:.2},{:.2})",
                    bodies[i].id, bodies[j].id, m.penetration, m.normal.x, m.normal.y
                );
            }
        }
    }

    let mut stepped = bodies.clone();
    let stats = handle_collisions(&mut stepped);
    println!(
        "handle_collisions: pairs={} contacts={} resolved={}",
        stats.pairs_tested, stats.contacts, stats.resolved
    );
    for (before, after) in bodies.iter().zip(&stepped) {
        println!(
            "  {:?} loc ({:.2},{:.2}) -> ({:.2},{:.2}) vel ({:.2},{:.2}) -> ({:.2},{:.2})",
            before.id,
            before.loc.x,
            before.loc.y,
            after.loc.x,
            after.loc.y,
            before.vel.x,
            before.vel.y,
            after.vel.x,
            after.vel.y
        );
    }
}
