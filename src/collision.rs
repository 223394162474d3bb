//! Manifold generation and collision response.
//!
//! Every overlapping pair goes through: positional correction, manifold
//! recomputation, then impulse resolution only if the pair still overlaps.
//! Correcting first lets shallow overlaps separate without an added bounce.

use crate::api::NarrowphaseApi;
use crate::body::Body;
use crate::narrowphase::Narrowphase;
use crate::types::*;

/// Contact between two bodies, normal pointing from `a` to `b`.
///
/// For two shapes of the same kind whose centers give no direction along the
/// normal (coincident circles, boxes level on the resolving axis), the lower
/// id keeps the narrowphase fallback axis and the higher id gets its negation,
/// so swapping the pair always negates the normal.
pub fn contact(a: &Body, b: &Body) -> Option<Contact> {
    let mut c = shape_contact(a, b)?;
    let same_kind = matches!(
        (a.shape, b.shape),
        (Shape::Circle, Shape::Circle) | (Shape::Box { .. }, Shape::Box { .. })
    );
    if same_kind && a.id > b.id && (b.loc - a.loc).dot(c.normal) == 0.0 {
        c.normal = -c.normal;
    }
    Some(c)
}

fn shape_contact(a: &Body, b: &Body) -> Option<Contact> {
    match (a.shape, b.shape) {
        (Shape::Circle, Shape::Circle) => {
            Narrowphase::overlap_circle_circle(a.loc, a.radius()?, b.loc, b.radius()?)
        }
        (Shape::Box { .. }, Shape::Box { .. }) => {
            Narrowphase::overlap_box_box(a.loc, a.half_extents(), b.loc, b.half_extents())
        }
        (Shape::Circle, Shape::Box { .. }) => {
            Narrowphase::overlap_circle_box(a.loc, a.radius()?, b.loc, b.half_extents())
        }
        (Shape::Box { .. }, Shape::Circle) => {
            // Swap and invert normal
            let c = Narrowphase::overlap_circle_box(b.loc, b.radius()?, a.loc, a.half_extents())?;
            Some(Contact { normal: -c.normal, penetration: c.penetration })
        }
    }
}

/// Manifold for bodies `a` and `b` of `bodies`, or `None` if they do not overlap.
pub fn get_manifold(bodies: &[Body], a: usize, b: usize) -> Option<Manifold> {
    let c = contact(&bodies[a], &bodies[b])?;
    Some(Manifold {
        a,
        b,
        normal: c.normal,
        penetration: c.penetration,
    })
}

/// Two distinct mutable bodies, in the order requested.
fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    assert_ne!(a, b, "a body cannot collide with itself");
    if a < b {
        let (lo, hi) = bodies.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

/// Push the pair apart along the normal, shared by inverse mass.
///
/// Only `CORRECTION_PERCENT` of the penetration beyond `CORRECTION_SLOP` is
/// removed per call; immovable bodies take no share.
pub fn positional_correction(bodies: &mut [Body], m: &Manifold) {
    let (a, b) = pair_mut(bodies, m.a, m.b);
    let (inv_a, inv_b) = (a.inverse_mass(), b.inverse_mass());
    let inv_sum = inv_a + inv_b;
    if inv_sum == 0.0 {
        return;
    }
    let depth = (m.penetration - CORRECTION_SLOP).max(0.0);
    let correction = m.normal * (depth / inv_sum * CORRECTION_PERCENT);
    a.loc -= correction * inv_a;
    b.loc += correction * inv_b;
}

/// Impulse response with fixed `RESTITUTION`.
///
/// No-op for pairs already separating along the normal, and for pairs of two
/// immovable bodies.
pub fn resolve_collision(bodies: &mut [Body], m: &Manifold) {
    let (a, b) = pair_mut(bodies, m.a, m.b);
    let vel_along_normal = (b.vel - a.vel).dot(m.normal);
    if vel_along_normal > 0.0 {
        return;
    }
    let (inv_a, inv_b) = (a.inverse_mass(), b.inverse_mass());
    let inv_sum = inv_a + inv_b;
    if inv_sum == 0.0 {
        return;
    }
    let j = -(1.0 + RESTITUTION) * vel_along_normal / inv_sum;
    let impulse = m.normal * j;
    a.vel -= impulse * inv_a;
    b.vel += impulse * inv_b;
}

/// Detect and respond to collisions over all pairs `(i, j)`, `i < j`, in
/// index order.
pub fn handle_collisions(bodies: &mut [Body]) -> StepStats {
    let n = bodies.len();
    let mut stats = StepStats::default();
    for i in 0..n {
        for j in (i + 1)..n {
            stats.pairs_tested += 1;
            let Some(m) = get_manifold(bodies, i, j) else {
                continue;
            };
            stats.contacts += 1;
            positional_correction(bodies, &m);
            if let Some(m) = get_manifold(bodies, i, j) {
                stats.resolved += 1;
                resolve_collision(bodies, &m);
            }
        }
    }
    stats
}
