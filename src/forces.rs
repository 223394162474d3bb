//! Force models. Each function only accumulates into `Body::acc`; nothing here
//! integrates.

use crate::body::Body;
use crate::types::*;

/// Uniform field gravity along +y.
///
/// The field vector is pre-multiplied by the body's mass so that `apply_force`
/// divides it back out: every body falls at `field_strength` per frame².
/// Immovable bodies are skipped.
pub fn apply_uniform_gravity(body: &mut Body, field_strength: f64) {
    if !body.has_gravity {
        return;
    }
    if let Some(m) = body.mass.value() {
        body.apply_force(Vector2::new(0.0, field_strength) * m);
    }
}

/// Direction-following drag: `normalize(vel) * drag_coefficient`.
///
/// The coefficient carries the sign, so it must be negative to slow a body
/// down. A body at rest feels nothing.
pub fn apply_air_resistance(body: &mut Body, drag_coefficient: f64) {
    let f = body.vel.normalize_or_zero() * drag_coefficient;
    body.apply_force(f);
}

/// Pairwise attraction force on `a` from `b`, or `None` for degenerate pairs.
///
/// Pairs involving an immovable body, and coincident pairs, produce no force.
/// Magnitude is `min(G·m1·m2 / r², GRAVITATION_FORCE_CAP)`.
pub fn gravitation_between(a: &Body, b: &Body, constant: f64) -> Option<Vector2> {
    let (m1, m2) = (a.mass.value()?, b.mass.value()?);
    let offset = b.loc - a.loc;
    let r = offset.length();
    if !(r > 0.0) {
        return None;
    }
    let magnitude = (constant * m1 * m2 / (r * r)).min(GRAVITATION_FORCE_CAP);
    Some(offset.normalize_or_zero() * magnitude)
}

/// Newtonian gravitation over every unordered pair `(i, j)`, `i < j`.
///
/// Body `i` receives `+f`, body `j` exactly `-f`.
pub fn apply_universal_gravitation(bodies: &mut [Body], constant: f64) {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let Some(f) = gravitation_between(&bodies[i], &bodies[j], constant) else {
                continue;
            };
            bodies[i].apply_force(f);
            bodies[j].apply_force(-f);
        }
    }
}
