use std::collections::HashSet;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::collision::handle_collisions;
use crate::error::{SimError, SimResult};
use crate::forces::{apply_air_resistance, apply_uniform_gravity, apply_universal_gravitation};
use crate::types::*;

/// Scalar simulation configuration carried by every snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldSettings {
    /// Uniform field acceleration along +y, per frame².
    #[serde(alias = "planetGravity")]
    pub gravity_field_strength: f64,
    #[serde(alias = "hasPlanetGravity")]
    pub has_uniform_gravity: bool,
    pub has_universal_gravitation: bool,
    pub universal_gravitational_constant: f64,
    pub has_air_resistance: bool,
    /// Scale of the direction-following drag force; negative opposes motion.
    pub drag_coefficient: f64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity_field_strength: 0.3,
            has_uniform_gravity: true,
            has_universal_gravitation: false,
            universal_gravitational_constant: 1.0,
            has_air_resistance: false,
            drag_coefficient: -0.05,
        }
    }
}

impl WorldSettings {
    /// No forces at all; bodies coast and collide.
    pub fn zero_gravity() -> Self {
        Self {
            has_uniform_gravity: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        for (name, value) in [
            ("gravityFieldStrength", self.gravity_field_strength),
            ("universalGravitationalConstant", self.universal_gravitational_constant),
            ("dragCoefficient", self.drag_coefficient),
        ] {
            if !value.is_finite() {
                return Err(SimError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }
}

/// One self-contained snapshot: bodies in index order plus settings.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    bodies: Vec<Body>,
    pub settings: WorldSettings,
    next_id: u64,
}

impl World {
    /// Validated construction. Body order is preserved; it fixes pair order.
    pub fn new(bodies: Vec<Body>, settings: WorldSettings) -> SimResult<Self> {
        settings.validate()?;
        let mut seen = HashSet::with_capacity(bodies.len());
        for b in &bodies {
            b.validate()?;
            if !seen.insert(b.id) {
                return Err(SimError::DuplicateId { id: b.id });
            }
        }
        let next_id = match bodies.iter().map(|b| b.id).max() {
            Some(id) => id.0.checked_add(1).ok_or(SimError::IdExhausted { id })?,
            None => 0,
        };
        Ok(Self {
            bodies,
            settings,
            next_id,
        })
    }

    pub fn empty(settings: WorldSettings) -> SimResult<Self> {
        Self::new(Vec::new(), settings)
    }

    /// Append a body under a freshly allocated id (the body's own id is replaced).
    pub fn add_body(&mut self, mut body: Body) -> SimResult<BodyId> {
        body.id = BodyId(self.next_id);
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(SimError::IdExhausted { id: body.id })?;
        body.validate()?;
        self.next_id = next_id;
        let id = body.id;
        self.bodies.push(body);
        Ok(id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Mutable access for drag edits of `loc`.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// First body in index order containing `p`.
    pub fn body_at(&self, p: Vector2) -> Option<&Body> {
        self.bodies.iter().find(|b| b.contains_point(p))
    }

    /// Next snapshot; `self` is left untouched.
    pub fn step(&self) -> World {
        self.step_with_stats().0
    }

    pub fn step_with_stats(&self) -> (World, StepStats) {
        let mut next = self.clone();
        let stats = next.advance();
        (next, stats)
    }

    fn advance(&mut self) -> StepStats {
        let s = &self.settings;
        for body in self.bodies.iter_mut() {
            if s.has_uniform_gravity {
                apply_uniform_gravity(body, s.gravity_field_strength);
            }
            if s.has_air_resistance {
                apply_air_resistance(body, s.drag_coefficient);
            }
            body.integrate();
        }

        // Accumulates into `acc`, consumed by the next step's integration.
        if s.has_universal_gravitation {
            apply_universal_gravitation(&mut self.bodies, s.universal_gravitational_constant);
        }

        let stats = handle_collisions(&mut self.bodies);
        trace!(
            "step: bodies={} pairs={} contacts={} resolved={}",
            self.bodies.len(),
            stats.pairs_tested,
            stats.contacts,
            stats.resolved
        );
        stats
    }
}
