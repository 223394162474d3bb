use crate::api::NarrowphaseApi;
use crate::error::{SimError, SimResult};
use crate::narrowphase::Narrowphase;
use crate::types::*;

/// A simulated mass point with a shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub shape: Shape,
    pub mass: Mass,
    /// Center of mass.
    pub loc: Vector2,
    pub vel: Vector2,
    /// Accumulated acceleration for the next integration; cleared by `integrate`.
    pub acc: Vector2,
    /// Whether uniform-field gravity applies to this body.
    pub has_gravity: bool,
}

impl Body {
    /// Dynamic circle at rest. Radius is `mass * CIRCLE_RADIUS_PER_MASS`.
    pub fn circle(id: BodyId, mass: f64, loc: Vector2) -> Self {
        Self {
            id,
            shape: Shape::Circle,
            mass: Mass::Dynamic(mass),
            loc,
            vel: Vector2::ZERO,
            acc: Vector2::ZERO,
            has_gravity: true,
        }
    }

    /// Box at rest.
    pub fn boxed(id: BodyId, mass: Mass, loc: Vector2, width: f64, height: f64) -> Self {
        Self {
            id,
            shape: Shape::Box { width, height },
            mass,
            loc,
            vel: Vector2::ZERO,
            acc: Vector2::ZERO,
            has_gravity: true,
        }
    }

    /// Immovable box without gravity, used for boundary walls.
    pub fn wall(id: BodyId, loc: Vector2, width: f64, height: f64) -> Self {
        Self {
            has_gravity: false,
            ..Self::boxed(id, Mass::Immovable, loc, width, height)
        }
    }

    pub fn with_velocity(mut self, vel: Vector2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_gravity(mut self, has_gravity: bool) -> Self {
        self.has_gravity = has_gravity;
        self
    }

    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        self.mass.inverse()
    }

    /// Accumulate `f / mass` into the acceleration. Immovable bodies gain nothing.
    #[inline]
    pub fn apply_force(&mut self, f: Vector2) {
        self.acc += f * self.inverse_mass();
    }

    /// Semi-implicit Euler: fold acceleration into velocity, move, then clear forces.
    #[inline]
    pub fn integrate(&mut self) {
        self.vel += self.acc;
        self.loc += self.vel;
        self.acc = Vector2::ZERO;
    }

    /// Circle radius, `None` for boxes (and for the invalid immovable circle).
    pub fn radius(&self) -> Option<f64> {
        match (self.shape, self.mass) {
            (Shape::Circle, Mass::Dynamic(m)) => Some(m * CIRCLE_RADIUS_PER_MASS),
            _ => None,
        }
    }

    pub fn half_extents(&self) -> Vector2 {
        match self.shape {
            Shape::Circle => Vector2::splat(self.radius().unwrap_or(0.0)),
            Shape::Box { width, height } => Vector2::new(width * 0.5, height * 0.5),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.loc, self.half_extents())
    }

    pub fn contains_point(&self, p: Vector2) -> bool {
        match self.shape {
            Shape::Circle => {
                Narrowphase::point_in_circle(p, self.loc, self.radius().unwrap_or(0.0))
            }
            Shape::Box { .. } => Narrowphase::point_in_box(p, self.loc, self.half_extents()),
        }
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Reject bodies that would produce silently wrong physics.
    pub fn validate(&self) -> SimResult<()> {
        let id = self.id;
        match (self.shape, self.mass) {
            (Shape::Circle, Mass::Immovable) => return Err(SimError::ImmovableCircle { id }),
            (_, Mass::Dynamic(mass)) if !(mass.is_finite() && mass > 0.0) => {
                return Err(SimError::InvalidMass { id, mass });
            }
            _ => {}
        }
        if let Shape::Box { width, height } = self.shape {
            let ok = |v: f64| v.is_finite() && v > 0.0;
            if !(ok(width) && ok(height)) {
                return Err(SimError::InvalidExtents { id, width, height });
            }
        }
        for (field, v) in [("loc", self.loc), ("vel", self.vel), ("acc", self.acc)] {
            if !v.is_finite() {
                return Err(SimError::NonFinite { id, field });
            }
        }
        Ok(())
    }
}
