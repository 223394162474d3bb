use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D vector used everywhere in the simulation (f64, `Copy`, value semantics).
pub type Vector2 = DVec2;

/// Circle radius per unit of mass. Circles grow with their inertia.
pub const CIRCLE_RADIUS_PER_MASS: f64 = 10.0;

/// Restitution applied to every colliding pair (no per-material coefficients).
pub const RESTITUTION: f64 = 0.8;

/// Fraction of the (slop-adjusted) penetration removed per positional correction.
pub const CORRECTION_PERCENT: f64 = 0.2;

/// Penetration below this depth is left alone by positional correction.
pub const CORRECTION_SLOP: f64 = 0.01;

/// Upper bound on the magnitude of a single pairwise gravitational force.
pub const GRAVITATION_FORCE_CAP: f64 = 1.0;

/// Stable body identifier. Assigned once, never reused within a world lineage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u64);

/// Mass of a body. `Immovable` replaces the floating-point infinity sentinel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Mass {
    Dynamic(f64),
    /// Static boundary: no acceleration, no displacement, no velocity change.
    Immovable,
}

impl Mass {
    /// `1/m`, or exactly zero for immovable bodies.
    #[inline]
    pub fn inverse(self) -> f64 {
        match self {
            Mass::Dynamic(m) => 1.0 / m,
            Mass::Immovable => 0.0,
        }
    }

    /// Finite mass value, if any.
    #[inline]
    pub fn value(self) -> Option<f64> {
        match self {
            Mass::Dynamic(m) => Some(m),
            Mass::Immovable => None,
        }
    }

    #[inline]
    pub fn is_immovable(self) -> bool {
        matches!(self, Mass::Immovable)
    }
}

/// Supported body shapes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    /// Circle whose radius is derived from the body's mass.
    Circle,
    /// Axis-aligned box centered on the body's location.
    Box { width: f64, height: f64 },
}

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector2,
    pub max: Vector2,
}

impl Aabb {
    pub fn from_center(center: Vector2, half_extents: Vector2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn contains(&self, p: Vector2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Result of a primitive overlap test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first shape towards the second.
    pub normal: Vector2,
    /// Penetration depth (≥ 0).
    pub penetration: f64,
}

/// One colliding pair inside a single world snapshot.
///
/// `a` and `b` index into the snapshot's body list; a manifold is never carried
/// over to another snapshot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Manifold {
    pub a: usize,
    pub b: usize,
    /// Unit normal pointing from body `a` towards body `b`.
    pub normal: Vector2,
    pub penetration: f64,
}

/// Per-step collision counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Unordered pairs examined (n*(n-1)/2).
    pub pairs_tested: usize,
    /// Pairs overlapping before correction.
    pub contacts: usize,
    /// Pairs still overlapping after correction, handed to impulse resolution.
    pub resolved: usize,
}
