//! Plain structured form of a world for sharing and persistence.
//!
//! Records carry no behavior: primitive fields only, bodies in index order.
//! Immovable mass is written as `null` since JSON has no infinity.

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::SimResult;
use crate::types::*;
use crate::world::{World, WorldSettings};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeRecord {
    Circle,
    Box { width: f64, height: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyRecord {
    pub id: u64,
    pub shape: ShapeRecord,
    /// `None` = immovable.
    pub mass: Option<f64>,
    pub loc: [f64; 2],
    #[serde(default)]
    pub vel: [f64; 2],
    #[serde(default)]
    pub acc: [f64; 2],
    #[serde(default = "default_true")]
    pub has_gravity: bool,
}

pub(crate) fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRecord {
    #[serde(default)]
    pub settings: WorldSettings,
    pub bodies: Vec<BodyRecord>,
}

impl From<&Body> for BodyRecord {
    fn from(b: &Body) -> Self {
        Self {
            id: b.id.0,
            shape: match b.shape {
                Shape::Circle => ShapeRecord::Circle,
                Shape::Box { width, height } => ShapeRecord::Box { width, height },
            },
            mass: b.mass.value(),
            loc: b.loc.to_array(),
            vel: b.vel.to_array(),
            acc: b.acc.to_array(),
            has_gravity: b.has_gravity,
        }
    }
}

impl From<&BodyRecord> for Body {
    fn from(r: &BodyRecord) -> Self {
        Self {
            id: BodyId(r.id),
            shape: match r.shape {
                ShapeRecord::Circle => Shape::Circle,
                ShapeRecord::Box { width, height } => Shape::Box { width, height },
            },
            mass: r.mass.map_or(Mass::Immovable, Mass::Dynamic),
            loc: Vector2::from_array(r.loc),
            vel: Vector2::from_array(r.vel),
            acc: Vector2::from_array(r.acc),
            has_gravity: r.has_gravity,
        }
    }
}

impl World {
    pub fn export(&self) -> WorldRecord {
        WorldRecord {
            settings: self.settings.clone(),
            bodies: self.bodies().iter().map(BodyRecord::from).collect(),
        }
    }

    /// Rebuild a world from a record, validating it like any other world.
    pub fn import(record: &WorldRecord) -> SimResult<World> {
        let bodies = record.bodies.iter().map(Body::from).collect();
        World::new(bodies, record.settings.clone())
    }
}

impl WorldRecord {
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    fn sample() -> World {
        World::new(
            vec![
                Body::circle(BodyId(3), 1.25, Vector2::new(10.0, 20.5)).with_velocity(Vector2::new(-0.5, 2.0)),
                Body::boxed(BodyId(1), Mass::Dynamic(2.0), Vector2::new(40.0, 8.0), 7.0, 3.0),
                Body::wall(BodyId(9), Vector2::new(0.0, 100.0), 300.0, 10.0),
            ],
            WorldSettings {
                has_air_resistance: true,
                has_universal_gravitation: true,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_export_import_preserves_everything() {
        // Gravitation leaves pending acceleration on a stepped world
        let w = sample().step();
        let back = World::import(&w.export()).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let w = sample();
        let json = w.export().to_json().unwrap();
        let back = World::import(&WorldRecord::from_json(&json).unwrap()).unwrap();
        let ids: Vec<u64> = back.bodies().iter().map(|b| b.id.0).collect();
        assert_eq!(ids, vec![3, 1, 9]);
        assert_eq!(back, w);
    }

    #[test]
    fn test_immovable_is_null_mass() {
        let json = sample().export().to_json().unwrap();
        assert!(json.contains("\"mass\":null"));
        assert!(json.contains("\"kind\":\"box\""));
    }

    #[test]
    fn test_import_minimal_record_with_defaults() {
        let json = r#"{"bodies":[{"id":0,"shape":{"kind":"circle"},"mass":1.0,"loc":[1.0,2.0]}]}"#;
        let w = World::import(&WorldRecord::from_json(json).unwrap()).unwrap();
        let b = &w.bodies()[0];
        assert!(b.has_gravity);
        assert_eq!(b.vel, Vector2::ZERO);
        assert_eq!(w.settings, WorldSettings::default());
    }

    #[test]
    fn test_import_rejects_invalid_bodies() {
        let mut rec = sample().export();
        rec.bodies[0].mass = None;
        assert_eq!(World::import(&rec), Err(SimError::ImmovableCircle { id: BodyId(3) }));
        assert!(matches!(WorldRecord::from_json("{\"bodies\":"), Err(SimError::Format { .. })));
    }

    #[test]
    fn test_import_max_id_is_an_error() {
        let json = r#"{"bodies":[{"id":18446744073709551615,"shape":{"kind":"circle"},"mass":1.0,"loc":[0.0,0.0]}]}"#;
        let rec = WorldRecord::from_json(json).unwrap();
        assert_eq!(World::import(&rec), Err(SimError::IdExhausted { id: BodyId(u64::MAX) }));
    }
}
