//! Scenario files.
//!
//! A scenario is world settings, timeline knobs and an ordered body list.
//! Ids are assigned in file order when the world is built.
//!
//! ```yaml
//! settings:
//!   gravityFieldStrength: 0.3
//!   hasUniformGravity: true
//!   hasAirResistance: true
//!   dragCoefficient: -0.05
//!
//! timeline:
//!   fps: 60
//!   precomputeBudgetMs: 100.0
//!
//! bodies:
//!   - shape: { kind: circle }
//!     mass: 1.5
//!     loc: [300.0, 150.0]
//!     vel: [2.0, 0.0]
//!   - shape: { kind: box, width: 800.0, height: 10.0 }
//!     mass: ~              # immovable
//!     loc: [400.0, 600.0]
//!     hasGravity: false
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::SimResult;
use crate::snapshot::{ShapeRecord, default_true};
use crate::timeline::TimelineConfig;
use crate::types::*;
use crate::world::{World, WorldSettings};

/// Initial state of one body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyConfig {
    pub shape: ShapeRecord,
    /// Omitted or null = immovable.
    #[serde(default)]
    pub mass: Option<f64>,
    pub loc: [f64; 2],
    #[serde(default)]
    pub vel: [f64; 2],
    #[serde(default = "default_true")]
    pub has_gravity: bool,
}

/// Top-level scenario file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    #[serde(default)]
    pub settings: WorldSettings,
    #[serde(default)]
    pub timeline: TimelineConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a `.json` file as JSON, anything else as YAML.
    pub fn load(path: &Path) -> SimResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_yaml_str(&text)?,
        };
        info!("loaded scenario {} ({} bodies)", path.display(), cfg.bodies.len());
        Ok(cfg)
    }

    /// Validated seed world; ids are 0.. in file order.
    pub fn build_world(&self) -> SimResult<World> {
        let mut world = World::empty(self.settings.clone())?;
        for bc in &self.bodies {
            let shape = match bc.shape {
                ShapeRecord::Circle => Shape::Circle,
                ShapeRecord::Box { width, height } => Shape::Box { width, height },
            };
            world.add_body(Body {
                id: BodyId(0),
                shape,
                mass: bc.mass.map_or(Mass::Immovable, Mass::Dynamic),
                loc: Vector2::from_array(bc.loc),
                vel: Vector2::from_array(bc.vel),
                acc: Vector2::ZERO,
                has_gravity: bc.has_gravity,
            })?;
        }
        Ok(world)
    }

    /// Built-in demo: two circles and a box inside four immovable walls.
    pub fn walled_box(width: f64, height: f64) -> Self {
        let dynamic = |shape, mass, x: f64, y: f64| BodyConfig {
            shape,
            mass: Some(mass),
            loc: [x, y],
            vel: [0.0, 0.0],
            has_gravity: true,
        };
        let wall = |x: f64, y: f64, w: f64, h: f64| BodyConfig {
            shape: ShapeRecord::Box { width: w, height: h },
            mass: None,
            loc: [x, y],
            vel: [0.0, 0.0],
            has_gravity: false,
        };
        Self {
            settings: WorldSettings::default(),
            timeline: TimelineConfig::default(),
            bodies: vec![
                dynamic(ShapeRecord::Circle, 1.5, 0.3 * width, 0.25 * height),
                dynamic(ShapeRecord::Circle, 1.0, 0.6 * width, 0.5 * height),
                dynamic(ShapeRecord::Box { width: 60.0, height: 80.0 }, 2.0, 0.45 * width, 0.75 * height),
                // floor, ceiling, left, right
                wall(width / 2.0, height, width, 10.0),
                wall(width / 2.0, 0.0, width, 10.0),
                wall(0.0, height / 2.0, 10.0, height),
                wall(width, height / 2.0, 10.0, height),
            ],
        }
    }
}
