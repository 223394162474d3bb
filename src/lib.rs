//! rewind2d: 2D circle/box physics with a scrubbable, append-only frame timeline

pub mod types;
pub mod error;
pub mod api;
pub mod body;
pub mod forces;
pub mod narrowphase;
pub mod collision;
pub mod world;
pub mod timeline;
pub mod ruler;
pub mod session;
pub mod snapshot;
pub mod config;
pub mod clock;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::error::{SimError, SimResult};
pub use crate::body::Body;
pub use crate::world::{World, WorldSettings};
pub use crate::timeline::{PrecomputeBudget, TickReport, Timeline, TimelineConfig};
pub use crate::ruler::{Handle, Ruler, RULER_HANDLE_RADIUS};
pub use crate::session::{Session, SessionOptions};
pub use crate::snapshot::{BodyRecord, ShapeRecord, WorldRecord};
pub use crate::config::{BodyConfig, ScenarioConfig};
pub use crate::clock::SystemClock;
