//! Measuring tool: two draggable endpoints and the distance between them.
//!
//! Pure input state. The host renderer draws it; endpoints stay inside the
//! canvas bounds they were given.

use crate::api::NarrowphaseApi;
use crate::narrowphase::Narrowphase;
use crate::types::*;

/// Grab radius of an endpoint handle.
pub const RULER_HANDLE_RADIUS: f64 = 10.0;

/// One draggable endpoint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Handle {
    pub loc: Vector2,
    /// Handle position relative to the pointer while grabbed.
    grab_offset: Option<Vector2>,
}

impl Handle {
    fn new(loc: Vector2) -> Self {
        Self {
            loc,
            grab_offset: None,
        }
    }

    pub fn contains(&self, p: Vector2) -> bool {
        Narrowphase::point_in_circle(p, self.loc, RULER_HANDLE_RADIUS)
    }

    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ruler {
    handles: [Handle; 2],
    bounds: Aabb,
    shown: bool,
}

fn ordered(bounds: Aabb) -> Aabb {
    Aabb {
        min: bounds.min.min(bounds.max),
        max: bounds.min.max(bounds.max),
    }
}

impl Ruler {
    /// Hidden ruler spanning the middle of `bounds`, from the upper-left
    /// quarter point to the lower-right one.
    pub fn new(bounds: Aabb) -> Self {
        let bounds = ordered(bounds);
        let center = (bounds.min + bounds.max) * 0.5;
        let quarter = (bounds.max - bounds.min) * 0.25;
        Self {
            handles: [Handle::new(center - quarter), Handle::new(center + quarter)],
            bounds,
            shown: false,
        }
    }

    pub fn toggle(&mut self) {
        self.shown = !self.shown;
        if !self.shown {
            self.release();
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// New canvas bounds; endpoints outside them are pulled back in.
    pub fn set_bounds(&mut self, bounds: Aabb) {
        self.bounds = ordered(bounds);
        for h in &mut self.handles {
            h.loc = h.loc.clamp(self.bounds.min, self.bounds.max);
        }
    }

    pub fn handles(&self) -> &[Handle; 2] {
        &self.handles
    }

    pub fn endpoints(&self) -> (Vector2, Vector2) {
        (self.handles[0].loc, self.handles[1].loc)
    }

    pub fn distance(&self) -> f64 {
        self.handles[0].loc.distance(self.handles[1].loc)
    }

    /// Readout text: whole units, truncated.
    pub fn label(&self) -> String {
        format!("{}", self.distance().trunc())
    }

    /// Grab every endpoint under `p`. Does nothing while hidden.
    pub fn press(&mut self, p: Vector2) -> bool {
        if !self.shown {
            return false;
        }
        let mut grabbed = false;
        for h in &mut self.handles {
            if h.contains(p) {
                h.grab_offset = Some(h.loc - p);
                grabbed = true;
            }
        }
        grabbed
    }

    /// Move grabbed endpoints with the pointer. Returns true if any moved.
    pub fn drag(&mut self, p: Vector2) -> bool {
        let bounds = self.bounds;
        let mut moved = false;
        for h in &mut self.handles {
            if let Some(offset) = h.grab_offset {
                h.loc = (p + offset).clamp(bounds.min, bounds.max);
                moved = true;
            }
        }
        moved
    }

    pub fn release(&mut self) {
        for h in &mut self.handles {
            h.grab_offset = None;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.handles.iter().any(Handle::is_dragging)
    }
}
