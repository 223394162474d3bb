use crate::ruler::Ruler;
use crate::types::*;
use crate::world::World;

/// Primitive intersection signatures used by manifold generation.
///
/// Every overlap test returns `None` when the shapes do not overlap; a touching
/// pair (zero penetration) counts as separate.
pub trait NarrowphaseApi {
    // Overlaps --------------------------------------------------------------

    /// Normal points from circle 0 to circle 1.
    fn overlap_circle_circle(c0: Vector2, r0: f64, c1: Vector2, r1: f64) -> Option<Contact>;
    /// Normal points from box 0 to box 1, along the axis of least penetration.
    fn overlap_box_box(c0: Vector2, h0: Vector2, c1: Vector2, h1: Vector2) -> Option<Contact>;
    /// Normal points from the circle to the box.
    fn overlap_circle_box(c: Vector2, r: f64, box_c: Vector2, box_h: Vector2) -> Option<Contact>;

    // Points ----------------------------------------------------------------

    fn point_in_box(p: Vector2, c: Vector2, h: Vector2) -> bool;
    fn point_in_circle(p: Vector2, c: Vector2, r: f64) -> bool;
}

/// Monotonic time source used for precompute budgets.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> f64;
}

/// Whatever owns the scenario being played: supplies the seed world and hears
/// about selection and drag edits.
pub trait SceneHost {
    /// Seed world, consumed once per reset.
    fn initial_state(&mut self) -> World;

    /// Bodies the renderer should highlight.
    fn selected_ids(&self) -> Vec<BodyId> {
        Vec::new()
    }

    fn on_body_selected(&mut self, _id: BodyId) {}

    /// Called after a drag edited the seed world.
    fn on_initial_state_edited(&mut self, _world: &World) {}
}

/// Draws one world snapshot. The simulation core never draws.
pub trait Renderer {
    fn draw(&mut self, world: &World, selected: &[BodyId]);

    /// Called after `draw` while the measuring tool is shown.
    fn draw_ruler(&mut self, _ruler: &Ruler) {}
}
