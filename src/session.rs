//! Playback controller: owns the timeline and the interactive state around it
//! (pause, authoring mode, drag in progress, the ruler). The host scheduler
//! calls `tick` at a fixed rate; input handlers call the pointer methods.

use log::info;

use crate::api::{Clock, Renderer, SceneHost};
use crate::ruler::Ruler;
use crate::snapshot::WorldRecord;
use crate::timeline::{TickReport, Timeline, TimelineConfig};
use crate::types::*;
use crate::world::World;

#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Authoring mode: smaller precompute budget, dragging allowed while paused at frame 0.
    pub creating: bool,
    pub timeline: TimelineConfig,
    /// Drawable area in world units; ruler endpoints stay inside it.
    pub canvas: Aabb,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            creating: false,
            timeline: TimelineConfig::default(),
            canvas: Aabb {
                min: Vector2::ZERO,
                max: Vector2::new(800.0, 600.0),
            },
        }
    }
}

pub struct Session<H: SceneHost, C: Clock> {
    host: H,
    clock: C,
    creating: bool,
    paused: bool,
    timeline: Timeline,
    dragged: Option<BodyId>,
    last_pointer: Vector2,
    ruler: Ruler,
}

impl<H: SceneHost, C: Clock> Session<H, C> {
    pub fn new(mut host: H, clock: C, options: SessionOptions) -> Self {
        let seed = host.initial_state();
        let timeline = Timeline::new(seed, options.timeline);
        let mut session = Self {
            host,
            clock,
            creating: options.creating,
            paused: false,
            timeline,
            dragged: None,
            last_pointer: Vector2::ZERO,
            ruler: Ruler::new(options.canvas),
        };
        session.precompute();
        session
    }

    fn precompute(&mut self) {
        if self.creating && self.paused {
            return;
        }
        let budget = self.timeline.config().budget(self.creating);
        self.timeline.precompute(&self.clock, budget);
    }

    /// Reseed from the host and rebuild the buffer.
    pub fn restart(&mut self, unpause: bool) {
        if unpause {
            self.paused = false;
        }
        let seed = self.host.initial_state();
        info!("restart: {} bodies", seed.len());
        self.timeline.reset(seed);
        self.dragged = None;
        self.precompute();
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Pause and rewind to the seed for editing.
    pub fn edit(&mut self) {
        self.paused = true;
        self.timeline.seek(0);
    }

    /// Per-tick entry point for the scheduler.
    pub fn tick(&mut self) -> TickReport {
        self.timeline.tick(self.paused)
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let selected = self.host.selected_ids();
        renderer.draw(self.timeline.current(), &selected);
        if self.ruler.is_shown() {
            renderer.draw_ruler(&self.ruler);
        }
    }

    pub fn toggle_ruler(&mut self) {
        self.ruler.toggle();
    }

    pub fn ruler_shown(&self) -> bool {
        self.ruler.is_shown()
    }

    pub fn ruler(&self) -> &Ruler {
        &self.ruler
    }

    /// The canvas was resized.
    pub fn set_canvas(&mut self, canvas: Aabb) {
        self.ruler.set_bounds(canvas);
    }

    pub fn scrub(&mut self, fraction: f64) {
        self.timeline.scrub(fraction);
    }

    pub fn elapsed_label(&self) -> String {
        self.timeline.elapsed_label()
    }

    pub fn slider_position(&self) -> f64 {
        self.timeline.slider_position()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn current(&self) -> &World {
        self.timeline.current()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Body under `p` in the displayed frame.
    pub fn body_at(&self, p: Vector2) -> Option<BodyId> {
        self.timeline.current().body_at(p).map(|b| b.id)
    }

    /// Select the body under `p`, telling the host about a hit.
    pub fn select_at(&mut self, p: Vector2) -> Option<BodyId> {
        let id = self.body_at(p)?;
        self.host.on_body_selected(id);
        Some(id)
    }

    /// Bodies can only be dragged while authoring, paused, on the seed frame.
    pub fn can_drag(&self) -> bool {
        self.creating && self.paused && self.timeline.cursor() == 0
    }

    /// Pointer down: a shown ruler endpoint under `p` takes the press;
    /// otherwise select, and start a drag when allowed. Returns the dragged body.
    pub fn press(&mut self, p: Vector2) -> Option<BodyId> {
        if self.ruler.press(p) {
            self.dragged = None;
            return None;
        }
        self.select_at(p);
        if !self.can_drag() {
            self.dragged = None;
            return None;
        }
        self.dragged = self.body_at(p);
        self.last_pointer = p;
        self.dragged
    }

    /// Pointer move: drag grabbed ruler endpoints, or apply the drag delta to
    /// the seed world.
    ///
    /// The edited seed replaces the timeline (later frames were stepped from the
    /// old seed and are discarded). Returns true when an endpoint or body moved.
    pub fn move_pointer(&mut self, p: Vector2) -> bool {
        if self.ruler.drag(p) {
            return true;
        }
        if !self.can_drag() {
            self.dragged = None;
        }
        let Some(id) = self.dragged else {
            return false;
        };
        let mut seed = self.timeline.seed().clone();
        let Some(body) = seed.body_mut(id) else {
            self.dragged = None;
            return false;
        };
        body.loc += p - self.last_pointer;
        self.last_pointer = p;
        self.host.on_initial_state_edited(&seed);
        self.timeline.reset(seed);
        true
    }

    pub fn release(&mut self) {
        self.ruler.release();
        self.dragged = None;
    }

    pub fn dragged(&self) -> Option<BodyId> {
        self.dragged
    }

    /// Seed world in its transport-safe form.
    pub fn export_seed(&self) -> WorldRecord {
        self.timeline.seed().export()
    }
}
