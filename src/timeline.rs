//! Append-only frame log with a playback cursor.
//!
//! Frame `k` is the world after `k` steps from the seed. Frames are never
//! rewritten; the only way to change history is `reset`, which discards it.
//! Look-ahead is kept topped up per tick: a few frames when below the low-water
//! mark, synchronously when below the critical mark.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::api::Clock;
use crate::world::World;

/// Buffering and playback knobs. Frame counts are in frames, not seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineConfig {
    /// Nominal tick rate.
    pub fps: u32,
    /// Frame target for the initial precompute during playback.
    pub precompute_frames: usize,
    pub precompute_budget_ms: f64,
    /// Frame target for the initial precompute while authoring a scenario.
    pub creating_precompute_frames: usize,
    pub creating_budget_ms: f64,
    /// Below this look-ahead, each tick appends `catch_up_frames`.
    pub low_water_frames: usize,
    /// Below this look-ahead, a tick appends until it is restored.
    pub critical_frames: usize,
    pub catch_up_frames: usize,
    /// Scrub slider length is rounded up to a multiple of this.
    pub slider_interval_frames: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::at_fps(60)
    }
}

impl TimelineConfig {
    /// Defaults scaled to a tick rate: 30 s precompute, 10 s low water, 0.2 s critical.
    pub fn at_fps(fps: u32) -> Self {
        let f = fps as usize;
        Self {
            fps,
            precompute_frames: 30 * f,
            precompute_budget_ms: 100.0,
            creating_precompute_frames: 2 * f,
            creating_budget_ms: 14.0,
            low_water_frames: 10 * f,
            critical_frames: (f as f64 * 0.2).ceil() as usize,
            catch_up_frames: 3,
            slider_interval_frames: 30 * f,
        }
    }

    pub fn budget(&self, creating: bool) -> PrecomputeBudget {
        if creating {
            PrecomputeBudget {
                max_frames: self.creating_precompute_frames,
                max_ms: self.creating_budget_ms,
            }
        } else {
            PrecomputeBudget {
                max_frames: self.precompute_frames,
                max_ms: self.precompute_budget_ms,
            }
        }
    }
}

/// Precompute stops at whichever limit is hit first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrecomputeBudget {
    /// Target timeline length (not frames to add).
    pub max_frames: usize,
    pub max_ms: f64,
}

/// What one tick did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub cursor: usize,
    pub len: usize,
    /// Frames appended by the low-water catch-up.
    pub catch_up: usize,
    /// Frames appended synchronously to restore the critical look-ahead.
    pub synchronous: usize,
    pub advanced: bool,
}

#[derive(Clone, Debug)]
pub struct Timeline {
    frames: Vec<World>,
    cursor: usize,
    max_frame_reached: usize,
    cfg: TimelineConfig,
}

impl Timeline {
    pub fn new(seed: World, cfg: TimelineConfig) -> Self {
        Self {
            frames: vec![seed],
            cursor: 0,
            max_frame_reached: 0,
            cfg,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.cfg
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Never true: a timeline always holds its seed.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, k: usize) -> Option<&World> {
        self.frames.get(k)
    }

    pub fn frames(&self) -> &[World] {
        &self.frames
    }

    pub fn seed(&self) -> &World {
        &self.frames[0]
    }

    pub fn latest(&self) -> &World {
        &self.frames[self.frames.len() - 1]
    }

    /// Frame under the playback cursor.
    pub fn current(&self) -> &World {
        &self.frames[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_frame_reached(&self) -> usize {
        self.max_frame_reached
    }

    /// Buffered frames from the cursor on, including the current one.
    pub fn look_ahead(&self) -> usize {
        self.frames.len() - self.cursor
    }

    /// Append one frame stepped from the latest.
    pub fn extend(&mut self) {
        let next = self.latest().step();
        self.frames.push(next);
    }

    fn extend_by(&mut self, n: usize) {
        self.frames.reserve(n);
        for _ in 0..n {
            self.extend();
        }
    }

    /// Fill towards `budget.max_frames` until the time budget runs out.
    /// Returns the number of frames appended.
    pub fn precompute<C: Clock>(&mut self, clock: &C, budget: PrecomputeBudget) -> usize {
        let start = clock.now_ms();
        let before = self.frames.len();
        while self.frames.len() < budget.max_frames {
            if clock.now_ms() - start >= budget.max_ms {
                debug!(
                    "precompute: time budget {:.1}ms exhausted at {}/{} frames",
                    budget.max_ms,
                    self.frames.len(),
                    budget.max_frames
                );
                break;
            }
            self.extend();
        }
        let added = self.frames.len() - before;
        debug!(
            "precompute: +{} frames in {:.3}ms (len={})",
            added,
            clock.now_ms() - start,
            self.frames.len()
        );
        added
    }

    /// One scheduler tick: top up look-ahead, then advance unless paused.
    pub fn tick(&mut self, paused: bool) -> TickReport {
        self.max_frame_reached = self.max_frame_reached.max(self.cursor);

        let mut report = TickReport::default();
        if self.look_ahead() < self.cfg.low_water_frames {
            self.extend_by(self.cfg.catch_up_frames);
            report.catch_up = self.cfg.catch_up_frames;
        }
        while self.look_ahead() < self.cfg.critical_frames.max(2) {
            self.extend();
            report.synchronous += 1;
        }
        if report.synchronous > 0 {
            debug!("tick: {} frames generated synchronously", report.synchronous);
        }

        if !paused {
            self.cursor += 1;
            report.advanced = true;
        }
        report.cursor = self.cursor;
        report.len = self.frames.len();
        report
    }

    /// Jump the cursor, stepping synchronously if `index` is not buffered yet.
    pub fn seek(&mut self, index: usize) {
        if index >= self.frames.len() {
            self.extend_by(index + 1 - self.frames.len());
        }
        self.cursor = index;
    }

    /// Jump to a normalized slider position in `[0, 1]`.
    pub fn scrub(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let index = (fraction * self.slider_frame_length() as f64).floor() as usize;
        self.seek(index);
    }

    /// Frames spanned by the scrub slider: covers the furthest frame reached
    /// plus one second, rounded up to the slider interval.
    pub fn slider_frame_length(&self) -> usize {
        let interval = self.cfg.slider_interval_frames.max(1);
        (self.max_frame_reached + self.cfg.fps as usize).div_ceil(interval) * interval
    }

    pub fn slider_position(&self) -> f64 {
        self.cursor as f64 / self.slider_frame_length() as f64
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.cursor as f64 / self.cfg.fps.max(1) as f64
    }

    /// Cursor time as `SSS.mmm`.
    pub fn elapsed_label(&self) -> String {
        let seconds = self.elapsed_seconds();
        let whole = seconds.floor() as u64;
        let millis = ((seconds % 1.0) * 1000.0).floor() as u64;
        format!("{whole:03}.{millis:03}")
    }

    /// Discard every frame and start over from `seed`. The high-water mark is kept.
    pub fn reset(&mut self, seed: World) {
        info!("timeline reset (discarding {} frames)", self.frames.len());
        self.frames.clear();
        self.frames.push(seed);
        self.cursor = 0;
    }
}
