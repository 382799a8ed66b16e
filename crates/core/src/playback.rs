//! Simulation playback: a timed state machine stepping through a run.
//!
//! The controller owns the only notion of "current time" in the system. All
//! views (grid canvas, 3D cell mesh, statistics panels) are passive
//! [`FrameSink`]s that receive `(frame, stats)` for the current index and
//! never advance on their own, so they can never drift apart.
//!
//! Time is injected through [`PlaybackController::advance`]; the controller
//! never reads a wall clock. The tick timer lives in a single `Option` slot,
//! so replacing it (speed change, pause) structurally cancels the previous
//! one — duplicate timers causing double-speed playback cannot be expressed.

use crate::core_types::{FrameStats, SimulationFrame, SimulationRun};
use tracing::{debug, info, warn};

/// Tick interval at 1x speed, in milliseconds.
pub const BASE_INTERVAL_MS: f32 = 200.0;

/// A passive observer of playback, invoked once per presented frame.
///
/// Within one tick the controller updates its aggregate statistics before any
/// sink runs, so a sink reading [`PlaybackController::aggregate`] always sees
/// values consistent with the frame it was handed.
pub trait FrameSink {
    fn present(&mut self, frame: &SimulationFrame, stats: &FrameStats);
}

/// Playback lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No run loaded.
    Idle,
    /// Run loaded, positioned at some index, not advancing.
    Loaded,
    Playing,
    Paused,
    /// The final frame has been presented; `play()` is a no-op until the run
    /// is re-seeked or reloaded.
    Completed,
}

/// Aggregate statistics accumulated across presented frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateStats {
    /// Running maximum of `burning_pct` over presented frames.
    pub peak_burning_pct: f32,
    /// `burned_pct` of the most recently presented frame.
    pub total_burned_pct: f32,
    /// `burned_pct / index`, defined once the index is positive.
    pub spread_rate_pct_per_step: Option<f32>,
}

/// Armed tick timer: fires every `interval_ms` of injected time.
#[derive(Debug, Clone, Copy)]
struct TickTimer {
    interval_ms: f32,
    elapsed_ms: f32,
}

impl TickTimer {
    fn new(interval_ms: f32) -> Self {
        TickTimer {
            interval_ms,
            elapsed_ms: 0.0,
        }
    }
}

/// The finite-state playback engine (§ run lifecycle:
/// `Idle → Loaded → Playing ⇄ Paused → Completed`).
pub struct PlaybackController {
    run: Option<SimulationRun>,
    state: PlaybackState,
    current_index: usize,
    speed_multiplier: f32,
    timer: Option<TickTimer>,
    aggregate: AggregateStats,
    sinks: Vec<Box<dyn FrameSink>>,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("current_index", &self.current_index)
            .field("speed_multiplier", &self.speed_multiplier)
            .field("run_len", &self.run.as_ref().map(SimulationRun::len))
            .finish_non_exhaustive()
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    pub fn new() -> Self {
        PlaybackController {
            run: None,
            state: PlaybackState::Idle,
            current_index: 0,
            speed_multiplier: 1.0,
            timer: None,
            aggregate: AggregateStats::default(),
            sinks: Vec::new(),
        }
    }

    /// Attach a passive view. Sinks are invoked in attachment order.
    pub fn attach(&mut self, sink: Box<dyn FrameSink>) {
        self.sinks.push(sink);
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn aggregate(&self) -> AggregateStats {
        self.aggregate
    }

    /// Frame count of the loaded run, if any.
    pub fn run_len(&self) -> Option<usize> {
        self.run.as_ref().map(SimulationRun::len)
    }

    /// Replace the current run and rewind to frame 0.
    ///
    /// The run is structurally valid by construction (`SimulationRun::new`
    /// enforces the history/stats alignment), so loading cannot fail and
    /// cannot leave partial state.
    pub fn load(&mut self, run: SimulationRun) {
        info!(frames = run.len(), "loading simulation run");
        self.run = Some(run);
        self.current_index = 0;
        self.timer = None;
        self.aggregate = AggregateStats::default();
        self.state = PlaybackState::Loaded;
    }

    /// Start or resume playback. Valid from `Loaded` and `Paused`; a
    /// `Completed` run must be re-seeked or reloaded first, so stale data is
    /// never silently replayed.
    pub fn play(&mut self) {
        match self.state {
            PlaybackState::Loaded | PlaybackState::Paused => {
                self.timer = Some(TickTimer::new(self.interval_ms()));
                self.state = PlaybackState::Playing;
                debug!(index = self.current_index, "playback started");
            }
            PlaybackState::Playing => {}
            PlaybackState::Idle | PlaybackState::Completed => {
                warn!(state = ?self.state, "ignoring play() request");
            }
        }
    }

    /// Pause playback, preserving the current index. Valid from `Playing`.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.timer = None;
            self.state = PlaybackState::Paused;
            debug!(index = self.current_index, "playback paused");
        }
    }

    /// Jump to a frame, clamped to the run, and present it immediately.
    /// Play/pause state is unchanged; a `Completed` run becomes `Paused` so
    /// it can be replayed from the new position.
    pub fn seek(&mut self, index: usize) {
        let Some(len) = self.run_len() else {
            return;
        };
        self.current_index = index.min(len - 1);
        if self.state == PlaybackState::Completed {
            self.state = PlaybackState::Paused;
        }
        debug!(index = self.current_index, "seek");
        self.present_current();
    }

    /// Change the playback speed. While playing, the armed timer is replaced
    /// wholesale so the old interval can never fire again.
    pub fn set_speed(&mut self, multiplier: f32) {
        self.speed_multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            1.0
        };
        if self.state == PlaybackState::Playing {
            self.timer = Some(TickTimer::new(self.interval_ms()));
        }
    }

    /// Stop playback and clear the run entirely.
    pub fn reset(&mut self) {
        info!("playback reset");
        self.run = None;
        self.timer = None;
        self.current_index = 0;
        self.aggregate = AggregateStats::default();
        self.state = PlaybackState::Idle;
    }

    /// Feed `dt_ms` of elapsed time to the armed timer, firing however many
    /// ticks fall due. Does nothing unless `Playing`.
    pub fn advance(&mut self, dt_ms: f32) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let Some(mut timer) = self.timer else {
            return;
        };
        timer.elapsed_ms += dt_ms;
        while timer.elapsed_ms >= timer.interval_ms {
            timer.elapsed_ms -= timer.interval_ms;
            self.tick();
            if self.state != PlaybackState::Playing {
                // Completed (or externally paused by a sink-free edge); the
                // timer slot was already cleared.
                return;
            }
        }
        self.timer = Some(timer);
    }

    /// One playback step: present the frame at the current index, then move
    /// forward. Reaching the final frame presents it and completes without
    /// incrementing, so the index ends on the last valid frame.
    pub fn tick(&mut self) {
        let Some(len) = self.run_len() else {
            return;
        };
        if self.state != PlaybackState::Playing {
            return;
        }
        self.update_aggregate();
        self.present_current();
        if self.current_index >= len - 1 {
            self.timer = None;
            self.state = PlaybackState::Completed;
            info!(index = self.current_index, "playback completed");
        } else {
            self.current_index += 1;
        }
    }

    fn interval_ms(&self) -> f32 {
        BASE_INTERVAL_MS / self.speed_multiplier
    }

    /// Update the running aggregates for the frame about to be presented.
    /// Ordering matters: sinks reading aggregates during `present` must see
    /// values that already include the current frame.
    fn update_aggregate(&mut self) {
        let Some(run) = &self.run else {
            return;
        };
        let stats = &run.stats()[self.current_index];
        self.aggregate.peak_burning_pct = self.aggregate.peak_burning_pct.max(stats.burning_pct);
        self.aggregate.total_burned_pct = stats.burned_pct;
        if self.current_index > 0 {
            self.aggregate.spread_rate_pct_per_step =
                Some(stats.burned_pct / self.current_index as f32);
        }
    }

    fn present_current(&mut self) {
        let Some(run) = &self.run else {
            return;
        };
        let (frame, stats) = run.at(self.current_index);
        for sink in &mut self.sinks {
            sink.present(frame, stats);
        }
    }
}
