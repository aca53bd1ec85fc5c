//! Playback controls over a finished trace.

use std::time::Duration;

use algoscope_core::{ArrayStep, Trace};
use serde::{Deserialize, Serialize};

/// Speed slider position, `1..=100`. Out of range values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Speed(u8);

impl Speed {
    pub const SLOWEST: Self = Self(1);
    pub const FASTEST: Self = Self(100);

    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::SLOWEST.0, Self::FASTEST.0))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(50)
    }
}

impl From<u8> for Speed {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

/// How a view turns the speed slider into a per-step delay.
///
/// Each profile falls linearly from its slowest delay and bottoms out at a
/// floor:
///
/// | profile | delay (ms) |
/// | --- | --- |
/// | `Array` | `max(5, 500 - 4.95 s)` |
/// | `Grid` | `max(10, 200 - 1.9 s)` |
/// | `Table` | `max(10, 500 - 4.9 s)` |
/// | `Race` | `max(10, 400 - 3.9 s)` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayProfile {
    /// Sorting and searching bars.
    Array,
    /// Mazes, graphs and boards.
    Grid,
    /// Dynamic programming tables.
    Table,
    /// Side by side sorting lanes.
    Race,
}

impl DelayProfile {
    /// `(base, slope, floor)` in milliseconds.
    const fn curve(&self) -> (f64, f64, f64) {
        match self {
            Self::Array => (500.0, 4.95, 5.0),
            Self::Grid => (200.0, 1.9, 10.0),
            Self::Table => (500.0, 4.9, 10.0),
            Self::Race => (400.0, 3.9, 10.0),
        }
    }

    /// Delay between two steps at `speed`.
    pub fn delay(&self, speed: Speed) -> Duration {
        let (base, slope, floor) = self.curve();
        let ms = (base - slope * f64::from(speed.get())).max(floor);
        Duration::from_micros((ms * 1000.0).round() as u64)
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// At the first step, not running
    Stopped,
    /// Advancing on every tick
    Playing,
    /// Holding the current step
    Paused,
    /// Resting on the terminal step
    Finished,
}

/// Playback controller for a trace.
///
/// The cursor always points at a real step, so the view can render
/// [`Playback::current_step`] unconditionally.
#[derive(Debug, Clone)]
pub struct Playback<S> {
    trace: Trace<S>,
    current: usize,
    state: PlaybackState,
    speed: Speed,
    loop_enabled: bool,
}

impl<S> Playback<S> {
    pub fn new(trace: Trace<S>) -> Self {
        Self {
            trace,
            current: 0,
            state: PlaybackState::Stopped,
            speed: Speed::default(),
            loop_enabled: false,
        }
    }

    pub fn trace(&self) -> &Trace<S> {
        &self.trace
    }

    /// Index of the step on screen.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &S {
        self.trace.get(self.current).unwrap_or_else(|| self.trace.last())
    }

    pub fn total_steps(&self) -> usize {
        self.trace.len()
    }

    fn last_index(&self) -> usize {
        self.trace.len() - 1
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    /// Jump to `index`, clamped to the last step.
    pub fn seek(&mut self, index: usize) {
        self.current = index.min(self.last_index());
        if self.current == self.last_index() && !self.loop_enabled {
            self.state = PlaybackState::Finished;
        } else if self.state == PlaybackState::Finished {
            self.state = PlaybackState::Paused;
        }
    }

    /// Start playing, rewinding first if already at the end.
    pub fn play(&mut self) {
        if self.current >= self.last_index() {
            self.current = 0;
        }
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop and return to the first step.
    pub fn stop(&mut self) {
        self.current = 0;
        self.state = PlaybackState::Stopped;
    }

    /// Advance one step and return it.
    ///
    /// At the last step this wraps to the start when looping, otherwise it
    /// marks playback finished and returns `None`.
    pub fn step_forward(&mut self) -> Option<&S> {
        if self.current < self.last_index() {
            self.current += 1;
            if self.current == self.last_index() && !self.loop_enabled {
                self.state = PlaybackState::Finished;
            }
        } else if self.loop_enabled {
            self.current = 0;
        } else {
            self.state = PlaybackState::Finished;
            return None;
        }
        self.trace.get(self.current)
    }

    /// Go back one step. Stepping back always pauses.
    pub fn step_back(&mut self) -> Option<&S> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        self.state = PlaybackState::Paused;
        self.trace.get(self.current)
    }

    /// Timer callback: advance while playing, do nothing otherwise.
    pub fn tick(&mut self) -> Option<&S> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        self.step_forward()
    }

    /// Delay the view should wait before the next tick.
    pub fn delay(&self, profile: DelayProfile) -> Duration {
        profile.delay(self.speed)
    }

    /// Position in `0.0..=1.0`. A single-step trace is always complete.
    pub fn progress(&self) -> f64 {
        if self.last_index() == 0 {
            1.0
        } else {
            self.current as f64 / self.last_index() as f64
        }
    }
}

impl Playback<ArrayStep> {
    /// Comparisons shown so far, including the current step.
    pub fn comparisons(&self) -> usize {
        self.trace.comparisons_through(self.current)
    }

    /// Swaps and writes shown so far, including the current step.
    pub fn swaps(&self) -> usize {
        self.trace.swaps_through(self.current)
    }
}

/// Playback status for the view's control bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub current: usize,
    pub total_steps: usize,
    pub state: PlaybackState,
    pub speed: Speed,
    pub progress: f64,
    pub loop_enabled: bool,
}

impl<S> From<&Playback<S>> for PlaybackStatus {
    fn from(playback: &Playback<S>) -> Self {
        Self {
            current: playback.current,
            total_steps: playback.total_steps(),
            state: playback.state,
            speed: playback.speed,
            progress: playback.progress(),
            loop_enabled: playback.loop_enabled,
        }
    }
}
