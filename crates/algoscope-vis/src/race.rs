//! Two sorts racing over the same array.
//!
//! Both traces are generated up front and replayed in lockstep, one step per
//! lane per tick. A lane is done once its terminal step is on screen.

use std::time::Duration;

use algoscope_core::{Algorithm, ArrayStep, Result, SortAlgorithm, Trace};
use algoscope_engine::sort;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::playback::{DelayProfile, Speed};
use crate::session::Session;

/// One of the two lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Counters of one lane at some frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub comparisons: usize,
    pub swaps: usize,
    pub done: bool,
}

/// Both lanes at some frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub left: Standing,
    pub right: Standing,
}

impl Standings {
    /// The lane that finished alone, or the cheaper lane once both are done.
    ///
    /// Cheaper means fewer comparisons, then fewer swaps. A full tie, or a
    /// race where nobody has finished, has no winner.
    pub fn winner(&self) -> Option<Side> {
        let (l, r) = (self.left, self.right);
        match (l.done, r.done) {
            (true, false) => Some(Side::Left),
            (false, true) => Some(Side::Right),
            (false, false) => None,
            (true, true) => match (l.comparisons, l.swaps).cmp(&(r.comparisons, r.swaps)) {
                std::cmp::Ordering::Less => Some(Side::Left),
                std::cmp::Ordering::Greater => Some(Side::Right),
                std::cmp::Ordering::Equal => None,
            },
        }
    }

    pub fn both_done(&self) -> bool {
        self.left.done && self.right.done
    }
}

/// A sorting algorithm and its trace.
#[derive(Debug, Clone)]
pub struct Lane {
    pub algorithm: SortAlgorithm,
    pub trace: Trace<ArrayStep>,
}

impl Lane {
    fn new(algorithm: SortAlgorithm, values: &[i64]) -> Self {
        Self { algorithm, trace: sort(algorithm, values) }
    }

    /// The step shown at `frame`; a finished lane keeps showing its last step.
    pub fn step_at(&self, frame: usize) -> &ArrayStep {
        self.trace.get(frame).unwrap_or_else(|| self.trace.last())
    }

    pub fn standing_at(&self, frame: usize) -> Standing {
        Standing {
            comparisons: self.trace.comparisons_through(frame),
            swaps: self.trace.swaps_through(frame),
            done: frame >= self.trace.len() - 1,
        }
    }
}

/// A race in progress.
#[derive(Debug, Clone)]
pub struct Race {
    values: Vec<i64>,
    left: Lane,
    right: Lane,
    frame: usize,
    running: bool,
    speed: Speed,
}

impl Race {
    /// Trace both sorts over `values`.
    pub fn new(left: SortAlgorithm, right: SortAlgorithm, values: Vec<i64>) -> Self {
        let left = Lane::new(left, &values);
        let right = Lane::new(right, &values);
        debug!(
            "race {} ({} steps) vs {} ({} steps) over {} values",
            left.algorithm.name(),
            left.trace.len(),
            right.algorithm.name(),
            right.trace.len(),
            values.len()
        );
        Self { values, left, right, frame: 0, running: false, speed: Speed::default() }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn lane(&self, side: Side) -> &Lane {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Frames until both lanes are done.
    pub fn total_frames(&self) -> usize {
        self.left.trace.len().max(self.right.trace.len())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn standings_at(&self, frame: usize) -> Standings {
        Standings { left: self.left.standing_at(frame), right: self.right.standing_at(frame) }
    }

    pub fn standings(&self) -> Standings {
        self.standings_at(self.frame)
    }

    pub fn winner(&self) -> Option<Side> {
        self.standings().winner()
    }

    pub fn start(&mut self) {
        if !self.standings().both_done() {
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Rewind both lanes to their first step.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.running = false;
    }

    /// Advance both lanes by one step while running. Stops by itself once
    /// both lanes are done.
    pub fn tick(&mut self) -> Standings {
        if self.running {
            self.frame = (self.frame + 1).min(self.total_frames() - 1);
        }
        let standings = self.standings();
        if standings.both_done() {
            self.running = false;
        }
        standings
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn delay(&self) -> Duration {
        DelayProfile::Race.delay(self.speed)
    }
}

impl Session {
    /// Race two sorts on a fresh random array.
    pub fn race(&mut self, left: Algorithm, right: Algorithm) -> Result<Race> {
        let (left, right) = (left.as_sort()?, right.as_sort()?);
        let values = self.race_array();
        Ok(Race::new(left, right, values))
    }
}
