//! Traces and the recorder that builds them.
//!
//! A [`Trace`] is the finished, immutable output of one algorithm run: an
//! ordered, non-empty list of snapshots whose last element is the terminal
//! state. A [`TraceRecorder`] is the append-only buffer an algorithm writes
//! into while it runs.

use serde::Serialize;
use thiserror::Error;

use crate::step::{ArrayStep, Step};

/// Returned by [`TraceRecorder::record`] once the step cap is reached.
///
/// Algorithms treat this as a signal to stop early; the recorder still
/// accepts the terminal step through [`TraceRecorder::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("step limit of {limit} reached")]
pub struct StepLimitReached {
    pub limit: usize,
}

/// Append-only step buffer with an optional cap.
///
/// The cap counts the terminal step, so `record` refuses once only one slot
/// is left and `finish` can always append.
#[derive(Debug, Clone)]
pub struct TraceRecorder<S> {
    steps: Vec<S>,
    limit: Option<usize>,
    truncated: bool,
}

impl<S> TraceRecorder<S> {
    /// An uncapped recorder.
    pub fn new() -> Self {
        Self { steps: Vec::new(), limit: None, truncated: false }
    }

    /// A recorder holding at most `limit` steps including the terminal one.
    /// A limit below 2 is raised to 2.
    pub fn with_limit(limit: usize) -> Self {
        Self { steps: Vec::new(), limit: Some(limit.max(2)), truncated: false }
    }

    /// Append a step.
    pub fn record(&mut self, step: S) -> Result<(), StepLimitReached> {
        if let Some(limit) = self.limit {
            if self.steps.len() + 1 >= limit {
                self.truncated = true;
                return Err(StepLimitReached { limit });
            }
        }
        self.steps.push(step);
        Ok(())
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Most recent step, if any.
    pub fn last(&self) -> Option<&S> {
        self.steps.last()
    }

    /// Whether a `record` call has been refused.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Close the trace with an explicit terminal step.
    pub fn finish(mut self, terminal: S) -> Trace<S> {
        self.steps.push(terminal);
        Trace { steps: self.steps }
    }

    /// Close the trace with what was recorded, falling back to `terminal`
    /// when nothing was.
    pub fn finish_recorded(self, terminal: impl FnOnce() -> S) -> Trace<S> {
        if self.steps.is_empty() {
            self.finish(terminal())
        } else {
            Trace { steps: self.steps }
        }
    }
}

impl<S: PartialEq> TraceRecorder<S> {
    /// Append unless the step is identical to the previous one.
    pub fn record_distinct(&mut self, step: S) -> Result<(), StepLimitReached> {
        if self.steps.last() == Some(&step) {
            return Ok(());
        }
        self.record(step)
    }
}

impl<S> Default for TraceRecorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Finished output of an algorithm run. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace<S> {
    steps: Vec<S>,
}

impl<S> Trace<S> {
    /// Wrap a step list, rejecting an empty one.
    pub fn from_steps(steps: Vec<S>) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(Self { steps })
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.steps.get(index)
    }

    pub fn first(&self) -> &S {
        &self.steps[0]
    }

    /// The terminal step.
    pub fn last(&self) -> &S {
        &self.steps[self.steps.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<S> {
        self.steps
    }

    /// Lift every step into the unified [`Step`] type.
    pub fn erase(self) -> Trace<Step>
    where
        S: Into<Step>,
    {
        Trace { steps: self.steps.into_iter().map(Into::into).collect() }
    }
}

impl Trace<ArrayStep> {
    /// Steps flagged as comparisons.
    pub fn comparisons(&self) -> usize {
        self.comparisons_through(self.len() - 1)
    }

    /// Steps flagged as swaps or writes.
    pub fn swaps(&self) -> usize {
        self.swaps_through(self.len() - 1)
    }

    /// Comparison steps among indices `0..=index`.
    pub fn comparisons_through(&self, index: usize) -> usize {
        self.steps.iter().take(index.saturating_add(1)).filter(|s| s.comparison).count()
    }

    /// Swap steps among indices `0..=index`.
    pub fn swaps_through(&self, index: usize) -> usize {
        self.steps.iter().take(index.saturating_add(1)).filter(|s| s.swap).count()
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{Bar, DpStep};

    fn array_step(comparison: bool, swap: bool) -> ArrayStep {
        ArrayStep { bars: vec![Bar::new(1)], comparison, swap, outcome: None }
    }

    #[test]
    fn finish_always_appends() {
        let mut rec = TraceRecorder::with_limit(3);
        assert!(rec.record(1).is_ok());
        assert!(rec.record(2).is_ok());
        assert_eq!(rec.record(3), Err(StepLimitReached { limit: 3 }));
        assert!(rec.truncated());

        let trace = rec.finish(99);
        assert_eq!(trace.steps(), &[1, 2, 99]);
        assert_eq!(*trace.last(), 99);
    }

    #[test]
    fn uncapped_recorder_never_refuses() {
        let mut rec = TraceRecorder::new();
        for i in 0..10_000 {
            rec.record(i).unwrap();
        }
        assert!(!rec.truncated());
        assert_eq!(rec.len(), 10_000);
    }

    #[test]
    fn record_distinct_skips_repeats() {
        let mut rec = TraceRecorder::new();
        rec.record_distinct(1).unwrap();
        rec.record_distinct(1).unwrap();
        rec.record_distinct(2).unwrap();
        rec.record_distinct(1).unwrap();
        assert_eq!(rec.finish_recorded(|| 0).steps(), &[1, 2, 1]);
    }

    #[test]
    fn finish_recorded_falls_back_when_empty() {
        let rec: TraceRecorder<u8> = TraceRecorder::new();
        assert_eq!(rec.finish_recorded(|| 7).steps(), &[7]);
    }

    #[test]
    fn empty_trace_is_rejected() {
        assert!(Trace::<u8>::from_steps(Vec::new()).is_none());
        assert_eq!(Trace::from_steps(vec![4]).map(|t| t.len()), Some(1));
    }

    #[test]
    fn array_counters() {
        let trace = Trace::from_steps(vec![
            array_step(true, false),
            array_step(false, true),
            array_step(true, false),
            array_step(false, false),
        ])
        .unwrap();
        assert_eq!(trace.comparisons(), 2);
        assert_eq!(trace.swaps(), 1);
        assert_eq!(trace.comparisons_through(0), 1);
        assert_eq!(trace.swaps_through(0), 0);
        assert_eq!(trace.comparisons_through(100), 2);
    }

    #[test]
    fn erase_keeps_order() {
        let trace = Trace::from_steps(vec![
            DpStep { table: Vec::new(), result: 1, computations: 0 },
            DpStep { table: Vec::new(), result: 2, computations: 1 },
        ])
        .unwrap();
        let erased = trace.erase();
        assert_eq!(erased.len(), 2);
        assert!(erased.iter().all(|s| s.kind() == "dp"));
    }

    #[test]
    fn serializes_as_plain_list() {
        let trace = Trace::from_steps(vec![1u8, 2, 3]).unwrap();
        assert_eq!(serde_json::to_string(&trace).unwrap(), "[1,2,3]");
    }
}
