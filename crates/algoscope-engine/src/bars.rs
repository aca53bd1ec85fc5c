//! Working array shared by the sorting and searching tracers.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use algoscope_core::{ArrayStep, Bar, BarState, SearchOutcome, Trace, TraceRecorder};

/// An owned copy of the input plus the recorder its snapshots go into.
pub(crate) struct Bars {
    bars: Vec<Bar>,
    recorder: TraceRecorder<ArrayStep>,
}

impl Bars {
    pub fn new(values: &[i64]) -> Self {
        Self {
            bars: values.iter().copied().map(Bar::new).collect(),
            recorder: TraceRecorder::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn value(&self, i: usize) -> i64 {
        self.bars[i].value
    }

    pub fn values(&self) -> Vec<i64> {
        self.bars.iter().map(|b| b.value).collect()
    }

    /// Clear transient tags; sorted bars keep theirs.
    pub fn reset(&mut self) {
        self.bars.iter_mut().for_each(Bar::reset);
    }

    pub fn tag(&mut self, i: usize, state: BarState) {
        if let Some(bar) = self.bars.get_mut(i) {
            bar.tag(state);
        }
    }

    /// Tag every in-bounds index of `range`.
    pub fn tag_range(&mut self, range: RangeInclusive<usize>, state: BarState) {
        let (lo, hi) = range.into_inner();
        if self.bars.is_empty() || lo > hi {
            return;
        }
        let hi = hi.min(self.bars.len() - 1);
        for bar in self.bars.iter_mut().take(hi + 1).skip(lo) {
            bar.tag(state);
        }
    }

    pub fn mark_sorted(&mut self, i: usize) {
        self.tag(i, BarState::Sorted);
    }

    /// Snapshot the current bars.
    pub fn push(&mut self, comparison: bool, swap: bool) {
        self.push_step(comparison, swap, None);
    }

    fn push_step(&mut self, comparison: bool, swap: bool, outcome: Option<SearchOutcome>) {
        let step = ArrayStep { bars: self.bars.clone(), comparison, swap, outcome };
        // Array traces are uncapped.
        let _ = self.recorder.record(step);
    }

    /// Tag `i` and `j` comparing, snapshot, then order `bars[i]` against `bars[j]`.
    pub fn compare(&mut self, i: usize, j: usize) -> Ordering {
        self.reset();
        self.tag(i, BarState::Comparing);
        self.tag(j, BarState::Comparing);
        self.push(true, false);
        self.value(i).cmp(&self.value(j))
    }

    /// Tag `i` and `j` swapping, snapshot, then exchange them.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.reset();
        self.tag(i, BarState::Swapping);
        self.tag(j, BarState::Swapping);
        self.push(false, true);
        self.exchange(i, j);
    }

    /// Exchange two bars without recording anything.
    pub fn exchange(&mut self, i: usize, j: usize) {
        self.bars.swap(i, j);
    }

    /// Overwrite slot `i` and snapshot the write.
    pub fn write(&mut self, i: usize, value: i64) {
        self.reset();
        self.bars[i] = Bar::with_state(value, BarState::Swapping);
        self.push(false, true);
    }

    /// Close a sort: every bar sorted, one final snapshot.
    pub fn finish_sorted(mut self) -> Trace<ArrayStep> {
        for bar in &mut self.bars {
            bar.state = BarState::Sorted;
        }
        let terminal = ArrayStep { bars: self.bars, comparison: false, swap: false, outcome: None };
        self.recorder.finish(terminal)
    }

    /// Close a search on a hit at `i`.
    pub fn finish_found(mut self, i: usize) -> Trace<ArrayStep> {
        self.reset();
        self.tag(i, BarState::Found);
        let terminal = ArrayStep {
            bars: self.bars,
            comparison: false,
            swap: false,
            outcome: Some(SearchOutcome::Found(i)),
        };
        self.recorder.finish(terminal)
    }

    /// Close a search that exhausted its candidates.
    pub fn finish_not_found(mut self) -> Trace<ArrayStep> {
        for bar in &mut self.bars {
            bar.state = BarState::NotFound;
        }
        let terminal = ArrayStep {
            bars: self.bars,
            comparison: false,
            swap: false,
            outcome: Some(SearchOutcome::NotFound),
        };
        self.recorder.finish(terminal)
    }
}
