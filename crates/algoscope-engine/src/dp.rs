//! Bottom-up dynamic programming tables.

use algoscope_core::{DpCell, DpState, DpStep, Trace, TraceRecorder};
use tracing::debug;

/// One item of a 0/1 knapsack instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnapsackItem {
    pub weight: usize,
    pub value: u64,
}

struct Table {
    cells: Vec<Vec<DpCell>>,
    result: u64,
    computations: usize,
    recorder: TraceRecorder<DpStep>,
}

impl Table {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![DpCell::default(); cols]; rows],
            result: 0,
            computations: 0,
            recorder: TraceRecorder::new(),
        }
    }

    fn value(&self, row: usize, col: usize) -> u64 {
        self.cells[row][col].value.unwrap_or(0)
    }

    fn set(&mut self, row: usize, col: usize, state: DpState) {
        self.cells[row][col].state = state;
        self.snapshot();
    }

    fn write(&mut self, row: usize, col: usize, value: u64) {
        self.cells[row][col].value = Some(value);
        self.result = value;
        self.set(row, col, DpState::Computed);
    }

    fn snapshot(&mut self) {
        let step = DpStep {
            table: self.cells.clone(),
            result: self.result,
            computations: self.computations,
        };
        // Table traces are uncapped.
        let _ = self.recorder.record(step);
    }
}

/// Fill the `(items + 1) x (capacity + 1)` knapsack table, then tag the
/// cells where the optimal selection takes an item.
///
/// Row zero is the empty prefix and starts filled with zeros. Each other
/// cell gets a computing frame and a computed frame; the last frame carries
/// the best achievable value.
pub fn knapsack(items: &[KnapsackItem], capacity: usize) -> Trace<DpStep> {
    let mut table = Table::new(items.len() + 1, capacity + 1);
    for cell in &mut table.cells[0] {
        cell.value = Some(0);
    }
    table.snapshot();

    for (i, item) in items.iter().enumerate().map(|(i, item)| (i + 1, item)) {
        for w in 0..=capacity {
            table.computations += 1;
            table.set(i, w, DpState::Computing);

            let exclude = table.value(i - 1, w);
            let best = if item.weight <= w {
                exclude.max(table.value(i - 1, w - item.weight).saturating_add(item.value))
            } else {
                exclude
            };
            table.write(i, w, best);
        }
    }

    // Walk back from the full-capacity corner.
    let mut w = capacity;
    for i in (1..=items.len()).rev() {
        if table.value(i, w) != table.value(i - 1, w) {
            table.cells[i][w].state = DpState::Optimal;
            w -= items[i - 1].weight;
        }
    }

    table.result = table.value(items.len(), capacity);
    let terminal = DpStep {
        table: table.cells.clone(),
        result: table.result,
        computations: table.computations,
    };
    let trace = table.recorder.finish(terminal);
    debug!(
        "knapsack of {} items, capacity {}: best {}, {} steps",
        items.len(),
        capacity,
        trace.last().result,
        trace.len()
    );
    trace
}

/// Fill a one-row table with `F(0)..=F(n)`.
///
/// The two base cases take one frame each; every later cell takes a
/// computing frame and a computed frame. Values saturate at `u64::MAX`.
pub fn fibonacci(n: usize) -> Trace<DpStep> {
    let mut table = Table::new(1, n + 1);
    table.write(0, 0, 0);
    if n >= 1 {
        table.write(0, 1, 1);
    }
    for i in 2..=n {
        table.computations += 1;
        table.set(0, i, DpState::Computing);
        let value = table.value(0, i - 1).saturating_add(table.value(0, i - 2));
        table.write(0, i, value);
    }

    let Table { cells, result, computations, recorder } = table;
    let trace = recorder.finish_recorded(|| DpStep { table: cells, result, computations });
    debug!("fibonacci({}) = {} in {} steps", n, trace.last().result, trace.len());
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items(pairs: &[(usize, u64)]) -> Vec<KnapsackItem> {
        pairs.iter().map(|&(weight, value)| KnapsackItem { weight, value }).collect()
    }

    fn brute_force(items: &[KnapsackItem], capacity: usize) -> u64 {
        (0u32..1 << items.len())
            .filter_map(|mask| {
                let chosen = items.iter().enumerate().filter(|(i, _)| mask & (1 << i) != 0);
                let (weight, value) = chosen.fold((0, 0), |(w, v), (_, it)| (w + it.weight, v + it.value));
                (weight <= capacity).then_some(value)
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn textbook_knapsack() {
        let trace = knapsack(&items(&[(2, 3), (3, 4), (4, 5), (5, 6)]), 5);
        assert_eq!(trace.last().result, 7);
        // Items one and two are taken.
        let optimal: Vec<(usize, usize)> = trace
            .last()
            .table
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter().enumerate().filter(|(_, c)| c.state == DpState::Optimal).map(move |(w, _)| (i, w))
            })
            .collect();
        assert_eq!(optimal, vec![(1, 2), (2, 5)]);
    }

    #[test]
    fn knapsack_frame_count() {
        let trace = knapsack(&items(&[(1, 1), (2, 2)]), 3);
        // Initial, two per cell over two rows of four, terminal.
        assert_eq!(trace.len(), 1 + 2 * 2 * 4 + 1);
        assert_eq!(trace.last().computations, 8);
    }

    #[test]
    fn knapsack_without_items() {
        let trace = knapsack(&[], 4);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().result, 0);
    }

    #[test]
    fn fibonacci_values() {
        assert_eq!(fibonacci(10).last().result, 55);
        assert_eq!(fibonacci(0).last().result, 0);
        assert_eq!(fibonacci(1).last().result, 1);
        assert_eq!(fibonacci(2).last().result, 1);
    }

    #[test]
    fn fibonacci_frames() {
        assert_eq!(fibonacci(0).len(), 1);
        assert_eq!(fibonacci(1).len(), 2);
        // Two base frames, then a pair per cell from 2 through 10.
        let trace = fibonacci(10);
        assert_eq!(trace.len(), 2 + 2 * 9);
        assert_eq!(trace.last().computations, 9);
        assert!(trace.last().table[0].iter().all(|c| c.state == DpState::Computed));
    }

    #[test]
    fn fibonacci_saturates() {
        assert_eq!(fibonacci(200).last().result, u64::MAX);
    }

    #[test]
    fn computing_precedes_computed() {
        let trace = fibonacci(4);
        let steps = trace.steps();
        assert_eq!(steps[2].table[0][2].state, DpState::Computing);
        assert_eq!(steps[2].table[0][2].value, None);
        assert_eq!(steps[3].table[0][2].state, DpState::Computed);
        assert_eq!(steps[3].table[0][2].value, Some(1));
    }

    proptest! {
        #[test]
        fn prop_knapsack_matches_brute_force(
            raw in prop::collection::vec((1usize..6, 1u64..12), 0..7),
            capacity in 0usize..16,
        ) {
            let items = items(&raw);
            let trace = knapsack(&items, capacity);
            prop_assert_eq!(trace.last().result, brute_force(&items, capacity));

            // The tagged selection fits and achieves the optimum.
            let last = trace.last();
            let (mut weight, mut value) = (0, 0);
            for (i, row) in last.table.iter().enumerate().skip(1) {
                if row.iter().any(|c| c.state == DpState::Optimal) {
                    weight += items[i - 1].weight;
                    value += items[i - 1].value;
                }
            }
            prop_assert!(weight <= capacity);
            prop_assert_eq!(value, last.result);
        }
    }
}
