//! Instrumented sorts.
//!
//! Each sort runs on an owned copy of the input and snapshots the array at
//! every comparison and every swap or write. A comparison frame always
//! precedes the swap frame it causes. Bars that reach their final slot are
//! tagged sorted as soon as the algorithm knows it; the trace closes with the
//! whole array sorted.

use std::collections::BTreeMap;

use algoscope_core::{ArrayStep, BarState, SortAlgorithm, Trace};
use tracing::debug;

use crate::bars::Bars;

/// Trace `algorithm` sorting `values` ascending.
///
/// An empty input yields a single terminal step.
pub fn sort(algorithm: SortAlgorithm, values: &[i64]) -> Trace<ArrayStep> {
    let mut bars = Bars::new(values);
    let n = bars.len();

    if n > 1 {
        match algorithm {
            SortAlgorithm::Bubble => bubble(&mut bars),
            SortAlgorithm::Selection => selection(&mut bars),
            SortAlgorithm::Insertion => insertion(&mut bars, 0, n - 1),
            SortAlgorithm::Merge => merge_sort(&mut bars, 0, n - 1),
            SortAlgorithm::Quick => quick(&mut bars, 0, n - 1),
            SortAlgorithm::Heap => heap(&mut bars),
            SortAlgorithm::Shell => shell(&mut bars),
            SortAlgorithm::Tree => tree(&mut bars),
            SortAlgorithm::Tim => tim(&mut bars),
            SortAlgorithm::CocktailShaker => cocktail_shaker(&mut bars),
            SortAlgorithm::Counting => counting(&mut bars),
            SortAlgorithm::Radix => radix(&mut bars),
        }
    }

    let trace = bars.finish_sorted();
    debug!("{} traced {} values in {} steps", algorithm.name(), n, trace.len());
    trace
}

fn bubble(bars: &mut Bars) {
    let n = bars.len();
    for i in 0..n {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            if bars.compare(j, j + 1).is_gt() {
                bars.swap(j, j + 1);
                swapped = true;
            }
        }
        bars.mark_sorted(n - i - 1);
        if !swapped {
            break;
        }
    }
}

fn selection(bars: &mut Bars) {
    let n = bars.len();
    for i in 0..n - 1 {
        let mut min = i;
        for j in i + 1..n {
            if bars.compare(j, min).is_lt() {
                min = j;
            }
        }
        if min != i {
            bars.swap(i, min);
        }
        bars.mark_sorted(i);
    }
}

/// Insertion sort of `lo..=hi` by adjacent exchanges.
fn insertion(bars: &mut Bars, lo: usize, hi: usize) {
    for i in lo + 1..=hi {
        let mut j = i;
        while j > lo && bars.compare(j - 1, j).is_gt() {
            bars.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn merge_sort(bars: &mut Bars, lo: usize, hi: usize) {
    if lo >= hi {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort(bars, lo, mid);
    merge_sort(bars, mid + 1, hi);
    merge(bars, lo, mid, hi);
}

/// Merge the sorted runs `lo..=mid` and `mid+1..=hi`. Stable.
fn merge(bars: &mut Bars, lo: usize, mid: usize, hi: usize) {
    let left: Vec<i64> = (lo..=mid).map(|i| bars.value(i)).collect();
    let right: Vec<i64> = (mid + 1..=hi).map(|i| bars.value(i)).collect();
    let (mut i, mut j, mut k) = (0, 0, lo);

    while i < left.len() && j < right.len() {
        // The slot being filled and the right-run head, which has not been
        // overwritten yet.
        bars.reset();
        bars.tag(k, BarState::Comparing);
        bars.tag(mid + 1 + j, BarState::Comparing);
        bars.push(true, false);

        if left[i] <= right[j] {
            bars.write(k, left[i]);
            i += 1;
        } else {
            bars.write(k, right[j]);
            j += 1;
        }
        k += 1;
    }
    for &value in left[i..].iter().chain(&right[j..]) {
        bars.write(k, value);
        k += 1;
    }
}

fn quick(bars: &mut Bars, lo: usize, hi: usize) {
    if lo == hi {
        bars.mark_sorted(lo);
        return;
    }
    let p = partition(bars, lo, hi);
    if p > lo {
        quick(bars, lo, p - 1);
    }
    if p < hi {
        quick(bars, p + 1, hi);
    }
}

/// Lomuto partition around `bars[hi]`. Returns the pivot's final index.
fn partition(bars: &mut Bars, lo: usize, hi: usize) -> usize {
    let pivot = bars.value(hi);
    let mut i = lo;
    for j in lo..hi {
        bars.reset();
        bars.tag(hi, BarState::Pivot);
        bars.tag(j, BarState::Comparing);
        bars.push(true, false);

        if bars.value(j) < pivot {
            if i != j {
                bars.reset();
                bars.tag(hi, BarState::Pivot);
                bars.tag(i, BarState::Swapping);
                bars.tag(j, BarState::Swapping);
                bars.push(false, true);
                bars.exchange(i, j);
            }
            i += 1;
        }
    }
    if i != hi {
        bars.swap(i, hi);
    }
    bars.mark_sorted(i);
    i
}

fn heap(bars: &mut Bars) {
    let n = bars.len();
    for i in (0..n / 2).rev() {
        sift_down(bars, n, i);
    }
    for end in (1..n).rev() {
        bars.swap(0, end);
        bars.mark_sorted(end);
        sift_down(bars, end, 0);
    }
    bars.mark_sorted(0);
}

/// Restore the max-heap property below `i` within the first `size` bars.
fn sift_down(bars: &mut Bars, size: usize, mut i: usize) {
    loop {
        let mut largest = i;
        let (left, right) = (2 * i + 1, 2 * i + 2);
        if left < size && bars.compare(left, largest).is_gt() {
            largest = left;
        }
        if right < size && bars.compare(right, largest).is_gt() {
            largest = right;
        }
        if largest == i {
            return;
        }
        bars.swap(i, largest);
        i = largest;
    }
}

fn shell(bars: &mut Bars) {
    let n = bars.len();
    let mut gap = n / 2;
    while gap > 0 {
        for i in gap..n {
            let mut j = i;
            while j >= gap && bars.compare(j - gap, j).is_gt() {
                bars.swap(j - gap, j);
                j -= gap;
            }
        }
        gap /= 2;
    }
}

/// Arena node of the tree sort BST. Node `k` holds the input value at index `k`.
struct TreeNode {
    left: Option<usize>,
    right: Option<usize>,
}

fn tree(bars: &mut Bars) {
    let n = bars.len();
    let mut nodes: Vec<TreeNode> = (0..n).map(|_| TreeNode { left: None, right: None }).collect();

    for k in 1..n {
        let mut at = 0;
        loop {
            // Ties go right, which keeps the sort stable.
            let slot = if bars.compare(k, at).is_lt() {
                &mut nodes[at].left
            } else {
                &mut nodes[at].right
            };
            match *slot {
                Some(child) => at = child,
                None => {
                    *slot = Some(k);
                    break;
                }
            }
        }
    }

    let mut ordered = Vec::with_capacity(n);
    let mut stack = Vec::new();
    let mut cursor = Some(0);
    while cursor.is_some() || !stack.is_empty() {
        while let Some(node) = cursor {
            stack.push(node);
            cursor = nodes[node].left;
        }
        if let Some(node) = stack.pop() {
            ordered.push(bars.value(node));
            cursor = nodes[node].right;
        }
    }

    for (i, value) in ordered.into_iter().enumerate() {
        bars.write(i, value);
        bars.mark_sorted(i);
    }
}

fn tim(bars: &mut Bars) {
    let n = bars.len();
    let run = if n < 64 { 4 } else { 32 };

    for start in (0..n).step_by(run) {
        insertion(bars, start, (start + run - 1).min(n - 1));
    }

    let mut size = run;
    while size < n {
        for left in (0..n).step_by(2 * size) {
            let mid = left + size - 1;
            let right = (left + 2 * size - 1).min(n - 1);
            if mid < right {
                merge(bars, left, mid, right);
            }
        }
        size *= 2;
    }
}

fn cocktail_shaker(bars: &mut Bars) {
    let (mut start, mut end) = (0, bars.len() - 1);
    let mut swapped = true;

    while swapped && start < end {
        swapped = false;
        for i in start..end {
            if bars.compare(i, i + 1).is_gt() {
                bars.swap(i, i + 1);
                swapped = true;
            }
        }
        bars.mark_sorted(end);
        if !swapped {
            break;
        }

        swapped = false;
        end -= 1;
        for i in (start..end).rev() {
            if bars.compare(i, i + 1).is_gt() {
                bars.swap(i, i + 1);
                swapped = true;
            }
        }
        bars.mark_sorted(start);
        start += 1;
    }
}

/// Counting sort keyed on the distinct values present, so a wide range of
/// inputs does not allocate a bucket per possible value.
fn counting(bars: &mut Bars) {
    let n = bars.len();
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for i in 0..n {
        bars.reset();
        bars.tag(i, BarState::Comparing);
        bars.push(true, false);
        *counts.entry(bars.value(i)).or_insert(0) += 1;
    }

    let mut k = 0;
    for (value, count) in counts {
        for _ in 0..count {
            bars.write(k, value);
            bars.mark_sorted(k);
            k += 1;
        }
    }
}

/// LSD radix sort, base 10, on values shifted so the minimum is zero.
fn radix(bars: &mut Bars) {
    let n = bars.len();
    let values = bars.values();
    let min = values.iter().copied().min().unwrap_or(0);
    // Every i64 difference from the minimum fits in a u64.
    let key = |v: i64| (i128::from(v) - i128::from(min)) as u64;
    let max_key = values.iter().map(|&v| key(v)).max().unwrap_or(0);

    let mut exp: u64 = 1;
    while max_key / exp > 0 {
        let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); 10];
        for i in 0..n {
            bars.reset();
            bars.tag(i, BarState::Comparing);
            bars.push(true, false);
            let value = bars.value(i);
            buckets[((key(value) / exp) % 10) as usize].push(value);
        }
        for (k, value) in buckets.into_iter().flatten().enumerate() {
            bars.write(k, value);
        }
        match exp.checked_mul(10) {
            Some(next) => exp = next,
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(values: &[i64]) -> Vec<i64> {
        let mut v = values.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn every_sort_sorts() {
        let input = [29, -3, 14, 14, 0, 88, 7, -41, 5, 62, 1, 14];
        for algorithm in SortAlgorithm::ALL {
            let trace = sort(algorithm, &input);
            assert_eq!(trace.last().values(), sorted(&input), "{}", algorithm.name());
            assert!(trace.last().bars.iter().all(|b| b.state == BarState::Sorted));
        }
    }

    #[test]
    fn empty_input_is_one_step() {
        for algorithm in SortAlgorithm::ALL {
            let trace = sort(algorithm, &[]);
            assert_eq!(trace.len(), 1);
            assert!(trace.last().bars.is_empty());
        }
    }

    #[test]
    fn single_value_is_one_step() {
        for algorithm in SortAlgorithm::ALL {
            let trace = sort(algorithm, &[42]);
            assert_eq!(trace.len(), 1);
            assert_eq!(trace.last().values(), vec![42]);
        }
    }

    #[test]
    fn all_equal_terminates() {
        let input = [7; 20];
        for algorithm in SortAlgorithm::ALL {
            let trace = sort(algorithm, &input);
            assert_eq!(trace.last().values(), input.to_vec());
        }
    }

    #[test]
    fn caller_array_is_untouched() {
        let input = vec![3, 2, 1];
        let _ = sort(SortAlgorithm::Bubble, &input);
        assert_eq!(input, vec![3, 2, 1]);
    }

    #[test]
    fn bubble_frames_alternate_compare_then_swap() {
        let trace = sort(SortAlgorithm::Bubble, &[2, 1]);
        let steps = trace.steps();
        assert!(steps[0].comparison && !steps[0].swap);
        assert_eq!(steps[0].indices_with(BarState::Comparing), vec![0, 1]);
        assert!(steps[1].swap && !steps[1].comparison);
        assert_eq!(steps[1].indices_with(BarState::Swapping), vec![0, 1]);
    }

    #[test]
    fn quick_sort_shows_last_element_pivot() {
        let trace = sort(SortAlgorithm::Quick, &[5, 1, 4, 3]);
        let first = trace.first();
        assert_eq!(first.indices_with(BarState::Pivot), vec![3]);
        assert_eq!(first.indices_with(BarState::Comparing), vec![0]);
    }

    #[test]
    fn sorted_tags_are_never_cleared() {
        let trace = sort(SortAlgorithm::Selection, &[9, 4, 7, 1, 3]);
        let mut settled = vec![false; 5];
        for step in &trace {
            for (i, bar) in step.bars.iter().enumerate() {
                if settled[i] {
                    assert_eq!(bar.state, BarState::Sorted);
                }
                settled[i] |= bar.state == BarState::Sorted;
            }
        }
    }

    #[test]
    fn tree_sort_degrades_on_sorted_input() {
        // A sorted input builds a right spine: k comparisons for the k-th insert.
        let trace = sort(SortAlgorithm::Tree, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(trace.comparisons(), 1 + 2 + 3 + 4 + 5);
    }

    #[test]
    fn counting_sort_compares_once_per_value() {
        let trace = sort(SortAlgorithm::Counting, &[3, 1, 2, 1]);
        assert_eq!(trace.comparisons(), 4);
        assert_eq!(trace.swaps(), 4);
    }

    #[test]
    fn radix_sort_handles_negatives() {
        let trace = sort(SortAlgorithm::Radix, &[-100, 55, -3, 0, 999, -100]);
        assert_eq!(trace.last().values(), vec![-100, -100, -3, 0, 55, 999]);
    }

    #[test]
    fn tim_sort_uses_larger_runs_on_long_input() {
        let input: Vec<i64> = (0..100).rev().collect();
        let trace = sort(SortAlgorithm::Tim, &input);
        assert_eq!(trace.last().values(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn extreme_values() {
        let input = [i64::MAX, i64::MIN, 0, -1, 1];
        for algorithm in SortAlgorithm::ALL {
            let trace = sort(algorithm, &input);
            assert_eq!(trace.last().values(), sorted(&input), "{}", algorithm.name());
        }
    }

    #[test]
    fn deterministic() {
        let input = [5, 3, 8, 1, 9, 2];
        for algorithm in SortAlgorithm::ALL {
            assert_eq!(sort(algorithm, &input), sort(algorithm, &input));
        }
    }

    proptest! {
        #[test]
        fn prop_every_sort_agrees_with_std(values in prop::collection::vec(-500i64..500, 0..40)) {
            let expected = sorted(&values);
            for algorithm in SortAlgorithm::ALL {
                let trace = sort(algorithm, &values);
                prop_assert_eq!(trace.last().values(), expected.clone());
            }
        }
    }
}
