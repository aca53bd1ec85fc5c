//! Instrumented searches.
//!
//! Every probe is one comparison frame with the probed bar tagged checking.
//! Searches that narrow a window tag the live window as range on each probe.
//! A hit ends the trace on a frame tagging the hit found; exhausting the
//! candidates ends it on a frame with every bar tagged notfound.
//!
//! All searches other than linear expect `values` sorted ascending.

use algoscope_core::{ArrayStep, BarState, SearchAlgorithm, Trace};
use tracing::debug;

use crate::bars::Bars;

/// Trace `algorithm` looking for `target` in `values`.
pub fn search(algorithm: SearchAlgorithm, values: &[i64], target: i64) -> Trace<ArrayStep> {
    let mut bars = Bars::new(values);

    let hit = if values.is_empty() {
        None
    } else {
        match algorithm {
            SearchAlgorithm::Linear => linear(&mut bars, target),
            SearchAlgorithm::Binary => {
                let hi = bars.len() - 1;
                binary(&mut bars, 0, hi, target)
            }
            SearchAlgorithm::Jump => jump(&mut bars, target),
            SearchAlgorithm::Interpolation => interpolation(&mut bars, target),
            SearchAlgorithm::Exponential => exponential(&mut bars, target),
            SearchAlgorithm::Fibonacci => fibonacci(&mut bars, target),
        }
    };

    let trace = match hit {
        Some(i) => bars.finish_found(i),
        None => bars.finish_not_found(),
    };
    debug!(
        "{} for {} in {} values: {:?} after {} steps",
        algorithm.name(),
        target,
        values.len(),
        trace.last().outcome,
        trace.len()
    );
    trace
}

/// Snapshot a probe of `i` inside the window `lo..=hi`.
fn probe(bars: &mut Bars, lo: usize, hi: usize, i: usize) -> i64 {
    bars.reset();
    bars.tag_range(lo..=hi, BarState::Range);
    bars.tag(i, BarState::Checking);
    bars.push(true, false);
    bars.value(i)
}

fn linear(bars: &mut Bars, target: i64) -> Option<usize> {
    for i in 0..bars.len() {
        bars.reset();
        bars.tag(i, BarState::Checking);
        bars.push(true, false);
        if bars.value(i) == target {
            return Some(i);
        }
    }
    None
}

/// Binary search of the inclusive window `lo..=hi`.
fn binary(bars: &mut Bars, mut lo: usize, hi: usize, target: i64) -> Option<usize> {
    // Half-open internally so the window can empty without underflow.
    let mut end = hi + 1;
    while lo < end {
        let mid = lo + (end - lo) / 2;
        match probe(bars, lo, end - 1, mid).cmp(&target) {
            std::cmp::Ordering::Equal => return Some(mid),
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => end = mid,
        }
    }
    None
}

/// Jump search with a block size of `floor(sqrt(n))`.
///
/// Probes block ends until one is not below the target, then scans that
/// block linearly. Blocks skipped wholesale are shown as ruled out.
fn jump(bars: &mut Bars, target: i64) -> Option<usize> {
    let n = bars.len();
    let block = integer_sqrt(n).max(1);
    let mut start = 0;
    let mut end = block.min(n) - 1;

    loop {
        if probe(bars, start, end, end) >= target {
            break;
        }
        bars.reset();
        bars.tag_range(start..=end, BarState::NotFound);
        bars.push(false, false);

        start = end + 1;
        if start >= n {
            return None;
        }
        end = (end + block).min(n - 1);
    }

    for i in start..=end {
        let value = probe(bars, start, end, i);
        if value == target {
            return Some(i);
        }
        if value > target {
            break;
        }
    }
    None
}

fn interpolation(bars: &mut Bars, target: i64) -> Option<usize> {
    let (mut lo, mut hi) = (0, bars.len() - 1);

    while lo <= hi && target >= bars.value(lo) && target <= bars.value(hi) {
        let (low, high) = (bars.value(lo), bars.value(hi));
        if low == high {
            // Constant window: the estimate would divide by zero.
            return (probe(bars, lo, hi, lo) == target).then_some(lo);
        }

        let offset = (i128::from(target) - i128::from(low)) * (hi - lo) as i128
            / (i128::from(high) - i128::from(low));
        let pos = lo + offset as usize;

        match probe(bars, lo, hi, pos).cmp(&target) {
            std::cmp::Ordering::Equal => return Some(pos),
            std::cmp::Ordering::Less => lo = pos + 1,
            std::cmp::Ordering::Greater => {
                if pos == 0 {
                    return None;
                }
                hi = pos - 1;
            }
        }
    }
    None
}

/// Probe index 0, then 1, 2, 4, ... until a value exceeds the target, then
/// binary search the last doubled window `i/2..=min(i, n-1)`.
fn exponential(bars: &mut Bars, target: i64) -> Option<usize> {
    let n = bars.len();
    if probe(bars, 0, n - 1, 0) == target {
        return Some(0);
    }

    let mut i = 1;
    while i < n {
        let value = probe(bars, 0, i, i);
        if value == target {
            return Some(i);
        }
        if value > target {
            break;
        }
        i *= 2;
    }

    binary(bars, i / 2, i.min(n - 1), target)
}

/// Fibonacci search over a window sized by consecutive Fibonacci numbers.
fn fibonacci(bars: &mut Bars, target: i64) -> Option<usize> {
    let n = bars.len();
    let (mut f2, mut f1) = (0usize, 1usize);
    let mut f = f1 + f2;
    while f < n {
        f2 = f1;
        f1 = f;
        f = f1 + f2;
    }

    // Index of the last bar ruled out from the front; -1 before any.
    let mut offset: isize = -1;
    while f > 1 {
        let start = (offset + 1) as usize;
        if start >= n {
            return None;
        }
        let i = ((offset + f2 as isize) as usize).min(n - 1);
        let end = (start + f - 1).min(n - 1);

        match probe(bars, start, end, i).cmp(&target) {
            std::cmp::Ordering::Less => {
                f = f1;
                f1 = f2;
                f2 = f - f1;
                offset = i as isize;
            }
            std::cmp::Ordering::Greater => {
                f = f2;
                f1 -= f2;
                f2 = f - f1;
            }
            std::cmp::Ordering::Equal => return Some(i),
        }
    }

    let last = (offset + 1) as usize;
    if f1 == 1 && last < n && probe(bars, last, last, last) == target {
        return Some(last);
    }
    None
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = 0;
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
