//! Benchmarks for Algoscope trace generation
//!
//! Measures the cost of producing full traces for:
//! - Sorting at increasing array sizes
//! - Searching a sorted array
//! - Maze traversal on an open grid
//! - Backtracking under the default step caps

use algoscope_core::{
    MazeAlgorithm, MstAlgorithm, PathAlgorithm, SearchAlgorithm, SortAlgorithm, NQUEENS_STEP_LIMIT,
    SUDOKU_STEP_LIMIT,
};
use algoscope_engine::{
    fibonacci, knapsack, n_queens, search, shortest_path, sort, spanning_tree, sudoku, traverse,
    KnapsackItem, Link, Maze, SudokuPuzzle, WeightedGraph,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Reversed input, the worst case for most of the comparison sorts.
fn reversed(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for &n in &[16usize, 64, 256] {
        let input = reversed(n);
        group.throughput(Throughput::Elements(n as u64));
        for algorithm in SortAlgorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algorithm.name(), n), &input, |b, input| {
                b.iter(|| sort(algorithm, black_box(input)))
            });
        }
    }
    group.finish();
}

fn bench_searching(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let input: Vec<i64> = (0..1024).map(|i| i * 3).collect();

    for algorithm in SearchAlgorithm::ALL {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| search(algorithm, black_box(&input), black_box(2049)))
        });
    }
    group.finish();
}

fn bench_graphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");

    let maze = Maze::new(vec![vec![false; 25]; 15], (7, 0), (7, 24)).unwrap_or_else(|e| panic!("{e}"));
    for algorithm in MazeAlgorithm::ALL {
        group.bench_function(algorithm.name(), |b| b.iter(|| traverse(algorithm, black_box(&maze))));
    }

    // Four-by-three lattice with unit spacing.
    let mut links = Vec::new();
    for node in 0..12usize {
        if node % 4 != 3 {
            links.push(Link::new(node, node + 1, (node as u64 % 7) + 1));
        }
        if node + 4 < 12 {
            links.push(Link::new(node, node + 4, (node as u64 % 5) + 2));
        }
    }
    let positions = (0..12).map(|i| ((i % 4) as f64, (i / 4) as f64)).collect();
    let graph = WeightedGraph::new((0..12).collect(), links)
        .and_then(|g| g.with_positions(positions))
        .unwrap_or_else(|e| panic!("{e}"));

    for algorithm in PathAlgorithm::ALL {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| shortest_path(algorithm, black_box(&graph)))
        });
    }
    for algorithm in MstAlgorithm::ALL {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| spanning_tree(algorithm, black_box(&graph)))
        });
    }
    group.finish();
}

fn bench_backtracking(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtracking");

    for n in [4usize, 6, 8] {
        group.bench_with_input(BenchmarkId::new("n_queens", n), &n, |b, &n| {
            b.iter(|| n_queens(black_box(n), NQUEENS_STEP_LIMIT))
        });
    }

    let puzzle = SudokuPuzzle::new([
        [1, 0, 0, 4, 8, 9, 0, 0, 6],
        [7, 3, 0, 0, 0, 0, 0, 4, 0],
        [0, 0, 0, 0, 0, 1, 2, 9, 5],
        [0, 0, 7, 1, 2, 0, 6, 0, 0],
        [5, 0, 0, 7, 0, 3, 0, 0, 8],
        [0, 0, 6, 0, 9, 5, 7, 0, 0],
        [9, 1, 4, 6, 0, 0, 0, 0, 0],
        [0, 2, 0, 0, 0, 0, 0, 3, 7],
        [8, 0, 0, 5, 1, 2, 0, 0, 4],
    ])
    .unwrap_or_else(|e| panic!("{e}"));
    group.bench_function("sudoku", |b| b.iter(|| sudoku(black_box(&puzzle), SUDOKU_STEP_LIMIT)));
    group.finish();
}

fn bench_dp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dp");

    let items: Vec<KnapsackItem> =
        (1..=5).map(|i| KnapsackItem { weight: i, value: (i as u64) * 2 + 1 }).collect();
    group.bench_function("knapsack", |b| b.iter(|| knapsack(black_box(&items), 15)));
    group.bench_function("fibonacci", |b| b.iter(|| fibonacci(black_box(15))));
    group.finish();
}

criterion_group!(
    benches,
    bench_sorting,
    bench_searching,
    bench_graphs,
    bench_backtracking,
    bench_dp,
);

criterion_main!(benches);
