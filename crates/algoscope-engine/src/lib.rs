//! Algoscope Engine
//!
//! Instrumented algorithms that record a [`Trace`](algoscope_core::Trace) of
//! every comparison, swap, visit, placement and table update they perform.
//!
//! # Contract
//!
//! Every entry point is a pure function of its input: it works on an owned
//! copy, never touches global state and returns the finished trace. The same
//! input always yields the same trace. Degenerate inputs (empty arrays,
//! unreachable goals, unsolvable boards) end in a well-defined terminal step
//! rather than an error.
//!
//! | module | algorithms | step |
//! | --- | --- | --- |
//! | [`sorting`] | bubble, selection, insertion, merge, quick, heap, shell, tree, Tim, cocktail shaker, counting, radix | `ArrayStep` |
//! | [`searching`] | linear, binary, jump, interpolation, exponential, Fibonacci | `ArrayStep` |
//! | [`maze`] | depth-first, breadth-first | `GridStep` |
//! | [`pathfinding`] | Dijkstra, A*, uniform cost | `GraphStep` |
//! | [`mst`] | Prim, Kruskal | `MstStep` |
//! | [`backtracking`] | N-Queens, Sudoku | `BoardStep` |
//! | [`dp`] | 0/1 knapsack, Fibonacci | `DpStep` |

mod bars;
pub mod backtracking;
pub mod dp;
pub mod graph;
pub mod maze;
pub mod mst;
pub mod pathfinding;
pub mod searching;
pub mod sorting;

pub use backtracking::{n_queens, sudoku, SudokuPuzzle};
pub use dp::{fibonacci, knapsack, KnapsackItem};
pub use graph::{Link, WeightedGraph};
pub use maze::{traverse, Maze, Position};
pub use mst::spanning_tree;
pub use pathfinding::shortest_path;
pub use searching::search;
pub use sorting::sort;
