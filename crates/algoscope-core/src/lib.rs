//! Algoscope Core
//!
//! Shared vocabulary of the step-trace engine.
//!
//! # Steps and Traces
//!
//! Every instrumented algorithm turns its input into a [`Trace`]: an ordered,
//! non-empty list of deep snapshots of its working state. A renderer draws one
//! snapshot at a time; a playback controller only ever indexes into the list.
//! Snapshot shapes differ per category (array, grid, weighted graph, spanning
//! tree, board, table) and are unified by the [`Step`] sum type.
//!
//! # Catalog
//!
//! [`Algorithm`] enumerates the traceable algorithms under their canonical
//! display names. Name lookup is exact and is the only fallible path into the
//! engine besides custom input parsing.

mod algorithm;
mod error;
mod step;
mod trace;

pub use algorithm::{
    Algorithm, BacktrackAlgorithm, Category, DpAlgorithm, MazeAlgorithm, MstAlgorithm,
    PathAlgorithm, SearchAlgorithm, SortAlgorithm,
};
pub use error::{Error, Result};
pub use step::{
    ArrayStep, Bar, BarState, BoardCell, BoardState, BoardStep, CellState, DpCell, DpState,
    DpStep, EdgeState, GraphEdge, GraphNode, GraphStep, GridCell, GridStep, MstEdge,
    MstEdgeState, MstStep, NodeState, Piece, SearchOutcome, Step,
};
pub use trace::{StepLimitReached, Trace, TraceRecorder};

/// Default step cap for N-Queens traces.
pub const NQUEENS_STEP_LIMIT: usize = 4000;

/// Default step cap for Sudoku traces.
pub const SUDOKU_STEP_LIMIT: usize = 5000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_is_populated() {
        for category in Category::ALL {
            assert!(!category.algorithms().is_empty(), "{category} has no algorithms");
        }
    }

    #[test]
    fn names_round_trip_through_parsing() {
        for algorithm in Algorithm::all() {
            let parsed: Algorithm = algorithm.name().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }
}
