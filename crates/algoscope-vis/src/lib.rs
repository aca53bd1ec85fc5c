//! Algoscope Visualization Harness
//!
//! Everything between the engine and a view: seeded inputs, the per-category
//! step-sequence builders, playback controls and race mode.
//!
//! # Architecture
//!
//! - **Generators**: Seeded random arrays, mazes, graphs, boards and tables
//! - **Session**: Narrows an algorithm to its category and builds its trace
//! - **Playback**: Walks a finished trace at slider speed
//! - **Race**: Two sorts replayed in lockstep over one array
//!
//! # Usage
//!
//! ```
//! use algoscope_core::Algorithm;
//! use algoscope_vis::{Playback, Session};
//!
//! let mut session = Session::seeded(7);
//! let run = session.sorting("Quick Sort".parse::<Algorithm>()?)?;
//! let mut playback = Playback::new(run.trace);
//! playback.play();
//! while playback.tick().is_some() {}
//! assert!(playback.current_step().bars.iter().all(|b| b.state == algoscope_core::BarState::Sorted));
//! # Ok::<(), algoscope_core::Error>(())
//! ```

mod config;
mod custom_input;
pub mod generators;
mod playback;
mod race;
mod session;

pub use config::{
    ArrayConfig, GeneratorConfig, KnapsackConfig, MazeConfig, MstConfig, SearchConfig, Span, StepLimits,
    WeightedGraphConfig,
};
pub use custom_input::{parse_array, parse_graph, GraphInput};
pub use playback::{DelayProfile, Playback, PlaybackState, PlaybackStatus, Speed};
pub use race::{Lane, Race, Side, Standing, Standings};
pub use session::{BoardInput, DpInput, Run, SearchInput, Session};

#[cfg(test)]
mod tests {
    use super::*;
    use algoscope_core::{Algorithm, ArrayStep, PathAlgorithm, SortAlgorithm};

    #[test]
    fn custom_array_plays_back() {
        let values = parse_array("8 3 5 1").unwrap();
        let session = Session::seeded(0);
        let run = session.sorting_with(Algorithm::Sort(SortAlgorithm::Bubble), values).unwrap();

        let mut playback: Playback<ArrayStep> = Playback::new(run.trace);
        playback.seek(usize::MAX);
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert_eq!(playback.current_step().values(), vec![1, 3, 5, 8]);
        assert_eq!(playback.comparisons(), playback.trace().comparisons());
    }

    #[test]
    fn custom_graph_reaches_goal() {
        let graph = parse_graph(r#"{"nodes": [1, 2, 3], "edges": [[1, 2, 2], [2, 3, 2], [1, 3, 7]]}"#).unwrap();
        let session = Session::seeded(0);
        let run = session.shortest_path_with(Algorithm::Path(PathAlgorithm::Dijkstra), graph).unwrap();
        assert_eq!(run.trace.last().nodes[2].distance, Some(4));
    }
}
