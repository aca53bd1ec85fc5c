//! Algorithm catalog.
//!
//! Every algorithm the engine can trace, grouped by category. Names are the
//! canonical display names used by the input layer and must match exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level grouping shown in the algorithm picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sorting,
    Searching,
    Graph,
    MinimumSpanningTree,
    DynamicProgramming,
    Backtracking,
}

impl Category {
    /// All categories in picker order.
    pub const ALL: [Self; 6] = [
        Self::Sorting,
        Self::Searching,
        Self::Graph,
        Self::MinimumSpanningTree,
        Self::DynamicProgramming,
        Self::Backtracking,
    ];

    /// Display title of the category.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Sorting => "Sorting Algorithms",
            Self::Searching => "Searching Algorithms",
            Self::Graph => "Graph Algorithms",
            Self::MinimumSpanningTree => "Minimum Spanning Tree",
            Self::DynamicProgramming => "Dynamic Programming",
            Self::Backtracking => "Backtracking",
        }
    }

    /// Every algorithm in this category.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        match self {
            Self::Sorting => SortAlgorithm::ALL.map(Algorithm::Sort).to_vec(),
            Self::Searching => SearchAlgorithm::ALL.map(Algorithm::Search).to_vec(),
            Self::Graph => {
                let mut all: Vec<_> = MazeAlgorithm::ALL.map(Algorithm::Maze).to_vec();
                all.extend(PathAlgorithm::ALL.map(Algorithm::Path));
                all
            }
            Self::MinimumSpanningTree => MstAlgorithm::ALL.map(Algorithm::Mst).to_vec(),
            Self::DynamicProgramming => DpAlgorithm::ALL.map(Algorithm::Dp).to_vec(),
            Self::Backtracking => BacktrackAlgorithm::ALL.map(Algorithm::Backtrack).to_vec(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Comparison and distribution sorts traced on an array of bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Shell,
    Tree,
    Tim,
    CocktailShaker,
    Counting,
    Radix,
}

impl SortAlgorithm {
    pub const ALL: [Self; 12] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
        Self::Heap,
        Self::Shell,
        Self::Tree,
        Self::Tim,
        Self::CocktailShaker,
        Self::Counting,
        Self::Radix,
    ];

    /// Canonical display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
            Self::Heap => "Heap Sort",
            Self::Shell => "Shell Sort",
            Self::Tree => "Tree Sort",
            Self::Tim => "Tim Sort",
            Self::CocktailShaker => "Cocktail Shaker Sort",
            Self::Counting => "Counting Sort",
            Self::Radix => "Radix Sort",
        }
    }
}

/// Searches traced on an array of bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchAlgorithm {
    Linear,
    Binary,
    Jump,
    Interpolation,
    Exponential,
    Fibonacci,
}

impl SearchAlgorithm {
    pub const ALL: [Self; 6] = [
        Self::Linear,
        Self::Binary,
        Self::Jump,
        Self::Interpolation,
        Self::Exponential,
        Self::Fibonacci,
    ];

    /// Canonical display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Linear => "Linear Search",
            Self::Binary => "Binary Search",
            Self::Jump => "Jump Search",
            Self::Interpolation => "Interpolation Search",
            Self::Exponential => "Exponential Search",
            Self::Fibonacci => "Fibonacci Search",
        }
    }

    /// Whether the search needs its input sorted ascending.
    pub const fn requires_sorted(&self) -> bool {
        !matches!(self, Self::Linear)
    }
}

/// Unweighted traversals over a walled grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MazeAlgorithm {
    DepthFirst,
    BreadthFirst,
}

impl MazeAlgorithm {
    pub const ALL: [Self; 2] = [Self::DepthFirst, Self::BreadthFirst];

    /// Canonical display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DepthFirst => "Depth First Search (DFS)",
            Self::BreadthFirst => "Breadth First Search (BFS)",
        }
    }
}

/// Shortest-path searches over a small weighted graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathAlgorithm {
    Dijkstra,
    AStar,
    UniformCost,
}

impl PathAlgorithm {
    pub const ALL: [Self; 3] = [Self::Dijkstra, Self::AStar, Self::UniformCost];

    /// Canonical display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dijkstra => "Dijkstra's Algorithm",
            Self::AStar => "A* Search",
            Self::UniformCost => "Uniform Cost Search",
        }
    }

    /// Whether node selection adds the straight-line distance to the goal.
    pub const fn uses_heuristic(&self) -> bool {
        matches!(self, Self::AStar)
    }
}

/// Minimum spanning tree constructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MstAlgorithm {
    Prim,
    Kruskal,
}

impl MstAlgorithm {
    pub const ALL: [Self; 2] = [Self::Prim, Self::Kruskal];

    /// Canonical display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Prim => "Prim's Algorithm",
            Self::Kruskal => "Kruskal's Algorithm",
        }
    }
}

/// Table-filling dynamic programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DpAlgorithm {
    Knapsack,
    Fibonacci,
}

impl DpAlgorithm {
    pub const ALL: [Self; 2] = [Self::Knapsack, Self::Fibonacci];

    /// Canonical display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Knapsack => "0/1 Knapsack Problem",
            Self::Fibonacci => "Fibonacci Sequence",
        }
    }
}

/// Board puzzles solved by depth-first backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BacktrackAlgorithm {
    NQueens,
    Sudoku,
}

impl BacktrackAlgorithm {
    pub const ALL: [Self; 2] = [Self::NQueens, Self::Sudoku];

    /// Canonical display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NQueens => "N-Queens Problem",
            Self::Sudoku => "Sudoku Solver",
        }
    }
}

/// Any traceable algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    Sort(SortAlgorithm),
    Search(SearchAlgorithm),
    Maze(MazeAlgorithm),
    Path(PathAlgorithm),
    Mst(MstAlgorithm),
    Dp(DpAlgorithm),
    Backtrack(BacktrackAlgorithm),
}

impl Algorithm {
    /// Canonical display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sort(a) => a.name(),
            Self::Search(a) => a.name(),
            Self::Maze(a) => a.name(),
            Self::Path(a) => a.name(),
            Self::Mst(a) => a.name(),
            Self::Dp(a) => a.name(),
            Self::Backtrack(a) => a.name(),
        }
    }

    /// The category this algorithm is listed under.
    pub const fn category(&self) -> Category {
        match self {
            Self::Sort(_) => Category::Sorting,
            Self::Search(_) => Category::Searching,
            Self::Maze(_) | Self::Path(_) => Category::Graph,
            Self::Mst(_) => Category::MinimumSpanningTree,
            Self::Dp(_) => Category::DynamicProgramming,
            Self::Backtrack(_) => Category::Backtracking,
        }
    }

    /// Every algorithm in catalog order.
    pub fn all() -> Vec<Self> {
        Category::ALL.iter().flat_map(|c| c.algorithms()).collect()
    }

    /// Narrow to a sorting algorithm, or report the mismatch.
    pub fn as_sort(&self) -> Result<SortAlgorithm> {
        match self {
            Self::Sort(a) => Ok(*a),
            other => Err(other.mismatch(Category::Sorting)),
        }
    }

    /// Narrow to a searching algorithm, or report the mismatch.
    pub fn as_search(&self) -> Result<SearchAlgorithm> {
        match self {
            Self::Search(a) => Ok(*a),
            other => Err(other.mismatch(Category::Searching)),
        }
    }

    /// Narrow to a minimum spanning tree algorithm, or report the mismatch.
    pub fn as_mst(&self) -> Result<MstAlgorithm> {
        match self {
            Self::Mst(a) => Ok(*a),
            other => Err(other.mismatch(Category::MinimumSpanningTree)),
        }
    }

    pub fn as_maze(&self) -> Result<MazeAlgorithm> {
        match self {
            Self::Maze(a) => Ok(*a),
            other => Err(other.mismatch(Category::Graph)),
        }
    }

    pub fn as_path(&self) -> Result<PathAlgorithm> {
        match self {
            Self::Path(a) => Ok(*a),
            other => Err(other.mismatch(Category::Graph)),
        }
    }

    pub fn as_dp(&self) -> Result<DpAlgorithm> {
        match self {
            Self::Dp(a) => Ok(*a),
            other => Err(other.mismatch(Category::DynamicProgramming)),
        }
    }

    pub fn as_backtrack(&self) -> Result<BacktrackAlgorithm> {
        match self {
            Self::Backtrack(a) => Ok(*a),
            other => Err(other.mismatch(Category::Backtracking)),
        }
    }

    fn mismatch(&self, expected: Category) -> Error {
        Error::CategoryMismatch {
            algorithm: self.name().to_string(),
            expected,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        // The knapsack view was historically labelled without the suffix.
        if name == "0/1 Knapsack" {
            return Ok(Self::Dp(DpAlgorithm::Knapsack));
        }
        Self::all()
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| Error::UnknownAlgorithm(name.to_string()))
    }
}

impl TryFrom<String> for Algorithm {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(value: Algorithm) -> Self {
        value.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_twenty_nine_algorithms() {
        assert_eq!(Algorithm::all().len(), 29);
        assert_eq!(Category::Sorting.algorithms().len(), 12);
        assert_eq!(Category::Searching.algorithms().len(), 6);
        assert_eq!(Category::Graph.algorithms().len(), 5);
    }

    #[test]
    fn names_round_trip() {
        for algorithm in Algorithm::all() {
            let parsed: Algorithm = algorithm.name().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn names_must_match_exactly() {
        assert!("bubble sort".parse::<Algorithm>().is_err());
        assert!("Bubble Sort ".parse::<Algorithm>().is_err());
        assert!(matches!(
            "Bogo Sort".parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm(name)) if name == "Bogo Sort"
        ));
    }

    #[test]
    fn legacy_knapsack_label() {
        assert_eq!(
            "0/1 Knapsack".parse::<Algorithm>().unwrap(),
            Algorithm::Dp(DpAlgorithm::Knapsack)
        );
    }

    #[test]
    fn category_of_graph_algorithms() {
        assert_eq!(Algorithm::Maze(MazeAlgorithm::BreadthFirst).category(), Category::Graph);
        assert_eq!(Algorithm::Path(PathAlgorithm::AStar).category(), Category::Graph);
        assert_eq!(Algorithm::Mst(MstAlgorithm::Prim).category(), Category::MinimumSpanningTree);
    }

    #[test]
    fn narrowing_reports_mismatch() {
        let prim = Algorithm::Mst(MstAlgorithm::Prim);
        assert!(prim.as_mst().is_ok());
        let err = prim.as_sort().unwrap_err();
        assert_eq!(err.to_string(), "Prim's Algorithm is not one of the Sorting Algorithms");
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Algorithm::Search(SearchAlgorithm::Jump)).unwrap();
        assert_eq!(json, "\"Jump Search\"");

        let parsed: Algorithm = serde_json::from_str("\"Sudoku Solver\"").unwrap();
        assert_eq!(parsed, Algorithm::Backtrack(BacktrackAlgorithm::Sudoku));
    }

    #[test]
    fn only_linear_search_accepts_unsorted_input() {
        for search in SearchAlgorithm::ALL {
            assert_eq!(search.requires_sorted(), search != SearchAlgorithm::Linear);
        }
    }
}
