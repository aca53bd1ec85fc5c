//! Step-sequence builders.
//!
//! A [`Session`] owns the generator settings and a seeded RNG. Each builder
//! narrows the requested [`Algorithm`] to its category, prepares the input
//! (random or custom) and hands it to the engine. The returned [`Run`] keeps
//! the exact input next to the finished trace so a view can label what it is
//! replaying.

use algoscope_core::{
    Algorithm, ArrayStep, BacktrackAlgorithm, BoardStep, Category, DpAlgorithm, DpStep, GraphStep, GridStep,
    MstStep, Result, SearchAlgorithm, Step, Trace,
};
use algoscope_engine::{
    fibonacci, knapsack, n_queens, search, shortest_path, sort, spanning_tree, sudoku, traverse, KnapsackItem, Maze,
    SudokuPuzzle, WeightedGraph,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::generators;

/// A finished trace and the input it was generated from.
#[derive(Debug, Clone)]
pub struct Run<I, S> {
    pub input: I,
    pub trace: Trace<S>,
}

/// The array a search ran over and the value it looked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    /// Sorted ascending unless the search was linear.
    pub values: Vec<i64>,
    pub target: i64,
}

/// Input of a dynamic programming run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DpInput {
    Knapsack { items: Vec<KnapsackItem>, capacity: usize },
    Fibonacci { n: usize },
}

/// Input of a backtracking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardInput {
    Queens { n: usize },
    Sudoku(SudokuPuzzle),
}

/// Seeded source of traces.
#[derive(Debug, Clone)]
pub struct Session {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Session {
    /// Validate `config` and seed the RNG from it.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    /// Default settings with the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self { config: GeneratorConfig::with_seed(seed), rng: StdRng::seed_from_u64(seed) }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Sort a fresh random array.
    pub fn sorting(&mut self, algorithm: Algorithm) -> Result<Run<Vec<i64>, ArrayStep>> {
        let values = generators::array(&mut self.rng, &self.config.sorting);
        info!("{}: random array of {}", algorithm, values.len());
        self.sorting_with(algorithm, values)
    }

    pub(crate) fn race_array(&mut self) -> Vec<i64> {
        generators::array(&mut self.rng, &self.config.race)
    }

    /// Sort the given values.
    pub fn sorting_with(&self, algorithm: Algorithm, values: Vec<i64>) -> Result<Run<Vec<i64>, ArrayStep>> {
        let trace = sort(algorithm.as_sort()?, &values);
        Ok(Run { input: values, trace })
    }

    /// Search a fresh random array.
    pub fn searching(&mut self, algorithm: Algorithm) -> Result<Run<SearchInput, ArrayStep>> {
        let (values, target) = generators::search_instance(&mut self.rng, &self.config.search);
        info!("{}: random array of {}, target {}", algorithm, values.len(), target);
        self.searching_with(algorithm, values, target)
    }

    /// Search the given values. Every search but the linear one runs over
    /// the values sorted ascending.
    pub fn searching_with(
        &self,
        algorithm: Algorithm,
        mut values: Vec<i64>,
        target: i64,
    ) -> Result<Run<SearchInput, ArrayStep>> {
        let algorithm: SearchAlgorithm = algorithm.as_search()?;
        if algorithm.requires_sorted() {
            values.sort_unstable();
        }
        let trace = search(algorithm, &values, target);
        Ok(Run { input: SearchInput { values, target }, trace })
    }

    /// Traverse a fresh random maze.
    pub fn maze(&mut self, algorithm: Algorithm) -> Result<Run<Maze, GridStep>> {
        let algorithm = algorithm.as_maze()?;
        let maze = generators::maze(&mut self.rng, &self.config.maze)?;
        info!("{}: {}x{} maze", algorithm.name(), maze.rows(), maze.cols());
        let trace = traverse(algorithm, &maze);
        Ok(Run { input: maze, trace })
    }

    /// Shortest path over a fresh random lattice.
    pub fn shortest_path(&mut self, algorithm: Algorithm) -> Result<Run<WeightedGraph, GraphStep>> {
        algorithm.as_path()?;
        let graph = generators::weighted_graph(&mut self.rng, &self.config.weighted_graph)?;
        info!("{}: lattice of {} nodes", algorithm, graph.node_count());
        self.shortest_path_with(algorithm, graph)
    }

    /// Shortest path from the first node of `graph` to its last.
    pub fn shortest_path_with(
        &self,
        algorithm: Algorithm,
        graph: WeightedGraph,
    ) -> Result<Run<WeightedGraph, GraphStep>> {
        let trace = shortest_path(algorithm.as_path()?, &graph);
        Ok(Run { input: graph, trace })
    }

    /// Spanning tree of a fresh random connected graph.
    pub fn spanning_tree(&mut self, algorithm: Algorithm) -> Result<Run<WeightedGraph, MstStep>> {
        algorithm.as_mst()?;
        let graph = generators::mst_graph(&mut self.rng, &self.config.mst)?;
        info!("{}: {} nodes, {} edges", algorithm, graph.node_count(), graph.links().len());
        self.spanning_tree_with(algorithm, graph)
    }

    /// Spanning tree (or forest) of the given graph.
    pub fn spanning_tree_with(
        &self,
        algorithm: Algorithm,
        graph: WeightedGraph,
    ) -> Result<Run<WeightedGraph, MstStep>> {
        let trace = spanning_tree(algorithm.as_mst()?, &graph);
        Ok(Run { input: graph, trace })
    }

    /// Fill a table for a fresh random instance.
    pub fn dynamic_programming(&mut self, algorithm: Algorithm) -> Result<Run<DpInput, DpStep>> {
        let input = match algorithm.as_dp()? {
            DpAlgorithm::Knapsack => {
                let (items, capacity) = generators::knapsack_instance(&mut self.rng, &self.config.knapsack);
                DpInput::Knapsack { items, capacity }
            }
            DpAlgorithm::Fibonacci => DpInput::Fibonacci { n: self.config.fibonacci.sample(&mut self.rng) },
        };
        info!("{}: {:?}", algorithm, input);
        Ok(self.dynamic_programming_with(input))
    }

    /// Fill the table for a known instance.
    pub fn dynamic_programming_with(&self, input: DpInput) -> Run<DpInput, DpStep> {
        let trace = match &input {
            DpInput::Knapsack { items, capacity } => knapsack(items, *capacity),
            DpInput::Fibonacci { n } => fibonacci(*n),
        };
        Run { input, trace }
    }

    /// Solve a fresh random board under the configured step cap.
    pub fn backtracking(&mut self, algorithm: Algorithm) -> Result<Run<BoardInput, BoardStep>> {
        let input = match algorithm.as_backtrack()? {
            BacktrackAlgorithm::NQueens => BoardInput::Queens { n: self.config.n_queens.sample(&mut self.rng) },
            BacktrackAlgorithm::Sudoku => BoardInput::Sudoku(generators::sudoku_puzzle(&mut self.rng)?),
        };
        info!("{}: new board", algorithm);
        Ok(self.backtracking_with(input))
    }

    /// Solve a known board under the configured step cap.
    pub fn backtracking_with(&self, input: BoardInput) -> Run<BoardInput, BoardStep> {
        let limits = self.config.limits;
        let trace = match &input {
            BoardInput::Queens { n } => n_queens(*n, limits.n_queens),
            BoardInput::Sudoku(puzzle) => sudoku(puzzle, limits.sudoku),
        };
        Run { input, trace }
    }

    /// Any algorithm on a fresh random input, with the input dropped.
    pub fn generate(&mut self, algorithm: Algorithm) -> Result<Trace<Step>> {
        Ok(match algorithm.category() {
            Category::Sorting => self.sorting(algorithm)?.trace.erase(),
            Category::Searching => self.searching(algorithm)?.trace.erase(),
            Category::Graph if algorithm.as_maze().is_ok() => self.maze(algorithm)?.trace.erase(),
            Category::Graph => self.shortest_path(algorithm)?.trace.erase(),
            Category::MinimumSpanningTree => self.spanning_tree(algorithm)?.trace.erase(),
            Category::DynamicProgramming => self.dynamic_programming(algorithm)?.trace.erase(),
            Category::Backtracking => self.backtracking(algorithm)?.trace.erase(),
        })
    }

    /// Look an algorithm up by its display name and generate a trace for it.
    pub fn generate_named(&mut self, name: &str) -> Result<Trace<Step>> {
        self.generate(name.parse()?)
    }
}
