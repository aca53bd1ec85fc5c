//! Input generation settings.

use algoscope_core::{Error, Result, NQUEENS_STEP_LIMIT, SUDOKU_STEP_LIMIT};
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive range a generator draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: SampleUniform + PartialOrd + Copy> Span<T> {
    /// Draw a value uniformly from `min..=max`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.gen_range(self.min..=self.max)
    }
}

impl<T: PartialOrd + std::fmt::Debug> Span<T> {
    fn check(&self, name: &str) -> Result<()> {
        if self.min > self.max {
            return Err(Error::InvalidInput(format!(
                "{name}: min {:?} exceeds max {:?}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Random integer arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayConfig {
    pub length: usize,
    pub values: Span<i64>,
}

/// Random search instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub length: usize,
    pub values: Span<i64>,
    /// Chance that the target is drawn from the array.
    pub hit_probability: f64,
}

/// Random walled grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    pub wall_probability: f64,
}

/// Lattice graphs for the shortest-path searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedGraphConfig {
    pub rows: usize,
    pub cols: usize,
    pub diagonal_probability: f64,
    /// Weights of row and column edges.
    pub weights: Span<u64>,
    /// Weights of diagonal edges. The minimum must be at least 2 for the A*
    /// heuristic to stay admissible on unit spacing.
    pub diagonal_weights: Span<u64>,
}

/// Connected graphs for the spanning tree constructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MstConfig {
    pub nodes: Span<usize>,
    /// Chance of each extra edge beyond the spanning backbone.
    pub edge_probability: Span<f64>,
    pub weights: Span<u64>,
}

/// Random knapsack instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnapsackConfig {
    pub items: Span<usize>,
    pub capacity: Span<usize>,
    pub weights: Span<usize>,
    pub values: Span<u64>,
}

/// Step caps for the backtracking searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepLimits {
    pub n_queens: usize,
    pub sudoku: usize,
}

impl Default for StepLimits {
    fn default() -> Self {
        Self { n_queens: NQUEENS_STEP_LIMIT, sudoku: SUDOKU_STEP_LIMIT }
    }
}

/// Everything the input generators need. Missing JSON fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for deterministic generation.
    pub seed: u64,
    pub sorting: ArrayConfig,
    pub race: ArrayConfig,
    pub search: SearchConfig,
    pub maze: MazeConfig,
    pub weighted_graph: WeightedGraphConfig,
    pub mst: MstConfig,
    pub n_queens: Span<usize>,
    pub knapsack: KnapsackConfig,
    pub fibonacci: Span<usize>,
    pub limits: StepLimits,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sorting: ArrayConfig { length: 30, values: Span::new(10, 109) },
            race: ArrayConfig { length: 15, values: Span::new(20, 99) },
            search: SearchConfig { length: 20, values: Span::new(50, 999), hit_probability: 0.7 },
            maze: MazeConfig { rows: 15, cols: 25, wall_probability: 0.3 },
            weighted_graph: WeightedGraphConfig {
                rows: 3,
                cols: 4,
                diagonal_probability: 0.3,
                weights: Span::new(1, 9),
                diagonal_weights: Span::new(2, 9),
            },
            mst: MstConfig {
                nodes: Span::new(6, 8),
                edge_probability: Span::new(0.35, 0.5),
                weights: Span::new(5, 29),
            },
            n_queens: Span::new(4, 8),
            knapsack: KnapsackConfig {
                items: Span::new(3, 5),
                capacity: Span::new(8, 15),
                weights: Span::new(1, 5),
                values: Span::new(2, 11),
            },
            fibonacci: Span::new(8, 15),
            limits: StepLimits::default(),
        }
    }
}

impl GeneratorConfig {
    /// Default settings with another seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    /// Parse and validate settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the generators cannot honour.
    pub fn validate(&self) -> Result<()> {
        self.sorting.values.check("sorting.values")?;
        self.race.values.check("race.values")?;
        self.search.values.check("search.values")?;
        self.weighted_graph.weights.check("weighted_graph.weights")?;
        self.weighted_graph.diagonal_weights.check("weighted_graph.diagonal_weights")?;
        self.mst.nodes.check("mst.nodes")?;
        self.mst.edge_probability.check("mst.edge_probability")?;
        self.mst.weights.check("mst.weights")?;
        self.n_queens.check("n_queens")?;
        self.knapsack.items.check("knapsack.items")?;
        self.knapsack.capacity.check("knapsack.capacity")?;
        self.knapsack.weights.check("knapsack.weights")?;
        self.knapsack.values.check("knapsack.values")?;
        self.fibonacci.check("fibonacci")?;

        for (name, p) in [
            ("search.hit_probability", self.search.hit_probability),
            ("maze.wall_probability", self.maze.wall_probability),
            ("weighted_graph.diagonal_probability", self.weighted_graph.diagonal_probability),
            ("mst.edge_probability.min", self.mst.edge_probability.min),
            ("mst.edge_probability.max", self.mst.edge_probability.max),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidInput(format!("{name} must lie in [0, 1], got {p}")));
            }
        }

        if self.maze.rows == 0 || self.maze.cols < 2 {
            return Err(Error::InvalidInput("maze needs at least one row and two columns".into()));
        }
        if self.weighted_graph.rows == 0 || self.weighted_graph.cols == 0 {
            return Err(Error::InvalidInput("weighted graph needs at least one node".into()));
        }
        if self.weighted_graph.weights.min == 0 || self.weighted_graph.diagonal_weights.min < 2 {
            return Err(Error::InvalidInput(
                "edge weights must be at least 1, diagonal weights at least 2".into(),
            ));
        }
        if self.mst.nodes.min == 0 {
            return Err(Error::InvalidInput("spanning tree graphs need a node".into()));
        }
        Ok(())
    }
}
