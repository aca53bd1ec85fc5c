//! Seeded random inputs.
//!
//! Every generator draws from a caller-supplied [`Rng`], so a session seeded
//! with the same value always produces the same instances. Builders that go
//! through a validating constructor return [`Result`]; with a validated
//! [`GeneratorConfig`] they never fail.

use algoscope_core::Result;
use algoscope_engine::{KnapsackItem, Link, Maze, SudokuPuzzle, WeightedGraph};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{ArrayConfig, KnapsackConfig, MazeConfig, MstConfig, SearchConfig, WeightedGraphConfig};

/// Curated puzzles that solve well inside the default step cap. The pool also
/// serves their transposes.
const SUDOKU_POOL: [[[u8; 9]; 9]; 2] = [
    [
        [0, 0, 0, 2, 6, 0, 7, 0, 1],
        [6, 8, 0, 0, 7, 0, 0, 9, 0],
        [1, 9, 0, 0, 0, 4, 5, 0, 0],
        [8, 2, 0, 1, 0, 0, 0, 4, 0],
        [0, 0, 4, 6, 0, 2, 9, 0, 0],
        [0, 5, 0, 0, 0, 3, 0, 2, 8],
        [0, 0, 9, 3, 0, 0, 0, 7, 4],
        [0, 4, 0, 0, 5, 0, 0, 3, 6],
        [7, 0, 3, 0, 1, 8, 0, 0, 0],
    ],
    [
        [1, 0, 0, 4, 8, 9, 0, 0, 6],
        [7, 3, 0, 0, 0, 0, 0, 4, 0],
        [0, 0, 0, 0, 0, 1, 2, 9, 5],
        [0, 0, 7, 1, 2, 0, 6, 0, 0],
        [5, 0, 0, 7, 0, 3, 0, 0, 8],
        [0, 0, 6, 0, 9, 5, 7, 0, 0],
        [9, 1, 4, 6, 0, 0, 0, 0, 0],
        [0, 2, 0, 0, 0, 0, 0, 3, 7],
        [8, 0, 0, 5, 1, 2, 0, 0, 4],
    ],
];

/// Number of distinct puzzles [`sudoku_puzzle`] can return.
pub const SUDOKU_POOL_SIZE: usize = SUDOKU_POOL.len() * 2;

/// Uniform random integers.
pub fn array<R: Rng + ?Sized>(rng: &mut R, config: &ArrayConfig) -> Vec<i64> {
    (0..config.length).map(|_| config.values.sample(rng)).collect()
}

/// A random array plus a target.
///
/// With probability `hit_probability` the target is one of the values;
/// otherwise it is ten less than the first value, which the array may still
/// happen to contain.
pub fn search_instance<R: Rng + ?Sized>(rng: &mut R, config: &SearchConfig) -> (Vec<i64>, i64) {
    let values: Vec<i64> = (0..config.length).map(|_| config.values.sample(rng)).collect();
    let target = match values.choose(rng) {
        Some(&hit) if rng.gen_bool(config.hit_probability) => hit,
        _ => values.first().map_or(config.values.min - 10, |first| first - 10),
    };
    (values, target)
}

/// A walled grid with the start on the left edge and the end on the right
/// edge. Both endpoints are always open; the end need not be reachable.
pub fn maze<R: Rng + ?Sized>(rng: &mut R, config: &MazeConfig) -> Result<Maze> {
    let mut walls: Vec<Vec<bool>> = (0..config.rows)
        .map(|_| (0..config.cols).map(|_| rng.gen_bool(config.wall_probability)).collect())
        .collect();
    let start = (rng.gen_range(0..config.rows), 0);
    let end = (rng.gen_range(0..config.rows), config.cols - 1);
    walls[start.0][start.1] = false;
    walls[end.0][end.1] = false;
    Maze::new(walls, start, end)
}

/// A `rows x cols` lattice with unit spacing.
///
/// Every node links to its right and lower neighbours; each cell may also
/// gain one diagonal. Nodes are numbered row-major, so the searches run from
/// the top-left corner to the bottom-right one.
pub fn weighted_graph<R: Rng + ?Sized>(rng: &mut R, config: &WeightedGraphConfig) -> Result<WeightedGraph> {
    let (rows, cols) = (config.rows, config.cols);
    let id = |r: usize, c: usize| r * cols + c;

    let mut links = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                links.push(Link::new(id(r, c), id(r, c + 1), config.weights.sample(rng)));
            }
            if r + 1 < rows {
                links.push(Link::new(id(r, c), id(r + 1, c), config.weights.sample(rng)));
            }
            if r + 1 < rows && c + 1 < cols && rng.gen_bool(config.diagonal_probability) {
                let link = if rng.gen_bool(0.5) {
                    Link::new(id(r, c), id(r + 1, c + 1), 0)
                } else {
                    Link::new(id(r, c + 1), id(r + 1, c), 0)
                };
                links.push(Link { weight: config.diagonal_weights.sample(rng), ..link });
            }
        }
    }

    let positions = (0..rows * cols).map(|i| ((i % cols) as f64, (i / cols) as f64)).collect();
    WeightedGraph::new((0..rows * cols).collect(), links)?.with_positions(positions)
}

/// A connected graph for the spanning tree constructions.
///
/// A random spanning backbone keeps the graph connected; every other pair is
/// then linked with a probability drawn once per graph. Nodes sit on a
/// jittered four-column layout.
pub fn mst_graph<R: Rng + ?Sized>(rng: &mut R, config: &MstConfig) -> Result<WeightedGraph> {
    let n = config.nodes.sample(rng);
    let density = config.edge_probability.sample(rng);

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    let mut linked = vec![vec![false; n]; n];
    let mut links = Vec::new();

    for i in 1..n {
        let (a, b) = (order[i], order[rng.gen_range(0..i)]);
        linked[a][b] = true;
        linked[b][a] = true;
        links.push(Link::new(a.min(b), a.max(b), config.weights.sample(rng)));
    }
    for a in 0..n {
        for b in a + 1..n {
            if !linked[a][b] && rng.gen_bool(density) {
                links.push(Link::new(a, b, config.weights.sample(rng)));
            }
        }
    }

    let positions = (0..n)
        .map(|i| {
            let x = 15.0 + (i % 4) as f64 * 25.0 + rng.gen_range(-5.0..=5.0);
            let y = 20.0 + (i / 4) as f64 * 60.0 + rng.gen_range(-5.0..=5.0);
            (x, y)
        })
        .collect();
    WeightedGraph::new((0..n).collect(), links)?.with_positions(positions)
}

/// Pick one of the curated puzzles, possibly transposed.
pub fn sudoku_puzzle<R: Rng + ?Sized>(rng: &mut R) -> Result<SudokuPuzzle> {
    let pick = rng.gen_range(0..SUDOKU_POOL_SIZE);
    let puzzle = SudokuPuzzle::new(SUDOKU_POOL[pick % SUDOKU_POOL.len()])?;
    Ok(if pick >= SUDOKU_POOL.len() { puzzle.transposed() } else { puzzle })
}

/// Random knapsack items and capacity.
pub fn knapsack_instance<R: Rng + ?Sized>(rng: &mut R, config: &KnapsackConfig) -> (Vec<KnapsackItem>, usize) {
    let count = config.items.sample(rng);
    let items = (0..count)
        .map(|_| KnapsackItem { weight: config.weights.sample(rng), value: config.values.sample(rng) })
        .collect();
    (items, config.capacity.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn array_respects_config() {
        let config = GeneratorConfig::default();
        let values = array(&mut rng(1), &config.sorting);
        assert_eq!(values.len(), 30);
        assert!(values.iter().all(|v| (10..=109).contains(v)));
    }

    #[test]
    fn same_seed_same_array() {
        let config = GeneratorConfig::default();
        assert_eq!(array(&mut rng(5), &config.race), array(&mut rng(5), &config.race));
    }

    #[test]
    fn search_target_hits_or_undershoots() {
        let config = GeneratorConfig::default();
        let mut rng = rng(3);
        let mut hits = 0;
        for _ in 0..200 {
            let (values, target) = search_instance(&mut rng, &config.search);
            assert_eq!(values.len(), 20);
            if values.contains(&target) {
                hits += 1;
            } else {
                assert_eq!(target, values[0] - 10);
            }
        }
        assert!(hits > 100, "only {hits} hits");
    }

    #[test]
    fn empty_search_array_still_has_target() {
        let config = SearchConfig { length: 0, ..GeneratorConfig::default().search };
        let (values, target) = search_instance(&mut rng(0), &config);
        assert!(values.is_empty());
        assert_eq!(target, 40);
    }

    #[test]
    fn maze_endpoints_are_open() {
        let config = GeneratorConfig::default();
        let mut rng = rng(9);
        for _ in 0..50 {
            let maze = maze(&mut rng, &config.maze).unwrap();
            assert_eq!((maze.rows(), maze.cols()), (15, 25));
            assert_eq!(maze.start().1, 0);
            assert_eq!(maze.end().1, 24);
            assert!(!maze.is_wall(maze.start()));
            assert!(!maze.is_wall(maze.end()));
        }
    }

    #[test]
    fn weighted_graph_is_a_connected_lattice() {
        let config = GeneratorConfig::default();
        let graph = weighted_graph(&mut rng(2), &config.weighted_graph).unwrap();
        assert_eq!(graph.node_count(), 12);
        assert!(graph.is_connected());
        // Three rows of three horizontals plus two rows of four verticals.
        assert!(graph.links().len() >= 17);
        assert_eq!(graph.position(11), Some((3.0, 2.0)));
    }

    #[test]
    fn mst_graphs_are_connected() {
        let config = GeneratorConfig::default();
        let mut rng = rng(4);
        for _ in 0..100 {
            let graph = mst_graph(&mut rng, &config.mst).unwrap();
            assert!((6..=8).contains(&graph.node_count()));
            assert!(graph.is_connected());
            assert!(graph.links().iter().all(|l| (5..=29).contains(&l.weight)));
        }
    }

    #[test]
    fn sudoku_pool_covers_every_entry() {
        let mut rng = rng(11);
        let mut seen = Vec::new();
        for _ in 0..100 {
            let puzzle = sudoku_puzzle(&mut rng).unwrap();
            if !seen.contains(&puzzle) {
                seen.push(puzzle);
            }
        }
        assert_eq!(seen.len(), SUDOKU_POOL_SIZE);
    }

    #[test]
    fn knapsack_instance_in_range() {
        let config = GeneratorConfig::default();
        let (items, capacity) = knapsack_instance(&mut rng(6), &config.knapsack);
        assert!((3..=5).contains(&items.len()));
        assert!((8..=15).contains(&capacity));
        assert!(items.iter().all(|i| (1..=5).contains(&i.weight) && (2..=11).contains(&i.value)));
    }
}
