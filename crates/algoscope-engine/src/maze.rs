//! Unweighted traversal of a walled grid.
//!
//! The trace opens on the untouched maze. Every cell the traversal reaches
//! other than start and end produces a visiting frame followed by a visited
//! frame. When the end is reached the path is rebuilt from parent links and
//! tagged on one final frame carrying its hop count. An unreachable end
//! simply leaves the last visited frame as the terminal state.

use std::collections::VecDeque;

use algoscope_core::{CellState, Error, GridCell, GridStep, MazeAlgorithm, Result, Trace, TraceRecorder};
use tracing::debug;

/// `(row, col)`.
pub type Position = (usize, usize);

/// Neighbour order: up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A rectangular grid of open and walled cells with a start and an end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    walls: Vec<Vec<bool>>,
    start: Position,
    end: Position,
}

impl Maze {
    /// Validate and build a maze. `walls[row][col]` is true for a wall.
    pub fn new(walls: Vec<Vec<bool>>, start: Position, end: Position) -> Result<Self> {
        let cols = walls.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(Error::InvalidInput("maze has no cells".into()));
        }
        if walls.iter().any(|row| row.len() != cols) {
            return Err(Error::InvalidInput("maze rows differ in length".into()));
        }
        for (name, (row, col)) in [("start", start), ("end", end)] {
            match walls.get(row).and_then(|r| r.get(col)) {
                None => {
                    return Err(Error::InvalidInput(format!(
                        "{name} ({row}, {col}) is outside the maze"
                    )))
                }
                Some(true) => {
                    return Err(Error::InvalidInput(format!("{name} ({row}, {col}) is a wall")))
                }
                Some(false) => {}
            }
        }
        Ok(Self { walls, start, end })
    }

    pub fn rows(&self) -> usize {
        self.walls.len()
    }

    pub fn cols(&self) -> usize {
        self.walls[0].len()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn is_wall(&self, (row, col): Position) -> bool {
        self.walls[row][col]
    }

    /// Open cells orthogonally adjacent to `pos`.
    pub fn neighbors(&self, (row, col): Position) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                (r < self.rows() && c < self.cols() && !self.walls[r][c]).then_some((r, c))
            })
            .collect()
    }
}

/// Trace `algorithm` from the maze's start towards its end.
pub fn traverse(algorithm: MazeAlgorithm, maze: &Maze) -> Trace<GridStep> {
    let mut walk = Walk::new(maze);
    walk.snapshot();

    let reached = match algorithm {
        MazeAlgorithm::DepthFirst => depth_first(&mut walk, maze),
        MazeAlgorithm::BreadthFirst => breadth_first(&mut walk, maze),
    };

    let trace = match reached {
        Some(parents) => walk.finish_path(maze, &parents),
        None => walk.finish(),
    };
    debug!(
        "{} on {}x{} maze: path {:?}, {} steps",
        algorithm.name(),
        maze.rows(),
        maze.cols(),
        trace.last().path_length,
        trace.len()
    );
    trace
}

type Parents = Vec<Vec<Option<Position>>>;

/// Recursive-order depth-first search on an explicit stack.
fn depth_first(walk: &mut Walk, maze: &Maze) -> Option<Parents> {
    let mut seen = vec![vec![false; maze.cols()]; maze.rows()];
    let mut parents: Parents = vec![vec![None; maze.cols()]; maze.rows()];
    let start = maze.start();

    seen[start.0][start.1] = true;
    walk.visit(start);
    if start == maze.end() {
        return Some(parents);
    }

    let mut stack = vec![(start, maze.neighbors(start).into_iter())];
    while let Some((from, pending)) = stack.last_mut() {
        let from = *from;
        match pending.next() {
            Some(next) if !seen[next.0][next.1] => {
                seen[next.0][next.1] = true;
                parents[next.0][next.1] = Some(from);
                walk.visit(next);
                if next == maze.end() {
                    return Some(parents);
                }
                stack.push((next, maze.neighbors(next).into_iter()));
            }
            Some(_) => {}
            None => {
                stack.pop();
            }
        }
    }
    None
}

fn breadth_first(walk: &mut Walk, maze: &Maze) -> Option<Parents> {
    let mut seen = vec![vec![false; maze.cols()]; maze.rows()];
    let mut parents: Parents = vec![vec![None; maze.cols()]; maze.rows()];
    let start = maze.start();

    seen[start.0][start.1] = true;
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        walk.visit(pos);
        if pos == maze.end() {
            return Some(parents);
        }
        for next in maze.neighbors(pos) {
            if !seen[next.0][next.1] {
                seen[next.0][next.1] = true;
                parents[next.0][next.1] = Some(pos);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Working grid plus the recorder its frames go into.
struct Walk {
    cells: Vec<Vec<GridCell>>,
    visited_count: usize,
    recorder: TraceRecorder<GridStep>,
}

impl Walk {
    fn new(maze: &Maze) -> Self {
        let cells = (0..maze.rows())
            .map(|row| {
                (0..maze.cols())
                    .map(|col| {
                        let state = if (row, col) == maze.start() {
                            CellState::Start
                        } else if (row, col) == maze.end() {
                            CellState::End
                        } else {
                            CellState::Default
                        };
                        GridCell { row, col, is_wall: maze.is_wall((row, col)), state }
                    })
                    .collect()
            })
            .collect();
        Self { cells, visited_count: 0, recorder: TraceRecorder::new() }
    }

    fn snapshot(&mut self) {
        let step = GridStep {
            cells: self.cells.clone(),
            visited_count: self.visited_count,
            path_length: None,
        };
        // Maze traces are uncapped.
        let _ = self.recorder.record(step);
    }

    /// Visiting frame then visited frame. Start and end keep their tags.
    fn visit(&mut self, (row, col): Position) {
        if matches!(self.cells[row][col].state, CellState::Start | CellState::End) {
            return;
        }
        for cell in self.cells.iter_mut().flatten() {
            if cell.state == CellState::Visiting {
                cell.state = CellState::Default;
            }
        }
        self.cells[row][col].state = CellState::Visiting;
        self.visited_count += 1;
        self.snapshot();

        self.cells[row][col].state = CellState::Visited;
        self.snapshot();
    }

    fn finish_path(mut self, maze: &Maze, parents: &Parents) -> Trace<GridStep> {
        let mut hops = 0;
        let mut at = maze.end();
        while let Some(prev) = parents[at.0][at.1] {
            hops += 1;
            at = prev;
            let cell = &mut self.cells[at.0][at.1];
            if !matches!(cell.state, CellState::Start | CellState::End) {
                cell.state = CellState::Path;
            }
        }
        let terminal = GridStep {
            cells: self.cells,
            visited_count: self.visited_count,
            path_length: Some(hops),
        };
        self.recorder.finish(terminal)
    }

    fn finish(self) -> Trace<GridStep> {
        let Walk { cells, visited_count, recorder } = self;
        recorder.finish_recorded(|| GridStep { cells, visited_count, path_length: None })
    }
}
