//! Depth-first backtracking on boards.
//!
//! Every trial is a trying frame. A trial that fails outright, or whose
//! recursion fails, is shown as a backtrack frame. Frames identical to the
//! one before are dropped. Both searches run under a step cap; hitting it
//! ends the trace on the current board with `solved` false.

use algoscope_core::{
    BoardCell, BoardState, BoardStep, Error, Piece, Result, StepLimitReached, Trace, TraceRecorder,
};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// N-Queens
// ---------------------------------------------------------------------------

/// Place `n` queens column by column, recording at most `limit` steps.
///
/// Boards of size 2 and 3 have no solution and end unsolved.
pub fn n_queens(n: usize, limit: usize) -> Trace<BoardStep> {
    let mut queens = Queens {
        n,
        rows: vec![None; n],
        attempts: 0,
        backtracks: 0,
        recorder: TraceRecorder::with_limit(limit),
    };

    let solved = queens.save(None).and_then(|()| queens.place(0));
    if let Err(StepLimitReached { limit }) = solved {
        warn!("N-Queens n={} stopped at the {} step cap", n, limit);
    }
    let terminal = queens.board(None, solved == Ok(true));
    let trace = queens.recorder.finish(terminal);
    debug!("N-Queens n={}: solved {}, {} steps", n, trace.last().solved, trace.len());
    trace
}

struct Queens {
    n: usize,
    /// Row of the queen in each column.
    rows: Vec<Option<usize>>,
    attempts: usize,
    backtracks: usize,
    recorder: TraceRecorder<BoardStep>,
}

impl Queens {
    fn place(&mut self, col: usize) -> std::result::Result<bool, StepLimitReached> {
        if col == self.n {
            return Ok(true);
        }
        for row in 0..self.n {
            self.attempts += 1;
            self.save(Some((row, col, BoardState::Trying)))?;

            if !self.is_safe(row, col) {
                // Shown, but not counted as a backtrack.
                self.save(Some((row, col, BoardState::Backtrack)))?;
                continue;
            }

            self.rows[col] = Some(row);
            self.save(None)?;
            if self.place(col + 1)? {
                return Ok(true);
            }

            self.backtracks += 1;
            self.save(Some((row, col, BoardState::Backtrack)))?;
            self.rows[col] = None;
            self.save(None)?;
        }
        Ok(false)
    }

    /// No earlier queen shares the row or a diagonal.
    fn is_safe(&self, row: usize, col: usize) -> bool {
        self.rows[..col].iter().enumerate().all(|(c, r)| match *r {
            Some(r) => r != row && r.abs_diff(row) != c.abs_diff(col),
            None => true,
        })
    }

    fn board(&self, highlight: Option<(usize, usize, BoardState)>, solved: bool) -> BoardStep {
        let mut board = vec![vec![BoardCell::default(); self.n]; self.n];
        for (col, row) in self.rows.iter().enumerate() {
            if let Some(row) = *row {
                board[row][col] = BoardCell { value: Piece::Queen, state: BoardState::Success };
            }
        }
        if let Some((row, col, state)) = highlight {
            board[row][col] = BoardCell { value: Piece::Queen, state };
        }
        BoardStep { board, attempts: self.attempts, backtracks: self.backtracks, solved }
    }

    fn save(
        &mut self,
        highlight: Option<(usize, usize, BoardState)>,
    ) -> std::result::Result<(), StepLimitReached> {
        let step = self.board(highlight, false);
        self.recorder.record_distinct(step)
    }
}

// ---------------------------------------------------------------------------
// Sudoku
// ---------------------------------------------------------------------------

/// A 9x9 puzzle; `0` marks an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SudokuPuzzle {
    grid: [[u8; 9]; 9],
}

impl SudokuPuzzle {
    /// Validate the givens: digits only, and no two equal givens in a row,
    /// column or box.
    pub fn new(grid: [[u8; 9]; 9]) -> Result<Self> {
        for (r, row) in grid.iter().enumerate() {
            for (c, &digit) in row.iter().enumerate() {
                if digit > 9 {
                    return Err(Error::InvalidInput(format!("cell ({r}, {c}) holds {digit}")));
                }
                if digit != 0 && !fits(&grid, r, c, digit) {
                    return Err(Error::InvalidInput(format!(
                        "given {digit} at ({r}, {c}) conflicts with another given"
                    )));
                }
            }
        }
        Ok(Self { grid })
    }

    pub fn grid(&self) -> &[[u8; 9]; 9] {
        &self.grid
    }

    /// The same puzzle mirrored along its main diagonal.
    pub fn transposed(&self) -> Self {
        let mut grid = [[0; 9]; 9];
        for (r, row) in self.grid.iter().enumerate() {
            for (c, &digit) in row.iter().enumerate() {
                grid[c][r] = digit;
            }
        }
        Self { grid }
    }
}

/// Whether `digit` at `(row, col)` clashes with no other cell.
fn fits(grid: &[[u8; 9]; 9], row: usize, col: usize, digit: u8) -> bool {
    let (box_row, box_col) = (row / 3 * 3, col / 3 * 3);
    (0..9).all(|i| {
        let (br, bc) = (box_row + i / 3, box_col + i % 3);
        (i == col || grid[row][i] != digit)
            && (i == row || grid[i][col] != digit)
            && ((br, bc) == (row, col) || grid[br][bc] != digit)
    })
}

/// Solve `puzzle` cell by cell, recording at most `limit` steps.
pub fn sudoku(puzzle: &SudokuPuzzle, limit: usize) -> Trace<BoardStep> {
    let mut solver = Sudoku {
        grid: puzzle.grid,
        fixed: puzzle.grid.map(|row| row.map(|d| d != 0)),
        attempts: 0,
        backtracks: 0,
        recorder: TraceRecorder::with_limit(limit),
    };

    let solved = solver.save(None).and_then(|()| solver.fill());
    if let Err(StepLimitReached { limit }) = solved {
        warn!("Sudoku stopped at the {} step cap after {} attempts", limit, solver.attempts);
    }
    let terminal = solver.board(None, solved == Ok(true));
    let trace = solver.recorder.finish(terminal);
    debug!(
        "Sudoku: solved {}, {} attempts, {} backtracks, {} steps",
        trace.last().solved,
        trace.last().attempts,
        trace.last().backtracks,
        trace.len()
    );
    trace
}

struct Sudoku {
    grid: [[u8; 9]; 9],
    fixed: [[bool; 9]; 9],
    attempts: usize,
    backtracks: usize,
    recorder: TraceRecorder<BoardStep>,
}

impl Sudoku {
    fn fill(&mut self) -> std::result::Result<bool, StepLimitReached> {
        let Some((row, col)) = self.first_empty() else {
            return Ok(true);
        };

        for digit in 1..=9 {
            self.attempts += 1;
            self.grid[row][col] = digit;
            self.save(Some((row, col, BoardState::Trying)))?;

            if fits(&self.grid, row, col, digit) && self.fill()? {
                return Ok(true);
            }
            self.backtracks += 1;
            self.save(Some((row, col, BoardState::Backtrack)))?;
            self.grid[row][col] = 0;
        }
        Ok(false)
    }

    fn first_empty(&self) -> Option<(usize, usize)> {
        (0..81).map(|i| (i / 9, i % 9)).find(|&(r, c)| self.grid[r][c] == 0)
    }

    fn board(&self, highlight: Option<(usize, usize, BoardState)>, solved: bool) -> BoardStep {
        let board = (0..9)
            .map(|r| {
                (0..9)
                    .map(|c| {
                        let digit = self.grid[r][c];
                        let state = match highlight {
                            _ if self.fixed[r][c] => BoardState::Fixed,
                            Some((hr, hc, state)) if (hr, hc) == (r, c) => state,
                            _ if digit != 0 => BoardState::Success,
                            _ => BoardState::Default,
                        };
                        let value = if digit == 0 { Piece::Empty } else { Piece::Digit(digit) };
                        BoardCell { value, state }
                    })
                    .collect()
            })
            .collect();
        BoardStep { board, attempts: self.attempts, backtracks: self.backtracks, solved }
    }

    fn save(
        &mut self,
        highlight: Option<(usize, usize, BoardState)>,
    ) -> std::result::Result<(), StepLimitReached> {
        let step = self.board(highlight, false);
        self.recorder.record_distinct(step)
    }
}
