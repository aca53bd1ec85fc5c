//! Step snapshots.
//!
//! A step is a full, owned copy of an algorithm's working state at one
//! instant plus the event flags of that instant. Each category has its own
//! snapshot shape; [`Step`] unifies them so a renderer can branch
//! exhaustively on the kind.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Array (sorting and searching)
// ---------------------------------------------------------------------------

/// Role of a bar in an array snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarState {
    #[default]
    Default,
    Comparing,
    Swapping,
    Sorted,
    Pivot,
    Checking,
    Found,
    NotFound,
    Range,
}

impl BarState {
    /// Precedence when several tags compete for one bar within a step.
    ///
    /// `pivot > swapping > comparing > range > default`, with the search
    /// verdicts slotted above the probe they conclude.
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Range => 1,
            Self::Comparing | Self::Checking => 2,
            Self::Swapping | Self::NotFound => 3,
            Self::Pivot => 4,
            Self::Found => 5,
            Self::Sorted => 6,
        }
    }
}

/// One element of the traced array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub value: i64,
    pub state: BarState,
}

impl Bar {
    /// A bar in the default state.
    pub const fn new(value: i64) -> Self {
        Self { value, state: BarState::Default }
    }

    /// A bar carrying an explicit state, used when a write replaces a slot.
    pub const fn with_state(value: i64, state: BarState) -> Self {
        Self { value, state }
    }

    /// Apply a tag, honouring precedence. `Sorted` is never overwritten.
    pub fn tag(&mut self, state: BarState) {
        if self.state == BarState::Sorted {
            return;
        }
        if state.precedence() >= self.state.precedence() {
            self.state = state;
        }
    }

    /// Clear transient tags, keeping `Sorted`.
    pub fn reset(&mut self) {
        if self.state != BarState::Sorted {
            self.state = BarState::Default;
        }
    }
}

/// Verdict carried by the terminal step of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(usize),
    NotFound,
}

impl SearchOutcome {
    /// Index in the `-1`-for-missing convention of the renderer.
    pub fn found_index(&self) -> i64 {
        match self {
            Self::Found(i) => i64::try_from(*i).unwrap_or(i64::MAX),
            Self::NotFound => -1,
        }
    }
}

/// Snapshot of a sorting or searching run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayStep {
    pub bars: Vec<Bar>,
    /// This step records a comparison.
    pub comparison: bool,
    /// This step records a swap or a write.
    pub swap: bool,
    /// Set only on the step that concludes a search.
    pub outcome: Option<SearchOutcome>,
}

impl ArrayStep {
    /// Values in index order.
    pub fn values(&self) -> Vec<i64> {
        self.bars.iter().map(|b| b.value).collect()
    }

    /// Indices currently carrying `state`.
    pub fn indices_with(&self, state: BarState) -> Vec<usize> {
        self.bars
            .iter()
            .enumerate()
            .filter(|(_, b)| b.state == state)
            .map(|(i, _)| i)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Grid (maze traversal)
// ---------------------------------------------------------------------------

/// Role of a maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Default,
    Start,
    End,
    Visiting,
    Visited,
    Path,
}

/// A maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub is_wall: bool,
    pub state: CellState,
}

/// Snapshot of a maze traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridStep {
    pub cells: Vec<Vec<GridCell>>,
    /// Cells confirmed visited so far.
    pub visited_count: usize,
    /// Hop count of the reconstructed path, on the final step of a success.
    pub path_length: Option<usize>,
}

impl GridStep {
    /// Coordinates of every cell tagged `state`, row-major.
    pub fn positions_with(&self, state: CellState) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.state == state)
            .map(|c| (c.row, c.col))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Weighted graph (shortest paths)
// ---------------------------------------------------------------------------

/// Role of a node during a shortest-path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    #[default]
    Default,
    /// Reached with a finite tentative distance, not yet settled.
    Frontier,
    Current,
    Visited,
    Path,
}

/// Role of an edge during a shortest-path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeState {
    #[default]
    Default,
    Current,
    Path,
}

/// A node with its tentative distance. `None` stands for infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: usize,
    pub distance: Option<u64>,
    pub previous: Option<usize>,
    pub state: NodeState,
}

/// An undirected weighted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub weight: u64,
    pub state: EdgeState,
}

impl GraphEdge {
    /// Whether the edge joins `a` and `b` in either direction.
    pub fn joins(&self, a: usize, b: usize) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Snapshot of a shortest-path search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStep {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Edge relaxations examined so far.
    pub computations: usize,
    /// Unsettled nodes with a finite distance.
    pub frontier_size: usize,
}

// ---------------------------------------------------------------------------
// Minimum spanning tree
// ---------------------------------------------------------------------------

/// Role of an edge while building a spanning tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MstEdgeState {
    #[default]
    Default,
    Considering,
    Selected,
    Rejected,
}

/// An undirected weighted edge of the spanning tree input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstEdge {
    pub from: usize,
    pub to: usize,
    pub weight: u64,
    pub state: MstEdgeState,
}

/// Snapshot of a spanning tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstStep {
    pub edges: Vec<MstEdge>,
    pub total_cost: u64,
}

impl MstStep {
    /// Edges tagged `Selected`.
    pub fn selected(&self) -> impl Iterator<Item = &MstEdge> {
        self.edges.iter().filter(|e| e.state == MstEdgeState::Selected)
    }
}

// ---------------------------------------------------------------------------
// Backtracking boards
// ---------------------------------------------------------------------------

/// Role of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardState {
    #[default]
    Default,
    Trying,
    Success,
    Backtrack,
    /// Given by the puzzle, never changed.
    Fixed,
}

/// What occupies a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Piece {
    #[default]
    Empty,
    Queen,
    Digit(u8),
}

/// A board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardCell {
    pub value: Piece,
    pub state: BoardState,
}

/// Snapshot of a backtracking search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStep {
    pub board: Vec<Vec<BoardCell>>,
    pub attempts: usize,
    pub backtracks: usize,
    pub solved: bool,
}

// ---------------------------------------------------------------------------
// Dynamic programming tables
// ---------------------------------------------------------------------------

/// Role of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DpState {
    #[default]
    Default,
    Computing,
    Computed,
    Optimal,
}

/// A table cell. `None` until the cell has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DpCell {
    pub value: Option<u64>,
    pub state: DpState,
}

/// Snapshot of a table fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpStep {
    pub table: Vec<Vec<DpCell>>,
    pub result: u64,
    /// Recurrence evaluations so far.
    pub computations: usize,
}

// ---------------------------------------------------------------------------
// Sum type
// ---------------------------------------------------------------------------

/// A step of any category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Array(ArrayStep),
    Grid(GridStep),
    Graph(GraphStep),
    Mst(MstStep),
    Board(BoardStep),
    Dp(DpStep),
}

impl Step {
    /// Short name of the snapshot shape.
    pub const fn kind(&self) -> &'static str {
        match self {
            Step::Array(_) => "array",
            Step::Grid(_) => "grid",
            Step::Graph(_) => "graph",
            Step::Mst(_) => "mst",
            Step::Board(_) => "board",
            Step::Dp(_) => "dp",
        }
    }
}

impl From<ArrayStep> for Step {
    fn from(step: ArrayStep) -> Self {
        Step::Array(step)
    }
}

impl From<GridStep> for Step {
    fn from(step: GridStep) -> Self {
        Step::Grid(step)
    }
}

impl From<GraphStep> for Step {
    fn from(step: GraphStep) -> Self {
        Step::Graph(step)
    }
}

impl From<MstStep> for Step {
    fn from(step: MstStep) -> Self {
        Step::Mst(step)
    }
}

impl From<BoardStep> for Step {
    fn from(step: BoardStep) -> Self {
        Step::Board(step)
    }
}

impl From<DpStep> for Step {
    fn from(step: DpStep) -> Self {
        Step::Dp(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_is_sticky() {
        let mut bar = Bar::new(5);
        bar.tag(BarState::Sorted);
        bar.tag(BarState::Pivot);
        bar.reset();
        assert_eq!(bar.state, BarState::Sorted);
    }

    #[test]
    fn stronger_tag_wins() {
        let mut bar = Bar::new(1);
        bar.tag(BarState::Range);
        bar.tag(BarState::Comparing);
        assert_eq!(bar.state, BarState::Comparing);

        bar.tag(BarState::Pivot);
        bar.tag(BarState::Swapping);
        assert_eq!(bar.state, BarState::Pivot);

        bar.reset();
        assert_eq!(bar.state, BarState::Default);
    }

    #[test]
    fn precedence_order() {
        let order = [
            BarState::Default,
            BarState::Range,
            BarState::Comparing,
            BarState::Swapping,
            BarState::Pivot,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].precedence() < pair[1].precedence());
        }
    }

    #[test]
    fn verdict_overrides_probe() {
        let mut bar = Bar::new(3);
        bar.tag(BarState::Checking);
        bar.tag(BarState::NotFound);
        assert_eq!(bar.state, BarState::NotFound);
    }

    #[test]
    fn found_index_convention() {
        assert_eq!(SearchOutcome::Found(4).found_index(), 4);
        assert_eq!(SearchOutcome::NotFound.found_index(), -1);
    }

    #[test]
    fn step_serialization_is_tagged() {
        let step = Step::from(MstStep { edges: Vec::new(), total_cost: 12 });
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"kind\":\"mst\""));
        assert!(json.contains("\"total_cost\":12"));

        let parsed: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, step);
        assert_eq!(parsed.kind(), "mst");
    }

    #[test]
    fn bar_states_serialize_lowercase() {
        let json = serde_json::to_string(&BarState::NotFound).unwrap();
        assert_eq!(json, "\"notfound\"");
    }

    #[test]
    fn edge_joins_either_direction() {
        let edge = GraphEdge { from: 2, to: 7, weight: 3, state: EdgeState::Default };
        assert!(edge.joins(2, 7));
        assert!(edge.joins(7, 2));
        assert!(!edge.joins(2, 3));
    }
}
