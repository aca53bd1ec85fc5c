//! Shortest paths on a weighted graph.
//!
//! Dijkstra, A* and uniform-cost search share one loop: repeatedly settle
//! the unvisited node with the smallest `distance + heuristic`, relaxing its
//! edges to unvisited neighbours one frame at a time. The heuristic is zero
//! except for A*, which uses the straight-line distance to the goal when the
//! graph has positions. The search stops the moment the goal is settled and
//! the path is traced back through `previous`.

use algoscope_core::{
    EdgeState, GraphEdge, GraphNode, GraphStep, NodeState, PathAlgorithm, Trace, TraceRecorder,
};
use tracing::debug;

use crate::graph::WeightedGraph;

/// Trace `algorithm` from the graph's first node to its last node.
pub fn shortest_path(algorithm: PathAlgorithm, graph: &WeightedGraph) -> Trace<GraphStep> {
    let start = 0;
    let goal = graph.node_count() - 1;
    let mut search = Search::new(graph);
    search.nodes[start].distance = Some(0);
    search.nodes[start].state = NodeState::Frontier;
    search.snapshot();

    let mut reached = false;
    while let Some(current) = search.select(graph, goal, algorithm.uses_heuristic()) {
        search.nodes[current].state = NodeState::Current;
        search.snapshot();

        if current == goal {
            reached = true;
            break;
        }
        search.relax_from(graph, current);
        search.nodes[current].state = NodeState::Visited;
    }

    if reached {
        search.tag_path(graph, goal);
    }
    let trace = search.finish();
    debug!(
        "{} over {} nodes: goal distance {:?}, {} steps",
        algorithm.name(),
        graph.node_count(),
        trace.last().nodes[goal].distance,
        trace.len()
    );
    trace
}

struct Search {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    /// Edge each node was last improved through.
    via: Vec<Option<usize>>,
    settled: Vec<bool>,
    computations: usize,
    recorder: TraceRecorder<GraphStep>,
}

impl Search {
    fn new(graph: &WeightedGraph) -> Self {
        let nodes = graph
            .ids()
            .iter()
            .map(|&id| GraphNode { id, distance: None, previous: None, state: NodeState::Default })
            .collect();
        let edges = graph
            .links()
            .iter()
            .map(|l| GraphEdge { from: l.from, to: l.to, weight: l.weight, state: EdgeState::Default })
            .collect();
        let n = graph.node_count();
        Self {
            nodes,
            edges,
            via: vec![None; n],
            settled: vec![false; n],
            computations: 0,
            recorder: TraceRecorder::new(),
        }
    }

    fn step(&self) -> GraphStep {
        GraphStep {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            computations: self.computations,
            frontier_size: self.nodes.iter().filter(|n| n.state == NodeState::Frontier).count(),
        }
    }

    fn snapshot(&mut self) {
        let step = self.step();
        // Graph traces are uncapped.
        let _ = self.recorder.record(step);
    }

    /// Unsettled node with a finite distance minimising `distance + h`.
    /// Ties go to the earlier node.
    fn select(&mut self, graph: &WeightedGraph, goal: usize, heuristic: bool) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, node) in self.nodes.iter().enumerate() {
            if self.settled[i] {
                continue;
            }
            let Some(distance) = node.distance else { continue };
            let h = if heuristic { graph.straight_line(i, goal) } else { 0.0 };
            let key = distance as f64 + h;
            if best.map_or(true, |(_, k)| key < k) {
                best = Some((i, key));
            }
        }
        let (i, _) = best?;
        self.settled[i] = true;
        Some(i)
    }

    fn relax_from(&mut self, graph: &WeightedGraph, current: usize) {
        let base = self.nodes[current].distance.unwrap_or(0);
        for edge in 0..self.edges.len() {
            let (a, b) = graph.ends(edge);
            let other = if a == current {
                b
            } else if b == current {
                a
            } else {
                continue;
            };
            if self.settled[other] {
                continue;
            }

            self.computations += 1;
            let candidate = base.saturating_add(self.edges[edge].weight);
            if self.nodes[other].distance.map_or(true, |d| candidate < d) {
                let previous = self.nodes[current].id;
                let node = &mut self.nodes[other];
                node.distance = Some(candidate);
                node.previous = Some(previous);
                node.state = NodeState::Frontier;
                self.via[other] = Some(edge);
            }
            self.edges[edge].state = EdgeState::Current;
            self.snapshot();
            self.edges[edge].state = EdgeState::Default;
        }
    }

    fn tag_path(&mut self, graph: &WeightedGraph, goal: usize) {
        let mut at = goal;
        self.nodes[at].state = NodeState::Path;
        while let Some(edge) = self.via[at] {
            self.edges[edge].state = EdgeState::Path;
            let (a, b) = graph.ends(edge);
            at = if a == at { b } else { a };
            self.nodes[at].state = NodeState::Path;
        }
    }

    fn finish(self) -> Trace<GraphStep> {
        let terminal = self.step();
        self.recorder.finish(terminal)
    }
}
