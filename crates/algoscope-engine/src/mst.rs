//! Minimum spanning trees.
//!
//! Both constructions open on the untouched edge list and show each
//! decision as a considering frame followed by its verdict. Edges keep their
//! input order in every frame; Kruskal only visits them by weight.

use algoscope_core::{MstAlgorithm, MstEdge, MstEdgeState, MstStep, Trace, TraceRecorder};
use tracing::debug;

use crate::graph::WeightedGraph;

/// Trace `algorithm` building a spanning tree of `graph`.
///
/// On a disconnected graph Prim's tree covers the first node's component and
/// Kruskal's result is a spanning forest.
pub fn spanning_tree(algorithm: MstAlgorithm, graph: &WeightedGraph) -> Trace<MstStep> {
    let mut build = Build::new(graph);
    build.snapshot();

    match algorithm {
        MstAlgorithm::Prim => prim(&mut build, graph),
        MstAlgorithm::Kruskal => kruskal(&mut build, graph),
    }

    let trace = build.recorder.finish_recorded(|| MstStep { edges: Vec::new(), total_cost: 0 });
    debug!(
        "{} over {} nodes and {} edges: cost {}, {} steps",
        algorithm.name(),
        graph.node_count(),
        graph.links().len(),
        trace.last().total_cost,
        trace.len()
    );
    trace
}

fn prim(build: &mut Build, graph: &WeightedGraph) {
    let mut in_tree = vec![false; graph.node_count()];
    in_tree[0] = true;

    loop {
        // Strictly smaller wins, so ties keep the earliest edge.
        let mut best: Option<usize> = None;
        for edge in 0..build.edges.len() {
            let (a, b) = graph.ends(edge);
            if in_tree[a] == in_tree[b] {
                continue;
            }
            if best.map_or(true, |e| build.edges[edge].weight < build.edges[e].weight) {
                best = Some(edge);
            }
        }
        let Some(edge) = best else { break };

        build.decide(edge, MstEdgeState::Considering);
        build.select(edge);
        let (a, b) = graph.ends(edge);
        in_tree[a] = true;
        in_tree[b] = true;
    }
}

fn kruskal(build: &mut Build, graph: &WeightedGraph) {
    let mut order: Vec<usize> = (0..build.edges.len()).collect();
    // Stable, so equal weights keep input order.
    order.sort_by_key(|&e| build.edges[e].weight);

    let mut sets = DisjointSet::new(graph.node_count());
    for edge in order {
        build.decide(edge, MstEdgeState::Considering);
        let (a, b) = graph.ends(edge);
        if sets.union(a, b) {
            build.select(edge);
        } else {
            build.decide(edge, MstEdgeState::Rejected);
        }
    }
}

struct Build {
    edges: Vec<MstEdge>,
    total_cost: u64,
    recorder: TraceRecorder<MstStep>,
}

impl Build {
    fn new(graph: &WeightedGraph) -> Self {
        let edges = graph
            .links()
            .iter()
            .map(|l| MstEdge { from: l.from, to: l.to, weight: l.weight, state: MstEdgeState::Default })
            .collect();
        Self { edges, total_cost: 0, recorder: TraceRecorder::new() }
    }

    fn snapshot(&mut self) {
        let step = MstStep { edges: self.edges.clone(), total_cost: self.total_cost };
        // Spanning tree traces are uncapped.
        let _ = self.recorder.record(step);
    }

    fn decide(&mut self, edge: usize, state: MstEdgeState) {
        self.edges[edge].state = state;
        self.snapshot();
    }

    fn select(&mut self, edge: usize) {
        self.total_cost = self.total_cost.saturating_add(self.edges[edge].weight);
        self.decide(edge, MstEdgeState::Selected);
    }
}

/// Union-find over dense node indices with path compression.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut at = x;
        while self.parent[at] != root {
            let next = self.parent[at];
            self.parent[at] = root;
            at = next;
        }
        root
    }

    /// Join the sets of `a` and `b`. False if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.parent[ra] = rb;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Link;
    use proptest::prelude::*;

    fn sample() -> WeightedGraph {
        WeightedGraph::new(
            (0..5).collect(),
            vec![
                Link::new(0, 1, 7),
                Link::new(0, 3, 5),
                Link::new(1, 2, 8),
                Link::new(1, 3, 9),
                Link::new(1, 4, 7),
                Link::new(2, 4, 5),
                Link::new(3, 4, 15),
            ],
        )
        .unwrap()
    }

    #[test]
    fn both_find_the_same_cost() {
        let graph = sample();
        let prim = spanning_tree(MstAlgorithm::Prim, &graph);
        let kruskal = spanning_tree(MstAlgorithm::Kruskal, &graph);
        assert_eq!(prim.last().total_cost, 5 + 7 + 7 + 5);
        assert_eq!(kruskal.last().total_cost, prim.last().total_cost);
        assert_eq!(prim.last().selected().count(), 4);
        assert_eq!(kruskal.last().selected().count(), 4);
    }

    #[test]
    fn prim_frames_come_in_pairs() {
        let trace = spanning_tree(MstAlgorithm::Prim, &sample());
        // Initial frame, then considering + selected for each of the four tree edges.
        assert_eq!(trace.len(), 1 + 2 * 4);
        assert_eq!(trace.steps()[1].edges[1].state, MstEdgeState::Considering);
        assert_eq!(trace.steps()[2].edges[1].state, MstEdgeState::Selected);
        assert_eq!(trace.steps()[2].total_cost, 5);
    }

    #[test]
    fn kruskal_rejects_cycle_edges() {
        let trace = spanning_tree(MstAlgorithm::Kruskal, &sample());
        let last = trace.last();
        assert_eq!(last.edges.iter().filter(|e| e.state == MstEdgeState::Rejected).count(), 3);
        // Every edge gets a considering frame and a verdict frame.
        assert_eq!(trace.len(), 1 + 2 * 7);
    }

    #[test]
    fn edge_order_is_preserved() {
        let graph = sample();
        let trace = spanning_tree(MstAlgorithm::Kruskal, &graph);
        let weights: Vec<u64> = trace.last().edges.iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![7, 5, 8, 9, 7, 5, 15]);
    }

    #[test]
    fn edgeless_graph_is_one_step() {
        let graph = WeightedGraph::new(vec![0], Vec::new()).unwrap();
        for algorithm in MstAlgorithm::ALL {
            let trace = spanning_tree(algorithm, &graph);
            assert_eq!(trace.len(), 1);
            assert_eq!(trace.last().total_cost, 0);
        }
    }

    #[test]
    fn disjoint_set_compresses() {
        let mut sets = DisjointSet::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(1, 2));
        assert!(!sets.union(0, 2));
        let root = sets.find(0);
        assert_eq!(sets.parent[0], root);
    }

    fn connected_graph() -> impl Strategy<Value = WeightedGraph> {
        (2usize..9).prop_flat_map(|n| {
            (
                prop::collection::vec(1u64..30, n - 1),
                prop::collection::vec((0..n, 0..n, 1u64..30), 0..12),
            )
                .prop_map(move |(chain, extra)| {
                    let mut links: Vec<Link> =
                        chain.iter().enumerate().map(|(i, &w)| Link::new(i, i + 1, w)).collect();
                    links.extend(extra.into_iter().filter(|(a, b, _)| a != b).map(|(a, b, w)| Link::new(a, b, w)));
                    WeightedGraph::new((0..n).collect(), links).unwrap()
                })
        })
    }

    proptest! {
        #[test]
        fn prop_prim_and_kruskal_agree(graph in connected_graph()) {
            let prim = spanning_tree(MstAlgorithm::Prim, &graph);
            let kruskal = spanning_tree(MstAlgorithm::Kruskal, &graph);
            prop_assert_eq!(prim.last().total_cost, kruskal.last().total_cost);
            prop_assert_eq!(prim.last().selected().count(), graph.node_count() - 1);
            prop_assert_eq!(kruskal.last().selected().count(), graph.node_count() - 1);
        }
    }
}
