//! Undirected weighted graph shared by the shortest-path and spanning-tree
//! tracers.

use std::collections::HashMap;

use algoscope_core::{Error, Result};

/// An undirected edge between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub weight: u64,
}

impl Link {
    pub const fn new(from: usize, to: usize, weight: u64) -> Self {
        Self { from, to, weight }
    }
}

/// Nodes identified by arbitrary ids, in the order they were given.
///
/// Shortest-path searches run from the first node to the last one. When
/// nodes carry plane positions, A* uses the straight-line distance between
/// them as its heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGraph {
    ids: Vec<usize>,
    index: HashMap<usize, usize>,
    links: Vec<Link>,
    positions: Option<Vec<(f64, f64)>>,
}

impl WeightedGraph {
    /// Validate and build a graph.
    ///
    /// Rejects an empty node list, duplicate ids, self loops and edges that
    /// name an unknown node.
    pub fn new(ids: Vec<usize>, links: Vec<Link>) -> Result<Self> {
        if ids.is_empty() {
            return Err(Error::InvalidInput("graph has no nodes".into()));
        }
        let mut index = HashMap::with_capacity(ids.len());
        for (i, &id) in ids.iter().enumerate() {
            if index.insert(id, i).is_some() {
                return Err(Error::InvalidInput(format!("duplicate node {id}")));
            }
        }
        for link in &links {
            for end in [link.from, link.to] {
                if !index.contains_key(&end) {
                    return Err(Error::InvalidInput(format!(
                        "edge {}-{} references unknown node {end}",
                        link.from, link.to
                    )));
                }
            }
            if link.from == link.to {
                return Err(Error::InvalidInput(format!("self loop on node {}", link.from)));
            }
        }
        Ok(Self { ids, index, links, positions: None })
    }

    /// Attach a plane position to every node, in node order.
    pub fn with_positions(mut self, positions: Vec<(f64, f64)>) -> Result<Self> {
        if positions.len() != self.ids.len() {
            return Err(Error::InvalidInput(format!(
                "{} positions for {} nodes",
                positions.len(),
                self.ids.len()
            )));
        }
        self.positions = Some(positions);
        Ok(self)
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn position(&self, node: usize) -> Option<(f64, f64)> {
        self.positions.as_ref().map(|p| p[node])
    }

    /// Dense index of a node id.
    pub fn index_of(&self, id: usize) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Dense indices of both ends of edge `edge`.
    pub(crate) fn ends(&self, edge: usize) -> (usize, usize) {
        let link = self.links[edge];
        (self.index[&link.from], self.index[&link.to])
    }

    /// Straight-line distance between two nodes, or zero without positions.
    pub(crate) fn straight_line(&self, a: usize, b: usize) -> f64 {
        match (self.position(a), self.position(b)) {
            (Some((ax, ay)), Some((bx, by))) => (ax - bx).hypot(ay - by),
            _ => 0.0,
        }
    }

    /// Whether every node is reachable from the first one.
    pub fn is_connected(&self) -> bool {
        let n = self.node_count();
        let mut seen = vec![false; n];
        let mut stack = vec![0];
        seen[0] = true;
        while let Some(node) = stack.pop() {
            for edge in 0..self.links.len() {
                let (a, b) = self.ends(edge);
                let other = if node == a {
                    b
                } else if node == b {
                    a
                } else {
                    continue;
                };
                if !seen[other] {
                    seen[other] = true;
                    stack.push(other);
                }
            }
        }
        seen.into_iter().all(|s| s)
    }
}
