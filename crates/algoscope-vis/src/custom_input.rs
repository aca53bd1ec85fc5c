//! User supplied arrays and graphs.

use algoscope_core::{Error, Result};
use algoscope_engine::{Link, WeightedGraph};
use serde::{Deserialize, Serialize};

/// Parse integers separated by commas, whitespace or both.
///
/// ```
/// # use algoscope_vis::parse_array;
/// assert_eq!(parse_array("5, 3 -1,,8").unwrap(), vec![5, 3, -1, 8]);
/// ```
pub fn parse_array(text: &str) -> Result<Vec<i64>> {
    let values = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| Error::InvalidInput(format!("{token:?} is not an integer")))
        })
        .collect::<Result<Vec<_>>>()?;

    if values.is_empty() {
        return Err(Error::InvalidInput("enter at least one number".into()));
    }
    Ok(values)
}

/// Graph as typed into the custom input dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInput {
    pub nodes: Vec<usize>,
    /// `[from, to, weight]` triples.
    pub edges: Vec<(usize, usize, u64)>,
}

impl TryFrom<GraphInput> for WeightedGraph {
    type Error = Error;

    fn try_from(input: GraphInput) -> Result<Self> {
        let links = input.edges.into_iter().map(|(from, to, weight)| Link::new(from, to, weight)).collect();
        WeightedGraph::new(input.nodes, links)
    }
}

/// Parse `{"nodes": [...], "edges": [[from, to, weight], ...]}`.
///
/// Both keys are required. Edges must join two listed nodes.
pub fn parse_graph(json: &str) -> Result<WeightedGraph> {
    let input: GraphInput = serde_json::from_str(json)?;
    input.try_into()
}
