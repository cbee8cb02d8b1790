use std::collections::HashMap;

use serde::Serialize;

use crate::io::mtx::EdgeList;

/// Shape of an edge list as a graph loader would see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeListStats {
    pub dimension: usize,
    pub edges: usize,
    /// Lines whose two indices are equal. Loaders drop these.
    pub self_pairs: usize,
    /// Distinct nodes touched by at least one non-self edge.
    pub connected_nodes: usize,
    pub max_degree: usize,
}

impl EdgeListStats {
    pub fn from_edge_list(list: &EdgeList) -> Self {
        let mut degree: HashMap<usize, usize> = HashMap::new();
        let mut self_pairs = 0;
        for e in &list.edges {
            if e.is_self_pair() {
                self_pairs += 1;
                continue;
            }
            *degree.entry(e.row).or_default() += 1;
            *degree.entry(e.col).or_default() += 1;
        }

        Self {
            dimension: list.dimension,
            edges: list.edges.len(),
            self_pairs,
            connected_nodes: degree.len(),
            max_degree: degree.values().copied().max().unwrap_or(0),
        }
    }
}
