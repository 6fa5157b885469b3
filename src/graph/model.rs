use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
}

/// Undirected for layout; both ends name ids from the same snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// One successful parse. Links refer to nodes by id only; the simulation
/// resolves them into indices when it is seeded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphSnapshot {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn isolated_count(&self) -> usize {
        let linked = self
            .links
            .iter()
            .flat_map(|link| [link.source.as_str(), link.target.as_str()])
            .collect::<HashSet<_>>();
        self.nodes
            .iter()
            .filter(|node| !linked.contains(node.id.as_str()))
            .count()
    }
}
