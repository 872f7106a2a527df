//! Working graph used while a single dependency is being resolved.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use depdump_core::coordinate::Coordinate;
use depdump_core::node::ResolvedNode;

/// An artifact placed in the graph, without its children.
#[derive(Debug, Clone)]
pub struct GraphEntry {
    pub coordinate: Coordinate,
    pub scope: String,
    pub optional: bool,
}

/// A rooted dependency tree under construction.
///
/// Children keep insertion order, which is the order dependencies were
/// declared in their parent's POM.
#[derive(Debug)]
pub struct ResolutionGraph {
    graph: DiGraph<GraphEntry, usize>,
    root: NodeIndex,
}

impl ResolutionGraph {
    pub fn new(root: GraphEntry) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(root);
        Self { graph, root }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn entry(&self, idx: NodeIndex) -> &GraphEntry {
        &self.graph[idx]
    }

    /// Attach `child` under `parent` and return its index.
    pub fn add_child(&mut self, parent: NodeIndex, child: GraphEntry) -> NodeIndex {
        let position = self.graph.edges_directed(parent, Direction::Outgoing).count();
        let idx = self.graph.add_node(child);
        self.graph.add_edge(parent, idx, position);
        idx
    }

    /// Convert into a nested tree rooted at the resolved dependency.
    pub fn to_tree(&self) -> ResolvedNode {
        self.subtree(self.root)
    }

    fn subtree(&self, idx: NodeIndex) -> ResolvedNode {
        let entry = &self.graph[idx];
        let mut children: Vec<(usize, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        children.sort_by_key(|(position, _)| *position);

        let mut node = ResolvedNode::new(entry.coordinate.clone(), &entry.scope).optional(entry.optional);
        node.children = children
            .into_iter()
            .map(|(_, child)| self.subtree(child))
            .collect();
        node
    }
}
