use std::fmt;

use crate::coordinate::Coordinate;

/// A node of a resolved dependency graph.
///
/// The root node is the declared dependency that was resolved; its children
/// are the dependencies it pulled in, in the order the resolver produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNode {
    pub coordinate: Coordinate,
    pub scope: String,
    pub optional: bool,
    pub children: Vec<ResolvedNode>,
}

impl ResolvedNode {
    pub fn new(coordinate: Coordinate, scope: &str) -> Self {
        Self {
            coordinate,
            scope: scope.to_string(),
            optional: false,
            children: Vec::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_child(mut self, child: ResolvedNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn group_id(&self) -> &str {
        &self.coordinate.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.coordinate.artifact_id
    }

    /// `group:artifact:type:version`, the merged-map key.
    pub fn key(&self) -> String {
        self.coordinate.key4()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(ResolvedNode::size).sum::<usize>()
    }
}

impl fmt::Display for ResolvedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coordinate)
    }
}
