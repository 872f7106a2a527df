//! Merges independently resolved dependency trees into one map.

use std::collections::BTreeMap;

use depdump_core::dependency::{DeclaredDependency, Exclusion};
use depdump_core::node::ResolvedNode;

/// Flatten `roots` into a map keyed by `group:artifact:type:version`.
///
/// Trees are walked depth-first in order, sharing one map, so the first
/// tree to reach a coordinate owns it and it is never expanded twice.
/// Optional nodes are not descended into. The exclusions of a direct
/// dependency (looked up in `direct` by `group:artifact:version`) apply to
/// everything reached through it.
pub fn flatten<'a>(
    roots: &'a [ResolvedNode],
    direct: &'a BTreeMap<String, DeclaredDependency>,
) -> BTreeMap<String, &'a ResolvedNode> {
    let mut merged = BTreeMap::new();
    for root in roots {
        merge_node(&mut merged, root, direct, &[]);
    }
    merged
}

fn merge_node<'a>(
    merged: &mut BTreeMap<String, &'a ResolvedNode>,
    node: &'a ResolvedNode,
    direct: &'a BTreeMap<String, DeclaredDependency>,
    inherited: &[&'a Exclusion],
) {
    if node.optional {
        return;
    }
    merged.insert(node.key(), node);

    let mut exclusions = inherited.to_vec();
    if let Some(declared) = direct.get(&node.coordinate.key3()) {
        exclusions.extend(declared.exclusions.iter());
    }

    for child in &node.children {
        let key = child.key();
        if merged.contains_key(&key) {
            continue;
        }
        if exclusions
            .iter()
            .any(|e| e.matches(child.group_id(), child.artifact_id()))
        {
            tracing::debug!("{key} excluded below {node}");
            continue;
        }
        merged.insert(key, child);
        merge_node(merged, child, direct, &exclusions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depdump_core::coordinate::Coordinate;

    fn node(artifact: &str) -> ResolvedNode {
        ResolvedNode::new(Coordinate::new("g", artifact, "1"), "compile")
    }

    #[test]
    fn optional_child_is_recorded_but_not_expanded() {
        let roots = vec![node("a").with_child(node("opt").optional(true).with_child(node("hidden")))];
        let direct = BTreeMap::new();
        let merged = flatten(&roots, &direct);
        assert!(merged.contains_key("g:opt:jar:1"));
        assert!(!merged.contains_key("g:hidden:jar:1"));
    }

    #[test]
    fn optional_root_is_dropped() {
        let roots = vec![node("a").optional(true).with_child(node("b"))];
        let direct = BTreeMap::new();
        assert!(flatten(&roots, &direct).is_empty());
    }

    #[test]
    fn type_is_part_of_the_key() {
        let mut pom = node("bom");
        pom.coordinate.type_ = Some("pom".to_string());
        let roots = vec![node("a").with_child(pom)];
        let direct = BTreeMap::new();
        let merged = flatten(&roots, &direct);
        assert!(merged.contains_key("g:bom:pom:1"));
    }
}
