//! Per-dependency transitive resolution: nearest-wins BFS, scope
//! propagation, exclusions and optional dependency handling.

use std::collections::{HashSet, VecDeque};

use miette::Diagnostic;
use petgraph::graph::NodeIndex;
use thiserror::Error;

use depdump_core::dependency::{DeclaredDependency, Exclusion};
use depdump_core::node::ResolvedNode;
use depdump_maven::model::PomModelLoader;
use depdump_util::progress;

use crate::graph::{GraphEntry, ResolutionGraph};

/// Scopes resolved when the caller does not restrict them.
pub const DEFAULT_SCOPES: [&str; 5] = ["compile", "provided", "system", "runtime", "test"];

const DEFAULT_SCOPE: &str = "compile";

/// Resolution of one dependency failed, possibly after part of its graph
/// was already built.
#[derive(Debug, Error, Diagnostic)]
#[error("Failed to resolve {coordinate}: {message}")]
pub struct ResolutionFailure {
    pub coordinate: String,
    pub message: String,
    /// Everything resolved before the failure, rooted at the dependency.
    pub partial: Option<ResolvedNode>,
}

/// Resolves a declared dependency into its transitive dependency tree.
pub trait ArtifactResolver {
    /// `scopes` restricts which propagated scopes are kept; `None` keeps
    /// every standard Maven scope.
    fn resolve(
        &self,
        dependency: &DeclaredDependency,
        scopes: Option<&[String]>,
    ) -> Result<ResolvedNode, ResolutionFailure>;
}

/// Entry in the BFS queue.
struct QueueEntry {
    node: NodeIndex,
    depth: usize,
    exclusions: Vec<Exclusion>,
}

/// [`ArtifactResolver`] reading POMs through a [`PomModelLoader`], so parsed
/// effective POMs are shared across every dependency of a run.
#[derive(Debug, Clone, Copy)]
pub struct MavenResolver<'a> {
    loader: &'a PomModelLoader,
}

impl<'a> MavenResolver<'a> {
    pub fn new(loader: &'a PomModelLoader) -> Self {
        Self { loader }
    }
}

impl ArtifactResolver for MavenResolver<'_> {
    fn resolve(
        &self,
        dependency: &DeclaredDependency,
        scopes: Option<&[String]>,
    ) -> Result<ResolvedNode, ResolutionFailure> {
        let root_coordinate = dependency.coordinate.clone();
        let root_label = root_coordinate.to_string();
        let root_scope = dependency.scope.as_deref().unwrap_or(DEFAULT_SCOPE);

        if root_coordinate.version.is_empty() {
            return Err(ResolutionFailure {
                coordinate: root_label,
                message: "no version declared or managed".to_string(),
                partial: None,
            });
        }
        progress::status("Resolving", &root_label);

        let mut graph = ResolutionGraph::new(GraphEntry {
            coordinate: root_coordinate,
            scope: root_scope.to_string(),
            optional: dependency.optional,
        });
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(ga_key(dependency.group_id(), dependency.artifact_id()));

        let mut failures: Vec<String> = Vec::new();
        let mut queue: VecDeque<QueueEntry> = VecDeque::new();
        queue.push_back(QueueEntry {
            node: graph.root(),
            depth: 0,
            exclusions: dependency.exclusions.clone(),
        });

        while let Some(entry) = queue.pop_front() {
            let current = graph.entry(entry.node).clone();
            let coordinate = &current.coordinate;
            let pom = match self.loader.effective_remote(
                &coordinate.group_id,
                &coordinate.artifact_id,
                &coordinate.version,
            ) {
                Ok(Some(pom)) => pom,
                Ok(None) => {
                    failures.push(format!("could not find POM for {coordinate}"));
                    continue;
                }
                Err(e) => {
                    failures.push(format!("{coordinate}: {e}"));
                    continue;
                }
            };

            for child in &pom.dependencies {
                let declared = child.to_declared();
                let dep_scope = declared
                    .scope
                    .clone()
                    .or_else(|| pom.managed(&child.group_id, &child.artifact_id)?.scope.clone())
                    .unwrap_or_else(|| DEFAULT_SCOPE.to_string());

                if matches!(dep_scope.as_str(), "test" | "provided" | "system") {
                    continue;
                }
                if declared.optional && entry.depth > 0 {
                    continue;
                }
                if entry
                    .exclusions
                    .iter()
                    .any(|e| e.matches(declared.group_id(), declared.artifact_id()))
                {
                    tracing::debug!("{} excluded below {coordinate}", declared.key());
                    continue;
                }
                if declared.coordinate.version.is_empty() {
                    tracing::warn!(
                        "Skipping {}:{} of {coordinate}: no version",
                        declared.group_id(),
                        declared.artifact_id()
                    );
                    continue;
                }

                let scope = propagate_scope(&current.scope, &dep_scope);
                if !scope_allowed(&scope, scopes) {
                    continue;
                }
                // Nearest wins: BFS reaches the shallowest request first.
                if !seen.insert(ga_key(declared.group_id(), declared.artifact_id())) {
                    continue;
                }

                let mut exclusions = entry.exclusions.clone();
                exclusions.extend(declared.exclusions.iter().cloned());

                let node = graph.add_child(
                    entry.node,
                    GraphEntry {
                        coordinate: declared.coordinate,
                        scope,
                        optional: declared.optional,
                    },
                );
                queue.push_back(QueueEntry {
                    node,
                    depth: entry.depth + 1,
                    exclusions,
                });
            }
        }

        let tree = graph.to_tree();
        if failures.is_empty() {
            tracing::debug!("Resolved {root_label} with {} artifacts", tree.size());
            Ok(tree)
        } else {
            Err(ResolutionFailure {
                coordinate: root_label,
                message: failures.join("; "),
                partial: Some(tree),
            })
        }
    }
}

fn ga_key(group: &str, artifact: &str) -> String {
    format!("{group}:{artifact}")
}

fn scope_allowed(scope: &str, scopes: Option<&[String]>) -> bool {
    match scopes {
        Some(allowed) => allowed.iter().any(|s| s == scope),
        None => DEFAULT_SCOPES.contains(&scope),
    }
}

/// Maven scope of a transitive dependency given the scope it was reached
/// through.
fn propagate_scope(parent_scope: &str, dep_scope: &str) -> String {
    match (parent_scope, dep_scope) {
        ("test", _) | (_, "test") => "test",
        ("provided", _) | (_, "provided") => "provided",
        ("system", _) => "system",
        ("runtime", _) | (_, "runtime") => "runtime",
        _ => "compile",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_propagation() {
        assert_eq!(propagate_scope("compile", "compile"), "compile");
        assert_eq!(propagate_scope("compile", "runtime"), "runtime");
        assert_eq!(propagate_scope("runtime", "compile"), "runtime");
        assert_eq!(propagate_scope("test", "compile"), "test");
        assert_eq!(propagate_scope("provided", "runtime"), "provided");
    }

    #[test]
    fn scope_filter_defaults_to_standard_scopes() {
        assert!(scope_allowed("runtime", None));
        assert!(!scope_allowed("import", None));
        let only_compile = ["compile".to_string()];
        assert!(scope_allowed("compile", Some(&only_compile)));
        assert!(!scope_allowed("runtime", Some(&only_compile)));
    }
}
