//! Exclusion and scope policy shared by module walking and reporting.

use depdump_core::config::DumpConfig;
use depdump_core::dependency::DeclaredDependency;
use depdump_core::node::ResolvedNode;

/// Decides whether a dependency is left out of the dump.
///
/// Group exclusion is a substring test: the token `com.example` also
/// removes `com.example.core` and `com.examples`.
#[derive(Debug, Clone, Copy)]
pub struct ExclusionFilter<'a> {
    config: &'a DumpConfig,
}

impl<'a> ExclusionFilter<'a> {
    pub fn new(config: &'a DumpConfig) -> Self {
        Self { config }
    }

    /// Whether a declared dependency is excluded. `managed` supplies the
    /// optional flag and the scope when the declaration leaves them out.
    pub fn excludes_declared(
        &self,
        dependency: &DeclaredDependency,
        managed: Option<&DeclaredDependency>,
    ) -> bool {
        if dependency.optional || managed.is_some_and(|m| m.optional) {
            return true;
        }
        if self.excludes_group(dependency.group_id()) {
            return true;
        }
        let scope = dependency
            .scope
            .as_deref()
            .or_else(|| managed.and_then(|m| m.scope.as_deref()));
        !self.scope_allowed(scope)
    }

    /// Whether a resolved node is excluded, judged on its own resolved scope.
    pub fn excludes_node(&self, node: &ResolvedNode) -> bool {
        node.optional
            || self.excludes_group(node.group_id())
            || !self.scope_allowed(Some(&node.scope))
    }

    fn excludes_group(&self, group_id: &str) -> bool {
        self.config
            .exclude_groups()
            .iter()
            .any(|token| group_id.contains(token.as_str()))
    }

    /// Without an allow-list every scope passes; with one, an unknown scope
    /// never does.
    fn scope_allowed(&self, scope: Option<&str>) -> bool {
        match self.config.scopes() {
            None => true,
            Some(allowed) => scope.is_some_and(|s| allowed.iter().any(|a| a == s)),
        }
    }
}
