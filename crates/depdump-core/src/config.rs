//! Immutable run configuration shared by the collector and the reporter.

/// When an excluded direct dependency is dropped during module walking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExclusionOrder {
    /// Excluded dependencies never reach the direct dependency table.
    #[default]
    SkipBeforeRecord,
    /// Excluded dependencies are recorded in the table but not resolved.
    RecordBeforeCheck,
}

/// Filtering and rendering options for one dump.
#[derive(Debug, Clone, Default)]
pub struct DumpConfig {
    scopes: Option<Vec<String>>,
    exclude_groups: Vec<String>,
    include_license: bool,
    print_tree: bool,
    exclusion_order: ExclusionOrder,
}

impl DumpConfig {
    pub fn builder() -> DumpConfigBuilder {
        DumpConfigBuilder::default()
    }

    /// Scope allow-list; `None` admits every scope.
    pub fn scopes(&self) -> Option<&[String]> {
        self.scopes.as_deref()
    }

    /// Group tokens; any group containing one of them is excluded.
    pub fn exclude_groups(&self) -> &[String] {
        &self.exclude_groups
    }

    pub fn include_license(&self) -> bool {
        self.include_license
    }

    pub fn print_tree(&self) -> bool {
        self.print_tree
    }

    pub fn exclusion_order(&self) -> ExclusionOrder {
        self.exclusion_order
    }
}

/// Builder for [`DumpConfig`].
#[derive(Debug, Default)]
pub struct DumpConfigBuilder {
    config: DumpConfig,
}

impl DumpConfigBuilder {
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Blank tokens are dropped, since they would match every group.
    pub fn exclude_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.exclude_groups = groups
            .into_iter()
            .map(Into::into)
            .filter(|token: &String| !token.trim().is_empty())
            .collect();
        self
    }

    pub fn include_license(mut self, include: bool) -> Self {
        self.config.include_license = include;
        self
    }

    pub fn print_tree(mut self, tree: bool) -> Self {
        self.config.print_tree = tree;
        self
    }

    pub fn exclusion_order(mut self, order: ExclusionOrder) -> Self {
        self.config.exclusion_order = order;
        self
    }

    pub fn build(self) -> DumpConfig {
        self.config
    }
}
