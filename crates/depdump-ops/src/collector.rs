//! Module tree walking: gathers direct dependencies across every module and
//! resolves each surviving one into its transitive tree.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use depdump_core::config::{DumpConfig, ExclusionOrder};
use depdump_core::coordinate::ProjectArtifact;
use depdump_core::dependency::DeclaredDependency;
use depdump_core::model::ProjectModel;
use depdump_core::node::ResolvedNode;
use depdump_maven::model::ModelLoader;
use depdump_resolver::ArtifactResolver;
use depdump_util::errors::DumpResult;
use depdump_util::{fs, progress};

use crate::filter::ExclusionFilter;

/// Everything gathered while walking a project.
#[derive(Debug, Default)]
pub struct Collection {
    /// Direct dependencies keyed by `group:artifact:version`; a later
    /// declaration of the same key replaces the earlier one.
    direct: BTreeMap<String, DeclaredDependency>,
    /// One resolved tree per resolved direct dependency, in walk order.
    roots: Vec<ResolvedNode>,
    project_artifacts: HashSet<ProjectArtifact>,
}

impl Collection {
    pub fn direct(&self) -> &BTreeMap<String, DeclaredDependency> {
        &self.direct
    }

    pub fn roots(&self) -> &[ResolvedNode] {
        &self.roots
    }

    pub fn project_artifacts(&self) -> &HashSet<ProjectArtifact> {
        &self.project_artifacts
    }

    /// Whether `dependency` names one of the project's own modules.
    pub fn is_project_artifact(&self, dependency: &DeclaredDependency) -> bool {
        self.project_artifacts
            .contains(&ProjectArtifact::from(&dependency.coordinate))
    }
}

/// Walks a module tree and fills a [`Collection`].
pub struct DependencyCollector<'a> {
    config: &'a DumpConfig,
    filter: ExclusionFilter<'a>,
    loader: &'a dyn ModelLoader,
    resolver: &'a dyn ArtifactResolver,
    visited: HashSet<PathBuf>,
    collection: Collection,
}

impl<'a> DependencyCollector<'a> {
    pub fn new(
        config: &'a DumpConfig,
        loader: &'a dyn ModelLoader,
        resolver: &'a dyn ArtifactResolver,
    ) -> Self {
        Self {
            config,
            filter: ExclusionFilter::new(config),
            loader,
            resolver,
            visited: HashSet::new(),
            collection: Collection::default(),
        }
    }

    /// Collect the module at `project` (a directory or its `pom.xml`) and,
    /// for aggregators, every sub-module before its own dependencies.
    ///
    /// A missing or unparsable manifest aborts the walk; whatever was
    /// collected up to that point stays in the collection. Resolution
    /// failures of single dependencies are logged and do not abort.
    pub fn parse_pom(&mut self, project: &Path) -> DumpResult<()> {
        let manifest = fs::manifest_path(project);
        if !self.visited.insert(fs::canonical_or_self(&manifest)) {
            tracing::warn!("Module {} already visited, skipping", manifest.display());
            return Ok(());
        }

        let model = self.loader.load(&manifest)?;
        tracing::info!("Collecting dependencies of {}", model.coordinate());
        self.collection
            .project_artifacts
            .insert(model.project_artifact());

        if model.is_aggregator() {
            let base = manifest.parent().unwrap_or_else(|| Path::new("."));
            for module in &model.modules {
                self.parse_pom(&base.join(module))?;
            }
        }

        self.collect_dependencies(&model);
        Ok(())
    }

    fn collect_dependencies(&mut self, model: &ProjectModel) {
        for declared in &model.dependencies {
            let managed = model.managed(declared);
            let excluded = self.filter.excludes_declared(declared, managed);
            let dependency = &with_managed_scope(declared, managed);

            match self.config.exclusion_order() {
                ExclusionOrder::SkipBeforeRecord => {
                    if excluded {
                        tracing::debug!("Excluding {}", dependency.key());
                        continue;
                    }
                    self.record(dependency);
                }
                ExclusionOrder::RecordBeforeCheck => {
                    self.record(dependency);
                    if excluded {
                        tracing::debug!("Not resolving excluded {}", dependency.key());
                        continue;
                    }
                }
            }

            self.resolve(dependency);
        }
    }

    fn record(&mut self, dependency: &DeclaredDependency) {
        self.collection
            .direct
            .insert(dependency.key(), dependency.clone());
    }

    fn resolve(&mut self, dependency: &DeclaredDependency) {
        match self.resolver.resolve(dependency, self.config.scopes()) {
            Ok(root) => self.collection.roots.push(root),
            Err(failure) => {
                tracing::error!("{failure}");
                if let Some(partial) = failure.partial {
                    progress::status_warn("Incomplete", &dependency.key());
                    self.collection.roots.push(partial);
                }
            }
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn into_collection(self) -> Collection {
        self.collection
    }
}

/// The declaration as recorded and resolved: a scope left out falls back to
/// the one from dependency management.
fn with_managed_scope(
    declared: &DeclaredDependency,
    managed: Option<&DeclaredDependency>,
) -> DeclaredDependency {
    let mut dependency = declared.clone();
    if dependency.scope.is_none() {
        dependency.scope = managed.and_then(|m| m.scope.clone());
    }
    dependency
}
