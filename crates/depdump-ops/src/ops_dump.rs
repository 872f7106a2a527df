//! Operation: dump the dependencies of a project.

use std::io::{self, Write};
use std::path::Path;

use depdump_core::config::DumpConfig;
use depdump_core::settings::RepositorySettings;
use depdump_maven::license::{LicenseLookup, PomLicenseLookup};
use depdump_maven::model::{ModelLoader, PomModelLoader};
use depdump_maven::system::RepositorySystem;
use depdump_resolver::{ArtifactResolver, MavenResolver};
use depdump_util::errors::DumpError;

use crate::collector::DependencyCollector;
use crate::report::{ReportCounts, Reporter};

/// Walks a project and reports on it with the given collaborators.
pub struct Runner<'a> {
    config: &'a DumpConfig,
    loader: &'a dyn ModelLoader,
    resolver: &'a dyn ArtifactResolver,
    licenses: &'a dyn LicenseLookup,
}

impl<'a> Runner<'a> {
    pub fn new(
        config: &'a DumpConfig,
        loader: &'a dyn ModelLoader,
        resolver: &'a dyn ArtifactResolver,
        licenses: &'a dyn LicenseLookup,
    ) -> Self {
        Self {
            config,
            loader,
            resolver,
            licenses,
        }
    }

    /// Collect the project at `project` and write the report to `out`.
    pub fn run<W: Write>(&self, project: &Path, out: &mut W) -> miette::Result<ReportCounts> {
        let mut collector = DependencyCollector::new(self.config, self.loader, self.resolver);
        collector.parse_pom(project)?;
        let collection = collector.into_collection();
        tracing::info!(
            "Collected {} direct dependencies and {} resolved trees",
            collection.direct().len(),
            collection.roots().len()
        );
        Reporter::new(self.config, self.licenses).write(out, &collection)
    }
}

/// Dump the dependencies of `project` to stdout, resolving against the
/// repositories in `settings`.
pub fn dump(project: &Path, settings: &RepositorySettings, config: &DumpConfig) -> miette::Result<()> {
    if !config.exclude_groups().is_empty() {
        tracing::info!(
            "Excluding [{}] groups and its dependencies.",
            config.exclude_groups().join(", ")
        );
    }
    if let Some(scopes) = config.scopes() {
        tracing::info!("Including [{}] scopes.", scopes.join(", "));
    }

    let loader = PomModelLoader::new(RepositorySystem::new(settings)?);
    let resolver = MavenResolver::new(&loader);
    let licenses = PomLicenseLookup::new(&loader);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let counts = Runner::new(config, &loader, &resolver, &licenses).run(project, &mut out)?;
    out.flush().map_err(DumpError::Io)?;

    if !config.print_tree() {
        tracing::info!(
            "Listed {} direct and {} transitive dependencies",
            counts.direct,
            counts.transitive
        );
    }
    Ok(())
}
