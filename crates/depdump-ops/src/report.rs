//! Flat and tree renderings of a [`Collection`].

use std::io::{self, Write};

use depdump_core::config::DumpConfig;
use depdump_core::node::ResolvedNode;
use depdump_maven::license::LicenseLookup;
use depdump_util::errors::DumpError;

use crate::collector::Collection;
use crate::filter::ExclusionFilter;
use crate::merge;

const DEFAULT_SCOPE: &str = "compile";
const ARTIFACT_SEPARATOR: &str = "--------------------------------";

/// Number of entries printed in each section of a flat report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportCounts {
    pub direct: usize,
    pub transitive: usize,
}

/// Renders a collection according to the run configuration.
pub struct Reporter<'a> {
    config: &'a DumpConfig,
    filter: ExclusionFilter<'a>,
    licenses: &'a dyn LicenseLookup,
}

impl<'a> Reporter<'a> {
    pub fn new(config: &'a DumpConfig, licenses: &'a dyn LicenseLookup) -> Self {
        Self {
            config,
            filter: ExclusionFilter::new(config),
            licenses,
        }
    }

    /// Write the tree report when tree mode is on, the flat report otherwise.
    pub fn write<W: Write>(&self, out: &mut W, collection: &Collection) -> miette::Result<ReportCounts> {
        let result = if self.config.print_tree() {
            self.write_tree(out, collection.roots())
                .map(|()| ReportCounts::default())
        } else {
            self.write_flat(out, collection)
        };
        result.map_err(|e| DumpError::Io(e).into())
    }

    /// Direct dependencies (minus the project's own modules), then the
    /// merged transitive set minus excluded nodes and anything listed as
    /// direct.
    fn write_flat<W: Write>(&self, out: &mut W, collection: &Collection) -> io::Result<ReportCounts> {
        let mut counts = ReportCounts::default();

        writeln!(out, " === Direct dependencies: ===")?;
        for dependency in collection
            .direct()
            .values()
            .filter(|d| !collection.is_project_artifact(d))
        {
            let coordinate = &dependency.coordinate;
            self.write_artifact(
                out,
                &coordinate.key4(),
                dependency.scope.as_deref().unwrap_or(DEFAULT_SCOPE),
            )?;
            self.write_licenses(out, &coordinate.group_id, &coordinate.artifact_id, &coordinate.version)?;
            counts.direct += 1;
        }
        writeln!(out, " Count: {}", counts.direct)?;
        writeln!(out, " ============================")?;
        writeln!(out)?;

        let merged = merge::flatten(collection.roots(), collection.direct());
        writeln!(out, " === Transitive dependencies: ===")?;
        for node in merged.values().filter(|n| {
            !self.filter.excludes_node(n) && !collection.direct().contains_key(&n.coordinate.key3())
        }) {
            let coordinate = &node.coordinate;
            self.write_artifact(out, &node.key(), &node.scope)?;
            self.write_licenses(out, &coordinate.group_id, &coordinate.artifact_id, &coordinate.version)?;
            counts.transitive += 1;
        }
        writeln!(out, " Count: {}", counts.transitive)?;
        writeln!(out, " ================================")?;

        Ok(counts)
    }

    fn write_artifact<W: Write>(&self, out: &mut W, key: &str, scope: &str) -> io::Result<()> {
        if self.config.include_license() {
            writeln!(out, "{ARTIFACT_SEPARATOR}")?;
        }
        writeln!(out, "Artifact: {key}:{scope}")
    }

    /// License lines for a coordinate; lookup failures print nothing.
    fn write_licenses<W: Write>(
        &self,
        out: &mut W,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> io::Result<()> {
        if !self.config.include_license() {
            return Ok(());
        }
        let Ok(licenses) = self.licenses.licenses_of(group, artifact, version) else {
            return Ok(());
        };
        for license in licenses {
            writeln!(
                out,
                "  - License: [{}] URL: [{}]",
                license.name.unwrap_or_default(),
                license.url.unwrap_or_default()
            )?;
        }
        Ok(())
    }

    /// Every resolved tree as returned by the resolver: no merging and no
    /// filtering.
    fn write_tree<W: Write>(&self, out: &mut W, roots: &[ResolvedNode]) -> io::Result<()> {
        for root in roots {
            write_node(out, root, 0)?;
        }
        Ok(())
    }
}

fn write_node<W: Write>(out: &mut W, node: &ResolvedNode, depth: usize) -> io::Result<()> {
    let prefix = if depth == 0 {
        "+".to_string()
    } else {
        "  ".repeat(depth)
    };
    writeln!(
        out,
        "{prefix}{} (Scope: {}, Optional: {})",
        node.coordinate, node.scope, node.optional
    )?;
    for child in &node.children {
        write_node(out, child, depth + 1)?;
    }
    Ok(())
}
