#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use depdump_core::coordinate::Coordinate;
use depdump_core::dependency::DeclaredDependency;
use depdump_core::model::{License, ProjectModel};
use depdump_core::node::ResolvedNode;
use depdump_maven::license::LicenseLookup;
use depdump_maven::model::ModelLoader;
use depdump_resolver::{ArtifactResolver, ResolutionFailure};
use depdump_util::errors::DumpError;

/// Models keyed by the path the collector asks for.
#[derive(Default)]
pub struct FakeLoader {
    models: HashMap<PathBuf, ProjectModel>,
    pub loads: RefCell<Vec<PathBuf>>,
}

impl FakeLoader {
    pub fn with(self, path: &str, model: ProjectModel) -> Self {
        self.with_path(PathBuf::from(path), model)
    }

    pub fn with_path(mut self, path: PathBuf, model: ProjectModel) -> Self {
        self.models.insert(path, model);
        self
    }
}

impl ModelLoader for FakeLoader {
    fn load(&self, path: &Path) -> miette::Result<ProjectModel> {
        self.loads.borrow_mut().push(path.to_path_buf());
        self.models.get(path).cloned().ok_or_else(|| {
            DumpError::Manifest {
                message: format!("POM file does not exist: {}", path.display()),
            }
            .into()
        })
    }
}

pub enum Outcome {
    Resolved(ResolvedNode),
    Failed(Option<ResolvedNode>),
}

/// Returns canned trees keyed by `group:artifact:version`; unknown
/// dependencies resolve to a bare root.
#[derive(Default)]
pub struct FakeResolver {
    outcomes: HashMap<String, Outcome>,
    pub calls: RefCell<Vec<String>>,
    pub scopes_seen: RefCell<Vec<Option<Vec<String>>>>,
}

impl FakeResolver {
    pub fn with(mut self, key: &str, tree: ResolvedNode) -> Self {
        self.outcomes.insert(key.to_string(), Outcome::Resolved(tree));
        self
    }

    pub fn failing(mut self, key: &str, partial: Option<ResolvedNode>) -> Self {
        self.outcomes.insert(key.to_string(), Outcome::Failed(partial));
        self
    }
}

impl ArtifactResolver for FakeResolver {
    fn resolve(
        &self,
        dependency: &DeclaredDependency,
        scopes: Option<&[String]>,
    ) -> Result<ResolvedNode, ResolutionFailure> {
        let key = dependency.key();
        self.calls.borrow_mut().push(key.clone());
        self.scopes_seen.borrow_mut().push(scopes.map(<[String]>::to_vec));
        match self.outcomes.get(&key) {
            Some(Outcome::Resolved(tree)) => Ok(tree.clone()),
            Some(Outcome::Failed(partial)) => Err(ResolutionFailure {
                coordinate: key,
                message: "could not find POM".to_string(),
                partial: partial.clone(),
            }),
            None => Ok(ResolvedNode::new(
                dependency.coordinate.clone(),
                dependency.scope.as_deref().unwrap_or("compile"),
            )),
        }
    }
}

/// Licenses keyed by `group:artifact:version`; unknown coordinates fail.
#[derive(Default)]
pub struct FakeLicenses {
    licenses: HashMap<String, Vec<License>>,
}

impl FakeLicenses {
    pub fn with(mut self, key: &str, name: &str, url: &str) -> Self {
        self.licenses.entry(key.to_string()).or_default().push(License {
            name: Some(name.to_string()),
            url: Some(url.to_string()),
        });
        self
    }
}

impl LicenseLookup for FakeLicenses {
    fn licenses_of(&self, group: &str, artifact: &str, version: &str) -> miette::Result<Vec<License>> {
        let key = format!("{group}:{artifact}:{version}");
        self.licenses.get(&key).cloned().ok_or_else(|| {
            DumpError::Network {
                message: format!("no metadata for {key}"),
            }
            .into()
        })
    }
}

pub fn module(group: &str, artifact: &str, packaging: &str) -> ProjectModel {
    ProjectModel {
        group_id: group.to_string(),
        artifact_id: artifact.to_string(),
        version: "1.0".to_string(),
        packaging: packaging.to_string(),
        ..ProjectModel::default()
    }
}

pub fn declared(group: &str, artifact: &str, version: &str) -> DeclaredDependency {
    DeclaredDependency::new(Coordinate::new(group, artifact, version))
}

pub fn node(group: &str, artifact: &str, version: &str, scope: &str) -> ResolvedNode {
    ResolvedNode::new(Coordinate::new(group, artifact, version), scope)
}
