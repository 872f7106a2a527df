use crate::coordinate::{Coordinate, ProjectArtifact};
use crate::dependency::DeclaredDependency;

/// Packaging of modules that only aggregate other modules.
pub const AGGREGATOR_PACKAGING: &str = "pom";

/// A license declared in project metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// The effective model of one module: inheritance, interpolation and
/// dependency management already applied.
#[derive(Debug, Clone, Default)]
pub struct ProjectModel {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
    /// Sub-module paths relative to the module directory.
    pub modules: Vec<String>,
    pub dependencies: Vec<DeclaredDependency>,
    /// `None` when the module (and its parents) have no management section.
    pub dependency_management: Option<Vec<DeclaredDependency>>,
    pub licenses: Vec<License>,
}

impl ProjectModel {
    pub fn is_aggregator(&self) -> bool {
        self.packaging == AGGREGATOR_PACKAGING
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(&self.group_id, &self.artifact_id, &self.version)
    }

    pub fn project_artifact(&self) -> ProjectArtifact {
        ProjectArtifact::new(&self.group_id, &self.artifact_id, &self.version)
    }

    /// The management entry overriding `dependency`, matched by group and artifact.
    pub fn managed(&self, dependency: &DeclaredDependency) -> Option<&DeclaredDependency> {
        self.dependency_management.as_ref()?.iter().find(|m| {
            m.group_id() == dependency.group_id() && m.artifact_id() == dependency.artifact_id()
        })
    }
}
