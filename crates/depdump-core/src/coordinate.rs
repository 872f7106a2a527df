use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Packaging type assumed when a coordinate does not name one.
pub const DEFAULT_TYPE: &str = "jar";

/// Maven coordinates identifying a dependency.
///
/// Equality, ordering and hashing read the type through
/// [`Coordinate::type_or_default`], so an absent type equals `jar`.
#[derive(Debug, Clone)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub type_: Option<String>,
    pub classifier: Option<String>,
}

impl Coordinate {
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            type_: None,
            classifier: None,
        }
    }

    pub fn with_type(mut self, type_: &str) -> Self {
        self.type_ = Some(type_.to_string());
        self
    }

    /// Packaging type, defaulting to `jar`.
    pub fn type_or_default(&self) -> &str {
        self.type_.as_deref().unwrap_or(DEFAULT_TYPE)
    }

    /// `group:artifact:version`, the key of declared dependencies.
    pub fn key3(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }

    /// `group:artifact:type:version`, the key of resolved graph nodes.
    pub fn key4(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.group_id,
            self.artifact_id,
            self.type_or_default(),
            self.version
        )
    }
}

impl Coordinate {
    fn identity(&self) -> (&str, &str, &str, &str, Option<&str>) {
        (
            &self.group_id,
            &self.artifact_id,
            &self.version,
            self.type_or_default(),
            self.classifier.as_deref(),
        )
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A module belonging to the project being inventoried.
///
/// Used to suppress self-references, where a sibling module shows up as a
/// declared dependency of another module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ProjectArtifact {
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
        }
    }
}

impl From<&Coordinate> for ProjectArtifact {
    fn from(c: &Coordinate) -> Self {
        Self::new(&c.group_id, &c.artifact_id, &c.version)
    }
}
