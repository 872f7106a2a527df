use crate::coordinate::Coordinate;

/// A transitive dependency excluded from a declared dependency's subtree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Exclusion {
    pub group_id: String,
    pub artifact_id: String,
}

impl Exclusion {
    pub fn new(group_id: &str, artifact_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
        }
    }

    /// Exact match on group and artifact; `*` matches anything.
    pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
        (self.group_id == "*" || self.group_id == group_id)
            && (self.artifact_id == "*" || self.artifact_id == artifact_id)
    }
}

/// A dependency as declared in a module's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredDependency {
    pub coordinate: Coordinate,
    pub scope: Option<String>,
    pub optional: bool,
    pub exclusions: Vec<Exclusion>,
}

impl DeclaredDependency {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            scope: None,
            optional: false,
            exclusions: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_exclusion(mut self, group_id: &str, artifact_id: &str) -> Self {
        self.exclusions.push(Exclusion::new(group_id, artifact_id));
        self
    }

    pub fn group_id(&self) -> &str {
        &self.coordinate.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.coordinate.artifact_id
    }

    /// Key in the direct dependency table (`group:artifact:version`).
    pub fn key(&self) -> String {
        self.coordinate.key3()
    }
}
