//! Remote Maven repository abstraction: URL layout and credentials.

use depdump_core::settings::RemoteEntry;

/// Maven Central base URL.
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

/// A configured remote Maven repository with optional credentials.
#[derive(Debug, Clone)]
pub struct MavenRepository {
    pub name: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl MavenRepository {
    /// Build a `MavenRepository` from a configured remote entry.
    pub fn from_entry(entry: &RemoteEntry) -> Self {
        Self {
            name: entry.name.clone(),
            url: entry.url.trim_end_matches('/').to_string(),
            username: entry.username.clone(),
            password: entry.password.clone(),
        }
    }

    /// Construct the default Maven Central repository.
    pub fn maven_central() -> Self {
        Self {
            name: "central".to_string(),
            url: MAVEN_CENTRAL_URL.to_string(),
            username: None,
            password: None,
        }
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `org.apache.commons:commons-lang3:3.14.0` becomes
    /// `org/apache/commons/commons-lang3/3.14.0`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// File name of the POM for a coordinate.
    pub fn pom_file_name(artifact: &str, version: &str) -> String {
        format!("{artifact}-{version}.pom")
    }

    /// Full URL to a specific file within the repository.
    pub fn file_url(&self, group: &str, artifact: &str, version: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url,
            Self::coordinate_path(group, artifact, version),
            filename
        )
    }

    /// URL to the POM file for a given coordinate.
    pub fn pom_url(&self, group: &str, artifact: &str, version: &str) -> String {
        self.file_url(group, artifact, version, &Self::pom_file_name(artifact, version))
    }

    /// Whether this repository has authentication configured.
    pub fn has_auth(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}

/// Configured remotes in order, with Maven Central appended when missing.
pub fn build_repos(entries: &[RemoteEntry]) -> Vec<MavenRepository> {
    let mut repos: Vec<MavenRepository> = entries.iter().map(MavenRepository::from_entry).collect();
    if !repos
        .iter()
        .any(|r| r.url.contains("repo.maven.apache.org") || r.url.contains("repo1.maven.org"))
    {
        repos.push(MavenRepository::maven_central());
    }
    repos
}
