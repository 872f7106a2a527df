//! Local Maven repository (`~/.m2/repository` layout).

use std::fs;
use std::path::{Path, PathBuf};

use depdump_util::errors::DumpError;

use crate::repository::MavenRepository;

/// A local repository directory laid out like a remote Maven repository.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// The root directory of this repository.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every file of a given coordinate.
    pub fn artifact_dir(&self, group: &str, artifact: &str, version: &str) -> PathBuf {
        self.root
            .join(MavenRepository::coordinate_path(group, artifact, version))
    }

    /// Path where the POM of a coordinate lives (whether or not it exists).
    pub fn pom_path(&self, group: &str, artifact: &str, version: &str) -> PathBuf {
        self.artifact_dir(group, artifact, version)
            .join(MavenRepository::pom_file_name(artifact, version))
    }

    /// Read a stored POM, if present.
    pub fn get_pom(&self, group: &str, artifact: &str, version: &str) -> Option<String> {
        let path = self.pom_path(group, artifact, version);
        if !path.is_file() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}", path.display());
                None
            }
        }
    }

    /// Store a POM, creating directories as needed.
    pub fn put_pom(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        pom_xml: &str,
    ) -> miette::Result<PathBuf> {
        let dir = self.artifact_dir(group, artifact, version);
        depdump_util::fs::ensure_dir(&dir).map_err(DumpError::Io)?;
        let path = self.pom_path(group, artifact, version);
        fs::write(&path, pom_xml).map_err(DumpError::Io)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0"?>
<project>
  <groupId>org.example</groupId>
  <artifactId>lib</artifactId>
  <version>1.0</version>
</project>"#;

    #[test]
    fn put_and_get_pom() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = LocalRepository::new(tmp.path());

        repo.put_pom("org.example", "lib", "1.0", POM).unwrap();
        assert_eq!(repo.get_pom("org.example", "lib", "1.0").as_deref(), Some(POM));
    }

    #[test]
    fn missing_pom() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = LocalRepository::new(tmp.path());
        assert!(repo.get_pom("com.missing", "lib", "1.0").is_none());
    }

    #[test]
    fn layout_mirrors_maven() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = LocalRepository::new(tmp.path());
        repo.put_pom("org.apache.commons", "commons-lang3", "3.14.0", POM)
            .unwrap();

        let expected = tmp
            .path()
            .join("org/apache/commons/commons-lang3/3.14.0/commons-lang3-3.14.0.pom");
        assert!(expected.is_file());
    }
}
