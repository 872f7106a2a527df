//! Effective project models.
//!
//! A module's `pom.xml` is turned into a [`ProjectModel`] by merging its
//! parent chain, interpolating properties, expanding imported BOMs and
//! filling managed versions. Remote POMs (parents, BOMs, dependencies) are
//! fetched through the [`RepositorySystem`] and cached for the life of the
//! loader.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use depdump_core::model::ProjectModel;
use depdump_util::errors::DumpError;

use crate::pom::{self, Pom};
use crate::system::RepositorySystem;

/// Parent chains deeper than this are treated as cyclic.
const MAX_PARENT_DEPTH: usize = 32;

/// Loads the effective model of a project module.
pub trait ModelLoader {
    /// Load the module at `path`: a project directory (its `pom.xml` is
    /// read) or the manifest file itself. A missing or unparsable manifest
    /// is an error.
    fn load(&self, path: &Path) -> miette::Result<ProjectModel>;
}

/// [`ModelLoader`] backed by POM files on disk and in Maven repositories.
#[derive(Debug)]
pub struct PomModelLoader {
    system: RepositorySystem,
    remote: RefCell<HashMap<String, Option<Pom>>>,
}

impl PomModelLoader {
    pub fn new(system: RepositorySystem) -> Self {
        Self {
            system,
            remote: RefCell::new(HashMap::new()),
        }
    }

    pub fn system(&self) -> &RepositorySystem {
        &self.system
    }

    /// Effective POM of a repository coordinate, or `None` when no
    /// repository carries it. Results (including misses) are cached.
    pub fn effective_remote(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> miette::Result<Option<Pom>> {
        self.effective_remote_at(group, artifact, version, 0)
    }

    /// Effective model of a repository coordinate.
    pub fn load_coordinate(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> miette::Result<Option<ProjectModel>> {
        Ok(self
            .effective_remote(group, artifact, version)?
            .map(|pom| pom.to_model()))
    }

    /// Effective POM of a manifest on disk.
    pub fn effective_local(&self, manifest: &Path) -> miette::Result<Pom> {
        self.effective_local_at(manifest, 0)
    }

    fn effective_local_at(&self, manifest: &Path, depth: usize) -> miette::Result<Pom> {
        check_depth(depth, &manifest.display().to_string())?;
        if !manifest.is_file() {
            return Err(DumpError::Manifest {
                message: format!("POM file does not exist: {}", manifest.display()),
            }
            .into());
        }
        let xml = fs::read_to_string(manifest).map_err(DumpError::Io)?;
        let mut pom = pom::parse_pom(&xml)
            .map_err(|e| e.wrap_err(format!("Failed to load {}", manifest.display())))?;

        if let Some(parent) = self.local_parent(manifest, &pom, depth)? {
            pom.apply_parent(&parent);
        } else if let Some(parent_ref) = pom.parent.clone() {
            match self.effective_remote_at(
                &parent_ref.group_id,
                &parent_ref.artifact_id,
                &parent_ref.version,
                depth + 1,
            )? {
                Some(parent) => pom.apply_parent(&parent),
                None => tracing::warn!(
                    "Parent {} of {} not found; continuing without it",
                    parent_ref.coordinate(),
                    manifest.display()
                ),
            }
        }

        self.finish(&mut pom, depth)?;
        Ok(pom)
    }

    /// The parent found through `relativePath`, if it exists on disk and
    /// declares the coordinates the child asks for.
    fn local_parent(&self, manifest: &Path, pom: &Pom, depth: usize) -> miette::Result<Option<Pom>> {
        let Some(parent_ref) = pom.parent.as_ref() else {
            return Ok(None);
        };
        let Some(relative) = parent_ref.local_path() else {
            return Ok(None);
        };
        let base = manifest.parent().unwrap_or_else(|| Path::new("."));
        let candidate = depdump_util::fs::manifest_path(&base.join(relative));
        if !candidate.is_file() {
            return Ok(None);
        }

        let Ok(xml) = fs::read_to_string(&candidate) else {
            return Ok(None);
        };
        let Ok(raw) = pom::parse_pom(&xml) else {
            tracing::debug!("Ignoring unparsable parent candidate {}", candidate.display());
            return Ok(None);
        };
        let matches = raw.effective_group_id() == Some(parent_ref.group_id.as_str())
            && raw.artifact_id.as_deref() == Some(parent_ref.artifact_id.as_str())
            && raw.effective_version() == Some(parent_ref.version.as_str());
        if !matches {
            tracing::debug!(
                "{} does not declare {}; looking in repositories",
                candidate.display(),
                parent_ref.coordinate()
            );
            return Ok(None);
        }

        self.effective_local_at(&candidate, depth + 1).map(Some)
    }

    fn effective_remote_at(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        depth: usize,
    ) -> miette::Result<Option<Pom>> {
        let key = format!("{group}:{artifact}:{version}");
        if let Some(cached) = self.remote.borrow().get(&key) {
            return Ok(cached.clone());
        }
        check_depth(depth, &key)?;

        let Some(mut pom) = self.system.fetch_pom(group, artifact, version)? else {
            self.remote.borrow_mut().insert(key, None);
            return Ok(None);
        };
        if let Some(parent_ref) = pom.parent.clone() {
            match self.effective_remote_at(
                &parent_ref.group_id,
                &parent_ref.artifact_id,
                &parent_ref.version,
                depth + 1,
            )? {
                Some(parent) => pom.apply_parent(&parent),
                None => tracing::warn!("Parent {} of {key} not found", parent_ref.coordinate()),
            }
        }
        self.finish(&mut pom, depth)?;

        self.remote.borrow_mut().insert(key, Some(pom.clone()));
        Ok(Some(pom))
    }

    /// Interpolate, expand BOM imports and apply managed versions.
    fn finish(&self, pom: &mut Pom, depth: usize) -> miette::Result<()> {
        pom.resolve_properties();

        let imports: Vec<_> = pom.bom_imports().into_iter().cloned().collect();
        for bom in imports {
            let Some(version) = bom.version.as_deref() else {
                tracing::warn!("BOM import {}:{} has no version", bom.group_id, bom.artifact_id);
                continue;
            };
            match self.effective_remote_at(&bom.group_id, &bom.artifact_id, version, depth + 1)? {
                Some(imported) => pom.merge_management(&imported.dependency_management),
                None => tracing::warn!(
                    "BOM {}:{}:{version} not found",
                    bom.group_id,
                    bom.artifact_id
                ),
            }
        }
        pom.dependency_management.retain(|d| !d.is_bom_import());

        pom.apply_managed_versions();
        Ok(())
    }
}

impl ModelLoader for PomModelLoader {
    fn load(&self, path: &Path) -> miette::Result<ProjectModel> {
        let manifest = depdump_util::fs::manifest_path(path);
        tracing::debug!("Loading {}", manifest.display());
        Ok(self.effective_local(&manifest)?.to_model())
    }
}

fn check_depth(depth: usize, what: &str) -> miette::Result<()> {
    if depth > MAX_PARENT_DEPTH {
        return Err(DumpError::Manifest {
            message: format!("Parent chain of {what} is deeper than {MAX_PARENT_DEPTH} levels"),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_repo::LocalRepository;

    fn offline_loader(repo: &Path) -> PomModelLoader {
        PomModelLoader::new(RepositorySystem::offline(LocalRepository::new(repo)))
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let loader = offline_loader(&tmp.path().join("repo"));
        let err = loader.load(&tmp.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("Manifest error"));
    }

    #[test]
    fn directory_maps_to_pom_xml() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("pom.xml"),
            "<project><groupId>g</groupId><artifactId>a</artifactId><version>1</version></project>",
        )
        .unwrap();
        let loader = offline_loader(&tmp.path().join("repo"));
        let model = loader.load(tmp.path()).unwrap();
        assert_eq!(model.artifact_id, "a");
        assert_eq!(model.packaging, "jar");
    }

    #[test]
    fn remote_misses_are_cached() {
        let tmp = tempfile::tempdir().unwrap();
        let loader = offline_loader(tmp.path());
        assert!(loader.effective_remote("g", "a", "1").unwrap().is_none());
        assert!(loader.remote.borrow().contains_key("g:a:1"));
    }

    #[test]
    fn self_parent_chain_is_cut_off() {
        let tmp = tempfile::tempdir().unwrap();
        let local = LocalRepository::new(tmp.path());
        local
            .put_pom(
                "g",
                "loop",
                "1",
                "<project><parent><groupId>g</groupId><artifactId>loop</artifactId><version>1</version></parent><artifactId>loop</artifactId></project>",
            )
            .unwrap();
        let loader = PomModelLoader::new(RepositorySystem::offline(local));
        assert!(loader.effective_remote("g", "loop", "1").is_err());
    }
}
