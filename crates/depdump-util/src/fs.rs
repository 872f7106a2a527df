use std::path::{Path, PathBuf};

/// Name of the Maven project descriptor inside a module directory.
pub const POM_FILE_NAME: &str = "pom.xml";

/// Ensure a directory exists, creating it and any parents if needed.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Canonicalize `path`, falling back to the path as given when it does not
/// exist or cannot be resolved.
pub fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve the manifest file for a project location.
///
/// A directory maps to `<dir>/pom.xml`; anything else is taken to be the
/// manifest file itself.
pub fn manifest_path(location: &Path) -> PathBuf {
    if location.is_dir() {
        location.join(POM_FILE_NAME)
    } else {
        location.to_path_buf()
    }
}
