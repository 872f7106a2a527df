//! License metadata for repository coordinates.

use depdump_core::model::License;

use crate::model::PomModelLoader;

/// Looks up the licenses declared for a coordinate.
pub trait LicenseLookup {
    fn licenses_of(&self, group: &str, artifact: &str, version: &str) -> miette::Result<Vec<License>>;
}

/// Reads `<licenses>` from the coordinate's effective POM, so licenses
/// declared only on a parent are found too.
#[derive(Debug, Clone, Copy)]
pub struct PomLicenseLookup<'a> {
    loader: &'a PomModelLoader,
}

impl<'a> PomLicenseLookup<'a> {
    pub fn new(loader: &'a PomModelLoader) -> Self {
        Self { loader }
    }
}

impl LicenseLookup for PomLicenseLookup<'_> {
    fn licenses_of(&self, group: &str, artifact: &str, version: &str) -> miette::Result<Vec<License>> {
        Ok(self
            .loader
            .load_coordinate(group, artifact, version)?
            .map(|model| model.licenses)
            .unwrap_or_default())
    }
}
