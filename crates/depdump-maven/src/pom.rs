//! POM file parsing: coordinates, dependency declarations, dependency
//! management, modules, licenses, parent references and property interpolation.

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use depdump_core::coordinate::Coordinate;
use depdump_core::dependency::{DeclaredDependency, Exclusion};
use depdump_core::model::{License, ProjectModel};
use depdump_util::errors::DumpError;

const DEPENDENCY: &str = "project>dependencies>dependency";
const MANAGED_DEPENDENCY: &str = "project>dependencyManagement>dependencies>dependency";
const EXCLUSION: &str = "project>dependencies>dependency>exclusions>exclusion";
const MANAGED_EXCLUSION: &str =
    "project>dependencyManagement>dependencies>dependency>exclusions>exclusion";

/// Property values may reference other properties; stop after this many rounds.
const MAX_INTERPOLATION_PASSES: usize = 20;

/// Relative path of the parent POM when `<relativePath>` is absent.
pub const DEFAULT_PARENT_PATH: &str = "../pom.xml";

/// A parsed POM (Project Object Model) file.
#[derive(Debug, Clone, Default)]
pub struct Pom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub name: Option<String>,

    pub parent: Option<ParentRef>,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<PomDependency>,
    pub dependency_management: Vec<PomDependency>,
    pub modules: Vec<String>,
    pub licenses: Vec<License>,
}

/// Reference to a parent POM.
#[derive(Debug, Clone, Default)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// `Some("")` for an explicit `<relativePath/>`, which disables local lookup.
    pub relative_path: Option<String>,
}

/// A dependency declared in a POM file.
#[derive(Debug, Clone, Default)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub optional: bool,
    pub classifier: Option<String>,
    pub type_: Option<String>,
    pub exclusions: Vec<PomExclusion>,
}

/// An exclusion within a dependency declaration.
#[derive(Debug, Clone, Default)]
pub struct PomExclusion {
    pub group_id: String,
    pub artifact_id: Option<String>,
}

impl ParentRef {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(&self.group_id, &self.artifact_id, &self.version).with_type("pom")
    }

    /// Local parent location, or `None` when lookup on disk is disabled.
    pub fn local_path(&self) -> Option<&str> {
        match self.relative_path.as_deref() {
            Some("") => None,
            Some(path) => Some(path),
            None => Some(DEFAULT_PARENT_PATH),
        }
    }
}

impl PomDependency {
    fn set_field(&mut self, field: &str, text: String) {
        match field {
            "groupId" => self.group_id = text,
            "artifactId" => self.artifact_id = text,
            "version" => self.version = Some(text),
            "scope" => self.scope = Some(text),
            "optional" => self.optional = text.trim() == "true",
            "classifier" => self.classifier = Some(text),
            "type" => self.type_ = Some(text),
            _ => {}
        }
    }

    fn is_same_artifact(&self, other: &PomDependency) -> bool {
        self.group_id == other.group_id && self.artifact_id == other.artifact_id
    }

    /// Whether this entry imports a BOM (`scope = import`, `type = pom`).
    pub fn is_bom_import(&self) -> bool {
        self.scope.as_deref() == Some("import") && self.type_.as_deref() == Some("pom")
    }

    /// Convert to the core declaration; a missing version becomes empty.
    pub fn to_declared(&self) -> DeclaredDependency {
        let mut coordinate = Coordinate::new(
            &self.group_id,
            &self.artifact_id,
            self.version.as_deref().unwrap_or_default(),
        );
        coordinate.type_ = self.type_.clone();
        coordinate.classifier = self.classifier.clone();
        DeclaredDependency {
            coordinate,
            scope: self.scope.clone(),
            optional: self.optional,
            exclusions: self
                .exclusions
                .iter()
                .map(|e| Exclusion::new(&e.group_id, e.artifact_id.as_deref().unwrap_or("*")))
                .collect(),
        }
    }
}

impl Pom {
    /// Effective group ID (falls back to parent).
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.group_id.as_str()))
    }

    /// Effective version (falls back to parent).
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.version.as_str()))
    }

    /// Resolve `${property}` references in a string using POM properties
    /// and built-in project variables. Unknown properties are left in place.
    pub fn interpolate(&self, input: &str) -> String {
        let mut result = input.to_string();
        for _ in 0..MAX_INTERPOLATION_PASSES {
            let next = self.interpolate_once(&result);
            if next == result {
                break;
            }
            result = next;
        }
        result
    }

    fn interpolate_once(&self, input: &str) -> String {
        let mut result = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(start) = rest.find("${") {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let key = &rest[start + 2..start + len];
            result.push_str(&rest[..start]);
            match self.resolve_property(key) {
                Some(value) => result.push_str(&value),
                None => result.push_str(&rest[start..=start + len]),
            }
            rest = &rest[start + len + 1..];
        }
        result.push_str(rest);
        result
    }

    fn resolve_property(&self, key: &str) -> Option<String> {
        match key {
            "project.groupId" | "pom.groupId" | "groupId" => {
                self.effective_group_id().map(str::to_string)
            }
            "project.artifactId" | "pom.artifactId" | "artifactId" => self.artifact_id.clone(),
            "project.version" | "pom.version" | "version" => {
                self.effective_version().map(str::to_string)
            }
            "project.packaging" | "pom.packaging" => self.packaging.clone(),
            "project.parent.groupId" => self.parent.as_ref().map(|p| p.group_id.clone()),
            "project.parent.artifactId" => self.parent.as_ref().map(|p| p.artifact_id.clone()),
            "project.parent.version" => self.parent.as_ref().map(|p| p.version.clone()),
            _ => self.properties.get(key).cloned(),
        }
    }

    /// Interpolate property references in coordinates, dependencies and
    /// dependency management.
    pub fn resolve_properties(&mut self) {
        let snapshot = self.clone();
        let interpolate_dep = |dep: &mut PomDependency| {
            dep.group_id = snapshot.interpolate(&dep.group_id);
            dep.artifact_id = snapshot.interpolate(&dep.artifact_id);
            for field in [
                &mut dep.version,
                &mut dep.scope,
                &mut dep.classifier,
                &mut dep.type_,
            ] {
                if let Some(value) = field.as_mut() {
                    *value = snapshot.interpolate(value);
                }
            }
        };
        self.dependencies.iter_mut().for_each(interpolate_dep);
        self.dependency_management
            .iter_mut()
            .for_each(interpolate_dep);
        for field in [&mut self.group_id, &mut self.version, &mut self.packaging] {
            if let Some(value) = field.as_mut() {
                *value = snapshot.interpolate(value);
            }
        }
    }

    /// Merge an (already effective) parent POM into this POM: properties,
    /// coordinates, dependencies, dependency management and licenses.
    pub fn apply_parent(&mut self, parent: &Pom) {
        for (k, v) in &parent.properties {
            self.properties
                .entry(k.clone())
                .or_insert_with(|| v.clone());
        }
        if self.group_id.is_none() {
            self.group_id = parent.effective_group_id().map(str::to_string);
        }
        if self.version.is_none() {
            self.version = parent.effective_version().map(str::to_string);
        }
        for dep in &parent.dependencies {
            if !self.dependencies.iter().any(|d| d.is_same_artifact(dep)) {
                self.dependencies.push(dep.clone());
            }
        }
        self.merge_management(&parent.dependency_management);
        if self.licenses.is_empty() {
            self.licenses = parent.licenses.clone();
        }
    }

    /// Append management entries not already overridden by this POM.
    pub fn merge_management(&mut self, entries: &[PomDependency]) {
        for dm in entries {
            if !self
                .dependency_management
                .iter()
                .any(|d| d.is_same_artifact(dm))
            {
                self.dependency_management.push(dm.clone());
            }
        }
    }

    /// Look up the management entry for a given group:artifact.
    pub fn managed(&self, group_id: &str, artifact_id: &str) -> Option<&PomDependency> {
        self.dependency_management
            .iter()
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id && !d.is_bom_import())
    }

    /// BOM imports from dependency management.
    pub fn bom_imports(&self) -> Vec<&PomDependency> {
        self.dependency_management
            .iter()
            .filter(|d| d.is_bom_import())
            .collect()
    }

    /// Fill missing dependency versions from dependency management.
    pub fn apply_managed_versions(&mut self) {
        let managed: Vec<(String, String, String)> = self
            .dependency_management
            .iter()
            .filter(|d| !d.is_bom_import())
            .filter_map(|d| {
                d.version
                    .clone()
                    .map(|v| (d.group_id.clone(), d.artifact_id.clone(), v))
            })
            .collect();
        for dep in self.dependencies.iter_mut().filter(|d| d.version.is_none()) {
            dep.version = managed
                .iter()
                .find(|(g, a, _)| *g == dep.group_id && *a == dep.artifact_id)
                .map(|(_, _, v)| v.clone());
        }
    }

    /// Convert an effective POM into the core project model.
    pub fn to_model(&self) -> ProjectModel {
        let management: Vec<DeclaredDependency> = self
            .dependency_management
            .iter()
            .filter(|d| !d.is_bom_import())
            .map(PomDependency::to_declared)
            .collect();
        ProjectModel {
            group_id: self.effective_group_id().unwrap_or_default().to_string(),
            artifact_id: self.artifact_id.clone().unwrap_or_default(),
            version: self.effective_version().unwrap_or_default().to_string(),
            packaging: self.packaging.clone().unwrap_or_else(|| "jar".to_string()),
            modules: self.modules.clone(),
            dependencies: self
                .dependencies
                .iter()
                .map(PomDependency::to_declared)
                .collect(),
            dependency_management: (!management.is_empty()).then_some(management),
            licenses: self.licenses.clone(),
        }
    }
}

/// Streaming parser state: the open element path plus the element being built.
#[derive(Default)]
struct PomParser {
    pom: Pom,
    path: Vec<String>,
    text: String,
    dependency: Option<PomDependency>,
    exclusion: Option<PomExclusion>,
    parent: Option<ParentRef>,
    license: Option<License>,
}

impl PomParser {
    fn open(&mut self, tag: String) {
        self.path.push(tag);
        self.text.clear();
        match self.path.join(">").as_str() {
            DEPENDENCY | MANAGED_DEPENDENCY => self.dependency = Some(PomDependency::default()),
            EXCLUSION | MANAGED_EXCLUSION => self.exclusion = Some(PomExclusion::default()),
            "project>parent" => self.parent = Some(ParentRef::default()),
            "project>licenses>license" => self.license = Some(License::default()),
            _ => {}
        }
    }

    fn close(&mut self) {
        let ctx = self.path.join(">");
        let text = std::mem::take(&mut self.text);

        if self.path.len() == 3 && self.path[1] == "properties" {
            self.pom.properties.insert(self.path[2].clone(), text);
        } else if self.path.len() == 2 {
            match self.path[1].as_str() {
                "groupId" => self.pom.group_id = Some(text),
                "artifactId" => self.pom.artifact_id = Some(text),
                "version" => self.pom.version = Some(text),
                "packaging" => self.pom.packaging = Some(text),
                "name" => self.pom.name = Some(text),
                "parent" => self.pom.parent = self.parent.take(),
                _ => {}
            }
        } else if ctx == "project>modules>module" {
            self.pom.modules.push(text);
        } else if let Some(field) = child_field(&ctx, "project>parent") {
            if let Some(parent) = self.parent.as_mut() {
                match field {
                    "groupId" => parent.group_id = text,
                    "artifactId" => parent.artifact_id = text,
                    "version" => parent.version = text,
                    "relativePath" => parent.relative_path = Some(text),
                    _ => {}
                }
            }
        } else if ctx == "project>licenses>license" {
            if let Some(license) = self.license.take() {
                self.pom.licenses.push(license);
            }
        } else if let Some(field) = child_field(&ctx, "project>licenses>license") {
            if let Some(license) = self.license.as_mut() {
                match field {
                    "name" => license.name = Some(text),
                    "url" => license.url = Some(text),
                    _ => {}
                }
            }
        } else if ctx == DEPENDENCY || ctx == MANAGED_DEPENDENCY {
            if let Some(dep) = self.dependency.take() {
                if ctx == MANAGED_DEPENDENCY {
                    self.pom.dependency_management.push(dep);
                } else {
                    self.pom.dependencies.push(dep);
                }
            }
        } else if let Some(field) =
            child_field(&ctx, DEPENDENCY).or_else(|| child_field(&ctx, MANAGED_DEPENDENCY))
        {
            if let Some(dep) = self.dependency.as_mut() {
                dep.set_field(field, text);
            }
        } else if ctx == EXCLUSION || ctx == MANAGED_EXCLUSION {
            if let (Some(dep), Some(excl)) = (self.dependency.as_mut(), self.exclusion.take()) {
                dep.exclusions.push(excl);
            }
        } else if let Some(field) =
            child_field(&ctx, EXCLUSION).or_else(|| child_field(&ctx, MANAGED_EXCLUSION))
        {
            if let Some(excl) = self.exclusion.as_mut() {
                match field {
                    "groupId" => excl.group_id = text,
                    "artifactId" => excl.artifact_id = Some(text),
                    _ => {}
                }
            }
        }

        self.path.pop();
    }
}

/// The element name directly below `parent` in `ctx`, if `ctx` is exactly one level deeper.
fn child_field<'a>(ctx: &'a str, parent: &str) -> Option<&'a str> {
    let field = ctx.strip_prefix(parent)?.strip_prefix('>')?;
    (!field.contains('>')).then_some(field)
}

/// Parse a POM XML string into a `Pom` struct.
pub fn parse_pom(xml: &str) -> miette::Result<Pom> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parser = PomParser::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                parser.open(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
            }
            Ok(Event::Empty(ref e)) => {
                parser.open(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
                parser.close();
            }
            Ok(Event::Text(ref e)) => {
                parser.text = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::CData(ref e)) => {
                parser.text = String::from_utf8_lossy(e).to_string();
            }
            Ok(Event::End(_)) => parser.close(),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DumpError::Manifest {
                    message: format!(
                        "Failed to parse POM XML at position {}: {e}",
                        reader.error_position()
                    ),
                }
                .into());
            }
            _ => {}
        }
    }

    if parser.pom.artifact_id.is_none() {
        return Err(DumpError::Manifest {
            message: "POM does not declare an artifactId".to_string(),
        }
        .into());
    }

    Ok(parser.pom)
}
