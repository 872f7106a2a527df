use std::fs;
use std::path::Path;

use depdump_maven::local_repo::LocalRepository;
use depdump_maven::model::{ModelLoader, PomModelLoader};
use depdump_maven::system::RepositorySystem;
use depdump_util::errors::DumpError;
use miette::Diagnostic;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn loader(repo: &Path) -> PomModelLoader {
    PomModelLoader::new(RepositorySystem::offline(LocalRepository::new(repo)))
}

const PARENT: &str = r#"<project>
  <groupId>org.example</groupId>
  <artifactId>parent</artifactId>
  <version>2.0</version>
  <packaging>pom</packaging>
  <modules>
    <module>core</module>
  </modules>
  <properties>
    <guava.version>33.0.0-jre</guava.version>
  </properties>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>com.google.guava</groupId>
        <artifactId>guava</artifactId>
        <version>${guava.version}</version>
        <scope>provided</scope>
      </dependency>
      <dependency>
        <groupId>org.example.platform</groupId>
        <artifactId>bom</artifactId>
        <version>5.1</version>
        <type>pom</type>
        <scope>import</scope>
      </dependency>
    </dependencies>
  </dependencyManagement>
</project>"#;

const CORE: &str = r#"<project>
  <parent>
    <groupId>org.example</groupId>
    <artifactId>parent</artifactId>
    <version>2.0</version>
  </parent>
  <artifactId>core</artifactId>
  <dependencies>
    <dependency>
      <groupId>com.google.guava</groupId>
      <artifactId>guava</artifactId>
    </dependency>
    <dependency>
      <groupId>org.example.platform</groupId>
      <artifactId>client</artifactId>
    </dependency>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>sibling</artifactId>
      <version>${project.version}</version>
    </dependency>
  </dependencies>
</project>"#;

const BOM: &str = r#"<project>
  <groupId>org.example.platform</groupId>
  <artifactId>bom</artifactId>
  <version>5.1</version>
  <packaging>pom</packaging>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.example.platform</groupId>
        <artifactId>client</artifactId>
        <version>5.1.3</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
</project>"#;

fn project() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    write(&tmp.path().join("project/pom.xml"), PARENT);
    write(&tmp.path().join("project/core/pom.xml"), CORE);
    LocalRepository::new(&tmp.path().join("repo"))
        .put_pom("org.example.platform", "bom", "5.1", BOM)
        .unwrap();
    tmp
}

#[test]
fn aggregator_lists_modules() {
    let tmp = project();
    let model = loader(&tmp.path().join("repo"))
        .load(&tmp.path().join("project"))
        .unwrap();
    assert!(model.is_aggregator());
    assert_eq!(model.modules, vec!["core".to_string()]);
    assert!(model.dependencies.is_empty());
}

#[test]
fn child_inherits_coordinates_from_local_parent() {
    let tmp = project();
    let model = loader(&tmp.path().join("repo"))
        .load(&tmp.path().join("project/core/pom.xml"))
        .unwrap();
    assert_eq!(model.group_id, "org.example");
    assert_eq!(model.version, "2.0");
    assert_eq!(model.packaging, "jar");
}

#[test]
fn managed_versions_and_properties_are_applied() {
    let tmp = project();
    let model = loader(&tmp.path().join("repo"))
        .load(&tmp.path().join("project/core"))
        .unwrap();
    let versions: Vec<_> = model
        .dependencies
        .iter()
        .map(|d| (d.artifact_id().to_string(), d.coordinate.version.clone()))
        .collect();
    assert_eq!(
        versions,
        vec![
            ("guava".to_string(), "33.0.0-jre".to_string()),
            ("client".to_string(), "5.1.3".to_string()),
            ("sibling".to_string(), "2.0".to_string()),
        ]
    );
}

#[test]
fn declared_scope_is_left_for_managed_fallback() {
    let tmp = project();
    let model = loader(&tmp.path().join("repo"))
        .load(&tmp.path().join("project/core"))
        .unwrap();
    let guava = &model.dependencies[0];
    assert_eq!(guava.scope, None);
    let managed = model.managed(guava).unwrap();
    assert_eq!(managed.scope.as_deref(), Some("provided"));
}

#[test]
fn bom_imports_are_replaced_by_their_entries() {
    let tmp = project();
    let model = loader(&tmp.path().join("repo"))
        .load(&tmp.path().join("project/core"))
        .unwrap();
    let management = model.dependency_management.unwrap();
    assert!(management.iter().all(|d| d.artifact_id() != "bom"));
    assert!(management.iter().any(|d| d.artifact_id() == "client"));
}

#[test]
fn mismatched_relative_parent_falls_back_to_repository() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        &tmp.path().join("project/pom.xml"),
        "<project><groupId>other</groupId><artifactId>unrelated</artifactId><version>9</version></project>",
    );
    write(&tmp.path().join("project/core/pom.xml"), CORE);
    let repo = tmp.path().join("repo");
    LocalRepository::new(&repo)
        .put_pom("org.example", "parent", "2.0", PARENT)
        .unwrap();

    let model = loader(&repo).load(&tmp.path().join("project/core")).unwrap();
    assert_eq!(model.dependencies[0].coordinate.version, "33.0.0-jre");
}

#[test]
fn manifest_without_artifact_id_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    write(&tmp.path().join("broken/pom.xml"), "<project><groupId>g</groupId></project>");
    let loader = loader(&tmp.path().join("repo"));
    assert!(loader.load(&tmp.path().join("broken")).is_err());
}

#[test]
fn missing_manifest_is_a_manifest_error() {
    let tmp = tempfile::tempdir().unwrap();
    let loader = loader(&tmp.path().join("repo"));
    let err = loader.load(&tmp.path().join("nowhere/pom.xml")).unwrap_err();
    match err.downcast_ref::<DumpError>() {
        Some(DumpError::Manifest { message }) => {
            assert!(message.starts_with("POM file does not exist"), "got: {message}");
        }
        other => panic!("expected manifest error, got {other:?}"),
    }
    assert!(err.help().is_some());
}
