use std::collections::HashSet;

use depdump_core::coordinate::{Coordinate, ProjectArtifact};

#[test]
fn key3_and_key4_differ() {
    let coord = Coordinate::new("org.example", "lib", "2.1");
    assert_eq!(coord.key3(), "org.example:lib:2.1");
    assert_eq!(coord.key4(), "org.example:lib:jar:2.1");
    assert_ne!(coord.key3(), coord.key4());
}

#[test]
fn key4_uses_declared_type() {
    let coord = Coordinate::new("org.example", "bom", "2.1").with_type("pom");
    assert_eq!(coord.key4(), "org.example:bom:pom:2.1");
}

#[test]
fn absent_type_equals_jar() {
    let plain = Coordinate::new("org.example", "lib", "1.0");
    let jar = plain.clone().with_type("jar");
    assert_eq!(plain, jar);
    assert_ne!(plain, plain.clone().with_type("pom"));

    let set: HashSet<_> = [plain, jar].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn classifier_does_not_change_keys() {
    let plain = Coordinate::new("org.example", "lib", "1.0");
    let mut sources = plain.clone();
    sources.classifier = Some("sources".to_string());
    assert_eq!(plain.key3(), sources.key3());
    assert_ne!(plain, sources);
}

#[test]
fn display_is_three_part() {
    let coord = Coordinate::new("org.example", "lib", "1.0").with_type("war");
    assert_eq!(coord.to_string(), "org.example:lib:1.0");
}

#[test]
fn project_artifact_from_coordinate_ignores_type() {
    let coord = Coordinate::new("org.example", "core", "1.0").with_type("war");
    let module = ProjectArtifact::from(&coord);
    assert_eq!(module, ProjectArtifact::new("org.example", "core", "1.0"));
    assert_ne!(module, ProjectArtifact::new("org.example", "core", "1.1"));
}
