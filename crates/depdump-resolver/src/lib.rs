//! Transitive dependency resolution: one Maven-style nearest-wins tree per
//! declared dependency, with scope propagation, exclusions and partial
//! results on failure.

pub mod graph;
pub mod resolver;

pub use resolver::{ArtifactResolver, MavenResolver, ResolutionFailure};
