//! Core data types for depdump.
//!
//! This crate defines the types shared by every stage of a dependency dump:
//! Maven coordinates, declared dependencies with their exclusions, resolved
//! dependency trees, effective project models, the immutable run
//! configuration, and repository settings.
//!
//! This crate is intentionally free of network I/O.

pub mod config;
pub mod coordinate;
pub mod dependency;
pub mod model;
pub mod node;
pub mod settings;
