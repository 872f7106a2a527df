//! Maven repository protocol: POM parsing, effective project models, local
//! repository layout, artifact metadata download, checksum verification, and
//! license lookup.

pub mod auth;
pub mod checksum;
pub mod download;
pub mod license;
pub mod local_repo;
pub mod model;
pub mod pom;
pub mod repository;
pub mod system;
