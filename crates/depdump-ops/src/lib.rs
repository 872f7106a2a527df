//! Dependency inventory of a Maven project: walk the module tree, resolve
//! each direct dependency, merge the resolved trees and report on them.

pub mod collector;
pub mod filter;
pub mod merge;
pub mod ops_dump;
pub mod report;
