use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depdump operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DumpError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unparsable project manifest (pom.xml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check that the project path points at a directory containing a valid pom.xml"))]
    Manifest { message: String },

    /// Dependency resolution failed (missing POMs, unreachable repositories, etc.).
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// Network request or download failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Invalid configuration file or settings.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check ~/.depdump/config.toml or the file named by DEPDUMP_CONFIG"))]
    Config { message: String },

    /// A downloaded file did not match its published checksum.
    #[error("Checksum mismatch: {message}")]
    Checksum { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type DumpResult<T> = miette::Result<T>;
