//! CLI argument definitions for depdump.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "depdump",
    version,
    about = "Dump the direct and transitive dependencies of a Maven project",
    long_about = "depdump walks every module of a Maven project, resolves each declared \
                  dependency against a local repository and remote Maven repositories, and \
                  prints either a flat direct/transitive report or one tree per dependency."
)]
pub struct Cli {
    /// Project directory or pom.xml
    #[arg(long)]
    pub project: PathBuf,

    /// Local Maven repository used as POM store
    #[arg(long, alias = "localRepo")]
    pub local_repo: PathBuf,

    /// Comma-separated group tokens; any group containing one is excluded
    #[arg(long, alias = "excludeGroups", value_delimiter = ',')]
    pub exclude_groups: Vec<String>,

    /// Comma-separated scopes to include (default: all)
    #[arg(long, alias = "includeScopes", value_delimiter = ',')]
    pub include_scopes: Option<Vec<String>>,

    /// Print one dependency tree per declared dependency instead of the flat report
    #[arg(long)]
    pub tree: bool,

    /// Print license information for every listed artifact
    #[arg(long, alias = "includeLicense")]
    pub include_license: bool,

    /// Only use the local repository
    #[arg(long)]
    pub offline: bool,

    /// Record excluded direct dependencies in the report without resolving them
    #[arg(long)]
    pub record_excluded: bool,

    /// HTTP proxy host (overrides http_proxy)
    #[arg(long, requires = "proxy_port")]
    pub proxy_host: Option<String>,

    /// HTTP proxy port
    #[arg(long, requires = "proxy_host")]
    pub proxy_port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
