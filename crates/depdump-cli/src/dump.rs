//! Handler for a depdump run.

use miette::Result;

use depdump_core::config::{DumpConfig, ExclusionOrder};
use depdump_core::settings::{GlobalConfig, ProxySettings, RepositorySettings};
use depdump_ops::ops_dump;

use crate::cli::Cli;

pub fn exec(args: Cli) -> Result<()> {
    let mut builder = DumpConfig::builder()
        .exclude_groups(args.exclude_groups)
        .include_license(args.include_license)
        .print_tree(args.tree);
    if let Some(scopes) = args.include_scopes {
        builder = builder.scopes(scopes);
    }
    if args.record_excluded {
        builder = builder.exclusion_order(ExclusionOrder::RecordBeforeCheck);
    }
    let config = builder.build();

    let mut settings = RepositorySettings::new(&args.local_repo);
    settings.offline = args.offline;
    settings.proxy = match (args.proxy_host, args.proxy_port) {
        (Some(host), Some(port)) => Some(ProxySettings::new(&host, port)),
        _ => ProxySettings::from_env(),
    };
    settings.apply_global(&GlobalConfig::load()?);

    ops_dump::dump(&args.project, &settings, &config)
}
