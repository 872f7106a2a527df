use depdump_core::settings::{dirs_path, GlobalConfig, ProxySettings, RepositorySettings};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn proxy_parse_host_and_port() {
    let proxy = ProxySettings::parse("proxy.example.com:8080").unwrap();
    assert_eq!(proxy, ProxySettings::new("proxy.example.com", 8080));
}

#[test]
fn proxy_parse_strips_scheme_and_slash() {
    let proxy = ProxySettings::parse("http://proxy.example.com:3128/").unwrap();
    assert_eq!(proxy.host, "proxy.example.com");
    assert_eq!(proxy.port, 3128);
    assert_eq!(proxy.url(), "http://proxy.example.com:3128");
    assert_eq!(proxy.to_string(), "proxy.example.com:3128");
}

#[test]
fn proxy_parse_rejects_missing_port() {
    assert!(ProxySettings::parse("proxy.example.com").is_none());
    assert!(ProxySettings::parse("proxy.example.com:http").is_none());
    assert!(ProxySettings::parse(":80").is_none());
}

#[test]
fn global_config_empty_toml() {
    let config = GlobalConfig::parse_toml("").unwrap();
    assert!(config.repositories.is_empty());
    assert!(config.proxy.is_none());
}

#[test]
fn global_config_full_toml() {
    let config = GlobalConfig::parse_toml(
        r#"
[repositories]
internal = "https://nexus.example.com/maven"

[credentials.internal]
username = "ci"
password = "secret"

[proxy]
host = "proxy.example.com"
port = 8080
"#,
    )
    .unwrap();
    assert_eq!(
        config.repositories.get("internal").map(String::as_str),
        Some("https://nexus.example.com/maven")
    );
    assert_eq!(
        config.credentials["internal"].username.as_deref(),
        Some("ci")
    );
    assert_eq!(config.proxy, Some(ProxySettings::new("proxy.example.com", 8080)));
}

#[test]
fn global_config_missing_file_is_default() {
    let tmp = TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("nope.toml")).unwrap();
    assert!(config.repositories.is_empty());
}

#[test]
fn global_config_invalid_file_is_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[proxy]\nport = \"not a number\"\n").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Configuration error"), "got: {err}");
}

#[test]
fn apply_global_adds_remotes_with_credentials() {
    let global = GlobalConfig::parse_toml(
        r#"
[repositories]
internal = "https://nexus.example.com/maven"

[credentials.internal]
username = "ci"
"#,
    )
    .unwrap();
    let mut settings = RepositorySettings::new(Path::new("/tmp/repo"));
    settings.apply_global(&global);
    assert_eq!(settings.remotes.len(), 1);
    assert_eq!(settings.remotes[0].name, "internal");
    assert_eq!(settings.remotes[0].username.as_deref(), Some("ci"));
}

#[test]
fn apply_global_keeps_explicit_proxy() {
    let global = GlobalConfig::parse_toml("[proxy]\nhost = \"file-proxy\"\nport = 1\n").unwrap();
    let mut settings = RepositorySettings::new(Path::new("/tmp/repo"));
    settings.proxy = Some(ProxySettings::new("cli-proxy", 2));
    settings.apply_global(&global);
    assert_eq!(settings.proxy, Some(ProxySettings::new("cli-proxy", 2)));

    let mut settings = RepositorySettings::new(Path::new("/tmp/repo"));
    settings.apply_global(&global);
    assert_eq!(settings.proxy, Some(ProxySettings::new("file-proxy", 1)));
}

#[test]
fn dirs_path_ends_with_depdump() {
    assert!(dirs_path().ends_with(".depdump"));
}
