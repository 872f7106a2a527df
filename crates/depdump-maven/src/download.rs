//! Blocking downloads from remote Maven repositories.

use std::time::Duration;

use reqwest::blocking::Client;

use depdump_core::settings::ProxySettings;
use depdump_util::errors::DumpError;

use crate::auth;
use crate::repository::MavenRepository;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Build the shared HTTP client, routing every request through `proxy` when set.
pub fn build_client(proxy: Option<&ProxySettings>) -> miette::Result<Client> {
    let mut builder = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("depdump/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = proxy {
        let proxy = reqwest::Proxy::all(proxy.url()).map_err(|e| DumpError::Config {
            message: format!("Invalid proxy {proxy}: {e}"),
        })?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(|e| {
        DumpError::Network {
            message: format!("Failed to create HTTP client: {e}"),
        }
        .into()
    })
}

/// Download raw bytes from a URL, with authentication and retries.
///
/// Returns `Ok(None)` for 404 (file not present in this repository).
/// Server errors and connection failures are retried; other failures are
/// returned immediately.
pub fn download_bytes(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
) -> miette::Result<Option<Vec<u8>>> {
    let mut last_err = String::new();

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            tracing::debug!("Retrying {url} (attempt {})", attempt + 1);
            std::thread::sleep(RETRY_DELAY * attempt);
        }

        let req = auth::apply_auth(client.get(url), repo);

        match req.send() {
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if status.is_server_error() {
                    last_err = format!("HTTP {status} from {url}");
                    continue;
                }
                if !status.is_success() {
                    return Err(DumpError::Network {
                        message: format!("HTTP {status} fetching {url}"),
                    }
                    .into());
                }

                let bytes = resp.bytes().map_err(|e| DumpError::Network {
                    message: format!("Failed to read response from {url}: {e}"),
                })?;
                return Ok(Some(bytes.to_vec()));
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_err = format!("{e}");
                continue;
            }
            Err(e) => {
                return Err(DumpError::Network {
                    message: format!("Request to {url} failed: {e}"),
                }
                .into());
            }
        }
    }

    Err(DumpError::Network {
        message: format!("Failed after {MAX_RETRIES} retries for {url}: {last_err}"),
    }
    .into())
}

/// Download a text file (POM, checksum sidecar).
pub fn download_text(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
) -> miette::Result<Option<String>> {
    Ok(download_bytes(client, repo, url)?.map(|bytes| String::from_utf8_lossy(&bytes).to_string()))
}
