//! Checksum verification of downloaded POMs (SHA-256, SHA-1, MD5).

use md5::Md5;
use reqwest::blocking::Client;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use depdump_util::errors::DumpError;

use crate::download;
use crate::repository::MavenRepository;

/// Verify downloaded data against the repository's sidecar files.
///
/// Tries SHA-256 first, falls back to SHA-1, then MD5. A missing sidecar is
/// not an error.
pub fn verify(
    client: &Client,
    repo: &MavenRepository,
    file_url: &str,
    data: &[u8],
) -> miette::Result<()> {
    let algorithms: [(&str, &str, fn(&[u8]) -> String); 3] = [
        ("sha256", "SHA-256", hex_sha256),
        ("sha1", "SHA-1", hex_sha1),
        ("md5", "MD5", hex_md5),
    ];

    for (ext, algo, digest) in algorithms {
        let url = format!("{file_url}.{ext}");
        if let Some(expected) = download::download_text(client, repo, &url)? {
            return check(&digest(data), &extract_hash(&expected), algo, file_url);
        }
    }

    tracing::debug!("No checksum sidecar found for {file_url}");
    Ok(())
}

fn check(actual: &str, expected: &str, algo: &str, url: &str) -> miette::Result<()> {
    if actual.eq_ignore_ascii_case(expected) {
        tracing::debug!("{algo} ok for {url}");
        Ok(())
    } else {
        Err(DumpError::Checksum {
            message: format!("{algo} of {url} is {actual}, repository publishes {expected}"),
        }
        .into())
    }
}

/// Sidecar files may contain `<hash>  <filename>`; keep only the hash.
pub fn extract_hash(content: &str) -> String {
    content
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

pub fn hex_sha256(data: &[u8]) -> String {
    hex(&Sha256::digest(data))
}

pub fn hex_sha1(data: &[u8]) -> String {
    hex(&Sha1::digest(data))
}

pub fn hex_md5(data: &[u8]) -> String {
    hex(&Md5::digest(data))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
