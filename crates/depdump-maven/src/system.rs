//! POM retrieval across the local repository and configured remotes.

use reqwest::blocking::Client;

use depdump_core::settings::RepositorySettings;
use depdump_util::progress;

use crate::checksum;
use crate::download;
use crate::local_repo::LocalRepository;
use crate::pom::{self, Pom};
use crate::repository::{self, MavenRepository};

/// The local repository plus the remotes consulted on a local miss.
#[derive(Debug)]
pub struct RepositorySystem {
    local: LocalRepository,
    remotes: Vec<MavenRepository>,
    client: Option<Client>,
}

impl RepositorySystem {
    /// Build from settings. In offline mode no HTTP client is created and
    /// only the local repository is consulted.
    pub fn new(settings: &RepositorySettings) -> miette::Result<Self> {
        if settings.offline {
            return Ok(Self::offline(LocalRepository::new(&settings.local_repo)));
        }
        if let Some(ref proxy) = settings.proxy {
            tracing::info!("Using proxy: {proxy}");
        }
        Ok(Self {
            local: LocalRepository::new(&settings.local_repo),
            remotes: repository::build_repos(&settings.remotes),
            client: Some(download::build_client(settings.proxy.as_ref())?),
        })
    }

    /// A system backed only by `local`.
    pub fn offline(local: LocalRepository) -> Self {
        Self {
            local,
            remotes: Vec::new(),
            client: None,
        }
    }

    pub fn local(&self) -> &LocalRepository {
        &self.local
    }

    pub fn remotes(&self) -> &[MavenRepository] {
        &self.remotes
    }

    /// Raw POM XML for a coordinate: local repository first, then each remote
    /// in order. Downloaded POMs are checksum-verified and stored locally.
    pub fn fetch_pom_text(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> miette::Result<Option<String>> {
        if let Some(xml) = self.local.get_pom(group, artifact, version) {
            return Ok(Some(xml));
        }
        let Some(client) = self.client.as_ref() else {
            return Ok(None);
        };

        for repo in &self.remotes {
            let url = repo.pom_url(group, artifact, version);
            tracing::debug!("Fetching {url}");
            let Some(xml) = download::download_text(client, repo, &url)? else {
                continue;
            };
            checksum::verify(client, repo, &url, xml.as_bytes())?;
            self.local.put_pom(group, artifact, version, &xml)?;
            progress::status("Downloaded", &format!("{group}:{artifact}:{version} from {}", repo.name));
            return Ok(Some(xml));
        }

        Ok(None)
    }

    /// Parsed POM for a coordinate, or `None` when no repository has it.
    pub fn fetch_pom(&self, group: &str, artifact: &str, version: &str) -> miette::Result<Option<Pom>> {
        match self.fetch_pom_text(group, artifact, version)? {
            Some(xml) => Ok(Some(pom::parse_pom(&xml)?)),
            None => Ok(None),
        }
    }
}
