//! HTTP client for release archives and release metadata.
//!
//! All requests carry a `decant` user agent and finite timeouts, so a
//! stalled mirror cannot hang an install forever. Transport failures and
//! non-success HTTP statuses are reported as distinct errors; the URL is
//! always included so a 404 identifies exactly which variant or version was
//! missing.

use std::time::Duration;

use bytes::Bytes;
use decant_core::{Error, FetchedArchive, ReleaseVariant, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

/// Connection establishment budget.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Whole-request budget, covering the full archive download.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

const USER_AGENT: &str = concat!("decant/", env!("CARGO_PKG_VERSION"));

/// Latest release metadata returned by the GitHub API.
#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Client for fetching release archives, checksum manifests, and the
/// latest published version.
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    client: Client,
}

impl ReleaseClient {
    /// Build a client with the standard timeouts and user agent.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(token) = bearer_token() {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Bytes> {
        debug!(%url, "fetching");
        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(url, status.as_u16()));
        }
        response.bytes().await.map_err(|e| Error::transport(url, e))
    }

    /// Download the release archive for `variant`.
    ///
    /// The returned [`FetchedArchive`] is unverified; callers must run it
    /// through digest verification before anything touches the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] for connection or read failures
    /// (including timeouts) and [`Error::HttpStatus`] for non-success
    /// responses.
    pub async fn fetch_archive(&self, variant: &ReleaseVariant) -> Result<FetchedArchive> {
        info!(
            platform = %variant.platform,
            version = %variant.version,
            url = %variant.url,
            "downloading release archive"
        );
        let bytes = self.fetch_bytes(&variant.url).await?;
        debug!(size = bytes.len(), "archive downloaded");
        Ok(FetchedArchive {
            variant: variant.clone(),
            bytes,
        })
    }

    /// Download the checksum manifest text at `url`.
    ///
    /// # Errors
    ///
    /// Transport and HTTP-status errors as in [`Self::fetch_archive`], plus
    /// a transport error when the body is not UTF-8.
    pub async fn fetch_checksums(&self, url: &str) -> Result<String> {
        let bytes = self.fetch_bytes(url).await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::transport(url, format!("checksum manifest is not UTF-8: {e}")))
    }

    /// Query the latest published release version for `repository`.
    ///
    /// `repository` is the release repository URL from the manifest. The
    /// returned version has the leading `v` stripped from the tag.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the repository URL is not a
    /// GitHub repository, plus transport and HTTP-status errors.
    pub async fn latest_version(&self, repository: &str) -> Result<String> {
        let api_url = latest_release_api_url(repository)?;
        debug!(%api_url, "querying latest release");
        let response = self
            .get(&api_url)
            .send()
            .await
            .map_err(|e| Error::transport(api_url.as_str(), e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(api_url, status.as_u16()));
        }
        let release: LatestRelease = response
            .json()
            .await
            .map_err(|e| Error::transport(api_url.as_str(), e))?;
        Ok(normalize_tag(&release.tag_name).to_string())
    }
}

/// Bearer token for release API requests, if one is configured.
///
/// `GITHUB_TOKEN` wins over `GH_TOKEN`; empty values are ignored.
fn bearer_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN")
        .or_else(|_| std::env::var("GH_TOKEN"))
        .ok()
        .filter(|token| !token.is_empty())
}

/// GitHub API endpoint for the latest release of `repository`.
fn latest_release_api_url(repository: &str) -> Result<String> {
    let path = repository
        .strip_prefix("https://github.com/")
        .ok_or_else(|| {
            Error::config(format!(
                "cannot derive a release API endpoint from '{repository}' \
                 (expected an https://github.com/ repository URL)"
            ))
        })?
        .trim_end_matches('/');
    Ok(format!("https://api.github.com/repos/{path}/releases/latest"))
}

/// Strip the conventional `v` prefix from a release tag.
fn normalize_tag(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}
