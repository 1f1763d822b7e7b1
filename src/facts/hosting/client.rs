//! GitHub API client
//!
//! Minimal GitHub API client for listing repositories, pull requests and issues, and for
//! updating a file through the contents API.

use super::models::{ContentMeta, FileUpdate, FileUpdateResponse};
use crate::Result;
use core::ops::ControlFlow;
use octocrab::{Octocrab, Page};
use ohno::IntoAppError;
use serde::Serialize;
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "   hosting";
const PAGE_SIZE: u8 = 100;

/// Sort direction for listings sorted by creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Query parameters for the listing endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ListParams {
    per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<Direction>,
}

impl ListParams {
    /// Parameters for a plain listing
    #[must_use]
    pub const fn all() -> Self {
        Self {
            per_page: PAGE_SIZE,
            state: None,
            sort: None,
            direction: None,
        }
    }

    /// Parameters for closed items sorted by creation time
    #[must_use]
    pub const fn closed_by_creation(direction: Direction) -> Self {
        Self {
            per_page: PAGE_SIZE,
            state: Some("closed"),
            sort: Some("created"),
            direction: Some(direction),
        }
    }
}

/// Hosting API client
#[derive(Debug, Clone)]
pub struct Client {
    octocrab: Octocrab,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client authenticated with `token`, talking to the API at `api_url`
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token)
            .base_uri(api_url)
            .into_app_err_with(|| format!("invalid API URL '{api_url}'"))?
            .build()
            .into_app_err("unable to create GitHub client")?;

        let http = reqwest::Client::builder()
            .user_agent("org-metrics")
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self { octocrab, http })
    }

    /// Walk every page of a listing, handing each page of items to `on_page`.
    ///
    /// Pages are fetched one at a time by following the `Link: rel="next"` header. Returning
    /// [`ControlFlow::Break`] from `on_page` stops before the next page is requested.
    pub async fn paginate<T, F>(&self, route: &str, params: &ListParams, mut on_page: F) -> Result<()>
    where
        T: DeserializeOwned,
        F: FnMut(Vec<T>) -> ControlFlow<()>,
    {
        log::debug!(target: LOG_TARGET, "Listing '{route}'");

        let mut page: Page<T> = self
            .octocrab
            .get(route, Some(params))
            .await
            .into_app_err_with(|| format!("listing '{route}'"))?;

        loop {
            if on_page(page.take_items()).is_break() {
                return Ok(());
            }

            let Some(next) = page.next.take() else {
                return Ok(());
            };

            log::debug!(target: LOG_TARGET, "Fetching next page of '{route}'");

            match self
                .octocrab
                .get_page::<T>(&Some(next))
                .await
                .into_app_err_with(|| format!("listing next page of '{route}'"))?
            {
                Some(next_page) => page = next_page,
                None => return Ok(()),
            }
        }
    }

    /// Fetch a plain document over HTTP
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        log::debug!(target: LOG_TARGET, "Downloading '{url}'");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .into_app_err_with(|| format!("could not download '{url}'"))?
            .error_for_status()
            .into_app_err_with(|| format!("could not download '{url}'"))?;

        resp.text().await.into_app_err_with(|| format!("could not read response body from '{url}'"))
    }

    /// Get the blob hash of a file in a repository, or `None` if the file does not exist
    pub async fn file_sha(&self, owner: &str, repo: &str, path: &str) -> Result<Option<String>> {
        let route = format!("/repos/{owner}/{repo}/contents/{path}");

        match self.octocrab.get::<ContentMeta, _, ()>(&route, None).await {
            Ok(meta) => Ok(Some(meta.sha)),
            Err(octocrab::Error::GitHub { source, .. }) if source.status_code.as_u16() == 404 => {
                log::info!(target: LOG_TARGET, "File '{path}' does not exist yet in '{owner}/{repo}'");
                Ok(None)
            }
            Err(e) => Err(e).into_app_err_with(|| format!("reading '{path}' in repository '{owner}/{repo}'")),
        }
    }

    /// Create or update a file in a repository, returning the hash of the new commit
    pub async fn update_file(&self, owner: &str, repo: &str, path: &str, update: &FileUpdate<'_>) -> Result<String> {
        let route = format!("/repos/{owner}/{repo}/contents/{path}");

        let resp: FileUpdateResponse = self
            .octocrab
            .put(&route, Some(update))
            .await
            .into_app_err_with(|| format!("updating '{path}' in repository '{owner}/{repo}'"))?;

        Ok(resp.commit.sha)
    }
}
