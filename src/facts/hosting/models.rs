//! Minimal GitHub API models with only the fields we need

use crate::config::Committer;
use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// Repository entry from the organization listing
#[derive(Debug, Deserialize)]
pub struct Repository {
    pub name: String,
}

/// Account that opened a pull request or issue
#[derive(Debug, Deserialize)]
pub struct User {
    pub login: String,
}

/// Pull request entry from the pulls listing
#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub user: Option<User>,
}

/// Issue entry from the issues listing.
///
/// GitHub returns pull requests from the issues endpoint too; those carry a `pull_request` object.
#[derive(Debug, Deserialize)]
pub struct Issue {
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub user: Option<User>,
    pub pull_request: Option<IgnoredAny>,
}

/// Metadata of a file fetched through the contents API
#[derive(Debug, Deserialize)]
pub(super) struct ContentMeta {
    pub sha: String,
}

/// Body of a "create or update file contents" request
#[derive(Debug, Serialize)]
pub struct FileUpdate<'a> {
    pub message: &'a str,

    /// Base64-encoded file content
    pub content: String,

    /// Blob hash of the file being replaced; absent when creating the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,

    pub committer: &'a Committer,
}

#[derive(Debug, Deserialize)]
pub(super) struct FileUpdateResponse {
    pub commit: CommitRef,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommitRef {
    pub sha: String,
}
