//! Commit the metrics summary back to a repository
//!
//! The summary is written through the contents API: the current blob hash of the target
//! file is looked up first and passed along with the new content, so the write replaces
//! that exact version. If the file does not exist yet it is created.

use crate::Result;
use crate::config::Config;
use crate::facts::hosting::{Client, FileUpdate};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ohno::EnrichableExt;

const LOG_TARGET: &str = "   publish";

/// Create or replace the configured metrics file with `json`
pub async fn publish_summary(client: &Client, config: &Config, json: &str) -> Result<()> {
    let owner = &config.organization;
    let repo = &config.repository;
    let path = &config.metrics_path;

    log::info!(target: LOG_TARGET, "Committing '{path}' to '{owner}/{repo}'");

    let sha = client.file_sha(owner, repo, path).await?;
    let update = FileUpdate {
        message: &config.commit_message,
        content: STANDARD.encode(json),
        sha,
        committer: &config.committer,
    };

    let commit = client
        .update_file(owner, repo, path, &update)
        .await
        .map_err(|e| e.enrich("could not commit metrics summary"))?;

    log::info!(target: LOG_TARGET, "Committed metrics summary as {commit}");
    Ok(())
}
