use super::hosting::{Issue, PullRequest};
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;

/// Whether a work item is a pull request or an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkItemKind {
    PullRequest,
    Issue,
}

/// A pull request or an issue, reduced to the facts the metrics need
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub kind: WorkItemKind,
    pub repository: Arc<str>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub author: Option<String>,
}

impl WorkItem {
    #[must_use]
    pub fn from_pull(repository: &Arc<str>, pull: PullRequest) -> Self {
        Self {
            kind: WorkItemKind::PullRequest,
            repository: Arc::clone(repository),
            created_at: pull.created_at,
            closed_at: pull.closed_at,
            author: pull.user.map(|u| u.login),
        }
    }

    /// Convert an issue listing entry, or `None` if the entry is really a pull request
    #[must_use]
    pub fn from_issue(repository: &Arc<str>, issue: Issue) -> Option<Self> {
        if issue.pull_request.is_some() {
            return None;
        }

        Some(Self {
            kind: WorkItemKind::Issue,
            repository: Arc::clone(repository),
            created_at: issue.created_at,
            closed_at: issue.closed_at,
            author: issue.user.map(|u| u.login),
        })
    }

    /// Seconds from creation to close.
    ///
    /// Returns `None` if the item is not closed, or if the timestamps are inverted.
    #[must_use]
    pub fn seconds_to_close(&self) -> Option<i64> {
        let seconds = (self.closed_at? - self.created_at).num_seconds();
        (seconds >= 0).then_some(seconds)
    }

    /// Whether the item was created less than `window` before `now`
    #[must_use]
    pub fn is_within_window(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        now - self.created_at < window
    }
}
