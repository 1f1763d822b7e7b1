use super::WorkItem;
use super::hosting::{Client, Direction, Issue, ListParams, PullRequest, Repository};
use crate::Result;
use crate::metrics::MetricsAccumulator;
use core::ops::ControlFlow;
use std::sync::Arc;

const LOG_TARGET: &str = " collector";

/// How far back pull requests and issues are paginated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationPolicy {
    /// Oldest first, every page. Required for historical contributors and weekly cadence.
    #[default]
    Full,

    /// Newest first, stopping at the first item outside the trailing window
    RecentOnly,
}

impl PaginationPolicy {
    const fn direction(self) -> Direction {
        match self {
            Self::Full => Direction::Asc,
            Self::RecentOnly => Direction::Desc,
        }
    }
}

/// Walks an organization's repositories and feeds every closed pull request and issue
/// into an accumulator.
///
/// Repositories, resource types and pages are processed strictly one after the other.
#[derive(Debug)]
pub struct Collector<'a> {
    client: &'a Client,
    organization: &'a str,
    policy: PaginationPolicy,
}

impl<'a> Collector<'a> {
    #[must_use]
    pub const fn new(client: &'a Client, organization: &'a str, policy: PaginationPolicy) -> Self {
        Self {
            client,
            organization,
            policy,
        }
    }

    /// Collect facts from every repository of the organization
    pub async fn collect(&self, accumulator: &mut MetricsAccumulator) -> Result<()> {
        let mut repositories = Vec::new();
        self.client
            .paginate::<Repository, _>(&format!("/orgs/{}/repos", self.organization), &ListParams::all(), |page| {
                repositories.extend(page.into_iter().map(|repo| repo.name));
                ControlFlow::Continue(())
            })
            .await?;

        log::info!(target: LOG_TARGET, "Found {} repositories in '{}'", repositories.len(), self.organization);

        for name in repositories {
            log::info!(target: LOG_TARGET, "Processing repo: {name}");

            let repository: Arc<str> = Arc::from(name);
            self.collect_pulls(&repository, accumulator).await?;
            self.collect_issues(&repository, accumulator).await?;
        }

        Ok(())
    }

    async fn collect_pulls(&self, repository: &Arc<str>, accumulator: &mut MetricsAccumulator) -> Result<()> {
        let route = format!("/repos/{}/{repository}/pulls", self.organization);
        let params = ListParams::closed_by_creation(self.policy.direction());

        self.client
            .paginate::<PullRequest, _>(&route, &params, |pulls| {
                log::info!(target: LOG_TARGET, "Processing pulls: {}", pulls.len());
                self.record_page(pulls.into_iter().map(|pull| WorkItem::from_pull(repository, pull)), accumulator)
            })
            .await
    }

    async fn collect_issues(&self, repository: &Arc<str>, accumulator: &mut MetricsAccumulator) -> Result<()> {
        let route = format!("/repos/{}/{repository}/issues", self.organization);
        let params = ListParams::closed_by_creation(self.policy.direction());

        self.client
            .paginate::<Issue, _>(&route, &params, |issues| {
                log::info!(target: LOG_TARGET, "Processing issues: {}", issues.len());
                self.record_page(
                    issues.into_iter().filter_map(|issue| WorkItem::from_issue(repository, issue)),
                    accumulator,
                )
            })
            .await
    }

    /// Record one page of items, signalling when pagination can stop
    fn record_page(&self, items: impl Iterator<Item = WorkItem>, accumulator: &mut MetricsAccumulator) -> ControlFlow<()> {
        for item in items {
            if self.policy == PaginationPolicy::RecentOnly && !accumulator.is_within_window(&item) {
                log::debug!(target: LOG_TARGET, "Reached items older than the window in '{}'", item.repository);
                return ControlFlow::Break(());
            }

            accumulator.record(&item);
        }

        ControlFlow::Continue(())
    }
}
