use super::{BotFilter, MetricsSummary, WeekBucket, WeeklyCadence, mean, percentile};
use crate::facts::{WorkItem, WorkItemKind};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeSet;

const MEDIAN: f64 = 50.0;

/// Mutable aggregate of everything learned from the work items of a run
#[derive(Debug)]
pub struct MetricsAccumulator {
    now: DateTime<Utc>,
    window: TimeDelta,
    bots: BotFilter,
    contributors: BTreeSet<String>,
    recent_contributors: BTreeSet<String>,
    seconds_to_close_pulls: Vec<i64>,
    seconds_to_close_issues: Vec<i64>,
    weekly: WeeklyCadence,
}

impl MetricsAccumulator {
    #[must_use]
    pub fn new(now: DateTime<Utc>, window_days: u32, bots: BotFilter) -> Self {
        Self {
            now,
            window: TimeDelta::days(i64::from(window_days)),
            bots,
            contributors: BTreeSet::new(),
            recent_contributors: BTreeSet::new(),
            seconds_to_close_pulls: Vec::new(),
            seconds_to_close_issues: Vec::new(),
            weekly: WeeklyCadence::default(),
        }
    }

    #[must_use]
    pub fn is_within_window(&self, item: &WorkItem) -> bool {
        item.is_within_window(self.now, self.window)
    }

    /// Fold one work item into the accumulated facts
    pub fn record(&mut self, item: &WorkItem) {
        let bucket = WeekBucket::of(item.created_at);
        let in_window = self.is_within_window(item);

        if item.kind == WorkItemKind::PullRequest {
            self.weekly.record_pull(bucket);
        }

        if in_window && let Some(seconds) = item.seconds_to_close() {
            match item.kind {
                WorkItemKind::PullRequest => self.seconds_to_close_pulls.push(seconds),
                WorkItemKind::Issue => self.seconds_to_close_issues.push(seconds),
            }
        }

        if let Some(login) = item.author.as_deref()
            && !self.bots.is_bot(login)
        {
            self.weekly.record_contributor(bucket, login);

            let set = if in_window {
                &mut self.recent_contributors
            } else {
                &mut self.contributors
            };
            let _ = set.insert(login.to_string());
        }
    }

    #[must_use]
    pub fn seconds_to_close_pulls(&self) -> &[i64] {
        &self.seconds_to_close_pulls
    }

    #[must_use]
    pub fn seconds_to_close_issues(&self) -> &[i64] {
        &self.seconds_to_close_issues
    }

    #[must_use]
    pub const fn weekly(&self) -> &WeeklyCadence {
        &self.weekly
    }

    /// Compute the summary statistics
    ///
    /// Contributors seen both inside and before the window are kept only as historical
    /// contributors, so the two name lists of the summary never overlap.
    #[must_use]
    pub fn finalize(self, adopters: Vec<String>) -> MetricsSummary {
        let recent: Vec<String> = self
            .recent_contributors
            .into_iter()
            .filter(|name| !self.contributors.contains(name))
            .collect();

        let pull_counts = self.weekly.pull_counts();
        let contributor_counts = self.weekly.new_contributor_counts();

        MetricsSummary {
            names_of_adopters: adopters,
            names_of_contributors: self.contributors.into_iter().collect(),
            names_of_contributors_new: recent,
            number_of_pull_request_new: self.seconds_to_close_pulls.len() as u64,
            p50_number_of_new_pulls_per_week: percentile(&pull_counts, MEDIAN),
            p50_number_of_new_contributors_per_week: percentile(&contributor_counts, MEDIAN),
            p50_seconds_to_close_pulls: percentile(&self.seconds_to_close_pulls, MEDIAN),
            p50_seconds_to_close_issues: percentile(&self.seconds_to_close_issues, MEDIAN),
            mean_number_of_new_pulls_per_week: mean(&pull_counts),
            mean_number_of_new_contributors_per_week: mean(&contributor_counts),
            mean_seconds_to_close_pulls: mean(&self.seconds_to_close_pulls),
            mean_seconds_to_close_issues: mean(&self.seconds_to_close_issues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn item(kind: WorkItemKind, created: &str, closed: Option<&str>, author: Option<&str>) -> WorkItem {
        WorkItem {
            kind,
            repository: Arc::from("widgets"),
            created_at: ts(created),
            closed_at: closed.map(ts),
            author: author.map(str::to_string),
        }
    }

    fn accumulator() -> MetricsAccumulator {
        MetricsAccumulator::new(ts("2023-01-15T00:00:00Z"), 30, BotFilter::new(["snyk-bot"]))
    }

    #[test]
    fn test_single_pull_one_hour() {
        let mut acc = accumulator();
        acc.record(&item(
            WorkItemKind::PullRequest,
            "2023-01-01T00:00:00Z",
            Some("2023-01-01T01:00:00Z"),
            Some("octocat"),
        ));

        assert_eq!(acc.seconds_to_close_pulls(), &[3600]);

        let summary = acc.finalize(Vec::new());
        assert_eq!(summary.p50_seconds_to_close_pulls, Some(3600));
        assert!((summary.mean_seconds_to_close_pulls.unwrap() - 3600.0).abs() < f64::EPSILON);
        assert_eq!(summary.number_of_pull_request_new, 1);
    }

    #[test]
    fn test_out_of_window_items_have_no_duration_sample() {
        let mut acc = accumulator();
        acc.record(&item(
            WorkItemKind::PullRequest,
            "2022-06-01T00:00:00Z",
            Some("2022-06-02T00:00:00Z"),
            Some("octocat"),
        ));
        acc.record(&item(WorkItemKind::Issue, "2022-06-01T00:00:00Z", Some("2022-06-03T00:00:00Z"), None));

        assert!(acc.seconds_to_close_pulls().is_empty());
        assert!(acc.seconds_to_close_issues().is_empty());
        assert_eq!(acc.weekly().pull_counts(), vec![1]);
    }

    #[test]
    fn test_unclosed_items_have_no_duration_sample() {
        let mut acc = accumulator();
        acc.record(&item(WorkItemKind::Issue, "2023-01-10T00:00:00Z", None, Some("octocat")));
        assert!(acc.seconds_to_close_issues().is_empty());
    }

    #[test]
    fn test_no_issues_yields_none() {
        let mut acc = accumulator();
        acc.record(&item(
            WorkItemKind::PullRequest,
            "2023-01-10T00:00:00Z",
            Some("2023-01-11T00:00:00Z"),
            Some("octocat"),
        ));

        let summary = acc.finalize(Vec::new());
        assert_eq!(summary.p50_seconds_to_close_issues, None);
        assert_eq!(summary.mean_seconds_to_close_issues, None);
    }

    #[test]
    fn test_contributor_reconciliation() {
        let mut acc = accumulator();
        // veteran contributes before and during the window
        acc.record(&item(WorkItemKind::PullRequest, "2022-01-10T00:00:00Z", None, Some("veteran")));
        acc.record(&item(WorkItemKind::PullRequest, "2023-01-10T00:00:00Z", None, Some("veteran")));
        // newcomer only during the window
        acc.record(&item(WorkItemKind::Issue, "2023-01-12T00:00:00Z", None, Some("newcomer")));
        // retired only before the window
        acc.record(&item(WorkItemKind::Issue, "2021-03-01T00:00:00Z", None, Some("retired")));

        let summary = acc.finalize(Vec::new());
        assert_eq!(summary.names_of_contributors, vec!["retired".to_string(), "veteran".to_string()]);
        assert_eq!(summary.names_of_contributors_new, vec!["newcomer".to_string()]);

        for name in &summary.names_of_contributors_new {
            assert!(!summary.names_of_contributors.contains(name));
        }
    }

    #[test]
    fn test_bots_are_never_contributors() {
        let mut acc = accumulator();
        acc.record(&item(WorkItemKind::PullRequest, "2023-01-10T00:00:00Z", None, Some("dependabot[bot]")));
        acc.record(&item(WorkItemKind::PullRequest, "2022-01-10T00:00:00Z", None, Some("snyk-bot")));
        acc.record(&item(WorkItemKind::Issue, "2023-01-10T00:00:00Z", None, Some("renovate[bot]")));

        assert_eq!(acc.weekly().new_contributor_counts(), Vec::<u64>::new());

        let summary = acc.finalize(Vec::new());
        assert!(summary.names_of_contributors.is_empty());
        assert!(summary.names_of_contributors_new.is_empty());
        // bot pull requests still count toward weekly pull cadence
        assert_eq!(summary.p50_number_of_new_pulls_per_week, Some(1));
    }

    #[test]
    fn test_weekly_cadence_statistics() {
        let mut acc = accumulator();
        acc.record(&item(WorkItemKind::PullRequest, "2023-01-02T00:00:00Z", None, Some("a")));
        acc.record(&item(WorkItemKind::PullRequest, "2023-01-03T00:00:00Z", None, Some("b")));
        acc.record(&item(WorkItemKind::PullRequest, "2023-01-04T00:00:00Z", None, Some("c")));
        acc.record(&item(WorkItemKind::PullRequest, "2023-01-09T00:00:00Z", None, Some("a")));

        let summary = acc.finalize(Vec::new());
        assert_eq!(summary.p50_number_of_new_pulls_per_week, Some(1));
        assert!((summary.mean_number_of_new_pulls_per_week.unwrap() - 2.0).abs() < f64::EPSILON);
        assert_eq!(summary.p50_number_of_new_contributors_per_week, Some(0));
        assert!((summary.mean_number_of_new_contributors_per_week.unwrap() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_anonymous_items_still_sampled() {
        let mut acc = accumulator();
        acc.record(&item(WorkItemKind::Issue, "2023-01-10T00:00:00Z", Some("2023-01-10T00:10:00Z"), None));
        assert_eq!(acc.seconds_to_close_issues(), &[600]);

        let summary = acc.finalize(Vec::new());
        assert!(summary.names_of_contributors_new.is_empty());
    }

    #[test]
    fn test_adopters_pass_through() {
        let summary = accumulator().finalize(vec!["Acme Corp".to_string()]);
        assert_eq!(summary.names_of_adopters, vec!["Acme Corp".to_string()]);
        assert_eq!(summary.p50_number_of_new_pulls_per_week, None);
        assert_eq!(summary.number_of_pull_request_new, 0);
    }
}
