use chrono::{DateTime, Datelike, Utc};
use core::fmt;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// ISO year and week number an item was created in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekBucket {
    pub year: i32,
    pub week: u32,
}

impl WeekBucket {
    #[must_use]
    pub fn of(ts: DateTime<Utc>) -> Self {
        let week = ts.iso_week();
        Self {
            year: week.year(),
            week: week.week(),
        }
    }
}

impl fmt::Display for WeekBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.year, self.week)
    }
}

/// Per-week pull request counts and first-time contributors.
///
/// A contributor belongs to the bucket it was first recorded in; later sightings still
/// open their bucket but never add the contributor again.
#[derive(Debug, Default)]
pub struct WeeklyCadence {
    pulls: BTreeMap<WeekBucket, u64>,
    new_contributors: BTreeMap<WeekBucket, BTreeSet<String>>,
    seen: HashSet<String>,
}

impl WeeklyCadence {
    pub fn record_pull(&mut self, bucket: WeekBucket) {
        *self.pulls.entry(bucket).or_default() += 1;
    }

    pub fn record_contributor(&mut self, bucket: WeekBucket, login: &str) {
        let contributors = self.new_contributors.entry(bucket).or_default();
        if self.seen.insert(login.to_string()) {
            let _ = contributors.insert(login.to_string());
        }
    }

    /// Number of pull requests created in each week that has any
    #[must_use]
    pub fn pull_counts(&self) -> Vec<u64> {
        self.pulls.values().copied().collect()
    }

    /// Number of first-time contributors in each week that saw any contributor
    #[must_use]
    pub fn new_contributor_counts(&self) -> Vec<u64> {
        self.new_contributors.values().map(|c| c.len() as u64).collect()
    }

    #[must_use]
    pub fn new_contributors_in(&self, bucket: WeekBucket) -> Option<&BTreeSet<String>> {
        self.new_contributors.get(&bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(s: &str) -> WeekBucket {
        WeekBucket::of(DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc))
    }

    #[test]
    fn test_bucket_uses_iso_year() {
        // January 1st 2023 is a Sunday, so it belongs to the last ISO week of 2022
        let b = bucket("2023-01-01T00:00:00Z");
        assert_eq!(b, WeekBucket { year: 2022, week: 52 });
        assert_eq!(b.to_string(), "2022:52");

        assert_eq!(bucket("2023-01-02T00:00:00Z"), WeekBucket { year: 2023, week: 1 });
    }

    #[test]
    fn test_pull_counts() {
        let mut cadence = WeeklyCadence::default();
        let w1 = bucket("2023-01-02T00:00:00Z");
        let w2 = bucket("2023-01-09T00:00:00Z");

        cadence.record_pull(w1);
        cadence.record_pull(w1);
        cadence.record_pull(w2);

        assert_eq!(cadence.pull_counts(), vec![2, 1]);
    }

    #[test]
    fn test_first_seen_bucket_wins() {
        let mut cadence = WeeklyCadence::default();
        let w1 = bucket("2023-01-02T00:00:00Z");
        let w2 = bucket("2023-01-09T00:00:00Z");

        cadence.record_contributor(w2, "octocat");
        cadence.record_contributor(w1, "octocat");
        cadence.record_contributor(w1, "hubot");

        assert!(cadence.new_contributors_in(w2).unwrap().contains("octocat"));
        assert!(!cadence.new_contributors_in(w1).unwrap().contains("octocat"));
        assert!(cadence.new_contributors_in(w1).unwrap().contains("hubot"));
        assert_eq!(cadence.new_contributor_counts(), vec![1, 1]);
    }

    #[test]
    fn test_repeat_contributor_opens_empty_bucket() {
        let mut cadence = WeeklyCadence::default();
        let w1 = bucket("2023-01-02T00:00:00Z");
        let w2 = bucket("2023-01-09T00:00:00Z");

        cadence.record_contributor(w1, "octocat");
        cadence.record_contributor(w2, "octocat");

        assert_eq!(cadence.new_contributor_counts(), vec![1, 0]);
    }
}
