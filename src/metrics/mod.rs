//! Metric accumulation and summary statistics
//!
//! [`MetricsAccumulator`] is created empty at the start of a run, receives every
//! [`crate::facts::WorkItem`] once, and is consumed by [`MetricsAccumulator::finalize`]
//! to produce the immutable [`MetricsSummary`] that gets serialized.

mod accumulator;
mod bot_filter;
mod stats;
mod summary;
mod weekly;

pub use accumulator::MetricsAccumulator;
pub use bot_filter::BotFilter;
pub use stats::{Sample, mean, percentile};
pub use summary::MetricsSummary;
pub use weekly::{WeekBucket, WeeklyCadence};
