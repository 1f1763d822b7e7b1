//! Data collection from the hosting API and the adopters document
//!
//! This module is responsible for gathering the raw facts the metrics are computed from.
//!
//! # Implementation Model
//!
//! - [`hosting::Client`] wraps the GitHub REST API: paginated listings of organization
//!   repositories, closed pull requests and closed issues, plus the contents API used
//!   for the write-back and a plain HTTP fetch for documents.
//! - [`WorkItem`] is the normalized view of a pull request or an issue. Wire models are
//!   converted into work items as soon as a page arrives and are then dropped.
//! - [`Collector`] walks every repository of the organization in sequence and feeds each
//!   work item into a [`crate::metrics::MetricsAccumulator`].
//! - [`adopters`] scrapes organization names out of a markdown table.

pub mod adopters;
mod collector;
pub mod hosting;
mod work_item;

pub use collector::{Collector, PaginationPolicy};
pub use work_item::{WorkItem, WorkItemKind};
