mod client;
mod models;

pub use client::{Client, Direction, ListParams};
pub use models::{FileUpdate, Issue, PullRequest, Repository, User};
