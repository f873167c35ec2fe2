//! Source checkout management.

pub mod git;

pub use git::{GitError, GitResult, SourceFetcher};
