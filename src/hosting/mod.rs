//! Hosting API abstraction layer
//!
//! The tagger needs five calls from the Git hosting service: listing tags,
//! comparing two commits, and creating a tag object, a tag reference and a
//! release. They are gathered in the [HostingApi] trait so the workflow can
//! run against the real service or an in-memory double.
//!
//! - [github::GitHubApi]: GitHub REST API over `reqwest`
//! - [mock::MockHosting]: recording implementation for tests

pub mod github;
pub mod mock;

pub use github::GitHubApi;
pub use mock::{MockHosting, MockOperation};

use crate::domain::{ChangelogEntry, RemoteTag};
use crate::error::ApiResult;

/// Request for an annotated tag object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTagObject {
    /// Tag name
    pub tag: String,
    /// Annotation message
    pub message: String,
    /// Commit the tag points at
    pub object_sha: String,
}

/// Tag object as created by the hosting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTagObject {
    pub sha: String,
}

/// Reference as created by the hosting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedReference {
    /// Full reference name (e.g., "refs/tags/v1.0.0")
    pub reference: String,
    /// API URL of the reference
    pub url: String,
}

/// Request for a release bound to an existing tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelease {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub prerelease: bool,
}

/// Release as created by the hosting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRelease {
    /// Browser URL of the release page
    pub url: String,
}

/// Hosting service operations used by the tagger
///
/// Calls are blocking and never retried; any error aborts the run.
pub trait HostingApi {
    /// List up to 100 tags of the repository.
    ///
    /// Implementations must return the most recently created tag first: the
    /// tag matcher takes the first hit and the changelog starts from the first
    /// entry.
    fn list_tags(&self) -> ApiResult<Vec<RemoteTag>>;

    /// Commits reachable from `head` but not from `base`, oldest first
    fn compare_commits(&self, base: &str, head: &str) -> ApiResult<Vec<ChangelogEntry>>;

    /// Create an annotated tag object (does not create the reference)
    fn create_tag_object(&self, tag: &NewTagObject) -> ApiResult<CreatedTagObject>;

    /// Create `reference` pointing at `sha`
    fn create_reference(&self, reference: &str, sha: &str) -> ApiResult<CreatedReference>;

    /// Create a release for an existing tag
    fn create_release(&self, release: &NewRelease) -> ApiResult<CreatedRelease>;
}
