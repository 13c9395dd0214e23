use crate::domain::{ChangelogEntry, RemoteTag};
use crate::error::{ApiError, ApiResult};
use crate::hosting::{
    CreatedReference, CreatedRelease, CreatedTagObject, HostingApi, NewRelease, NewTagObject,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Hosting API operations, as recorded by [MockHosting]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    ListTags,
    CompareCommits,
    CreateTagObject,
    CreateReference,
    CreateRelease,
}

/// Mock hosting service for testing without network access
#[derive(Default)]
pub struct MockHosting {
    tags: Vec<RemoteTag>,
    comparisons: HashMap<(String, String), Vec<ChangelogEntry>>,
    failing: Option<MockOperation>,
    calls: Mutex<Vec<MockOperation>>,
    tag_objects: Mutex<Vec<NewTagObject>>,
    references: Mutex<Vec<(String, String)>>,
    releases: Mutex<Vec<NewRelease>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHosting {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag; tags are listed in insertion order, so add the most recent first
    pub fn add_tag(&mut self, name: impl Into<String>, commit_sha: impl Into<String>) {
        self.tags.push(RemoteTag::new(name, commit_sha));
    }

    /// Register the commits returned when comparing `base...head`
    pub fn add_comparison(
        &mut self,
        base: impl Into<String>,
        head: impl Into<String>,
        commits: Vec<ChangelogEntry>,
    ) {
        self.comparisons.insert((base.into(), head.into()), commits);
    }

    /// Make `operation` fail with a server error
    pub fn fail_on(&mut self, operation: MockOperation) {
        self.failing = Some(operation);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<MockOperation> {
        lock(&self.calls).clone()
    }

    pub fn created_tag_objects(&self) -> Vec<NewTagObject> {
        lock(&self.tag_objects).clone()
    }

    /// Created references as `(reference, sha)` pairs
    pub fn created_references(&self) -> Vec<(String, String)> {
        lock(&self.references).clone()
    }

    pub fn created_releases(&self) -> Vec<NewRelease> {
        lock(&self.releases).clone()
    }

    fn record(&self, operation: MockOperation) -> ApiResult<()> {
        lock(&self.calls).push(operation);
        if self.failing == Some(operation) {
            return Err(ApiError::status(
                500,
                format!("{:?} failed (injected)", operation),
            ));
        }
        Ok(())
    }
}

impl HostingApi for MockHosting {
    fn list_tags(&self) -> ApiResult<Vec<RemoteTag>> {
        self.record(MockOperation::ListTags)?;
        Ok(self.tags.clone())
    }

    fn compare_commits(&self, base: &str, head: &str) -> ApiResult<Vec<ChangelogEntry>> {
        self.record(MockOperation::CompareCommits)?;
        Ok(self
            .comparisons
            .get(&(base.to_string(), head.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn create_tag_object(&self, tag: &NewTagObject) -> ApiResult<CreatedTagObject> {
        self.record(MockOperation::CreateTagObject)?;
        let mut tag_objects = lock(&self.tag_objects);
        tag_objects.push(tag.clone());
        Ok(CreatedTagObject {
            sha: format!("tag-object-{}", tag_objects.len()),
        })
    }

    fn create_reference(&self, reference: &str, sha: &str) -> ApiResult<CreatedReference> {
        self.record(MockOperation::CreateReference)?;
        lock(&self.references).push((reference.to_string(), sha.to_string()));
        Ok(CreatedReference {
            reference: reference.to_string(),
            url: format!("https://api.example.test/git/{}", reference),
        })
    }

    fn create_release(&self, release: &NewRelease) -> ApiResult<CreatedRelease> {
        self.record(MockOperation::CreateRelease)?;
        lock(&self.releases).push(release.clone());
        Ok(CreatedRelease {
            url: format!("https://example.test/releases/tag/{}", release.tag_name),
        })
    }
}
