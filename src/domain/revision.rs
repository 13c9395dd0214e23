//! Revision inference and the idempotence guard.

use crate::boundary::SkipReason;
use crate::domain::tag::{TagCandidate, TagTemplate};
use crate::domain::version::VersionString;

/// The tag this run wants to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredTag {
    pub name: String,
    pub revision: u64,
}

/// Outcome of resolving the next tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagDecision {
    Skip(SkipReason),
    Create(DesiredTag),
}

/// Next revision number for the version.
///
/// Only a template with `{revision}` and a candidate with a parsed revision
/// continue the sequence; every other case starts at 1.
pub fn next_revision(template: &TagTemplate, candidate: Option<&TagCandidate>) -> u64 {
    match candidate {
        Some(candidate) if template.has_revision() => candidate
            .revision
            .and_then(|revision| revision.checked_add(1))
            .unwrap_or(1),
        _ => 1,
    }
}

/// Decide whether to create a tag, and which one.
///
/// Two short-circuits apply, in order: the matching tag already points at
/// `commit_sha`, then the matching tag already carries the desired name.
pub fn resolve_tag(
    template: &TagTemplate,
    version: &VersionString,
    candidate: Option<&TagCandidate>,
    commit_sha: &str,
) -> TagDecision {
    if let Some(candidate) = candidate {
        if candidate.commit_sha == commit_sha {
            return TagDecision::Skip(SkipReason::AlreadyTagged {
                tag: candidate.name.clone(),
                commit_sha: commit_sha.to_string(),
            });
        }
    }

    let revision = next_revision(template, candidate);
    let name = template.format(version.as_str(), revision);

    if let Some(candidate) = candidate {
        if candidate.name == name {
            return TagDecision::Skip(SkipReason::TagUpToDate { tag: name });
        }
    }

    TagDecision::Create(DesiredTag { name, revision })
}
