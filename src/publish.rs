//! Changelog assembly and tag/release publishing against the hosting API.

use crate::domain::{render_changelog, DesiredTag, VersionString, INITIAL_TAG_MESSAGE};
use crate::error::{Result, TaggerError};
use crate::hosting::{HostingApi, NewRelease, NewTagObject};
use crate::outputs::RunOutputs;

/// Everything needed to publish one tag
#[derive(Debug, Clone)]
pub struct PublishRequest<'a> {
    pub tag: &'a DesiredTag,
    pub version: &'a VersionString,
    pub commit_sha: &'a str,
    pub changelog: &'a str,
    /// Start the tag message with the tag name and a blank line
    pub prefix_tag_message: bool,
}

/// Build the changelog for the range `from...to`.
///
/// `from` is the most recent tag of the repository (not necessarily the one
/// matching the current version). Without both ends, or without commits in
/// between, the body is [`INITIAL_TAG_MESSAGE`].
pub fn build_changelog<H: HostingApi + ?Sized>(
    hosting: &H,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<String> {
    let (Some(from), Some(to)) = (from, to) else {
        return Ok(INITIAL_TAG_MESSAGE.to_string());
    };

    let commits = hosting
        .compare_commits(from, to)
        .map_err(TaggerError::Changelog)?;
    log::debug!("{} commits between {} and {}", commits.len(), from, to);

    Ok(render_changelog(&commits))
}

/// Annotation text for the tag object
pub fn tag_message(tag_name: &str, changelog: &str, prefix_tag_message: bool) -> String {
    if prefix_tag_message {
        format!("{}\n\n{}", tag_name, changelog)
    } else {
        changelog.to_string()
    }
}

/// Create the tag object, its `refs/tags/` reference and the release, in that order.
///
/// Each created object is recorded in `outputs` right away. A failure stops
/// immediately; objects created by earlier steps are left in place and stay
/// reported.
pub fn publish<H: HostingApi + ?Sized>(
    hosting: &H,
    request: &PublishRequest<'_>,
    outputs: &mut RunOutputs,
) -> Result<()> {
    let name = &request.tag.name;

    let tag_object = hosting
        .create_tag_object(&NewTagObject {
            tag: name.clone(),
            message: tag_message(name, request.changelog, request.prefix_tag_message),
            object_sha: request.commit_sha.to_string(),
        })
        .map_err(|source| TaggerError::TagCreation {
            tag: name.clone(),
            source,
        })?;
    log::info!("Created tag object {} for {}", tag_object.sha, name);
    outputs.tag_name = Some(name.clone());
    outputs.tag_revision = Some(request.tag.revision);
    outputs.tag_sha = Some(tag_object.sha.clone());

    let reference = format!("refs/tags/{}", name);
    let created_reference = hosting
        .create_reference(&reference, &tag_object.sha)
        .map_err(|source| TaggerError::ReferenceCreation {
            reference: reference.clone(),
            source,
        })?;
    log::info!("Created reference {}", created_reference.reference);
    outputs.tag_uri = Some(created_reference.url);

    let prerelease = request.version.is_prerelease();
    let release = hosting
        .create_release(&NewRelease {
            tag_name: name.clone(),
            name: name.clone(),
            body: request.changelog.to_string(),
            prerelease,
        })
        .map_err(|source| TaggerError::ReleaseCreation {
            tag: name.clone(),
            source,
        })?;
    log::info!("Created release {} (prerelease: {})", release.url, prerelease);
    outputs.release_uri = Some(release.url);

    Ok(())
}
