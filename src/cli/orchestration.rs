//! Main workflow orchestration logic
//!
//! Runs the tagging pipeline from the extracted version to the published
//! release. CLI parsing stays in main.rs so the workflow can be driven
//! programmatically against any [HostingApi].

use crate::boundary::SkipReason;
use crate::config::Inputs;
use crate::context::ActionContext;
use crate::domain::{extract_version, resolve_tag, TagDecision, TagTemplate};
use crate::error::{Result, TaggerError};
use crate::hosting::HostingApi;
use crate::outputs::RunOutputs;
use crate::publish::{build_changelog, publish, PublishRequest};

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Why nothing was created, if the run stopped early
    pub skipped: Option<SkipReason>,

    /// Existing tag the new one follows, if any
    pub previous_tag: Option<String>,
}

impl WorkflowResult {
    fn skipped(reason: SkipReason) -> Self {
        WorkflowResult {
            skipped: Some(reason),
            previous_tag: None,
        }
    }
}

/// Main tagging workflow
///
/// 1. Extract the version from the source file (stop on "0", "0.0", "0.0.0")
/// 2. List tags and find the latest one matching the template for the version
/// 3. Resolve the revision and stop if the tag already exists
/// 4. Build the changelog since the most recent tag
/// 5. Create the tag object, its reference and the release
///
/// Values for later CI steps are recorded in `outputs` as soon as they are
/// known, so they are available to the caller whether or not the run succeeds.
///
/// # Errors
/// Any failure ends the run at the failing step; nothing already created is undone.
pub fn run_tag_workflow<H: HostingApi + ?Sized>(
    inputs: &Inputs,
    context: &ActionContext,
    hosting: &H,
    outputs: &mut RunOutputs,
) -> Result<WorkflowResult> {
    let template = TagTemplate::parse(&inputs.tag_format)?;

    let version = extract_version(&inputs.source_file, &inputs.version_pattern)?;
    log::info!(
        "Found version {} in {}",
        version,
        inputs.source_file.display()
    );
    outputs.version = Some(version.to_string());

    if version.is_unreleased() {
        return Ok(WorkflowResult::skipped(SkipReason::UnreleasedVersion {
            version: version.to_string(),
        }));
    }

    let commit_sha = context
        .commit_sha
        .as_deref()
        .ok_or(TaggerError::MissingCommit)?;

    let tags = hosting.list_tags().map_err(TaggerError::TagFetch)?;
    log::debug!("Fetched {} tags from {}", tags.len(), context.repository);

    let candidate = template.matcher(version.as_str())?.find(&tags);
    match &candidate {
        Some(candidate) => log::info!(
            "Latest tag for {} is {} at {}",
            version,
            candidate.name,
            candidate.commit_sha
        ),
        None => log::info!("No existing tag matches '{}'", template.as_str()),
    }

    let desired = match resolve_tag(&template, &version, candidate.as_ref(), commit_sha) {
        TagDecision::Skip(reason) => return Ok(WorkflowResult::skipped(reason)),
        TagDecision::Create(desired) => desired,
    };
    log::info!("Creating tag {} (revision {})", desired.name, desired.revision);

    let latest_tag = tags.first().map(|tag| tag.name.as_str());
    let changelog = build_changelog(hosting, latest_tag, Some(commit_sha))?;

    publish(
        hosting,
        &PublishRequest {
            tag: &desired,
            version: &version,
            commit_sha,
            changelog: &changelog,
            prefix_tag_message: inputs.prefix_tag_message,
        },
        outputs,
    )?;

    Ok(WorkflowResult {
        skipped: None,
        previous_tag: candidate.map(|candidate| candidate.name),
    })
}
