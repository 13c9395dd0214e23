use crate::error::{Result, TaggerError};
use regex::Regex;

pub const VERSION_PLACEHOLDER: &str = "{version}";
pub const REVISION_PLACEHOLDER: &str = "{revision}";

/// A tag as listed by the hosting API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTag {
    pub name: String,
    pub commit_sha: String,
}

impl RemoteTag {
    pub fn new(name: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        RemoteTag {
            name: name.into(),
            commit_sha: commit_sha.into(),
        }
    }
}

/// An existing tag whose name matched the template for the current version.
///
/// `revision` is only present when the template carries `{revision}` and the
/// matched name held a parsable decimal in that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCandidate {
    pub name: String,
    pub commit_sha: String,
    pub revision: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Version,
    Revision,
}

/// Tag naming template (e.g., "v{version}", "release-{version}-{revision}")
///
/// The template is split into literal text and placeholders once, so both
/// formatting and matching work on fields instead of raw regex source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl TagTemplate {
    /// Parse a template, requiring one or more `{version}` and at most one `{revision}`
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = template;

        while !rest.is_empty() {
            let next = [
                (VERSION_PLACEHOLDER, Segment::Version),
                (REVISION_PLACEHOLDER, Segment::Revision),
            ]
            .into_iter()
            .filter_map(|(placeholder, segment)| {
                rest.find(placeholder)
                    .map(|index| (index, placeholder, segment))
            })
            .min_by_key(|(index, _, _)| *index);

            match next {
                Some((index, placeholder, segment)) => {
                    if index > 0 {
                        segments.push(Segment::Literal(rest[..index].to_string()));
                    }
                    segments.push(segment);
                    rest = &rest[index + placeholder.len()..];
                }
                None => {
                    segments.push(Segment::Literal(rest.to_string()));
                    break;
                }
            }
        }

        if !segments.contains(&Segment::Version) {
            return Err(TaggerError::invalid_pattern(format!(
                "tag format '{}' must contain {}",
                template, VERSION_PLACEHOLDER
            )));
        }

        let revisions = segments
            .iter()
            .filter(|segment| **segment == Segment::Revision)
            .count();
        if revisions > 1 {
            return Err(TaggerError::invalid_pattern(format!(
                "tag format '{}' may contain {} at most once",
                template, REVISION_PLACEHOLDER
            )));
        }

        Ok(TagTemplate {
            source: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn has_revision(&self) -> bool {
        self.segments.contains(&Segment::Revision)
    }

    /// Render a tag name from the template
    /// Example: template="v{version}-{revision}", version="1.2.3", revision=2 -> "v1.2.3-2"
    pub fn format(&self, version: &str, revision: u64) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Version => version.to_string(),
                Segment::Revision => revision.to_string(),
            })
            .collect()
    }

    /// Build a case-insensitive, fully anchored matcher for tags of `version`
    pub fn matcher(&self, version: &str) -> Result<TagMatcher> {
        let mut source = String::from("^");
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => source.push_str(&regex::escape(&text.to_lowercase())),
                Segment::Version => source.push_str(&regex::escape(&version.to_lowercase())),
                Segment::Revision => source.push_str(r"(?P<revision>[0-9]+)"),
            }
        }
        source.push('$');

        let regex = Regex::new(&source)
            .map_err(|e| TaggerError::invalid_pattern(format!("tag matcher: {}", e)))?;

        Ok(TagMatcher { regex })
    }
}

/// Compiled matcher for the tags of one version
#[derive(Debug, Clone)]
pub struct TagMatcher {
    regex: Regex,
}

impl TagMatcher {
    /// Check a single tag name; `Some(revision)` when it matches.
    pub fn match_name(&self, name: &str) -> Option<Option<u64>> {
        let normalized = name.trim().to_lowercase();
        let captures = self.regex.captures(&normalized)?;

        Some(
            captures
                .name("revision")
                .and_then(|m| m.as_str().parse::<u64>().ok()),
        )
    }

    /// First matching tag in list order.
    ///
    /// The hosting API lists tags most recent first, so this is the latest
    /// tag for the version.
    pub fn find(&self, tags: &[RemoteTag]) -> Option<TagCandidate> {
        tags.iter().find_map(|tag| {
            self.match_name(&tag.name).map(|revision| TagCandidate {
                name: tag.name.clone(),
                commit_sha: tag.commit_sha.clone(),
                revision,
            })
        })
    }
}
