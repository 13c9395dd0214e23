use std::fmt;

/// Conditions under which a run ends successfully without creating anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The source file declares a "not released yet" version
    UnreleasedVersion { version: String },
    /// A matching tag already points at the current commit
    AlreadyTagged { tag: String, commit_sha: String },
    /// The tag that would be created already exists
    TagUpToDate { tag: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnreleasedVersion { version } => {
                write!(f, "Version '{}' is not released yet", version)
            }
            SkipReason::AlreadyTagged { tag, commit_sha } => {
                // First 7 characters; the SHA comes from the environment and may not be ASCII
                let short_sha = match commit_sha.char_indices().nth(7) {
                    Some((end, _)) => &commit_sha[..end],
                    None => commit_sha.as_str(),
                };
                write!(
                    f,
                    "Tag '{}' already points at the current commit ({})",
                    tag, short_sha
                )
            }
            SkipReason::TagUpToDate { tag } => {
                write!(f, "Tag '{}' already exists", tag)
            }
        }
    }
}
