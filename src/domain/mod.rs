//! Domain logic - pure decision and naming rules independent of the hosting API

pub mod changelog;
pub mod revision;
pub mod tag;
pub mod version;

pub use changelog::{render_changelog, ChangelogEntry, INITIAL_TAG_MESSAGE};
pub use revision::{next_revision, resolve_tag, DesiredTag, TagDecision};
pub use tag::{RemoteTag, TagCandidate, TagMatcher, TagTemplate};
pub use version::{extract_version, VersionString};
