use crate::error::{Result, TaggerError};
use regex::RegexBuilder;
use std::fmt;
use std::fs;
use std::path::Path;

/// Versions that mean "not released yet"; nothing is tagged for these.
const UNRELEASED_VERSIONS: [&str; 3] = ["0", "0.0", "0.0.0"];

/// Raw version text captured from the source file.
///
/// No structure is assumed beyond being embeddable in a tag template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionString(String);

impl VersionString {
    pub fn new(version: impl Into<String>) -> Self {
        VersionString(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the "0", "0.0" and "0.0.0" sentinels
    pub fn is_unreleased(&self) -> bool {
        UNRELEASED_VERSIONS.contains(&self.0.as_str())
    }

    /// Whether a release for this version should be flagged as a prerelease.
    ///
    /// Semantic versions with major `0` or a prerelease component qualify.
    /// Anything that does not parse as a semantic version is a regular release.
    pub fn is_prerelease(&self) -> bool {
        match semver::Version::parse(&self.0) {
            Ok(version) => version.major == 0 || !version.pre.is_empty(),
            Err(_) => false,
        }
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads `path` and extracts the `version` capture group of `pattern`.
///
/// The pattern is compiled in multi-line mode so `^` and `$` anchor to lines.
///
/// # Errors
/// * `MissingFile` - `path` does not exist
/// * `InvalidPattern` - `pattern` is not a valid regular expression
/// * `PatternNotFound` - the pattern does not match the file contents
/// * `MissingCaptureGroup` - the match carries no `version` group
pub fn extract_version(path: &Path, pattern: &str) -> Result<VersionString> {
    if !path.exists() {
        return Err(TaggerError::MissingFile(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;

    let regex = RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(|e| TaggerError::invalid_pattern(format!("version pattern: {}", e)))?;

    let captures = regex
        .captures(&contents)
        .ok_or_else(|| TaggerError::PatternNotFound(path.to_path_buf()))?;

    let version = captures
        .name("version")
        .ok_or(TaggerError::MissingCaptureGroup)?;

    Ok(VersionString::new(version.as_str()))
}
