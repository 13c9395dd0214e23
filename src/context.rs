//! Ambient execution context supplied by the CI runner.

use crate::error::TaggerError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository identity in "owner/name" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(RepoSlug {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(TaggerError::config(format!(
                "Invalid repository '{}' - expected owner/name",
                s
            ))),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Where and on what the run operates
#[derive(Debug, Clone, PartialEq)]
pub struct ActionContext {
    pub repository: RepoSlug,
    /// Commit being tagged; `None` when the runner did not provide one
    pub commit_sha: Option<String>,
    pub api_url: String,
    /// File that receives run outputs (`GITHUB_OUTPUT`)
    pub output_file: Option<PathBuf>,
}

impl ActionContext {
    pub fn new(
        repository: RepoSlug,
        commit_sha: Option<String>,
        api_url: impl Into<String>,
        output_file: Option<PathBuf>,
    ) -> Self {
        let commit_sha = commit_sha
            .map(|sha| sha.trim().to_string())
            .filter(|sha| !sha.is_empty());

        ActionContext {
            repository,
            commit_sha,
            api_url: api_url.into(),
            output_file,
        }
    }
}
