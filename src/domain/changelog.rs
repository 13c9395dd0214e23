/// Body used when there is no earlier tag or no commits to list
pub const INITIAL_TAG_MESSAGE: &str = "Initial tag";

/// One commit in the comparison range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub message: String,
    pub author_login: Option<String>,
}

impl ChangelogEntry {
    pub fn new(message: impl Into<String>, author_login: Option<&str>) -> Self {
        ChangelogEntry {
            message: message.into(),
            author_login: author_login.map(str::to_string),
        }
    }

    fn render(&self) -> String {
        match &self.author_login {
            Some(login) => format!("* {} ({})", self.message, login),
            None => format!("* {}", self.message),
        }
    }
}

/// Render entries as a bullet list, oldest first as given.
///
/// An empty range yields [`INITIAL_TAG_MESSAGE`].
pub fn render_changelog(entries: &[ChangelogEntry]) -> String {
    if entries.is_empty() {
        return INITIAL_TAG_MESSAGE.to_string();
    }

    entries
        .iter()
        .map(ChangelogEntry::render)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_is_initial_tag() {
        assert_eq!(render_changelog(&[]), "Initial tag");
    }

    #[test]
    fn test_render_with_and_without_author() {
        let entries = vec![
            ChangelogEntry::new("Add parser", Some("octocat")),
            ChangelogEntry::new("Fix typo", None),
        ];
        assert_eq!(
            render_changelog(&entries),
            "* Add parser (octocat)\n* Fix typo"
        );
    }

    #[test]
    fn test_render_trims_surrounding_whitespace() {
        let entries = vec![ChangelogEntry::new("Bump version\n\n", None)];
        assert_eq!(render_changelog(&entries), "* Bump version");
    }
}
