//! Terminal reporting for a tagging run.

use crate::boundary::SkipReason;
use crate::outputs::RunOutputs;
use console::style;
use std::env;

fn in_github_actions() -> bool {
    env::var("GITHUB_ACTIONS").map_or(false, |v| v == "true")
}

/// Escape a message for a workflow command (`::error::...`)
pub fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Print an error message in red, plus an error annotation inside GitHub Actions.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
    if in_github_actions() {
        println!("::error::{}", escape_workflow_data(message));
    }
}

/// Print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Line explaining why the run ended without creating anything.
pub fn format_skip(reason: &SkipReason) -> String {
    format!("{} Nothing to publish: {}", style("→").yellow(), reason)
}

/// Report why the run ended without creating anything.
pub fn display_skip(reason: &SkipReason) {
    println!("{}", format_skip(reason));
}

/// The tag that follows `old_tag`, or the first tag for the version.
pub fn format_proposed_tag(old_tag: Option<&str>, new_tag: &str) -> String {
    match old_tag {
        Some(old) => format!(
            "\n{}\n  From: {}\n  To:   {}",
            style("Tag Change:").bold(),
            style(old).red(),
            style(new_tag).green()
        ),
        None => format!(
            "\n{}\n  New tag: {}",
            style("Initial Tag:").bold(),
            style(new_tag).green()
        ),
    }
}

pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    println!("{}", format_proposed_tag(old_tag, new_tag));
}

/// Summary lines for a published tag and its release. Empty when no tag was created.
pub fn format_published(outputs: &RunOutputs) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(tag) = &outputs.tag_name {
        let headline = match &outputs.version {
            Some(version) => format!("Published tag {} for version {}", tag, version),
            None => format!("Published tag {}", tag),
        };
        lines.push(format!("{} {}", style("✓").green(), headline));
    }
    if let Some(uri) = &outputs.release_uri {
        lines.push(format!("  Release: {}", style(uri).cyan()));
    }
    lines
}

/// Summarize a published tag and its release.
pub fn display_published(outputs: &RunOutputs) {
    for line in format_published(outputs) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;

    #[test]
    fn test_escape_workflow_data() {
        assert_eq!(
            escape_workflow_data("100% broken\nsecond line\r"),
            "100%25 broken%0Asecond line%0D"
        );
    }

    #[test]
    fn test_format_skip() {
        let line = format_skip(&SkipReason::TagUpToDate {
            tag: "v1.0.0".to_string(),
        });
        assert_eq!(
            strip_ansi_codes(&line),
            "→ Nothing to publish: Tag 'v1.0.0' already exists"
        );
    }

    #[test]
    fn test_format_initial_tag() {
        let text = format_proposed_tag(None, "v1.0.0");
        assert_eq!(strip_ansi_codes(&text), "\nInitial Tag:\n  New tag: v1.0.0");
    }

    #[test]
    fn test_format_tag_change() {
        let text = format_proposed_tag(Some("v1.0.0-1"), "v1.0.0-2");
        assert_eq!(
            strip_ansi_codes(&text),
            "\nTag Change:\n  From: v1.0.0-1\n  To:   v1.0.0-2"
        );
    }

    #[test]
    fn test_format_published() {
        let outputs = RunOutputs {
            version: Some("1.0.0".to_string()),
            tag_name: Some("v1.0.0".to_string()),
            release_uri: Some("https://example.test/releases/tag/v1.0.0".to_string()),
            ..Default::default()
        };
        let lines: Vec<String> = format_published(&outputs)
            .iter()
            .map(|line| strip_ansi_codes(line).into_owned())
            .collect();
        assert_eq!(
            lines,
            vec![
                "✓ Published tag v1.0.0 for version 1.0.0".to_string(),
                "  Release: https://example.test/releases/tag/v1.0.0".to_string(),
            ]
        );
    }

    #[test]
    fn test_format_published_without_tag() {
        let outputs = RunOutputs {
            version: Some("1.0.0".to_string()),
            ..Default::default()
        };
        assert!(format_published(&outputs).is_empty());
    }
}
