use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

const MULTILINE_DELIMITER: &str = "VERSION_TAGGER_EOF";

/// Values reported to downstream CI steps.
///
/// Each value is recorded as soon as the step producing it succeeds, so a
/// failed run still reports what it got to (e.g. an orphaned tag object).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutputs {
    pub version: Option<String>,
    pub tag_name: Option<String>,
    pub tag_revision: Option<u64>,
    pub tag_sha: Option<String>,
    pub tag_uri: Option<String>,
    pub release_uri: Option<String>,
}

impl RunOutputs {
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Set outputs as `(key, value)` pairs in their fixed order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let values = [
            ("version", self.version.clone()),
            ("tag_name", self.tag_name.clone()),
            ("tag_revision", self.tag_revision.map(|r| r.to_string())),
            ("tag_sha", self.tag_sha.clone()),
            ("tag_uri", self.tag_uri.clone()),
            ("release_uri", self.release_uri.clone()),
        ];
        values
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect()
    }

    /// Render in the `GITHUB_OUTPUT` file format
    pub fn render(&self) -> String {
        self.entries()
            .into_iter()
            .map(|(key, value)| {
                if value.contains('\n') {
                    format!(
                        "{}<<{}\n{}\n{}\n",
                        key, MULTILINE_DELIMITER, value, MULTILINE_DELIMITER
                    )
                } else {
                    format!("{}={}\n", key, value)
                }
            })
            .collect()
    }

    /// Append to `output_file`, or print to stdout when there is none
    pub fn write(&self, output_file: Option<&Path>) -> Result<()> {
        let rendered = self.render();
        match output_file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(rendered.as_bytes())?;
                log::debug!("Wrote outputs to {}", path.display());
            }
            None => print!("{}", rendered),
        }
        Ok(())
    }
}
