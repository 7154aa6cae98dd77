//! Load manifest parsing
//!
//! A manifest is UTF-8 text with one data source per line:
//!
//! ```text
//! # comment
//! gs://bucket/provider-a/        https://license.example/a
//! data/local.nq
//! ```
//!
//! Fields are tab-separated: the location, then an optional license URL.
//! Blank lines and lines starting with `#` are ignored.

use crate::error::ManifestError;
use crate::source::{split_cloud_location, SourceEntry, CLOUD_PREFIX};
use std::path::Path;

/// Manifest file read by `load_data` when no other source list is given
pub const DEFAULT_MANIFEST_FILE: &str = "graph_data.txt";

/// Origin label used in errors for sources given on the command line
const INLINE_ORIGIN: &str = "--data_list";

/// Ordered sequence of data sources for one `load_data` run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadManifest {
    entries: Vec<SourceEntry>,
}

impl LoadManifest {
    /// Read and parse a manifest file.
    ///
    /// Relative local locations are classified against `base_dir`, the
    /// directory the tool was invoked from.
    pub fn from_file(path: &Path, base_dir: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.display().to_string(), base_dir)
    }

    /// Parse manifest text. `origin` names the text in error messages.
    pub fn parse(content: &str, origin: &str, base_dir: &Path) -> Result<Self, ManifestError> {
        Self::from_lines(content.lines(), origin, base_dir)
    }

    /// Build a manifest from inline items, each in manifest-line syntax.
    pub fn from_items<S: AsRef<str>>(items: &[S], base_dir: &Path) -> Result<Self, ManifestError> {
        Self::from_lines(items.iter().map(AsRef::as_ref), INLINE_ORIGIN, base_dir)
    }

    fn from_lines<'a>(
        lines: impl Iterator<Item = &'a str>,
        origin: &str,
        base_dir: &Path,
    ) -> Result<Self, ManifestError> {
        let mut entries = Vec::new();
        for (idx, line) in lines.enumerate() {
            if let Some(entry) = parse_line(line, base_dir).map_err(|reason| {
                ManifestError::Malformed {
                    origin: origin.to_string(),
                    line: idx + 1,
                    reason,
                }
            })? {
                entries.push(entry);
            }
        }

        if entries.is_empty() {
            return Err(ManifestError::Empty {
                origin: origin.to_string(),
            });
        }

        log::debug!("Parsed {} data sources from {}", entries.len(), origin);
        Ok(Self { entries })
    }

    /// Sources in manifest order
    pub fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }

    /// Number of sources
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no sources
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate sources in manifest order
    pub fn iter(&self) -> std::slice::Iter<'_, SourceEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a LoadManifest {
    type Item = &'a SourceEntry;
    type IntoIter = std::slice::Iter<'a, SourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parse a single manifest line.
///
/// Returns `Ok(None)` for blank and comment lines, and the reason as `Err`
/// for malformed ones.
fn parse_line(line: &str, base_dir: &Path) -> Result<Option<SourceEntry>, String> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None);
    }

    let mut fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    if fields.len() > 2 {
        return Err(format!(
            "expected 'location[<TAB>license_url]', found {} tab-separated fields",
            fields.len()
        ));
    }

    let location = fields[0];
    if location.is_empty() {
        return Err("location is empty".to_string());
    }
    if location.starts_with(CLOUD_PREFIX) && split_cloud_location(location).is_none() {
        return Err(format!("cloud location '{}' names no bucket", location));
    }

    let license = match fields.get(1) {
        Some(raw) => Some(validate_license(raw)?),
        None => None,
    };

    Ok(Some(SourceEntry::resolve(location, license, base_dir)))
}

fn validate_license(raw: &str) -> Result<String, String> {
    match url::Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(raw.to_string()),
        Ok(url) => Err(format!(
            "license URL '{}' must use http or https, not '{}'",
            raw,
            url.scheme()
        )),
        Err(e) => Err(format!("license '{}' is not a valid URL: {}", raw, e)),
    }
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
