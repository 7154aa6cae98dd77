//! Data source entries and location classification
//!
//! A data source is one line of a load manifest: a location on local disk or
//! in Google Cloud Storage, plus an optional license URL. Each source is loaded
//! into exactly one named graph whose IRI is derived from its location.

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// URI prefix identifying cloud-storage locations
pub const CLOUD_PREFIX: &str = "gs://";

/// Where a source lives and whether it names a single file or a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A single file on local disk
    LocalFile,
    /// A local directory, enumerated recursively
    LocalDir,
    /// A single cloud-storage object
    CloudFile,
    /// A cloud-storage prefix
    CloudDir,
}

impl SourceKind {
    /// Whether the source lives in cloud storage
    pub fn is_cloud(self) -> bool {
        matches!(self, SourceKind::CloudFile | SourceKind::CloudDir)
    }

    /// Whether the source names a collection of files
    pub fn is_dir(self) -> bool {
        matches!(self, SourceKind::LocalDir | SourceKind::CloudDir)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::LocalFile => write!(f, "local file"),
            SourceKind::LocalDir => write!(f, "local directory"),
            SourceKind::CloudFile => write!(f, "cloud object"),
            SourceKind::CloudDir => write!(f, "cloud prefix"),
        }
    }
}

/// One resolved manifest entry. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEntry {
    location: String,
    kind: SourceKind,
    license: Option<String>,
}

impl SourceEntry {
    /// Create an entry with an already-determined kind
    pub fn new(location: impl Into<String>, kind: SourceKind, license: Option<String>) -> Self {
        Self {
            location: location.into(),
            kind,
            license,
        }
    }

    /// Create an entry, classifying `location` against `base_dir`
    pub fn resolve(location: impl Into<String>, license: Option<String>, base_dir: &Path) -> Self {
        let location = location.into();
        let kind = classify_location(&location, base_dir);
        Self::new(location, kind, license)
    }

    /// Location exactly as written in the manifest
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Classified kind of the location
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// License URL, when the manifest line carried one
    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    /// Local filesystem path of the source, resolved against `base_dir`.
    ///
    /// Returns `None` for cloud sources.
    pub fn local_path(&self, base_dir: &Path) -> Option<PathBuf> {
        if self.kind.is_cloud() {
            None
        } else {
            Some(base_dir.join(&self.location))
        }
    }

    /// Bucket and object prefix of a cloud source.
    ///
    /// Returns `None` for local sources.
    pub fn cloud_parts(&self) -> Option<(&str, &str)> {
        if !self.kind.is_cloud() {
            return None;
        }
        split_cloud_location(&self.location)
    }

    /// IRI of the named graph this source is loaded into.
    ///
    /// Cloud sources use their `gs://` URI; local sources use the `file://`
    /// URL of their absolute path.
    pub fn graph_iri(&self, base_dir: &Path) -> CoreResult<String> {
        if self.kind.is_cloud() {
            return Ok(self.location.trim_end_matches('/').to_string());
        }

        let joined = base_dir.join(&self.location);
        let absolute = joined.canonicalize().unwrap_or(joined);
        url::Url::from_file_path(&absolute)
            .map(|u| u.to_string())
            .map_err(|_| CoreError::InvalidGraphIri {
                location: self.location.clone(),
                reason: format!("'{}' is not an absolute path", absolute.display()),
            })
    }
}

impl fmt::Display for SourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.location, self.kind)
    }
}

/// Split `gs://bucket/prefix` into `("bucket", "prefix")`.
///
/// Returns `None` when the location is not a cloud location or names no bucket.
pub fn split_cloud_location(location: &str) -> Option<(&str, &str)> {
    let rest = location.strip_prefix(CLOUD_PREFIX)?;
    let (bucket, prefix) = rest.split_once('/').unwrap_or((rest, ""));
    if bucket.is_empty() {
        None
    } else {
        Some((bucket, prefix))
    }
}

/// Classify a manifest location.
///
/// Cloud locations are directories when they end in `/`, name only a bucket,
/// or their last segment has no file extension. Local locations are inspected
/// on disk; paths that do not exist fall back to the same extension rule.
pub fn classify_location(location: &str, base_dir: &Path) -> SourceKind {
    if let Some((_, prefix)) = split_cloud_location(location) {
        return if looks_like_directory(prefix) {
            SourceKind::CloudDir
        } else {
            SourceKind::CloudFile
        };
    }
    if location.starts_with(CLOUD_PREFIX) {
        return SourceKind::CloudDir;
    }

    let path = base_dir.join(location);
    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => SourceKind::LocalDir,
        Ok(_) => SourceKind::LocalFile,
        Err(_) if looks_like_directory(location) => SourceKind::LocalDir,
        Err(_) => SourceKind::LocalFile,
    }
}

fn looks_like_directory(path: &str) -> bool {
    if path.is_empty() || path.ends_with('/') {
        return true;
    }
    let last = path.rsplit('/').next().unwrap_or(path);
    Path::new(last).extension().is_none()
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
