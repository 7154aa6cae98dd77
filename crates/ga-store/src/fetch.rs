//! Reading source data from local disk and Google Cloud Storage
//!
//! A source is first listed into `DocumentRef`s, then each document is read
//! on its own, so only one file of a directory or prefix is held in memory.

use crate::error::{LoadError, StoreResult};
use async_trait::async_trait;
use futures::TryStreamExt;
use ga_core::{SourceEntry, CLOUD_PREFIX};
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Extension of the files a directory or prefix contributes
pub const NQUADS_EXTENSION: &str = "nq";

/// One N-Quads file of a source, not yet read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRef {
    /// File on local disk
    Local(PathBuf),
    /// Object in a cloud bucket
    Cloud { bucket: String, object: ObjectPath },
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRef::Local(path) => write!(f, "{}", path.display()),
            DocumentRef::Cloud { bucket, object } => {
                write!(f, "{}{}/{}", CLOUD_PREFIX, bucket, object)
            }
        }
    }
}

/// Lists and reads the N-Quads documents a manifest entry refers to.
///
/// A single-file entry lists that file. A directory or prefix lists its
/// `.nq` files in lexical order.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Documents of `entry`, without reading them
    async fn list(&self, entry: &SourceEntry) -> StoreResult<Vec<DocumentRef>>;

    /// Content of one listed document
    async fn read(&self, document: &DocumentRef) -> StoreResult<Vec<u8>>;
}

/// Builds the object store serving one bucket
pub type BucketStoreBuilder =
    Box<dyn Fn(&str) -> object_store::Result<Arc<dyn ObjectStore>> + Send + Sync>;

/// Fetcher for local paths and `gs://` locations
///
/// By default GCS credentials come from the environment
/// (`GOOGLE_APPLICATION_CREDENTIALS` or `GOOGLE_SERVICE_ACCOUNT*`), as picked
/// up by `object_store`. One store is built per bucket and reused.
pub struct DefaultFetcher {
    base_dir: PathBuf,
    build_store: BucketStoreBuilder,
    stores: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl DefaultFetcher {
    /// Create a fetcher resolving relative local paths against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_store_builder(base_dir, |bucket| {
            let store = GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()?;
            Ok(Arc::new(store) as Arc<dyn ObjectStore>)
        })
    }

    /// Create a fetcher that obtains bucket stores from `build_store`
    pub fn with_store_builder<F>(base_dir: impl Into<PathBuf>, build_store: F) -> Self
    where
        F: Fn(&str) -> object_store::Result<Arc<dyn ObjectStore>> + Send + Sync + 'static,
    {
        Self {
            base_dir: base_dir.into(),
            build_store: Box::new(build_store),
            stores: Mutex::new(HashMap::new()),
        }
    }

    fn store(&self, bucket: &str) -> object_store::Result<Arc<dyn ObjectStore>> {
        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = stores.get(bucket) {
            return Ok(Arc::clone(store));
        }
        let store = (self.build_store)(bucket)?;
        stores.insert(bucket.to_string(), Arc::clone(&store));
        Ok(store)
    }

    fn list_local(&self, entry: &SourceEntry) -> StoreResult<Vec<DocumentRef>> {
        let path = self.base_dir.join(entry.location());
        if !entry.kind().is_dir() {
            return Ok(vec![DocumentRef::Local(path)]);
        }

        let mut files = Vec::new();
        discover_nquads_recursive(&path, &mut files).map_err(|e| LoadError::Fetch {
            location: entry.location().to_string(),
            message: e.to_string(),
        })?;
        files.sort();
        Ok(files.into_iter().map(DocumentRef::Local).collect())
    }

    async fn list_cloud(&self, entry: &SourceEntry) -> StoreResult<Vec<DocumentRef>> {
        let location = entry.location();
        let fetch_error = |message: String| LoadError::Fetch {
            location: location.to_string(),
            message,
        };

        let (bucket, prefix) = entry
            .cloud_parts()
            .ok_or_else(|| fetch_error("not a gs:// location".to_string()))?;
        let store = self.store(bucket).map_err(|e| fetch_error(e.to_string()))?;

        if !entry.kind().is_dir() {
            let object = ObjectPath::from(prefix);
            store
                .head(&object)
                .await
                .map_err(|e| fetch_error(e.to_string()))?;
            return Ok(vec![DocumentRef::Cloud {
                bucket: bucket.to_string(),
                object,
            }]);
        }

        let prefix = prefix.trim_end_matches('/');
        let prefix_path = (!prefix.is_empty()).then(|| ObjectPath::from(prefix));
        let listed: Vec<_> = store
            .list(prefix_path.as_ref())
            .try_collect()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let mut objects = Vec::new();
        for meta in listed {
            if meta.location.extension() == Some(NQUADS_EXTENSION) {
                objects.push(meta.location);
            } else {
                log::warn!(
                    "Skipping {}{}/{}: not an .nq file",
                    CLOUD_PREFIX,
                    bucket,
                    meta.location
                );
            }
        }
        objects.sort();

        Ok(objects
            .into_iter()
            .map(|object| DocumentRef::Cloud {
                bucket: bucket.to_string(),
                object,
            })
            .collect())
    }
}

#[async_trait]
impl SourceFetcher for DefaultFetcher {
    async fn list(&self, entry: &SourceEntry) -> StoreResult<Vec<DocumentRef>> {
        if entry.kind().is_cloud() {
            self.list_cloud(entry).await
        } else {
            self.list_local(entry)
        }
    }

    async fn read(&self, document: &DocumentRef) -> StoreResult<Vec<u8>> {
        let fetch_error = |message: String| LoadError::Fetch {
            location: document.to_string(),
            message,
        };

        match document {
            DocumentRef::Local(path) => tokio::fs::read(path)
                .await
                .map_err(|e| fetch_error(e.to_string())),
            DocumentRef::Cloud { bucket, object } => {
                log::debug!("Downloading {}", document);
                let store = self.store(bucket).map_err(|e| fetch_error(e.to_string()))?;
                let bytes = store
                    .get(object)
                    .await
                    .map_err(|e| fetch_error(e.to_string()))?
                    .bytes()
                    .await
                    .map_err(|e| fetch_error(e.to_string()))?;
                Ok(bytes.to_vec())
            }
        }
    }
}

/// Recursively collect `.nq` files under `dir`, warning about anything else.
///
/// Symlinked directories are not followed.
fn discover_nquads_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            discover_nquads_recursive(&path, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            log::warn!("Skipping {}: symlinked directory", path.display());
        } else if path.extension().is_some_and(|e| e == NQUADS_EXTENSION) {
            files.push(path);
        } else {
            log::warn!("Skipping {}: not an .nq file", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
