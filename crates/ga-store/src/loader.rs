//! Batch loading of manifest sources
//!
//! Sources are loaded strictly in manifest order, each into its own named
//! graph. A failing source is recorded in the report and the batch moves on;
//! only a backend that cannot take loads at all stops the batch.

use crate::error::{LoadError, SourceLoadError, StoreResult};
use crate::fetch::SourceFetcher;
use crate::nquads::retarget_nquads;
use crate::traits::TripleStore;
use ga_core::{LoadManifest, SourceEntry};
use oxrdf::NamedNode;
use std::fmt;
use std::path::Path;

/// A source that landed in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    /// Location as written in the manifest
    pub location: String,
    /// Named graph the source was loaded into
    pub graph_iri: String,
    /// Number of files read
    pub files: usize,
    /// Number of statements sent
    pub triples: usize,
    /// License URL from the manifest, echoed verbatim
    pub license: Option<String>,
}

/// Result of one manifest entry
#[derive(Debug)]
pub enum SourceOutcome {
    Loaded(LoadedSource),
    Failed(SourceLoadError),
}

impl SourceOutcome {
    /// Location of the source this outcome belongs to
    pub fn location(&self) -> &str {
        match self {
            SourceOutcome::Loaded(loaded) => &loaded.location,
            SourceOutcome::Failed(err) => &err.location,
        }
    }
}

/// Per-source outcomes of a batch, in manifest order
#[derive(Debug, Default)]
pub struct LoadReport {
    outcomes: Vec<SourceOutcome>,
}

impl LoadReport {
    /// All outcomes in manifest order
    pub fn outcomes(&self) -> &[SourceOutcome] {
        &self.outcomes
    }

    /// Sources that loaded
    pub fn loaded(&self) -> impl Iterator<Item = &LoadedSource> {
        self.outcomes.iter().filter_map(|o| match o {
            SourceOutcome::Loaded(loaded) => Some(loaded),
            SourceOutcome::Failed(_) => None,
        })
    }

    /// Sources that failed
    pub fn failures(&self) -> impl Iterator<Item = &SourceLoadError> {
        self.outcomes.iter().filter_map(|o| match o {
            SourceOutcome::Failed(err) => Some(err),
            SourceOutcome::Loaded(_) => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Statements sent across all loaded sources
    pub fn total_triples(&self) -> usize {
        self.loaded().map(|l| l.triples).sum()
    }
}

/// Summary of the loaded sources; failures are reported separately
impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for loaded in self.loaded() {
            writeln!(
                f,
                "  ✓ {} -> <{}> ({} files, {} triples)",
                loaded.location, loaded.graph_iri, loaded.files, loaded.triples
            )?;
            if let Some(license) = &loaded.license {
                writeln!(f, "      License: {}", license)?;
            }
        }
        writeln!(f)?;
        write!(
            f,
            "Loaded {} of {} sources ({} total triples)",
            self.loaded().count(),
            self.outcomes.len(),
            self.total_triples()
        )
    }
}

/// Loads manifest sources into one store
pub struct Loader<'a> {
    store: &'a dyn TripleStore,
    fetcher: &'a dyn SourceFetcher,
    base_dir: &'a Path,
}

impl<'a> Loader<'a> {
    /// Create a loader; relative locations resolve against `base_dir`
    pub fn new(
        store: &'a dyn TripleStore,
        fetcher: &'a dyn SourceFetcher,
        base_dir: &'a Path,
    ) -> Self {
        Self {
            store,
            fetcher,
            base_dir,
        }
    }

    /// Load every source of `manifest`, attempting all of them.
    ///
    /// Fails without attempting any source only when the store is not ready
    /// or cannot be prepared.
    pub async fn load_all(&self, manifest: &LoadManifest) -> StoreResult<LoadReport> {
        if !self.store.is_ready().await {
            return Err(LoadError::NotReady {
                backend: self.store.store_type(),
            });
        }
        self.store.prepare().await?;

        let total = manifest.len();
        let mut report = LoadReport::default();
        for (i, entry) in manifest.iter().enumerate() {
            log::info!("[{}/{}] Loading {}", i + 1, total, entry);
            match self.load_source(entry).await {
                Ok(loaded) => {
                    if let Some(license) = &loaded.license {
                        log::info!("License for {}: {}", loaded.location, license);
                    }
                    report.outcomes.push(SourceOutcome::Loaded(loaded));
                }
                Err(err) => {
                    log::error!("{}", err);
                    report.outcomes.push(SourceOutcome::Failed(err));
                }
            }
        }
        Ok(report)
    }

    /// Load one source into its named graph
    pub async fn load_source(&self, entry: &SourceEntry) -> Result<LoadedSource, SourceLoadError> {
        let location = entry.location();
        let wrap = |source: LoadError| SourceLoadError {
            location: location.to_string(),
            source,
        };

        let graph_iri = entry
            .graph_iri(self.base_dir)
            .map_err(|e| wrap(LoadError::GraphIri(e.to_string())))?;
        NamedNode::new(graph_iri.as_str())
            .map_err(|e| wrap(LoadError::GraphIri(format!("'{}': {}", graph_iri, e))))?;

        let documents = self.fetcher.list(entry).await.map_err(wrap)?;
        if documents.is_empty() {
            return Err(wrap(LoadError::NoQuadFiles {
                location: location.to_string(),
            }));
        }

        let files = documents.len();
        let mut triples = 0;
        for document in &documents {
            let name = document.to_string();
            let data = self.fetcher.read(document).await.map_err(wrap)?;
            let retargeted = retarget_nquads(&data, &name).map_err(wrap)?;
            drop(data);
            if retargeted.triples == 0 {
                log::warn!("{} contains no statements", name);
                continue;
            }
            if !retargeted.source_graphs.is_empty() {
                log::debug!(
                    "{}: moving statements from {} named graphs into <{}>",
                    name,
                    retargeted.source_graphs.len(),
                    graph_iri
                );
            }

            log::debug!(
                "Sending {} triples from {} to {}",
                retargeted.triples,
                name,
                self.store.store_type()
            );
            self.store
                .bulk_load(&graph_iri, retargeted.ntriples)
                .await
                .map_err(wrap)?;
            triples += retargeted.triples;
        }

        Ok(LoadedSource {
            location: location.to_string(),
            graph_iri,
            files,
            triples,
            license: entry.license().map(str::to_string),
        })
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
