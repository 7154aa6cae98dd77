//! In-memory triplestore for tests

use crate::error::{LoadError, StoreResult};
use crate::traits::TripleStore;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Records every bulk load instead of sending it anywhere
#[derive(Debug)]
pub struct InMemoryStore {
    ready: bool,
    prepared: AtomicBool,
    failing_graphs: HashSet<String>,
    loads: Mutex<Vec<(String, String)>>,
}

impl InMemoryStore {
    /// A ready store accepting every load
    pub fn new() -> Self {
        Self {
            ready: true,
            prepared: AtomicBool::new(false),
            failing_graphs: HashSet::new(),
            loads: Mutex::new(Vec::new()),
        }
    }

    /// A store whose readiness check fails
    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// Reject loads into `graph` with a 500
    pub fn fail_graph(mut self, graph: impl Into<String>) -> Self {
        self.failing_graphs.insert(graph.into());
        self
    }

    /// Whether `prepare` was called
    pub fn was_prepared(&self) -> bool {
        self.prepared.load(Ordering::SeqCst)
    }

    /// `(graph, ntriples)` of every accepted load, in order
    pub fn loads(&self) -> Vec<(String, String)> {
        self.loads.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Graphs that received at least one load, in first-load order
    pub fn graphs(&self) -> Vec<String> {
        let mut graphs: Vec<String> = Vec::new();
        for (graph, _) in self.loads() {
            if !graphs.contains(&graph) {
                graphs.push(graph);
            }
        }
        graphs
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TripleStore for InMemoryStore {
    async fn is_ready(&self) -> bool {
        self.ready
    }

    async fn prepare(&self) -> StoreResult<()> {
        self.prepared.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn bulk_load(&self, graph: &str, ntriples: String) -> StoreResult<()> {
        if self.failing_graphs.contains(graph) {
            return Err(LoadError::BadStatus {
                backend: self.store_type(),
                status: 500,
                body: "rejected".to_string(),
            });
        }
        if let Ok(mut loads) = self.loads.lock() {
            loads.push((graph.to_string(), ntriples));
        }
        Ok(())
    }

    fn store_type(&self) -> &'static str {
        "in-memory"
    }
}
