//! Backend client selection

use crate::agraph::AgraphStore;
use crate::blazegraph::BlazegraphStore;
use crate::traits::TripleStore;
use ga_core::{Config, GraphBackend};

/// Build the client for `backend` serving at `base_url`
pub fn connect(
    backend: GraphBackend,
    base_url: impl Into<String>,
    config: &Config,
) -> Box<dyn TripleStore> {
    match backend {
        GraphBackend::Blazegraph => Box::new(BlazegraphStore::new(
            base_url,
            config.blazegraph.namespace.clone(),
        )),
        GraphBackend::AGraph => Box::new(AgraphStore::new(
            base_url,
            config.agraph.repository.clone(),
            config.agraph.user.clone(),
            config.agraph.password.clone(),
        )),
    }
}
