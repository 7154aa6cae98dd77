//! N-Quads to N-Triples conversion
//!
//! Every quad of a source lands in the source's own named graph, so the graph
//! component written in the file is dropped and the remaining triple is
//! re-serialized as N-Triples for the backend's bulk endpoint.

use crate::error::{LoadError, StoreResult};
use oxrdf::{GraphName, Triple};
use oxttl::NQuadsParser;
use std::collections::BTreeSet;
use std::fmt::Write;

/// N-Triples body produced from one N-Quads document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Retargeted {
    /// N-Triples serialization, one statement per line
    pub ntriples: String,
    /// Number of statements
    pub triples: usize,
    /// Distinct named graphs written in the document, default graph excluded
    pub source_graphs: BTreeSet<String>,
}

/// Parse `data` as N-Quads and strip the graph component of every quad.
///
/// `file` names the document in errors.
pub fn retarget_nquads(data: &[u8], file: &str) -> StoreResult<Retargeted> {
    let mut out = Retargeted::default();

    for quad in NQuadsParser::new().for_reader(data) {
        let quad = quad.map_err(|e| LoadError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })?;

        if let GraphName::NamedNode(graph) = &quad.graph_name {
            out.source_graphs.insert(graph.as_str().to_string());
        }

        let triple = Triple::new(quad.subject, quad.predicate, quad.object);
        // Writing to a String cannot fail
        let _ = writeln!(out.ntriples, "{} .", triple);
        out.triples += 1;
    }

    Ok(out)
}

#[cfg(test)]
#[path = "nquads_test.rs"]
mod tests;
