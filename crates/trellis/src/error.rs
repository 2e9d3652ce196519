//! Error types for Trellis operations.
//!
//! This module provides the main error type [`TrellisError`] which covers
//! every way turning an input graph into a drawable layout can fail.

use std::io;

use thiserror::Error;

use trellis_core::identifier::Id;

/// The main error type for Trellis operations.
///
/// # Graph Variants
///
/// `UnresolvedReference`, `DuplicateCell`, `CyclicGraph` and `MalformedGraph`
/// describe problems with the input graph itself. A layout is never produced
/// for such a graph; the caller has to fix the input and try again.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid graph source: {0}")]
    Source(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Cell `{cell}` references unknown child `{child}`")]
    UnresolvedReference { cell: Id, child: String },

    #[error("Cell `{0}` is defined more than once")]
    DuplicateCell(Id),

    #[error("Cell `{0}` is part of a cycle")]
    CyclicGraph(Id),

    #[error("Cell `{0}` cannot be assigned a level")]
    MalformedGraph(Id),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for TrellisError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TrellisError {
    /// Returns `true` for errors caused by the shape of the input graph.
    pub fn is_graph_error(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedReference { .. }
                | Self::DuplicateCell(_)
                | Self::CyclicGraph(_)
                | Self::MalformedGraph(_)
        )
    }
}
