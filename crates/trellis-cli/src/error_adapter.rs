//! Error adapter for converting TrellisError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use trellis::TrellisError;

/// Adapter giving a [`TrellisError`] an error code and help text.
pub struct ErrorAdapter<'a>(pub &'a TrellisError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.0 {
            TrellisError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            TrellisError::Io(_) => "trellis::io",
            TrellisError::Source(_) => "trellis::source",
            TrellisError::Config(_) => "trellis::config",
            TrellisError::UnresolvedReference { .. } => "trellis::graph::unresolved_reference",
            TrellisError::DuplicateCell(_) => "trellis::graph::duplicate_cell",
            TrellisError::CyclicGraph(_) => "trellis::graph::cycle",
            TrellisError::MalformedGraph(_) => "trellis::graph::malformed",
            TrellisError::Export(_) => "trellis::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: String = match self.0 {
            TrellisError::UnresolvedReference { child, .. } => {
                format!("add a `[{child}]` table or remove `{child}` from the children list")
            }
            TrellisError::DuplicateCell(id) => format!("rename one of the `{id}` cells"),
            TrellisError::CyclicGraph(id) => {
                format!("follow the children of `{id}`; one of them leads back to it")
            }
            TrellisError::MalformedGraph(_) => {
                "every cell must be reachable from a cell without parents".to_string()
            }
            TrellisError::Source(_) => {
                "each top-level table is a cell with optional `children` and `payload` keys"
                    .to_string()
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wraps an error for rendering by a miette report handler.
pub fn to_reportable(err: &TrellisError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
