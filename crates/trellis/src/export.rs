//! Export of laid-out merge diagrams.
//!
//! This module provides the [`Exporter`] trait that turns a positioned
//! [`MergeGraph`] into an output format. It is the final stage of the
//! pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! GraphSource
//!     ↓ resolve
//! MergeGraph
//!     ↓ layout
//! Positioned cells (Layout)
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! Export operations return [`Error`], which converts into
//! [`TrellisError::Export`] at the crate boundary.
//!
//! [`TrellisError::Export`]: crate::TrellisError::Export

/// SVG export backend.
pub mod svg;

use std::io;

use crate::{layout::Layout, structure::MergeGraph};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Writes the positioned `graph` to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_layout<P: CellLabel>(
        &self,
        graph: &MergeGraph<P>,
        layout: &Layout,
        out: &mut dyn io::Write,
    ) -> Result<(), Error>;
}

/// Text shown inside a rendered cell.
///
/// Payloads are opaque to the layout; exporters only ask them for a label.
/// When no label is found the cell id is shown instead.
pub trait CellLabel {
    /// Returns the label stored under `key`, if any.
    fn label(&self, key: &str) -> Option<String>;
}

impl CellLabel for () {
    fn label(&self, _key: &str) -> Option<String> {
        None
    }
}

impl CellLabel for String {
    fn label(&self, _key: &str) -> Option<String> {
        Some(self.clone())
    }
}

impl CellLabel for toml::Table {
    fn label(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            toml::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
