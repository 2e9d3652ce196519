//! Graph model of a merge diagram.
//!
//! - [`source`]: the exchanged input shape, a mapping from cell id to its
//!   payload and textual child ids, and the resolver that links it.
//! - [`graph`]: the resolved arena of [`Cell`]s with child links and derived
//!   parent back-links, which the layout pipeline mutates in place.

mod graph;
mod source;

pub use graph::{Cell, CellIndex, MergeGraph};
pub use source::{CellSource, GraphSource};
