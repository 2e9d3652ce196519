//! Input shape of a merge diagram and its resolution into a [`MergeGraph`].

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Deserialize;

use trellis_core::identifier::Id;

use super::graph::{CellIndex, MergeGraph};
use crate::TrellisError;

/// A cell as authored: an opaque payload and the ids of its children.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    deny_unknown_fields,
    bound(deserialize = "P: Deserialize<'de> + Default")
)]
pub struct CellSource<P> {
    #[serde(default)]
    children: Vec<String>,
    #[serde(default, alias = "data")]
    payload: P,
}

impl<P> CellSource<P> {
    pub fn new(payload: P) -> Self {
        Self {
            children: Vec::new(),
            payload,
        }
    }

    /// Appends a child reference.
    pub fn with_child(mut self, child: impl Into<String>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }
}

/// Ordered mapping from cell id to [`CellSource`].
///
/// The order of the mapping is the order cells are added to the graph, which
/// in turn decides parent discovery order and the initial slot of each cell
/// within its level.
///
/// # Examples
///
/// ```
/// use trellis::structure::GraphSource;
///
/// let source: GraphSource<toml::Table> = toml::from_str(
///     r#"
///     [final]
///     children = ["semi_a", "semi_b"]
///     payload = { name = "Final" }
///
///     [semi_a]
///     [semi_b]
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(source.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    transparent,
    bound(deserialize = "P: Deserialize<'de> + Default")
)]
pub struct GraphSource<P> {
    cells: IndexMap<String, CellSource<P>>,
}

impl<P> Default for GraphSource<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> GraphSource<P> {
    pub fn new() -> Self {
        Self {
            cells: IndexMap::new(),
        }
    }

    /// Adds or replaces the cell with the given id.
    pub fn with_cell(mut self, id: impl Into<String>, cell: CellSource<P>) -> Self {
        self.cells.insert(id.into(), cell);
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellSource<P>)> {
        self.cells.iter().map(|(id, cell)| (id.as_str(), cell))
    }
}

impl<P> MergeGraph<P> {
    /// Resolves textual child ids into links and derives parent back-links.
    ///
    /// Cells are added in source order. Parents of a cell are recorded in
    /// the order they are discovered: source order of the referring cell,
    /// then position within its `children` list. A child listed twice is
    /// linked twice.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::UnresolvedReference`] if a child id names no
    /// cell, or [`TrellisError::DuplicateCell`] if two cells share an id.
    pub fn from_source(source: GraphSource<P>) -> Result<Self, TrellisError> {
        let mut graph = MergeGraph::new();
        let mut pending: Vec<(CellIndex, Vec<String>)> = Vec::with_capacity(source.len());

        for (id, cell) in source.cells {
            let idx = graph.add_cell(Id::new(&id), cell.payload)?;
            pending.push((idx, cell.children));
        }

        let mut links = 0;
        for (parent, children) in pending {
            for child in children {
                let Some(child_idx) = graph.find(Id::new(&child)) else {
                    return Err(TrellisError::UnresolvedReference {
                        cell: graph.cell(parent).id(),
                        child,
                    });
                };
                trace!(parent:% = graph.cell(parent).id(), child = child.as_str(); "Linking cells");
                graph.link(parent, child_idx);
                links += 1;
            }
        }

        debug!(cells = graph.len(), links; "Relations resolved");
        Ok(graph)
    }
}
