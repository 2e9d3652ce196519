//! Arena-backed graph of diagram cells.
//!
//! Cells are stored in insertion order and addressed by [`CellIndex`].
//! Child links are authored; parent links are derived by [`MergeGraph::link`]
//! and only ever used for traversal. Cells never own each other, so the
//! arena is the single owner of every cell.

use std::collections::HashMap;

use petgraph::{algo::toposort, graph::DiGraph};

use trellis_core::{geometry::Point, identifier::Id};

use crate::TrellisError;

/// Type-safe index of a cell inside its [`MergeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(usize);

impl CellIndex {
    /// Returns the position of the cell in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One positionable unit of a merge diagram.
#[derive(Debug, Clone)]
pub struct Cell<P> {
    id: Id,
    payload: P,
    children: Vec<CellIndex>,
    parents: Vec<CellIndex>,
    level: Option<usize>,
    position: Point,
}

impl<P> Cell<P> {
    fn new(id: Id, payload: P) -> Self {
        Self {
            id,
            payload,
            children: Vec::new(),
            parents: Vec::new(),
            level: None,
            position: Point::default(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the opaque data handed to renderers.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Returns the children in authored order.
    pub fn children(&self) -> &[CellIndex] {
        &self.children
    }

    /// Returns the parents in discovery order.
    pub fn parents(&self) -> &[CellIndex] {
        &self.parents
    }

    /// Returns the level, or `None` before levels are assigned.
    pub fn level(&self) -> Option<usize> {
        self.level
    }

    /// Returns the top-left corner of the cell in the native layout frame.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn set_level(&mut self, level: usize) {
        self.level = Some(level);
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_x(&mut self, x: f32) {
        self.position = self.position.with_x(x);
    }
}

/// Directed acyclic graph of cells.
///
/// The graph allows several parents per cell and several roots and leaves.
/// Acyclicity is not enforced while building; [`MergeGraph::ensure_acyclic`]
/// checks it before levels are assigned.
#[derive(Debug, Clone)]
pub struct MergeGraph<P> {
    cells: Vec<Cell<P>>,
    index: HashMap<Id, CellIndex>,
}

impl<P> Default for MergeGraph<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> MergeGraph<P> {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds a cell without any links.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::DuplicateCell`] if a cell with the same id exists.
    pub fn add_cell(&mut self, id: Id, payload: P) -> Result<CellIndex, TrellisError> {
        if self.index.contains_key(&id) {
            return Err(TrellisError::DuplicateCell(id));
        }
        let idx = CellIndex(self.cells.len());
        self.cells.push(Cell::new(id, payload));
        self.index.insert(id, idx);
        Ok(idx)
    }

    /// Makes `child` the next child of `parent` and records the back-link.
    ///
    /// # Panics
    ///
    /// Panics if either index does not belong to this graph.
    pub fn link(&mut self, parent: CellIndex, child: CellIndex) {
        self.cells[parent.0].children.push(child);
        self.cells[child.0].parents.push(parent);
    }

    /// Returns the cell at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if the index does not belong to this graph.
    pub fn cell(&self, idx: CellIndex) -> &Cell<P> {
        &self.cells[idx.0]
    }

    pub(crate) fn cell_mut(&mut self, idx: CellIndex) -> &mut Cell<P> {
        &mut self.cells[idx.0]
    }

    /// Looks up the index of the cell with the given id.
    pub fn find(&self, id: Id) -> Option<CellIndex> {
        self.index.get(&id).copied()
    }

    /// Returns the cell with the given id, if it exists.
    pub fn cell_by_id(&self, id: Id) -> Option<&Cell<P>> {
        self.find(id).map(|idx| self.cell(idx))
    }

    /// Returns an iterator over all cells in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell<P>> {
        self.cells.iter()
    }

    /// Returns an iterator over all cell indices in insertion order.
    pub fn indices(&self) -> impl Iterator<Item = CellIndex> + use<P> {
        (0..self.cells.len()).map(CellIndex)
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cells without parents, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.indices().filter(|&idx| self.cell(idx).is_root())
    }

    /// Returns the cells without children, in insertion order.
    pub fn leaves(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.indices().filter(|&idx| self.cell(idx).is_leaf())
    }

    /// Checks that following child links never returns to a visited cell.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::CyclicGraph`] naming a cell on a cycle.
    pub fn ensure_acyclic(&self) -> Result<(), TrellisError> {
        let mut dag = DiGraph::<CellIndex, ()>::with_capacity(self.len(), 0);
        let nodes: Vec<_> = self.indices().map(|idx| dag.add_node(idx)).collect();
        for idx in self.indices() {
            for child in self.cell(idx).children() {
                dag.add_edge(nodes[idx.0], nodes[child.0], ());
            }
        }

        toposort(&dag, None)
            .map(|_| ())
            .map_err(|cycle| TrellisError::CyclicGraph(self.cell(dag[cycle.node_id()]).id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> (MergeGraph<u32>, [CellIndex; 4]) {
        //     top
        //    /   \
        //  left  right
        //    \   /
        //    bottom
        let mut graph = MergeGraph::new();
        let top = graph.add_cell(Id::new("top"), 1).unwrap();
        let left = graph.add_cell(Id::new("left"), 2).unwrap();
        let right = graph.add_cell(Id::new("right"), 3).unwrap();
        let bottom = graph.add_cell(Id::new("bottom"), 4).unwrap();
        graph.link(top, left);
        graph.link(top, right);
        graph.link(left, bottom);
        graph.link(right, bottom);
        (graph, [top, left, right, bottom])
    }

    #[test]
    fn test_graph_new() {
        let graph: MergeGraph<()> = MergeGraph::new();

        assert_eq!(graph.len(), 0);
        assert!(graph.is_empty());
        assert_eq!(graph.roots().count(), 0);
        assert_eq!(graph.leaves().count(), 0);
    }

    #[test]
    fn test_add_cell() {
        let mut graph = MergeGraph::new();
        let a = graph.add_cell(Id::new("cell_a"), 10).unwrap();
        let b = graph.add_cell(Id::new("cell_b"), 20).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(*graph.cell(a).payload(), 10);
        assert_eq!(graph.find(Id::new("cell_b")), Some(b));
        assert!(graph.cell(a).level().is_none());
    }

    #[test]
    fn test_add_duplicate_cell() {
        let mut graph = MergeGraph::new();
        graph.add_cell(Id::new("twice"), ()).unwrap();

        let err = graph.add_cell(Id::new("twice"), ()).unwrap_err();
        assert!(matches!(err, TrellisError::DuplicateCell(id) if id == "twice"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_find_missing() {
        let graph: MergeGraph<()> = MergeGraph::new();
        assert_eq!(graph.find(Id::new("missing")), None);
        assert!(graph.cell_by_id(Id::new("missing")).is_none());
    }

    #[test]
    fn test_link_records_both_directions() {
        let (graph, [top, left, right, bottom]) = diamond();

        assert_eq!(graph.cell(top).children(), &[left, right]);
        assert_eq!(graph.cell(bottom).parents(), &[left, right]);
        assert_eq!(graph.cell(left).parents(), &[top]);
        assert!(graph.cell(top).is_root());
        assert!(graph.cell(bottom).is_leaf());
    }

    #[test]
    fn test_roots_and_leaves() {
        let (mut graph, [top, _, _, bottom]) = diamond();
        let isolated = graph.add_cell(Id::new("isolated"), 5).unwrap();

        let roots: Vec<_> = graph.roots().collect();
        let leaves: Vec<_> = graph.leaves().collect();
        assert_eq!(roots, vec![top, isolated]);
        assert_eq!(leaves, vec![bottom, isolated]);
    }

    #[test]
    fn test_acyclic_diamond() {
        let (graph, _) = diamond();
        assert!(graph.ensure_acyclic().is_ok());
    }

    #[test]
    fn test_cycle_detected() {
        let (mut graph, [top, _, _, bottom]) = diamond();
        graph.link(bottom, top);

        let err = graph.ensure_acyclic().unwrap_err();
        assert!(matches!(err, TrellisError::CyclicGraph(_)));
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let mut graph = MergeGraph::new();
        let a = graph.add_cell(Id::new("self_loop"), ()).unwrap();
        graph.link(a, a);

        assert!(!graph.cell(a).is_root());
        assert!(matches!(
            graph.ensure_acyclic(),
            Err(TrellisError::CyclicGraph(id)) if id == "self_loop"
        ));
    }

    #[test]
    fn test_multiple_links_between_same_cells() {
        let mut graph = MergeGraph::new();
        let a = graph.add_cell(Id::new("multi_a"), ()).unwrap();
        let b = graph.add_cell(Id::new("multi_b"), ()).unwrap();
        graph.link(a, b);
        graph.link(a, b);

        assert_eq!(graph.cell(a).children().len(), 2);
        assert_eq!(graph.cell(b).parents().len(), 2);
        assert!(graph.ensure_acyclic().is_ok());
    }
}
