use trellis_core::geometry::{Bounds, Size};

use crate::structure::MergeGraph;

/// Returns the bounds covering every cell of `graph`, each `cell` in size.
///
/// An empty graph has empty bounds at the origin.
pub(super) fn cell_bounds<P>(graph: &MergeGraph<P>, cell: Size) -> Bounds {
    let mut positions = graph.cells().map(|c| c.position());
    let Some(first) = positions.next() else {
        return Bounds::default();
    };

    let (min, max) = positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    let size = Size::new(
        max.x() - min.x() + cell.width(),
        max.y() - min.y() + cell.height(),
    );
    Bounds::new_from_top_left(min, size)
}

#[cfg(test)]
mod tests {
    use trellis_core::{geometry::Point, identifier::Id};

    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = MergeGraph::<()>::new();
        assert_eq!(cell_bounds(&graph, Size::new(120.0, 90.0)), Bounds::default());
    }

    #[test]
    fn test_bounds_include_cell_size() {
        let mut graph = MergeGraph::new();
        let a = graph.add_cell(Id::new("ext_a"), ()).unwrap();
        let b = graph.add_cell(Id::new("ext_b"), ()).unwrap();
        graph.cell_mut(a).set_position(Point::new(-75.0, 90.0));
        graph.cell_mut(b).set_position(Point::new(300.0, 450.0));

        let bounds = cell_bounds(&graph, Size::new(120.0, 90.0));

        assert_eq!(bounds.min_point(), Point::new(-75.0, 90.0));
        assert_eq!(bounds.to_size(), Size::new(495.0, 450.0));
    }

    #[test]
    fn test_single_cell_is_one_cell_large() {
        let mut graph = MergeGraph::new();
        let a = graph.add_cell(Id::new("ext_single"), ()).unwrap();
        graph.cell_mut(a).set_position(Point::new(10.0, 20.0));

        let bounds = cell_bounds(&graph, Size::new(120.0, 90.0));

        assert_eq!(bounds.min_point(), Point::new(10.0, 20.0));
        assert_eq!(bounds.to_size(), Size::new(120.0, 90.0));
    }
}
