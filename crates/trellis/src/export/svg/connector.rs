//! Connector geometry between levels.
//!
//! A parent drops an output segment from its bottom center onto its bus, a
//! horizontal line spanning the parent and all of its children. Each child
//! then takes one input segment from the bus of every parent. All points are
//! in the native layout frame.

use trellis_core::geometry::{Point, Size};

use crate::{
    config::LinkerConfig,
    structure::{CellIndex, MergeGraph},
};

/// Role of a connector segment, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SegmentKind {
    Output,
    Bus,
    Input,
}

/// One straight connector line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Segment {
    pub kind: SegmentKind,
    pub from: Point,
    pub to: Point,
}

/// Computes every connector segment of a positioned graph.
///
/// Without a bus, input segments run straight to the bottom center of the
/// parent's output instead of meeting the bus vertically.
pub(super) fn segments<P>(
    graph: &MergeGraph<P>,
    cell: Size,
    linker: &LinkerConfig,
    need_bus: bool,
) -> Vec<Segment> {
    let half_width = cell.width() / 2.0;
    let bus_y = |p: Point| p.y() + cell.height() + linker.output_height();

    let mut segments = Vec::new();
    for idx in graph.indices() {
        let current = graph.cell(idx);
        let position = current.position();

        if !current.is_leaf() {
            let center_x = position.x() + half_width;
            segments.push(Segment {
                kind: SegmentKind::Output,
                from: Point::new(center_x, position.y() + cell.height()),
                to: Point::new(center_x, bus_y(position)),
            });

            if need_bus {
                let (min_x, max_x) = current
                    .children()
                    .iter()
                    .map(|&child| graph.cell(child).position().x() + half_width)
                    .fold((center_x, center_x), |(lo, hi), x| (lo.min(x), hi.max(x)));
                segments.push(Segment {
                    kind: SegmentKind::Bus,
                    from: Point::new(min_x, bus_y(position)),
                    to: Point::new(max_x, bus_y(position)),
                });
            }
        }

        let mut parents: Vec<CellIndex> = current.parents().to_vec();
        parents.sort_by(|&a, &b| {
            let ax = graph.cell(a).position().x();
            let bx = graph.cell(b).position().x();
            ax.total_cmp(&bx)
        });

        let count = parents.len() as f32;
        for (i, &parent) in parents.iter().enumerate() {
            let parent_position = graph.cell(parent).position();
            let parent_bus = bus_y(parent_position);
            let x = position.x() + half_width + (i as f32 - count / 2.0) * linker.input_offset();
            let y = if parent_bus < position.y() {
                position.y()
            } else {
                position.y() + cell.height()
            };
            let to = if need_bus {
                Point::new(x, parent_bus)
            } else {
                Point::new(parent_position.x() + half_width, parent_bus)
            };
            segments.push(Segment {
                kind: SegmentKind::Input,
                from: Point::new(x, y),
                to,
            });
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use trellis_core::identifier::Id;

    use super::*;

    fn cell() -> Size {
        Size::new(120.0, 90.0)
    }

    /// parent at (0, 90) with children at (-75, 270) and (75, 270).
    fn fork() -> MergeGraph<()> {
        let mut graph = MergeGraph::new();
        let parent = graph.add_cell(Id::new("con_parent"), ()).unwrap();
        let left = graph.add_cell(Id::new("con_left"), ()).unwrap();
        let right = graph.add_cell(Id::new("con_right"), ()).unwrap();
        graph.link(parent, left);
        graph.link(parent, right);
        graph.cell_mut(parent).set_position(Point::new(0.0, 90.0));
        graph.cell_mut(left).set_position(Point::new(-75.0, 270.0));
        graph.cell_mut(right).set_position(Point::new(75.0, 270.0));
        graph
    }

    fn of_kind(segments: &[Segment], kind: SegmentKind) -> Vec<Segment> {
        segments.iter().copied().filter(|s| s.kind == kind).collect()
    }

    #[test]
    fn test_output_and_bus() {
        let segments = segments(&fork(), cell(), &LinkerConfig::default(), true);

        let outputs = of_kind(&segments, SegmentKind::Output);
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].from, Point::new(60.0, 180.0));
        assert_eq!(outputs[0].to, Point::new(60.0, 220.0));

        let buses = of_kind(&segments, SegmentKind::Bus);
        assert_eq!(buses.len(), 1);
        assert_eq!(buses[0].from, Point::new(-15.0, 220.0));
        assert_eq!(buses[0].to, Point::new(135.0, 220.0));
    }

    #[test]
    fn test_inputs_meet_bus_vertically() {
        let segments = segments(&fork(), cell(), &LinkerConfig::default(), true);

        let inputs = of_kind(&segments, SegmentKind::Input);
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].from, Point::new(-15.0, 270.0));
        assert_eq!(inputs[0].to, Point::new(-15.0, 220.0));
        assert_eq!(inputs[1].from, Point::new(135.0, 270.0));
    }

    #[test]
    fn test_without_bus_inputs_run_to_parent() {
        let segments = segments(&fork(), cell(), &LinkerConfig::default(), false);

        assert!(of_kind(&segments, SegmentKind::Bus).is_empty());
        let inputs = of_kind(&segments, SegmentKind::Input);
        assert_eq!(inputs[0].to, Point::new(60.0, 220.0));
        assert_eq!(inputs[1].to, Point::new(60.0, 220.0));
    }

    #[test]
    fn test_input_offset_spreads_parents() {
        let mut graph = MergeGraph::new();
        let right = graph.add_cell(Id::new("off_right"), ()).unwrap();
        let left = graph.add_cell(Id::new("off_left"), ()).unwrap();
        let merge = graph.add_cell(Id::new("off_merge"), ()).unwrap();
        graph.link(right, merge);
        graph.link(left, merge);
        graph.cell_mut(right).set_position(Point::new(75.0, 90.0));
        graph.cell_mut(left).set_position(Point::new(-75.0, 90.0));
        graph.cell_mut(merge).set_position(Point::new(0.0, 270.0));
        let linker = LinkerConfig::new(50.0, 40.0, 10.0);

        let inputs = of_kind(&segments(&graph, cell(), &linker, true), SegmentKind::Input);

        // Sorted by parent x: the left parent gets index 0.
        assert_eq!(inputs[0].from, Point::new(50.0, 270.0));
        assert_eq!(inputs[1].from, Point::new(60.0, 270.0));
    }

    #[test]
    fn test_single_cell_has_no_connectors() {
        let mut graph = MergeGraph::new();
        graph.add_cell(Id::new("con_single"), ()).unwrap();

        assert!(segments(&graph, cell(), &LinkerConfig::default(), true).is_empty());
    }
}
