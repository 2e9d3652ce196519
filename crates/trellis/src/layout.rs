//! Layout pipeline turning a resolved [`MergeGraph`] into positioned cells.
//!
//! # Pipeline
//!
//! ```text
//! MergeGraph
//!     ↓ level      depth per cell, grouped into a LevelMap
//!     ↓ balance    slot positions relaxed toward neighbors, rounds bounded
//!     ↓   zone     overlap removal inside one level, after every move
//!     ↓ extent     canvas bounds of all cells
//! Layout
//! ```
//!
//! Everything is computed in the native frame: levels grow along +Y and
//! cells of a level spread along +X. Orientation is applied later by the
//! renderer through [`trellis_core::orientation::FrameTransform`].

mod balance;
mod extent;
mod level;
pub mod zone;

pub use balance::BalanceReport;

use log::{debug, info};

use trellis_core::geometry::{Bounds, Point, Size};

use crate::{
    TrellisError,
    config::LayoutConfig,
    structure::{CellIndex, MergeGraph},
};

/// Cells grouped by level.
///
/// Within a level, cells keep graph insertion order, which is also their
/// initial slot order. Balancing moves cells but never reorders this map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelMap {
    levels: Vec<Vec<CellIndex>>,
}

impl LevelMap {
    /// Returns the number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the cells of `level`, empty if the level does not exist.
    pub fn cells(&self, level: usize) -> &[CellIndex] {
        self.levels.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `(level, cells)` pairs in ascending level order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[CellIndex])> {
        self.levels
            .iter()
            .enumerate()
            .map(|(level, cells)| (level, cells.as_slice()))
    }
}

/// Result of laying out a graph.
///
/// Cell positions are written into the graph itself; this value carries the
/// level grouping and the canvas bounds needed to draw them.
#[derive(Debug, Clone)]
pub struct Layout {
    levels: LevelMap,
    bounds: Bounds,
    report: BalanceReport,
}

impl Layout {
    pub fn levels(&self) -> &LevelMap {
        &self.levels
    }

    /// Returns the minimum corner over all cell positions.
    pub fn origin(&self) -> Point {
        self.bounds.min_point()
    }

    /// Returns the canvas size, cell dimensions included.
    pub fn size(&self) -> Size {
        self.bounds.to_size()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns how the balancing loop ended.
    pub fn report(&self) -> BalanceReport {
        self.report
    }
}

/// Assigns a level and a position to every cell of `graph`.
///
/// # Errors
///
/// Returns [`TrellisError::Config`] for an unusable configuration,
/// [`TrellisError::CyclicGraph`] if the graph has a cycle, and
/// [`TrellisError::MalformedGraph`] if a cell cannot be given a level.
///
/// # Examples
///
/// ```
/// use trellis::{
///     config::LayoutConfig,
///     identifier::Id,
///     layout::compute_layout,
///     structure::{CellSource, GraphSource, MergeGraph},
/// };
///
/// let source = GraphSource::new()
///     .with_cell("final", CellSource::new(()).with_child("semi_a").with_child("semi_b"))
///     .with_cell("semi_a", CellSource::new(()))
///     .with_cell("semi_b", CellSource::new(()));
/// let mut graph = MergeGraph::from_source(source)?;
///
/// let layout = compute_layout(&mut graph, &LayoutConfig::default())?;
///
/// assert_eq!(layout.levels().len(), 2);
/// assert_eq!(graph.cell_by_id(Id::new("semi_b")).unwrap().level(), Some(1));
/// # Ok::<(), trellis::TrellisError>(())
/// ```
pub fn compute_layout<P>(
    graph: &mut MergeGraph<P>,
    config: &LayoutConfig,
) -> Result<Layout, TrellisError> {
    config.validate()?;
    info!(cells = graph.len(); "Computing layout");

    let levels = level::assign_levels(graph)?;
    debug!(levels = levels.len(); "Levels assigned");

    balance::place_initial(graph, &levels, config);
    let report = balance::balance(graph, &levels, config);

    let bounds = extent::cell_bounds(graph, config.cell().size());
    info!(
        rounds = report.rounds(),
        converged = report.converged(),
        width = bounds.width(),
        height = bounds.height();
        "Layout computed"
    );

    Ok(Layout {
        levels,
        bounds,
        report,
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use trellis_core::identifier::Id;

    use super::*;
    use crate::structure::{CellSource, GraphSource};

    fn build(cells: &[(&str, &[&str])]) -> MergeGraph<()> {
        let source = cells
            .iter()
            .fold(GraphSource::new(), |source, (id, children)| {
                let cell = children
                    .iter()
                    .fold(CellSource::new(()), |cell, child| cell.with_child(*child));
                source.with_cell(*id, cell)
            });
        MergeGraph::from_source(source).unwrap()
    }

    fn x_of(graph: &MergeGraph<()>, id: &str) -> f32 {
        graph.cell_by_id(Id::new(id)).unwrap().position().x()
    }

    #[test]
    fn test_diamond_layout() {
        let mut graph = build(&[
            ("dia_a", &["dia_b", "dia_c"]),
            ("dia_b", &["dia_d"]),
            ("dia_c", &["dia_d"]),
            ("dia_d", &[]),
        ]);

        let layout = compute_layout(&mut graph, &LayoutConfig::default()).unwrap();

        assert!(layout.report().converged());
        assert_eq!(layout.report().rounds(), 4);
        assert!(approx_eq!(f32, x_of(&graph, "dia_a"), 0.0, epsilon = 1e-3));
        assert!(approx_eq!(f32, x_of(&graph, "dia_b"), -75.0, epsilon = 1e-3));
        assert!(approx_eq!(f32, x_of(&graph, "dia_c"), 75.0, epsilon = 1e-3));
        let mean = (x_of(&graph, "dia_b") + x_of(&graph, "dia_c")) / 2.0;
        assert!(approx_eq!(f32, x_of(&graph, "dia_d"), mean, epsilon = 1e-3));

        assert_eq!(layout.origin(), Point::new(-75.0, 90.0));
        assert_eq!(layout.size(), Size::new(270.0, 450.0));
    }

    #[test]
    fn test_wide_level_keeps_input_order() {
        let mut graph = build(&[
            ("wide_1", &[]),
            ("wide_2", &[]),
            ("wide_3", &[]),
            ("wide_4", &[]),
            ("wide_5", &[]),
        ]);

        let layout = compute_layout(&mut graph, &LayoutConfig::default()).unwrap();

        assert_eq!(layout.levels().len(), 1);
        assert_eq!(layout.report().rounds(), 1);
        for (i, id) in ["wide_1", "wide_2", "wide_3", "wide_4", "wide_5"]
            .iter()
            .enumerate()
        {
            assert_eq!(x_of(&graph, id), i as f32 * 150.0);
        }
        assert_eq!(layout.size(), Size::new(720.0, 90.0));
    }

    #[test]
    fn test_positions_follow_levels() {
        let mut graph = build(&[
            ("path_a", &["path_b"]),
            ("path_b", &["path_c"]),
            ("path_x", &["path_c"]),
            ("path_c", &[]),
        ]);
        let config = LayoutConfig::default();

        compute_layout(&mut graph, &config).unwrap();

        for cell in graph.cells() {
            let level = cell.level().unwrap();
            assert_eq!(cell.position().y(), config.standard_y(level));
        }
    }

    #[test]
    fn test_empty_graph() {
        let mut graph = MergeGraph::<()>::new();

        let layout = compute_layout(&mut graph, &LayoutConfig::default()).unwrap();

        assert!(layout.levels().is_empty());
        assert_eq!(layout.size(), Size::default());
        assert!(layout.report().converged());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut graph = build(&[("solo", &[])]);
        let config = LayoutConfig::default().with_max_rounds(0);

        let err = compute_layout(&mut graph, &config).unwrap_err();
        assert!(matches!(err, TrellisError::Config(_)));
        assert!(graph.cell_by_id(Id::new("solo")).unwrap().level().is_none());
    }

    #[test]
    fn test_nan_padding_rejected_before_placement() {
        let mut graph = build(&[("nan_a", &["nan_b"]), ("nan_b", &[])]);
        let config: LayoutConfig = toml::from_str("[cell]\npadding = nan").unwrap();

        let err = compute_layout(&mut graph, &config).unwrap_err();
        assert!(matches!(err, TrellisError::Config(_)));
        assert_eq!(x_of(&graph, "nan_a"), 0.0);
    }

    #[test]
    fn test_cycle_rejected() {
        let mut graph = build(&[("loop_a", &["loop_b"]), ("loop_b", &["loop_a"])]);

        let err = compute_layout(&mut graph, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, TrellisError::CyclicGraph(_)));
    }

    #[test]
    fn test_level_map_out_of_range() {
        let levels = LevelMap::default();
        assert!(levels.cells(3).is_empty());
        assert_eq!(levels.iter().count(), 0);
    }
}
