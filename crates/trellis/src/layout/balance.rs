//! Horizontal balancing.
//!
//! Every round moves each cell toward the mean x of its structural
//! neighbors, level by level from the top, and resolves overlaps inside the
//! level right after it moved. Rounds stop once the movement per level
//! settles or the round budget runs out.

use log::{debug, trace};

use trellis_core::geometry::Point;

use super::{LevelMap, zone};
use crate::{
    config::LayoutConfig,
    structure::{CellIndex, MergeGraph},
};

/// How the balancing loop ended.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BalanceReport {
    rounds: usize,
    changed: f32,
    converged: bool,
}

impl BalanceReport {
    /// Returns the number of rounds executed.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Returns the movement change measured in the last round.
    pub fn changed(&self) -> f32 {
        self.changed
    }

    /// Returns `true` if the loop stopped because movement settled rather
    /// than because the round budget ran out.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Puts every cell into its slot: x from its position within the level,
/// y from the level.
pub(super) fn place_initial<P>(graph: &mut MergeGraph<P>, levels: &LevelMap, config: &LayoutConfig) {
    for (level, cells) in levels.iter() {
        let y = config.standard_y(level);
        for (slot, &idx) in cells.iter().enumerate() {
            graph
                .cell_mut(idx)
                .set_position(Point::new(config.standard_x(slot), y));
        }
    }
}

pub(super) fn balance<P>(
    graph: &mut MergeGraph<P>,
    levels: &LevelMap,
    config: &LayoutConfig,
) -> BalanceReport {
    if levels.is_empty() {
        return BalanceReport {
            rounds: 0,
            changed: 0.0,
            converged: true,
        };
    }

    let slot = config.slot_width();
    let threshold = config.convergence_threshold();
    let mut previous = vec![0.0f32; levels.len()];
    let mut prev_x = vec![0.0f32; graph.len()];
    let mut report = BalanceReport::default();

    for round in 1..=config.max_rounds() {
        let mut current = vec![0.0f32; levels.len()];

        for (level, cells) in levels.iter() {
            for &idx in cells {
                prev_x[idx.index()] = graph.cell(idx).position().x();
                let x = balanced_x(graph, idx);
                graph.cell_mut(idx).set_x(x);
            }

            let xs: Vec<f32> = cells
                .iter()
                .map(|&idx| graph.cell(idx).position().x())
                .collect();
            for (&idx, x) in cells.iter().zip(zone::expand_row(&xs, slot)) {
                graph.cell_mut(idx).set_x(x);
                current[level] += (x - prev_x[idx.index()]).abs();
            }
        }

        let changed: f32 = current
            .iter()
            .zip(&previous)
            .map(|(cur, prev)| (cur - prev).abs())
            .sum();
        trace!(round, changed; "Balancing round finished");

        report = BalanceReport {
            rounds: round,
            changed,
            converged: changed < threshold,
        };
        if report.converged {
            break;
        }
        previous = current;
    }

    debug!(
        rounds = report.rounds,
        changed = report.changed,
        converged = report.converged;
        "Balancing finished"
    );
    report
}

/// Returns the x that moves `idx` to the mean of its neighbors.
///
/// A cell with exactly one parent only follows its children; any other cell
/// follows its children and its parents. Cells without neighbors stay.
fn balanced_x<P>(graph: &MergeGraph<P>, idx: CellIndex) -> f32 {
    let cell = graph.cell(idx);
    let x = cell.position().x();

    let parents: &[CellIndex] = if cell.parents().len() == 1 {
        &[]
    } else {
        cell.parents()
    };

    let (force, count) = cell
        .children()
        .iter()
        .chain(parents)
        .fold((0.0f32, 0usize), |(force, count), &other| {
            (force + graph.cell(other).position().x() - x, count + 1)
        });

    if count == 0 {
        x
    } else {
        x + force / count as f32
    }
}
