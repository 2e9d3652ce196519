//! Level assignment.
//!
//! Roots are first pulled up by walking backward from every leaf, so a root
//! sits as far above its deepest leaf as its longest path requires. Levels
//! are then pushed forward from the roots, each child landing one below its
//! lowest parent. Finally everything is shifted so the top level is 0.

use std::collections::{HashMap, VecDeque};

use log::trace;

use super::LevelMap;
use crate::{
    TrellisError,
    structure::{CellIndex, MergeGraph},
};

pub(super) fn assign_levels<P>(graph: &mut MergeGraph<P>) -> Result<LevelMap, TrellisError> {
    graph.ensure_acyclic()?;

    let candidates = collect_root_candidates(graph);

    let mut levels: Vec<Option<i64>> = vec![None; graph.len()];
    let mut min_level = 0;
    let roots: Vec<_> = graph.roots().collect();
    for &root in &roots {
        let level = candidates
            .get(&root)
            .copied()
            .ok_or_else(|| TrellisError::MalformedGraph(graph.cell(root).id()))?;
        trace!(root:% = graph.cell(root).id(), level; "Root level resolved");
        levels[root.index()] = Some(level);
        min_level = min_level.min(level);
    }

    for &root in &roots {
        push_forward(graph, root, &mut levels);
    }

    let mut map: Vec<Vec<CellIndex>> = Vec::new();
    for idx in graph.indices() {
        let level = levels[idx.index()]
            .ok_or_else(|| TrellisError::MalformedGraph(graph.cell(idx).id()))?;
        let level = (level - min_level) as usize;
        if map.len() <= level {
            map.resize_with(level + 1, Vec::new);
        }
        map[level].push(idx);
        graph.cell_mut(idx).set_level(level);
    }

    Ok(LevelMap { levels: map })
}

/// Walks backward from every leaf and keeps, per cell reached, the
/// smallest level relative to any leaf.
///
/// Each walk remembers the best relative level seen per cell and only
/// continues through a cell when it improves on it, so a cell is expanded
/// at most once per improvement for each leaf. Only the entries of roots are
/// read afterwards.
fn collect_root_candidates<P>(graph: &MergeGraph<P>) -> HashMap<CellIndex, i64> {
    let mut candidates: HashMap<CellIndex, i64> = HashMap::new();
    let mut record = |idx: CellIndex, level: i64| {
        candidates
            .entry(idx)
            .and_modify(|best| *best = (*best).min(level))
            .or_insert(level);
    };

    for leaf in graph.leaves() {
        record(leaf, 0);

        let mut best: HashMap<CellIndex, i64> = HashMap::from([(leaf, 0)]);
        let mut queue = VecDeque::from([(leaf, 0)]);
        while let Some((idx, relative)) = queue.pop_front() {
            let proposed = relative - 1;
            for &parent in graph.cell(idx).parents() {
                if best.get(&parent).is_none_or(|&seen| proposed < seen) {
                    record(parent, proposed);
                    best.insert(parent, proposed);
                    queue.push_back((parent, proposed));
                }
            }
        }
    }

    candidates
}

/// Places every descendant of `root` at least one level below each parent.
fn push_forward<P>(graph: &MergeGraph<P>, root: CellIndex, levels: &mut [Option<i64>]) {
    let mut queue = VecDeque::from([root]);
    while let Some(idx) = queue.pop_front() {
        let Some(level) = levels[idx.index()] else {
            continue;
        };
        for &child in graph.cell(idx).children() {
            let proposed = level + 1;
            if levels[child.index()].is_none_or(|existing| existing < proposed) {
                levels[child.index()] = Some(proposed);
                queue.push_back(child);
            }
        }
    }
}
