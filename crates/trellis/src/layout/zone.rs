//! Overlap removal within one level.
//!
//! Cells of a level are swept left to right by x. Cells closer than one slot
//! to their left neighbor join its zone. Each zone is then spread to one slot
//! per member around the mean of its members, and pushed right when it would
//! run into the zone before it.

/// A run of cells that overlapped before expansion.
#[derive(Debug)]
struct Zone {
    /// Indices into the input row, in ascending x order.
    members: Vec<usize>,
    /// Right edge of the last member.
    right: f32,
}

/// Returns non-overlapping x positions for a row of cells.
///
/// `xs` holds the left edge of every cell, in any order; `slot` is the width
/// of one cell plus the gap that must follow it. The result is indexed like
/// `xs`. Cells keep their relative left-to-right order, ties broken by input
/// position.
///
/// # Examples
///
/// ```
/// use trellis::layout::zone::expand_row;
///
/// // Two cells on top of each other spread around their shared position.
/// assert_eq!(expand_row(&[0.0, 0.0], 150.0), vec![-75.0, 75.0]);
///
/// // Cells already a slot apart stay where they are.
/// assert_eq!(expand_row(&[300.0, 0.0], 150.0), vec![300.0, 0.0]);
/// ```
pub fn expand_row(xs: &[f32], slot: f32) -> Vec<f32> {
    let mut order: Vec<usize> = (0..xs.len()).collect();
    order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));

    let mut zones: Vec<Zone> = Vec::new();
    for i in order {
        let x = xs[i];
        match zones.last_mut() {
            Some(zone) if zone.right > x => {
                zone.members.push(i);
                zone.right = x + slot;
            }
            _ => zones.push(Zone {
                members: vec![i],
                right: x + slot,
            }),
        }
    }

    let mut result = xs.to_vec();
    let mut previous_right: Option<f32> = None;
    for zone in &zones {
        let count = zone.members.len() as f32;
        let width = count * slot;
        let mean = zone.members.iter().map(|&i| xs[i]).sum::<f32>() / count;
        let center = mean + slot / 2.0;

        let mut left = center - width / 2.0;
        if let Some(limit) = previous_right {
            left = left.max(limit);
        }

        for (n, &i) in zone.members.iter().enumerate() {
            result[i] = left + n as f32 * slot;
        }
        previous_right = Some(left + width);
    }

    result
}
