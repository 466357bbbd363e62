//! Column assignment for one day's events.
//!
//! Sweep over events sorted by (start, end). An active set holds events that
//! have not finished yet. Each event takes the lowest column no active event
//! uses. Whenever the active set drains, the events seen since the last drain
//! form a closed cluster, and all of them get the cluster's peak concurrency
//! as their column count.
//!
//! First-fit on an interval order never needs more columns than the peak
//! concurrency, so every column index is below its cluster's column count.

use super::{DayEvent, EventKey, LayoutEntry};

struct Active {
    end: f64,
    column: usize,
}

/// Assign columns to one day's events.
///
/// Output order is sweep order.
pub fn assign_columns(mut events: Vec<DayEvent>) -> Vec<(EventKey, LayoutEntry)> {
    events.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.end.total_cmp(&b.end)));

    let mut placed: Vec<(EventKey, LayoutEntry)> = Vec::with_capacity(events.len());
    let mut active: Vec<Active> = Vec::new();
    let mut cluster_start = 0;
    let mut component_max = 0;

    for event in events {
        active.retain(|a| a.end > event.start);

        if active.is_empty() && cluster_start < placed.len() {
            finalize(&mut placed[cluster_start..], component_max);
            cluster_start = placed.len();
            component_max = 0;
        }

        let mut column = 0;
        while active.iter().any(|a| a.column == column) {
            column += 1;
        }

        active.push(Active {
            end: event.end,
            column,
        });
        placed.push((
            event.key,
            LayoutEntry {
                column,
                column_count: 1,
            },
        ));
        component_max = component_max.max(active.len());
    }

    if cluster_start < placed.len() {
        finalize(&mut placed[cluster_start..], component_max);
    }

    placed
}

fn finalize(cluster: &mut [(EventKey, LayoutEntry)], column_count: usize) {
    for (_, entry) in cluster {
        entry.column_count = column_count;
    }
}
