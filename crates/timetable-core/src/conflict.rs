//! Time-conflict detection between candidate slots and a committed plan.
//!
//! Intervals are half-open: a slot ending at 10.0 and one starting at 10.0
//! do not overlap. Conflicts are advisory under [`ConflictPolicy::Advisory`];
//! [`ConflictPolicy::Strict`] additionally refuses a batch that would put
//! more than `max_concurrent` slots on top of each other on some day.

use std::collections::BTreeSet;

use crate::catalog::TimeSlot;
use crate::plan::AddedItem;

/// Half-open overlap test on `[start, end)` intervals.
pub fn overlaps(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> bool {
    a_start < b_end && b_start < a_end
}

/// How detected overlaps affect a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Report overlaps, always commit.
    Advisory,
    /// Report overlaps and refuse commits that exceed the concurrency limit.
    Strict { max_concurrent: usize },
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self::Advisory
    }
}

/// A day on which a candidate batch would exceed the concurrency limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapViolation {
    pub day: u8,
    pub peak: usize,
    pub limit: usize,
}

/// Labels (`"<code> <section>"`) of committed sections that overlap any
/// candidate slot on a shared day.
pub fn detect_conflicts<'a, I>(candidates: I, items: &[AddedItem]) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a TimeSlot>,
{
    let mut labels = BTreeSet::new();
    for candidate in candidates {
        for item in items {
            if item.sec.slots.iter().any(|s| candidate.conflicts_with(s)) {
                labels.insert(item.label());
            }
        }
    }
    labels
}

/// Largest number of intervals active at one instant.
///
/// Ends sort before starts at equal times, so touching intervals never
/// count as concurrent.
pub fn peak_concurrency(intervals: &[(f64, f64)]) -> usize {
    let mut edges: Vec<(f64, i32)> = Vec::with_capacity(intervals.len() * 2);
    for &(start, end) in intervals {
        if start < end {
            edges.push((start, 1));
            edges.push((end, -1));
        }
    }
    edges.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut active = 0i32;
    let mut peak = 0i32;
    for (_, delta) in edges {
        active += delta;
        peak = peak.max(active);
    }
    peak as usize
}

/// Check a candidate batch against the concurrency limit.
///
/// Concurrency is measured only inside each candidate slot's `[start, end)`
/// window, so stacks elsewhere on the day never block a candidate. Returns
/// the first offending day.
pub fn check_overlap_limit<'a, I>(
    candidates: I,
    items: &[AddedItem],
    limit: usize,
) -> Option<OverlapViolation>
where
    I: IntoIterator<Item = &'a TimeSlot>,
{
    let candidates: Vec<&TimeSlot> = candidates.into_iter().collect();
    let days: BTreeSet<u8> = candidates
        .iter()
        .flat_map(|s| s.days.iter().copied())
        .collect();

    for day in days {
        let on_day: Vec<&TimeSlot> = items
            .iter()
            .flat_map(|item| item.sec.slots.iter())
            .chain(candidates.iter().copied())
            .filter(|s| s.days.contains(&day))
            .collect();

        for window in candidates.iter().filter(|s| s.days.contains(&day)) {
            let clipped: Vec<(f64, f64)> = on_day
                .iter()
                .filter(|s| overlaps(s.start, s.end, window.start, window.end))
                .map(|s| (s.start.max(window.start), s.end.min(window.end)))
                .collect();

            let peak = peak_concurrency(&clipped);
            if peak > limit {
                return Some(OverlapViolation { day, peak, limit });
            }
        }
    }
    None
}
