//! Print the week grid layout of the current plan.

use serde::Serialize;
use timetable_core::catalog::GRID_DAYS;
use timetable_core::{compute_layout, EventKey};

use crate::workspace::{fmt_day, fmt_hour, CliResult, Workspace};

#[derive(Serialize)]
struct Row {
    key: String,
    label: String,
    day: u8,
    start: f64,
    end: f64,
    venue: String,
    column: usize,
    column_count: usize,
}

pub fn run(ws: &Workspace, json: bool) -> CliResult {
    let book = ws.plans()?;
    let plan = book.current();
    let layout = compute_layout(plan.items());

    let mut rows = Vec::with_capacity(layout.len());
    for item in plan.items() {
        for (slot_index, slot) in item.sec.slots.iter().enumerate() {
            for &day in slot.days.iter().filter(|d| GRID_DAYS.contains(*d)) {
                let key = EventKey {
                    uid: item.uid.clone(),
                    slot_index,
                    day,
                };
                if let Some(entry) = layout.get(&key) {
                    rows.push(Row {
                        key: key.to_string(),
                        label: item.label(),
                        day,
                        start: slot.start,
                        end: slot.end,
                        venue: slot.venue.clone(),
                        column: entry.column,
                        column_count: entry.column_count,
                    });
                }
            }
        }
    }
    rows.sort_by(|a, b| a.day.cmp(&b.day).then(a.start.total_cmp(&b.start)));

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("(empty timetable)");
    }
    for row in rows {
        println!(
            "{} {}-{}  {:<16} col {}/{}  {}",
            fmt_day(row.day),
            fmt_hour(row.start),
            fmt_hour(row.end),
            row.label,
            row.column + 1,
            row.column_count,
            row.venue
        );
    }
    Ok(())
}
