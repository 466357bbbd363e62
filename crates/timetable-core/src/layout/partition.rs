//! Split committed sections into per-day event lists.

use std::collections::BTreeMap;

use super::EventKey;
use crate::catalog::GRID_DAYS;
use crate::plan::AddedItem;

/// One (slot, day) occurrence to be laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct DayEvent {
    pub key: EventKey,
    pub start: f64,
    pub end: f64,
}

/// Group every slot occurrence by weekday. Days outside the grid
/// (Sunday) are dropped. Events keep plan order within a day.
pub fn partition_by_day(items: &[AddedItem]) -> BTreeMap<u8, Vec<DayEvent>> {
    let mut by_day: BTreeMap<u8, Vec<DayEvent>> = BTreeMap::new();
    for item in items {
        for (slot_index, slot) in item.sec.slots.iter().enumerate() {
            for &day in &slot.days {
                if !GRID_DAYS.contains(&day) {
                    continue;
                }
                by_day.entry(day).or_default().push(DayEvent {
                    key: EventKey {
                        uid: item.uid.clone(),
                        slot_index,
                        day,
                    },
                    start: slot.start,
                    end: slot.end,
                });
            }
        }
    }
    by_day
}
