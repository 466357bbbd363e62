//! # Timetable Core Library
//!
//! Business logic for the course timetable planner. Front-ends (the
//! `timetable` CLI, a web view) load a static course catalog, let the user
//! pick sections into named plans, and render the week grid from the layout
//! this crate computes.
//!
//! ## Architecture
//!
//! - **Catalog**: courses, sections and recurring time slots; section kinds
//!   are resolved once at load time
//! - **Layout**: per-day column assignment so overlapping classes sit side by
//!   side
//! - **Conflicts**: half-open overlap checks between candidate and committed
//!   slots
//! - **Selection**: the lecture/tutorial/lab matching state machine
//! - **Storage**: TOML configuration and the JSON plan book
//!
//! ## Key Components
//!
//! - [`Catalog`]: course lookup
//! - [`Plan`]: committed sections plus the pending selection
//! - [`Selector`]: applies selections to a plan
//! - [`compute_layout`]: grid layout of a plan

pub mod catalog;
pub mod conflict;
pub mod error;
pub mod layout;
pub mod plan;
pub mod selection;
pub mod storage;

pub use catalog::{Catalog, Course, Section, SectionKind, TimeSlot};
pub use conflict::{detect_conflicts, overlaps, ConflictPolicy};
pub use error::{CatalogError, ConfigError, CoreError, PlanError, ValidationError};
pub use layout::{compute_layout, EventKey, Layout, LayoutEntry};
pub use plan::{AddedItem, Plan};
pub use selection::{
    section_availability, PendingLecture, Rejection, SelectOutcome, SelectionRules,
    SelectionState, Selector, SuffixMatch,
};
pub use storage::{Config, PlanBook};
