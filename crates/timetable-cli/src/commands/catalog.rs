//! Catalog browsing commands.

use clap::Subcommand;
use timetable_core::selection::SectionStatus;
use timetable_core::section_availability;

use crate::workspace::{fmt_day, fmt_hour, CliResult, Workspace};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List subject prefixes
    Subjects,
    /// Show a course's sections and whether each can be selected
    Show {
        /// Course code, e.g. "COMP 1021"
        code: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(ws: &Workspace, action: CatalogAction) -> CliResult {
    let catalog = ws.catalog()?;

    match action {
        CatalogAction::Subjects => {
            for subject in catalog.subjects() {
                println!("{subject}");
            }
        }
        CatalogAction::Show { code, json } => {
            let course = catalog.require_course(&code)?;
            let book = ws.plans()?;
            let rows = section_availability(
                course,
                book.current(),
                ws.config.selection.suffix_match,
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            println!("{} - {} ({} credits)", course.code, course.title, course.credits);
            if course.matching_required {
                println!("Matching between Lecture & Tutorial/Lab required");
            }
            for row in rows {
                let status = match &row.status {
                    SectionStatus::Added => "added".to_string(),
                    SectionStatus::Pending => "selected".to_string(),
                    SectionStatus::Available => "available".to_string(),
                    SectionStatus::Blocked(reason) => format!("blocked: {reason}"),
                };
                println!("  {:<6} [{}]", row.section.id, status);
                for slot in &row.section.slots {
                    let days: Vec<String> = slot.days.iter().map(|&d| fmt_day(d)).collect();
                    println!(
                        "         {} {}-{}  {}  {}",
                        days.join("/"),
                        fmt_hour(slot.start),
                        fmt_hour(slot.end),
                        slot.venue,
                        slot.instructor
                    );
                }
            }
        }
    }
    Ok(())
}
