//! Plan book commands.

use clap::Subcommand;

use crate::workspace::{confirm, fmt_day, fmt_hour, CliResult, Workspace};

#[derive(Subcommand)]
pub enum PlanAction {
    /// List plans (current marked with *)
    List,
    /// Switch to a plan, creating it if needed
    Use {
        /// Plan name
        name: String,
    },
    /// Show sections in the current plan
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print total credits of the current plan
    Credits,
    /// Remove every section from the current plan
    Clear {
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(ws: &Workspace, action: PlanAction) -> CliResult {
    let mut book = ws.plans()?;

    match action {
        PlanAction::List => {
            let current = book.current_name().to_string();
            for name in book.names() {
                let marker = if name == current { "*" } else { " " };
                if let Some(plan) = book.get(name) {
                    println!(
                        "{marker} {name}  ({} courses, {} credits, updated {})",
                        plan.courses().len(),
                        plan.total_credits(),
                        plan.updated_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        PlanAction::Use { name } => {
            book.use_plan(&name)?;
            ws.save_plans(&book)?;
            println!("now using {}", book.current_name());
        }
        PlanAction::Show { json } => {
            let plan = book.current();
            if json {
                println!("{}", serde_json::to_string_pretty(plan)?);
                return Ok(());
            }
            println!("{}", book.current_name());
            if plan.is_empty() {
                println!("  (empty)");
            }
            for item in plan.items() {
                println!("  {}", item.label());
                for slot in &item.sec.slots {
                    let days: Vec<String> = slot.days.iter().map(|&d| fmt_day(d)).collect();
                    println!(
                        "      {} {}-{}  {}",
                        days.join("/"),
                        fmt_hour(slot.start),
                        fmt_hour(slot.end),
                        slot.venue
                    );
                }
            }
            if let Some(pending) = plan.pending() {
                println!(
                    "  pending: {} {} (choose a matching tutorial/lab)",
                    pending.course_code, pending.lecture_id
                );
            }
        }
        PlanAction::Credits => {
            println!("{}", book.current().total_credits());
        }
        PlanAction::Clear { yes } => {
            if !yes && !confirm("Clear current timetable?")? {
                println!("cancelled");
                return Ok(());
            }
            book.current_mut().clear();
            ws.save_plans(&book)?;
            println!("cleared {}", book.current_name());
        }
    }
    Ok(())
}
