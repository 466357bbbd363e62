//! Selecting and removing sections in the current plan.

use timetable_core::{PlanError, SelectOutcome, Selector};

use crate::workspace::{confirm, CliResult, Workspace};

pub fn select(ws: &Workspace, code: &str, section: &str, json: bool) -> CliResult {
    let catalog = ws.catalog()?;
    let mut book = ws.plans()?;
    let selector = Selector::new(&catalog).with_rules(ws.config.selection_rules());

    let outcome = selector.try_select(book.current_mut(), code, section)?;
    ws.save_plans(&book)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        SelectOutcome::Pending { lecture_id } => {
            println!(
                "Selected Lecture {lecture_id}. Please choose the matching Tutorial/Lab to complete the selection."
            );
        }
        SelectOutcome::Committed { added, conflicts } => {
            if !conflicts.is_empty() {
                let list: Vec<&str> = conflicts.iter().map(String::as_str).collect();
                println!("Time Conflict with {}", list.join(", "));
            }
            if added.is_empty() {
                println!("already in plan");
            } else {
                println!("Added: {}", added.join(", "));
            }
        }
        SelectOutcome::Rejected(reason) => println!("{reason}"),
    }
    Ok(())
}

pub fn cancel(ws: &Workspace) -> CliResult {
    let mut book = ws.plans()?;
    match book.current_mut().cancel_pending() {
        Some(pending) => {
            ws.save_plans(&book)?;
            println!("cancelled {} {}", pending.course_code, pending.lecture_id);
        }
        None => println!("nothing pending"),
    }
    Ok(())
}

/// Remove a course, given its code or the uid of any of its sections.
pub fn remove(ws: &Workspace, target: &str, yes: bool) -> CliResult {
    let mut book = ws.plans()?;
    let plan = book.current_mut();

    let code = plan
        .items()
        .iter()
        .find(|i| i.uid == target || i.code == target)
        .map(|i| i.code.clone())
        .ok_or_else(|| PlanError::NotAdded(target.to_string()))?;

    if !yes
        && !confirm(&format!(
            "Remove all sections of {code} from current plan? This will delete lecture(s) and any tutorial/lab associated."
        ))?
    {
        println!("cancelled");
        return Ok(());
    }

    let removed = plan.remove_course(&code);
    ws.save_plans(&book)?;
    println!("Removed: {}", removed.join(", "));
    Ok(())
}
