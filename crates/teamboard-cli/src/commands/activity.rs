use chrono::NaiveDate;
use clap::Subcommand;
use teamboard_core::{note_template, ActivityType, DatabaseError};

use super::{open_ledger, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Log an activity
    Add {
        /// Member name
        member: String,
        /// Activity type key or label (see `activity types`)
        activity_type: String,
        /// Date it happened (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Free-form note
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Edit an activity; omitted fields keep their value
    Edit {
        /// Activity ID
        id: i64,
        #[arg(long = "type")]
        activity_type: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete an activity
    Delete {
        /// Activity ID
        id: i64,
    },
    /// List activities, newest first
    List {
        /// Only this member's activities
        #[arg(long)]
        member: Option<String>,
    },
    /// List activity types and their points
    Types,
    /// Print the note template for an activity type
    Template {
        /// Activity type key or label
        activity_type: String,
    },
}

pub fn run(action: ActivityAction) -> CliResult {
    match action {
        ActivityAction::Add {
            member,
            activity_type,
            date,
            note,
        } => {
            let ledger = open_ledger()?;
            let id = ledger.log_activity(&member, date.unwrap_or_else(today), &activity_type, &note)?;
            println!("activity logged: {id}");
        }
        ActivityAction::Edit {
            id,
            activity_type,
            date,
            note,
        } => {
            let ledger = open_ledger()?;
            let current = ledger
                .store()
                .get_activity(id)?
                .ok_or_else(|| DatabaseError::NotFound {
                    table: "activities",
                    key: id.to_string(),
                })?;
            let activity_type =
                activity_type.unwrap_or_else(|| current.activity_type.as_str().to_string());
            ledger.edit_activity(
                id,
                date.unwrap_or(current.occurred_on),
                &activity_type,
                note.as_deref().unwrap_or(&current.note),
            )?;
            println!("ok");
        }
        ActivityAction::Delete { id } => {
            let ledger = open_ledger()?;
            ledger.remove_activity(id)?;
            println!("ok");
        }
        ActivityAction::List { member } => {
            let ledger = open_ledger()?;
            let records = match member {
                Some(m) => ledger.activities_of(&m)?,
                None => ledger.activities()?,
            };
            print_json(&records)?;
        }
        ActivityAction::Types => {
            let types: Vec<serde_json::Value> = ActivityType::ALL
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "key": t.as_str(),
                        "label": t.label(),
                        "points": t.points(),
                    })
                })
                .collect();
            print_json(&types)?;
        }
        ActivityAction::Template { activity_type } => {
            let activity_type = ActivityType::parse(&activity_type)?;
            print!("{}", note_template(activity_type));
        }
    }
    Ok(())
}
