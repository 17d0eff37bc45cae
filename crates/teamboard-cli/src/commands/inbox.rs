use chrono::Utc;
use clap::Subcommand;

use super::{open_ledger, print_json, CliResult};

#[derive(Subcommand)]
pub enum InboxAction {
    /// Show teammates' activities since the last acknowledgement
    Show {
        /// Member name
        member: String,
    },
    /// Mark everything as read
    Ack {
        /// Member name
        member: String,
    },
}

pub fn run(action: InboxAction) -> CliResult {
    let ledger = open_ledger()?;

    match action {
        InboxAction::Show { member } => {
            print_json(&ledger.pending_notifications(&member)?)?;
        }
        InboxAction::Ack { member } => {
            let cursor = ledger.acknowledge(&member, Utc::now())?;
            print_json(&cursor)?;
        }
    }
    Ok(())
}
