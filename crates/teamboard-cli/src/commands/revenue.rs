use clap::Subcommand;
use teamboard_core::{ActivityStore, Month};

use super::{open_ledger, print_json, CliResult};

#[derive(Subcommand)]
pub enum RevenueAction {
    /// Set a member's FYC for a month
    Set {
        /// Member name
        member: String,
        /// Month (YYYY-MM)
        month: String,
        /// FYC amount
        amount: f64,
    },
    /// List recorded figures
    List {
        /// Only this month (YYYY-MM)
        #[arg(long)]
        month: Option<Month>,
    },
}

pub fn run(action: RevenueAction) -> CliResult {
    let ledger = open_ledger()?;

    match action {
        RevenueAction::Set {
            member,
            month,
            amount,
        } => {
            ledger.record_revenue(&member, &month, amount)?;
            println!("ok");
        }
        RevenueAction::List { month } => {
            let mut rows = ledger.store().list_revenue()?;
            if let Some(month) = month {
                rows.retain(|r| r.month == month);
            }
            print_json(&rows)?;
        }
    }
    Ok(())
}
