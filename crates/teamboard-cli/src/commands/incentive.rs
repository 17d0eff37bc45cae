use chrono::NaiveDate;
use clap::Subcommand;

use super::{open_ledger, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum IncentiveAction {
    /// Settle the week containing a date
    Week {
        /// Any date in the week (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Settle every week from `incentive.season_start`
    Season {
        /// Last date to include (YYYY-MM-DD), default today
        #[arg(long)]
        through: Option<NaiveDate>,
    },
}

pub fn run(action: IncentiveAction) -> CliResult {
    let ledger = open_ledger()?;

    match action {
        IncentiveAction::Week { date } => {
            let settlement = ledger.weekly_incentive(date.unwrap_or_else(today))?;
            print_json(&settlement)?;
        }
        IncentiveAction::Season { through } => {
            let weeks = ledger.season(through.unwrap_or_else(today))?;
            print_json(&weeks)?;
        }
    }
    Ok(())
}
