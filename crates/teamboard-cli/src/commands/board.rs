use clap::Subcommand;
use teamboard_core::{Month, Window};

use super::{open_ledger, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum BoardAction {
    /// Points leaderboard
    Points {
        /// Window: YYYY-MM-DD (its week), YYYY-MM, YYYY-Qn or YYYY.
        /// Defaults to the current week.
        window: Option<Window>,
    },
    /// FYC leaderboard with target progress
    Revenue {
        /// Window: YYYY-MM, YYYY-Qn or YYYY. Defaults to the current year.
        window: Option<Window>,
    },
    /// Recruit leaderboard
    Recruits,
    /// Monthly champion
    Champion {
        /// Month (YYYY-MM), default this month
        month: Option<Month>,
    },
}

pub fn run(action: BoardAction) -> CliResult {
    let ledger = open_ledger()?;

    match action {
        BoardAction::Points { window } => {
            let window = window.unwrap_or_else(|| Window::weekly(today()));
            print_json(&ledger.points_board(&window)?)?;
        }
        BoardAction::Revenue { window } => {
            let window = window.unwrap_or_else(|| Window::yearly(Month::of(today()).year()));
            print_json(&ledger.revenue_board(&window)?)?;
        }
        BoardAction::Recruits => {
            print_json(&ledger.recruit_board()?)?;
        }
        BoardAction::Champion { month } => {
            let month = month.unwrap_or_else(|| Month::of(today()));
            match ledger.monthly_champion(month)? {
                Some(champion) => print_json(&champion)?,
                None => println!("no champion for {month}"),
            }
        }
    }
    Ok(())
}
