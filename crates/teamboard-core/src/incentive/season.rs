//! Week-by-week settlement of a season.
//!
//! Rollover is never stored: it is recovered by settling every week from the
//! season start in order and feeding each week's carry into the next.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{compute_weekly_incentive, IncentiveRules, WeeklyIncentive};
use crate::activity::ActivityRecord;
use crate::error::{Result, ValidationError};
use crate::stats::{aggregate, week_start, PointsBoard, Window};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSettlement {
    pub week_start: NaiveDate,
    pub board: PointsBoard,
    pub outcome: WeeklyIncentive,
}

/// Settle every week from the one containing `season_start` through the one
/// containing `through`, threading rollover between weeks.
///
/// # Errors
/// Fails if `through` precedes `season_start` or the rules are invalid.
pub fn replay_season(
    roster: &[String],
    records: &[ActivityRecord],
    season_start: NaiveDate,
    through: NaiveDate,
    rules: &IncentiveRules,
) -> Result<Vec<WeekSettlement>> {
    if through < season_start {
        return Err(ValidationError::InvalidValue {
            field: "through".into(),
            message: format!("{through} is before the season start {season_start}"),
        }
        .into());
    }

    let last_week = week_start(through)?;
    let mut week = week_start(season_start)?;
    let mut carried = 0;
    let mut settlements = Vec::new();

    while week <= last_week {
        let board = aggregate(roster, records, &Window::weekly(week))?;
        let outcome = compute_weekly_incentive(&board, rules, carried)?;
        carried = outcome.new_rollover;
        settlements.push(WeekSettlement {
            week_start: week,
            board,
            outcome,
        });
        week = match week.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }

    tracing::debug!(weeks = settlements.len(), carried, "season replayed");
    Ok(settlements)
}
