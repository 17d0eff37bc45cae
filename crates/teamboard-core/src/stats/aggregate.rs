//! Per-member totals over a reporting window.
//!
//! Results are seeded from the roster, so idle members still show up with a
//! zero tally. The weekly incentive relies on this to see who logged nothing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::window::Window;
use crate::activity::ActivityRecord;
use crate::error::ValidationError;
use crate::revenue::MonthlyRevenue;

/// Points and activity count for one member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub score: u64,
    pub count: u32,
}

impl Tally {
    pub fn new(score: u64, count: u32) -> Self {
        Self { score, count }
    }
}

/// Member name to tally, one entry per roster member.
pub type PointsBoard = BTreeMap<String, Tally>;

/// Member name to FYC total, one entry per roster member.
pub type RevenueBoard = BTreeMap<String, f64>;

/// Sum points and count activities per roster member inside `window`.
///
/// Records are bucketed by `occurred_on`. Records from members who are not
/// on the roster are ignored.
///
/// # Errors
/// Returns an error if the window's bounds cannot be computed.
pub fn aggregate<I>(
    roster: I,
    records: &[ActivityRecord],
    window: &Window,
) -> Result<PointsBoard, ValidationError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let (start, end) = window.bounds()?;
    let mut board: PointsBoard = roster
        .into_iter()
        .map(|m| (m.as_ref().to_string(), Tally::default()))
        .collect();

    for record in records
        .iter()
        .filter(|r| r.occurred_on >= start && r.occurred_on < end)
    {
        if let Some(tally) = board.get_mut(&record.member) {
            tally.score += u64::from(record.points);
            tally.count += 1;
        }
    }

    tracing::debug!(
        window = %window,
        members = board.len(),
        records = records.len(),
        "aggregated points"
    );
    Ok(board)
}

/// Sum FYC per roster member over the months covered by `window`.
///
/// A monthly window is a direct lookup, a quarter sums its three months and a
/// year sums all twelve. Members with no figures get `0.0`.
///
/// # Errors
/// Weekly windows are rejected: revenue is recorded per month.
pub fn aggregate_revenue<I>(
    roster: I,
    revenue: &[MonthlyRevenue],
    window: &Window,
) -> Result<RevenueBoard, ValidationError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let months = window.months().ok_or_else(|| ValidationError::UnsupportedWindow {
        what: "revenue",
        reason: "revenue is recorded per month, not per week".into(),
    })?;

    let mut board: RevenueBoard = roster
        .into_iter()
        .map(|m| (m.as_ref().to_string(), 0.0))
        .collect();

    for row in revenue.iter().filter(|r| months.contains(&r.month)) {
        if let Some(total) = board.get_mut(&row.member) {
            *total += row.amount;
        }
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityType;
    use chrono::{Days, NaiveDate, Utc};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rec(id: i64, member: &str, on: NaiveDate, t: ActivityType) -> ActivityRecord {
        ActivityRecord::new(id, member, on, t, "", Utc::now())
    }

    fn fyc(member: &str, month: &str, amount: f64) -> MonthlyRevenue {
        MonthlyRevenue {
            member: member.into(),
            month: month.parse().unwrap(),
            amount,
        }
    }

    #[test]
    fn weekly_sums_and_counts_by_occurred_on() {
        let records = vec![
            rec(1, "Tim", d(2026, 1, 4), ActivityType::PolicySigned), // previous Sunday
            rec(2, "Tim", d(2026, 1, 5), ActivityType::Meeting),
            rec(3, "Tim", d(2026, 1, 11), ActivityType::PolicySigned),
            rec(4, "Oscar", d(2026, 1, 7), ActivityType::RecruitTalk),
            rec(5, "Oscar", d(2026, 1, 12), ActivityType::Meeting), // next Monday
        ];
        let board = aggregate(["Tim", "Oscar"], &records, &Window::weekly(d(2026, 1, 7))).unwrap();
        assert_eq!(board["Tim"], Tally::new(6, 2));
        assert_eq!(board["Oscar"], Tally::new(2, 1));
    }

    #[test]
    fn idle_members_present_with_zero() {
        let board = aggregate(["Tim", "Maggie"], &[], &Window::yearly(2026)).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board["Maggie"], Tally::default());
    }

    #[test]
    fn empty_roster_gives_empty_board() {
        let records = vec![rec(1, "Tim", d(2026, 1, 5), ActivityType::Meeting)];
        let board = aggregate(Vec::<String>::new(), &records, &Window::yearly(2026)).unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn off_roster_records_ignored() {
        let records = vec![rec(1, "Admin", d(2026, 1, 5), ActivityType::PolicySigned)];
        let board = aggregate(["Tim"], &records, &Window::yearly(2026)).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board["Tim"], Tally::default());
    }

    #[test]
    fn revenue_per_window() {
        let rows = vec![
            fyc("Tim", "2026-01", 10_000.0),
            fyc("Tim", "2026-02", 5_000.0),
            fyc("Tim", "2026-04", 1_000.0),
            fyc("Tim", "2025-12", 99_000.0),
            fyc("Oscar", "2026-03", 2_500.0),
        ];
        let roster = ["Tim", "Oscar", "Wilson"];

        let month = aggregate_revenue(roster, &rows, &Window::monthly(2026, 2).unwrap()).unwrap();
        assert_eq!(month["Tim"], 5_000.0);
        assert_eq!(month["Oscar"], 0.0);

        let q1 = aggregate_revenue(roster, &rows, &Window::quarterly(2026, 1).unwrap()).unwrap();
        assert_eq!(q1["Tim"], 15_000.0);
        assert_eq!(q1["Oscar"], 2_500.0);
        assert_eq!(q1["Wilson"], 0.0);

        let year = aggregate_revenue(roster, &rows, &Window::yearly(2026)).unwrap();
        assert_eq!(year["Tim"], 16_000.0);
    }

    #[test]
    fn revenue_rejects_weekly_window() {
        let err = aggregate_revenue(["Tim"], &[], &Window::weekly(d(2026, 1, 7))).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedWindow { .. }));
    }

    proptest! {
        #[test]
        fn board_has_exactly_one_entry_per_roster_member(
            roster in prop::collection::btree_set("[a-e]{1,2}", 0..8),
            raw in prop::collection::vec(("[a-g]{1,2}", 0u64..28, 0usize..6), 0..40),
        ) {
            let start = d(2026, 1, 5);
            let records: Vec<ActivityRecord> = raw
                .iter()
                .enumerate()
                .map(|(i, (member, offset, kind))| {
                    rec(i as i64, member, start + Days::new(*offset), ActivityType::ALL[*kind])
                })
                .collect();
            let window = Window::weekly(d(2026, 1, 14));
            let board = aggregate(&roster, &records, &window).unwrap();

            let keys: BTreeSet<String> = board.keys().cloned().collect();
            prop_assert_eq!(&keys, &roster);

            let (lo, hi) = window.bounds().unwrap();
            for (member, tally) in &board {
                let mine: Vec<&ActivityRecord> = records
                    .iter()
                    .filter(|r| &r.member == member && r.occurred_on >= lo && r.occurred_on < hi)
                    .collect();
                prop_assert_eq!(tally.count as usize, mine.len());
                prop_assert_eq!(tally.score, mine.iter().map(|r| u64::from(r.points)).sum::<u64>());
            }
        }
    }
}
