//! The team ledger: one entry point that binds a store to the engine.
//!
//! Writes are validated here before they reach the store, so every path that
//! creates or edits an activity goes through the same type check and point
//! rules. Reads fetch the full record set and run a pure computation over it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::{validate_member, ActivityRecord, ActivityType};
use crate::error::{ConfigError, Result};
use crate::incentive::{compute_weekly_incentive, replay_season, WeekSettlement};
use crate::notify::{pending_for, NotificationCursor};
use crate::revenue::{validate_amount, Month};
use crate::roster::{leaderboard_roster, MemberProfile, Role};
use crate::stats::{
    aggregate, aggregate_revenue, monthly_champion, rank_by, week_start, Champion,
    RevenueProgress, Standing, Tally, Window,
};
use crate::storage::{ActivityStore, Config};

/// Recruit leaderboard row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruitTally {
    pub recruit_count: u32,
}

pub struct Ledger<S: ActivityStore> {
    store: S,
    config: Config,
}

impl<S: ActivityStore> Ledger<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // -- roster --

    pub fn add_member(&self, member: &str, role: Role) -> Result<()> {
        let member = validate_member(member)?;
        self.store.add_member(member, role)?;
        tracing::info!(member, role = %role, "member added");
        Ok(())
    }

    pub fn members(&self) -> Result<Vec<MemberProfile>> {
        self.store.list_members()
    }

    /// Members who compete on leaderboards and in the weekly game.
    pub fn roster(&self) -> Result<Vec<String>> {
        let profiles = self.store.list_members()?;
        Ok(leaderboard_roster(
            &profiles,
            self.config.leaderboard.include_leaders,
        ))
    }

    pub fn set_recruit_count(&self, member: &str, recruit_count: u32) -> Result<()> {
        let member = validate_member(member)?;
        self.store.set_recruit_count(member, recruit_count)?;
        tracing::info!(member, recruit_count, "recruit count updated");
        Ok(())
    }

    // -- activities --

    /// Log an activity for `member`.
    ///
    /// # Errors
    /// Rejects an empty member or a type outside the enumerated set before
    /// touching the store.
    pub fn log_activity(
        &self,
        member: &str,
        occurred_on: NaiveDate,
        activity_type: &str,
        note: &str,
    ) -> Result<i64> {
        let member = validate_member(member)?;
        let activity_type = ActivityType::parse(activity_type)?;
        let id = self
            .store
            .insert_activity(member, occurred_on, activity_type, note)?;
        tracing::info!(
            id,
            member,
            %occurred_on,
            activity_type = %activity_type,
            points = activity_type.points(),
            "activity logged"
        );
        Ok(id)
    }

    /// Rewrite an activity. Points follow the new type.
    pub fn edit_activity(
        &self,
        id: i64,
        occurred_on: NaiveDate,
        activity_type: &str,
        note: &str,
    ) -> Result<()> {
        let activity_type = ActivityType::parse(activity_type)?;
        self.store
            .update_activity(id, occurred_on, activity_type, note)?;
        tracing::info!(id, %occurred_on, activity_type = %activity_type, "activity edited");
        Ok(())
    }

    pub fn remove_activity(&self, id: i64) -> Result<()> {
        self.store.delete_activity(id)?;
        tracing::info!(id, "activity deleted");
        Ok(())
    }

    /// All activities, newest `occurred_on` first.
    pub fn activities(&self) -> Result<Vec<ActivityRecord>> {
        let mut records = self.store.list_activities()?;
        records.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    pub fn activities_of(&self, member: &str) -> Result<Vec<ActivityRecord>> {
        Ok(self
            .activities()?
            .into_iter()
            .filter(|r| r.member == member)
            .collect())
    }

    // -- revenue --

    /// Set a member's FYC for a month, replacing any earlier figure.
    pub fn record_revenue(&self, member: &str, month: &str, amount: f64) -> Result<()> {
        let member = validate_member(member)?;
        let month: Month = month.parse()?;
        let amount = validate_amount(amount)?;
        self.store.upsert_revenue(member, month, amount)?;
        tracing::info!(member, %month, amount, "revenue recorded");
        Ok(())
    }

    // -- leaderboards --

    pub fn points_board(&self, window: &Window) -> Result<Vec<Standing<Tally>>> {
        let board = aggregate(self.roster()?, &self.store.list_activities()?, window)?;
        Ok(rank_by(board, |t| t.score))
    }

    /// FYC leaderboard with progress toward the window's target: the MDRT
    /// figure for a year, the challenge figure for a quarter, and the
    /// champion threshold for a month.
    pub fn revenue_board(&self, window: &Window) -> Result<Vec<Standing<RevenueProgress>>> {
        let targets = &self.config.targets;
        let target = match window {
            Window::Yearly { .. } => targets.mdrt_fyc,
            Window::Quarterly { .. } => targets.quarterly_challenge,
            Window::Monthly { .. } | Window::Weekly { .. } => targets.monthly_champion_min,
        };
        let board = aggregate_revenue(self.roster()?, &self.store.list_revenue()?, window)?;
        Ok(rank_by(
            board
                .into_iter()
                .map(|(member, fyc)| (member, RevenueProgress::new(fyc, target))),
            |r| r.fyc,
        ))
    }

    pub fn recruit_board(&self) -> Result<Vec<Standing<RecruitTally>>> {
        let include_leaders = self.config.leaderboard.include_leaders;
        let rows = self
            .store
            .list_members()?
            .into_iter()
            .filter(|p| include_leaders || p.role == Role::Member)
            .map(|p| {
                (
                    p.member,
                    RecruitTally {
                        recruit_count: p.recruit_count,
                    },
                )
            });
        Ok(rank_by(rows, |r| r.recruit_count))
    }

    pub fn monthly_champion(&self, month: Month) -> Result<Option<Champion>> {
        let board = aggregate_revenue(
            self.roster()?,
            &self.store.list_revenue()?,
            &Window::Monthly { month },
        )?;
        Ok(monthly_champion(
            &board,
            self.config.targets.monthly_champion_min,
        ))
    }

    // -- weekly incentive --

    /// Settle the week containing `reference`.
    ///
    /// With a configured season start on or before that week, earlier weeks
    /// are replayed so rollover from scoreless weeks is carried in.
    /// Otherwise the week starts with no rollover.
    pub fn weekly_incentive(&self, reference: NaiveDate) -> Result<WeekSettlement> {
        let rules = &self.config.incentive.rules;
        let roster = self.roster()?;
        let records = self.store.list_activities()?;

        if let Some(start) = self.config.incentive.season_start {
            if week_start(start)? <= week_start(reference)? {
                let through = reference.max(start);
                let mut weeks = replay_season(&roster, &records, start, through, rules)?;
                if let Some(current) = weeks.pop() {
                    return Ok(current);
                }
            }
        }

        let board = aggregate(&roster, &records, &Window::weekly(reference))?;
        let outcome = compute_weekly_incentive(&board, rules, 0)?;
        Ok(WeekSettlement {
            week_start: week_start(reference)?,
            board,
            outcome,
        })
    }

    /// Every week of the configured season through `through`.
    ///
    /// # Errors
    /// Fails if `incentive.season_start` is not configured.
    pub fn season(&self, through: NaiveDate) -> Result<Vec<WeekSettlement>> {
        let start = self
            .config
            .incentive
            .season_start
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "incentive.season_start".into(),
                message: "not set".into(),
            })?;
        replay_season(
            &self.roster()?,
            &self.store.list_activities()?,
            start,
            through,
            &self.config.incentive.rules,
        )
    }

    // -- notifications --

    /// Teammates' activities created since `member` last acknowledged.
    pub fn pending_notifications(&self, member: &str) -> Result<Vec<ActivityRecord>> {
        let member = validate_member(member)?;
        let last_read_at = self.store.get_cursor(member)?;
        let records = self.store.list_activities()?;
        Ok(pending_for(member, last_read_at, &records)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Mark everything up to `now` as read for `member`. A `now` earlier than
    /// the stored cursor leaves it where it is.
    pub fn acknowledge(&self, member: &str, now: DateTime<Utc>) -> Result<NotificationCursor> {
        let member = validate_member(member)?;
        let mut cursor = NotificationCursor {
            member: member.to_string(),
            last_read_at: self.store.get_cursor(member)?,
        };
        cursor.acknowledge(now);
        self.store.set_cursor(member, cursor.last_read_at)?;
        tracing::info!(member, last_read_at = %cursor.last_read_at, "notifications acknowledged");
        Ok(cursor)
    }
}
