mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, IncentiveConfig, LeaderboardConfig, TargetsConfig};
pub use database::Database;

use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;

use crate::activity::{ActivityRecord, ActivityType};
use crate::error::Result;
use crate::revenue::{Month, MonthlyRevenue};
use crate::roster::{MemberProfile, Role};

/// Storage contract the ledger runs against.
///
/// Implementations assign activity ids and creation times, derive points from
/// the activity type on every write, and serialize concurrent writes to the
/// same key. Failures are returned as-is; nothing here retries.
pub trait ActivityStore {
    fn list_activities(&self) -> Result<Vec<ActivityRecord>>;

    /// Append an activity and return its new id.
    fn insert_activity(
        &self,
        member: &str,
        occurred_on: NaiveDate,
        activity_type: ActivityType,
        note: &str,
    ) -> Result<i64>;

    /// Rewrite date, type and note; points are recomputed from the new type.
    fn update_activity(
        &self,
        id: i64,
        occurred_on: NaiveDate,
        activity_type: ActivityType,
        note: &str,
    ) -> Result<()>;

    fn delete_activity(&self, id: i64) -> Result<()>;

    fn list_revenue(&self) -> Result<Vec<MonthlyRevenue>>;

    /// Create or overwrite the amount for `(member, month)`.
    fn upsert_revenue(&self, member: &str, month: Month, amount: f64) -> Result<()>;

    fn list_members(&self) -> Result<Vec<MemberProfile>>;

    /// Add a member if absent; an existing profile is left untouched.
    fn add_member(&self, member: &str, role: Role) -> Result<()>;

    fn set_recruit_count(&self, member: &str, recruit_count: u32) -> Result<()>;

    /// Last acknowledged time, or [`crate::notify::NEVER_READ`].
    fn get_cursor(&self, member: &str) -> Result<DateTime<Utc>>;

    fn set_cursor(&self, member: &str, last_read_at: DateTime<Utc>) -> Result<()>;
}

/// Returns the teamboard data directory.
///
/// `TEAMBOARD_DATA_DIR` is used verbatim when set. Otherwise this is
/// `~/.config/teamboard/`, or `~/.config/teamboard-dev/` with
/// `TEAMBOARD_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("TEAMBOARD_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TEAMBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("teamboard-dev")
            } else {
                base_dir.join("teamboard")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
