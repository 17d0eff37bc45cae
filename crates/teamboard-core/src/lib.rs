//! # Teamboard Core Library
//!
//! This library provides the core business logic for Teamboard, an activity
//! ledger for a small sales team. Members log dated activities that earn
//! points, report monthly first-year commission (FYC), and compete in a
//! weekly pool funded by penalties on members who fall below the minimum
//! activity count.
//!
//! Everything is available through the standalone `teamboard` CLI, which is a
//! thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Activity**: the type catalogue, the point rules and note templates
//! - **Stats**: window bucketing, per-member aggregation and ranking
//! - **Incentive**: weekly pool settlement and season replay with rollover
//! - **Notify**: per-member read cursors over teammates' new activities
//! - **Storage**: SQLite persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`Ledger`]: validated writes and computed boards over a store
//! - [`Database`]: SQLite implementation of [`ActivityStore`]
//! - [`Config`]: application configuration management
//! - [`compute_weekly_incentive`]: settlement of one week's board

pub mod activity;
pub mod error;
pub mod incentive;
pub mod ledger;
pub mod notify;
pub mod revenue;
pub mod roster;
pub mod stats;
pub mod storage;

pub use activity::{note_template, points_for, ActivityRecord, ActivityType};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use incentive::{
    compute_weekly_incentive, replay_season, IncentiveRules, LaggardRule, PoolSource,
    WeekSettlement, WeeklyIncentive, WinnerEligibility,
};
pub use ledger::{Ledger, RecruitTally};
pub use notify::{pending_for, NotificationCursor, NEVER_READ};
pub use revenue::{Month, MonthlyRevenue};
pub use roster::{MemberProfile, Role};
pub use stats::{
    aggregate, aggregate_revenue, rank_by, Champion, PointsBoard, RevenueBoard, RevenueProgress,
    Standing, Tally, Window,
};
pub use storage::{ActivityStore, Config, Database};
