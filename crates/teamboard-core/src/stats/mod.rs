//! Leaderboard statistics for Teamboard
//!
//! This module turns activity and revenue records into per-member boards for
//! a week, month, quarter or year, ranks them, and measures progress against
//! the team's display targets.

mod aggregate;
mod ranking;
mod targets;
mod window;

pub use aggregate::{aggregate, aggregate_revenue, PointsBoard, RevenueBoard, Tally};

pub use ranking::{rank_by, Standing};

pub use targets::{monthly_champion, progress, Champion, RevenueProgress};

pub use window::{week_start, Window};
