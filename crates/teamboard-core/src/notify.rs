//! Per-member "what's new" feed.
//!
//! Each member has a last-read cursor. Their pending feed is every activity
//! that teammates created after that cursor, oldest first. Reading does not
//! move the cursor; only an explicit acknowledgement does.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::ActivityRecord;

/// Cursor value for a member who has never acknowledged.
pub const NEVER_READ: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCursor {
    pub member: String,
    pub last_read_at: DateTime<Utc>,
}

impl NotificationCursor {
    pub fn new(member: impl Into<String>) -> Self {
        Self {
            member: member.into(),
            last_read_at: NEVER_READ,
        }
    }

    pub fn has_read(&self) -> bool {
        self.last_read_at != NEVER_READ
    }

    /// Move the cursor to `now`. Never moves it backwards.
    pub fn acknowledge(&mut self, now: DateTime<Utc>) {
        if now > self.last_read_at {
            self.last_read_at = now;
        }
    }

    pub fn pending<'a>(&self, records: &'a [ActivityRecord]) -> Vec<&'a ActivityRecord> {
        pending_for(&self.member, self.last_read_at, records)
    }
}

/// Activities by other members created after `last_read_at`, oldest first.
pub fn pending_for<'a>(
    member: &str,
    last_read_at: DateTime<Utc>,
    records: &'a [ActivityRecord],
) -> Vec<&'a ActivityRecord> {
    let mut pending: Vec<&ActivityRecord> = records
        .iter()
        .filter(|r| r.created_at > last_read_at && r.member != member)
        .collect();
    pending.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    pending
}
