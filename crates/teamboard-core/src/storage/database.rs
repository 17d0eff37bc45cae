//! SQLite-backed implementation of [`ActivityStore`].
//!
//! Provides persistent storage for:
//! - Logged activities (with derived points)
//! - The team roster and recruit counts
//! - Monthly FYC figures
//! - Per-member notification cursors

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{data_dir, migrations, ActivityStore};
use crate::activity::{ActivityRecord, ActivityType};
use crate::error::{DatabaseError, Result};
use crate::notify::NEVER_READ;
use crate::revenue::{Month, MonthlyRevenue};
use crate::roster::{MemberProfile, Role};

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(table: &'static str, column: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupt(table, column, raw))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| corrupt("activities", "occurred_on", raw))
}

fn corrupt(table: &'static str, column: &'static str, raw: &str) -> crate::error::CoreError {
    DatabaseError::Corrupt {
        table,
        column,
        value: raw.to_string(),
    }
    .into()
}

/// Activity row as stored, before decoding dates and types.
struct ActivityRow {
    id: i64,
    member: String,
    occurred_on: String,
    activity_type: String,
    points: u32,
    note: String,
    created_at: String,
}

impl ActivityRow {
    fn decode(self) -> Result<ActivityRecord> {
        let activity_type = ActivityType::parse(&self.activity_type)
            .map_err(|_| corrupt("activities", "activity_type", &self.activity_type))?;
        Ok(ActivityRecord {
            id: self.id,
            member: self.member,
            occurred_on: parse_date(&self.occurred_on)?,
            activity_type,
            points: self.points,
            note: self.note,
            created_at: parse_timestamp("activities", "created_at", &self.created_at)?,
        })
    }
}

/// SQLite database holding the ledger.
pub struct Database {
    conn: Connection,
    clock: Clock,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/teamboard.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("teamboard.db"))
    }

    /// Open (or create) the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self {
            conn,
            clock: Box::new(Utc::now),
        })
    }

    /// Replace the clock used to stamp `created_at` on new activities.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn get_activity(&self, id: i64) -> Result<Option<ActivityRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, member, occurred_on, activity_type, points, note, created_at
                 FROM activities WHERE id = ?1",
                params![id],
                read_activity_row,
            )
            .optional()
            .map_err(DatabaseError::from)?;
        row.map(ActivityRow::decode).transpose()
    }
}

fn read_activity_row(row: &rusqlite::Row) -> rusqlite::Result<ActivityRow> {
    Ok(ActivityRow {
        id: row.get(0)?,
        member: row.get(1)?,
        occurred_on: row.get(2)?,
        activity_type: row.get(3)?,
        points: row.get(4)?,
        note: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl ActivityStore for Database {
    fn list_activities(&self) -> Result<Vec<ActivityRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, member, occurred_on, activity_type, points, note, created_at
             FROM activities
             ORDER BY occurred_on DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], read_activity_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(ActivityRow::decode).collect()
    }

    fn insert_activity(
        &self,
        member: &str,
        occurred_on: NaiveDate,
        activity_type: ActivityType,
        note: &str,
    ) -> Result<i64> {
        let created_at = (self.clock)();
        self.conn.execute(
            "INSERT INTO activities (member, occurred_on, activity_type, points, note, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                member,
                occurred_on.format("%Y-%m-%d").to_string(),
                activity_type.as_str(),
                activity_type.points(),
                note,
                format_timestamp(created_at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_activity(
        &self,
        id: i64,
        occurred_on: NaiveDate,
        activity_type: ActivityType,
        note: &str,
    ) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE activities
             SET occurred_on = ?1, activity_type = ?2, points = ?3, note = ?4
             WHERE id = ?5",
            params![
                occurred_on.format("%Y-%m-%d").to_string(),
                activity_type.as_str(),
                activity_type.points(),
                note,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                table: "activities",
                key: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn delete_activity(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                table: "activities",
                key: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn list_revenue(&self) -> Result<Vec<MonthlyRevenue>> {
        let mut stmt = self
            .conn
            .prepare("SELECT member, month, amount FROM monthly_revenue ORDER BY month, member")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(member, month, amount)| {
                let month = month
                    .parse::<Month>()
                    .map_err(|_| corrupt("monthly_revenue", "month", &month))?;
                Ok(MonthlyRevenue {
                    member,
                    month,
                    amount,
                })
            })
            .collect()
    }

    fn upsert_revenue(&self, member: &str, month: Month, amount: f64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO monthly_revenue (member, month, amount) VALUES (?1, ?2, ?3)
             ON CONFLICT(member, month) DO UPDATE SET amount = excluded.amount",
            params![member, month.to_string(), amount],
        )?;
        Ok(())
    }

    fn list_members(&self) -> Result<Vec<MemberProfile>> {
        let mut stmt = self
            .conn
            .prepare("SELECT member, role, recruit_count FROM members ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(member, role, recruit_count)| {
                let role = Role::parse(&role).map_err(|_| corrupt("members", "role", &role))?;
                Ok(MemberProfile {
                    member,
                    role,
                    recruit_count,
                })
            })
            .collect()
    }

    fn add_member(&self, member: &str, role: Role) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO members (member, role, recruit_count) VALUES (?1, ?2, 0)",
            params![member, role.as_str()],
        )?;
        Ok(())
    }

    fn set_recruit_count(&self, member: &str, recruit_count: u32) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE members SET recruit_count = ?1 WHERE member = ?2",
            params![recruit_count, member],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                table: "members",
                key: member.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn get_cursor(&self, member: &str) -> Result<DateTime<Utc>> {
        self.conn.execute(
            "INSERT OR IGNORE INTO cursors (member, last_read_at) VALUES (?1, ?2)",
            params![member, format_timestamp(NEVER_READ)],
        )?;
        let raw: String = self.conn.query_row(
            "SELECT last_read_at FROM cursors WHERE member = ?1",
            params![member],
            |row| row.get(0),
        )?;
        parse_timestamp("cursors", "last_read_at", &raw)
    }

    fn set_cursor(&self, member: &str, last_read_at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT INTO cursors (member, last_read_at) VALUES (?1, ?2)
             ON CONFLICT(member) DO UPDATE SET last_read_at = excluded.last_read_at",
            params![member, format_timestamp(last_read_at)],
        )?;
        Ok(())
    }
}
