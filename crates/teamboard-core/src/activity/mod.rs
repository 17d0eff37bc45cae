//! Activity records and their type catalogue.
//!
//! An [`ActivityRecord`] is one dated entry a member logs: a client meeting,
//! a talk, a signed policy. Its `points` are never supplied by callers; the
//! store derives them from the type through [`points_for`] on every write.

pub mod points;
pub mod templates;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub use points::{points_for, PointRule, BASE_POINTS, POINT_RULES};
pub use templates::note_template;

/// Enumerated activity types a member can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// Plain client meeting or contact
    Meeting,
    /// Insurance discussion with a client
    InsuranceTalk,
    /// Recruiting discussion with a prospect
    RecruitTalk,
    /// A candidate registered for the licensing exam
    CandidateExam,
    /// A policy was signed
    PolicySigned,
    /// A new member was issued their agent code
    NewMemberCode,
}

impl ActivityType {
    pub const ALL: [ActivityType; 6] = [
        ActivityType::Meeting,
        ActivityType::InsuranceTalk,
        ActivityType::RecruitTalk,
        ActivityType::CandidateExam,
        ActivityType::PolicySigned,
        ActivityType::NewMemberCode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::InsuranceTalk => "insurance_talk",
            Self::RecruitTalk => "recruit_talk",
            Self::CandidateExam => "candidate_exam",
            Self::PolicySigned => "policy_signed",
            Self::NewMemberCode => "new_member_code",
        }
    }

    /// Label shown in the team's activity picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Meeting => "見面 (1分)",
            Self::InsuranceTalk => "傾保險 (2分)",
            Self::RecruitTalk => "傾招募 (2分)",
            Self::CandidateExam => "新人報考試 (3分)",
            Self::PolicySigned => "簽單 (5分)",
            Self::NewMemberCode => "新人出code (8分)",
        }
    }

    pub fn points(&self) -> u32 {
        points_for(self.as_str())
    }

    /// Parse a canonical key or a picker label.
    ///
    /// # Errors
    /// Returns [`ValidationError::UnknownActivityType`] for anything outside
    /// the enumerated set.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle || t.label() == needle)
            .ok_or_else(|| ValidationError::UnknownActivityType(s.to_string()))
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A logged activity as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: i64,
    pub member: String,
    pub occurred_on: NaiveDate,
    pub activity_type: ActivityType,
    pub points: u32,
    #[serde(default)]
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Build a record with points derived from its type.
    pub fn new(
        id: i64,
        member: impl Into<String>,
        occurred_on: NaiveDate,
        activity_type: ActivityType,
        note: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            member: member.into(),
            occurred_on,
            activity_type,
            points: activity_type.points(),
            note: note.into(),
            created_at,
        }
    }
}

/// Reject empty member identifiers.
pub(crate) fn validate_member(member: &str) -> Result<&str, ValidationError> {
    let trimmed = member.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyMember);
    }
    Ok(trimmed)
}
