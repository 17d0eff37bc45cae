//! Team roster: member profiles and who appears on leaderboards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Role of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Leader,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leader => "Leader",
            Self::Member => "Member",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leader" => Ok(Self::Leader),
            "member" => Ok(Self::Member),
            _ => Err(ValidationError::InvalidValue {
                field: "role".into(),
                message: format!("expected Leader or Member, got '{s}'"),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub member: String,
    pub role: Role,
    /// Set by a leader; not derived from logged activities.
    pub recruit_count: u32,
}

impl MemberProfile {
    pub fn new(member: impl Into<String>, role: Role) -> Self {
        Self {
            member: member.into(),
            role,
            recruit_count: 0,
        }
    }
}

/// Names of the members who compete on leaderboards.
///
/// Leaders run the game and are left off unless `include_leaders` is set.
pub fn leaderboard_roster(profiles: &[MemberProfile], include_leaders: bool) -> Vec<String> {
    profiles
        .iter()
        .filter(|p| include_leaders || p.role == Role::Member)
        .map(|p| p.member.clone())
        .collect()
}
