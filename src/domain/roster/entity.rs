//! Roster entities: teams, raw members and validated identities

use serde::{Deserialize, Serialize};

use super::validation::{require_field, validate_email, RosterValidationError};
use crate::domain::DomainError;

/// A member exactly as it appears in the roster file.
///
/// Fields are optional so that one malformed member does not reject the
/// whole file; validation happens per member via [`Identity::try_from`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterMember {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name_zh: Option<String>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
}

impl RosterMember {
    /// Whether this member's email is exactly `email`
    pub fn has_email(&self, email: &str) -> bool {
        self.email.as_deref() == Some(email)
    }
}

/// A team and its members in roster order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<RosterMember>,
}

/// The full roster in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// Parse a roster from its JSON representation (an array of teams)
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::input(format!("Malformed roster: {}", e)))
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Total number of members across all teams
    pub fn member_count(&self) -> usize {
        self.teams.iter().map(|t| t.members.len()).sum()
    }
}

/// A validated person who can receive a judge credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    email: String,
    name_zh: String,
    name_en: String,
    user_id: String,
    team_id: String,
}

impl Identity {
    pub fn new(
        email: impl Into<String>,
        name_zh: impl Into<String>,
        name_en: impl Into<String>,
        user_id: impl Into<String>,
        team_id: impl Into<String>,
    ) -> Result<Self, RosterValidationError> {
        let member = RosterMember {
            email: Some(email.into()),
            name_zh: Some(name_zh.into()),
            name_en: Some(name_en.into()),
            id: Some(user_id.into()),
            team_id: Some(team_id.into()),
        };
        Self::try_from(&member)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name_zh(&self) -> &str {
        &self.name_zh
    }

    pub fn name_en(&self) -> &str {
        &self.name_en
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    /// Combined localized name, e.g. `王小明 (Hsiao-Ming Wang)`
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name_zh, self.name_en)
    }
}

impl TryFrom<&RosterMember> for Identity {
    type Error = RosterValidationError;

    fn try_from(member: &RosterMember) -> Result<Self, Self::Error> {
        let email = require_field(member.email.as_deref(), "email")?;
        validate_email(email)?;

        Ok(Self {
            email: email.to_string(),
            name_zh: require_field(member.name_zh.as_deref(), "name_zh")?.to_string(),
            name_en: require_field(member.name_en.as_deref(), "name_en")?.to_string(),
            user_id: require_field(member.id.as_deref(), "_id")?.to_string(),
            team_id: require_field(member.team_id.as_deref(), "team_id")?.to_string(),
        })
    }
}
