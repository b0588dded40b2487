//! # Team Roster Model
//!
//! Read-only snapshot of a team as the dashboard hands it to the calculators.
//!
//! ## Roster Rules
//!
//! | Rule | Enforced at construction |
//! |------|--------------------------|
//! | At least one member | yes (`TeamError::EmptyRoster`) |
//! | `max_members > 0` | yes (`TeamError::InvalidCapacity`) |
//! | Unique member addresses | yes (`TeamError::DuplicateMember`) |
//! | Roster within capacity | no, owned by membership management |
//! | Exactly one captain | no, first captain in roster order is used |

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::NonZeroU32;

/// Role of a member inside a team
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Team founder / leader
    Captain,
    /// Regular member
    #[default]
    Member,
}

impl MemberRole {
    /// Get role name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Captain => "Captain",
            Self::Member => "Member",
        }
    }
}

/// What a member brought to the team this scoring period
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    /// Earnings attributed to the member this week
    #[serde(default)]
    pub weekly_earnings: f64,

    /// Amount staked (informational)
    #[serde(default)]
    pub staked: f64,

    /// Referrals brought in (informational)
    #[serde(default)]
    pub referrals: u32,
}

/// A single roster entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Wallet address, unique within the team
    pub address: String,

    /// Captain or regular member
    #[serde(default)]
    pub role: MemberRole,

    /// Period contribution
    #[serde(default)]
    pub contribution: Contribution,

    /// Global leaderboard rank; `None` means unranked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual_rank: Option<NonZeroU32>,

    /// Unlocked achievement ids (duplicates are kept)
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl TeamMember {
    /// Create an unranked member with no contribution
    pub fn new(address: impl Into<String>, role: MemberRole) -> Self {
        Self {
            address: address.into(),
            role,
            contribution: Contribution::default(),
            individual_rank: None,
            achievements: Vec::new(),
        }
    }

    /// Set weekly earnings
    pub fn with_weekly_earnings(mut self, weekly_earnings: f64) -> Self {
        self.contribution.weekly_earnings = weekly_earnings;
        self
    }

    /// Set staked amount
    pub fn with_staked(mut self, staked: f64) -> Self {
        self.contribution.staked = staked;
        self
    }

    /// Set leaderboard rank. Ranks start at 1; leave unset for unranked.
    pub fn with_rank(mut self, rank: NonZeroU32) -> Self {
        self.individual_rank = Some(rank);
        self
    }

    /// Replace the achievement list
    pub fn with_achievements<I, S>(mut self, achievements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.achievements = achievements.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_captain(&self) -> bool {
        self.role == MemberRole::Captain
    }

    /// Member earned something this period
    pub fn is_active(&self) -> bool {
        self.contribution.weekly_earnings > 0.0
    }
}

/// Join policy of a team
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSettings {
    /// Minimum stake a newcomer must hold
    #[serde(default)]
    pub min_stake_to_join: f64,

    /// Listed publicly (descriptive)
    #[serde(default = "default_true")]
    pub is_public: bool,

    /// Captain approval required (descriptive)
    #[serde(default)]
    pub require_approval: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self::with_min_stake(0.0)
    }
}

impl TeamSettings {
    /// Public team without approval step
    pub fn with_min_stake(min_stake_to_join: f64) -> Self {
        Self {
            min_stake_to_join,
            is_public: true,
            require_approval: false,
        }
    }
}

/// Team snapshot with a guaranteed non-empty roster
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TeamSnapshot")]
pub struct Team {
    /// Team identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Captain address as recorded by team management
    pub captain: String,

    members: Vec<TeamMember>,

    /// Roster capacity
    pub max_members: u32,

    /// Join policy
    pub settings: TeamSettings,

    /// Creation timestamp (unix seconds)
    pub created_at: i64,
}

/// Unchecked wire form of [`Team`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamSnapshot {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    captain: Option<String>,
    members: Vec<TeamMember>,
    max_members: u32,
    #[serde(default)]
    settings: TeamSettings,
    #[serde(default)]
    created_at: i64,
}

impl TryFrom<TeamSnapshot> for Team {
    type Error = TeamError;

    fn try_from(raw: TeamSnapshot) -> Result<Self, Self::Error> {
        let mut team = Team::new(raw.id, raw.name, raw.members, raw.max_members, raw.settings)?;
        if let Some(captain) = raw.captain {
            team.captain = captain;
        }
        team.created_at = raw.created_at;
        Ok(team)
    }
}

impl Team {
    /// Build a team, checking the roster invariants.
    ///
    /// `captain` is taken from the first member with the captain role, or
    /// left empty when there is none.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        members: Vec<TeamMember>,
        max_members: u32,
        settings: TeamSettings,
    ) -> Result<Self, TeamError> {
        if members.is_empty() {
            return Err(TeamError::EmptyRoster);
        }
        if max_members == 0 {
            return Err(TeamError::InvalidCapacity);
        }

        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.address.as_str()) {
                return Err(TeamError::DuplicateMember(member.address.clone()));
            }
        }

        let captain = members
            .iter()
            .find(|m| m.is_captain())
            .map(|m| m.address.clone())
            .unwrap_or_default();

        Ok(Self {
            id: id.into(),
            name: name.into(),
            captain,
            members,
            max_members,
            settings,
            created_at: 0,
        })
    }

    /// Set creation timestamp
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Roster in order, never empty
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Roster size, always at least 1
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// First member holding the captain role
    pub fn captain_member(&self) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.is_captain())
    }

    /// Members with positive weekly earnings
    pub fn active_member_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_active()).count()
    }

    /// Achievements across the roster, duplicates included
    pub fn total_achievements(&self) -> usize {
        self.members.iter().map(|m| m.achievements.len()).sum()
    }

    /// Sum of weekly earnings, inactive members included
    pub fn base_weekly_earnings(&self) -> f64 {
        self.members
            .iter()
            .map(|m| m.contribution.weekly_earnings)
            .sum()
    }

    /// Roster at or above capacity
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_members as usize
    }
}

/// Team construction errors
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TeamError {
    #[error("Team roster must contain at least one member")]
    EmptyRoster,

    #[error("Team capacity must be at least one member")]
    InvalidCapacity,

    #[error("Duplicate member address: {0}")]
    DuplicateMember(String),
}
