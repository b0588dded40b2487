//! # Arena Teams - Team Bonus & Earnings Rules
//!
//! Incentive rules for arena team competitions on top of liquid-staking
//! earnings.
//!
//! ## Key Features
//!
//! - **Team bonus**: additive bonuses for roster size, activity, achievements and captain rank
//! - **Earnings projection**: team multiplier applied to weekly earnings
//! - **Join gate**: roster capacity and minimum stake checks
//!
//! ## Multiplier Composition
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  total = 1.0 + member_count + synergy + achievements + captain│
//! ├───────────────────────────────────────────────────────────────┤
//! │  member_count   min((members - 1) x 0.02, 0.20)               │
//! │  synergy        (active / members) x 0.15                     │
//! │  achievements   min(achievements x 0.005, 0.25)               │
//! │  captain        0.10 if captain rank <= 10                    │
//! ├───────────────────────────────────────────────────────────────┤
//! │  range          1.00x .. 1.70x                                │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! All operations are pure functions of the [`Team`] snapshot passed in.

pub mod bonus;
pub mod earnings;
pub mod eligibility;
pub mod team;

// Re-exports
pub use bonus::{calculate_team_bonus, BonusRates, TeamBonuses};
pub use earnings::{
    apply_team_bonus, calculate_team_earnings, project_member_earnings, MemberEarnings,
    TeamEarnings,
};
pub use eligibility::{can_join_team, check_join, JoinRejection};
pub use team::{Contribution, MemberRole, Team, TeamError, TeamMember, TeamSettings};

/// Team bonus constants (default rates)
pub mod constants {
    /// Bonus per member beyond the first: 2%
    pub const MEMBER_BONUS_STEP: f64 = 0.02;

    /// Member-count bonus cap: 20%
    pub const MEMBER_BONUS_CAP: f64 = 0.20;

    /// Synergy bonus at full activity: 15%
    pub const SYNERGY_BONUS_MAX: f64 = 0.15;

    /// Bonus per achievement: 0.5%
    pub const ACHIEVEMENT_BONUS_STEP: f64 = 0.005;

    /// Achievement bonus cap: 25%
    pub const ACHIEVEMENT_BONUS_CAP: f64 = 0.25;

    /// Captain bonus: 10%
    pub const CAPTAIN_BONUS: f64 = 0.10;

    /// Captain must rank at or above this
    pub const CAPTAIN_RANK_THRESHOLD: u32 = 10;

    /// Emergent ceiling under default rates (not enforced as a clamp)
    pub const MAX_TEAM_MULTIPLIER: f64 =
        1.0 + MEMBER_BONUS_CAP + SYNERGY_BONUS_MAX + ACHIEVEMENT_BONUS_CAP + CAPTAIN_BONUS;
}

pub use constants::*;
