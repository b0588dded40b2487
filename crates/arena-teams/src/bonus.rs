//! # Team Bonus Calculation
//!
//! Additive incentive bonuses derived from a team snapshot.
//!
//! ## Bonus Terms
//!
//! | Term | Rule | Cap |
//! |------|------|-----|
//! | Member count | 2% per member beyond the first | 20% (11 members) |
//! | Synergy | 15% x share of members earning this week | 15% |
//! | Achievements | 0.5% per achievement across the roster | 25% (50 achievements) |
//! | Captain | 10% if the captain ranks top 10 | 10% |
//!
//! ## Multiplier Range
//!
//! - Minimum: 1.0x (solo, inactive, no achievements, unranked captain)
//! - Maximum: 1.70x, reached only when every term is at its cap
//!
//! The total is never clamped; the ceiling follows from the per-term caps.

use crate::constants::*;
use crate::team::Team;
use serde::{Deserialize, Serialize};

/// Tunable bonus constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusRates {
    /// Bonus per member beyond the first
    #[serde(default = "default_member_step")]
    pub member_step: f64,

    /// Cap on the member-count bonus
    #[serde(default = "default_member_cap")]
    pub member_cap: f64,

    /// Synergy bonus at 100% activity
    #[serde(default = "default_synergy_max")]
    pub synergy_max: f64,

    /// Bonus per unlocked achievement
    #[serde(default = "default_achievement_step")]
    pub achievement_step: f64,

    /// Cap on the achievement bonus
    #[serde(default = "default_achievement_cap")]
    pub achievement_cap: f64,

    /// Flat bonus for a top-ranked captain
    #[serde(default = "default_captain_bonus")]
    pub captain_bonus: f64,

    /// Worst rank that still earns the captain bonus (inclusive)
    #[serde(default = "default_captain_rank_threshold")]
    pub captain_rank_threshold: u32,
}

fn default_member_step() -> f64 {
    MEMBER_BONUS_STEP
}

fn default_member_cap() -> f64 {
    MEMBER_BONUS_CAP
}

fn default_synergy_max() -> f64 {
    SYNERGY_BONUS_MAX
}

fn default_achievement_step() -> f64 {
    ACHIEVEMENT_BONUS_STEP
}

fn default_achievement_cap() -> f64 {
    ACHIEVEMENT_BONUS_CAP
}

fn default_captain_bonus() -> f64 {
    CAPTAIN_BONUS
}

fn default_captain_rank_threshold() -> u32 {
    CAPTAIN_RANK_THRESHOLD
}

impl Default for BonusRates {
    fn default() -> Self {
        Self {
            member_step: default_member_step(),
            member_cap: default_member_cap(),
            synergy_max: default_synergy_max(),
            achievement_step: default_achievement_step(),
            achievement_cap: default_achievement_cap(),
            captain_bonus: default_captain_bonus(),
            captain_rank_threshold: default_captain_rank_threshold(),
        }
    }
}

impl BonusRates {
    /// Verify every rate and cap is a finite, non-negative fraction
    pub fn verify(&self) -> bool {
        [
            self.member_step,
            self.member_cap,
            self.synergy_max,
            self.achievement_step,
            self.achievement_cap,
            self.captain_bonus,
        ]
        .iter()
        .all(|rate| rate.is_finite() && *rate >= 0.0)
    }

    /// Highest multiplier these rates can produce
    pub fn max_multiplier(&self) -> f64 {
        1.0 + self.member_cap + self.synergy_max + self.achievement_cap + self.captain_bonus
    }

    /// Compute the bonus breakdown for a team
    pub fn calculate(&self, team: &Team) -> TeamBonuses {
        let member_count = self.member_count_bonus(team);
        let synergy = self.synergy_bonus(team);
        let achievements = self.achievement_bonus(team);
        let captain = self.captain_bonus(team);

        let bonuses = TeamBonuses {
            member_count,
            synergy,
            achievements,
            captain,
            total_multiplier: 1.0 + member_count + synergy + achievements + captain,
        };

        tracing::debug!(
            team = %team.id,
            members = team.member_count(),
            member_count,
            synergy,
            achievements,
            captain,
            total_multiplier = bonuses.total_multiplier,
            "Computed team bonus"
        );

        bonuses
    }

    /// `min((members - 1) * step, cap)`
    fn member_count_bonus(&self, team: &Team) -> f64 {
        let extra = team.member_count().saturating_sub(1) as f64;
        (extra * self.member_step).min(self.member_cap)
    }

    /// Activity rate scaled to `synergy_max`
    fn synergy_bonus(&self, team: &Team) -> f64 {
        // member_count() >= 1 by construction
        let activity_rate = team.active_member_count() as f64 / team.member_count() as f64;
        tracing::trace!(team = %team.id, activity_rate, "Synergy activity rate");
        activity_rate * self.synergy_max
    }

    fn achievement_bonus(&self, team: &Team) -> f64 {
        (team.total_achievements() as f64 * self.achievement_step).min(self.achievement_cap)
    }

    /// Step function on the first captain's rank; unranked or missing captain gets nothing
    fn captain_bonus(&self, team: &Team) -> f64 {
        match team.captain_member().and_then(|c| c.individual_rank) {
            Some(rank) if rank.get() <= self.captain_rank_threshold => self.captain_bonus,
            _ => 0.0,
        }
    }
}

/// Bonus breakdown for a team snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamBonuses {
    /// Roster size bonus
    pub member_count: f64,

    /// Activity ratio bonus
    pub synergy: f64,

    /// Achievement count bonus
    pub achievements: f64,

    /// Captain rank bonus
    pub captain: f64,

    /// `1.0 + member_count + synergy + achievements + captain`
    pub total_multiplier: f64,
}

impl TeamBonuses {
    /// Bonus on top of base earnings (`total_multiplier - 1`)
    pub fn bonus_fraction(&self) -> f64 {
        self.total_multiplier - 1.0
    }

    /// Bonus as a percentage, for display
    pub fn bonus_percent(&self) -> f64 {
        self.bonus_fraction() * 100.0
    }
}

/// Compute the bonus breakdown with default rates
pub fn calculate_team_bonus(team: &Team) -> TeamBonuses {
    BonusRates::default().calculate(team)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::{MemberRole, TeamMember, TeamSettings};
    use std::num::NonZeroU32;

    fn rank(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn fixture_team(captain_rank: Option<NonZeroU32>) -> Team {
        let mut captain = TeamMember::new("0xcaptain", MemberRole::Captain)
            .with_weekly_earnings(450.0)
            .with_achievements(["a1", "a2", "a3"]);
        captain.individual_rank = captain_rank;
        let members = vec![
            captain,
            TeamMember::new("0xm1", MemberRole::Member)
                .with_weekly_earnings(320.0)
                .with_rank(rank(42))
                .with_achievements(["a1", "a2"]),
            TeamMember::new("0xm2", MemberRole::Member)
                .with_weekly_earnings(210.0)
                .with_achievements(["a1"]),
        ];
        Team::new("team-1", "Liquid Lions", members, 10, TeamSettings::with_min_stake(100.0))
            .unwrap()
    }

    fn roster_of(count: usize) -> Team {
        let members = (0..count)
            .map(|i| {
                let role = if i == 0 { MemberRole::Captain } else { MemberRole::Member };
                TeamMember::new(format!("0x{i:02}"), role)
            })
            .collect();
        Team::new("team", "Roster", members, 50, TeamSettings::default()).unwrap()
    }

    #[test]
    fn test_default_rates_verify() {
        let rates = BonusRates::default();
        assert!(rates.verify());
        assert!((rates.max_multiplier() - crate::MAX_TEAM_MULTIPLIER).abs() < 1e-9);
    }

    #[test]
    fn test_negative_rate_fails_verify() {
        let rates = BonusRates {
            synergy_max: -0.1,
            ..BonusRates::default()
        };
        assert!(!rates.verify());
    }

    #[test]
    fn test_fixture_breakdown() {
        let bonuses = calculate_team_bonus(&fixture_team(Some(rank(5))));

        assert!((bonuses.member_count - 0.04).abs() < 0.01);
        assert!((bonuses.synergy - 0.15).abs() < 0.01);
        assert!((bonuses.achievements - 0.03).abs() < 0.01);
        assert!((bonuses.captain - 0.10).abs() < 0.01);
        assert!((bonuses.total_multiplier - 1.32).abs() < 0.01);
        assert!((bonuses.bonus_percent() - 32.0).abs() < 0.01);
    }

    #[test]
    fn test_captain_outside_top_ten() {
        let bonuses = calculate_team_bonus(&fixture_team(Some(rank(15))));
        assert_eq!(bonuses.captain, 0.0);
    }

    #[test]
    fn test_captain_rank_boundary() {
        assert_eq!(calculate_team_bonus(&fixture_team(Some(rank(10)))).captain, 0.10);
        assert_eq!(calculate_team_bonus(&fixture_team(Some(rank(11)))).captain, 0.0);
        assert_eq!(calculate_team_bonus(&fixture_team(Some(rank(1)))).captain, 0.10);
    }

    #[test]
    fn test_unranked_captain() {
        let bonuses = calculate_team_bonus(&fixture_team(None));
        assert_eq!(bonuses.captain, 0.0);
    }

    #[test]
    fn test_no_captain() {
        let members = vec![
            TeamMember::new("0xa", MemberRole::Member).with_rank(rank(1)),
            TeamMember::new("0xb", MemberRole::Member).with_rank(rank(2)),
        ];
        let team = Team::new("t", "Leaderless", members, 5, TeamSettings::default()).unwrap();
        assert_eq!(calculate_team_bonus(&team).captain, 0.0);
    }

    #[test]
    fn test_only_first_captain_counts() {
        let members = vec![
            TeamMember::new("0xa", MemberRole::Captain).with_rank(rank(50)),
            TeamMember::new("0xb", MemberRole::Captain).with_rank(rank(1)),
        ];
        let team = Team::new("t", "Two Captains", members, 5, TeamSettings::default()).unwrap();
        assert_eq!(calculate_team_bonus(&team).captain, 0.0);
    }

    #[test]
    fn test_solo_team_has_no_member_bonus() {
        let bonuses = calculate_team_bonus(&roster_of(1));
        assert_eq!(bonuses.member_count, 0.0);
        assert_eq!(bonuses.synergy, 0.0);
        assert_eq!(bonuses.total_multiplier, 1.0);
    }

    #[test]
    fn test_member_bonus_caps_at_eleven() {
        assert!((calculate_team_bonus(&roster_of(11)).member_count - 0.20).abs() < 1e-9);
        assert!((calculate_team_bonus(&roster_of(30)).member_count - 0.20).abs() < 1e-9);
        assert!(calculate_team_bonus(&roster_of(10)).member_count < 0.20);
    }

    #[test]
    fn test_partial_synergy() {
        let members = vec![
            TeamMember::new("0xa", MemberRole::Captain).with_weekly_earnings(10.0),
            TeamMember::new("0xb", MemberRole::Member),
            TeamMember::new("0xc", MemberRole::Member).with_weekly_earnings(-5.0),
            TeamMember::new("0xd", MemberRole::Member).with_weekly_earnings(1.0),
        ];
        let team = Team::new("t", "Half", members, 5, TeamSettings::default()).unwrap();

        // 2 of 4 earning
        assert!((calculate_team_bonus(&team).synergy - 0.075).abs() < 1e-9);
    }

    #[test]
    fn test_achievement_bonus_caps() {
        let members = vec![
            TeamMember::new("0xa", MemberRole::Captain)
                .with_achievements((0..40).map(|i| format!("a{i}"))),
            TeamMember::new("0xb", MemberRole::Member)
                .with_achievements((0..40).map(|i| format!("a{i}"))),
        ];
        let team = Team::new("t", "Collectors", members, 5, TeamSettings::default()).unwrap();
        assert!((calculate_team_bonus(&team).achievements - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_achievements_count() {
        let members = vec![TeamMember::new("0xa", MemberRole::Captain)
            .with_achievements(["streak", "streak", "streak"])];
        let team = Team::new("t", "Repeat", members, 5, TeamSettings::default()).unwrap();
        assert!((calculate_team_bonus(&team).achievements - 0.015).abs() < 1e-9);
    }

    #[test]
    fn test_custom_rates() {
        let rates = BonusRates {
            captain_bonus: 0.25,
            captain_rank_threshold: 3,
            ..BonusRates::default()
        };

        assert_eq!(rates.calculate(&fixture_team(Some(rank(3)))).captain, 0.25);
        assert_eq!(rates.calculate(&fixture_team(Some(rank(5)))).captain, 0.0);
    }

    #[test]
    fn test_rates_partial_deserialize() {
        let rates: BonusRates = serde_json::from_str(r#"{ "member_cap": 0.5 }"#).unwrap();
        assert_eq!(rates.member_cap, 0.5);
        assert_eq!(rates.member_step, 0.02);
        assert_eq!(rates.captain_rank_threshold, 10);
    }
}
