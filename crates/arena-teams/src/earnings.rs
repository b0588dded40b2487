//! # Team Earnings Projection
//!
//! Applies the team multiplier to weekly earnings. The multiplier is
//! recomputed from the snapshot on every call.

use crate::bonus::BonusRates;
use crate::team::{MemberRole, Team};
use serde::{Deserialize, Serialize};

/// Team earnings for the current period
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEarnings {
    /// Sum of member weekly earnings
    pub base_earnings: f64,

    /// Team multiplier applied
    pub multiplier: f64,

    /// `base_earnings * (multiplier - 1)`
    pub bonus_earnings: f64,

    /// `base_earnings + bonus_earnings`
    pub total_earnings: f64,
}

/// One member's earnings with the team multiplier applied
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEarnings {
    /// Member address
    pub address: String,

    /// Captain or member
    pub role: MemberRole,

    /// Weekly earnings before the bonus
    pub base: f64,

    /// Weekly earnings after the bonus
    pub boosted: f64,
}

impl BonusRates {
    /// Scale an earnings figure by the team multiplier. Zero and negative
    /// figures pass through unclamped.
    pub fn apply(&self, individual_earnings: f64, team: &Team) -> f64 {
        individual_earnings * self.calculate(team).total_multiplier
    }

    /// Aggregate weekly earnings for a team
    pub fn earnings(&self, team: &Team) -> TeamEarnings {
        let base_earnings = team.base_weekly_earnings();
        let multiplier = self.calculate(team).total_multiplier;
        let bonus_earnings = base_earnings * (multiplier - 1.0);

        let earnings = TeamEarnings {
            base_earnings,
            multiplier,
            bonus_earnings,
            total_earnings: base_earnings + bonus_earnings,
        };

        tracing::debug!(
            team = %team.id,
            base_earnings,
            multiplier,
            total_earnings = earnings.total_earnings,
            "Computed team earnings"
        );

        earnings
    }

    /// Per-member projection in roster order
    pub fn member_earnings(&self, team: &Team) -> Vec<MemberEarnings> {
        let multiplier = self.calculate(team).total_multiplier;

        team.members()
            .iter()
            .map(|member| MemberEarnings {
                address: member.address.clone(),
                role: member.role,
                base: member.contribution.weekly_earnings,
                boosted: member.contribution.weekly_earnings * multiplier,
            })
            .collect()
    }
}

/// Scale an earnings figure by the team multiplier (default rates)
pub fn apply_team_bonus(individual_earnings: f64, team: &Team) -> f64 {
    BonusRates::default().apply(individual_earnings, team)
}

/// Aggregate weekly team earnings (default rates)
pub fn calculate_team_earnings(team: &Team) -> TeamEarnings {
    BonusRates::default().earnings(team)
}

/// Per-member boosted earnings (default rates)
pub fn project_member_earnings(team: &Team) -> Vec<MemberEarnings> {
    BonusRates::default().member_earnings(team)
}
