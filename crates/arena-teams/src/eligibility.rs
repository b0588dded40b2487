//! # Join Eligibility
//!
//! Capacity and minimum-stake gate for prospective members. Visibility and
//! approval policy live with membership management and are not checked here.

use crate::team::Team;

/// Why a prospective member cannot join
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum JoinRejection {
    #[error("Team is full ({current}/{max} members)")]
    RosterFull { current: usize, max: u32 },

    #[error("Stake of {staked} is below the team minimum of {required}")]
    InsufficientStake { staked: f64, required: f64 },
}

/// Check whether a user with `user_staked_amount` may join.
///
/// A roster at capacity rejects regardless of stake. A stake equal to the
/// minimum is sufficient.
pub fn check_join(user_staked_amount: f64, team: &Team) -> Result<(), JoinRejection> {
    if team.is_full() {
        return Err(JoinRejection::RosterFull {
            current: team.member_count(),
            max: team.max_members,
        });
    }

    let required = team.settings.min_stake_to_join;
    if user_staked_amount < required {
        return Err(JoinRejection::InsufficientStake {
            staked: user_staked_amount,
            required,
        });
    }

    Ok(())
}

/// `true` when [`check_join`] accepts
pub fn can_join_team(user_staked_amount: f64, team: &Team) -> bool {
    match check_join(user_staked_amount, team) {
        Ok(()) => true,
        Err(reason) => {
            tracing::debug!(team = %team.id, %reason, "Join rejected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::{MemberRole, TeamMember, TeamSettings};

    fn team_with_capacity(max_members: u32) -> Team {
        let members = vec![
            TeamMember::new("0xcaptain", MemberRole::Captain).with_weekly_earnings(450.0),
            TeamMember::new("0xm1", MemberRole::Member).with_weekly_earnings(320.0),
            TeamMember::new("0xm2", MemberRole::Member).with_weekly_earnings(210.0),
        ];
        let settings = TeamSettings::with_min_stake(100.0);
        Team::new("team-1", "Liquid Lions", members, max_members, settings).unwrap()
    }

    #[test]
    fn test_can_join_with_enough_stake() {
        assert!(can_join_team(500.0, &team_with_capacity(10)));
    }

    #[test]
    fn test_below_minimum_rejected() {
        let team = team_with_capacity(10);

        assert!(!can_join_team(50.0, &team));
        assert_eq!(
            check_join(50.0, &team),
            Err(JoinRejection::InsufficientStake {
                staked: 50.0,
                required: 100.0
            })
        );
    }

    #[test]
    fn test_exact_minimum_accepted() {
        assert!(can_join_team(100.0, &team_with_capacity(10)));
    }

    #[test]
    fn test_full_roster_rejected() {
        let team = team_with_capacity(3);

        assert!(!can_join_team(500.0, &team));
        assert_eq!(
            check_join(500.0, &team),
            Err(JoinRejection::RosterFull { current: 3, max: 3 })
        );
    }

    #[test]
    fn test_over_capacity_rejected() {
        // External roster management let it overflow
        assert!(!can_join_team(1_000_000.0, &team_with_capacity(2)));
    }

    #[test]
    fn test_full_checked_before_stake() {
        assert!(matches!(
            check_join(0.0, &team_with_capacity(3)),
            Err(JoinRejection::RosterFull { .. })
        ));
    }

    #[test]
    fn test_rejection_message() {
        let reason = check_join(500.0, &team_with_capacity(3)).unwrap_err();
        assert_eq!(reason.to_string(), "Team is full (3/3 members)");
    }
}
