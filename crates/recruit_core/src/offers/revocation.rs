use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::OfferBoardConfig;
use crate::models::{Recruit, RecruitIndex, TeamContext};
use crate::tick::TickParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevocationReason {
    /// Momentum stayed non-positive for too many board ticks
    Stale,
    /// Too many competing offers to be worth chasing, however warm
    Crowded,
}

/// Pull a team's dead offers. Returns the number revoked.
///
/// Offers younger than the cooldown and offers to the team's own commits are
/// never touched. A package pair that both hold the offer is revoked together
/// or not at all.
pub(super) fn revoke_stale(
    cfg: &OfferBoardConfig,
    team: &TeamContext,
    recruits: &mut [Recruit],
    index: &RecruitIndex,
    params: &TickParams,
) -> u16 {
    let mut flagged: Vec<(usize, RevocationReason)> = Vec::new();

    for (i, recruit) in recruits.iter_mut().enumerate() {
        if !recruit.has_offer(&team.name) || recruit.committed_team.as_deref() == Some(team.name.as_str()) {
            continue;
        }
        let momentum = recruit.momentum_for(&team.name);
        let competing = recruit.offers.len();
        let Some(record) = recruit.latest_offer_mut(&team.name) else {
            continue;
        };
        record.cold_weeks = if momentum <= 0 { record.cold_weeks.saturating_add(1) } else { 0 };

        if params.week.saturating_sub(record.week) < cfg.revoke_cooldown_weeks {
            continue;
        }
        if record.cold_weeks >= cfg.stale_momentum_weeks {
            flagged.push((i, RevocationReason::Stale));
        } else if competing >= cfg.extreme_offer_count {
            flagged.push((i, RevocationReason::Crowded));
        }
    }

    let flagged_set: FxHashSet<usize> = flagged.iter().map(|(i, _)| *i).collect();
    let approved: Vec<(usize, RevocationReason)> = flagged
        .into_iter()
        .filter(|(i, _)| {
            recruits[*i]
                .package_links()
                .filter_map(|link| index.get(&link.linked_id).copied())
                .filter(|p| recruits[*p].has_offer(&team.name))
                .all(|p| flagged_set.contains(&p))
        })
        .collect();

    let mut revoked = 0;
    for (i, reason) in approved {
        let recruit = &mut recruits[i];
        if recruit.revoke_offer(&team.name, params.week) {
            recruit.adjust_momentum(&team.name, cfg.revoke_momentum);
            revoked += 1;
            log::debug!("[OfferBoard] {} revokes offer to {} ({:?})", team.name, recruit.name, reason);
        }
    }
    revoked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{index_recruits, PitchType, Position, RelationshipLink, RelationshipType};

    fn offered(id: u32, team: &str, week: u16) -> Recruit {
        let mut r = Recruit::new(id, format!("R{}", id), Position::C, 3, 70, 80, "GA");
        r.receive_offer(team, week, week as u32, PitchType::Standard);
        r
    }

    fn pass(recruits: &mut [Recruit], week: u16) -> u16 {
        let team = TeamContext::new("Georgia", 60, "GA");
        let index = index_recruits(recruits);
        revoke_stale(&OfferBoardConfig::default(), &team, recruits, &index, &TickParams::weekly(1, week as u32, week))
    }

    #[test]
    fn test_cold_offer_revoked_after_cooldown() {
        let mut recruits = vec![offered(1, "Georgia", 0)];
        // cold, but not stale yet
        for week in 1..=3 {
            assert_eq!(pass(&mut recruits, week), 0);
        }
        assert_eq!(pass(&mut recruits, 4), 1);
        assert!(!recruits[0].has_offer("Georgia"));
        assert_eq!(recruits[0].momentum_for("Georgia"), -2);
        assert!(recruits[0].offer_history[0].revoked);
    }

    #[test]
    fn test_warm_offer_kept() {
        let mut recruits = vec![offered(1, "Georgia", 0)];
        recruits[0].adjust_momentum("Georgia", 5);
        for week in 1..=8 {
            assert_eq!(pass(&mut recruits, week), 0);
        }
        assert!(recruits[0].has_offer("Georgia"));
    }

    #[test]
    fn test_warm_offer_to_crowded_recruit_revoked() {
        let mut recruits = vec![offered(1, "Georgia", 0)];
        for n in 0..27 {
            recruits[0].receive_offer(&format!("Program {}", n), 0, 0, PitchType::Standard);
        }
        recruits[0].adjust_momentum("Georgia", 5);
        for week in 1..=2 {
            assert_eq!(pass(&mut recruits, week), 0);
        }
        assert_eq!(pass(&mut recruits, 3), 1);
        assert!(!recruits[0].has_offer("Georgia"));
        assert_eq!(recruits[0].momentum_for("Georgia"), 3);
    }

    #[test]
    fn test_own_commit_never_revoked() {
        let mut recruits = vec![offered(1, "Georgia", 0)];
        recruits[0].record_commitment("Georgia", 1, true);
        for week in 1..=8 {
            assert_eq!(pass(&mut recruits, week), 0);
        }
    }

    #[test]
    fn test_package_pair_not_split() {
        let mut a = offered(1, "Georgia", 0);
        let mut b = offered(2, "Georgia", 0);
        a.relationships.push(RelationshipLink { kind: RelationshipType::Sibling, linked_id: 2, package_deal: true });
        b.relationships.push(RelationshipLink { kind: RelationshipType::Sibling, linked_id: 1, package_deal: true });
        b.adjust_momentum("Georgia", 20);
        let mut recruits = vec![a, b];
        for week in 1..=8 {
            assert_eq!(pass(&mut recruits, week), 0);
        }
        assert!(recruits.iter().all(|r| r.has_offer("Georgia")));
    }
}
