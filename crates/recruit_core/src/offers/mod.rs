//! # CPU Offer Board
//!
//! One pass per non-user team per tick. The staff first prunes stale offers,
//! then spends its action points down a ranked board of recruits:
//! offers on the top half while slots and caps allow, contacts everywhere
//! else. Recruits soft-committed to a rival only ever get contacts. New
//! offers mirror to package-linked partners.

pub mod candidates;
mod revocation;

pub use candidates::{choose_pitch, rank_board, BoardCandidate};
pub use revocation::RevocationReason;

use serde::{Deserialize, Serialize};

use crate::commitment::cycle_progress;
use crate::config::{CycleConfig, OfferBoardConfig};
use crate::models::{PitchType, Recruit, RecruitIndex, TeamContext, TeamDirectory};
use crate::tick::TickParams;

/// What one staff did during a tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardReport {
    pub offers_made: u16,
    pub mirrored_offers: u16,
    pub contacts_made: u16,
    pub offers_revoked: u16,
    pub action_points_spent: u16,
    pub board_size: usize,
}

#[derive(Debug, Clone, Default)]
pub struct OfferBoard {
    pub config: OfferBoardConfig,
    pub cycle: CycleConfig,
}

impl OfferBoard {
    pub fn new(config: OfferBoardConfig, cycle: CycleConfig) -> Self {
        Self { config, cycle }
    }

    /// Action points for the tick: the host budget if set, else base plus a prestige share.
    pub fn action_points(&self, team: &TeamContext, params: &TickParams) -> u16 {
        if let Some(budget) = params.action_budget {
            return budget;
        }
        let divisor = self.config.prestige_points_divisor.max(1);
        self.config.base_action_points + (team.prestige / divisor) as u16
    }

    /// Board grows from `base_board_size` to `base + growth` over the cycle.
    pub fn board_size(&self, week: u16) -> usize {
        let progress = cycle_progress(&self.cycle, week);
        self.config.base_board_size + (self.config.board_growth as f32 * progress).round() as usize
    }

    /// Run one staff's tick against the shared recruit slice.
    ///
    /// `current_commits` is the team's commit count at the start of the tick.
    pub fn run_team(
        &self,
        team: &TeamContext,
        teams: &TeamDirectory,
        recruits: &mut [Recruit],
        index: &RecruitIndex,
        current_commits: usize,
        params: &TickParams,
    ) -> BoardReport {
        let cfg = &self.config;
        let mut report = BoardReport::default();

        report.offers_revoked = revocation::revoke_stale(cfg, team, recruits, index, params);

        if params.is_signing_period {
            return report;
        }

        let mut points = self.action_points(team, params);
        let slots = team.slots_remaining(current_commits) as usize;
        let mut outstanding = recruits
            .iter()
            .filter(|r| r.is_undecided() && r.has_offer(&team.name))
            .count();
        let offer_ceiling = slots * cfg.offers_per_slot;

        let board = rank_board(recruits, team, teams, cfg, params, self.board_size(params.week));
        report.board_size = board.len();
        let offer_zone = board.len() / 2 + 1;

        for (rank, candidate) in board.iter().enumerate() {
            if points < cfg.contact_cost.min(cfg.offer_cost) {
                break;
            }
            let recruit = &recruits[candidate.index];
            // soft commits elsewhere only get contacts
            let can_offer = rank < offer_zone
                && recruit.is_undecided()
                && !recruit.has_offer(&team.name)
                && report.offers_made < cfg.max_offers_per_tick
                && points >= cfg.offer_cost
                && outstanding < offer_ceiling
                && recruit.offers.len() < cfg.max_offers_per_recruit;

            if can_offer {
                let pitch = choose_pitch(recruit, team, params);
                let recruit = &mut recruits[candidate.index];
                recruit.receive_offer(&team.name, params.week, params.tick, pitch);
                recruit.adjust_momentum(&team.name, cfg.offer_momentum);
                points -= cfg.offer_cost;
                report.action_points_spent += cfg.offer_cost;
                report.offers_made += 1;
                outstanding += 1;
                log::debug!(
                    "[OfferBoard] {} offers {} ({}-star) with {:?}",
                    team.name,
                    recruit.name,
                    recruit.stars,
                    pitch
                );

                let mirrored = self.mirror_to_partners(team, recruits, index, candidate.index, pitch, params);
                report.mirrored_offers += mirrored;
                outstanding += mirrored as usize;
            } else if points >= cfg.contact_cost && report.contacts_made < cfg.max_contacts_per_tick {
                let momentum = if recruit.is_undecided() { cfg.contact_momentum } else { cfg.poach_momentum };
                recruits[candidate.index].adjust_momentum(&team.name, momentum);
                points -= cfg.contact_cost;
                report.action_points_spent += cfg.contact_cost;
                report.contacts_made += 1;
            }
        }

        report
    }

    /// Extend a fresh offer to uncommitted package partners of the recruit.
    fn mirror_to_partners(
        &self,
        team: &TeamContext,
        recruits: &mut [Recruit],
        index: &RecruitIndex,
        source: usize,
        pitch: PitchType,
        params: &TickParams,
    ) -> u16 {
        let partners: Vec<usize> = recruits[source]
            .package_links()
            .filter_map(|link| index.get(&link.linked_id).copied())
            .collect();

        let mut mirrored = 0;
        for idx in partners {
            let partner = &mut recruits[idx];
            if !partner.is_undecided()
                || partner.declined.contains(&team.name)
                || partner.offers.len() >= self.config.max_offers_per_recruit
            {
                continue;
            }
            if partner.receive_offer(&team.name, params.week, params.tick, pitch) {
                partner.adjust_momentum(&team.name, self.config.mirror_momentum);
                mirrored += 1;
            }
        }
        mirrored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{index_recruits, Position, RecruitId, RelationshipLink, RelationshipType};

    fn recruit(id: RecruitId, stars: u8) -> Recruit {
        Recruit::new(id, format!("Recruit {}", id), Position::SG, stars, 55 + stars * 6, 85, "IN")
    }

    fn twins(a: RecruitId, b: RecruitId) -> (Recruit, Recruit) {
        let mut first = recruit(a, 3);
        let mut second = recruit(b, 3);
        first.relationships.push(RelationshipLink { kind: RelationshipType::Twin, linked_id: b, package_deal: true });
        second.relationships.push(RelationshipLink { kind: RelationshipType::Twin, linked_id: a, package_deal: true });
        (first, second)
    }

    fn run(board: &OfferBoard, team: &TeamContext, recruits: &mut [Recruit], params: &TickParams) -> BoardReport {
        let teams = vec![team.clone()];
        let dir = TeamDirectory::new(&teams);
        let index = index_recruits(recruits);
        board.run_team(team, &dir, recruits, &index, 0, params)
    }

    #[test]
    fn test_action_points_scale_with_prestige() {
        let board = OfferBoard::default();
        let params = TickParams::weekly(1, 1, 1);
        assert_eq!(board.action_points(&TeamContext::new("Low", 10, "IN"), &params), 6);
        assert_eq!(board.action_points(&TeamContext::new("High", 96, "IN"), &params), 14);

        let mut budget = params.clone();
        budget.action_budget = Some(2);
        assert_eq!(board.action_points(&TeamContext::new("High", 96, "IN"), &budget), 2);
    }

    #[test]
    fn test_board_grows_through_cycle() {
        let board = OfferBoard::default();
        assert_eq!(board.board_size(0), 10);
        assert_eq!(board.board_size(13), 20);
        assert_eq!(board.board_size(26), 30);
    }

    #[test]
    fn test_offers_respect_tick_cap() {
        let board = OfferBoard::default();
        let team = TeamContext::new("Purdue", 75, "IN");
        let mut recruits: Vec<Recruit> = (1..=12).map(|id| recruit(id, 3)).collect();
        let report = run(&board, &team, &mut recruits, &TickParams::weekly(3, 2, 2));

        assert_eq!(report.offers_made, 3);
        assert!(report.action_points_spent <= board.action_points(&team, &TickParams::weekly(3, 2, 2)));
        let offered = recruits.iter().filter(|r| r.has_offer("Purdue")).count();
        assert_eq!(offered, 3);
        assert!(recruits.iter().filter(|r| r.has_offer("Purdue")).all(|r| r.momentum_for("Purdue") == 3));
    }

    #[test]
    fn test_full_roster_only_contacts() {
        let board = OfferBoard::default();
        let mut team = TeamContext::new("Full", 75, "IN");
        team.returning_underclassmen = team.scholarship_capacity;
        let mut recruits: Vec<Recruit> = (1..=5).map(|id| recruit(id, 3)).collect();
        let report = run(&board, &team, &mut recruits, &TickParams::weekly(3, 2, 2));
        assert_eq!(report.offers_made, 0);
        assert_eq!(report.contacts_made, 5);
    }

    #[test]
    fn test_soft_commit_elsewhere_gets_contacts_only() {
        let board = OfferBoard::default();
        let team = TeamContext::new("Purdue", 75, "IN");
        let mut recruits = vec![recruit(1, 4)];
        recruits[0].receive_offer("Indiana", 1, 1, PitchType::Standard);
        recruits[0].record_commitment("Indiana", 1, true);

        let report = run(&board, &team, &mut recruits, &TickParams::weekly(3, 2, 2));
        assert_eq!(report.offers_made, 0);
        assert_eq!(report.contacts_made, 1);
        assert!(!recruits[0].has_offer("Purdue"));
        assert_eq!(recruits[0].momentum_for("Purdue"), board.config.poach_momentum as i8);
    }

    #[test]
    fn test_recruit_offer_ceiling() {
        let board = OfferBoard::default();
        let team = TeamContext::new("Late", 75, "IN");
        let mut crowded = recruit(1, 3);
        for i in 0..35 {
            crowded.offers.insert(format!("Other {}", i));
        }
        let mut recruits = vec![crowded];
        let report = run(&board, &team, &mut recruits, &TickParams::weekly(3, 2, 2));
        assert_eq!(report.offers_made, 0);
        assert!(!recruits[0].has_offer("Late"));
    }

    #[test]
    fn test_offer_mirrors_to_twin() {
        let board = OfferBoard::default();
        let team = TeamContext::new("Butler", 60, "IN");
        let (a, b) = twins(1, 2);
        let mut recruits = vec![a, b];
        let mut params = TickParams::weekly(9, 1, 1);
        params.action_budget = Some(3);
        let report = run(&board, &team, &mut recruits, &params);

        assert_eq!(report.offers_made, 1);
        assert_eq!(report.mirrored_offers, 1);
        assert!(recruits.iter().all(|r| r.has_offer("Butler")));
        let mirrored = recruits.iter().find(|r| r.momentum_for("Butler") == 2);
        assert!(mirrored.is_some());
    }

    #[test]
    fn test_no_offers_during_signing_period() {
        let board = OfferBoard::default();
        let team = TeamContext::new("Ball State", 40, "IN");
        let mut recruits: Vec<Recruit> = (1..=3).map(|id| recruit(id, 2)).collect();
        let report = run(&board, &team, &mut recruits, &TickParams::signing(1, 27, 26, 1));
        assert_eq!(report.offers_made + report.contacts_made, 0);
    }
}
