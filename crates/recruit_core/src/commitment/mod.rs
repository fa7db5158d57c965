//! # Commitment State Machine
//!
//! ```text
//! Open -> Narrowing -> SoftCommit -> HardCommit -> Signed
//!                          |
//!                          +--> Narrowing (reopen)
//! ```
//!
//! Every recruit is decided from the state it held at the start of the pass;
//! decision pressure and the set of undecided package partners are
//! snapshotted before the first recruit is touched. Per-team commit counts
//! are the exception: they move with every commitment so no team signs past
//! its open scholarships.
//!
//! Each decision's stage write goes through
//! [`RecruitmentStage::can_transition_to`]; an illegal edge is logged and the
//! recruit keeps its state.

mod pressure;

pub use pressure::{cycle_progress, decision_pressure};

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{CommitmentConfig, CycleConfig, PackageConfig, ShortlistConfig};
use crate::deterministic::{deterministic_bool, deterministic_choice, subcase};
use crate::models::{
    commit_counts, DecisionStyle, PendingCommitment, Recruit, RecruitId, RecruitIndex,
    RecruitmentStage, TeamDirectory,
};
use crate::package::{defection_tolerance, package_strength};
use crate::scoring::InterestModel;
use crate::shortlist::{ScoredOffer, Shortlist, ShortlistAllocator};
use crate::tick::{NewsItem, TickParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentReport {
    pub commits: u16,
    pub soft_commits: u16,
    pub pending_created: u16,
    pub pending_dropped: u16,
    pub hardened: u16,
    pub decommits: u16,
    pub signed: u16,
    /// Offers turned down by recruits who closed their recruitment
    pub declined: u16,
    /// (recruit, team) for every new commitment
    pub commitments: Vec<(RecruitId, String)>,
}

/// Outcome of evaluating one recruit.
#[derive(Debug, Clone, PartialEq)]
enum Action {
    Hold,
    Commit { team: String, soft: bool, sign: bool },
    Defer { team: String, announce_week: u16 },
    DropPending,
    Harden,
    Reopen { team: String },
    Sign,
}

impl Action {
    /// Stage the action moves the recruit into, if any.
    fn target_stage(&self) -> Option<RecruitmentStage> {
        match self {
            Action::Hold | Action::Defer { .. } | Action::DropPending => None,
            Action::Commit { sign: true, .. } | Action::Sign => Some(RecruitmentStage::Signed),
            Action::Commit { soft: true, .. } => Some(RecruitmentStage::SoftCommit),
            Action::Commit { .. } | Action::Harden => Some(RecruitmentStage::HardCommit),
            Action::Reopen { .. } => Some(RecruitmentStage::Narrowing),
        }
    }
}

/// Facts shared by every recruit's decision in one pass.
struct PassSnapshot {
    pressure: f32,
    /// Live commit counts, updated after every decision
    commits: BTreeMap<String, usize>,
    undecided: FxHashSet<RecruitId>,
}

impl PassSnapshot {
    fn has_room(&self, teams: &TeamDirectory, team: &str) -> bool {
        teams.open_slots(team, &self.commits) > 0
    }

    fn record_move(&mut self, from: Option<String>, to: Option<String>) {
        if from == to {
            return;
        }
        if let Some(team) = from {
            if let Some(count) = self.commits.get_mut(&team) {
                *count = count.saturating_sub(1);
            }
        }
        if let Some(team) = to {
            *self.commits.entry(team).or_insert(0) += 1;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommitmentEngine {
    pub cycle: CycleConfig,
    pub config: CommitmentConfig,
    pub package: PackageConfig,
    pub allocator: ShortlistAllocator,
}

impl CommitmentEngine {
    pub fn new(
        cycle: CycleConfig,
        config: CommitmentConfig,
        package: PackageConfig,
        shortlist: ShortlistConfig,
    ) -> Self {
        Self { cycle, config, package, allocator: ShortlistAllocator::new(shortlist) }
    }

    /// Score every live offer from a known team, in name order.
    pub fn score_offers<M: InterestModel>(
        &self,
        recruit: &Recruit,
        teams: &TeamDirectory,
        model: &M,
    ) -> Vec<ScoredOffer> {
        recruit
            .offers
            .iter()
            .filter_map(|name| match teams.get(name) {
                Some(team) => Some(ScoredOffer::new(name.clone(), model.interest(recruit, team))),
                None => {
                    log::warn!("[CommitmentEngine] recruit {} holds offer from unknown team {}", recruit.id, name);
                    None
                }
            })
            .collect()
    }

    /// Shortlist with the current and former commitments forced in.
    pub fn shortlist(&self, recruit: &Recruit, offers: &[ScoredOffer], params: &TickParams) -> Shortlist {
        let required: Vec<&str> = recruit
            .committed_team
            .iter()
            .chain(recruit.former_commitment.iter())
            .map(String::as_str)
            .collect();
        self.allocator.allocate(recruit, offers, &required, params.allocation_key())
    }

    pub fn run<M: InterestModel>(
        &self,
        recruits: &mut [Recruit],
        index: &RecruitIndex,
        teams: &TeamDirectory,
        model: &M,
        params: &TickParams,
        news: &mut Vec<NewsItem>,
    ) -> CommitmentReport {
        let mut snapshot = PassSnapshot {
            pressure: decision_pressure(&self.cycle, &self.config, params),
            commits: commit_counts(recruits),
            undecided: recruits.iter().filter(|r| r.is_undecided()).map(|r| r.id).collect(),
        };
        let mut report = CommitmentReport::default();

        for i in 0..recruits.len() {
            {
                let recruit = &mut recruits[i];
                if recruit.is_committed() && recruit.pending.is_some() {
                    log::warn!(
                        "[CommitmentEngine] recruit {} committed to {:?} with a pending record; keeping the commitment",
                        recruit.id,
                        recruit.committed_team
                    );
                    recruit.pending = None;
                }
                if recruit.stage == RecruitmentStage::Open && recruit.offers.len() >= 2 {
                    recruit.stage = RecruitmentStage::Narrowing;
                }
            }

            let action = self.decide(&recruits[i], recruits, index, teams, model, params, &snapshot);
            let before = recruits[i].committed_team.clone();
            self.apply(&mut recruits[i], action, params, news, &mut report);
            snapshot.record_move(before, recruits[i].committed_team.clone());
        }

        report
    }

    fn decide<M: InterestModel>(
        &self,
        recruit: &Recruit,
        recruits: &[Recruit],
        index: &RecruitIndex,
        teams: &TeamDirectory,
        model: &M,
        params: &TickParams,
        snapshot: &PassSnapshot,
    ) -> Action {
        match recruit.stage {
            RecruitmentStage::Signed => Action::Hold,
            RecruitmentStage::SoftCommit | RecruitmentStage::HardCommit => {
                self.decide_committed(recruit, teams, model, params)
            }
            RecruitmentStage::Open | RecruitmentStage::Narrowing => {
                if recruit.is_committed() {
                    log::warn!("[CommitmentEngine] recruit {} committed while {:?}", recruit.id, recruit.stage);
                    return Action::Hold;
                }
                self.decide_undecided(recruit, recruits, index, teams, model, params, snapshot)
            }
        }
    }

    fn decide_committed<M: InterestModel>(
        &self,
        recruit: &Recruit,
        teams: &TeamDirectory,
        model: &M,
        params: &TickParams,
    ) -> Action {
        let Some(team) = recruit.committed_team.clone() else {
            return Action::Hold;
        };
        if !recruit.has_offer(&team) {
            if recruit.stage == RecruitmentStage::SoftCommit {
                return Action::Reopen { team };
            }
            log::warn!("[CommitmentEngine] recruit {} hard committed to {} without a live offer", recruit.id, team);
        }
        if params.is_signing_period {
            return Action::Sign;
        }
        if recruit.stage == RecruitmentStage::HardCommit {
            return Action::Hold;
        }

        let cfg = &self.config;
        let offers = self.score_offers(recruit, teams, model);
        let list = self.shortlist(recruit, &offers, params);
        let committed_share = list.share_of(&team);
        let committed_score = list.get(&team).map(|e| e.score).unwrap_or(0) as f32;

        if params.week >= self.cycle.harden_week
            && committed_share >= cfg.harden_share_floor
            && committed_score >= cfg.harden_score_floor
        {
            return Action::Harden;
        }

        let rival_share = list
            .entries
            .iter()
            .filter(|e| e.team != team)
            .map(|e| e.share)
            .fold(0.0f32, f32::max);
        let gap = rival_share - committed_share;
        let threshold = cfg.reopen_base_threshold + recruit.resilience.min(100) as f32 * cfg.reopen_resilience_scale;
        if gap <= threshold {
            return Action::Hold;
        }
        let probability = (cfg.reopen_base_probability + (gap - threshold) * cfg.reopen_probability_per_point)
            .min(cfg.reopen_probability_cap);
        if deterministic_bool(params.seed, params.tick, recruit.id, &team, subcase::REOPEN_ROLL, probability) {
            Action::Reopen { team }
        } else {
            Action::Hold
        }
    }

    fn decide_undecided<M: InterestModel>(
        &self,
        recruit: &Recruit,
        recruits: &[Recruit],
        index: &RecruitIndex,
        teams: &TeamDirectory,
        model: &M,
        params: &TickParams,
        snapshot: &PassSnapshot,
    ) -> Action {
        let offers = self.score_offers(recruit, teams, model);
        if offers.is_empty() {
            return Action::Hold;
        }
        // a team with every scholarship spoken for cannot take the commitment
        let offers: Vec<ScoredOffer> =
            offers.into_iter().filter(|o| snapshot.has_room(teams, &o.team)).collect();
        let soft = !params.is_signing_period && params.week < self.cycle.soft_commit_cutoff_week;

        if let Some(pending) = &recruit.pending {
            if params.is_signing_period {
                return if recruit.has_offer(&pending.team) && snapshot.has_room(teams, &pending.team) {
                    Action::Commit { team: pending.team.clone(), soft: false, sign: true }
                } else {
                    Action::DropPending
                };
            }
            if params.week < pending.announce_week {
                return Action::Hold;
            }
            let list = self.shortlist(recruit, &offers, params);
            let still_leads = list.leader().is_some_and(|l| l.team == pending.team);
            return if still_leads && recruit.has_offer(&pending.team) {
                Action::Commit { team: pending.team.clone(), soft, sign: false }
            } else {
                Action::DropPending
            };
        }

        if offers.is_empty() {
            return Action::Hold;
        }
        let list = self.shortlist(recruit, &offers, params);
        let Some(leader) = list.leader() else {
            return Action::Hold;
        };

        if params.is_signing_period {
            let cfg = &self.config;
            let threshold = (cfg.signing_threshold - cfg.signing_decay_per_day * params.signing_day as f32)
                .max(cfg.signing_threshold_floor);
            return if leader.score as f32 >= threshold {
                Action::Commit { team: leader.team.clone(), soft: false, sign: true }
            } else {
                Action::Hold
            };
        }

        if params.week < self.cycle.min_commit_week(recruit.stars) {
            return Action::Hold;
        }

        if !self.clears_gates(recruit, recruits, index, teams, &list, snapshot)
            && !self.desperate(recruit, leader.score, params)
        {
            return Action::Hold;
        }

        if self.holds_for_partner(recruit, recruits, index, &offers, &leader.team, leader.score, params, snapshot) {
            log::debug!(
                "[CommitmentEngine] {} passes on {} to stay with package partner",
                recruit.name,
                leader.team
            );
            return Action::Hold;
        }

        let delay = self.announce_delay(recruit, &leader.team, params);
        if delay == 0 {
            Action::Commit { team: leader.team.clone(), soft, sign: false }
        } else {
            Action::Defer { team: leader.team.clone(), announce_week: params.week + delay }
        }
    }

    /// Score, share and lead gates, each shrunk by pressure and reliefs.
    fn clears_gates(
        &self,
        recruit: &Recruit,
        recruits: &[Recruit],
        index: &RecruitIndex,
        teams: &TeamDirectory,
        list: &Shortlist,
        snapshot: &PassSnapshot,
    ) -> bool {
        let cfg = &self.config;
        let Some(leader) = list.leader() else {
            return false;
        };
        let lead = leader.share - list.runner_up().map(|e| e.share).unwrap_or(0.0);

        let mut relief = 1.0 - cfg.pressure_relief * snapshot.pressure;
        if (1..=cfg.scarcity_slots).contains(&teams.open_slots(&leader.team, &snapshot.commits)) {
            relief *= cfg.scarcity_relief;
        }
        let mutual_package = recruit
            .package_links()
            .filter_map(|link| index.get(&link.linked_id))
            .any(|p| recruits[*p].has_offer(&leader.team));
        if mutual_package {
            relief *= cfg.package_relief;
        }

        leader.score as f32 >= cfg.score_gate * relief
            && leader.share >= cfg.share_gate * relief
            && lead >= cfg.lead_gate * relief
    }

    /// Low-star recruits with few offers take what they can late in the cycle.
    fn desperate(&self, recruit: &Recruit, top_score: u8, params: &TickParams) -> bool {
        let cfg = &self.config;
        let progress = cycle_progress(&self.cycle, params.week);
        if recruit.stars > cfg.desperation_max_stars
            || recruit.offers.len() > cfg.desperation_max_offers
            || progress < 0.5
        {
            return false;
        }
        let late = (progress - 0.5) / 0.5;
        top_score as f32 >= cfg.desperation_threshold - cfg.desperation_late_drop * late
    }

    /// A package member stays put when an undecided partner lacks the
    /// leader's offer and the leader's edge over the best shared team is
    /// within tolerance.
    fn holds_for_partner(
        &self,
        recruit: &Recruit,
        recruits: &[Recruit],
        index: &RecruitIndex,
        offers: &[ScoredOffer],
        leader_team: &str,
        leader_score: u8,
        params: &TickParams,
        snapshot: &PassSnapshot,
    ) -> bool {
        for link in recruit.package_links() {
            let Some(&p) = index.get(&link.linked_id) else {
                continue;
            };
            let partner = &recruits[p];
            if !snapshot.undecided.contains(&partner.id) || partner.has_offer(leader_team) {
                continue;
            }
            let Some(shared_best) = offers.iter().filter(|o| partner.has_offer(&o.team)).map(|o| o.score).max() else {
                continue;
            };
            let strength = package_strength(&self.package, params.seed, recruit, partner, link.kind);
            let gap = leader_score as f32 - shared_best as f32;
            if gap <= defection_tolerance(&self.package, strength) {
                return true;
            }
        }
        false
    }

    /// Weeks between deciding and announcing.
    fn announce_delay(&self, recruit: &Recruit, team: &str, params: &TickParams) -> u16 {
        let roll = |options| {
            deterministic_choice(params.seed, params.tick, recruit.id, team, subcase::PENDING_DELAY, options) as u16
        };
        match recruit.decision_style {
            DecisionStyle::Decisive => 0,
            DecisionStyle::Balanced => roll(2),
            DecisionStyle::Indecisive => 1 + roll(2),
        }
    }

    fn apply(
        &self,
        recruit: &mut Recruit,
        action: Action,
        params: &TickParams,
        news: &mut Vec<NewsItem>,
        report: &mut CommitmentReport,
    ) {
        if let Some(next) = action.target_stage() {
            if !recruit.stage.can_transition_to(next) {
                log::warn!(
                    "[CommitmentEngine] recruit {} cannot move {:?} -> {:?}; keeping state",
                    recruit.id,
                    recruit.stage,
                    next
                );
                return;
            }
        }
        match action {
            Action::Hold => {}
            Action::Commit { team, soft, sign } => {
                recruit.record_commitment(&team, params.week, soft);
                if recruit.user_offer_pending && !params.is_user_team(&team) {
                    recruit.user_offer_pending = false;
                }
                log::info!(
                    "[CommitmentEngine] {} ({}-star) {} to {} in week {}",
                    recruit.name,
                    recruit.stars,
                    if soft { "soft commits" } else { "commits" },
                    team,
                    params.week
                );
                news.push(NewsItem::commit(params, recruit, &team, soft));
                report.commits += 1;
                if soft {
                    report.soft_commits += 1;
                }
                if sign {
                    recruit.record_signing(params.week);
                    news.push(NewsItem::sign(params, recruit, &team));
                    report.signed += 1;
                }
                if !soft {
                    report.declined += recruit.decline_other_offers(&team) as u16;
                }
                report.commitments.push((recruit.id, team));
            }
            Action::Defer { team, announce_week } => {
                log::debug!(
                    "[CommitmentEngine] {} decides on {}, announcing week {}",
                    recruit.name,
                    team,
                    announce_week
                );
                recruit.pending = Some(PendingCommitment { team, decided_week: params.week, announce_week });
                report.pending_created += 1;
            }
            Action::DropPending => {
                if let Some(pending) = recruit.pending.take() {
                    log::debug!("[CommitmentEngine] {} drops pending decision for {}", recruit.name, pending.team);
                    report.pending_dropped += 1;
                }
            }
            Action::Harden => {
                recruit.soft_commitment = false;
                recruit.stage = RecruitmentStage::HardCommit;
                if let Some(team) = recruit.committed_team.clone() {
                    report.declined += recruit.decline_other_offers(&team) as u16;
                    news.push(NewsItem::hardened(params, recruit, &team));
                }
                report.hardened += 1;
            }
            Action::Reopen { team } => {
                recruit.record_decommitment();
                recruit.adjust_momentum(&team, self.config.decommit_momentum);
                log::info!("[CommitmentEngine] {} reopens, leaving {}", recruit.name, team);
                news.push(NewsItem::decommit(params, recruit, &team));
                report.decommits += 1;
            }
            Action::Sign => {
                recruit.record_signing(params.week);
                if let Some(team) = recruit.committed_team.clone() {
                    report.declined += recruit.decline_other_offers(&team) as u16;
                    news.push(NewsItem::sign(params, recruit, &team));
                }
                report.signed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{index_recruits, PitchType, Position, RelationshipLink, RelationshipType, TeamContext};
    use crate::tick::NewsKind;
    use fxhash::FxHashMap;

    /// Score table keyed by (recruit, team); unknown pairs score 1.
    #[derive(Default)]
    struct Table(FxHashMap<(RecruitId, String), u8>);

    impl Table {
        fn set(mut self, recruit: RecruitId, team: &str, score: u8) -> Self {
            self.0.insert((recruit, team.to_string()), score);
            self
        }
    }

    impl InterestModel for Table {
        fn interest(&self, recruit: &Recruit, team: &TeamContext) -> u8 {
            self.0.get(&(recruit.id, team.name.clone())).copied().unwrap_or(1)
        }
    }

    fn league() -> Vec<TeamContext> {
        ["Alabama", "Baylor", "Creighton"]
            .iter()
            .map(|name| TeamContext::new(*name, 70, "TX"))
            .collect()
    }

    fn prospect(id: RecruitId, stars: u8, style: DecisionStyle, offers: &[&str]) -> Recruit {
        let mut r = Recruit::new(id, format!("Prospect {}", id), Position::PF, stars, 60 + stars * 6, 90, "TX");
        r.decision_style = style;
        for team in offers {
            r.receive_offer(team, 0, 0, PitchType::Standard);
        }
        r
    }

    fn run(recruits: &mut [Recruit], table: &Table, params: &TickParams) -> (CommitmentReport, Vec<NewsItem>) {
        run_in(&league(), recruits, table, params)
    }

    fn run_in(
        teams: &[TeamContext],
        recruits: &mut [Recruit],
        table: &Table,
        params: &TickParams,
    ) -> (CommitmentReport, Vec<NewsItem>) {
        let dir = TeamDirectory::new(teams);
        let index = index_recruits(recruits);
        let mut news = Vec::new();
        let report = CommitmentEngine::default().run(recruits, &index, &dir, table, params, &mut news);
        (report, news)
    }

    fn a_over_b() -> Table {
        Table::default().set(1, "Alabama", 80).set(1, "Baylor", 40)
    }

    #[test]
    fn test_clear_leader_commits_past_midseason() {
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Decisive, &["Alabama", "Baylor"])];
        let (report, news) = run(&mut recruits, &a_over_b(), &TickParams::weekly(4, 18, 18));

        assert_eq!(report.commits, 1);
        assert_eq!(recruits[0].committed_team.as_deref(), Some("Alabama"));
        assert_eq!(recruits[0].stage, RecruitmentStage::HardCommit);
        assert_eq!(recruits[0].commit_week, Some(18));
        assert_eq!(news[0].kind, NewsKind::Commit);
    }

    #[test]
    fn test_hard_commit_declines_other_offers() {
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Decisive, &["Alabama", "Baylor"])];
        let (report, _) = run(&mut recruits, &a_over_b(), &TickParams::weekly(4, 18, 18));
        assert_eq!(report.declined, 1);
        assert_eq!(recruits[0].live_offers(), vec!["Alabama".to_string()]);
        assert!(recruits[0].declined.contains("Baylor"));
    }

    #[test]
    fn test_full_team_cannot_take_commitment() {
        let mut teams = league();
        teams[0].returning_underclassmen = teams[0].scholarship_capacity;
        let table = Table::default().set(1, "Alabama", 95).set(1, "Baylor", 85);
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Decisive, &["Alabama", "Baylor"])];
        let (report, _) = run_in(&teams, &mut recruits, &table, &TickParams::weekly(4, 18, 18));
        assert_eq!(report.commits, 1);
        assert_eq!(recruits[0].committed_team.as_deref(), Some("Baylor"));
    }

    #[test]
    fn test_last_slot_goes_to_first_commit_of_the_pass() {
        let mut teams = league();
        teams[0].returning_underclassmen = teams[0].scholarship_capacity - 1;
        let table = Table::default()
            .set(1, "Alabama", 95)
            .set(1, "Baylor", 85)
            .set(2, "Alabama", 95)
            .set(2, "Baylor", 85);
        let mut recruits = vec![
            prospect(1, 3, DecisionStyle::Decisive, &["Alabama", "Baylor"]),
            prospect(2, 3, DecisionStyle::Decisive, &["Alabama", "Baylor"]),
        ];
        let (report, _) = run_in(&teams, &mut recruits, &table, &TickParams::weekly(4, 18, 18));
        assert_eq!(report.commits, 2);
        assert_eq!(recruits[0].committed_team.as_deref(), Some("Alabama"));
        assert_eq!(recruits[1].committed_team.as_deref(), Some("Baylor"));
    }

    #[test]
    fn test_pending_for_full_team_dropped_on_signing_day() {
        let mut teams = league();
        teams[1].returning_underclassmen = teams[1].scholarship_capacity;
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Indecisive, &["Alabama", "Baylor"])];
        recruits[0].pending = Some(PendingCommitment { team: "Baylor".into(), decided_week: 25, announce_week: 27 });
        let (report, _) = run_in(&teams, &mut recruits, &a_over_b(), &TickParams::signing(4, 27, 26, 0));
        assert_eq!(report.pending_dropped, 1);
        assert!(!recruits[0].is_signed());
    }

    #[test]
    fn test_signed_recruit_stays_signed() {
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Balanced, &["Alabama", "Baylor"])];
        recruits[0].record_commitment("Alabama", 15, false);
        recruits[0].record_signing(26);
        let engine = CommitmentEngine::default();
        let mut news = Vec::new();
        let mut report = CommitmentReport::default();
        let params = TickParams::weekly(4, 30, 10);
        engine.apply(&mut recruits[0], Action::Reopen { team: "Alabama".into() }, &params, &mut news, &mut report);
        assert!(recruits[0].is_signed());
        assert_eq!(recruits[0].committed_team.as_deref(), Some("Alabama"));
        assert_eq!(report.decommits, 0);
        assert!(news.is_empty());
    }

    #[test]
    fn test_early_commit_is_soft() {
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Decisive, &["Alabama", "Baylor"])];
        let (report, news) = run(&mut recruits, &a_over_b(), &TickParams::weekly(4, 5, 5));
        assert_eq!(report.soft_commits, 1);
        assert!(recruits[0].soft_commitment);
        assert_eq!(recruits[0].stage, RecruitmentStage::SoftCommit);
        assert_eq!(news[0].kind, NewsKind::SoftCommit);
    }

    #[test]
    fn test_weak_top_score_holds() {
        let table = Table::default().set(1, "Alabama", 45).set(1, "Baylor", 43);
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Decisive, &["Alabama", "Baylor"])];
        let (report, _) = run(&mut recruits, &table, &TickParams::weekly(4, 10, 10));
        assert_eq!(report.commits, 0);
        assert_eq!(recruits[0].stage, RecruitmentStage::Narrowing);
    }

    #[test]
    fn test_five_star_waits_for_minimum_week() {
        let mut recruits = vec![prospect(1, 5, DecisionStyle::Decisive, &["Alabama", "Baylor"])];
        for week in 0..6u16 {
            let (report, _) = run(&mut recruits, &a_over_b(), &TickParams::weekly(4, week as u32, week));
            assert_eq!(report.commits, 0, "committed in week {}", week);
        }
        let (report, _) = run(&mut recruits, &a_over_b(), &TickParams::weekly(4, 6, 6));
        assert_eq!(report.commits, 1);
        assert_eq!(recruits[0].commit_week, Some(6));
    }

    #[test]
    fn test_indecisive_recruit_announces_later() {
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Indecisive, &["Alabama", "Baylor"])];
        let (report, _) = run(&mut recruits, &a_over_b(), &TickParams::weekly(4, 18, 18));
        assert_eq!(report.pending_created, 1);
        assert!(!recruits[0].is_committed());
        let announce = recruits[0].pending.as_ref().map(|p| p.announce_week).unwrap_or(0);
        assert!((19..=20).contains(&announce));

        let mut committed_week = None;
        for week in 19..=20u16 {
            run(&mut recruits, &a_over_b(), &TickParams::weekly(4, week as u32, week));
            if recruits[0].is_committed() && committed_week.is_none() {
                committed_week = Some(week);
            }
        }
        assert_eq!(committed_week, Some(announce));
        assert_eq!(recruits[0].committed_team.as_deref(), Some("Alabama"));
        assert!(recruits[0].pending.is_none());
    }

    #[test]
    fn test_pending_dropped_when_leader_changes() {
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Indecisive, &["Alabama", "Baylor"])];
        recruits[0].pending = Some(PendingCommitment { team: "Baylor".into(), decided_week: 9, announce_week: 10 });
        let (report, _) = run(&mut recruits, &a_over_b(), &TickParams::weekly(4, 10, 10));
        assert_eq!(report.pending_dropped, 1);
        assert!(recruits[0].pending.is_none());
        assert!(!recruits[0].is_committed());
    }

    #[test]
    fn test_soft_commit_hardens_late() {
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Balanced, &["Alabama", "Baylor"])];
        recruits[0].record_commitment("Alabama", 8, true);
        let (report, news) = run(&mut recruits, &a_over_b(), &TickParams::weekly(4, 20, 20));
        assert_eq!(report.hardened, 1);
        assert_eq!(recruits[0].stage, RecruitmentStage::HardCommit);
        assert!(!recruits[0].soft_commitment);
        assert_eq!(news[0].kind, NewsKind::Hardened);
    }

    #[test]
    fn test_soft_commit_reopens_for_dominant_rival() {
        let table = Table::default().set(1, "Alabama", 95).set(1, "Baylor", 40);
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Balanced, &["Alabama", "Baylor"])];
        recruits[0].resilience = 0;
        recruits[0].record_commitment("Baylor", 3, true);

        let mut reopened_at = None;
        for tick in 0..60u32 {
            let (report, _) = run(&mut recruits, &table, &TickParams::weekly(8, tick, 8));
            if report.decommits > 0 {
                reopened_at = Some(tick);
                break;
            }
        }
        assert!(reopened_at.is_some(), "a 0.4 roll should hit within 60 ticks");
        assert_eq!(recruits[0].stage, RecruitmentStage::Narrowing);
        assert_eq!(recruits[0].former_commitment.as_deref(), Some("Baylor"));
        assert_eq!(recruits[0].momentum_for("Baylor"), -4);
        assert!(!recruits[0].is_committed());
    }

    #[test]
    fn test_resilient_commit_stays_put() {
        let table = Table::default().set(1, "Alabama", 70).set(1, "Baylor", 67);
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Balanced, &["Alabama", "Baylor"])];
        recruits[0].resilience = 100;
        recruits[0].record_commitment("Baylor", 3, true);
        for tick in 0..30u32 {
            let (report, _) = run(&mut recruits, &table, &TickParams::weekly(8, tick, 8));
            assert_eq!(report.decommits, 0);
        }
    }

    #[test]
    fn test_signing_period_signs_commitments() {
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Balanced, &["Alabama", "Baylor"])];
        recruits[0].record_commitment("Alabama", 15, false);
        let (report, news) = run(&mut recruits, &a_over_b(), &TickParams::signing(4, 27, 26, 0));
        assert_eq!(report.signed, 1);
        assert!(recruits[0].is_signed());
        assert_eq!(recruits[0].signed_week, Some(26));
        assert_eq!(news[0].kind, NewsKind::Sign);
    }

    #[test]
    fn test_signing_threshold_decays_by_day() {
        let table = Table::default().set(1, "Creighton", 60);
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Indecisive, &["Creighton"])];
        let (report, _) = run(&mut recruits, &table, &TickParams::signing(4, 27, 26, 0));
        assert_eq!(report.commits, 0);
        let (report, _) = run(&mut recruits, &table, &TickParams::signing(4, 29, 26, 2));
        assert_eq!(report.commits, 1);
        assert_eq!(report.signed, 1);
        assert!(recruits[0].is_signed());
    }

    #[test]
    fn test_desperation_path_for_low_stars() {
        let table = Table::default().set(1, "Creighton", 40).set(2, "Creighton", 40);
        let mut recruits = vec![
            prospect(1, 2, DecisionStyle::Decisive, &["Creighton"]),
            prospect(2, 3, DecisionStyle::Decisive, &["Creighton"]),
        ];
        let (report, _) = run(&mut recruits, &table, &TickParams::weekly(4, 25, 25));
        assert_eq!(report.commits, 1);
        assert_eq!(recruits[0].committed_team.as_deref(), Some("Creighton"));
        assert!(!recruits[1].is_committed());
    }

    fn linked_twins(offers_a: &[&str], offers_b: &[&str]) -> Vec<Recruit> {
        let mut a = prospect(1, 3, DecisionStyle::Decisive, offers_a);
        let mut b = prospect(2, 3, DecisionStyle::Indecisive, offers_b);
        a.motivations.relationship = 20;
        b.motivations.relationship = 20;
        a.relationships.push(RelationshipLink { kind: RelationshipType::Twin, linked_id: 2, package_deal: true });
        b.relationships.push(RelationshipLink { kind: RelationshipType::Twin, linked_id: 1, package_deal: true });
        vec![a, b]
    }

    #[test]
    fn test_twin_does_not_defect_within_tolerance() {
        let table = Table::default().set(1, "Baylor", 90).set(1, "Alabama", 70).set(2, "Alabama", 68);
        let mut recruits = linked_twins(&["Alabama", "Baylor"], &["Alabama"]);
        run(&mut recruits, &table, &TickParams::weekly(4, 20, 20));
        assert_ne!(recruits[0].committed_team.as_deref(), Some("Baylor"));
        assert!(recruits[0].pending.is_none());
    }

    #[test]
    fn test_twin_defects_beyond_tolerance() {
        let table = Table::default().set(1, "Baylor", 100).set(1, "Alabama", 55).set(2, "Alabama", 68);
        let mut recruits = linked_twins(&["Alabama", "Baylor"], &["Alabama"]);
        run(&mut recruits, &table, &TickParams::weekly(4, 20, 20));
        assert_eq!(recruits[0].committed_team.as_deref(), Some("Baylor"));
    }

    #[test]
    fn test_commit_elsewhere_clears_user_flag() {
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Decisive, &["Alabama", "Baylor"])];
        recruits[0].user_offer_pending = true;
        let params = TickParams::weekly(4, 18, 18).with_user_team("Baylor", Vec::new());
        run(&mut recruits, &a_over_b(), &params);
        assert_eq!(recruits[0].committed_team.as_deref(), Some("Alabama"));
        assert!(!recruits[0].user_offer_pending);
    }

    #[test]
    fn test_conflicting_pending_record_dropped() {
        let mut recruits = vec![prospect(1, 3, DecisionStyle::Balanced, &["Alabama", "Baylor"])];
        recruits[0].record_commitment("Alabama", 15, false);
        recruits[0].pending = Some(PendingCommitment { team: "Baylor".into(), decided_week: 15, announce_week: 16 });
        run(&mut recruits, &a_over_b(), &TickParams::weekly(4, 16, 16));
        assert!(recruits[0].pending.is_none());
        assert_eq!(recruits[0].committed_team.as_deref(), Some("Alabama"));
    }
}
