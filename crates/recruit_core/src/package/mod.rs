//! # Package Deals
//!
//! Twins, siblings and cousins who want to land at the same program.
//!
//! The resolver runs after the per-recruit commitment pass so it can react to
//! commitments made earlier in the same tick:
//!
//! 1. A member who just committed pulls an undecided partner along when the
//!    partner already holds a plausible offer from that team.
//! 2. Two undecided members are scored jointly across every team courting
//!    either of them; the best team gets both only if the joint score and
//!    each individual score clear their pressure-adjusted bars.
//! 3. Any offer held by one undecided member is mirrored to the other.
//!
//! Each linked pair is handled once per tick. Commit counts are tracked live
//! across pairs: a follow needs one open scholarship, a joint commit two.

mod strength;

pub use strength::{
    base_strength, defection_tolerance, disposition, independence_penalty, package_strength,
    synergy_bonus,
};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::commitment::decision_pressure;
use crate::config::{CommitmentConfig, CycleConfig, PackageConfig};
use crate::models::{
    commit_counts, PitchType, Recruit, RecruitId, RecruitIndex, RelationshipType, TeamContext,
    TeamDirectory,
};
use crate::scoring::InterestModel;
use crate::tick::{NewsItem, TickParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReport {
    pub pairs_evaluated: u16,
    pub joint_commits: u16,
    pub follow_commits: u16,
    pub mirrored_offers: u16,
    /// (recruit, team) for every commitment made here
    pub commitments: Vec<(RecruitId, String)>,
}

/// Best joint destination for a pair.
#[derive(Debug, Clone, PartialEq)]
pub struct JointCandidate {
    pub team: String,
    pub score_a: u8,
    pub score_b: u8,
    pub joint: f32,
}

#[derive(Debug, Clone)]
pub struct PackageDealResolver {
    pub config: PackageConfig,
    pub cycle: CycleConfig,
    pub commitment: CommitmentConfig,
    pub max_offers_per_recruit: usize,
}

impl Default for PackageDealResolver {
    fn default() -> Self {
        Self {
            config: PackageConfig::default(),
            cycle: CycleConfig::default(),
            commitment: CommitmentConfig::default(),
            max_offers_per_recruit: 35,
        }
    }
}

impl PackageDealResolver {
    pub fn new(
        config: PackageConfig,
        cycle: CycleConfig,
        commitment: CommitmentConfig,
        max_offers_per_recruit: usize,
    ) -> Self {
        Self { config, cycle, commitment, max_offers_per_recruit }
    }

    pub fn joint_score(&self, team: &TeamContext, score_a: u8, score_b: u8, strength: f32, pressure: f32) -> f32 {
        let cfg = &self.config;
        let halo = (team.recruiting_prestige.min(100) as f32 - 50.0) * cfg.halo_scale;
        let gap = (score_a as f32 - score_b as f32).abs();
        let imbalance = (gap - cfg.imbalance_free_gap).max(0.0) * cfg.imbalance_scale;
        score_a as f32 + score_b as f32 + synergy_bonus(cfg, strength, pressure) + halo - imbalance
    }

    pub fn joint_threshold(&self, pressure: f32) -> f32 {
        self.config.joint_threshold - self.config.joint_pressure_relief * pressure
    }

    pub fn individual_floor(&self, pressure: f32) -> f32 {
        self.config.individual_floor - self.config.individual_floor_relief * pressure
    }

    /// Highest joint score over every team courting either member.
    ///
    /// Teams offering only one member count only for weak bonds, and only
    /// while the other member is under the offer ceiling. Teams without two
    /// open scholarships are skipped.
    pub fn best_joint_team<M: InterestModel>(
        &self,
        a: &Recruit,
        b: &Recruit,
        strength: f32,
        pressure: f32,
        teams: &TeamDirectory,
        commits: &BTreeMap<String, usize>,
        model: &M,
    ) -> Option<JointCandidate> {
        let courting: BTreeSet<&String> = a.offers.iter().chain(b.offers.iter()).collect();
        let allow_single = strength < self.config.single_offer_strength_threshold;

        let mut best: Option<JointCandidate> = None;
        for name in courting {
            let mutual = a.has_offer(name) && b.has_offer(name);
            if !mutual && !allow_single {
                continue;
            }
            if !mutual {
                let lacking = if a.has_offer(name) { b } else { a };
                if lacking.offers.len() >= self.max_offers_per_recruit {
                    continue;
                }
            }
            if a.declined.contains(name) || b.declined.contains(name) {
                continue;
            }
            if teams.open_slots(name, commits) < 2 {
                continue;
            }
            let Some(team) = teams.get(name) else {
                log::warn!("[PackageDealResolver] offer from unknown team {}", name);
                continue;
            };
            let score_a = model.interest(a, team);
            let score_b = model.interest(b, team);
            let joint = self.joint_score(team, score_a, score_b, strength, pressure);
            // BTreeSet order means ties keep the alphabetically first team
            if best.as_ref().map_or(true, |c| joint > c.joint) {
                best = Some(JointCandidate { team: name.clone(), score_a, score_b, joint });
            }
        }
        best
    }

    pub fn resolve<M: InterestModel>(
        &self,
        recruits: &mut [Recruit],
        index: &RecruitIndex,
        teams: &TeamDirectory,
        model: &M,
        params: &TickParams,
        news: &mut Vec<NewsItem>,
    ) -> PackageReport {
        let mut report = PackageReport::default();
        let pressure = decision_pressure(&self.cycle, &self.commitment, params);
        let mut commits = commit_counts(recruits);

        let mut processed: BTreeSet<(RecruitId, RecruitId)> = BTreeSet::new();
        let mut pairs: Vec<(usize, usize, RelationshipType)> = Vec::new();
        for (i, recruit) in recruits.iter().enumerate() {
            for link in recruit.package_links() {
                let key = (recruit.id.min(link.linked_id), recruit.id.max(link.linked_id));
                if key.0 == key.1 || !processed.insert(key) {
                    continue;
                }
                match index.get(&link.linked_id) {
                    Some(&j) => pairs.push((i, j, link.kind)),
                    None => log::warn!(
                        "[PackageDealResolver] recruit {} linked to missing recruit {}",
                        recruit.id,
                        link.linked_id
                    ),
                }
            }
        }

        for (i, j, kind) in pairs {
            report.pairs_evaluated += 1;
            let (a_committed, b_committed) = (recruits[i].is_committed(), recruits[j].is_committed());
            match (a_committed, b_committed) {
                (true, true) => {}
                (true, false) => {
                    self.follow(recruits, i, j, kind, teams, &mut commits, model, params, pressure, news, &mut report)
                }
                (false, true) => {
                    self.follow(recruits, j, i, kind, teams, &mut commits, model, params, pressure, news, &mut report)
                }
                (false, false) => {
                    self.joint_decision(
                        recruits,
                        i,
                        j,
                        kind,
                        teams,
                        &mut commits,
                        model,
                        params,
                        pressure,
                        news,
                        &mut report,
                    );
                    if recruits[i].is_undecided() && recruits[j].is_undecided() {
                        report.mirrored_offers += self.mirror_offers(recruits, i, j, params);
                        report.mirrored_offers += self.mirror_offers(recruits, j, i, params);
                    }
                }
            }
        }

        report
    }

    fn may_commit(&self, recruit: &Recruit, params: &TickParams) -> bool {
        recruit.is_undecided()
            && (params.is_signing_period || params.week >= self.cycle.min_commit_week(recruit.stars))
    }

    fn follow<M: InterestModel>(
        &self,
        recruits: &mut [Recruit],
        leader: usize,
        follower: usize,
        kind: RelationshipType,
        teams: &TeamDirectory,
        commits: &mut BTreeMap<String, usize>,
        model: &M,
        params: &TickParams,
        pressure: f32,
        news: &mut Vec<NewsItem>,
        report: &mut PackageReport,
    ) {
        let Some(team_name) = recruits[leader].committed_team.clone() else {
            return;
        };
        let partner = &recruits[follower];
        if !self.may_commit(partner, params) || !partner.has_offer(&team_name) {
            return;
        }
        if teams.open_slots(&team_name, commits) == 0 {
            log::debug!("[PackageDealResolver] {} has no scholarship left for {}", team_name, partner.name);
            return;
        }
        let Some(team) = teams.get(&team_name) else {
            return;
        };
        if (model.interest(partner, team) as f32) < self.individual_floor(pressure) {
            return;
        }

        let soft = recruits[leader].soft_commitment;
        let signed = recruits[leader].is_signed();
        let item = NewsItem::follows(params, &recruits[follower], &recruits[leader], kind, &team_name);

        let partner = &mut recruits[follower];
        commit_member(partner, &team_name, params, soft, signed);
        *commits.entry(team_name.clone()).or_insert(0) += 1;
        log::info!("[PackageDealResolver] {} follows partner to {}", partner.name, team_name);
        report.follow_commits += 1;
        report.commitments.push((partner.id, team_name));
        news.push(item);
    }

    fn joint_decision<M: InterestModel>(
        &self,
        recruits: &mut [Recruit],
        i: usize,
        j: usize,
        kind: RelationshipType,
        teams: &TeamDirectory,
        commits: &mut BTreeMap<String, usize>,
        model: &M,
        params: &TickParams,
        pressure: f32,
        news: &mut Vec<NewsItem>,
        report: &mut PackageReport,
    ) {
        let (a, b) = (&recruits[i], &recruits[j]);
        if !self.may_commit(a, params) || !self.may_commit(b, params) {
            return;
        }
        let strength = package_strength(&self.config, params.seed, a, b, kind);
        let Some(best) = self.best_joint_team(a, b, strength, pressure, teams, commits, model) else {
            return;
        };

        let floor = self.individual_floor(pressure);
        if best.joint < self.joint_threshold(pressure)
            || (best.score_a as f32) < floor
            || (best.score_b as f32) < floor
        {
            log::trace!(
                "[PackageDealResolver] {} + {} hold: {} joint {:.1}",
                a.name,
                b.name,
                best.team,
                best.joint
            );
            return;
        }

        let soft = !params.is_signing_period && params.week < self.cycle.soft_commit_cutoff_week;
        for idx in [i, j] {
            let member = &mut recruits[idx];
            // a single-offer team completes the pair's offers before committing
            member.receive_offer(&best.team, params.week, params.tick, PitchType::Standard);
            commit_member(member, &best.team, params, soft, params.is_signing_period);
            report.commitments.push((member.id, best.team.clone()));
        }
        *commits.entry(best.team.clone()).or_insert(0) += 2;
        log::info!(
            "[PackageDealResolver] {} and {} commit together to {} (joint {:.1}, strength {:.2})",
            recruits[i].name,
            recruits[j].name,
            best.team,
            best.joint,
            strength
        );
        news.push(NewsItem::package(params, &recruits[i], &recruits[j], kind, &best.team));
        report.joint_commits += 1;
    }

    /// Copy `from`'s live offers onto `to`. Returns the number added.
    fn mirror_offers(&self, recruits: &mut [Recruit], from: usize, to: usize, params: &TickParams) -> u16 {
        let offers: Vec<(String, PitchType)> = recruits[from]
            .offers
            .iter()
            .map(|team| (team.clone(), recruits[from].active_pitch(team).unwrap_or_default()))
            .collect();

        let target = &mut recruits[to];
        let mut added = 0;
        for (team, pitch) in offers {
            if target.offers.len() >= self.max_offers_per_recruit {
                break;
            }
            if target.declined.contains(&team) {
                continue;
            }
            if target.receive_offer(&team, params.week, params.tick, pitch) {
                added += 1;
            }
        }
        added
    }
}

/// Hard commits and signings close the member's recruitment.
fn commit_member(member: &mut Recruit, team: &str, params: &TickParams, soft: bool, sign: bool) {
    member.record_commitment(team, params.week, soft);
    if member.user_offer_pending && !params.is_user_team(team) {
        member.user_offer_pending = false;
    }
    if sign {
        member.record_signing(params.week);
    }
    if sign || !soft {
        member.decline_other_offers(team);
    }
}
