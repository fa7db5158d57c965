//! # Tick Driver
//!
//! One call to [`TickDriver::advance`] is one week (or one signing-period
//! day) of recruiting. The prior state is cloned once and the copy is run
//! through every component in a fixed order:
//!
//! 1. invariant repair
//! 2. momentum cooling
//! 3. visit outcomes
//! 4. OfferBoard for every CPU team, in name order
//! 5. CommitmentEngine
//! 6. PackageDealResolver
//! 7. team counters
//!
//! Nothing reads the clock or a global RNG, so the same state and params
//! always produce the same next state.

mod news;
mod params;

pub use news::{NewsItem, NewsKind};
pub use params::TickParams;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

use crate::commitment::{CommitmentEngine, CommitmentReport};
use crate::config::RecruitingConfig;
use crate::error::{RecruitError, Result};
use crate::models::{
    commit_counts, index_recruits, PitchType, Recruit, RecruitId, RecruitmentStage, TeamContext,
    TeamDirectory, MOMENTUM_MAX, MOMENTUM_MIN,
};
use crate::offers::{BoardReport, OfferBoard};
use crate::package::{PackageDealResolver, PackageReport};
use crate::scoring::InterestScorer;
use crate::visits::{apply_game_outcomes, GameOutcome};

// ============================================================================
// State
// ============================================================================

/// Per-team figures for the host UI.
///
/// Activity counts accumulate across ticks; `commits`, `signed` and
/// `scholarships_remaining` reflect the latest tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCounters {
    pub offers_made: u32,
    pub contacts_made: u32,
    pub offers_revoked: u32,
    pub action_points_spent: u32,
    pub commits: u16,
    pub signed: u16,
    pub scholarships_remaining: u8,
}

impl TeamCounters {
    fn absorb(&mut self, report: &BoardReport) {
        self.offers_made += (report.offers_made + report.mirrored_offers) as u32;
        self.contacts_made += report.contacts_made as u32;
        self.offers_revoked += report.offers_revoked as u32;
        self.action_points_spent += report.action_points_spent as u32;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecruitingState {
    pub recruits: Vec<Recruit>,
    #[serde(default)]
    pub counters: BTreeMap<String, TeamCounters>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub last_tick: Option<u32>,
}

impl RecruitingState {
    /// Recruits are kept in id order.
    pub fn new(mut recruits: Vec<Recruit>) -> Self {
        recruits.sort_by_key(|r| r.id);
        Self { recruits, ..Self::default() }
    }

    pub fn recruit(&self, id: RecruitId) -> Option<&Recruit> {
        self.recruits
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|i| &self.recruits[i])
    }

    pub fn recruit_mut(&mut self, id: RecruitId) -> Result<&mut Recruit> {
        match self.recruits.binary_search_by_key(&id, |r| r.id) {
            Ok(i) => Ok(&mut self.recruits[i]),
            Err(_) => Err(RecruitError::UnknownRecruit(id)),
        }
    }

    /// Record an offer made by the user's staff. The recruit is flagged until
    /// it commits elsewhere. Returns `false` for signed recruits and repeat
    /// offers.
    pub fn record_user_offer(
        &mut self,
        id: RecruitId,
        team: &str,
        params: &TickParams,
        pitch: PitchType,
    ) -> Result<bool> {
        let recruit = self.recruit_mut(id)?;
        if recruit.stage.is_terminal() {
            return Ok(false);
        }
        if !recruit.receive_offer(team, params.week, params.tick, pitch) {
            return Ok(false);
        }
        recruit.user_offer_pending = true;
        log::debug!("[TickDriver] user team {} offers {}", team, recruit.name);
        Ok(true)
    }

    /// Recruits committed (soft, hard or signed) to a team.
    pub fn commits_for(&self, team: &str) -> Vec<&Recruit> {
        self.recruits
            .iter()
            .filter(|r| r.committed_team.as_deref() == Some(team))
            .collect()
    }

    pub fn uncommitted(&self) -> impl Iterator<Item = &Recruit> {
        self.recruits.iter().filter(|r| !r.is_committed())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut state: RecruitingState = serde_json::from_str(json)?;
        state.recruits.sort_by_key(|r| r.id);
        Ok(state)
    }

    /// SHA-256 hex digest of the JSON encoding, for replay comparisons.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect())
    }
}

/// Everything produced by one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub state: RecruitingState,
    /// Headlines from this tick only; also appended to `state.news`
    pub news: Vec<NewsItem>,
    pub boards: BTreeMap<String, BoardReport>,
    pub commitment: CommitmentReport,
    pub package: PackageReport,
    pub repairs: usize,
}

// ============================================================================
// Driver
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    pub config: RecruitingConfig,
    scorer: InterestScorer,
    board: OfferBoard,
    engine: CommitmentEngine,
    resolver: PackageDealResolver,
}

impl TickDriver {
    pub fn new(config: RecruitingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scorer: InterestScorer::new(config.scoring.clone()),
            board: OfferBoard::new(config.offers.clone(), config.cycle.clone()),
            engine: CommitmentEngine::new(
                config.cycle.clone(),
                config.commitment.clone(),
                config.package.clone(),
                config.shortlist.clone(),
            ),
            resolver: PackageDealResolver::new(
                config.package.clone(),
                config.cycle.clone(),
                config.commitment.clone(),
                config.offers.max_offers_per_recruit,
            ),
            config,
        })
    }

    pub fn scorer(&self) -> &InterestScorer {
        &self.scorer
    }

    /// Run one tick. `state` is left untouched.
    pub fn advance(
        &self,
        state: &RecruitingState,
        teams: &[TeamContext],
        params: &TickParams,
        outcomes: &[GameOutcome],
    ) -> Result<TickOutcome> {
        let mut names = BTreeSet::new();
        if let Some(dup) = teams.iter().find(|t| !names.insert(t.name.as_str())) {
            return Err(RecruitError::Config(format!("duplicate team name in snapshot: {}", dup.name)));
        }
        let directory = TeamDirectory::new(teams);
        if let Some(user) = params.user_team.as_deref() {
            if directory.get(user).is_none() {
                return Err(RecruitError::UnknownTeam(user.to_string()));
            }
        }

        let mut next = state.clone();
        next.recruits.sort_by_key(|r| r.id);
        let recruits = &mut next.recruits;

        let repairs: usize = recruits.iter_mut().map(repair_invariants).sum();
        if repairs > 0 {
            log::warn!("[TickDriver] tick {}: repaired {} invariant violations", params.tick, repairs);
        }

        if !params.is_signing_period {
            for recruit in recruits.iter_mut().filter(|r| !r.stage.is_terminal()) {
                recruit.cool_momentum();
            }
        }

        let index = index_recruits(recruits);
        apply_game_outcomes(recruits, &index, outcomes);

        let commits_at_start = commit_counts(recruits);
        let mut boards = BTreeMap::new();
        for team in directory.iter() {
            if team.is_user_team || params.is_user_team(&team.name) {
                continue;
            }
            let current = commits_at_start.get(&team.name).copied().unwrap_or(0);
            let report = self.board.run_team(team, &directory, recruits, &index, current, params);
            boards.insert(team.name.clone(), report);
        }

        let model = self.scorer.bind(params.scoring_context());
        let mut news = Vec::new();
        let commitment = self.engine.run(recruits, &index, &directory, &model, params, &mut news);
        let package = self.resolver.resolve(recruits, &index, &directory, &model, params, &mut news);

        let commits_now = commit_counts(recruits);
        for team in directory.iter() {
            let counters = next.counters.entry(team.name.clone()).or_default();
            if let Some(report) = boards.get(&team.name) {
                counters.absorb(report);
            }
            let commits = commits_now.get(&team.name).copied().unwrap_or(0);
            counters.commits = commits as u16;
            counters.signed = next
                .recruits
                .iter()
                .filter(|r| r.is_signed() && r.committed_team.as_deref() == Some(team.name.as_str()))
                .count() as u16;
            counters.scholarships_remaining = team.slots_remaining(commits);
        }

        log::info!(
            "[TickDriver] tick {} week {}{}: {} commits, {} package commits, {} decommits, {} signed",
            params.tick,
            params.week,
            if params.is_signing_period { " (signing)" } else { "" },
            commitment.commits,
            package.joint_commits + package.follow_commits,
            commitment.decommits,
            commitment.signed
        );

        next.news.extend(news.iter().cloned());
        next.last_tick = Some(params.tick);

        Ok(TickOutcome { state: next, news, boards, commitment, package, repairs })
    }

    /// Weekly ticks through the cycle, then the daily signing period.
    pub fn run_cycle(
        &self,
        state: RecruitingState,
        teams: &[TeamContext],
        seed: u64,
        user_team: Option<&str>,
    ) -> Result<RecruitingState> {
        let cycle = &self.config.cycle;
        let mut state = state;
        let mut tick = state.last_tick.map(|t| t + 1).unwrap_or(0);

        let base = |params: TickParams| match user_team {
            Some(team) => params.with_user_team(team, Vec::new()),
            None => params,
        };

        for week in 0..cycle.cycle_weeks {
            let params = base(TickParams::weekly(seed, tick, week));
            state = self.advance(&state, teams, &params, &[])?.state;
            tick += 1;
        }
        for day in 0..cycle.signing_period_days {
            let params = base(TickParams::signing(seed, tick, cycle.cycle_weeks, day));
            state = self.advance(&state, teams, &params, &[])?.state;
            tick += 1;
        }
        Ok(state)
    }
}

/// Fix data that breaks the entity invariants. Returns the number of fixes.
fn repair_invariants(recruit: &mut Recruit) -> usize {
    let mut fixes = 0;

    if recruit.is_committed() && recruit.pending.is_some() {
        log::warn!("[TickDriver] recruit {} has a commitment and a pending record", recruit.id);
        recruit.pending = None;
        fixes += 1;
    }

    match (&recruit.committed_team, recruit.stage) {
        (Some(_), RecruitmentStage::Open | RecruitmentStage::Narrowing) => {
            recruit.stage = if recruit.soft_commitment {
                RecruitmentStage::SoftCommit
            } else {
                RecruitmentStage::HardCommit
            };
            fixes += 1;
        }
        (None, RecruitmentStage::SoftCommit | RecruitmentStage::HardCommit | RecruitmentStage::Signed) => {
            recruit.stage = RecruitmentStage::Narrowing;
            recruit.soft_commitment = false;
            fixes += 1;
        }
        _ => {}
    }

    let before = recruit.momentum.len();
    recruit.momentum.retain(|_, v| *v != 0);
    let mut clamped = false;
    for value in recruit.momentum.values_mut() {
        let bounded = (*value).clamp(MOMENTUM_MIN, MOMENTUM_MAX);
        if bounded != *value {
            *value = bounded;
            clamped = true;
        }
    }
    if clamped || recruit.momentum.len() != before {
        fixes += 1;
    }

    let overlap: Vec<String> = recruit.declined.intersection(&recruit.offers).cloned().collect();
    if !overlap.is_empty() {
        for team in overlap {
            recruit.declined.remove(&team);
        }
        fixes += 1;
    }

    fixes
}
