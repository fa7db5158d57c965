//! Recruit-to-team interest scoring.
//!
//! `InterestScorer::score` is a pure function of the recruit, the team snapshot
//! and the tick context. The only noise term is a hashed jitter keyed by
//! `(seed, tick, recruit, team)`, so identical inputs always score the same.
//!
//! Terms are summed, the sum is clamped to [1, 100], and the dealbreaker
//! penalty is applied last so a violated dealbreaker always costs its full
//! weight unless the score bottoms out.

mod terms;

pub use terms::ArchetypeWeights;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::deterministic::{deterministic_f32, subcase};
use crate::geo::GeoEstimator;
use crate::models::{Dealbreaker, Recruit, TeamContext};

pub const SCORE_MIN: u8 = 1;
pub const SCORE_MAX: u8 = 100;

/// Per-tick inputs shared by every score computed in that tick.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub seed: u64,
    pub tick: u32,
    pub week: u16,
    pub user_team: Option<&'a str>,
    pub user_skill_ids: &'a [String],
}

impl<'a> ScoringContext<'a> {
    pub fn new(seed: u64, tick: u32, week: u16) -> Self {
        Self { seed, tick, week, user_team: None, user_skill_ids: &[] }
    }
}

/// Anything that can rate a (recruit, team) pair on the 1-100 scale.
///
/// The commitment and package components only need this seam, which lets
/// tests drive them with fixed score tables.
pub trait InterestModel {
    fn interest(&self, recruit: &Recruit, team: &TeamContext) -> u8;
}

/// Every additive term, kept for inspection and tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: f32,
    pub awareness: f32,
    pub prestige_affinity: f32,
    pub proximity: f32,
    pub playing_time_penalty: f32,
    pub program_success: f32,
    pub nil: f32,
    pub academic_alignment: f32,
    pub market_alignment: f32,
    pub community_alignment: f32,
    pub personality: f32,
    pub pitch_bonus: f32,
    pub momentum: f32,
    pub jitter: f32,
    pub persuasion_multiplier: f32,
    pub dealbreaker_penalty: f32,
    pub distance_miles: f32,
    pub total: u8,
}

#[derive(Debug, Clone, Default)]
pub struct InterestScorer {
    pub config: ScoringConfig,
    geo: GeoEstimator,
}

impl InterestScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config, geo: GeoEstimator::new() }
    }

    pub fn score(&self, recruit: &Recruit, team: &TeamContext, ctx: &ScoringContext) -> u8 {
        self.breakdown(recruit, team, ctx).total
    }

    pub fn bind<'a>(&'a self, ctx: ScoringContext<'a>) -> BoundScorer<'a> {
        BoundScorer { scorer: self, ctx }
    }

    pub fn breakdown(&self, recruit: &Recruit, team: &TeamContext, ctx: &ScoringContext) -> ScoreBreakdown {
        let cfg = &self.config;
        let weights = ArchetypeWeights::for_archetype(recruit.archetype);
        let miles = self.geo.recruit_to_team(ctx.seed, recruit, team);
        let closeness = terms::closeness(miles, cfg.closeness_falloff_miles);

        let mut b = ScoreBreakdown {
            base: terms::base_interest(recruit, team),
            awareness: terms::awareness(recruit, team),
            prestige_affinity: terms::prestige_affinity(recruit, team),
            proximity: terms::proximity(recruit, closeness, &weights),
            playing_time_penalty: terms::playing_time_penalty(recruit, team),
            program_success: terms::program_success(team),
            nil: terms::nil_factor(recruit, team, &weights),
            academic_alignment: terms::alignment(
                team.academic_score,
                recruit.targets.academic,
                recruit.motivations.academics,
            ),
            market_alignment: terms::alignment(
                team.market_score,
                recruit.targets.market,
                recruit.motivations.exposure,
            ) * weights.market_multiplier,
            community_alignment: terms::alignment(
                team.community_score,
                recruit.targets.community,
                recruit.motivations.relationship,
            ),
            personality: terms::personality_modifier(recruit, team)
                + terms::nil_priority_modifier(recruit, team)
                + terms::development_bonus(recruit, team, &weights),
            pitch_bonus: self.pitch_bonus(recruit, team),
            momentum: recruit.momentum_for(&team.name) as f32 * cfg.momentum_weight,
            jitter: deterministic_f32(
                ctx.seed,
                ctx.tick,
                recruit.id,
                &team.name,
                subcase::SCORE_JITTER,
                -cfg.jitter_amplitude,
                cfg.jitter_amplitude,
            ),
            persuasion_multiplier: 1.0,
            dealbreaker_penalty: 0.0,
            distance_miles: miles,
            total: SCORE_MIN,
        };

        let mut pre = b.base
            + b.awareness
            + b.prestige_affinity
            + b.proximity
            - b.playing_time_penalty
            + b.program_success
            + b.nil
            + b.academic_alignment
            + b.market_alignment
            + b.community_alignment
            + b.personality
            + b.pitch_bonus
            + b.momentum
            + b.jitter;

        if pre > 0.0 && self.persuasion_applies(team, ctx) {
            b.persuasion_multiplier = cfg.persuasion_multiplier;
            pre *= cfg.persuasion_multiplier;
        }

        let pre = pre.clamp(SCORE_MIN as f32, SCORE_MAX as f32);

        if self.dealbreaker_violated(recruit, team) {
            let strictness = recruit.fit_strictness.min(100) as f32 / 100.0;
            b.dealbreaker_penalty = cfg.dealbreaker_penalty_min
                + (cfg.dealbreaker_penalty_max - cfg.dealbreaker_penalty_min) * strictness;
        }

        let total = (pre - b.dealbreaker_penalty).clamp(SCORE_MIN as f32, SCORE_MAX as f32);
        b.total = total.round() as u8;
        b
    }

    /// Whether the recruit's stated dealbreaker rules this team out.
    pub fn dealbreaker_violated(&self, recruit: &Recruit, team: &TeamContext) -> bool {
        match recruit.dealbreaker {
            Dealbreaker::None => false,
            Dealbreaker::Proximity => !recruit.home_state.eq_ignore_ascii_case(&team.home_state),
            Dealbreaker::Nil => team.nil_signal() < 40.0,
            Dealbreaker::PlayingTime => terms::best_congestion(recruit, team) >= 0.6,
            Dealbreaker::Academics => team.academic_score < 50,
        }
    }

    /// Bonus from the pitch attached to the team's live offer.
    fn pitch_bonus(&self, recruit: &Recruit, team: &TeamContext) -> f32 {
        let Some(pitch) = recruit.active_pitch(&team.name) else {
            return 0.0;
        };
        match terms::pitch_motivation(recruit, pitch) {
            Some(motivation) => (motivation as f32 / 100.0 * 14.0 - 4.0)
                .clamp(self.config.pitch_bonus_min, self.config.pitch_bonus_max),
            None => 0.0,
        }
    }

    fn persuasion_applies(&self, team: &TeamContext, ctx: &ScoringContext) -> bool {
        ctx.user_team == Some(team.name.as_str())
            && ctx.user_skill_ids.iter().any(|id| self.config.persuasion_skill_ids.contains(id))
    }
}

/// An `InterestScorer` fixed to one tick's context.
#[derive(Debug, Clone, Copy)]
pub struct BoundScorer<'a> {
    scorer: &'a InterestScorer,
    ctx: ScoringContext<'a>,
}

impl InterestModel for BoundScorer<'_> {
    fn interest(&self, recruit: &Recruit, team: &TeamContext) -> u8 {
        self.scorer.score(recruit, team, &self.ctx)
    }
}
