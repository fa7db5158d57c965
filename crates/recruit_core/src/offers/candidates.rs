//! Candidate ranking for a CPU staff's board.

use crate::config::OfferBoardConfig;
use crate::deterministic::{deterministic_choice, deterministic_f32, subcase};
use crate::geo::lookup_state;
use crate::models::{
    DecisionStyle, PitchType, Recruit, RecruitId, RecruitmentStage, TeamContext, TeamDirectory,
};
use crate::tick::TickParams;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardCandidate {
    pub index: usize,
    pub recruit_id: RecruitId,
    pub value: f32,
}

/// Star/overall/potential blend, roughly 30-130.
pub fn quality(recruit: &Recruit) -> f32 {
    recruit.stars.clamp(1, 5) as f32 * 15.0
        + recruit.overall.min(100) as f32 * 0.3
        + recruit.potential.min(100) as f32 * 0.2
}

/// Open depth at the recruit's best position, 0-12.
pub fn positional_need(recruit: &Recruit, team: &TeamContext) -> f32 {
    let mut congestion = team.congestion(recruit.position);
    if let Some(secondary) = recruit.secondary_position {
        congestion = congestion.min(team.congestion(secondary));
    }
    (1.0 - congestion) * 12.0
}

pub fn regional_affinity(recruit: &Recruit, team: &TeamContext) -> f32 {
    if recruit.home_state.eq_ignore_ascii_case(&team.home_state) {
        return 12.0;
    }
    let recruit_region = lookup_state(&recruit.home_state).map(|s| s.region);
    let team_region = team.region.or_else(|| lookup_state(&team.home_state).map(|s| s.region));
    if recruit_region.is_some() && recruit_region == team_region {
        8.0
    } else {
        0.0
    }
}

/// Penalty for chasing stars above the program's tier.
pub fn reach_penalty(recruit: &Recruit, team: &TeamContext, config: &OfferBoardConfig) -> f32 {
    let reach = recruit.stars.saturating_sub(team.star_tier());
    reach as f32 * config.reach_penalty_per_star
}

/// Penalty once enough elite programs already offer. Halved for elite teams.
pub fn dogpile_penalty(
    recruit: &Recruit,
    team: &TeamContext,
    teams: &TeamDirectory,
    config: &OfferBoardConfig,
) -> f32 {
    let elite = recruit
        .offers
        .iter()
        .filter(|name| name.as_str() != team.name)
        .filter_map(|name| teams.get(name))
        .filter(|t| t.prestige >= config.elite_prestige)
        .count();
    if elite < config.dogpile_elite_count {
        return 0.0;
    }
    let penalty = 15.0 + 5.0 * (elite - config.dogpile_elite_count) as f32;
    if team.prestige >= config.elite_prestige {
        penalty * 0.5
    } else {
        penalty
    }
}

/// Recruits the team may still act on this tick: undecided recruits, and
/// recruits soft-committed to another program.
pub fn is_eligible(recruit: &Recruit, team: &TeamContext) -> bool {
    if recruit.declined.contains(&team.name) {
        return false;
    }
    recruit.is_undecided()
        || (recruit.stage == RecruitmentStage::SoftCommit
            && recruit.committed_team.as_deref() != Some(team.name.as_str()))
}

/// Rank every eligible recruit and keep the top `board_size`.
pub fn rank_board(
    recruits: &[Recruit],
    team: &TeamContext,
    teams: &TeamDirectory,
    config: &OfferBoardConfig,
    params: &TickParams,
    board_size: usize,
) -> Vec<BoardCandidate> {
    let mut board: Vec<BoardCandidate> = recruits
        .iter()
        .enumerate()
        .filter(|(_, r)| is_eligible(r, team))
        .map(|(index, r)| {
            let jitter = deterministic_f32(
                params.seed,
                params.tick,
                r.id,
                &team.name,
                subcase::BOARD_JITTER,
                0.0,
                4.0,
            );
            let value = quality(r) + positional_need(r, team) + regional_affinity(r, team)
                - reach_penalty(r, team, config)
                - dogpile_penalty(r, team, teams, config)
                + jitter;
            BoardCandidate { index, recruit_id: r.id, value }
        })
        .collect();

    board.sort_by(|a, b| b.value.total_cmp(&a.value).then(a.recruit_id.cmp(&b.recruit_id)));
    board.truncate(board_size);
    board
}

/// Pitch that plays to the recruit's strongest motivation the team can back up.
pub fn choose_pitch(recruit: &Recruit, team: &TeamContext, params: &TickParams) -> PitchType {
    let m = &recruit.motivations;
    let mut options: Vec<(u8, PitchType)> = Vec::with_capacity(5);
    if team.nil_signal() >= 60.0 {
        options.push((m.nil, PitchType::NilHeavy));
    }
    if positional_need(recruit, team) >= 6.0 {
        options.push((m.playing_time, PitchType::PlayingTimePromise));
    }
    if regional_affinity(recruit, team) > 0.0 {
        options.push((m.proximity, PitchType::LocalAngle));
    }
    if team.academic_score >= 65 {
        options.push((m.academics, PitchType::AcademicPitch));
    }

    options.retain(|(w, _)| *w >= 55);
    let Some(top) = options.iter().map(|(w, _)| *w).max() else {
        return if recruit.decision_style == DecisionStyle::Decisive {
            PitchType::EarlyPush
        } else {
            PitchType::Standard
        };
    };
    let tied: Vec<PitchType> = options.iter().filter(|(w, _)| *w == top).map(|(_, p)| *p).collect();
    let pick = deterministic_choice(
        params.seed,
        params.tick,
        recruit.id,
        &team.name,
        subcase::BOARD_PITCH,
        tied.len(),
    );
    tied[pick]
}
