//! Individual interest terms. All pure; inputs are 0-100 scales unless noted.

use crate::geo::lookup_state;
use crate::models::{
    Archetype, CoachingStyle, CommitmentStyle, DecisionStyle, NilPriority, PersonalityTrait,
    PitchType, Recruit, TeamContext,
};

#[inline]
fn weight(motivation: u8) -> f32 {
    motivation.min(100) as f32 / 100.0
}

/// Per-archetype multipliers, resolved once per score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeWeights {
    pub nil_multiplier: f32,
    /// Extra closeness weight on top of the proximity motivation
    pub hometown_pull: f32,
    pub development_bonus: f32,
    pub market_multiplier: f32,
}

impl ArchetypeWeights {
    pub fn for_archetype(archetype: Archetype) -> Self {
        match archetype {
            Archetype::Mercenary => Self {
                nil_multiplier: 2.0,
                hometown_pull: 0.0,
                development_bonus: 0.0,
                market_multiplier: 1.0,
            },
            Archetype::HometownHero => Self {
                nil_multiplier: 1.0,
                hometown_pull: 0.08,
                development_bonus: 0.0,
                market_multiplier: 1.0,
            },
            Archetype::ProcessTrustor => Self {
                nil_multiplier: 1.0,
                hometown_pull: 0.0,
                development_bonus: 3.0,
                market_multiplier: 1.0,
            },
            Archetype::FameSeeker => Self {
                nil_multiplier: 1.0,
                hometown_pull: 0.0,
                development_bonus: 0.0,
                market_multiplier: 1.5,
            },
        }
    }
}

/// Host-tracked interest if present, else a baseline that drops with star rating.
pub fn base_interest(recruit: &Recruit, team: &TeamContext) -> f32 {
    match recruit.base_interest.get(&team.name) {
        Some(cached) => (*cached).min(100) as f32,
        None => 40.0 - 3.0 * recruit.stars.clamp(1, 5) as f32,
    }
}

fn coach_style_matches(recruit: &Recruit, style: CoachingStyle) -> bool {
    let m = &recruit.motivations;
    match style {
        CoachingStyle::Balanced => false,
        CoachingStyle::PlayerDevelopment => m.development >= 65,
        CoachingStyle::UpTempo => m.exposure >= 65,
        CoachingStyle::Defensive => m.playing_time >= 65,
        CoachingStyle::StarSystem => m.exposure >= 70 && recruit.stars >= 4,
        CoachingStyle::Academic => m.academics >= 65,
    }
}

/// How well the recruit knows the program.
pub fn awareness(recruit: &Recruit, team: &TeamContext) -> f32 {
    let same_state = recruit.home_state.eq_ignore_ascii_case(&team.home_state);
    let recruit_region = lookup_state(&recruit.home_state).map(|s| s.region);
    let team_region = team.region.or_else(|| lookup_state(&team.home_state).map(|s| s.region));
    let same_region = recruit_region.is_some() && recruit_region == team_region;

    let mut raw = team.prestige.min(100) as f32 * 0.5 + recruit.hype.min(100) as f32 * 0.2;
    if same_region {
        raw += 15.0;
    }
    if same_state {
        raw += 10.0;
    }
    if coach_style_matches(recruit, team.coaching_style) {
        raw += 5.0;
    }
    raw.clamp(0.0, 100.0) * (0.05 + 0.10 * weight(recruit.motivations.exposure))
}

pub fn prestige_affinity(recruit: &Recruit, team: &TeamContext) -> f32 {
    let style = match recruit.commitment_style {
        CommitmentStyle::FrontRunner => 1.5,
        CommitmentStyle::Balanced => 1.0,
        CommitmentStyle::Underdog => 0.5,
    };
    (team.recruiting_prestige.min(100) as f32 - 50.0)
        * 0.25
        * (0.5 + weight(recruit.motivations.exposure))
        * style
}

/// 0-100, 100 at the doorstep and 0 beyond the falloff distance.
pub fn closeness(miles: f32, falloff_miles: f32) -> f32 {
    (1.0 - miles / falloff_miles.max(1.0)).clamp(0.0, 1.0) * 100.0
}

pub fn proximity(recruit: &Recruit, closeness: f32, weights: &ArchetypeWeights) -> f32 {
    let centered = closeness - 50.0;
    let strictness = 0.75 + recruit.fit_strictness.min(100) as f32 / 200.0;
    let mut term = centered * 0.2 * weight(recruit.motivations.proximity) * strictness;
    term += centered * weights.hometown_pull;
    term += match recruit.personality {
        PersonalityTrait::Homebody => centered * 0.1,
        PersonalityTrait::Wanderlust => -centered * 0.08,
        _ => 0.0,
    };
    term
}

/// Lower congestion of the primary and secondary positions.
pub fn best_congestion(recruit: &Recruit, team: &TeamContext) -> f32 {
    let primary = team.congestion(recruit.position);
    match recruit.secondary_position {
        Some(pos) => primary.min(team.congestion(pos)),
        None => primary,
    }
}

/// Positive number to subtract.
pub fn playing_time_penalty(recruit: &Recruit, team: &TeamContext) -> f32 {
    let style = match recruit.commitment_style {
        CommitmentStyle::FrontRunner => 0.8,
        CommitmentStyle::Balanced => 1.0,
        CommitmentStyle::Underdog => 1.3,
    };
    best_congestion(recruit, team)
        * (0.5 + 0.5 * recruit.talent_score())
        * 18.0
        * weight(recruit.motivations.playing_time)
        * style
}

pub fn program_success(team: &TeamContext) -> f32 {
    ((team.wins as f32 - team.losses as f32) * 0.5).clamp(-8.0, 8.0)
}

pub fn nil_factor(recruit: &Recruit, team: &TeamContext, weights: &ArchetypeWeights) -> f32 {
    (team.nil_signal() - 50.0) * 0.2 * weight(recruit.motivations.nil) * weights.nil_multiplier
}

/// Bonus when the team is within 25 points of the target, penalty beyond.
pub fn alignment(team_value: u8, target: u8, motivation: u8) -> f32 {
    let gap = (team_value.min(100) as f32 - target.min(100) as f32).abs();
    (25.0 - gap) * 0.12 * weight(motivation)
}

pub fn personality_modifier(recruit: &Recruit, team: &TeamContext) -> f32 {
    match recruit.personality {
        PersonalityTrait::Competitor if team.prestige >= 70 => 3.0,
        PersonalityTrait::Scholar if team.academic_score >= 70 => 3.0,
        PersonalityTrait::Showman if team.market_score >= 70 => 3.0,
        PersonalityTrait::Loyal if team.community_score >= 70 => 2.0,
        PersonalityTrait::Balanced
        | PersonalityTrait::Homebody
        | PersonalityTrait::Wanderlust
        | PersonalityTrait::Competitor
        | PersonalityTrait::Scholar
        | PersonalityTrait::Showman
        | PersonalityTrait::Loyal
        | PersonalityTrait::Independent => 0.0,
    }
}

pub fn nil_priority_modifier(recruit: &Recruit, team: &TeamContext) -> f32 {
    let nil = team.nil_signal();
    match recruit.nil_priority {
        NilPriority::Minimal if nil >= 80.0 => -1.0,
        NilPriority::Minimal | NilPriority::Balanced => 0.0,
        NilPriority::Important if nil >= 60.0 => 2.0,
        NilPriority::Important => 0.0,
        NilPriority::Essential if nil >= 70.0 => 4.0,
        NilPriority::Essential => -2.0,
    }
}

pub fn development_bonus(recruit: &Recruit, team: &TeamContext, weights: &ArchetypeWeights) -> f32 {
    if team.coaching_style == CoachingStyle::PlayerDevelopment {
        weights.development_bonus * (0.5 + weight(recruit.motivations.development))
    } else {
        0.0
    }
}

/// The motivation a pitch appeals to; `None` for a plain offer.
pub fn pitch_motivation(recruit: &Recruit, pitch: PitchType) -> Option<u8> {
    let m = &recruit.motivations;
    match pitch {
        PitchType::Standard => None,
        PitchType::NilHeavy => Some(m.nil),
        PitchType::PlayingTimePromise => Some(m.playing_time),
        PitchType::LocalAngle => Some(m.proximity),
        PitchType::AcademicPitch => Some(m.academics),
        PitchType::EarlyPush => Some(match recruit.decision_style {
            DecisionStyle::Decisive => 75,
            DecisionStyle::Balanced => 50,
            DecisionStyle::Indecisive => 20,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    #[test]
    fn test_closeness_bounds() {
        assert_eq!(closeness(0.0, 1500.0), 100.0);
        assert_eq!(closeness(750.0, 1500.0), 50.0);
        assert_eq!(closeness(4000.0, 1500.0), 0.0);
    }

    #[test]
    fn test_alignment_sign() {
        assert!(alignment(60, 50, 100) > 0.0);
        assert!(alignment(95, 20, 100) < 0.0);
        assert_eq!(alignment(95, 20, 0), 0.0);
    }

    #[test]
    fn test_program_success_clamped() {
        let mut team = TeamContext::new("A", 50, "TX");
        team.wins = 35;
        team.losses = 0;
        assert_eq!(program_success(&team), 8.0);
        team.wins = 0;
        team.losses = 35;
        assert_eq!(program_success(&team), -8.0);
    }

    #[test]
    fn test_secondary_position_eases_congestion() {
        let mut recruit = Recruit::new(1, "A", Position::SF, 3, 70, 80, "TX");
        let mut team = TeamContext::new("A", 50, "TX");
        team.positional_depth.insert(Position::SF, 4);
        assert_eq!(best_congestion(&recruit, &team), 1.0);
        recruit.secondary_position = Some(Position::PF);
        assert_eq!(best_congestion(&recruit, &team), 0.0);
    }

    #[test]
    fn test_essential_nil_punishes_poor_programs() {
        let mut recruit = Recruit::new(1, "A", Position::SF, 3, 70, 80, "TX");
        recruit.nil_priority = NilPriority::Essential;
        let mut team = TeamContext::new("A", 50, "TX");
        team.wealth = 10;
        team.alumni_strength = 10;
        assert_eq!(nil_priority_modifier(&recruit, &team), -2.0);
    }
}
