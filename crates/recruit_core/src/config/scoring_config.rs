use serde::{Deserialize, Serialize};

/// InterestScorer tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Half-width of the hashed per-tick jitter
    pub jitter_amplitude: f32,
    /// Distance at which closeness reaches zero
    pub closeness_falloff_miles: f32,
    pub dealbreaker_penalty_min: f32,
    pub dealbreaker_penalty_max: f32,
    pub pitch_bonus_min: f32,
    pub pitch_bonus_max: f32,
    /// Coaching skills that make the user's pitch more persuasive
    pub persuasion_skill_ids: Vec<String>,
    pub persuasion_multiplier: f32,
    pub momentum_weight: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            jitter_amplitude: 2.0,
            closeness_falloff_miles: 1500.0,
            dealbreaker_penalty_min: 25.0,
            dealbreaker_penalty_max: 50.0,
            pitch_bonus_min: -4.0,
            pitch_bonus_max: 10.0,
            persuasion_skill_ids: vec![
                "silver_tongue".to_string(),
                "closer".to_string(),
                "living_room_pitch".to_string(),
            ],
            persuasion_multiplier: 1.05,
            momentum_weight: 1.0,
        }
    }
}

/// ShortlistAllocator tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShortlistConfig {
    /// Points behind the leader that still make the list
    pub leader_window: f32,
    pub min_size: usize,
    pub max_size: usize,
    pub base_temperature: f32,
    pub min_temperature: f32,
    pub max_temperature: f32,
    /// Half-width of the pre-softmax tie-break jitter
    pub tie_jitter: f32,
}

impl Default for ShortlistConfig {
    fn default() -> Self {
        Self {
            leader_window: 10.0,
            min_size: 3,
            max_size: 6,
            base_temperature: 8.0,
            min_temperature: 3.0,
            max_temperature: 25.0,
            tie_jitter: 0.25,
        }
    }
}
