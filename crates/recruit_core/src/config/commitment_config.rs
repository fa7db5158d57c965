use serde::{Deserialize, Serialize};

/// Calendar of the recruiting cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CycleConfig {
    pub cycle_weeks: u16,
    /// Commitments before this week are soft
    pub soft_commit_cutoff_week: u16,
    /// Soft commitments above the floors harden from this week on
    pub harden_week: u16,
    /// Earliest week a recruit may commit, indexed by star rating - 1
    pub min_commit_week_by_stars: [u16; 5],
    pub signing_period_days: u16,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            cycle_weeks: 26,
            soft_commit_cutoff_week: 13,
            harden_week: 20,
            min_commit_week_by_stars: [1, 1, 2, 4, 6],
            signing_period_days: 14,
        }
    }
}

impl CycleConfig {
    pub fn min_commit_week(&self, stars: u8) -> u16 {
        let idx = (stars.clamp(1, 5) - 1) as usize;
        self.min_commit_week_by_stars[idx]
    }
}

/// CommitmentEngine gates and transition thresholds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommitmentConfig {
    pub score_gate: f32,
    pub share_gate: f32,
    pub lead_gate: f32,
    /// Fraction of every gate removed at full decision pressure
    pub pressure_relief: f32,
    pub pressure_exponent: f32,
    pub signing_pressure_bonus: f32,
    pub signing_pressure_per_day: f32,
    /// Leader with this many slots or fewer makes the recruit hurry
    pub scarcity_slots: u8,
    pub scarcity_relief: f32,
    pub package_relief: f32,

    pub desperation_max_stars: u8,
    pub desperation_max_offers: usize,
    pub desperation_threshold: f32,
    pub desperation_late_drop: f32,

    pub reopen_base_threshold: f32,
    pub reopen_resilience_scale: f32,
    pub reopen_base_probability: f32,
    pub reopen_probability_per_point: f32,
    pub reopen_probability_cap: f32,
    pub decommit_momentum: i32,

    pub harden_share_floor: f32,
    pub harden_score_floor: f32,

    pub signing_threshold: f32,
    pub signing_decay_per_day: f32,
    pub signing_threshold_floor: f32,
}

impl Default for CommitmentConfig {
    fn default() -> Self {
        Self {
            score_gate: 72.0,
            share_gate: 45.0,
            lead_gate: 12.0,
            pressure_relief: 0.45,
            pressure_exponent: 1.5,
            signing_pressure_bonus: 0.25,
            signing_pressure_per_day: 0.05,
            scarcity_slots: 2,
            scarcity_relief: 0.9,
            package_relief: 0.92,
            desperation_max_stars: 2,
            desperation_max_offers: 2,
            desperation_threshold: 60.0,
            desperation_late_drop: 25.0,
            reopen_base_threshold: 12.0,
            reopen_resilience_scale: 0.2,
            reopen_base_probability: 0.05,
            reopen_probability_per_point: 0.01,
            reopen_probability_cap: 0.4,
            decommit_momentum: -4,
            harden_share_floor: 40.0,
            harden_score_floor: 55.0,
            signing_threshold: 65.0,
            signing_decay_per_day: 3.0,
            signing_threshold_floor: 25.0,
        }
    }
}

/// PackageDealResolver tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PackageConfig {
    pub twin_strength: f32,
    pub sibling_strength: f32,
    pub cousin_strength: f32,
    pub disposition_weight: f32,
    pub disposition_jitter: f32,
    /// Subtracted from a member's disposition for the Independent trait
    pub conflict_penalty: f32,
    pub star_gap_penalty: f32,
    pub overall_gap_penalty: f32,
    pub mercenary_penalty: f32,

    pub synergy_scale: f32,
    pub halo_scale: f32,
    pub imbalance_free_gap: f32,
    pub imbalance_scale: f32,
    pub joint_threshold: f32,
    pub joint_pressure_relief: f32,
    pub individual_floor: f32,
    pub individual_floor_relief: f32,
    /// Below this strength, teams offering only one member are considered
    pub single_offer_strength_threshold: f32,
    /// Score lead a member needs to break from the package on its own
    pub defection_tolerance_base: f32,
    pub defection_tolerance_scale: f32,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            twin_strength: 0.55,
            sibling_strength: 0.40,
            cousin_strength: 0.25,
            disposition_weight: 0.3,
            disposition_jitter: 0.05,
            conflict_penalty: 0.12,
            star_gap_penalty: 0.06,
            overall_gap_penalty: 0.3,
            mercenary_penalty: 0.08,
            synergy_scale: 20.0,
            halo_scale: 0.1,
            imbalance_free_gap: 8.0,
            imbalance_scale: 0.6,
            joint_threshold: 150.0,
            joint_pressure_relief: 30.0,
            individual_floor: 50.0,
            individual_floor_relief: 10.0,
            single_offer_strength_threshold: 0.75,
            defection_tolerance_base: 10.0,
            defection_tolerance_scale: 30.0,
        }
    }
}
