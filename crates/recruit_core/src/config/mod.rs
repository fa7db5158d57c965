//! # Recruiting Configuration
//!
//! All tuning constants for the recruiting core live here instead of being
//! scattered through the components.
//!
//! ## Usage
//! ```rust
//! use recruit_core::config::RecruitingConfig;
//!
//! let config = RecruitingConfig::default();
//! let fast = RecruitingConfig::aggressive();
//! assert!(fast.commitment.score_gate < config.commitment.score_gate);
//! ```
//!
//! ## Environment Variables
//!
//! - `RECRUIT_PROFILE`: Select preset (aggressive, patient, default)

mod commitment_config;
mod offer_config;
mod scoring_config;

pub use commitment_config::{CommitmentConfig, CycleConfig, PackageConfig};
pub use offer_config::OfferBoardConfig;
pub use scoring_config::{ScoringConfig, ShortlistConfig};

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{RecruitError, Result};

pub const PROFILE_ENV_VAR: &str = "RECRUIT_PROFILE";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RecruitingConfig {
    pub cycle: CycleConfig,
    pub scoring: ScoringConfig,
    pub shortlist: ShortlistConfig,
    pub offers: OfferBoardConfig,
    pub commitment: CommitmentConfig,
    pub package: PackageConfig,
}

impl RecruitingConfig {
    /// Recruits decide earlier and CPU staffs work harder.
    pub fn aggressive() -> Self {
        let mut cfg = Self::default();
        cfg.commitment.score_gate = 66.0;
        cfg.commitment.share_gate = 40.0;
        cfg.commitment.lead_gate = 9.0;
        cfg.offers.base_action_points = 8;
        cfg.offers.max_offers_per_tick = 4;
        cfg.package.joint_threshold = 142.0;
        cfg
    }

    /// Recruits hold out longer; most decisions land after the soft-commit cutoff.
    pub fn patient() -> Self {
        let mut cfg = Self::default();
        cfg.commitment.score_gate = 78.0;
        cfg.commitment.share_gate = 50.0;
        cfg.commitment.lead_gate = 15.0;
        cfg.commitment.pressure_relief = 0.5;
        cfg.offers.base_action_points = 5;
        cfg.package.joint_threshold = 156.0;
        cfg
    }

    pub fn from_profile(profile: &str) -> Self {
        match profile.to_lowercase().as_str() {
            "aggressive" => Self::aggressive(),
            "patient" => Self::patient(),
            _ => Self::default(),
        }
    }

    /// Preset selected by `RECRUIT_PROFILE`, or the default.
    pub fn from_env_or_default() -> Self {
        match env::var(PROFILE_ENV_VAR) {
            Ok(profile) => {
                log::debug!("Using recruiting profile '{}'", profile);
                Self::from_profile(&profile)
            }
            Err(_) => Self::default(),
        }
    }

    /// Parse a (possibly partial) YAML document; missing fields keep defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_yaml_str(&text)?;
        log::info!("Loaded recruiting config from {:?}", path);
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cycle.cycle_weeks == 0 {
            return Err(RecruitError::Config("cycle_weeks must be positive".into()));
        }
        if self.cycle.soft_commit_cutoff_week > self.cycle.cycle_weeks
            || self.cycle.harden_week > self.cycle.cycle_weeks
        {
            return Err(RecruitError::Config("cycle milestones must fall inside the cycle".into()));
        }
        if self.shortlist.min_size == 0 || self.shortlist.min_size > self.shortlist.max_size {
            return Err(RecruitError::Config(format!(
                "shortlist bounds invalid: min {} max {}",
                self.shortlist.min_size, self.shortlist.max_size
            )));
        }
        if self.shortlist.base_temperature <= 0.0 {
            return Err(RecruitError::Config("base_temperature must be positive".into()));
        }
        for (name, gate) in [
            ("score_gate", self.commitment.score_gate),
            ("share_gate", self.commitment.share_gate),
            ("lead_gate", self.commitment.lead_gate),
        ] {
            if !(0.0..=100.0).contains(&gate) {
                return Err(RecruitError::Config(format!("{} must be within 0..=100", name)));
            }
        }
        if !(0.0..1.0).contains(&self.commitment.pressure_relief) {
            return Err(RecruitError::Config("pressure_relief must be within 0..1".into()));
        }
        if self.scoring.dealbreaker_penalty_min > self.scoring.dealbreaker_penalty_max {
            return Err(RecruitError::Config("dealbreaker penalty bounds inverted".into()));
        }
        if self.offers.max_offers_per_recruit == 0 {
            return Err(RecruitError::Config("max_offers_per_recruit must be positive".into()));
        }
        Ok(())
    }
}

// ========== Tests ==========
