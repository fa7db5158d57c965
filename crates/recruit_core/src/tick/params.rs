use serde::{Deserialize, Serialize};

use crate::scoring::ScoringContext;
use crate::shortlist::AllocationKey;

/// Host-supplied inputs for a single tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickParams {
    pub seed: u64,
    pub tick: u32,
    /// Cycle week, 0-based. Held at the final week during the signing period.
    pub week: u16,
    pub is_signing_period: bool,
    /// Days elapsed in the signing period
    pub signing_day: u16,
    /// Overrides the prestige-derived action points of CPU staffs
    pub action_budget: Option<u16>,
    pub user_team: Option<String>,
    pub user_skill_ids: Vec<String>,
}

impl TickParams {
    /// Regular weekly tick.
    pub fn weekly(seed: u64, tick: u32, week: u16) -> Self {
        Self { seed, tick, week, ..Self::default() }
    }

    /// Daily tick inside the signing period.
    pub fn signing(seed: u64, tick: u32, week: u16, signing_day: u16) -> Self {
        Self {
            seed,
            tick,
            week,
            is_signing_period: true,
            signing_day,
            ..Self::default()
        }
    }

    pub fn with_user_team(mut self, team: impl Into<String>, skill_ids: Vec<String>) -> Self {
        self.user_team = Some(team.into());
        self.user_skill_ids = skill_ids;
        self
    }

    pub fn is_user_team(&self, team: &str) -> bool {
        self.user_team.as_deref() == Some(team)
    }

    pub fn scoring_context(&self) -> ScoringContext<'_> {
        ScoringContext {
            seed: self.seed,
            tick: self.tick,
            week: self.week,
            user_team: self.user_team.as_deref(),
            user_skill_ids: &self.user_skill_ids,
        }
    }

    pub fn allocation_key(&self) -> AllocationKey {
        AllocationKey { seed: self.seed, tick: self.tick }
    }
}
