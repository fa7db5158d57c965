//! Game-day visits: recruits in the stands come away warmer after a win and
//! cooler after a loss. Rivalry games swing twice as hard.

use serde::{Deserialize, Serialize};

use crate::models::{Recruit, RecruitId, RecruitIndex};

pub const WIN_MOMENTUM: i32 = 2;
pub const LOSS_MOMENTUM: i32 = -1;
pub const RIVALRY_MULTIPLIER: i32 = 2;

/// A completed game supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub team: String,
    pub won: bool,
    #[serde(default)]
    pub is_rivalry: bool,
    /// Recruits visiting for this game
    #[serde(default)]
    pub visitors: Vec<RecruitId>,
}

impl GameOutcome {
    pub fn momentum_delta(&self) -> i32 {
        let base = if self.won { WIN_MOMENTUM } else { LOSS_MOMENTUM };
        if self.is_rivalry {
            base * RIVALRY_MULTIPLIER
        } else {
            base
        }
    }
}

/// Apply every outcome to its visitors. Returns the number of adjustments made.
///
/// Signed recruits and unknown ids are skipped.
pub fn apply_game_outcomes(recruits: &mut [Recruit], index: &RecruitIndex, outcomes: &[GameOutcome]) -> usize {
    let mut applied = 0;
    for outcome in outcomes {
        let delta = outcome.momentum_delta();
        for id in &outcome.visitors {
            let Some(&i) = index.get(id) else {
                log::warn!("[Visits] unknown visitor {} at {}", id, outcome.team);
                continue;
            };
            let recruit = &mut recruits[i];
            if recruit.stage.is_terminal() {
                continue;
            }
            recruit.adjust_momentum(&outcome.team, delta);
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{index_recruits, Position};

    fn game(team: &str, won: bool, is_rivalry: bool, visitors: Vec<RecruitId>) -> GameOutcome {
        GameOutcome { team: team.into(), won, is_rivalry, visitors }
    }

    #[test]
    fn test_momentum_deltas() {
        assert_eq!(game("Duke", true, false, vec![]).momentum_delta(), 2);
        assert_eq!(game("Duke", true, true, vec![]).momentum_delta(), 4);
        assert_eq!(game("Duke", false, false, vec![]).momentum_delta(), -1);
        assert_eq!(game("Duke", false, true, vec![]).momentum_delta(), -2);
    }

    #[test]
    fn test_visitors_adjusted() {
        let mut recruits = vec![
            Recruit::new(1, "A", Position::PG, 4, 80, 90, "NC"),
            Recruit::new(2, "B", Position::C, 3, 70, 80, "NC"),
        ];
        recruits[1].record_commitment("Duke", 12, false);
        recruits[1].record_signing(26);
        let index = index_recruits(&recruits);
        let outcomes = vec![
            game("Duke", true, true, vec![1, 2, 99]),
            game("UNC", false, false, vec![1]),
        ];

        assert_eq!(apply_game_outcomes(&mut recruits, &index, &outcomes), 2);
        assert_eq!(recruits[0].momentum_for("Duke"), 4);
        assert_eq!(recruits[0].momentum_for("UNC"), -1);
        assert_eq!(recruits[1].momentum_for("Duke"), 0);
    }
}
