//! Bounded attention: which offers a recruit is actually weighing, and how
//! much of their attention each one gets.
//!
//! The shortlist keeps every offer within `leader_window` points of the top
//! score, bounded to `[min_size, max_size]`. Current and former commitments are
//! always on the list. Shares come from a softmax whose temperature reflects
//! how decisive and how picky the recruit is.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::ShortlistConfig;
use crate::deterministic::{deterministic_f32, subcase};
use crate::models::{DecisionStyle, Recruit};

/// One live offer and its interest score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredOffer {
    pub team: String,
    pub score: u8,
}

impl ScoredOffer {
    pub fn new(team: impl Into<String>, score: u8) -> Self {
        Self { team: team.into(), score }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub team: String,
    pub score: u8,
    /// Percent of attention, entries sum to 100
    pub share: f32,
    /// Kept on the list regardless of score
    pub forced: bool,
}

/// Entries ordered by score, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shortlist {
    pub entries: Vec<ShortlistEntry>,
}

impl Shortlist {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Highest-share entry; ties go to the higher score.
    pub fn leader(&self) -> Option<&ShortlistEntry> {
        self.entries.iter().max_by(|a, b| compare_share(a, b))
    }

    /// Second-highest share entry.
    pub fn runner_up(&self) -> Option<&ShortlistEntry> {
        let leader = self.leader()?;
        self.entries
            .iter()
            .filter(|e| e.team != leader.team)
            .max_by(|a, b| compare_share(a, b))
    }

    pub fn get(&self, team: &str) -> Option<&ShortlistEntry> {
        self.entries.iter().find(|e| e.team == team)
    }

    pub fn share_of(&self, team: &str) -> f32 {
        self.get(team).map(|e| e.share).unwrap_or(0.0)
    }

    pub fn total_share(&self) -> f32 {
        self.entries.iter().map(|e| e.share).sum()
    }
}

fn compare_share(a: &ShortlistEntry, b: &ShortlistEntry) -> Ordering {
    a.share
        .total_cmp(&b.share)
        .then(a.score.cmp(&b.score))
        // lower name wins the final tie
        .then(b.team.cmp(&a.team))
}

/// Tick key for the tie-break jitter.
#[derive(Debug, Clone, Copy)]
pub struct AllocationKey {
    pub seed: u64,
    pub tick: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ShortlistAllocator {
    pub config: ShortlistConfig,
}

impl ShortlistAllocator {
    pub fn new(config: ShortlistConfig) -> Self {
        Self { config }
    }

    /// Build the shortlist and its shares.
    ///
    /// `required` teams are force-included even outside the leader window.
    pub fn allocate(
        &self,
        recruit: &Recruit,
        offers: &[ScoredOffer],
        required: &[&str],
        key: AllocationKey,
    ) -> Shortlist {
        if offers.is_empty() {
            return Shortlist::default();
        }

        // one entry per team, at its best score
        let mut best: BTreeMap<&str, &ScoredOffer> = BTreeMap::new();
        for offer in offers {
            best.entry(offer.team.as_str())
                .and_modify(|kept| {
                    if offer.score > kept.score {
                        *kept = offer;
                    }
                })
                .or_insert(offer);
        }
        let mut sorted: Vec<&ScoredOffer> = best.into_values().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.team.cmp(&b.team)));

        let cfg = &self.config;
        let top = sorted[0].score as f32;
        let in_window = sorted.iter().filter(|o| top - o.score as f32 <= cfg.leader_window).count();
        let size = in_window.max(cfg.min_size).min(cfg.max_size).min(sorted.len());

        let mut picked: Vec<(&ScoredOffer, bool)> = sorted[..size]
            .iter()
            .map(|o| (*o, required.contains(&o.team.as_str())))
            .collect();

        for team in required {
            if picked.iter().any(|(o, _)| o.team == *team) {
                continue;
            }
            let Some(offer) = sorted.iter().find(|o| o.team == *team) else {
                continue;
            };
            picked.push((*offer, true));
            if picked.len() > cfg.max_size {
                // drop the weakest unforced entry
                if let Some(idx) = picked.iter().rposition(|(_, forced)| !*forced) {
                    picked.remove(idx);
                }
            }
        }
        picked.sort_by(|a, b| b.0.score.cmp(&a.0.score).then_with(|| a.0.team.cmp(&b.0.team)));

        if picked.len() == 1 {
            let (offer, forced) = picked[0];
            return Shortlist {
                entries: vec![ShortlistEntry {
                    team: offer.team.clone(),
                    score: offer.score,
                    share: 100.0,
                    forced,
                }],
            };
        }

        let temperature = self.temperature(recruit, &picked);
        let logits: Vec<f32> = picked
            .iter()
            .map(|(o, _)| {
                let jitter = deterministic_f32(
                    key.seed,
                    key.tick,
                    recruit.id,
                    &o.team,
                    subcase::SHORTLIST_TIE,
                    -cfg.tie_jitter,
                    cfg.tie_jitter,
                );
                (o.score as f32 + jitter) / temperature
            })
            .collect();
        let shares = softmax_percent(&logits);

        Shortlist {
            entries: picked
                .into_iter()
                .zip(shares)
                .map(|((o, forced), share)| ShortlistEntry {
                    team: o.team.clone(),
                    score: o.score,
                    share,
                    forced,
                })
                .collect(),
        }
    }

    /// Wider for indecisive or easygoing recruits and for spread-out lists.
    fn temperature(&self, recruit: &Recruit, picked: &[(&ScoredOffer, bool)]) -> f32 {
        let cfg = &self.config;
        let style = match recruit.decision_style {
            DecisionStyle::Decisive => 0.75,
            DecisionStyle::Balanced => 1.0,
            DecisionStyle::Indecisive => 1.35,
        };
        let strictness = 1.25 - recruit.fit_strictness.min(100) as f32 / 200.0;

        let high = picked.iter().map(|(o, _)| o.score).max().unwrap_or(0) as f32;
        let low = picked.iter().map(|(o, _)| o.score).min().unwrap_or(0) as f32;
        let spread = (0.8 + (high - low) / 50.0).clamp(0.8, 1.6);

        (cfg.base_temperature * style * strictness * spread).clamp(cfg.min_temperature, cfg.max_temperature)
    }
}

/// Numerically stable softmax scaled to sum to 100.
fn softmax_percent(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|e| e / sum * 100.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use proptest::prelude::*;

    fn recruit() -> Recruit {
        Recruit::new(42, "Kai Moreno", Position::SF, 3, 72, 80, "AZ")
    }

    fn key() -> AllocationKey {
        AllocationKey { seed: 5, tick: 12 }
    }

    fn offers(scores: &[u8]) -> Vec<ScoredOffer> {
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| ScoredOffer::new(format!("Team {}", i), *s))
            .collect()
    }

    #[test]
    fn test_single_offer_gets_full_share() {
        let list = ShortlistAllocator::default().allocate(&recruit(), &offers(&[33]), &[], key());
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries[0].share, 100.0);
    }

    #[test]
    fn test_min_size_fills_outside_window() {
        let list = ShortlistAllocator::default().allocate(&recruit(), &offers(&[90, 50, 40, 30]), &[], key());
        assert_eq!(list.len(), 3);
        assert_eq!(list.entries[0].team, "Team 0");
    }

    #[test]
    fn test_max_size_caps_window() {
        let scores = [80, 79, 78, 77, 76, 75, 74, 73];
        let list = ShortlistAllocator::default().allocate(&recruit(), &offers(&scores), &[], key());
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn test_required_team_evicts_weakest() {
        let scores = [80, 79, 78, 77, 76, 75, 20];
        let required = ["Team 6"];
        let list = ShortlistAllocator::default().allocate(&recruit(), &offers(&scores), &required, key());
        assert_eq!(list.len(), 6);
        assert!(list.get("Team 6").is_some_and(|e| e.forced));
        assert!(list.get("Team 5").is_none(), "weakest unforced entry should be evicted");
    }

    #[test]
    fn test_decisive_recruit_concentrates_share() {
        let allocator = ShortlistAllocator::default();
        let mut decisive = recruit();
        decisive.decision_style = DecisionStyle::Decisive;
        decisive.fit_strictness = 100;
        let mut indecisive = recruit();
        indecisive.decision_style = DecisionStyle::Indecisive;
        indecisive.fit_strictness = 0;

        let o = offers(&[70, 62, 60]);
        let a = allocator.allocate(&decisive, &o, &[], key());
        let b = allocator.allocate(&indecisive, &o, &[], key());
        assert!(a.share_of("Team 0") > b.share_of("Team 0"));
    }

    #[test]
    fn test_leader_and_runner_up() {
        let list = ShortlistAllocator::default().allocate(&recruit(), &offers(&[80, 40]), &[], key());
        assert_eq!(list.leader().map(|e| e.team.as_str()), Some("Team 0"));
        assert_eq!(list.runner_up().map(|e| e.team.as_str()), Some("Team 1"));
        assert!(list.share_of("Team 0") > 90.0);
    }

    #[test]
    fn test_repeated_team_counted_once_at_best_score() {
        let o = vec![
            ScoredOffer::new("Arizona", 40),
            ScoredOffer::new("Gonzaga", 70),
            ScoredOffer::new("Arizona", 85),
        ];
        let list = ShortlistAllocator::default().allocate(&recruit(), &o, &[], key());
        assert_eq!(list.len(), 2);
        assert_eq!(list.get("Arizona").map(|e| e.score), Some(85));
        assert_eq!(list.entries[0].team, "Arizona");
        assert!((list.total_share() - 100.0).abs() <= 0.5);
    }

    #[test]
    fn test_exact_ties_resolved_deterministically() {
        let allocator = ShortlistAllocator::default();
        let o = offers(&[60, 60, 60]);
        let a = allocator.allocate(&recruit(), &o, &[], key());
        let b = allocator.allocate(&recruit(), &o, &[], key());
        assert_eq!(a, b);
    }

    proptest! {
        /// Property: shares sum to 100 and size is bounded
        #[test]
        fn prop_shares_sum_to_100(scores in prop::collection::vec(1u8..=100, 1..12), tick in 0u32..100) {
            let allocator = ShortlistAllocator::default();
            let list = allocator.allocate(&recruit(), &offers(&scores), &[], AllocationKey { seed: 1, tick });
            prop_assert!((list.total_share() - 100.0).abs() <= 0.5);
            if scores.len() >= 3 {
                prop_assert!((3..=6).contains(&list.len()));
            } else {
                prop_assert_eq!(list.len(), scores.len());
            }
        }

        /// Property: allocation is idempotent for a fixed tick key
        #[test]
        fn prop_allocation_idempotent(scores in prop::collection::vec(1u8..=100, 1..8), tick in 0u32..100) {
            let allocator = ShortlistAllocator::default();
            let o = offers(&scores);
            let k = AllocationKey { seed: 1, tick };
            prop_assert_eq!(allocator.allocate(&recruit(), &o, &[], k), allocator.allocate(&recruit(), &o, &[], k));
        }
    }
}
