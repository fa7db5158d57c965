//! Recruit and team data model.

pub mod recruit;
pub mod team;
pub mod validation;

pub use recruit::*;
pub use team::{CoachingStyle, GeoPoint, Region, TeamContext, TeamDirectory};
pub use validation::{RecruitRecord, RecruitValidator, RelationshipRecord};

use fxhash::FxHashMap;
use std::collections::BTreeMap;

/// Position of each recruit in the tick's recruit slice.
pub type RecruitIndex = FxHashMap<RecruitId, usize>;

pub fn index_recruits(recruits: &[Recruit]) -> RecruitIndex {
    recruits.iter().enumerate().map(|(i, r)| (r.id, i)).collect()
}

/// Live commitments (soft, hard or signed) per team.
pub fn commit_counts(recruits: &[Recruit]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for team in recruits.iter().filter_map(|r| r.committed_team.as_ref()) {
        *counts.entry(team.clone()).or_insert(0) += 1;
    }
    counts
}
