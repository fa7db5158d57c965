//! Recruit entity and its closed enums.
//!
//! A recruit carries its own offer, momentum and commitment state. Every
//! component of the tick mutates it through the helpers below so the
//! clamping and pruning rules live in one place.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use super::team::GeoPoint;
use crate::error::RecruitError;

pub type RecruitId = u32;

/// Momentum bounds per (recruit, team).
pub const MOMENTUM_MIN: i8 = -20;
pub const MOMENTUM_MAX: i8 = 20;

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    pub const ALL: [Position; 5] = [Position::PG, Position::SG, Position::SF, Position::PF, Position::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Mercenary,
    HometownHero,
    ProcessTrustor,
    FameSeeker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PersonalityTrait {
    #[default]
    Balanced,
    /// Wants to stay close to family
    Homebody,
    /// Wants to get away from home
    Wanderlust,
    Competitor,
    Scholar,
    Showman,
    Loyal,
    /// Resists joint decisions with relatives
    Independent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NilPriority {
    Minimal,
    #[default]
    Balanced,
    Important,
    Essential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Dealbreaker {
    #[default]
    None,
    Proximity,
    Nil,
    PlayingTime,
    Academics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DecisionStyle {
    Decisive,
    #[default]
    Balanced,
    Indecisive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CommitmentStyle {
    FrontRunner,
    #[default]
    Balanced,
    Underdog,
}

/// `Open -> Narrowing -> SoftCommit -> HardCommit -> Signed`, plus the
/// `SoftCommit -> Narrowing` reopen edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RecruitmentStage {
    #[default]
    Open,
    Narrowing,
    SoftCommit,
    HardCommit,
    Signed,
}

impl RecruitmentStage {
    pub fn is_committed(&self) -> bool {
        matches!(
            self,
            RecruitmentStage::SoftCommit | RecruitmentStage::HardCommit | RecruitmentStage::Signed
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RecruitmentStage::Signed)
    }

    /// Legal forward moves may skip intermediate stages (a signing-day commit
    /// goes straight from Open to Signed); the only backward edge is a reopen.
    pub fn can_transition_to(&self, next: RecruitmentStage) -> bool {
        use RecruitmentStage::*;
        match (self, next) {
            (Signed, _) => false,
            (SoftCommit, Narrowing) => true,
            (a, b) => (b as u8) > (*a as u8),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    Twin,
    Sibling,
    Cousin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PitchType {
    #[default]
    Standard,
    NilHeavy,
    PlayingTimePromise,
    LocalAngle,
    AcademicPitch,
    EarlyPush,
}

// ============================================================================
// Value types
// ============================================================================

fn neutral() -> u8 {
    50
}

/// Seven preference axes, 0-100. Missing values deserialize as neutral (50).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motivations {
    #[serde(default = "neutral")]
    pub proximity: u8,
    #[serde(default = "neutral")]
    pub playing_time: u8,
    #[serde(default = "neutral")]
    pub nil: u8,
    #[serde(default = "neutral")]
    pub exposure: u8,
    #[serde(default = "neutral")]
    pub relationship: u8,
    #[serde(default = "neutral")]
    pub development: u8,
    #[serde(default = "neutral")]
    pub academics: u8,
}

impl Default for Motivations {
    fn default() -> Self {
        Self {
            proximity: 50,
            playing_time: 50,
            nil: 50,
            exposure: 50,
            relationship: 50,
            development: 50,
            academics: 50,
        }
    }
}

impl Motivations {
    pub fn as_array(&self) -> [(&'static str, u8); 7] {
        [
            ("proximity", self.proximity),
            ("playing_time", self.playing_time),
            ("nil", self.nil),
            ("exposure", self.exposure),
            ("relationship", self.relationship),
            ("development", self.development),
            ("academics", self.academics),
        ]
    }
}

/// What the recruit wants a program's academic, market and community scores to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTargets {
    #[serde(default = "neutral")]
    pub academic: u8,
    #[serde(default = "neutral")]
    pub market: u8,
    #[serde(default = "neutral")]
    pub community: u8,
}

impl Default for AttributeTargets {
    fn default() -> Self {
        Self { academic: 50, market: 50, community: 50 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub team: String,
    pub week: u16,
    pub tick: u32,
    pub pitch: PitchType,
    pub revoked: bool,
    #[serde(default)]
    pub revoked_week: Option<u16>,
    /// Consecutive board ticks with non-positive momentum
    #[serde(default)]
    pub cold_weeks: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCommitment {
    pub team: String,
    pub decided_week: u16,
    pub announce_week: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipLink {
    pub kind: RelationshipType,
    pub linked_id: RecruitId,
    pub package_deal: bool,
}

// ============================================================================
// Recruit
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recruit {
    pub id: RecruitId,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub secondary_position: Option<Position>,
    pub stars: u8,
    pub overall: u8,
    pub potential: u8,

    #[serde(default)]
    pub motivations: Motivations,
    pub archetype: Archetype,
    #[serde(default)]
    pub personality: PersonalityTrait,
    #[serde(default)]
    pub nil_priority: NilPriority,
    #[serde(default)]
    pub dealbreaker: Dealbreaker,
    #[serde(default)]
    pub decision_style: DecisionStyle,
    #[serde(default)]
    pub commitment_style: CommitmentStyle,
    #[serde(default = "neutral")]
    pub fit_strictness: u8,
    #[serde(default = "neutral")]
    pub resilience: u8,
    #[serde(default)]
    pub targets: AttributeTargets,

    pub home_state: String,
    #[serde(default)]
    pub home_city: String,
    #[serde(default)]
    pub coords: Option<GeoPoint>,
    #[serde(default)]
    pub hype: u8,

    // Offer state
    #[serde(default)]
    pub offers: BTreeSet<String>,
    #[serde(default)]
    pub declined: BTreeSet<String>,
    #[serde(default)]
    pub offer_history: Vec<OfferRecord>,
    /// Sparse; zero entries are pruned.
    #[serde(default)]
    pub momentum: BTreeMap<String, i8>,
    /// Interest tracked by the host for specific teams (e.g. the user's program).
    #[serde(default)]
    pub base_interest: BTreeMap<String, u8>,
    #[serde(default)]
    pub user_offer_pending: bool,

    // Commitment state
    #[serde(default)]
    pub committed_team: Option<String>,
    #[serde(default)]
    pub soft_commitment: bool,
    #[serde(default)]
    pub stage: RecruitmentStage,
    #[serde(default)]
    pub pending: Option<PendingCommitment>,
    #[serde(default)]
    pub former_commitment: Option<String>,
    #[serde(default)]
    pub commit_week: Option<u16>,
    #[serde(default)]
    pub signed_week: Option<u16>,

    #[serde(default)]
    pub relationships: Vec<RelationshipLink>,
}

impl Recruit {
    /// Create a recruit with neutral preferences and no offers.
    pub fn new(
        id: RecruitId,
        name: impl Into<String>,
        position: Position,
        stars: u8,
        overall: u8,
        potential: u8,
        home_state: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            secondary_position: None,
            stars: stars.clamp(1, 5),
            overall: overall.min(100),
            potential: potential.min(100).max(overall.min(100)),
            motivations: Motivations::default(),
            archetype: Archetype::ProcessTrustor,
            personality: PersonalityTrait::default(),
            nil_priority: NilPriority::default(),
            dealbreaker: Dealbreaker::default(),
            decision_style: DecisionStyle::default(),
            commitment_style: CommitmentStyle::default(),
            fit_strictness: 50,
            resilience: 50,
            targets: AttributeTargets::default(),
            home_state: home_state.into(),
            home_city: String::new(),
            coords: None,
            hype: 0,
            offers: BTreeSet::new(),
            declined: BTreeSet::new(),
            offer_history: Vec::new(),
            momentum: BTreeMap::new(),
            base_interest: BTreeMap::new(),
            user_offer_pending: false,
            committed_team: None,
            soft_commitment: false,
            stage: RecruitmentStage::Open,
            pending: None,
            former_commitment: None,
            commit_week: None,
            signed_week: None,
            relationships: Vec::new(),
        }
    }

    /// 0.0-1.0 blend of star rating and overall.
    pub fn talent_score(&self) -> f32 {
        let star_part = (self.stars.clamp(1, 5) - 1) as f32 / 4.0;
        let overall_part = self.overall.min(100) as f32 / 100.0;
        star_part * 0.6 + overall_part * 0.4
    }

    // ========== Offers ==========

    pub fn has_offer(&self, team: &str) -> bool {
        self.offers.contains(team)
    }

    /// Offering teams in name order.
    pub fn live_offers(&self) -> Vec<String> {
        self.offers.iter().cloned().collect()
    }

    /// Returns `false` when the team was already offering.
    pub fn receive_offer(&mut self, team: &str, week: u16, tick: u32, pitch: PitchType) -> bool {
        if self.offers.contains(team) {
            return false;
        }
        self.offers.insert(team.to_string());
        self.declined.remove(team);
        self.offer_history.push(OfferRecord {
            team: team.to_string(),
            week,
            tick,
            pitch,
            revoked: false,
            revoked_week: None,
            cold_weeks: 0,
        });
        true
    }

    /// Returns `false` when the team held no live offer.
    pub fn revoke_offer(&mut self, team: &str, week: u16) -> bool {
        if !self.offers.remove(team) {
            return false;
        }
        if let Some(record) = self.latest_offer_mut(team) {
            record.revoked = true;
            record.revoked_week = Some(week);
        }
        if self.pending.as_ref().is_some_and(|p| p.team == team) {
            self.pending = None;
        }
        true
    }

    pub fn decline_offer(&mut self, team: &str) {
        if self.offers.remove(team) {
            self.declined.insert(team.to_string());
        }
    }

    /// Decline every live offer except `keep`. Returns how many were declined.
    pub fn decline_other_offers(&mut self, keep: &str) -> usize {
        let others: Vec<String> = self.live_offers().into_iter().filter(|t| t != keep).collect();
        for team in &others {
            self.decline_offer(team);
        }
        others.len()
    }

    /// Latest unrevoked offer record for a team.
    pub fn latest_offer(&self, team: &str) -> Option<&OfferRecord> {
        self.offer_history.iter().rev().find(|r| r.team == team && !r.revoked)
    }

    pub fn latest_offer_mut(&mut self, team: &str) -> Option<&mut OfferRecord> {
        self.offer_history.iter_mut().rev().find(|r| r.team == team && !r.revoked)
    }

    /// Pitch of the live offer, if the team is still offering.
    pub fn active_pitch(&self, team: &str) -> Option<PitchType> {
        if !self.offers.contains(team) {
            return None;
        }
        self.latest_offer(team).map(|r| r.pitch)
    }

    // ========== Momentum ==========

    pub fn momentum_for(&self, team: &str) -> i8 {
        self.momentum.get(team).copied().unwrap_or(0)
    }

    /// Add `delta`, clamp to [-20, 20] and prune the entry if it lands on zero.
    pub fn adjust_momentum(&mut self, team: &str, delta: i32) -> i8 {
        let current = self.momentum_for(team) as i32;
        let next = (current + delta).clamp(MOMENTUM_MIN as i32, MOMENTUM_MAX as i32) as i8;
        if next == 0 {
            self.momentum.remove(team);
        } else {
            self.momentum.insert(team.to_string(), next);
        }
        next
    }

    /// Move every entry one point toward zero.
    pub fn cool_momentum(&mut self) {
        for value in self.momentum.values_mut() {
            *value -= value.signum();
        }
        self.momentum.retain(|_, v| *v != 0);
    }

    // ========== Commitment ==========

    pub fn is_committed(&self) -> bool {
        self.committed_team.is_some()
    }

    pub fn is_signed(&self) -> bool {
        self.stage == RecruitmentStage::Signed
    }

    /// Open or Narrowing, i.e. still choosing.
    pub fn is_undecided(&self) -> bool {
        self.committed_team.is_none()
            && matches!(self.stage, RecruitmentStage::Open | RecruitmentStage::Narrowing)
    }

    /// Move into a commitment, soft or hard. Clears any pending record.
    pub fn record_commitment(&mut self, team: &str, week: u16, soft: bool) {
        self.committed_team = Some(team.to_string());
        self.soft_commitment = soft;
        self.stage = if soft { RecruitmentStage::SoftCommit } else { RecruitmentStage::HardCommit };
        self.commit_week = Some(week);
        self.pending = None;
    }

    pub fn record_signing(&mut self, week: u16) {
        self.stage = RecruitmentStage::Signed;
        self.soft_commitment = false;
        self.signed_week = Some(week);
        self.pending = None;
    }

    /// Drop a soft commitment back to Narrowing.
    pub fn record_decommitment(&mut self) -> Option<String> {
        let former = self.committed_team.take();
        self.former_commitment = former.clone();
        self.soft_commitment = false;
        self.stage = RecruitmentStage::Narrowing;
        self.commit_week = None;
        former
    }

    // ========== Relationships ==========

    pub fn package_links(&self) -> impl Iterator<Item = &RelationshipLink> {
        self.relationships.iter().filter(|l| l.package_deal)
    }

    pub fn is_package_linked(&self) -> bool {
        self.relationships.iter().any(|l| l.package_deal)
    }
}

// ============================================================================
// FromStr implementations for all enums
// ============================================================================

macro_rules! impl_from_str {
    ($ty:ty, $field:literal, { $($text:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = RecruitError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized: String =
                    s.chars().filter(|c| c.is_alphanumeric()).collect::<String>().to_lowercase();
                match normalized.as_str() {
                    $($text => Ok($variant),)+
                    _ => Err(RecruitError::invalid_enum($field, s)),
                }
            }
        }
    };
}

impl_from_str!(Position, "position", {
    "pg" => Position::PG,
    "sg" => Position::SG,
    "sf" => Position::SF,
    "pf" => Position::PF,
    "c" => Position::C,
});

impl_from_str!(Archetype, "archetype", {
    "mercenary" => Archetype::Mercenary,
    "hometownhero" => Archetype::HometownHero,
    "processtrustor" => Archetype::ProcessTrustor,
    "fameseeker" => Archetype::FameSeeker,
});

impl_from_str!(PersonalityTrait, "personality", {
    "balanced" => PersonalityTrait::Balanced,
    "homebody" => PersonalityTrait::Homebody,
    "wanderlust" => PersonalityTrait::Wanderlust,
    "competitor" => PersonalityTrait::Competitor,
    "scholar" => PersonalityTrait::Scholar,
    "showman" => PersonalityTrait::Showman,
    "loyal" => PersonalityTrait::Loyal,
    "independent" => PersonalityTrait::Independent,
});

impl_from_str!(NilPriority, "nil_priority", {
    "minimal" => NilPriority::Minimal,
    "balanced" => NilPriority::Balanced,
    "important" => NilPriority::Important,
    "essential" => NilPriority::Essential,
});

impl_from_str!(Dealbreaker, "dealbreaker", {
    "none" => Dealbreaker::None,
    "proximity" => Dealbreaker::Proximity,
    "nil" => Dealbreaker::Nil,
    "playingtime" => Dealbreaker::PlayingTime,
    "academics" => Dealbreaker::Academics,
});

impl_from_str!(DecisionStyle, "decision_style", {
    "decisive" => DecisionStyle::Decisive,
    "balanced" => DecisionStyle::Balanced,
    "indecisive" => DecisionStyle::Indecisive,
});

impl_from_str!(CommitmentStyle, "commitment_style", {
    "frontrunner" => CommitmentStyle::FrontRunner,
    "balanced" => CommitmentStyle::Balanced,
    "underdog" => CommitmentStyle::Underdog,
});

impl_from_str!(RecruitmentStage, "stage", {
    "open" => RecruitmentStage::Open,
    "narrowing" => RecruitmentStage::Narrowing,
    "softcommit" => RecruitmentStage::SoftCommit,
    "hardcommit" => RecruitmentStage::HardCommit,
    "signed" => RecruitmentStage::Signed,
});

impl_from_str!(RelationshipType, "relationship", {
    "twin" => RelationshipType::Twin,
    "sibling" => RelationshipType::Sibling,
    "cousin" => RelationshipType::Cousin,
});

impl_from_str!(PitchType, "pitch", {
    "standard" => PitchType::Standard,
    "nilheavy" => PitchType::NilHeavy,
    "playingtimepromise" => PitchType::PlayingTimePromise,
    "localangle" => PitchType::LocalAngle,
    "academicpitch" => PitchType::AcademicPitch,
    "earlypush" => PitchType::EarlyPush,
});

#[cfg(test)]
mod tests {
    use super::*;

    fn recruit() -> Recruit {
        Recruit::new(1, "Jalen Hart", Position::SG, 4, 78, 88, "OH")
    }

    #[test]
    fn test_momentum_clamped_and_pruned() {
        let mut r = recruit();
        assert_eq!(r.adjust_momentum("Buckeye Tech", 35), 20);
        assert_eq!(r.adjust_momentum("Buckeye Tech", -50), -20);
        assert_eq!(r.adjust_momentum("Buckeye Tech", 20), 0);
        assert!(r.momentum.is_empty(), "zero entries must be pruned");
    }

    #[test]
    fn test_cool_momentum_moves_toward_zero() {
        let mut r = recruit();
        r.adjust_momentum("A", 2);
        r.adjust_momentum("B", -1);
        r.cool_momentum();
        assert_eq!(r.momentum_for("A"), 1);
        assert!(!r.momentum.contains_key("B"));
    }

    #[test]
    fn test_offer_lifecycle() {
        let mut r = recruit();
        assert!(r.receive_offer("Lakeshore", 3, 3, PitchType::NilHeavy));
        assert!(!r.receive_offer("Lakeshore", 4, 4, PitchType::Standard));
        assert_eq!(r.active_pitch("Lakeshore"), Some(PitchType::NilHeavy));

        assert!(r.revoke_offer("Lakeshore", 6));
        assert_eq!(r.active_pitch("Lakeshore"), None);
        assert!(r.offer_history[0].revoked);
        assert!(!r.revoke_offer("Lakeshore", 7));
    }

    #[test]
    fn test_decline_moves_offer() {
        let mut r = recruit();
        r.receive_offer("Lakeshore", 1, 1, PitchType::Standard);
        r.decline_offer("Lakeshore");
        assert!(!r.has_offer("Lakeshore"));
        assert!(r.declined.contains("Lakeshore"));
    }

    #[test]
    fn test_decline_other_offers_keeps_chosen_team() {
        let mut r = recruit();
        for team in ["Lakeshore", "Miami North", "Pinewood"] {
            r.receive_offer(team, 1, 1, PitchType::Standard);
        }
        assert_eq!(r.decline_other_offers("Miami North"), 2);
        assert_eq!(r.live_offers(), vec!["Miami North".to_string()]);
        assert!(r.declined.contains("Lakeshore") && r.declined.contains("Pinewood"));
        assert_eq!(r.decline_other_offers("Miami North"), 0);
    }

    #[test]
    fn test_stage_transitions() {
        use RecruitmentStage::*;
        assert!(Open.can_transition_to(Narrowing));
        assert!(Open.can_transition_to(Signed));
        assert!(SoftCommit.can_transition_to(Narrowing));
        assert!(!HardCommit.can_transition_to(Narrowing));
        assert!(!Signed.can_transition_to(Open));
        assert!(!Narrowing.can_transition_to(Open));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!("Hometown Hero".parse::<Archetype>().unwrap(), Archetype::HometownHero);
        assert_eq!("playing_time".parse::<Dealbreaker>().unwrap(), Dealbreaker::PlayingTime);
        assert!("Wizard".parse::<Archetype>().is_err());
        assert!("Maybe".parse::<DecisionStyle>().is_err());
    }

    #[test]
    fn test_missing_motivations_default_neutral() {
        let m: Motivations = serde_json::from_str(r#"{"nil": 90}"#).unwrap();
        assert_eq!(m.nil, 90);
        assert_eq!(m.proximity, 50);
        assert_eq!(m.academics, 50);
    }
}
