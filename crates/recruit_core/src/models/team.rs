//! Read-only team snapshot consumed by the recruiting core.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::recruit::Position;
use crate::error::RecruitError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Northeast,
    Southeast,
    Midwest,
    Southwest,
    West,
}

impl Region {
    /// Regions that share a border.
    pub fn is_adjacent(&self, other: Region) -> bool {
        use Region::*;
        matches!(
            (self, other),
            (Northeast, Southeast)
                | (Southeast, Northeast)
                | (Northeast, Midwest)
                | (Midwest, Northeast)
                | (Southeast, Midwest)
                | (Midwest, Southeast)
                | (Southeast, Southwest)
                | (Southwest, Southeast)
                | (Midwest, Southwest)
                | (Southwest, Midwest)
                | (Midwest, West)
                | (West, Midwest)
                | (Southwest, West)
                | (West, Southwest)
        )
    }
}

impl FromStr for Region {
    type Err = RecruitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "northeast" => Ok(Region::Northeast),
            "southeast" => Ok(Region::Southeast),
            "midwest" => Ok(Region::Midwest),
            "southwest" => Ok(Region::Southwest),
            "west" => Ok(Region::West),
            _ => Err(RecruitError::invalid_enum("region", s)),
        }
    }
}

/// Head coach's pitch style; recruits with matching motivations notice it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CoachingStyle {
    #[default]
    Balanced,
    PlayerDevelopment,
    UpTempo,
    Defensive,
    StarSystem,
    Academic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamContext {
    pub name: String,
    pub prestige: u8,
    pub recruiting_prestige: u8,
    pub home_state: String,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub coords: Option<GeoPoint>,

    /// Returning players per position; higher means less playing time.
    #[serde(default)]
    pub positional_depth: BTreeMap<Position, u8>,

    /// 0-100 wealth and alumni signals feeding NIL appeal
    #[serde(default)]
    pub wealth: u8,
    #[serde(default)]
    pub alumni_strength: u8,

    #[serde(default)]
    pub coaching_style: CoachingStyle,

    #[serde(default)]
    pub academic_score: u8,
    #[serde(default)]
    pub market_score: u8,
    #[serde(default)]
    pub community_score: u8,

    #[serde(default)]
    pub wins: u16,
    #[serde(default)]
    pub losses: u16,

    pub scholarship_capacity: u8,
    #[serde(default)]
    pub returning_underclassmen: u8,

    #[serde(default)]
    pub is_user_team: bool,
}

impl TeamContext {
    pub fn new(name: impl Into<String>, prestige: u8, home_state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prestige: prestige.min(100),
            recruiting_prestige: prestige.min(100),
            home_state: home_state.into(),
            region: None,
            coords: None,
            positional_depth: BTreeMap::new(),
            wealth: 50,
            alumni_strength: 50,
            coaching_style: CoachingStyle::default(),
            academic_score: 50,
            market_score: 50,
            community_score: 50,
            wins: 0,
            losses: 0,
            scholarship_capacity: 13,
            returning_underclassmen: 9,
            is_user_team: false,
        }
    }

    /// 0.0 (open depth chart) to 1.0 (crowded) at a position.
    pub fn congestion(&self, position: Position) -> f32 {
        let depth = self.positional_depth.get(&position).copied().unwrap_or(0);
        (depth as f32 / 4.0).min(1.0)
    }

    /// 0-100 blend of wealth and alumni strength.
    pub fn nil_signal(&self) -> f32 {
        self.wealth.min(100) as f32 * 0.6 + self.alumni_strength.min(100) as f32 * 0.4
    }

    /// Highest star rating a program at this prestige realistically lands.
    pub fn star_tier(&self) -> u8 {
        match self.prestige {
            85..=u8::MAX => 5,
            70..=84 => 4,
            50..=69 => 3,
            30..=49 => 2,
            _ => 1,
        }
    }

    pub fn slots_remaining(&self, current_commits: usize) -> u8 {
        let open = self.scholarship_capacity as i32
            - self.returning_underclassmen as i32
            - current_commits as i32;
        open.clamp(0, u8::MAX as i32) as u8
    }
}

/// Name-indexed view over the host's team snapshots.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory<'a> {
    by_name: FxHashMap<&'a str, &'a TeamContext>,
    ordered: Vec<&'a TeamContext>,
}

impl<'a> TeamDirectory<'a> {
    pub fn new(teams: &'a [TeamContext]) -> Self {
        let mut ordered: Vec<&TeamContext> = teams.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));
        let by_name = ordered.iter().map(|t| (t.name.as_str(), *t)).collect();
        Self { by_name, ordered }
    }

    pub fn get(&self, name: &str) -> Option<&'a TeamContext> {
        self.by_name.get(name).copied()
    }

    /// Teams in name order.
    pub fn iter(&self) -> impl Iterator<Item = &'a TeamContext> + '_ {
        self.ordered.iter().copied()
    }

    /// Open scholarships given live per-team commit counts. Unknown teams have none.
    pub fn open_slots(&self, name: &str, commits: &BTreeMap<String, usize>) -> u8 {
        let current = commits.get(name).copied().unwrap_or(0);
        self.get(name).map_or(0, |t| t.slots_remaining(current))
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
