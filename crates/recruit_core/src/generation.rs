//! Seeded synthetic recruit classes and leagues for demos and tests.
//!
//! The host normally owns class generation; this gives it a reproducible
//! stand-in. Same seed, same class.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geo::STATES;
use crate::models::{
    Archetype, AttributeTargets, CoachingStyle, CommitmentStyle, Dealbreaker, DecisionStyle, Motivations,
    NilPriority, PersonalityTrait, Position, Recruit, RecruitId, RelationshipLink, RelationshipType, TeamContext,
};

const FIRST_NAMES: &[&str] = &[
    "Jalen", "Marcus", "Devin", "Isaiah", "Tyrese", "Caleb", "Andre", "Malik", "Jordan", "Xavier", "Elijah",
    "Darius", "Trey", "Cameron", "Noah", "Julian", "Miles", "Terrence", "Brandon", "Quentin", "Amari", "Nico",
];

const LAST_NAMES: &[&str] = &[
    "Brooks", "Carter", "Ellis", "Franklin", "Grant", "Hayes", "Irving", "Jenkins", "Knight", "Lawson", "Mitchell",
    "Nash", "Owens", "Porter", "Reed", "Simmons", "Tate", "Underwood", "Vaughn", "Walker", "Young", "Zeller",
];

const CITIES: &[&str] = &["Springfield", "Riverside", "Fairview", "Madison", "Franklin", "Georgetown", "Clinton"];

const PROGRAMS: &[(&str, &str)] = &[
    ("Atlantic Tech", "VA"),
    ("Bayou State", "LA"),
    ("Cascade", "WA"),
    ("Delta A&M", "MS"),
    ("Erie", "PA"),
    ("Front Range", "CO"),
    ("Granite State", "NH"),
    ("Heartland", "KS"),
    ("Inland Empire", "CA"),
    ("Keystone", "PA"),
    ("Lone Star Tech", "TX"),
    ("Mesa", "AZ"),
    ("North Shore", "IL"),
    ("Ozark", "AR"),
    ("Piedmont", "NC"),
    ("Queen City", "OH"),
    ("Red River", "OK"),
    ("Sun Coast", "FL"),
    ("Tidewater", "MD"),
    ("Upper Peninsula", "MI"),
    ("Valley State", "CA"),
    ("Wasatch", "UT"),
    ("Yellowstone", "MT"),
    ("Blue Ridge", "TN"),
];

/// Share of generated recruits that bring a package-deal relative along.
const PACKAGE_RATE: f64 = 0.04;

pub struct ClassGenerator {
    rng: ChaCha8Rng,
    next_id: RecruitId,
}

impl ClassGenerator {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), next_id: 1 }
    }

    fn roll_stars(&mut self) -> u8 {
        match self.rng.gen_range(0..100) {
            0..=2 => 5,
            3..=14 => 4,
            15..=49 => 3,
            50..=84 => 2,
            _ => 1,
        }
    }

    fn motivations(&mut self) -> Motivations {
        Motivations {
            proximity: self.rng.gen_range(15..=90),
            playing_time: self.rng.gen_range(15..=90),
            nil: self.rng.gen_range(15..=90),
            exposure: self.rng.gen_range(15..=90),
            relationship: self.rng.gen_range(15..=90),
            development: self.rng.gen_range(15..=90),
            academics: self.rng.gen_range(15..=90),
        }
    }

    /// One unlinked recruit.
    pub fn recruit(&mut self) -> Recruit {
        let id = self.next_id;
        self.next_id += 1;

        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Sam");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Smith");
        let state = STATES[self.rng.gen_range(0..STATES.len())].code;
        let position = Position::ALL[self.rng.gen_range(0..Position::ALL.len())];
        let stars = self.roll_stars();
        let overall = (45 + stars as i32 * 8 + self.rng.gen_range(-6..=6)).clamp(30, 99) as u8;
        let potential = (overall as i32 + self.rng.gen_range(0..=15)).min(99) as u8;

        let mut recruit = Recruit::new(id, format!("{} {}", first, last), position, stars, overall, potential, state);
        recruit.home_city = CITIES.choose(&mut self.rng).copied().unwrap_or_default().to_string();
        if self.rng.gen_bool(0.3) {
            let secondary = Position::ALL[self.rng.gen_range(0..Position::ALL.len())];
            if secondary != position {
                recruit.secondary_position = Some(secondary);
            }
        }
        recruit.motivations = self.motivations();
        recruit.archetype = match self.rng.gen_range(0..4) {
            0 => Archetype::Mercenary,
            1 => Archetype::HometownHero,
            2 => Archetype::ProcessTrustor,
            _ => Archetype::FameSeeker,
        };
        recruit.personality = match self.rng.gen_range(0..10) {
            0 => PersonalityTrait::Homebody,
            1 => PersonalityTrait::Wanderlust,
            2 => PersonalityTrait::Competitor,
            3 => PersonalityTrait::Scholar,
            4 => PersonalityTrait::Showman,
            5 => PersonalityTrait::Loyal,
            6 => PersonalityTrait::Independent,
            _ => PersonalityTrait::Balanced,
        };
        recruit.nil_priority = match self.rng.gen_range(0..4) {
            0 => NilPriority::Minimal,
            1 => NilPriority::Important,
            2 => NilPriority::Essential,
            _ => NilPriority::Balanced,
        };
        recruit.dealbreaker = if self.rng.gen_bool(0.15) {
            match self.rng.gen_range(0..4) {
                0 => Dealbreaker::Proximity,
                1 => Dealbreaker::Nil,
                2 => Dealbreaker::PlayingTime,
                _ => Dealbreaker::Academics,
            }
        } else {
            Dealbreaker::None
        };
        recruit.decision_style = match self.rng.gen_range(0..4) {
            0 => DecisionStyle::Decisive,
            1 => DecisionStyle::Indecisive,
            _ => DecisionStyle::Balanced,
        };
        recruit.commitment_style = match self.rng.gen_range(0..4) {
            0 => CommitmentStyle::FrontRunner,
            1 => CommitmentStyle::Underdog,
            _ => CommitmentStyle::Balanced,
        };
        recruit.fit_strictness = self.rng.gen_range(10..=90);
        recruit.resilience = self.rng.gen_range(10..=90);
        recruit.targets = AttributeTargets {
            academic: self.rng.gen_range(30..=90),
            market: self.rng.gen_range(30..=90),
            community: self.rng.gen_range(30..=90),
        };
        recruit.hype = (stars as i32 * 15 + self.rng.gen_range(-10..=10)).clamp(0, 100) as u8;
        recruit
    }

    /// A relative from the same town, linked both ways as a package deal.
    fn relative(&mut self, anchor: &mut Recruit) -> Recruit {
        let kind = match self.rng.gen_range(0..10) {
            0..=4 => RelationshipType::Twin,
            5..=7 => RelationshipType::Sibling,
            _ => RelationshipType::Cousin,
        };
        let mut relative = self.recruit();
        let surname = anchor.name.rsplit(' ').next().unwrap_or_default().to_string();
        let first = relative.name.split(' ').next().unwrap_or_default().to_string();
        relative.name = format!("{} {}", first, surname);
        relative.home_state = anchor.home_state.clone();
        relative.home_city = anchor.home_city.clone();
        relative.coords = anchor.coords;
        if kind == RelationshipType::Twin {
            relative.stars = anchor.stars;
            relative.overall = anchor.overall.saturating_sub(self.rng.gen_range(0..=4));
            relative.potential = relative.potential.max(relative.overall);
        }

        anchor.relationships.push(RelationshipLink { kind, linked_id: relative.id, package_deal: true });
        relative.relationships.push(RelationshipLink { kind, linked_id: anchor.id, package_deal: true });
        relative
    }

    /// `size` recruits, a few of them arriving as package pairs.
    pub fn class(&mut self, size: usize) -> Vec<Recruit> {
        let mut class = Vec::with_capacity(size);
        while class.len() < size {
            let mut recruit = self.recruit();
            if class.len() + 2 <= size && self.rng.gen_bool(PACKAGE_RATE) {
                let relative = self.relative(&mut recruit);
                class.push(recruit);
                class.push(relative);
            } else {
                class.push(recruit);
            }
        }
        class
    }

    /// Team snapshots with varied prestige, money and roster depth.
    pub fn league(&mut self, size: usize) -> Vec<TeamContext> {
        (0..size)
            .map(|i| {
                let (base, state) = PROGRAMS[i % PROGRAMS.len()];
                let name = if i < PROGRAMS.len() {
                    base.to_string()
                } else {
                    format!("{} {}", base, i / PROGRAMS.len() + 1)
                };
                let prestige = self.rng.gen_range(20..=95);
                let mut team = TeamContext::new(name, prestige, state);
                team.recruiting_prestige = (prestige as i32 + self.rng.gen_range(-8..=8)).clamp(1, 100) as u8;
                team.wealth = self.rng.gen_range(20..=95);
                team.alumni_strength = self.rng.gen_range(20..=95);
                team.academic_score = self.rng.gen_range(30..=95);
                team.market_score = self.rng.gen_range(20..=95);
                team.community_score = self.rng.gen_range(30..=95);
                team.coaching_style = match self.rng.gen_range(0..6) {
                    0 => CoachingStyle::PlayerDevelopment,
                    1 => CoachingStyle::UpTempo,
                    2 => CoachingStyle::Defensive,
                    3 => CoachingStyle::StarSystem,
                    4 => CoachingStyle::Academic,
                    _ => CoachingStyle::Balanced,
                };
                team.wins = self.rng.gen_range(5..=28);
                team.losses = self.rng.gen_range(3..=22);
                team.returning_underclassmen = self.rng.gen_range(6..=10);
                for position in Position::ALL {
                    team.positional_depth.insert(position, self.rng.gen_range(0..=4));
                }
                team
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecruitValidator;
    use std::collections::BTreeSet;

    #[test]
    fn test_same_seed_same_class() {
        let a = ClassGenerator::new(2024).class(60);
        let b = ClassGenerator::new(2024).class(60);
        assert_eq!(a, b);
        let c = ClassGenerator::new(2025).class(60);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generated_recruits_validate() {
        let class = ClassGenerator::new(7).class(200);
        assert_eq!(class.len(), 200);
        for recruit in &class {
            assert!(RecruitValidator::validate(recruit).is_ok(), "{:?}", recruit.name);
        }
        let ids: BTreeSet<RecruitId> = class.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), class.len());
    }

    #[test]
    fn test_package_links_are_mutual() {
        let class = ClassGenerator::new(99).class(500);
        let linked: Vec<&Recruit> = class.iter().filter(|r| r.is_package_linked()).collect();
        assert!(!linked.is_empty());
        for recruit in linked {
            for link in recruit.package_links() {
                let partner = class.iter().find(|r| r.id == link.linked_id);
                assert!(partner.is_some_and(|p| p.package_links().any(|l| l.linked_id == recruit.id)));
            }
        }
    }

    #[test]
    fn test_league_names_unique() {
        let league = ClassGenerator::new(1).league(30);
        let names: BTreeSet<&str> = league.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 30);
    }
}
