//! Entity construction and validation.
//!
//! Hosts hand recruits over as loosely typed records (generator output, save
//! rows). Conversion parses every enum up front so an unknown value fails here
//! and never reaches the scorer.

use serde::{Deserialize, Serialize};

use super::recruit::*;
use super::team::GeoPoint;
use crate::error::{RecruitError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub kind: String,
    pub linked_id: RecruitId,
    #[serde(default)]
    pub package_deal: bool,
}

/// Host-facing recruit record with string-typed enums.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecruitRecord {
    pub id: RecruitId,
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub secondary_position: Option<String>,
    pub stars: u8,
    pub overall: u8,
    pub potential: u8,
    #[serde(default)]
    pub motivations: Option<Motivations>,
    pub archetype: String,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub nil_priority: Option<String>,
    #[serde(default)]
    pub dealbreaker: Option<String>,
    #[serde(default)]
    pub decision_style: Option<String>,
    #[serde(default)]
    pub commitment_style: Option<String>,
    #[serde(default)]
    pub fit_strictness: Option<u8>,
    #[serde(default)]
    pub resilience: Option<u8>,
    #[serde(default)]
    pub targets: Option<AttributeTargets>,
    pub home_state: String,
    #[serde(default)]
    pub home_city: String,
    #[serde(default)]
    pub coords: Option<GeoPoint>,
    #[serde(default)]
    pub hype: u8,
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
}

fn parse_opt<T: std::str::FromStr<Err = RecruitError> + Default>(value: &Option<String>) -> Result<T> {
    match value {
        Some(text) => text.parse(),
        None => Ok(T::default()),
    }
}

impl TryFrom<RecruitRecord> for Recruit {
    type Error = RecruitError;

    fn try_from(record: RecruitRecord) -> Result<Self> {
        let position: Position = record.position.parse()?;
        let secondary_position = match &record.secondary_position {
            Some(text) => Some(text.parse::<Position>()?),
            None => None,
        };
        let archetype: Archetype = record.archetype.parse()?;

        let mut relationships = Vec::with_capacity(record.relationships.len());
        for link in &record.relationships {
            relationships.push(RelationshipLink {
                kind: link.kind.parse()?,
                linked_id: link.linked_id,
                package_deal: link.package_deal,
            });
        }

        let mut recruit = Recruit::new(
            record.id,
            record.name,
            position,
            record.stars,
            record.overall,
            record.potential,
            record.home_state,
        );
        // Keep raw values so the validator sees what the host sent.
        recruit.stars = record.stars;
        recruit.overall = record.overall;
        recruit.potential = record.potential;
        recruit.secondary_position = secondary_position;
        recruit.motivations = record.motivations.unwrap_or_default();
        recruit.archetype = archetype;
        recruit.personality = parse_opt(&record.personality)?;
        recruit.nil_priority = parse_opt(&record.nil_priority)?;
        recruit.dealbreaker = parse_opt(&record.dealbreaker)?;
        recruit.decision_style = parse_opt(&record.decision_style)?;
        recruit.commitment_style = parse_opt(&record.commitment_style)?;
        recruit.fit_strictness = record.fit_strictness.unwrap_or(50);
        recruit.resilience = record.resilience.unwrap_or(50);
        recruit.targets = record.targets.unwrap_or_default();
        recruit.home_city = record.home_city;
        recruit.coords = record.coords;
        recruit.hype = record.hype;
        recruit.relationships = relationships;

        RecruitValidator::validate(&recruit)?;
        Ok(recruit)
    }
}

/// Recruit validation utility
pub struct RecruitValidator;

impl RecruitValidator {
    pub fn validate(recruit: &Recruit) -> Result<()> {
        if recruit.name.trim().is_empty() {
            return Err(RecruitError::InvalidRecord(format!(
                "recruit {} has an empty name",
                recruit.id
            )));
        }
        if recruit.home_state.trim().is_empty() {
            return Err(RecruitError::InvalidRecord(format!(
                "recruit {} has no home state",
                recruit.id
            )));
        }

        Self::check_range("stars", recruit.stars as i64, 1, 5)?;
        Self::check_range("overall", recruit.overall as i64, 0, 100)?;
        Self::check_range("potential", recruit.potential as i64, 0, 100)?;
        if recruit.potential < recruit.overall {
            return Err(RecruitError::InvalidRecord(format!(
                "recruit {}: potential ({}) below overall ({})",
                recruit.id, recruit.potential, recruit.overall
            )));
        }

        for (name, value) in recruit.motivations.as_array() {
            Self::check_range(name, value as i64, 0, 100)?;
        }
        Self::check_range("fit_strictness", recruit.fit_strictness as i64, 0, 100)?;
        Self::check_range("resilience", recruit.resilience as i64, 0, 100)?;
        Self::check_range("hype", recruit.hype as i64, 0, 100)?;

        for value in recruit.momentum.values() {
            Self::check_range(
                "momentum",
                *value as i64,
                MOMENTUM_MIN as i64,
                MOMENTUM_MAX as i64,
            )?;
        }

        for link in &recruit.relationships {
            if link.linked_id == recruit.id {
                return Err(RecruitError::InvalidLink { recruit: recruit.id, linked: link.linked_id });
            }
        }

        if let (Some(team), Some(pending)) = (&recruit.committed_team, &recruit.pending) {
            if &pending.team != team {
                log::warn!(
                    "recruit {} committed to {} but pending with {}; commitment wins",
                    recruit.id,
                    team,
                    pending.team
                );
            }
        }

        Ok(())
    }

    fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
        if value < min || value > max {
            return Err(RecruitError::out_of_range(field, value, min, max));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RecruitRecord {
        RecruitRecord {
            id: 7,
            name: "Marcus Bell".into(),
            position: "PF".into(),
            stars: 3,
            overall: 70,
            potential: 82,
            archetype: "FameSeeker".into(),
            home_state: "GA".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_record_defaults_neutral() {
        let recruit = Recruit::try_from(record()).unwrap();
        assert_eq!(recruit.position, Position::PF);
        assert_eq!(recruit.archetype, Archetype::FameSeeker);
        assert_eq!(recruit.dealbreaker, Dealbreaker::None);
        assert_eq!(recruit.motivations.relationship, 50);
        assert_eq!(recruit.fit_strictness, 50);
    }

    #[test]
    fn test_invalid_enum_fails_fast() {
        let mut rec = record();
        rec.dealbreaker = Some("Weather".into());
        let err = Recruit::try_from(rec).unwrap_err();
        assert!(matches!(err, RecruitError::InvalidEnum { field: "dealbreaker", .. }));
    }

    #[test]
    fn test_invalid_relationship_kind() {
        let mut rec = record();
        rec.relationships.push(RelationshipRecord {
            kind: "Roommate".into(),
            linked_id: 8,
            package_deal: true,
        });
        assert!(Recruit::try_from(rec).is_err());
    }

    #[test]
    fn test_star_rating_out_of_range() {
        let mut rec = record();
        rec.stars = 6;
        let err = Recruit::try_from(rec).unwrap_err();
        assert!(matches!(err, RecruitError::OutOfRange { field: "stars", .. }));
    }

    #[test]
    fn test_self_link_rejected() {
        let mut rec = record();
        rec.relationships.push(RelationshipRecord {
            kind: "Twin".into(),
            linked_id: 7,
            package_deal: true,
        });
        assert!(matches!(Recruit::try_from(rec), Err(RecruitError::InvalidLink { .. })));
    }

    #[test]
    fn test_potential_below_overall_rejected() {
        let mut recruit = Recruit::try_from(record()).unwrap();
        recruit.potential = 60;
        assert!(RecruitValidator::validate(&recruit).is_err());
    }
}
