use crate::config::PackageConfig;
use crate::deterministic::{deterministic_f32, subcase, STABLE_TICK};
use crate::models::{Archetype, PersonalityTrait, Recruit, RelationshipType};

/// How much a member wants to stay with the group, roughly 0-0.35.
///
/// Keyed on the stable tick so a recruit's disposition never drifts.
pub fn disposition(config: &PackageConfig, seed: u64, member: &Recruit) -> f32 {
    let jitter = deterministic_f32(
        seed,
        STABLE_TICK,
        member.id,
        "",
        subcase::PACKAGE_DISPOSITION,
        -config.disposition_jitter,
        config.disposition_jitter,
    );
    let mut value = config.disposition_weight * member.motivations.relationship.min(100) as f32 / 100.0 + jitter;
    if member.personality == PersonalityTrait::Independent {
        value -= config.conflict_penalty;
    }
    value
}

pub fn base_strength(config: &PackageConfig, kind: RelationshipType) -> f32 {
    match kind {
        RelationshipType::Twin => config.twin_strength,
        RelationshipType::Sibling => config.sibling_strength,
        RelationshipType::Cousin => config.cousin_strength,
    }
}

/// Talent gap and mercenary streaks pull a pair apart.
pub fn independence_penalty(config: &PackageConfig, a: &Recruit, b: &Recruit) -> f32 {
    let star_gap = a.stars.abs_diff(b.stars) as f32;
    let overall_gap = a.overall.abs_diff(b.overall) as f32;
    let mercenary = a.archetype == Archetype::Mercenary || b.archetype == Archetype::Mercenary;
    star_gap * config.star_gap_penalty
        + overall_gap / 100.0 * config.overall_gap_penalty
        + if mercenary { config.mercenary_penalty } else { 0.0 }
}

/// 0.0-1.0 preference for deciding together.
pub fn package_strength(
    config: &PackageConfig,
    seed: u64,
    a: &Recruit,
    b: &Recruit,
    kind: RelationshipType,
) -> f32 {
    let shared = (disposition(config, seed, a) + disposition(config, seed, b)) / 2.0;
    (base_strength(config, kind) + shared - independence_penalty(config, a, b)).clamp(0.0, 1.0)
}

/// Extra joint score a strong pair earns, growing with decision pressure.
pub fn synergy_bonus(config: &PackageConfig, strength: f32, pressure: f32) -> f32 {
    config.synergy_scale * strength * (0.5 + 0.5 * pressure)
}

/// Score lead a member needs at an outside team before breaking from the pair.
pub fn defection_tolerance(config: &PackageConfig, strength: f32) -> f32 {
    config.defection_tolerance_base + config.defection_tolerance_scale * strength
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn member(id: u32) -> Recruit {
        let mut r = Recruit::new(id, format!("M{}", id), Position::PF, 3, 70, 80, "NC");
        r.motivations.relationship = 50;
        r
    }

    #[test]
    fn test_twins_stronger_than_cousins() {
        let cfg = PackageConfig::default();
        let (a, b) = (member(1), member(2));
        let twin = package_strength(&cfg, 7, &a, &b, RelationshipType::Twin);
        let sibling = package_strength(&cfg, 7, &a, &b, RelationshipType::Sibling);
        let cousin = package_strength(&cfg, 7, &a, &b, RelationshipType::Cousin);
        assert!(twin > sibling && sibling > cousin);
    }

    #[test]
    fn test_asymmetry_weakens_bond() {
        let cfg = PackageConfig::default();
        let a = member(1);
        let mut b = member(2);
        let even = package_strength(&cfg, 7, &a, &b, RelationshipType::Twin);
        b.stars = 5;
        b.overall = 95;
        b.archetype = Archetype::Mercenary;
        let uneven = package_strength(&cfg, 7, &a, &b, RelationshipType::Twin);
        assert!(even - uneven > 0.2);
    }

    #[test]
    fn test_independent_trait_lowers_disposition() {
        let cfg = PackageConfig::default();
        let a = member(1);
        let mut b = a.clone();
        b.personality = PersonalityTrait::Independent;
        let diff = disposition(&cfg, 3, &a) - disposition(&cfg, 3, &b);
        assert!((diff - cfg.conflict_penalty).abs() < 1e-6);
    }

    #[test]
    fn test_strength_is_stable_across_calls() {
        let cfg = PackageConfig::default();
        let (a, b) = (member(1), member(2));
        assert_eq!(
            package_strength(&cfg, 11, &a, &b, RelationshipType::Cousin),
            package_strength(&cfg, 11, &a, &b, RelationshipType::Cousin)
        );
    }
}
