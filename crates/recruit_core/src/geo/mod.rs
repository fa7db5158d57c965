//! Recruit-to-team distance estimation.
//!
//! Hosts rarely know exact coordinates, so every location resolves in order:
//! 1. explicit coordinates,
//! 2. a stable pseudo-location jittered around the state centroid,
//! 3. a region-pair distance band.
//!
//! All jitter is hashed from stable keys, so a (recruit, team) pair always
//! gets the same distance.

mod states;

pub use states::{lookup_state, StateInfo, STATES};

use crate::deterministic::{deterministic_unit, subcase, STABLE_TICK};
use crate::models::{GeoPoint, Recruit, RecruitId, Region, TeamContext};

const EARTH_RADIUS_MILES: f64 = 3958.8;
const MILES_PER_DEGREE_LAT: f64 = 69.0;

/// Where a recruit or team is.
#[derive(Debug, Clone, Copy)]
pub struct GeoOrigin<'a> {
    pub state: &'a str,
    pub coords: Option<GeoPoint>,
    pub region: Option<Region>,
}

impl<'a> GeoOrigin<'a> {
    pub fn of_recruit(recruit: &'a Recruit) -> Self {
        Self { state: &recruit.home_state, coords: recruit.coords, region: None }
    }

    pub fn of_team(team: &'a TeamContext) -> Self {
        Self { state: &team.home_state, coords: team.coords, region: team.region }
    }

    /// Explicit region, else the state table's.
    pub fn resolved_region(&self) -> Option<Region> {
        self.region.or_else(|| lookup_state(self.state).map(|s| s.region))
    }
}

/// Hash key for the jitter: the pair being measured plus the world seed.
#[derive(Debug, Clone, Copy)]
pub struct GeoKey<'a> {
    pub seed: u64,
    pub recruit_id: RecruitId,
    pub team: &'a str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeoEstimator;

impl GeoEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Road miles between a recruit's home and a campus.
    pub fn recruit_to_team(&self, seed: u64, recruit: &Recruit, team: &TeamContext) -> f32 {
        let key = GeoKey { seed, recruit_id: recruit.id, team: &team.name };
        self.estimate_distance(&GeoOrigin::of_recruit(recruit), &GeoOrigin::of_team(team), &key)
    }

    pub fn estimate_distance(&self, recruit: &GeoOrigin, team: &GeoOrigin, key: &GeoKey) -> f32 {
        let same_state = recruit.state.eq_ignore_ascii_case(team.state);

        let recruit_point = self.resolve_point(recruit, key.seed, key.recruit_id, "");
        let team_point = self.resolve_point(team, key.seed, 0, key.team);

        let (Some(a), Some(b)) = (recruit_point, team_point) else {
            return self.region_band_distance(recruit, team, key, same_state);
        };

        let straight = haversine_miles(a, b);
        let inflated = straight * road_inflation(straight, same_state);

        let miles = if same_state {
            let radius = lookup_state(recruit.state).map(|s| s.radius_miles).unwrap_or(150.0);
            inflated.clamp(5.0, (radius * 2.6).max(30.0))
        } else {
            inflated.max(5.0)
        };
        miles as f32
    }

    /// Coordinates if known, otherwise a hashed point within the state's radius.
    fn resolve_point(&self, origin: &GeoOrigin, seed: u64, recruit: RecruitId, team: &str) -> Option<GeoPoint> {
        if let Some(point) = origin.coords {
            return Some(point);
        }
        let state = lookup_state(origin.state)?;

        let angle = deterministic_unit(seed, STABLE_TICK, recruit, team, subcase::GEO_ANGLE)
            * std::f64::consts::TAU;
        // sqrt keeps the points uniform over the disc instead of bunched at the centre
        let radius = deterministic_unit(seed, STABLE_TICK, recruit, team, subcase::GEO_RADIUS).sqrt()
            * state.radius_miles;

        let d_lat = radius * angle.sin() / MILES_PER_DEGREE_LAT;
        let lon_scale = MILES_PER_DEGREE_LAT * state.lat.to_radians().cos().max(0.2);
        let d_lon = radius * angle.cos() / lon_scale;
        Some(GeoPoint::new(state.lat + d_lat, state.lon + d_lon))
    }

    fn region_band_distance(
        &self,
        recruit: &GeoOrigin,
        team: &GeoOrigin,
        key: &GeoKey,
        same_state: bool,
    ) -> f32 {
        let (low, high) = if same_state {
            (25.0, 150.0)
        } else {
            match (recruit.resolved_region(), team.resolved_region()) {
                (Some(a), Some(b)) if a == b => (300.0, 700.0),
                (Some(a), Some(b)) if a.is_adjacent(b) => (600.0, 1200.0),
                (Some(_), Some(_)) => (1200.0, 2400.0),
                _ => (800.0, 1600.0),
            }
        };
        let t = deterministic_unit(key.seed, STABLE_TICK, key.recruit_id, key.team, subcase::GEO_REGION_BAND);
        (low + (high - low) * t) as f32
    }
}

/// Great-circle distance in miles.
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().min(1.0).asin()
}

/// Roads are never straight; short in-state trips wind more than interstate runs.
fn road_inflation(straight_miles: f64, same_state: bool) -> f64 {
    if same_state {
        1.18 + 0.10 * (straight_miles / 400.0).min(1.0)
    } else {
        1.12 + 0.10 * (straight_miles / 1500.0).min(1.0)
    }
}
