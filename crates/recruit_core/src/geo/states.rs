use crate::models::Region;

/// Approximate geographic centre and a radius covering most of the population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateInfo {
    pub code: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub radius_miles: f64,
    pub region: Region,
}

const fn state(code: &'static str, lat: f64, lon: f64, radius_miles: f64, region: Region) -> StateInfo {
    StateInfo { code, lat, lon, radius_miles, region }
}

use Region::*;

pub const STATES: [StateInfo; 51] = [
    state("AL", 32.8, -86.8, 150.0, Southeast),
    state("AK", 64.0, -150.0, 500.0, West),
    state("AZ", 34.2, -111.7, 190.0, Southwest),
    state("AR", 34.9, -92.4, 140.0, Southeast),
    state("CA", 37.2, -119.5, 300.0, West),
    state("CO", 39.0, -105.5, 170.0, West),
    state("CT", 41.6, -72.7, 45.0, Northeast),
    state("DE", 39.0, -75.5, 40.0, Northeast),
    state("DC", 38.9, -77.0, 8.0, Northeast),
    state("FL", 28.6, -82.4, 220.0, Southeast),
    state("GA", 32.7, -83.4, 150.0, Southeast),
    state("HI", 20.8, -156.3, 120.0, West),
    state("ID", 44.4, -114.6, 200.0, West),
    state("IL", 40.0, -89.2, 170.0, Midwest),
    state("IN", 39.9, -86.3, 120.0, Midwest),
    state("IA", 42.1, -93.5, 140.0, Midwest),
    state("KS", 38.5, -98.4, 180.0, Midwest),
    state("KY", 37.5, -85.3, 160.0, Southeast),
    state("LA", 31.1, -92.0, 150.0, Southeast),
    state("ME", 45.4, -69.2, 130.0, Northeast),
    state("MD", 39.0, -76.8, 80.0, Northeast),
    state("MA", 42.3, -71.8, 70.0, Northeast),
    state("MI", 44.3, -85.4, 200.0, Midwest),
    state("MN", 46.3, -94.3, 200.0, Midwest),
    state("MS", 32.7, -89.7, 140.0, Southeast),
    state("MO", 38.4, -92.5, 170.0, Midwest),
    state("MT", 47.0, -109.6, 260.0, West),
    state("NE", 41.5, -99.8, 190.0, Midwest),
    state("NV", 39.3, -116.6, 220.0, West),
    state("NH", 43.7, -71.6, 70.0, Northeast),
    state("NJ", 40.2, -74.7, 60.0, Northeast),
    state("NM", 34.4, -106.1, 190.0, Southwest),
    state("NY", 42.9, -75.5, 170.0, Northeast),
    state("NC", 35.6, -79.4, 170.0, Southeast),
    state("ND", 47.5, -100.5, 160.0, Midwest),
    state("OH", 40.3, -82.8, 130.0, Midwest),
    state("OK", 35.6, -97.5, 170.0, Southwest),
    state("OR", 43.9, -120.6, 190.0, West),
    state("PA", 40.9, -77.8, 150.0, Northeast),
    state("RI", 41.7, -71.5, 25.0, Northeast),
    state("SC", 33.9, -80.9, 120.0, Southeast),
    state("SD", 44.4, -100.2, 170.0, Midwest),
    state("TN", 35.9, -86.4, 160.0, Southeast),
    state("TX", 31.5, -99.3, 350.0, Southwest),
    state("UT", 39.3, -111.7, 160.0, West),
    state("VT", 44.1, -72.7, 60.0, Northeast),
    state("VA", 37.5, -78.9, 150.0, Southeast),
    state("WA", 47.4, -120.5, 170.0, West),
    state("WV", 38.6, -80.6, 100.0, Southeast),
    state("WI", 44.6, -89.9, 160.0, Midwest),
    state("WY", 43.0, -107.5, 180.0, West),
];

/// Case-insensitive lookup by postal code.
pub fn lookup_state(code: &str) -> Option<&'static StateInfo> {
    let code = code.trim();
    STATES.iter().find(|s| s.code.eq_ignore_ascii_case(code))
}
