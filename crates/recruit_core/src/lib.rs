//! # recruit_core - Deterministic College Recruiting Market
//!
//! Weekly recruiting simulation for a college sports management game:
//! teams build offer boards, recruits score their suitors, narrow to a
//! shortlist and commit, decommit or sign. Linked recruits (twins,
//! siblings, cousins) can move together as package deals.
//!
//! ## Features
//! - 100% deterministic ticks (same state + same params = same next state)
//! - Pure tick function: the prior state is never mutated
//! - Tunable thresholds via YAML config and named presets
//! - JSON state snapshots with a SHA-256 fingerprint for replay checks

// Many scoring helpers take the full recruit/team/context triple
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod commitment;
pub mod config;
pub mod deterministic;
pub mod error;
pub mod generation;
pub mod geo;
pub mod models;
pub mod offers;
pub mod package;
pub mod scoring;
pub mod shortlist;
pub mod tick;
pub mod visits;

pub use error::{RecruitError, Result};

// Components
pub use commitment::{CommitmentEngine, CommitmentReport};
pub use geo::GeoEstimator;
pub use offers::{BoardReport, OfferBoard};
pub use package::{PackageDealResolver, PackageReport};
pub use scoring::{InterestModel, InterestScorer, ScoreBreakdown, ScoringContext};
pub use shortlist::{Shortlist, ShortlistAllocator};

// Tick driver
pub use tick::{NewsItem, NewsKind, RecruitingState, TeamCounters, TickDriver, TickOutcome, TickParams};
pub use visits::GameOutcome;

// Data model and configuration
pub use config::RecruitingConfig;
pub use generation::ClassGenerator;
pub use models::{Recruit, RecruitId, RecruitmentStage, TeamContext};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
