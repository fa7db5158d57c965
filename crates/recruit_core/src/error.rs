use thiserror::Error;

use crate::models::RecruitId;

#[derive(Error, Debug)]
pub enum RecruitError {
    #[error("Invalid {field}: {value}")]
    InvalidEnum { field: &'static str, value: String },

    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange { field: &'static str, value: i64, min: i64, max: i64 },

    #[error("Invalid recruit record: {0}")]
    InvalidRecord(String),

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Unknown recruit: {0}")]
    UnknownRecruit(RecruitId),

    #[error("Invalid relationship link: {recruit} -> {linked}")]
    InvalidLink { recruit: RecruitId, linked: RecruitId },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RecruitError {
    pub fn invalid_enum(field: &'static str, value: &str) -> Self {
        RecruitError::InvalidEnum { field, value: value.to_string() }
    }

    pub fn out_of_range(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        RecruitError::OutOfRange { field, value, min, max }
    }

    /// Whether the host can retry after fixing its input without discarding state.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RecruitError::Io(_) => true,
            RecruitError::Config(_) => true,
            RecruitError::Yaml(_) => true,
            RecruitError::UnknownTeam(_) => true,
            RecruitError::UnknownRecruit(_) => true,
            RecruitError::InvalidEnum { .. } => false,
            RecruitError::OutOfRange { .. } => false,
            RecruitError::InvalidRecord(_) => false,
            RecruitError::InvalidLink { .. } => false,
            RecruitError::Serialization(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecruitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = RecruitError::invalid_enum("archetype", "Wizard");
        assert_eq!(err.to_string(), "Invalid archetype: Wizard");

        let err = RecruitError::out_of_range("stars", 7, 1, 5);
        assert_eq!(err.to_string(), "stars out of range: 7 (expected 1..=5)");
    }

    #[test]
    fn test_recoverability() {
        assert!(RecruitError::Config("bad".into()).is_recoverable());
        assert!(!RecruitError::invalid_enum("stage", "Done").is_recoverable());
        assert!(!RecruitError::InvalidLink { recruit: 1, linked: 1 }.is_recoverable());
    }
}
