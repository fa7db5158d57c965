use crate::config::{CommitmentConfig, CycleConfig};
use crate::tick::TickParams;

/// Fraction of the regular cycle elapsed, 0.0-1.0.
pub fn cycle_progress(cycle: &CycleConfig, week: u16) -> f32 {
    if cycle.cycle_weeks == 0 {
        return 1.0;
    }
    (week as f32 / cycle.cycle_weeks as f32).clamp(0.0, 1.0)
}

/// Urgency that shrinks the commitment gates, 0.0-1.0.
///
/// Grows as `progress^exponent` through the cycle; the signing period adds a
/// flat bonus plus a little more each day.
pub fn decision_pressure(cycle: &CycleConfig, config: &CommitmentConfig, params: &TickParams) -> f32 {
    let progress = cycle_progress(cycle, params.week);
    let mut pressure = progress.powf(config.pressure_exponent.max(0.1));
    if params.is_signing_period {
        pressure += config.signing_pressure_bonus
            + config.signing_pressure_per_day * params.signing_day as f32;
    }
    pressure.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_grows_through_cycle() {
        let cycle = CycleConfig::default();
        let cfg = CommitmentConfig::default();
        let early = decision_pressure(&cycle, &cfg, &TickParams::weekly(1, 2, 2));
        let late = decision_pressure(&cycle, &cfg, &TickParams::weekly(1, 24, 24));
        assert!(early < 0.05);
        assert!(late > 0.8);
        assert_eq!(decision_pressure(&cycle, &cfg, &TickParams::weekly(1, 0, 0)), 0.0);
    }

    #[test]
    fn test_signing_period_saturates() {
        let cycle = CycleConfig::default();
        let cfg = CommitmentConfig::default();
        let params = TickParams::signing(1, 30, 26, 3);
        assert_eq!(decision_pressure(&cycle, &cfg, &params), 1.0);
    }

    #[test]
    fn test_zero_length_cycle() {
        let cycle = CycleConfig { cycle_weeks: 0, ..CycleConfig::default() };
        assert_eq!(cycle_progress(&cycle, 5), 1.0);
    }
}
