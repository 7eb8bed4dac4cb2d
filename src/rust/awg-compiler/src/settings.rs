// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Module for defining settings for the schedule compiler.
use crate::{Error, Result};

/// How a `Delay` interacts with the oscillator phase reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelayPhasePolicy {
    /// Delays emit zeros and leave the oscillator untouched. The phase
    /// reference of a following `Play` does not account for the delay.
    #[default]
    Hold,
    /// Delays advance the oscillator phase by the elapsed time, so the carrier
    /// phase always tracks the absolute sample clock.
    Advance,
}

#[derive(Debug, Clone)]
pub struct CompilerSettings {
    sample_rate: f64,
    pub validate_schedule: bool,
    pub delay_phase_policy: DelayPhasePolicy,
}

impl CompilerSettings {
    pub fn new(sample_rate: f64) -> Self {
        CompilerSettings {
            sample_rate,
            validate_schedule: true,
            delay_phase_policy: DelayPhasePolicy::default(),
        }
    }

    pub fn with_validation(mut self, validate_schedule: bool) -> Self {
        self.validate_schedule = validate_schedule;
        self
    }

    pub fn with_delay_phase_policy(mut self, policy: DelayPhasePolicy) -> Self {
        self.delay_phase_policy = policy;
        self
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            let msg = format!(
                "Sample rate must be a positive finite number, got {}",
                self.sample_rate
            );
            return Err(Error::new(&msg));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CompilerSettings::new(2e9);
        assert_eq!(settings.sample_rate(), 2e9);
        assert!(settings.validate_schedule);
        assert_eq!(settings.delay_phase_policy, DelayPhasePolicy::Hold);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let settings = CompilerSettings::new(1e9)
            .with_validation(false)
            .with_delay_phase_policy(DelayPhasePolicy::Advance);
        assert!(!settings.validate_schedule);
        assert_eq!(settings.delay_phase_policy, DelayPhasePolicy::Advance);
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(CompilerSettings::new(0.0).validate().is_err());
        assert!(CompilerSettings::new(-1e9).validate().is_err());
        assert!(CompilerSettings::new(f64::NAN).validate().is_err());
        assert!(CompilerSettings::new(f64::INFINITY).validate().is_err());
    }
}
