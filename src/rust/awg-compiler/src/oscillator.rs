// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use core::f64;

use num_complex::Complex64;

use crate::utils::{complex_exponential, normalize_phase};

/// Software oscillator of a single virtual channel.
///
/// The oscillator has no notion of absolute time: every call to
/// [`Oscillator::modulate`] starts at the current phase and moves the phase
/// forward by the number of produced samples. Consecutive calls at a fixed
/// frequency therefore form one continuous carrier.
///
/// The phase is always kept in `[0, 2π)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    frequency: f64,
    phase: f64,
    sample_rate: f64,
}

impl Oscillator {
    pub fn new(sample_rate: f64) -> Self {
        Oscillator {
            frequency: 0.0,
            phase: 0.0,
            sample_rate,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn shift_frequency(&mut self, delta: f64) {
        self.frequency += delta;
    }

    pub fn set_phase(&mut self, phase: f64) {
        self.phase = normalize_phase(phase);
    }

    pub fn shift_phase(&mut self, delta: f64) {
        self.phase = normalize_phase(self.phase + delta);
    }

    /// Produce `length` samples of `exp(-i·(ω·t + phase))` and advance the phase.
    pub fn modulate(&mut self, length: usize) -> Vec<Complex64> {
        let modulation =
            complex_exponential(self.frequency, self.phase, length, self.sample_rate, -1.0);
        self.advance(length);
        modulation
    }

    /// Advance the phase by `length` samples without producing output.
    pub fn advance(&mut self, length: usize) {
        let omega = 2.0 * f64::consts::PI * self.frequency;
        self.phase = normalize_phase(self.phase + omega * length as f64 / self.sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_zero_frequency_identity() {
        let mut osc = Oscillator::new(2e9);
        let modulation = osc.modulate(16);
        assert_eq!(modulation.len(), 16);
        assert!(modulation.iter().all(|x| *x == Complex64::new(1.0, 0.0)));
        assert_eq!(osc.phase(), 0.0);
    }

    #[test]
    fn test_modulation_values() {
        let sample_rate = 2e9;
        let mut osc = Oscillator::new(sample_rate);
        osc.set_frequency(100e6);
        osc.set_phase(0.3);
        let modulation = osc.modulate(8);
        for (k, value) in modulation.iter().enumerate() {
            let angle = 2.0 * f64::consts::PI * 100e6 * k as f64 / sample_rate + 0.3;
            assert_abs_diff_eq!(*value, Complex64::new(angle.cos(), -angle.sin()), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_phase_advances_with_samples() {
        let mut osc = Oscillator::new(1e9);
        osc.set_frequency(125e6);
        osc.modulate(2);
        // 2 samples at 125 MHz / 1 GS/s: an eighth turn each
        assert_abs_diff_eq!(osc.phase(), f64::consts::PI / 2.0, epsilon = 1e-12);
        osc.advance(2);
        assert_abs_diff_eq!(osc.phase(), f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_consecutive_calls_are_continuous() {
        let mut split = Oscillator::new(2.4e9);
        split.set_frequency(-73.5e6);
        split.set_phase(1.1);
        let mut whole = split.clone();

        let mut joined = split.modulate(37);
        joined.extend(split.modulate(55));
        let reference = whole.modulate(92);
        assert_eq!(joined.len(), reference.len());
        for (a, b) in joined.iter().zip(reference.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_phase_updates_are_wrapped() {
        let mut osc = Oscillator::new(1e9);
        osc.set_phase(-f64::consts::PI);
        assert_abs_diff_eq!(osc.phase(), f64::consts::PI, epsilon = 1e-12);
        osc.shift_phase(f64::consts::PI);
        assert_abs_diff_eq!(osc.phase(), 0.0, epsilon = 1e-12);
        osc.set_frequency(10e6);
        osc.shift_frequency(-2.5e6);
        assert_eq!(osc.frequency(), 7.5e6);
    }

    #[test]
    fn test_huge_phase_updates_stay_wrapped() {
        let mut osc = Oscillator::new(2e9);
        osc.shift_phase(-1e20);
        assert!((0.0..2.0 * f64::consts::PI).contains(&osc.phase()));
        osc.set_phase(1e20);
        assert!((0.0..2.0 * f64::consts::PI).contains(&osc.phase()));
        osc.set_phase(f64::NEG_INFINITY);
        assert_eq!(osc.phase(), 0.0);
    }
}
