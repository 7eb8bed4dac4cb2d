// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use core::f64;

use num_complex::Complex64;

/// Wrap a phase into `[0, 2π)`. `NaN` and infinite values map to `0.0`.
pub fn normalize_phase(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let out = value.rem_euclid(f64::consts::TAU);
    // Tiny negative inputs round up to exactly 2π
    if out >= f64::consts::TAU { 0.0 } else { out }
}

/// Samples of `exp(sign·i·(2π·frequency·k/sample_rate + phase))` for `k = 0..length`.
pub(crate) fn complex_exponential(
    frequency: f64,
    phase: f64,
    length: usize,
    sample_rate: f64,
    sign: f64,
) -> Vec<Complex64> {
    let omega = 2.0 * f64::consts::PI * frequency;
    (0..length)
        .map(|k| {
            let t = k as f64 / sample_rate;
            Complex64::from_polar(1.0, sign * (omega * t + phase))
        })
        .collect()
}

/// Element-wise product of two equally long sequences.
pub(crate) fn multiply(lhs: &[Complex64], rhs: &[Complex64]) -> Vec<Complex64> {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.iter().zip(rhs).map(|(a, b)| a * b).collect()
}
