// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Envelope extraction for schedule pulses.
//!
//! Symbolic pulses are sampled at pulse-relative times `k + 0.5`, i.e. at the
//! middle of each sample interval. Gaussian flanks are lifted so that they
//! reach zero one sample outside the pulse.

use num_complex::Complex64;
use pulse_schedule::{Pulse, SymbolicPulse};

use crate::{Error, Result};

/// Complex baseband envelope of `pulse`, one value per sample of its duration.
pub fn get_envelope(pulse: &Pulse) -> Result<Vec<Complex64>> {
    match pulse {
        Pulse::Waveform(waveform) => Ok(waveform.samples.to_complex()),
        Pulse::Symbolic(pulse) => sample_symbolic(pulse),
    }
}

fn sample_symbolic(pulse: &SymbolicPulse) -> Result<Vec<Complex64>> {
    let shape: fn(&SymbolicPulse) -> Result<Vec<f64>> = match pulse.pulse_type.as_str() {
        SymbolicPulse::CONSTANT => constant,
        SymbolicPulse::GAUSSIAN => gaussian,
        SymbolicPulse::GAUSSIAN_SQUARE => gaussian_square,
        SymbolicPulse::DRAG => return drag(pulse),
        _ => {
            return Err(Error::UnrecognizedPulseKind {
                pulse_type: pulse.pulse_type.clone(),
            });
        }
    };
    let amplitude = complex_amplitude(pulse)?;
    Ok(shape(pulse)?.into_iter().map(|x| amplitude * x).collect())
}

fn required(pulse: &SymbolicPulse, parameter: &str) -> Result<f64> {
    pulse
        .parameter(parameter)
        .ok_or_else(|| Error::MissingPulseParameter {
            pulse_type: pulse.pulse_type.clone(),
            parameter: parameter.to_string(),
        })
}

fn invalid(pulse: &SymbolicPulse, parameter: &str, reason: String) -> Error {
    Error::InvalidPulseParameter {
        pulse_type: pulse.pulse_type.clone(),
        parameter: parameter.to_string(),
        reason,
    }
}

fn complex_amplitude(pulse: &SymbolicPulse) -> Result<Complex64> {
    let amp = required(pulse, "amp")?;
    let angle = pulse.parameter("angle").unwrap_or(0.0);
    Ok(Complex64::from_polar(amp, angle))
}

fn positive_sigma(pulse: &SymbolicPulse) -> Result<f64> {
    let sigma = required(pulse, "sigma")?;
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(invalid(pulse, "sigma", format!("must be positive, got {sigma}")));
    }
    Ok(sigma)
}

fn sample_times(pulse: &SymbolicPulse) -> impl Iterator<Item = f64> {
    (0..pulse.duration).map(|k| k as f64 + 0.5)
}

fn gauss(x: f64, center: f64, sigma: f64) -> f64 {
    let t = (x - center) / sigma;
    (-0.5 * t * t).exp()
}

/// Gaussian around `center`, shifted and rescaled so that it is zero at
/// distance `zero_distance` from the center and one at the center.
struct LiftedGaussian {
    center: f64,
    sigma: f64,
    offset: f64,
}

impl LiftedGaussian {
    fn new(center: f64, sigma: f64, zero_distance: f64) -> Self {
        LiftedGaussian {
            center,
            sigma,
            offset: gauss(center + zero_distance, center, sigma),
        }
    }

    fn value(&self, x: f64) -> f64 {
        (gauss(x, self.center, self.sigma) - self.offset) / (1.0 - self.offset)
    }

    /// Slope term used by the Drag quadrature, scaled by the lifted value.
    fn derivative(&self, x: f64) -> f64 {
        -(x - self.center) / (self.sigma * self.sigma) * self.value(x)
    }
}

fn constant(pulse: &SymbolicPulse) -> Result<Vec<f64>> {
    Ok(vec![1.0; pulse.duration as usize])
}

fn gaussian(pulse: &SymbolicPulse) -> Result<Vec<f64>> {
    let sigma = positive_sigma(pulse)?;
    let center = pulse.duration as f64 / 2.0;
    let shape = LiftedGaussian::new(center, sigma, center + 1.0);
    Ok(sample_times(pulse).map(|x| shape.value(x)).collect())
}

fn gaussian_square(pulse: &SymbolicPulse) -> Result<Vec<f64>> {
    let sigma = positive_sigma(pulse)?;
    let width = required(pulse, "width")?;
    let duration = pulse.duration as f64;
    if !(0.0..=duration).contains(&width) {
        return Err(invalid(
            pulse,
            "width",
            format!("must be within [0, {duration}], got {width}"),
        ));
    }
    let rise_center = (duration - width) / 2.0;
    let fall_center = (duration + width) / 2.0;
    let rise = LiftedGaussian::new(rise_center, sigma, rise_center + 1.0);
    let fall = LiftedGaussian::new(fall_center, sigma, rise_center + 1.0);
    Ok(sample_times(pulse)
        .map(|x| {
            if x < rise_center {
                rise.value(x)
            } else if x > fall_center {
                fall.value(x)
            } else {
                1.0
            }
        })
        .collect())
}

fn drag(pulse: &SymbolicPulse) -> Result<Vec<Complex64>> {
    let amplitude = complex_amplitude(pulse)?;
    let sigma = positive_sigma(pulse)?;
    let beta = required(pulse, "beta")?;
    let center = pulse.duration as f64 / 2.0;
    let shape = LiftedGaussian::new(center, sigma, center + 1.0);
    Ok(sample_times(pulse)
        .map(|x| amplitude * Complex64::new(shape.value(x), beta * shape.derivative(x)))
        .collect())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use pulse_schedule::Waveform;

    use super::*;

    #[test]
    fn test_waveform_envelope() {
        let pulse = Pulse::from(Waveform::new(vec![0.0, 0.5, -1.0]));
        let envelope = get_envelope(&pulse).unwrap();
        assert_eq!(
            envelope,
            vec![
                Complex64::new(0.0, 0.0),
                Complex64::new(0.5, 0.0),
                Complex64::new(-1.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_constant_envelope() {
        let pulse = Pulse::from(SymbolicPulse::constant(4, 1.0, 0.0));
        let envelope = get_envelope(&pulse).unwrap();
        assert_eq!(envelope, vec![Complex64::new(1.0, 0.0); 4]);

        let pulse = Pulse::from(SymbolicPulse::constant(2, 0.5, std::f64::consts::FRAC_PI_2));
        let envelope = get_envelope(&pulse).unwrap();
        assert_abs_diff_eq!(envelope[1], Complex64::new(0.0, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_gaussian_envelope() {
        let pulse = Pulse::from(SymbolicPulse::gaussian(200, 0.1, 20.0, 0.0));
        let envelope = get_envelope(&pulse).unwrap();
        assert_eq!(envelope.len(), 200);
        // Symmetric around the center, real-valued, bounded by the amplitude
        for (value, mirrored) in envelope.iter().zip(envelope.iter().rev()) {
            assert_abs_diff_eq!(*value, *mirrored, epsilon = 1e-12);
            assert_eq!(value.im, 0.0);
        }
        let peak = envelope.iter().map(|x| x.re).fold(0.0, f64::max);
        assert!(peak <= 0.1 && peak > 0.0999);
        assert!(envelope[0].re > 0.0 && envelope[0].re < 1e-4);
    }

    #[test]
    fn test_gaussian_square_envelope() {
        let pulse = Pulse::from(SymbolicPulse::gaussian_square(100, 1.0, 5.0, 60.0, 0.0));
        let envelope = get_envelope(&pulse).unwrap();
        assert_eq!(envelope.len(), 100);
        for value in &envelope[20..80] {
            assert_eq!(*value, Complex64::new(1.0, 0.0));
        }
        assert!(envelope[0].re < 0.01);
        assert!(envelope[10].re < envelope[19].re);
        assert_abs_diff_eq!(envelope[5], envelope[94], epsilon = 1e-12);
    }

    #[test]
    fn test_drag_envelope() {
        let pulse = Pulse::from(SymbolicPulse::drag(64, 0.2, 8.0, 0.5, 0.0));
        let envelope = get_envelope(&pulse).unwrap();
        let reference =
            get_envelope(&Pulse::from(SymbolicPulse::gaussian(64, 0.2, 8.0, 0.0))).unwrap();
        for (drag, gauss) in envelope.iter().zip(&reference) {
            assert_abs_diff_eq!(drag.re, gauss.re, epsilon = 1e-12);
        }
        // Quadrature component is the antisymmetric derivative
        assert!(envelope[10].im > 0.0);
        assert!(envelope[53].im < 0.0);
        assert_abs_diff_eq!(envelope[10].im, -envelope[53].im, epsilon = 1e-12);
    }

    #[test]
    fn test_drag_quadrature_follows_lifted_gaussian() {
        // With a wide sigma the lift dominates the flanks
        let (duration, sigma, beta) = (20, 40.0, 0.7);
        let pulse = Pulse::from(SymbolicPulse::drag(duration, 1.0, sigma, beta, 0.0));
        let envelope = get_envelope(&pulse).unwrap();
        let center = duration as f64 / 2.0;
        for (k, value) in envelope.iter().enumerate() {
            let x = k as f64 + 0.5;
            let expected = beta * -(x - center) / (sigma * sigma) * value.re;
            assert_abs_diff_eq!(value.im, expected, epsilon = 1e-12);
        }
        // Far from the unlifted Gaussian at the edges
        assert!(envelope[0].re > 0.2 && envelope[0].re < 0.3);
    }

    #[test]
    fn test_unrecognized_pulse_kind() {
        let pulse = Pulse::from(SymbolicPulse::new("Sech", 10).with_parameter("amp", 1.0));
        let err = get_envelope(&pulse).unwrap_err();
        assert!(matches!(
            err,
            Error::UnrecognizedPulseKind { ref pulse_type } if pulse_type == "Sech"
        ));
    }

    #[test]
    fn test_missing_and_invalid_parameters() {
        let pulse =
            Pulse::from(SymbolicPulse::new(SymbolicPulse::GAUSSIAN, 10).with_parameter("amp", 1.0));
        let err = get_envelope(&pulse).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingPulseParameter { ref parameter, .. } if parameter == "sigma"
        ));

        let pulse = Pulse::from(SymbolicPulse::gaussian(10, 1.0, 0.0, 0.0));
        assert!(matches!(
            get_envelope(&pulse).unwrap_err(),
            Error::InvalidPulseParameter { .. }
        ));

        let pulse = Pulse::from(SymbolicPulse::gaussian_square(10, 1.0, 2.0, 12.0, 0.0));
        assert!(matches!(
            get_envelope(&pulse).unwrap_err(),
            Error::InvalidPulseParameter { ref parameter, .. } if parameter == "width"
        ));
    }
}
