// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use num_complex::Complex64;
use numeric_array::NumericArray;

use crate::Samples;

/// A pulse played on a virtual channel.
///
/// If [`Pulse::Symbolic`] is used, the envelope is derived from a named shape
/// and its parameters when the schedule is compiled.
/// If [`Pulse::Waveform`] is used, the envelope is the stored samples.
#[derive(Debug, Clone, PartialEq)]
pub enum Pulse {
    Symbolic(SymbolicPulse),
    Waveform(Waveform),
}

impl Pulse {
    pub fn duration(&self) -> Samples {
        match self {
            Pulse::Symbolic(pulse) => pulse.duration,
            Pulse::Waveform(waveform) => waveform.duration(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Pulse::Symbolic(pulse) => pulse.name.as_deref(),
            Pulse::Waveform(waveform) => waveform.name.as_deref(),
        }
    }
}

impl From<SymbolicPulse> for Pulse {
    fn from(value: SymbolicPulse) -> Self {
        Pulse::Symbolic(value)
    }
}

impl From<Waveform> for Pulse {
    fn from(value: Waveform) -> Self {
        Pulse::Waveform(value)
    }
}

/// Parametric pulse, identified by the name of its shape.
///
/// The shape is not evaluated here; which shapes exist is decided by the
/// consumer that samples the envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolicPulse {
    pub pulse_type: String,
    pub duration: Samples,
    pub parameters: IndexMap<String, f64>,
    pub name: Option<String>,
}

impl SymbolicPulse {
    pub const CONSTANT: &'static str = "Constant";
    pub const GAUSSIAN: &'static str = "Gaussian";
    pub const GAUSSIAN_SQUARE: &'static str = "GaussianSquare";
    pub const DRAG: &'static str = "Drag";

    pub fn new(pulse_type: impl Into<String>, duration: Samples) -> Self {
        SymbolicPulse {
            pulse_type: pulse_type.into(),
            duration,
            parameters: IndexMap::new(),
            name: None,
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).copied()
    }

    pub fn constant(duration: Samples, amp: f64, angle: f64) -> Self {
        SymbolicPulse::new(Self::CONSTANT, duration)
            .with_parameter("amp", amp)
            .with_parameter("angle", angle)
    }

    pub fn gaussian(duration: Samples, amp: f64, sigma: f64, angle: f64) -> Self {
        SymbolicPulse::new(Self::GAUSSIAN, duration)
            .with_parameter("amp", amp)
            .with_parameter("sigma", sigma)
            .with_parameter("angle", angle)
    }

    pub fn gaussian_square(
        duration: Samples,
        amp: f64,
        sigma: f64,
        width: f64,
        angle: f64,
    ) -> Self {
        SymbolicPulse::new(Self::GAUSSIAN_SQUARE, duration)
            .with_parameter("amp", amp)
            .with_parameter("sigma", sigma)
            .with_parameter("width", width)
            .with_parameter("angle", angle)
    }

    pub fn drag(duration: Samples, amp: f64, sigma: f64, beta: f64, angle: f64) -> Self {
        SymbolicPulse::new(Self::DRAG, duration)
            .with_parameter("amp", amp)
            .with_parameter("sigma", sigma)
            .with_parameter("beta", beta)
            .with_parameter("angle", angle)
    }
}

/// Pulse given by explicit samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: NumericArray,
    pub name: Option<String>,
}

impl Waveform {
    pub fn new(samples: impl Into<NumericArray>) -> Self {
        Waveform {
            samples: samples.into(),
            name: None,
        }
    }

    pub fn from_complex(samples: Vec<Complex64>) -> Self {
        Waveform::new(samples)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn duration(&self) -> Samples {
        self.samples.len() as Samples
    }
}
