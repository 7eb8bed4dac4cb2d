// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use num_complex::Complex64;

/// Sample storage for literal waveforms.
///
/// Real-valued waveforms are kept as `Float64` to avoid doubling their memory
/// footprint; they are widened to complex only when a consumer asks for it.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericArray {
    Float64(Vec<f64>),
    Complex64(Vec<Complex64>),
}

impl NumericArray {
    pub fn abs_at_index(&self, index: usize) -> Option<f64> {
        match self {
            NumericArray::Float64(vec) => vec.get(index).map(|x| x.abs()),
            NumericArray::Complex64(vec) => vec.get(index).map(|x| x.norm()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NumericArray::Float64(vec) => vec.len(),
            NumericArray::Complex64(vec) => vec.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            NumericArray::Float64(vec) => vec.is_empty(),
            NumericArray::Complex64(vec) => vec.is_empty(),
        }
    }

    /// Largest absolute value, `0.0` for an empty array.
    pub fn max_abs(&self) -> f64 {
        (0..self.len())
            .filter_map(|i| self.abs_at_index(i))
            .fold(0.0, f64::max)
    }

    /// Copy the samples into a complex vector.
    pub fn to_complex(&self) -> Vec<Complex64> {
        match self {
            NumericArray::Float64(vec) => vec.iter().map(|x| Complex64::new(*x, 0.0)).collect(),
            NumericArray::Complex64(vec) => vec.clone(),
        }
    }

    /// Real part of every sample.
    pub fn real(&self) -> Vec<f64> {
        match self {
            NumericArray::Float64(vec) => vec.clone(),
            NumericArray::Complex64(vec) => vec.iter().map(|x| x.re).collect(),
        }
    }
}

impl From<Vec<f64>> for NumericArray {
    fn from(value: Vec<f64>) -> Self {
        NumericArray::Float64(value)
    }
}

impl From<Vec<Complex64>> for NumericArray {
    fn from(value: Vec<Complex64>) -> Self {
        NumericArray::Complex64(value)
    }
}
