// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Physical output channels and the mapping of virtual channels onto them.

use std::borrow::Borrow;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use indexmap::IndexMap;
use num_complex::Complex64;
use pulse_schedule::VirtualChannel;

use crate::compiler::CompiledProgram;
use crate::utils::{complex_exponential, multiply};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkUid(Arc<String>);

impl Deref for SinkUid {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for SinkUid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SinkUid {
    fn from(s: &str) -> Self {
        SinkUid(Arc::new(s.to_string()))
    }
}

impl From<String> for SinkUid {
    fn from(s: String) -> Self {
        SinkUid(Arc::new(s))
    }
}

impl Display for SinkUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single real-valued output.
#[derive(Debug, Clone, PartialEq)]
pub struct RealChannel {
    uid: SinkUid,
    data: Option<Vec<f64>>,
}

impl RealChannel {
    pub fn new(uid: impl Into<SinkUid>) -> Self {
        RealChannel {
            uid: uid.into(),
            data: None,
        }
    }

    pub fn uid(&self) -> &SinkUid {
        &self.uid
    }

    /// Store the real part of `samples`. The imaginary part is discarded.
    pub fn load(&mut self, samples: &[Complex64]) {
        self.data = Some(samples.iter().map(|x| x.re).collect());
    }

    /// Samples of the last `load`, `None` if nothing was loaded yet.
    pub fn data(&self) -> Option<&[f64]> {
        self.data.as_deref()
    }
}

/// Pair of real outputs driven from one complex sequence through a mixer
/// with a fixed local oscillator.
///
/// The in-phase and quadrature outputs are named `<uid>/i` and `<uid>/q`.
#[derive(Debug, Clone, PartialEq)]
pub struct IqChannel {
    uid: SinkUid,
    in_phase: RealChannel,
    quadrature: RealChannel,
    local_oscillator_frequency: f64,
    intermediate_frequency: Option<f64>,
    sample_rate: f64,
}

impl IqChannel {
    pub fn new(uid: impl Into<SinkUid>, local_oscillator_frequency: f64, sample_rate: f64) -> Self {
        let uid = uid.into();
        IqChannel {
            in_phase: RealChannel::new(format!("{uid}/i")),
            quadrature: RealChannel::new(format!("{uid}/q")),
            uid,
            local_oscillator_frequency,
            intermediate_frequency: None,
            sample_rate,
        }
    }

    /// Attach the intermediate frequency the channel is meant to be driven at.
    ///
    /// The value is informational and does not take part in loading.
    pub fn with_intermediate_frequency(mut self, frequency: f64) -> Self {
        self.intermediate_frequency = Some(frequency);
        self
    }

    pub fn uid(&self) -> &SinkUid {
        &self.uid
    }

    pub fn local_oscillator_frequency(&self) -> f64 {
        self.local_oscillator_frequency
    }

    pub fn intermediate_frequency(&self) -> Option<f64> {
        self.intermediate_frequency
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn in_phase(&self) -> &RealChannel {
        &self.in_phase
    }

    pub fn quadrature(&self) -> &RealChannel {
        &self.quadrature
    }

    /// Mix `samples` down by the local oscillator and split into I and Q.
    pub fn load(&mut self, samples: &[Complex64]) {
        let demodulation = complex_exponential(
            self.local_oscillator_frequency,
            0.0,
            samples.len(),
            self.sample_rate,
            1.0,
        );
        let mixed = multiply(samples, &demodulation);
        let quadrature: Vec<Complex64> = mixed.iter().map(|x| Complex64::new(x.im, 0.0)).collect();
        self.in_phase.load(&mixed);
        self.quadrature.load(&quadrature);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelSink {
    Real(RealChannel),
    Iq(IqChannel),
}

impl ChannelSink {
    pub fn uid(&self) -> &SinkUid {
        match self {
            ChannelSink::Real(channel) => channel.uid(),
            ChannelSink::Iq(channel) => channel.uid(),
        }
    }

    pub fn load(&mut self, samples: &[Complex64]) {
        match self {
            ChannelSink::Real(channel) => channel.load(samples),
            ChannelSink::Iq(channel) => channel.load(samples),
        }
    }
}

impl From<RealChannel> for ChannelSink {
    fn from(value: RealChannel) -> Self {
        ChannelSink::Real(value)
    }
}

impl From<IqChannel> for ChannelSink {
    fn from(value: IqChannel) -> Self {
        ChannelSink::Iq(value)
    }
}

/// Registry of the physical outputs of a setup.
#[derive(Debug, Clone, Default)]
pub struct ChannelSet {
    sinks: IndexMap<SinkUid, ChannelSink>,
}

impl ChannelSet {
    pub fn new() -> Self {
        ChannelSet::default()
    }

    pub fn add(&mut self, sink: impl Into<ChannelSink>) -> Result<&mut Self> {
        let sink = sink.into();
        let uid = sink.uid().clone();
        if self.sinks.contains_key(&uid) {
            let msg = format!("Physical channel '{uid}' is already defined");
            return Err(Error::new(&msg));
        }
        self.sinks.insert(uid, sink);
        Ok(self)
    }

    pub fn add_real(&mut self, uid: impl Into<SinkUid>) -> Result<&mut Self> {
        self.add(RealChannel::new(uid))
    }

    pub fn add_iq(&mut self, channel: IqChannel) -> Result<&mut Self> {
        self.add(channel)
    }

    pub fn get(&self, uid: &str) -> Option<&ChannelSink> {
        self.sinks.get(uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelSink> {
        self.sinks.values()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Load every compiled sequence into its sink.
    ///
    /// Sinks without a compiled sequence are left untouched.
    pub fn load_compiled(&mut self, program: &CompiledProgram) -> Result<()> {
        for (uid, samples) in program.waveforms.iter() {
            let sink = self
                .sinks
                .get_mut(uid)
                .ok_or_else(|| Error::UnknownSink(uid.clone()))?;
            sink.load(samples);
        }
        Ok(())
    }
}

/// Assignment of virtual channels to physical outputs.
///
/// Several virtual channels may share one output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelMapping {
    targets: IndexMap<VirtualChannel, SinkUid>,
}

impl ChannelMapping {
    pub fn new() -> Self {
        ChannelMapping::default()
    }

    pub fn insert(&mut self, channel: VirtualChannel, sink: impl Into<SinkUid>) -> &mut Self {
        self.targets.insert(channel, sink.into());
        self
    }

    pub fn get(&self, channel: VirtualChannel) -> Option<&SinkUid> {
        self.targets.get(&channel)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VirtualChannel, &SinkUid)> {
        self.targets.iter()
    }

    /// Distinct sinks in order of their first assignment.
    pub fn sinks(&self) -> Vec<&SinkUid> {
        let mut sinks: Vec<&SinkUid> = Vec::new();
        for sink in self.targets.values() {
            if !sinks.contains(&sink) {
                sinks.push(sink);
            }
        }
        sinks
    }
}

impl<S: Into<SinkUid>> FromIterator<(VirtualChannel, S)> for ChannelMapping {
    fn from_iter<T: IntoIterator<Item = (VirtualChannel, S)>>(iter: T) -> Self {
        let mut mapping = ChannelMapping::new();
        for (channel, sink) in iter {
            mapping.insert(channel, sink);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use core::f64;

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_real_channel_discards_imaginary_part() {
        let mut channel = RealChannel::new("awg1");
        assert_eq!(channel.data(), None);
        channel.load(&[Complex64::new(0.5, 3.0), Complex64::new(-1.0, -2.0)]);
        assert_eq!(channel.data(), Some([0.5, -1.0].as_slice()));
    }

    #[test]
    fn test_iq_round_trip() {
        let sample_rate = 2e9;
        let lo = 150e6;
        let baseband: Vec<Complex64> = (0..64)
            .map(|k| Complex64::new((k as f64 * 0.1).sin(), 0.3 - k as f64 * 0.01))
            .collect();
        let omega = 2.0 * f64::consts::PI * lo;
        let upconverted: Vec<Complex64> = baseband
            .iter()
            .enumerate()
            .map(|(k, x)| x * Complex64::from_polar(1.0, -omega * k as f64 / sample_rate))
            .collect();

        let mut channel =
            IqChannel::new("awg_iq", lo, sample_rate).with_intermediate_frequency(50e6);
        channel.load(&upconverted);
        assert_eq!(channel.in_phase().uid().deref(), "awg_iq/i");
        assert_eq!(channel.intermediate_frequency(), Some(50e6));

        let i = channel.in_phase().data().unwrap();
        let q = channel.quadrature().data().unwrap();
        assert_eq!(i.len(), 64);
        for (k, expected) in baseband.iter().enumerate() {
            assert_abs_diff_eq!(i[k], expected.re, epsilon = 1e-9);
            assert_abs_diff_eq!(q[k], expected.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_channel_set() {
        let mut channels = ChannelSet::new();
        channels
            .add_real("awg1")
            .unwrap()
            .add_iq(IqChannel::new("awg2", 0.0, 1e9))
            .unwrap();
        assert_eq!(channels.len(), 2);
        assert!(channels.add_real("awg2").is_err());
        assert!(matches!(channels.get("awg2"), Some(ChannelSink::Iq(_))));
        assert!(channels.get("awg3").is_none());

        let mut program = CompiledProgram::default();
        program
            .waveforms
            .insert(SinkUid::from("awg2"), vec![Complex64::new(1.0, -1.0); 3]);
        channels.load_compiled(&program).unwrap();
        let Some(ChannelSink::Iq(iq)) = channels.get("awg2") else {
            panic!("expected IQ channel");
        };
        assert_eq!(iq.in_phase().data(), Some([1.0; 3].as_slice()));
        assert_eq!(iq.quadrature().data(), Some([-1.0; 3].as_slice()));
        let Some(ChannelSink::Real(real)) = channels.get("awg1") else {
            panic!("expected real channel");
        };
        assert_eq!(real.data(), None);

        program
            .waveforms
            .insert(SinkUid::from("awg9"), vec![Complex64::new(0.0, 0.0)]);
        assert!(matches!(
            channels.load_compiled(&program),
            Err(Error::UnknownSink(ref uid)) if uid.deref() == "awg9"
        ));
    }

    #[test]
    fn test_mapping_many_to_one() {
        let mapping: ChannelMapping = [
            (VirtualChannel::Drive(0), "awg1"),
            (VirtualChannel::Drive(1), "awg1"),
            (VirtualChannel::Drive(2), "awg2"),
        ]
        .into_iter()
        .collect();
        assert_eq!(mapping.get(VirtualChannel::Drive(1)).map(|s| s.deref()), Some("awg1"));
        assert_eq!(mapping.get(VirtualChannel::Measure(0)), None);
        let sinks: Vec<&str> = mapping.sinks().into_iter().map(|s| s.deref()).collect();
        assert_eq!(sinks, vec!["awg1", "awg2"]);
    }
}
