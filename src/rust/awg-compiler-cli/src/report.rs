// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use awg_compiler::{ChannelMapping, ChannelSet, ChannelSink, CompiledProgram, RealChannel};
use numeric_array::NumericArray;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report {
    pub sample_rate: f64,
    pub virtual_channels: Vec<VirtualChannelReport>,
    pub outputs: Vec<OutputReport>,
}

#[derive(Debug, Serialize)]
pub struct VirtualChannelReport {
    pub channel: String,
    pub output: String,
    pub samples: usize,
}

#[derive(Debug, Serialize)]
pub struct OutputReport {
    pub uid: String,
    pub kind: &'static str,
    pub samples: usize,
    pub peak: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<f64>>,
}

impl Report {
    /// Summarize a compiled program and the loaded outputs.
    pub fn new(
        sample_rate: f64,
        mapping: &ChannelMapping,
        program: &CompiledProgram,
        channels: &ChannelSet,
        with_data: bool,
    ) -> Self {
        let virtual_channels = program
            .channel_lengths
            .iter()
            .map(|(channel, samples)| VirtualChannelReport {
                channel: channel.to_string(),
                output: mapping
                    .get(*channel)
                    .map(|sink| sink.to_string())
                    .unwrap_or_default(),
                samples: *samples,
            })
            .collect();
        let mut outputs = vec![];
        for sink in channels.iter() {
            match sink {
                ChannelSink::Real(channel) => {
                    outputs.push(OutputReport::new(channel, "real", with_data));
                }
                ChannelSink::Iq(channel) => {
                    outputs.push(OutputReport::new(channel.in_phase(), "in_phase", with_data));
                    outputs.push(OutputReport::new(channel.quadrature(), "quadrature", with_data));
                }
            }
        }
        Report {
            sample_rate,
            virtual_channels,
            outputs,
        }
    }
}

impl OutputReport {
    fn new(channel: &RealChannel, kind: &'static str, with_data: bool) -> Self {
        let data = NumericArray::from(channel.data().unwrap_or_default().to_vec());
        OutputReport {
            uid: channel.uid().to_string(),
            kind,
            samples: data.len(),
            peak: data.max_abs(),
            data: with_data.then(|| data.real()),
        }
    }
}
