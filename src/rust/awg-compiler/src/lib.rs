// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Compilation of pulse schedules into AWG sample sequences.
//!
//! The pipeline distributes the schedule per virtual channel, synthesizes one
//! complex waveform per virtual channel with its own software oscillator and
//! sums the waveforms of virtual channels that share a physical output.
//! Loading the result into the outputs (including IQ down-conversion) is done
//! by [`channels::ChannelSet::load_compiled`].

pub mod channels;
pub mod compiler;
pub mod distribute;
pub mod envelope;
pub mod oscillator;
pub mod settings;
pub(crate) mod utils;

pub use channels::{ChannelMapping, ChannelSet, ChannelSink, IqChannel, RealChannel, SinkUid};
pub use compiler::{CompiledProgram, ScheduleCompiler, compile_channel};
pub use distribute::distribute_instructions;
pub use envelope::get_envelope;
pub use oscillator::Oscillator;
pub use settings::{CompilerSettings, DelayPhasePolicy};
pub use utils::normalize_phase;

pub use pulse_schedule::Samples;
use pulse_schedule::VirtualChannel;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unrecognized pulse kind '{pulse_type}'")]
    UnrecognizedPulseKind { pulse_type: String },

    #[error("Pulse '{pulse_type}' is missing required parameter '{parameter}'")]
    MissingPulseParameter { pulse_type: String, parameter: String },

    #[error("Pulse '{pulse_type}' has invalid parameter '{parameter}': {reason}")]
    InvalidPulseParameter {
        pulse_type: String,
        parameter: String,
        reason: String,
    },

    #[error(
        "Waveform of channel {channel} has {found} samples, \
         but sink '{sink}' already holds {expected} samples"
    )]
    ChannelLengthMismatch {
        sink: SinkUid,
        channel: VirtualChannel,
        expected: usize,
        found: usize,
    },

    #[error("Virtual channel {0} is not mapped to any physical channel")]
    UnmappedVirtualChannel(VirtualChannel),

    #[error("Malformed program on channel {channel}: {reason}")]
    MalformedProgram {
        channel: VirtualChannel,
        reason: String,
    },

    #[error("Unknown physical channel '{0}'")]
    UnknownSink(SinkUid),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    pub fn new(msg: &str) -> Self {
        Error::Anyhow(anyhow::anyhow!(msg.to_string()))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
