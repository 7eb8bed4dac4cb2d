// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Demonstration setup: two qubits, three drive channels, two AWG outputs.

use awg_compiler::{ChannelMapping, ChannelSet, IqChannel, Result};
use pulse_log::warn;
use pulse_schedule::transforms::pad;
use pulse_schedule::{Instruction, Schedule, SymbolicPulse, VirtualChannel};

pub const QUBIT1_GE: VirtualChannel = VirtualChannel::Drive(0);
pub const QUBIT1_EF: VirtualChannel = VirtualChannel::Drive(1);
pub const QUBIT2_GE: VirtualChannel = VirtualChannel::Drive(2);

pub const OUTPUT1: &str = "awg1";
pub const OUTPUT2: &str = "awg2";

const DRIVE_FREQUENCIES: [(VirtualChannel, f64); 3] =
    [(QUBIT1_GE, 100e6), (QUBIT1_EF, 200e6), (QUBIT2_GE, 300e6)];

/// Both transitions of qubit 1 share the first output.
pub fn channel_mapping() -> ChannelMapping {
    [(QUBIT1_GE, OUTPUT1), (QUBIT1_EF, OUTPUT1), (QUBIT2_GE, OUTPUT2)]
        .into_iter()
        .collect()
}

/// Physical outputs. With `iq_lo` the second output is an IQ pair mixed with
/// that local-oscillator frequency.
pub fn channel_set(sample_rate: f64, iq_lo: Option<f64>) -> Result<ChannelSet> {
    let mut channels = ChannelSet::new();
    channels.add_real(OUTPUT1)?;
    match iq_lo {
        Some(lo) => {
            let intermediate = DRIVE_FREQUENCIES[2].1 - lo;
            if intermediate.abs() > sample_rate / 2.0 {
                warn!(
                    "Intermediate frequency {} Hz of '{}' is above the Nyquist frequency",
                    intermediate,
                    OUTPUT2
                );
            }
            channels.add_iq(
                IqChannel::new(OUTPUT2, lo, sample_rate).with_intermediate_frequency(intermediate),
            )?;
        }
        None => {
            channels.add_real(OUTPUT2)?;
        }
    }
    Ok(channels)
}

/// An x90 on every drive channel, followed by a virtual-Z and a second x90 on
/// the first transition of qubit 1. The result is padded.
pub fn schedule() -> Schedule {
    let x90 = SymbolicPulse::gaussian(200, 0.1, 20.0, 0.0).with_name("x90");
    let mut schedule = Schedule::new();
    for (channel, frequency) in DRIVE_FREQUENCIES {
        schedule.append(Instruction::set_frequency(frequency, channel));
    }
    for (channel, _) in DRIVE_FREQUENCIES {
        schedule.append(Instruction::play(x90.clone(), channel));
    }
    schedule
        .append(Instruction::shift_phase(std::f64::consts::FRAC_PI_2, QUBIT1_GE))
        .append(Instruction::play(x90, QUBIT1_GE));
    pad(&schedule)
}
