// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use crate::Samples;
use crate::channel::VirtualChannel;
use crate::pulse::Pulse;

/// A schedule instruction.
///
/// Only `Play` and `Delay` occupy time. Phase and frequency updates are
/// zero-duration and act between the samples emitted before and after them.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Play {
        pulse: Pulse,
        channel: VirtualChannel,
    },
    Delay {
        duration: Samples,
        channel: VirtualChannel,
    },
    /// Set the oscillator phase, in radians.
    SetPhase {
        phase: f64,
        channel: VirtualChannel,
    },
    /// Add to the oscillator phase, in radians.
    ShiftPhase {
        phase: f64,
        channel: VirtualChannel,
    },
    /// Set the oscillator frequency, in Hz.
    SetFrequency {
        frequency: f64,
        channel: VirtualChannel,
    },
    /// Add to the oscillator frequency, in Hz.
    ShiftFrequency {
        frequency: f64,
        channel: VirtualChannel,
    },
    /// Annotation without a target channel, e.g. a label for a schedule section.
    Directive { label: String },
}

impl Instruction {
    pub fn play(pulse: impl Into<Pulse>, channel: VirtualChannel) -> Self {
        Instruction::Play {
            pulse: pulse.into(),
            channel,
        }
    }

    pub fn delay(duration: Samples, channel: VirtualChannel) -> Self {
        Instruction::Delay { duration, channel }
    }

    pub fn set_phase(phase: f64, channel: VirtualChannel) -> Self {
        Instruction::SetPhase { phase, channel }
    }

    pub fn shift_phase(phase: f64, channel: VirtualChannel) -> Self {
        Instruction::ShiftPhase { phase, channel }
    }

    pub fn set_frequency(frequency: f64, channel: VirtualChannel) -> Self {
        Instruction::SetFrequency { frequency, channel }
    }

    pub fn shift_frequency(frequency: f64, channel: VirtualChannel) -> Self {
        Instruction::ShiftFrequency { frequency, channel }
    }

    /// The channel the instruction acts on, `None` for channel-less directives.
    pub fn channel(&self) -> Option<VirtualChannel> {
        match self {
            Instruction::Play { channel, .. }
            | Instruction::Delay { channel, .. }
            | Instruction::SetPhase { channel, .. }
            | Instruction::ShiftPhase { channel, .. }
            | Instruction::SetFrequency { channel, .. }
            | Instruction::ShiftFrequency { channel, .. } => Some(*channel),
            Instruction::Directive { .. } => None,
        }
    }

    pub fn duration(&self) -> Samples {
        match self {
            Instruction::Play { pulse, .. } => pulse.duration(),
            Instruction::Delay { duration, .. } => *duration,
            Instruction::SetPhase { .. }
            | Instruction::ShiftPhase { .. }
            | Instruction::SetFrequency { .. }
            | Instruction::ShiftFrequency { .. }
            | Instruction::Directive { .. } => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Play { .. } => "Play",
            Instruction::Delay { .. } => "Delay",
            Instruction::SetPhase { .. } => "SetPhase",
            Instruction::ShiftPhase { .. } => "ShiftPhase",
            Instruction::SetFrequency { .. } => "SetFrequency",
            Instruction::ShiftFrequency { .. } => "ShiftFrequency",
            Instruction::Directive { .. } => "Directive",
        }
    }
}
