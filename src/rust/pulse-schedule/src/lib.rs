// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Pulse schedule data model.
//!
//! A [`Schedule`] is a flat, time-ordered list of `(start, Instruction)` entries.
//! Each instruction targets at most one [`VirtualChannel`]. Times and durations
//! are counted in samples of the AWG clock.

pub mod channel;
pub mod instruction;
pub mod pulse;
pub mod schedule;
pub mod transforms;

pub use channel::VirtualChannel;
pub use instruction::Instruction;
pub use pulse::{Pulse, SymbolicPulse, Waveform};
pub use schedule::Schedule;

pub type Samples = u64;
