// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use pulse_schedule::{Instruction, Samples, VirtualChannel};

/// Split a time-ordered instruction list into one list per virtual channel.
///
/// The relative order of instructions within each channel is preserved.
/// Channels appear in the order of their first instruction. Instructions
/// without a target channel are dropped.
pub fn distribute_instructions<'a>(
    entries: impl IntoIterator<Item = &'a (Samples, Instruction)>,
) -> IndexMap<VirtualChannel, Vec<(Samples, &'a Instruction)>> {
    let mut per_channel: IndexMap<VirtualChannel, Vec<(Samples, &'a Instruction)>> =
        IndexMap::new();
    for (start, instruction) in entries {
        if let Some(channel) = instruction.channel() {
            per_channel
                .entry(channel)
                .or_default()
                .push((*start, instruction));
        }
    }
    per_channel
}
