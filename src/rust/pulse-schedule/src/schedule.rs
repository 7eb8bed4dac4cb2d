// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexSet;

use crate::Samples;
use crate::channel::VirtualChannel;
use crate::instruction::Instruction;

/// Time-ordered collection of `(start, instruction)` entries.
///
/// Entries are kept sorted by start time. Entries with equal start time keep
/// their insertion order, which is the order in which zero-duration updates
/// take effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    entries: Vec<(Samples, Instruction)>,
}

impl Schedule {
    pub fn new() -> Self {
        Schedule::default()
    }

    /// Insert an instruction at an absolute start time.
    pub fn insert(&mut self, start: Samples, instruction: Instruction) -> &mut Self {
        let position = self.entries.partition_point(|(time, _)| *time <= start);
        self.entries.insert(position, (start, instruction));
        self
    }

    /// Insert an instruction at the current stop time of its channel.
    ///
    /// Channel-less instructions are placed at the end of the whole schedule.
    pub fn append(&mut self, instruction: Instruction) -> &mut Self {
        let start = match instruction.channel() {
            Some(channel) => self.channel_stop_time(channel),
            None => self.duration(),
        };
        self.insert(start, instruction)
    }

    pub fn instructions(&self) -> &[(Samples, Instruction)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Samples, Instruction)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stop time of the latest instruction in the schedule.
    pub fn duration(&self) -> Samples {
        self.entries
            .iter()
            .map(|(start, instruction)| start + instruction.duration())
            .max()
            .unwrap_or(0)
    }

    /// Stop time of the latest instruction on `channel`, `0` if there is none.
    pub fn channel_stop_time(&self, channel: VirtualChannel) -> Samples {
        self.entries
            .iter()
            .filter(|(_, instruction)| instruction.channel() == Some(channel))
            .map(|(start, instruction)| start + instruction.duration())
            .max()
            .unwrap_or(0)
    }

    /// Channels in order of their first appearance.
    pub fn channels(&self) -> IndexSet<VirtualChannel> {
        self.entries
            .iter()
            .filter_map(|(_, instruction)| instruction.channel())
            .collect()
    }
}

impl FromIterator<(Samples, Instruction)> for Schedule {
    fn from_iter<T: IntoIterator<Item = (Samples, Instruction)>>(iter: T) -> Self {
        let mut schedule = Schedule::new();
        for (start, instruction) in iter {
            schedule.insert(start, instruction);
        }
        schedule
    }
}
