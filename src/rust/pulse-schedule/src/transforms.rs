// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Schedule transformations applied before compilation.

use crate::Samples;
use crate::channel::VirtualChannel;
use crate::instruction::Instruction;
use crate::schedule::Schedule;

/// Fill every timing gap of every channel with an explicit `Delay`.
///
/// All channels are extended up to the duration of the whole schedule, so
/// after padding every channel covers `[0, schedule.duration())` without gaps.
pub fn pad(schedule: &Schedule) -> Schedule {
    pad_until(schedule, schedule.duration())
}

/// Like [`pad`], but extends the channels up to `until`.
///
/// If `until` is shorter than a channel, the channel is left as it is.
pub fn pad_until(schedule: &Schedule, until: Samples) -> Schedule {
    let mut padded = schedule.clone();
    for channel in schedule.channels() {
        for (start, duration) in find_gaps(schedule, channel, until) {
            padded.insert(start, Instruction::delay(duration, channel));
        }
    }
    padded
}

/// Uncovered `(start, length)` intervals of `channel` before `until`.
fn find_gaps(
    schedule: &Schedule,
    channel: VirtualChannel,
    until: Samples,
) -> Vec<(Samples, Samples)> {
    let mut gaps = vec![];
    let mut cursor: Samples = 0;
    let on_channel = schedule
        .iter()
        .filter(|(_, instruction)| instruction.channel() == Some(channel));
    for (start, instruction) in on_channel {
        if *start > cursor {
            gaps.push((cursor, start - cursor));
        }
        cursor = cursor.max(start + instruction.duration());
    }
    if until > cursor {
        gaps.push((cursor, until - cursor));
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pulse::SymbolicPulse;

    fn channel_timeline(
        schedule: &Schedule,
        channel: VirtualChannel,
    ) -> Vec<(Samples, &str, Samples)> {
        schedule
            .iter()
            .filter(|(_, instr)| instr.channel() == Some(channel))
            .map(|(start, instr)| (*start, instr.name(), instr.duration()))
            .collect()
    }

    #[test]
    fn test_pad_fills_gaps_and_tail() {
        let d0 = VirtualChannel::Drive(0);
        let d1 = VirtualChannel::Drive(1);
        let mut schedule = Schedule::new();
        schedule
            .insert(2, Instruction::play(SymbolicPulse::constant(3, 1.0, 0.0), d0))
            .insert(0, Instruction::play(SymbolicPulse::constant(10, 1.0, 0.0), d1));

        let padded = pad(&schedule);
        assert_eq!(
            channel_timeline(&padded, d0),
            vec![(0, "Delay", 2), (2, "Play", 3), (5, "Delay", 5)]
        );
        assert_eq!(channel_timeline(&padded, d1), vec![(0, "Play", 10)]);
        assert_eq!(padded.duration(), 10);
    }

    #[test]
    fn test_pad_is_idempotent() {
        let d0 = VirtualChannel::Drive(0);
        let mut schedule = Schedule::new();
        schedule
            .insert(0, Instruction::set_frequency(5e6, d0))
            .insert(4, Instruction::play(SymbolicPulse::constant(4, 1.0, 0.0), d0));
        let padded = pad(&schedule);
        assert_eq!(pad(&padded), padded);
        assert_eq!(
            channel_timeline(&padded, d0),
            vec![(0, "SetFrequency", 0), (0, "Delay", 4), (4, "Play", 4)]
        );
    }

    #[test]
    fn test_pad_until() {
        let d0 = VirtualChannel::Drive(0);
        let mut schedule = Schedule::new();
        schedule.append(Instruction::delay(4, d0));
        let padded = pad_until(&schedule, 10);
        assert_eq!(padded.channel_stop_time(d0), 10);
        // Shorter target than the channel leaves it untouched
        assert_eq!(pad_until(&schedule, 2), schedule);
    }
}
