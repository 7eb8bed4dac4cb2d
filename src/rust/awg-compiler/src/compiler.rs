// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use num_complex::Complex64;
use pulse_log::{debug, diagnostic};
use pulse_schedule::{Instruction, Samples, Schedule, VirtualChannel};
use rayon::prelude::*;

use crate::channels::{ChannelMapping, SinkUid};
use crate::distribute::distribute_instructions;
use crate::envelope::get_envelope;
use crate::oscillator::Oscillator;
use crate::settings::{CompilerSettings, DelayPhasePolicy};
use crate::utils::multiply;
use crate::{Error, Result};

/// Result of compiling a schedule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledProgram {
    /// Summed complex waveform per physical output, in mapping order.
    pub waveforms: IndexMap<SinkUid, Vec<Complex64>>,
    /// Number of samples produced for each virtual channel.
    pub channel_lengths: IndexMap<VirtualChannel, usize>,
}

impl CompiledProgram {
    pub fn get(&self, sink: &str) -> Option<&[Complex64]> {
        self.waveforms.get(sink).map(Vec::as_slice)
    }
}

/// Compiles schedules for a fixed channel mapping.
#[derive(Debug, Clone)]
pub struct ScheduleCompiler {
    mapping: ChannelMapping,
    settings: CompilerSettings,
}

impl ScheduleCompiler {
    pub fn new(mapping: ChannelMapping, settings: CompilerSettings) -> Result<Self> {
        settings.validate()?;
        Ok(ScheduleCompiler { mapping, settings })
    }

    pub fn mapping(&self) -> &ChannelMapping {
        &self.mapping
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Compile a gapless schedule into one complex waveform per physical output.
    ///
    /// The schedule is expected to be padded already, see
    /// [`pulse_schedule::transforms::pad`].
    pub fn compile(&self, schedule: &Schedule) -> Result<CompiledProgram> {
        let per_channel = distribute_instructions(schedule.instructions());
        if self.settings.validate_schedule {
            for (channel, entries) in per_channel.iter() {
                validate_timeline(*channel, entries)?;
            }
        }
        let jobs = per_channel
            .into_iter()
            .map(|(channel, entries)| -> Result<_> {
                let sink = self
                    .mapping
                    .get(channel)
                    .ok_or(Error::UnmappedVirtualChannel(channel))?;
                Ok((channel, sink, entries))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "Compiling {} virtual channel(s), {} instruction(s), at {} Sa/s",
            jobs.len(),
            schedule.len(),
            self.settings.sample_rate()
        );

        let waveforms = jobs
            .par_iter()
            .map(|(_, _, entries)| compile_channel(entries, &self.settings))
            .collect::<Result<Vec<_>>>()?;

        let mut accumulator = SinkAccumulator::new(&self.mapping);
        let mut channel_lengths = IndexMap::new();
        for ((channel, sink, _), waveform) in jobs.iter().zip(waveforms) {
            channel_lengths.insert(*channel, waveform.len());
            accumulator.add(*sink, *channel, waveform)?;
        }
        Ok(CompiledProgram {
            waveforms: accumulator.finish(),
            channel_lengths,
        })
    }
}

/// Per-sink sums. Every sink starts absent; the first contribution is stored
/// and later ones must have the same length.
struct SinkAccumulator<'a> {
    sums: IndexMap<&'a SinkUid, Option<Vec<Complex64>>>,
}

impl<'a> SinkAccumulator<'a> {
    fn new(mapping: &'a ChannelMapping) -> Self {
        SinkAccumulator {
            sums: mapping.sinks().into_iter().map(|sink| (sink, None)).collect(),
        }
    }

    fn add(
        &mut self,
        sink: &'a SinkUid,
        channel: VirtualChannel,
        waveform: Vec<Complex64>,
    ) -> Result<()> {
        match self.sums.get_mut(sink) {
            Some(None) | None => {
                self.sums.insert(sink, Some(waveform));
            }
            Some(Some(sum)) => {
                if sum.len() != waveform.len() {
                    return Err(Error::ChannelLengthMismatch {
                        sink: sink.clone(),
                        channel,
                        expected: sum.len(),
                        found: waveform.len(),
                    });
                }
                debug!("Summing channel {} into sink '{}'", channel, sink);
                sum.iter_mut().zip(waveform).for_each(|(acc, x)| *acc += x);
            }
        }
        Ok(())
    }

    fn finish(self) -> IndexMap<SinkUid, Vec<Complex64>> {
        self.sums
            .into_iter()
            .filter_map(|(sink, sum)| sum.map(|sum| (sink.clone(), sum)))
            .collect()
    }
}

/// Check that the timeline of a channel starts at zero and has neither gaps
/// nor overlaps.
fn validate_timeline(channel: VirtualChannel, entries: &[(Samples, &Instruction)]) -> Result<()> {
    let mut cursor: Samples = 0;
    for (start, instruction) in entries {
        if *start != cursor {
            let kind = if *start > cursor { "gap" } else { "overlap" };
            return Err(Error::MalformedProgram {
                channel,
                reason: format!(
                    "{kind} before {} at sample {start}, expected start at sample {cursor}",
                    instruction.name()
                ),
            });
        }
        cursor += instruction.duration();
    }
    Ok(())
}

/// Synthesize the complex waveform of one virtual channel.
///
/// `entries` must all target the same channel and be ordered by start time.
/// A fresh oscillator is used, so the result only depends on the arguments.
pub fn compile_channel(
    entries: &[(Samples, &Instruction)],
    settings: &CompilerSettings,
) -> Result<Vec<Complex64>> {
    let mut oscillator = Oscillator::new(settings.sample_rate());
    let mut waveform: Vec<Complex64> = Vec::new();
    for (_, instruction) in entries {
        match instruction {
            Instruction::Play { pulse, channel } => {
                let envelope = get_envelope(pulse)?;
                let length = pulse.duration() as usize;
                if envelope.len() != length {
                    return Err(Error::MalformedProgram {
                        channel: *channel,
                        reason: format!(
                            "envelope has {} samples, pulse duration is {length}",
                            envelope.len()
                        ),
                    });
                }
                let modulation = oscillator.modulate(length);
                waveform.extend(multiply(&envelope, &modulation));
            }
            Instruction::Delay { duration, channel } => {
                let length = *duration as usize;
                waveform.extend(std::iter::repeat_n(Complex64::new(0.0, 0.0), length));
                match settings.delay_phase_policy {
                    DelayPhasePolicy::Advance => oscillator.advance(length),
                    DelayPhasePolicy::Hold => {
                        if oscillator.frequency() != 0.0 && length > 0 {
                            diagnostic!(
                                "Delay of {} samples on {} does not advance the oscillator phase",
                                length,
                                channel
                            );
                        }
                    }
                }
            }
            Instruction::SetPhase { phase, .. } => oscillator.set_phase(*phase),
            Instruction::ShiftPhase { phase, .. } => oscillator.shift_phase(*phase),
            Instruction::SetFrequency { frequency, .. } => oscillator.set_frequency(*frequency),
            Instruction::ShiftFrequency { frequency, .. } => {
                oscillator.shift_frequency(*frequency)
            }
            Instruction::Directive { .. } => {}
        }
    }
    Ok(waveform)
}
