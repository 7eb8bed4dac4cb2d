// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use awg_compiler::{CompilerSettings, DelayPhasePolicy, ScheduleCompiler};
use clap::Parser;
use pulse_log::info;

mod demo;
mod report;

use report::Report;

/// Compile the demonstration pulse schedule into AWG samples and print a
/// JSON report of the loaded outputs.
#[derive(Parser, Debug)]
#[command(name = "awgc", version)]
struct Cli {
    /// AWG sample rate in samples per second.
    #[arg(long, default_value_t = 2e9)]
    sample_rate: f64,

    /// Drive the second output through an IQ mixer with this local-oscillator frequency.
    #[arg(long, value_name = "HZ")]
    iq_lo: Option<f64>,

    /// Let delays advance the oscillator phase.
    #[arg(long)]
    advance_phase_on_delay: bool,

    /// Include the raw output samples in the report.
    #[arg(long)]
    samples: bool,

    /// Write the report to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit diagnostic log messages.
    #[arg(long)]
    diagnostics: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    pulse_log::init_logging(cli.diagnostics);

    let policy = match cli.advance_phase_on_delay {
        true => DelayPhasePolicy::Advance,
        false => DelayPhasePolicy::Hold,
    };
    let settings = CompilerSettings::new(cli.sample_rate).with_delay_phase_policy(policy);
    let mapping = demo::channel_mapping();
    let compiler = ScheduleCompiler::new(mapping.clone(), settings)
        .context("Invalid compiler settings")?;

    let schedule = demo::schedule();
    let program = compiler
        .compile(&schedule)
        .context("Failed to compile the demonstration schedule")?;
    info!(
        "Compiled {} samples for {} output(s)",
        schedule.duration(),
        program.waveforms.len()
    );

    let mut channels = demo::channel_set(cli.sample_rate, cli.iq_lo)?;
    channels
        .load_compiled(&program)
        .context("Failed to load the compiled waveforms")?;

    let report = Report::new(cli.sample_rate, &mapping, &program, &channels, cli.samples);
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writer.flush()?;
            info!("Report written to '{}'", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
