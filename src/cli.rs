//! Command-line arguments and the frequency prompt.

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use crate::{
    config::Settings,
    pcm::{Header, PcmSpec},
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "tone_scope")]
#[command(about = "Write a sine tone to a PCM file and plot it", long_about = None)]
pub struct Args {
    /// Tone frequency in Hz, asked for on stdin when omitted
    #[arg(short, long, value_name = "HZ")]
    pub frequency: Option<f64>,

    /// Output file, overrides the settings file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Settings file (json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Settings from `--config` (or defaults) with command line overrides applied.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("reading settings from {}", path.display()))?,
            None => Settings::default(),
        };
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        check_settings(&settings)?;
        info!("settings {:?}", settings);
        Ok(settings)
    }
}

/// Reject settings that give no samples, no window, or more samples than a
/// PCM file can describe. Runs before anything is generated.
pub fn check_settings(settings: &Settings) -> anyhow::Result<()> {
    if settings.sample_rate == 0 || settings.seconds == 0 {
        bail!("sample rate and length must be non-zero");
    }
    if settings.width == 0 || settings.height == 0 {
        bail!("window size must be non-zero");
    }
    let frames = settings.sample_rate as u64 * settings.seconds as u64;
    let frames = usize::try_from(frames)
        .with_context(|| format!("{} samples are too many", frames))?;
    Header::new(PcmSpec::mono_16(settings.sample_rate), frames).with_context(|| {
        format!(
            "{} seconds at {} Hz do not fit a PCM file",
            settings.seconds, settings.sample_rate
        )
    })?;
    Ok(())
}

/// Print a prompt and read the first token of `input` as a frequency.
pub fn read_frequency<R: BufRead, W: Write>(input: R, prompt: &mut W) -> anyhow::Result<f64> {
    write!(prompt, "Frequency: ")?;
    prompt.flush()?;

    for line in input.lines() {
        let line = line.context("reading frequency")?;
        if let Some(token) = line.split_whitespace().next() {
            return parse_frequency(token);
        }
    }
    bail!("no frequency given")
}

pub fn parse_frequency(token: &str) -> anyhow::Result<f64> {
    let freq: f64 = token
        .parse()
        .with_context(|| format!("'{}' is not a frequency", token))?;
    check_frequency(freq)
}

pub fn check_frequency(freq: f64) -> anyhow::Result<f64> {
    if !freq.is_finite() {
        bail!("frequency must be finite, got {}", freq);
    }
    Ok(freq)
}
