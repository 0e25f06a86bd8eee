use anyhow::{anyhow, Context};
use clap::Parser;
use log::info;
use std::io;

use tone_scope::{
    cli::{self, Args},
    config::Config,
    pcm::{self, PcmSpec},
    scope_panel::Scope,
    time_axis::TimeAxis,
    tone::Tone,
};

fn main() -> anyhow::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let args = Args::parse();
    let settings = args.settings()?;

    let frequency = match args.frequency {
        Some(freq) => cli::check_frequency(freq)?,
        None => cli::read_frequency(io::stdin().lock(), &mut io::stdout())?,
    };

    let tone = Tone::new(frequency, settings.sample_rate, settings.seconds);
    let axis = TimeAxis::new(tone, settings.width, settings.height);
    info!(
        "{} Hz, {} samples, dx {}",
        tone.frequency(),
        tone.sample_count(),
        axis.dx()
    );

    let samples: Vec<i16> = tone.pcm_samples().collect();
    let header = pcm::write_file(
        &settings.output,
        PcmSpec::mono_16(tone.sample_rate()),
        &samples,
    )
    .with_context(|| format!("writing {}", settings.output.display()))?;
    info!(
        "wrote {} ({} bytes)",
        settings.output.display(),
        header.riff_len() + 8
    );

    let scope = Scope::new(axis, Config::default());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.width as f32, settings.height as f32])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "Tone Scope",
        options,
        Box::new(|_cc| Box::new(App { scope })),
    )
    .map_err(|e| anyhow!("{}", e))
}

struct App {
    scope: Scope,
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.scope.config().background))
            .show(ctx, |ui| {
                self.scope.ui_content(ui);
            });
    }
}
