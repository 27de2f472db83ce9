mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;

use beatcoach::config::{self, AnalysisConfig, OutputFormat, BLOCK_SIZE, SECTION_COUNT, SENSITIVITY};
use beatcoach::{AudioFeatures, Decoder, FeatureExtractor};
use cli::Cli;

#[derive(Serialize)]
struct Report<'a> {
    file: &'a str,
    features: &'a AudioFeatures,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();
    let mut analysis = AnalysisConfig::default();

    if let Some(ref path) = config::find_config(cli.config.clone()) {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.sensitivity == SENSITIVITY { cli.sensitivity = cfg.analysis.sensitivity; }
            if cli.sections == SECTION_COUNT { cli.sections = cfg.analysis.section_count; }
            if cli.block_size == BLOCK_SIZE { cli.block_size = cfg.analysis.block_size; }
            if cli.format == OutputFormat::Json { cli.format = cfg.output.format; }
            if !cli.pretty { cli.pretty = cfg.output.pretty; }
            analysis = cfg.analysis;
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    analysis.sensitivity = cli.sensitivity;
    analysis.section_count = cli.sections;
    analysis.block_size = cli.block_size;
    analysis.validate()?;

    let pb = if cli.inputs.len() > 1 {
        let pb = ProgressBar::new(cli.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files ({eta} remaining)")?
                .progress_chars("=>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut failures = 0usize;
    for input in &cli.inputs {
        match analyze_file(input, &analysis) {
            Ok(features) => {
                let rendered = render(input, &features, cli.format, cli.pretty)?;
                pb.suspend(|| println!("{}", rendered));
            }
            Err(e) => {
                failures += 1;
                pb.suspend(|| log::error!("{}: {:#}", input.display(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if failures > 0 {
        anyhow::bail!("{} of {} files could not be analyzed", failures, cli.inputs.len());
    }
    Ok(())
}

fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<AudioFeatures> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read audio file: {}", path.display()))?;

    let extractor = FeatureExtractor::new(decoder_for(path), config.clone());
    let features = extractor.extract(&bytes)?;
    Ok(features)
}

#[cfg(feature = "symphonia")]
fn decoder_for(path: &Path) -> Box<dyn Decoder> {
    let decoder = beatcoach::audio::backend::SymphoniaDecoder::new();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => Box::new(decoder.with_extension_hint(ext)),
        None => Box::new(decoder),
    }
}

#[cfg(not(feature = "symphonia"))]
fn decoder_for(_path: &Path) -> Box<dyn Decoder> {
    beatcoach::default_decoder()
}

fn render(path: &Path, features: &AudioFeatures, format: OutputFormat, pretty: bool) -> Result<String> {
    let file = path.display().to_string();
    match format {
        OutputFormat::Json => {
            let report = Report { file: &file, features };
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            Ok(json)
        }
        OutputFormat::Text => Ok(render_text(&file, features)),
    }
}

fn render_text(file: &str, f: &AudioFeatures) -> String {
    let mut out = format!(
        "{}\n  tempo:    {} BPM ({}, confidence {:.2})\n  style:    {}\n  energy:   {:.4} ({}, intensity {:.2})\n  duration: {:.1}s\n  sections:",
        file,
        f.bpm,
        f.tempo_label.as_str(),
        f.beat_confidence,
        f.recommended_style,
        f.energy,
        f.energy_label.as_str(),
        f.intensity,
        f.duration,
    );
    for s in &f.sections {
        out.push_str(&format!("\n    {:>7.1}s - {:>7.1}s  intensity {:.4}", s.start, s.end, s.intensity));
    }
    out
}
