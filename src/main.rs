//! Reading Strain entry point
//!
//! Scores a JSON object sequence, or a seeded synthetic one when no input
//! is given, and prints the report as JSON.

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use reading_strain::synth::{self, SynthOptions};
use reading_strain::{DifficultyObject, DifficultyObjects, ModPreset, Settings};

/// Reading difficulty for a sequence of timed objects
#[derive(Parser, Debug)]
#[command(name = "reading-strain")]
#[command(about = "Calculate reading strain under approach rate, hidden and flashlight")]
struct Args {
    /// JSON file with `settings` and `objects` (synthetic sequence when omitted)
    input: Option<PathBuf>,

    /// Modifier preset overriding the input flags: nm, hd, fl, hdfl
    #[arg(long)]
    preset: Option<String>,

    /// Approach rate overriding the input settings
    #[arg(long)]
    ar: Option<f64>,

    /// Seed for the synthetic sequence
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of synthetic objects
    #[arg(long, default_value_t = 1000)]
    count: usize,
}

/// Input file layout
#[derive(Deserialize)]
struct Input {
    #[serde(default)]
    settings: Settings,
    objects: Vec<DifficultyObject>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> reading_strain::Result<()> {
    let (mut settings, objects) = match &args.input {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let input: Input = serde_json::from_str(&json)?;
            log::info!("Loaded {} objects from {}", input.objects.len(), path.display());
            (input.settings, DifficultyObjects::new(input.objects)?)
        }
        None => {
            let settings = Settings::default();
            let options = SynthOptions {
                approach_rate: args.ar.unwrap_or(settings.approach_rate),
                ..Default::default()
            };
            log::info!(
                "No input, generating {} objects from seed {}",
                args.count,
                args.seed
            );
            (settings, synth::generate(args.seed, args.count, &options)?)
        }
    };

    if let Some(ar) = args.ar {
        settings.approach_rate = ar;
    }
    if let Some(name) = &args.preset {
        match ModPreset::from_str(name) {
            Some(preset) => settings.apply_preset(preset),
            None => log::warn!("Unknown preset '{}', keeping input modifiers", name),
        }
    }

    let report = reading_strain::calculate(&objects, &settings)?;
    log::info!(
        "{} at AR {}: difficulty {:.4} over {} sections",
        settings.preset().as_str(),
        settings.approach_rate,
        report.difficulty,
        report.sections.len()
    );

    println!("{}", report.to_json()?);
    Ok(())
}
