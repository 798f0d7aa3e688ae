//! Learn command - synthesize patterns for a field from one sample value.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use ocrex_core::source::load_document;
use ocrex_core::synth::{FieldSession, Sample, SynthesisOptions};

use super::load_config;

/// Arguments for the learn command.
#[derive(Args)]
pub struct LearnArgs {
    /// Session file (created if missing)
    #[arg(short, long)]
    session: PathBuf,

    /// Field name
    #[arg(short, long, default_value = "Field")]
    field: String,

    /// Sample value as it appears in the document
    #[arg(long)]
    sample: String,

    /// Document the sample was taken from, for context-aware patterns
    #[arg(short, long)]
    document: Option<PathBuf>,
}

pub async fn run(args: LearnArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let sample = match &args.document {
        Some(path) => {
            let document = load_document(path, &config.source)?;
            Sample::locate(
                &document.text,
                &args.sample,
                config.extraction.context_radius,
            )?
        }
        None => Sample::new(&args.sample)?,
    };

    let session = if args.session.exists() {
        FieldSession::from_json(&fs::read_to_string(&args.session)?)?
    } else {
        FieldSession::new()
    };
    let mut session = session.with_options(SynthesisOptions::from(&config.extraction));

    let added = session.add_sample(&args.field, &sample);
    info!("Learned {} new patterns for {:?}", added, args.field);

    if let Some(parent) = args.session.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.session, session.to_json()?)?;

    let name = match args.field.trim() {
        "" => ocrex_core::synth::DEFAULT_FIELD_NAME,
        trimmed => trimmed,
    };
    if let Some(field) = session.field(name) {
        println!(
            "{} {} ({} patterns, {} new)",
            style("✓").green(),
            style(&field.name).bold(),
            field.patterns.len(),
            added
        );
        for (i, pattern) in field.patterns.iter().enumerate() {
            println!("{:>3}. {}", i + 1, pattern);
        }
    }

    Ok(())
}
