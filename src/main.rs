//! TextTrack - extract text from images
//!
//! A single-window desktop utility: pick an image, choose a language,
//! run OCR through an external recognition engine, then copy or save
//! the result. Recognition itself is delegated to Tesseract; this
//! binary is the state machine and page around it.

mod actions;
mod config;
mod intake;
mod ocr;
mod page;
mod session;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;
use crate::ocr::OcrLanguage;

/// TextTrack - image to text extraction
#[derive(Parser, Debug)]
#[command(name = "texttrack")]
#[command(about = "Extract text from images with OCR")]
struct Args {
    /// Recognition language to preselect (e.g. "eng", "deu", "jpn")
    #[arg(short, long)]
    language: Option<String>,

    /// List supported recognition languages and exit
    #[arg(long)]
    list_languages: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    if args.list_languages {
        println!("Supported languages:");
        for language in OcrLanguage::ALL {
            println!("  {:<8} {}", language.code(), language.label());
        }
        return Ok(());
    }

    let language_override = match args.language.as_deref() {
        Some(code) => Some(OcrLanguage::from_code(code).ok_or_else(|| {
            anyhow::anyhow!("unsupported language code: {code} (see --list-languages)")
        })?),
        None => None,
    };

    info!("TextTrack starting...");

    let (config, config_path) = load_or_create_config();

    if let Err(e) = page::app::run_app(config, config_path, language_override) {
        tracing::error!("UI error: {}", e);
        return Err(anyhow::anyhow!("UI failed: {e}"));
    }

    info!("TextTrack shutdown complete");

    Ok(())
}

/// Load configuration from file or fall back to defaults
fn load_or_create_config() -> (AppConfig, Option<PathBuf>) {
    match config::config_path() {
        Ok(path) => {
            if path.exists() {
                match config::load_config(&path) {
                    Ok(config) => {
                        info!("Loaded configuration from {:?}", path);
                        return (config, Some(path));
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring unreadable configuration: {}", e);
                    }
                }
            }
            (AppConfig::default(), Some(path))
        }
        Err(e) => {
            tracing::warn!("No config directory available: {}", e);
            (AppConfig::default(), None)
        }
    }
}
