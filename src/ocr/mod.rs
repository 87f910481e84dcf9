//! OCR engine boundary
//!
//! The recognition engine lives behind a small capability interface:
//! a factory configures an engine for one language and mode, the engine
//! runs a single recognition while reporting progress, and dropping the
//! engine releases whatever the backend holds. The orchestration code
//! never sees a concrete backend, so tests substitute a scripted engine.

pub mod tesseract;
pub mod worker;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub type OcrResult<T> = std::result::Result<T, OcrError>;

/// Errors raised at the engine boundary
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to configure recognition engine: {message}")]
    EngineInit { message: String },
    #[error("failed to load image: {message}")]
    ImageLoad { message: String },
    #[error("recognition failed: {message}")]
    Recognition { message: String },
}

/// Supported recognition languages, identified by Tesseract traineddata codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OcrLanguage {
    #[default]
    English,
    Sinhala,
    French,
    German,
    Spanish,
    Hindi,
    Japanese,
    ChineseSimplified,
}

impl OcrLanguage {
    pub const ALL: [OcrLanguage; 8] = [
        OcrLanguage::English,
        OcrLanguage::Sinhala,
        OcrLanguage::French,
        OcrLanguage::German,
        OcrLanguage::Spanish,
        OcrLanguage::Hindi,
        OcrLanguage::Japanese,
        OcrLanguage::ChineseSimplified,
    ];

    /// Traineddata code passed to the engine
    pub fn code(&self) -> &'static str {
        match self {
            OcrLanguage::English => "eng",
            OcrLanguage::Sinhala => "sin",
            OcrLanguage::French => "fra",
            OcrLanguage::German => "deu",
            OcrLanguage::Spanish => "spa",
            OcrLanguage::Hindi => "hin",
            OcrLanguage::Japanese => "jpn",
            OcrLanguage::ChineseSimplified => "chi_sim",
        }
    }

    /// Display name for the language picker
    pub fn label(&self) -> &'static str {
        match self {
            OcrLanguage::English => "English",
            OcrLanguage::Sinhala => "Sinhala",
            OcrLanguage::French => "French",
            OcrLanguage::German => "German",
            OcrLanguage::Spanish => "Spanish",
            OcrLanguage::Hindi => "Hindi",
            OcrLanguage::Japanese => "Japanese",
            OcrLanguage::ChineseSimplified => "Chinese (Simplified)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|lang| lang.code() == code)
    }
}

/// Engine variant selection, mapped onto Tesseract OCR engine modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecognitionMode {
    /// Neural-network LSTM recognizer only
    #[default]
    LstmOnly,
    /// Whatever the installed engine considers its default
    EngineDefault,
}

impl RecognitionMode {
    /// Tesseract `--oem` value for this mode
    pub fn oem(&self) -> i32 {
        match self {
            RecognitionMode::LstmOnly => 1,
            RecognitionMode::EngineDefault => 3,
        }
    }
}

/// Status tag for the recognition phase; only events carrying this
/// status drive the visible progress bar.
pub const STATUS_RECOGNIZING: &str = "recognizing text";

/// Incremental status event emitted by an engine during recognition
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Engine-reported phase name
    pub status: String,
    /// Completion fraction in [0, 1]
    pub fraction: f32,
}

impl ProgressEvent {
    pub fn recognizing(fraction: f32) -> Self {
        Self {
            status: STATUS_RECOGNIZING.to_string(),
            fraction,
        }
    }
}

/// A configured engine handle good for one recognition. Dropping the
/// handle releases the backend on every exit path.
pub trait RecognitionEngine: Send {
    /// Recognize text in the image at `path`, reporting incremental
    /// progress through `on_progress`.
    fn recognize(
        &mut self,
        path: &Path,
        on_progress: &mut dyn FnMut(ProgressEvent),
    ) -> OcrResult<String>;
}

/// Builds engine handles for a language and mode. Shared with the
/// extraction worker thread, hence `Send + Sync`.
pub trait EngineFactory: Send + Sync {
    fn configure(
        &self,
        language: OcrLanguage,
        mode: RecognitionMode,
    ) -> OcrResult<Box<dyn RecognitionEngine>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_round_trip() {
        for lang in OcrLanguage::ALL {
            assert_eq!(OcrLanguage::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn unknown_language_code_is_rejected() {
        assert_eq!(OcrLanguage::from_code("klingon"), None);
        assert_eq!(OcrLanguage::from_code(""), None);
    }

    #[test]
    fn default_language_is_english() {
        assert_eq!(OcrLanguage::default(), OcrLanguage::English);
        assert_eq!(OcrLanguage::default().code(), "eng");
    }

    #[test]
    fn recognition_modes_map_to_engine_flags() {
        assert_eq!(RecognitionMode::LstmOnly.oem(), 1);
        assert_eq!(RecognitionMode::EngineDefault.oem(), 3);
        assert_eq!(RecognitionMode::default(), RecognitionMode::LstmOnly);
    }
}
