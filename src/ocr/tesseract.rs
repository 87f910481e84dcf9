//! Tesseract backend
//!
//! Wraps the `rusty-tesseract` CLI bridge. Configuration is cheap (it
//! only assembles CLI arguments); the actual engine process runs inside
//! `recognize` and exits with it, so dropping the handle leaves nothing
//! behind. The CLI reports no incremental progress, so the recognition
//! phase is bracketed with start and end events to keep the UI moving.

use std::path::Path;

use rusty_tesseract::Args;

use super::{
    EngineFactory, OcrError, OcrLanguage, OcrResult, ProgressEvent, RecognitionEngine,
    RecognitionMode,
};

/// Factory producing Tesseract-backed engine handles
pub struct TesseractFactory;

impl EngineFactory for TesseractFactory {
    fn configure(
        &self,
        language: OcrLanguage,
        mode: RecognitionMode,
    ) -> OcrResult<Box<dyn RecognitionEngine>> {
        let args = Args {
            lang: language.code().to_string(),
            oem: Some(mode.oem()),
            ..Args::default()
        };
        Ok(Box::new(TesseractEngine { args }))
    }
}

/// One-shot Tesseract engine handle
pub struct TesseractEngine {
    args: Args,
}

impl RecognitionEngine for TesseractEngine {
    fn recognize(
        &mut self,
        path: &Path,
        on_progress: &mut dyn FnMut(ProgressEvent),
    ) -> OcrResult<String> {
        on_progress(ProgressEvent {
            status: "loading image".to_string(),
            fraction: 0.0,
        });

        let image = rusty_tesseract::Image::from_path(path).map_err(|e| OcrError::ImageLoad {
            message: e.to_string(),
        })?;

        on_progress(ProgressEvent::recognizing(0.0));

        let text = rusty_tesseract::image_to_string(&image, &self.args).map_err(|e| {
            OcrError::Recognition {
                message: e.to_string(),
            }
        })?;

        on_progress(ProgressEvent::recognizing(1.0));

        tracing::debug!(lang = %self.args.lang, chars = text.len(), "tesseract recognition done");
        Ok(text)
    }
}
