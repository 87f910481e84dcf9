//! Extraction session view model
//!
//! The single page is rendered from this plain state struct every
//! frame; user events and worker updates are pure transitions on it.
//! Phases: Idle -> FileSelected -> Processing -> Completed | Failed,
//! with Clear returning to Idle from anywhere.

use std::path::PathBuf;

use crate::ocr::{OcrLanguage, ProgressEvent, STATUS_RECOGNIZING};

/// Stored when a recognition produced no output
pub const NO_TEXT_SENTINEL: &str = "No text found in the image.";
/// Stored when a recognition failed
pub const ERROR_SENTINEL: &str = "Error extracting text. Please try again.";

/// Where the session currently is in the extraction workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    FileSelected,
    Processing,
    Completed,
    Failed,
}

/// The single file retained from the last accepted selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
}

/// How a finished recognition should be reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    TextFound,
    NoTextFound,
    Failed,
}

#[derive(Debug, Default)]
pub struct ExtractSession {
    pub phase: Phase,
    pub file: Option<SelectedFile>,
    /// Empty until a recognition finishes; then real output or a sentinel
    pub extracted: String,
    /// Percentage 0-100; forced to 100 when a recognition ends
    pub progress: u8,
    pub language: OcrLanguage,
}

impl ExtractSession {
    pub fn is_processing(&self) -> bool {
        self.phase == Phase::Processing
    }

    /// Intake accepted a new file: previous file, text and progress are
    /// replaced wholesale.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
        self.extracted.clear();
        self.progress = 0;
        self.phase = Phase::FileSelected;
    }

    /// Intake refused the whole selection: drop everything held so far.
    pub fn reject_selection(&mut self) {
        self.reset();
    }

    /// Recognition was triggered for the current file.
    pub fn begin_extraction(&mut self) {
        self.extracted.clear();
        self.progress = 0;
        self.phase = Phase::Processing;
    }

    /// Apply an engine progress event. Only the recognition phase moves
    /// the bar, only while a job is in flight, and never backwards.
    pub fn apply_progress(&mut self, event: &ProgressEvent) {
        if self.phase != Phase::Processing || event.status != STATUS_RECOGNIZING {
            return;
        }
        let percent = (event.fraction.clamp(0.0, 1.0) * 100.0).floor() as u8;
        if percent > self.progress {
            self.progress = percent;
        }
    }

    /// Recognition finished with engine output.
    pub fn complete(&mut self, text: String) -> CompletionKind {
        self.progress = 100;
        self.phase = Phase::Completed;
        if text.trim().is_empty() {
            self.extracted = NO_TEXT_SENTINEL.to_string();
            CompletionKind::NoTextFound
        } else {
            self.extracted = text;
            CompletionKind::TextFound
        }
    }

    /// Recognition failed; the raw error stays in the logs, the session
    /// only keeps the sentinel.
    pub fn fail(&mut self) -> CompletionKind {
        self.progress = 100;
        self.phase = Phase::Failed;
        self.extracted = ERROR_SENTINEL.to_string();
        CompletionKind::Failed
    }

    /// True when the extracted text is real engine output rather than
    /// empty or a sentinel placeholder.
    pub fn has_usable_text(&self) -> bool {
        !self.extracted.is_empty()
            && self.extracted != NO_TEXT_SENTINEL
            && self.extracted != ERROR_SENTINEL
    }

    /// Clear-all: back to a fresh session. The language choice survives.
    pub fn reset(&mut self) {
        self.file = None;
        self.extracted.clear();
        self.progress = 0;
        self.phase = Phase::Idle;
    }
}
