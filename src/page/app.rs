//! Page application
//!
//! Composes header, body and footer, pumps worker updates into the
//! session at the top of every frame, and turns the per-frame command
//! flags from the view into intake, extraction and result actions.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use eframe::egui;
use egui::RichText;

use crate::actions;
use crate::config::{save_config, AppConfig};
use crate::intake::{self, IntakeOutcome, MAX_TOTAL_SIZE_MB};
use crate::ocr::tesseract::TesseractFactory;
use crate::ocr::worker::{spawn_extraction, ExtractionJob, ExtractionUpdate};
use crate::ocr::{EngineFactory, OcrLanguage, RecognitionMode};
use crate::page::components::toasts::{Toast, ToastCenter};
use crate::page::theme::{self, Palette, ThemeMode};
use crate::page::views::extract::{format_size, PageCommands, PreviewImage};
use crate::page::views::render_extract_view;
use crate::session::{CompletionKind, ExtractSession};

/// File extensions offered by the image picker
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"];

/// The single-window application
pub struct TextTrackApp {
    session: ExtractSession,
    toasts: ToastCenter,
    theme_mode: ThemeMode,
    /// Mode last applied to the context; `None` until the first frame
    theme_applied: Option<ThemeMode>,
    preview: Option<PreviewImage>,
    /// In-flight recognition, at most one
    job: Option<ExtractionJob>,
    engine_factory: Arc<dyn EngineFactory>,
    config: AppConfig,
    config_path: Option<PathBuf>,
    /// Language last treated as in sync with the saved config. Seeded
    /// with the effective startup value, so a `--language` override is
    /// never written back; only picker changes count as drift.
    language_baseline: OcrLanguage,
}

impl TextTrackApp {
    pub fn new(
        config: AppConfig,
        config_path: Option<PathBuf>,
        language_override: Option<OcrLanguage>,
        engine_factory: Arc<dyn EngineFactory>,
    ) -> Self {
        let startup_language = language_override.unwrap_or_else(|| config.ocr.language());
        let mut session = ExtractSession::default();
        session.language = startup_language;

        Self {
            session,
            toasts: ToastCenter::default(),
            theme_mode: config.general.theme,
            theme_applied: None,
            preview: None,
            job: None,
            engine_factory,
            config,
            config_path,
            language_baseline: startup_language,
        }
    }

    /// Create eframe options for the page window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([880.0, 720.0])
                .with_min_inner_size([600.0, 480.0])
                .with_title("TextTrack"),
            ..Default::default()
        }
    }

    fn palette(&self) -> Palette {
        Palette::of(self.theme_mode)
    }

    /// Drain pending worker updates in arrival order.
    fn pump_extraction(&mut self) {
        let Some(job) = &self.job else { return };

        let mut updates = Vec::new();
        while let Some(update) = job.try_next_update() {
            updates.push(update);
        }

        let mut finished = false;
        for update in updates {
            if apply_extraction_update(&mut self.session, &mut self.toasts, update) {
                finished = true;
            }
        }
        if finished {
            self.job = None;
        }
    }

    fn handle_commands(&mut self, ctx: &egui::Context, commands: PageCommands) {
        if commands.pick_files {
            self.handle_pick_files(ctx);
        }
        if commands.start_extraction {
            self.handle_start_extraction();
        }
        if commands.copy_text {
            self.handle_copy();
        }
        if commands.download_text {
            self.handle_download();
        }
        if commands.clear_all {
            self.handle_clear();
        }
    }

    fn handle_pick_files(&mut self, ctx: &egui::Context) {
        let picked = rfd::FileDialog::new()
            .set_title("Select image(s)")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_files();

        // Cancelled dialog leaves the session untouched, like an empty
        // selection.
        if let Some(paths) = picked {
            self.apply_picked_paths(ctx, paths);
        }
    }

    fn apply_picked_paths(&mut self, ctx: &egui::Context, paths: Vec<PathBuf>) {
        let candidates = match intake::load_candidates(&paths) {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!(error = %err, "selection could not be read");
                self.toasts.push(
                    Toast::error("Could not read selection").with_description(err.to_string()),
                );
                return;
            }
        };
        self.apply_intake_outcome(ctx, intake::evaluate_selection(candidates));
    }

    fn apply_intake_outcome(&mut self, ctx: &egui::Context, outcome: IntakeOutcome) {
        match outcome {
            IntakeOutcome::Empty => {}
            IntakeOutcome::RejectedTooLarge { total_bytes } => {
                self.session.reject_selection();
                self.preview = None;
                self.toasts
                    .push(Toast::error("Upload limit exceeded").with_description(format!(
                        "Total file size cannot exceed {MAX_TOTAL_SIZE_MB} MB \
                         (selected {}). Please select smaller files.",
                        format_size(total_bytes)
                    )));
            }
            IntakeOutcome::Accepted { file, ignored } => {
                self.preview = match load_preview(ctx, &file.path) {
                    Ok(preview) => Some(preview),
                    Err(err) => {
                        tracing::warn!(error = %err, "preview decode failed");
                        self.toasts.push(
                            Toast::info("Preview unavailable").with_description(
                                "The image could not be decoded for display. \
                                 Extraction can still be attempted.",
                            ),
                        );
                        None
                    }
                };
                self.toasts.push(
                    Toast::success("Image ready")
                        .with_description(format!("Selected: {}", file.name)),
                );
                if ignored > 0 {
                    self.toasts.push(
                        Toast::info("Multiple files selected")
                            .with_description(
                                "Only the first image will be processed. \
                                 Batch processing is not supported yet.",
                            )
                            .with_duration(Duration::from_secs(5)),
                    );
                }
                self.session.select_file(file);
            }
        }
    }

    fn handle_start_extraction(&mut self) {
        if self.session.is_processing() {
            return;
        }
        let Some(file) = self.session.file.clone() else {
            self.toasts.push(
                Toast::error("No image selected")
                    .with_description("Select an image file to process."),
            );
            return;
        };

        self.session.begin_extraction();
        self.toasts.push(
            Toast::info("Processing image").with_description("This might take a moment."),
        );
        self.job = Some(spawn_extraction(
            self.engine_factory.clone(),
            file.path,
            self.session.language,
            RecognitionMode::default(),
        ));
    }

    fn handle_copy(&mut self) {
        let Some(text) = actions::exportable_text(&self.session) else {
            self.toasts.push(
                Toast::error("Nothing to copy")
                    .with_description("Extract text from an image first."),
            );
            return;
        };

        match actions::copy_to_clipboard(text) {
            Ok(()) => self.toasts.push(Toast::success("Copied to clipboard")),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard write failed");
                self.toasts.push(
                    Toast::error("Copy failed")
                        .with_description("Could not copy text to the clipboard."),
                );
            }
        }
    }

    fn handle_download(&mut self) {
        let Some(text) = actions::exportable_text(&self.session) else {
            self.toasts.push(
                Toast::error("Nothing to download")
                    .with_description("Extract text from an image first."),
            );
            return;
        };
        let text = text.to_owned();

        let suggested = self
            .session
            .file
            .as_ref()
            .map(|file| actions::derive_download_name(&file.name))
            .unwrap_or_else(|| actions::DEFAULT_DOWNLOAD_NAME.to_string());

        let picked = rfd::FileDialog::new()
            .set_title("Save extracted text")
            .set_file_name(&suggested)
            .add_filter("Text", &["txt"])
            .save_file();

        // Cancelling the save dialog is not an error.
        let Some(path) = picked else { return };

        match actions::write_text_file(&path, &text) {
            Ok(()) => self.toasts.push(
                Toast::success("Text saved")
                    .with_description(format!("Saved to {}", path.display())),
            ),
            Err(err) => {
                tracing::warn!(error = %err, "text save failed");
                self.toasts.push(
                    Toast::error("Save failed").with_description("Could not write the file."),
                );
            }
        }
    }

    fn handle_clear(&mut self) {
        self.session.reset();
        self.preview = None;
        // No mid-flight cancellation: a running job is detached and its
        // late updates are discarded with the receiver.
        self.job = None;
        self.toasts.push(
            Toast::info("All cleared").with_description("Inputs and results have been reset."),
        );
    }

    /// Persist theme and language when the user changes them.
    fn persist_settings(&mut self) {
        let theme_changed = self.config.general.theme != self.theme_mode;
        let language_changed = self.session.language != self.language_baseline;
        if !theme_changed && !language_changed {
            return;
        }

        self.config.general.theme = self.theme_mode;
        if language_changed {
            self.language_baseline = self.session.language;
            self.config.ocr.default_language = self.session.language.code().to_string();
        }

        if let Some(path) = &self.config_path {
            if let Err(err) = save_config(&self.config, path) {
                tracing::warn!(error = %err, "failed to save settings");
            }
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        let palette = self.palette();
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("TextTrack")
                        .size(20.0)
                        .color(palette.accent)
                        .strong(),
                );
                ui.label(
                    RichText::new("image to text")
                        .size(12.0)
                        .color(palette.text_muted),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(self.theme_mode.toggle_label()).clicked() {
                        self.theme_mode = self.theme_mode.toggled();
                    }
                });
            });
            ui.add_space(8.0);
        });
    }

    fn render_footer(&self, ctx: &egui::Context) {
        let palette = self.palette();
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(
                        "Tip: for best results, use clear images with good contrast.",
                    )
                    .size(12.0)
                    .color(palette.text_muted),
                );
                ui.label(
                    RichText::new("Powered by Tesseract")
                        .size(11.0)
                        .color(palette.text_muted),
                );
            });
            ui.add_space(6.0);
        });
    }
}

impl eframe::App for TextTrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.theme_applied != Some(self.theme_mode) {
            theme::apply_theme(ctx, self.theme_mode);
            self.theme_applied = Some(self.theme_mode);
        }

        self.pump_extraction();

        // Progress must render without further input events while a
        // recognition is in flight.
        if self.job.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.render_header(ctx);
        self.render_footer(ctx);

        let mut commands = PageCommands::default();
        let palette = self.palette();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none().inner_margin(24.0).show(ui, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    render_extract_view(
                        ui,
                        &mut self.session,
                        self.preview.as_ref(),
                        &mut commands,
                        &palette,
                    );
                });
            });
        });

        self.handle_commands(ctx, commands);
        self.persist_settings();

        let palette = self.palette();
        self.toasts.render(ctx, &palette);
    }
}

/// Apply one worker update to the session, raising the matching toast.
/// Returns true when the update was terminal.
fn apply_extraction_update(
    session: &mut ExtractSession,
    toasts: &mut ToastCenter,
    update: ExtractionUpdate,
) -> bool {
    match update {
        ExtractionUpdate::Progress(event) => {
            session.apply_progress(&event);
            false
        }
        ExtractionUpdate::Finished(Ok(text)) => {
            match session.complete(text) {
                CompletionKind::TextFound => toasts.push(
                    Toast::success("Text extracted successfully")
                        .with_description("The result is shown below."),
                ),
                CompletionKind::NoTextFound => toasts.push(
                    Toast::success("Extraction finished")
                        .with_description("No text was found in the provided image."),
                ),
                CompletionKind::Failed => {}
            }
            true
        }
        ExtractionUpdate::Finished(Err(err)) => {
            // Raw error goes to the log only; the user gets a generic
            // message and the sentinel text.
            tracing::error!(error = %err, "recognition failed");
            session.fail();
            toasts.push(
                Toast::error("OCR failed")
                    .with_description("Could not extract text. Try another image or language."),
            );
            true
        }
    }
}

/// Decode the selected image into a preview texture.
fn load_preview(ctx: &egui::Context, path: &Path) -> Result<PreviewImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    let texture = ctx.load_texture("image_preview", color_image, egui::TextureOptions::LINEAR);
    Ok(PreviewImage { texture })
}

/// Run the page application
pub fn run_app(
    config: AppConfig,
    config_path: Option<PathBuf>,
    language_override: Option<OcrLanguage>,
) -> Result<(), eframe::Error> {
    let app = TextTrackApp::new(
        config,
        config_path,
        language_override,
        Arc::new(TesseractFactory),
    );
    eframe::run_native("TextTrack", TextTrackApp::options(), Box::new(|_cc| Ok(Box::new(app))))
}
