//! Extract view - the single page body
//!
//! Rendered as a pure function of the session: language picker, file
//! selection, preview, extract trigger with progress, result text and
//! the copy/download actions. User intent is reported back through
//! per-frame command flags the app processes after rendering.

use egui::RichText;

use crate::ocr::OcrLanguage;
use crate::page::theme::Palette;
use crate::session::{ExtractSession, Phase};

/// Decoded preview texture for the selected image. Replacing or
/// dropping it releases the old GPU texture.
pub struct PreviewImage {
    pub texture: egui::TextureHandle,
}

/// Intent flags set during one frame of rendering
#[derive(Debug, Default)]
pub struct PageCommands {
    pub pick_files: bool,
    pub start_extraction: bool,
    pub copy_text: bool,
    pub download_text: bool,
    pub clear_all: bool,
}

/// Render the page body
pub fn render_extract_view(
    ui: &mut egui::Ui,
    session: &mut ExtractSession,
    preview: Option<&PreviewImage>,
    commands: &mut PageCommands,
    palette: &Palette,
) {
    ui.vertical_centered(|ui| {
        ui.heading(
            RichText::new("Image to Text")
                .size(26.0)
                .color(palette.accent)
                .strong(),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(
                "Upload images (up to 20 MB total). Text is extracted from the first one.",
            )
            .size(14.0)
            .color(palette.text_secondary),
        );
    });
    ui.add_space(16.0);

    render_input_row(ui, session, commands, palette);
    ui.add_space(12.0);

    if let Some(file) = session.file.clone() {
        render_selected_file(ui, &file.name, file.size_bytes, commands, palette);
        ui.add_space(8.0);
    }

    if let Some(preview) = preview {
        render_preview(ui, preview, palette);
        ui.add_space(12.0);
    }

    if session.file.is_some() {
        render_extract_trigger(ui, session, commands);
        ui.add_space(8.0);
    }

    if session.is_processing() {
        render_progress(ui, session, palette);
    }

    if !session.is_processing() && !session.extracted.is_empty() {
        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);
        render_result(ui, session, commands, palette);
    }
}

fn render_input_row(
    ui: &mut egui::Ui,
    session: &mut ExtractSession,
    commands: &mut PageCommands,
    palette: &Palette,
) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Language:")
                .size(14.0)
                .color(palette.text_secondary),
        );
        egui::ComboBox::from_id_salt("ocr_language")
            .selected_text(session.language.label())
            .width(180.0)
            .show_ui(ui, |ui| {
                for language in OcrLanguage::ALL {
                    ui.selectable_value(&mut session.language, language, language.label());
                }
            });

        ui.add_space(16.0);

        if ui.button("Select Images...").clicked() {
            commands.pick_files = true;
        }
    });
}

fn render_selected_file(
    ui: &mut egui::Ui,
    name: &str,
    size_bytes: u64,
    commands: &mut PageCommands,
    palette: &Palette,
) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{} ({})", name, format_size(size_bytes)))
                .size(14.0)
                .color(palette.text_primary),
        );
        if ui.small_button("Clear").clicked() {
            commands.clear_all = true;
        }
    });
}

fn render_preview(ui: &mut egui::Ui, preview: &PreviewImage, palette: &Palette) {
    egui::Frame::none()
        .fill(palette.bg_medium)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.label(
                RichText::new("Preview")
                    .size(13.0)
                    .color(palette.text_muted),
            );
            ui.add_space(4.0);

            let available_width = ui.available_width() - 4.0;
            let tex_size = preview.texture.size_vec2();
            let scale = (available_width / tex_size.x).min(320.0 / tex_size.y).min(1.0);
            let scaled = tex_size * scale;

            let (rect, _) = ui.allocate_exact_size(scaled, egui::Sense::hover());
            ui.painter().image(
                preview.texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        });
}

fn render_extract_trigger(
    ui: &mut egui::Ui,
    session: &ExtractSession,
    commands: &mut PageCommands,
) {
    let processing = session.is_processing();
    ui.horizontal(|ui| {
        let button = egui::Button::new(if processing {
            "Processing Image..."
        } else {
            "Extract Text"
        })
        .min_size(egui::vec2(160.0, 36.0));

        // Single recognition in flight: the trigger is disabled while
        // one is running.
        if ui.add_enabled(!processing, button).clicked() {
            commands.start_extraction = true;
        }
        if processing {
            ui.spinner();
        }
    });
}

fn render_progress(ui: &mut egui::Ui, session: &ExtractSession, palette: &Palette) {
    ui.add_space(4.0);
    ui.add(
        egui::ProgressBar::new(f32::from(session.progress) / 100.0)
            .desired_width(ui.available_width())
            .show_percentage(),
    );
    ui.label(
        RichText::new(format!("{}% complete", session.progress))
            .size(13.0)
            .color(palette.text_muted),
    );
}

fn render_result(
    ui: &mut egui::Ui,
    session: &ExtractSession,
    commands: &mut PageCommands,
    palette: &Palette,
) {
    let heading_color = match session.phase {
        Phase::Failed => palette.accent_error,
        _ => palette.accent,
    };
    ui.label(
        RichText::new("Extracted Text")
            .size(18.0)
            .color(heading_color)
            .strong(),
    );
    ui.add_space(6.0);

    ui.add(
        egui::TextEdit::multiline(&mut session.extracted.as_str())
            .desired_rows(10)
            .desired_width(f32::INFINITY)
            .font(egui::TextStyle::Monospace),
    );

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.button("Copy Text").clicked() {
            commands.copy_text = true;
        }
        if ui.button("Download .txt").clicked() {
            commands.download_text = true;
        }
    });
}

/// Human-readable file size for the selected-file row
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_format_in_sensible_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(format_size(1536), "1.5 KB");
    }

    #[test]
    fn commands_default_to_no_intent() {
        let commands = PageCommands::default();
        assert!(!commands.pick_files);
        assert!(!commands.start_extraction);
        assert!(!commands.copy_text);
        assert!(!commands.download_text);
        assert!(!commands.clear_all);
    }
}
