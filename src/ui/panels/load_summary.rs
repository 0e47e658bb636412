// GuildView - ui/panels/load_summary.rs
//
// Load summary window.
// Shows statistics for the most recent load and lists the lines that did
// not match the expected format.

use crate::app::state::AppState;
use crate::ui::theme;

/// Number of rejected lines listed before the "and N more" note.
const MAX_LISTED_REJECTS: usize = 200;

/// Render the load summary dialog (if state.show_load_summary is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_load_summary {
        return;
    }

    let mut open = true;
    let mut close_clicked = false;
    egui::Window::new(state.t("load_summary"))
        .id(egui::Id::new("load_summary"))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(480.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(ref summary) = state.load_summary {
                egui::Grid::new("load_summary_overview")
                    .num_columns(2)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(state.t("source_file"));
                        ui.label(
                            egui::RichText::new(summary.path.display().to_string())
                                .monospace()
                                .size(11.5),
                        );
                        ui.end_row();

                        ui.label(state.t("loaded_at"));
                        ui.label(summary.loaded_at.format("%Y-%m-%d %H:%M:%S").to_string());
                        ui.end_row();

                        ui.label(state.t("lines_processed"));
                        ui.label(summary.lines_processed.to_string());
                        ui.end_row();

                        ui.label(state.t("records_loaded"));
                        ui.label(summary.record_count.to_string());
                        ui.end_row();

                        ui.label(state.t("rejected_lines"));
                        let colour = if summary.rejected_count > 0 {
                            theme::WARN_COLOUR
                        } else {
                            ui.style().visuals.text_color()
                        };
                        ui.colored_label(colour, summary.rejected_count.to_string());
                        ui.end_row();
                    });

                ui.add_space(8.0);
                ui.separator();

                if summary.rejected.is_empty() {
                    ui.label(state.t("no_rejected"));
                } else {
                    ui.strong(state.t("rejected_lines"));
                    egui::ScrollArea::vertical()
                        .id_salt("load_summary_rejects")
                        .max_height(260.0)
                        .show(ui, |ui| {
                            egui::Grid::new("load_summary_reject_table")
                                .num_columns(2)
                                .striped(true)
                                .spacing([12.0, 3.0])
                                .show(ui, |ui| {
                                    for rejected in summary.rejected.iter().take(MAX_LISTED_REJECTS) {
                                        ui.label(
                                            egui::RichText::new(rejected.line_number.to_string())
                                                .weak()
                                                .monospace(),
                                        );
                                        ui.label(
                                            egui::RichText::new(&rejected.text)
                                                .monospace()
                                                .size(11.5),
                                        );
                                        ui.end_row();
                                    }
                                });
                        });
                    let hidden = summary.rejected_count.saturating_sub(MAX_LISTED_REJECTS);
                    if hidden > 0 {
                        ui.label(state.tf("more_rejected", &[("count", hidden.to_string().as_str())]));
                    }
                }
            } else {
                ui.label(state.t("error_table"));
            }

            // Startup warnings (config, locales) are listed here too.
            if !state.warnings.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("load_summary_warnings")
                    .max_height(120.0)
                    .show(ui, |ui| {
                        for warn in &state.warnings {
                            ui.label(egui::RichText::new(warn).color(theme::WARN_COLOUR).size(11.5));
                        }
                    });
            }

            ui.add_space(8.0);
            ui.separator();
            if ui.button(state.t("close")).clicked() {
                close_clicked = true;
            }
        });

    if !open || close_clicked {
        state.show_load_summary = false;
    }
}
