// GuildView - ui/panels/table.rs
//
// Central guild table. Re-renders the full displayed sequence every frame;
// egui_extras only lays out the rows that are visible.
//
// Header clicks, row selection and clipboard requests are collected while
// the table borrows `state` and applied once it has been drawn.

use crate::app::state::AppState;
use crate::core::model::Field;
use crate::ui::theme;
use crate::util::error::DisplayError;
use egui_extras::{Column, TableBuilder};

/// What the user asked to copy from the context menu.
enum CopyRequest {
    Field(usize, Field),
    Row(usize),
}

/// Render the guild table. Fails with `DisplayError::NoTable` when nothing
/// has been loaded yet, leaving the caller to show a placeholder.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Result<(), DisplayError> {
    if !state.session.is_loaded() {
        return Err(DisplayError::NoTable);
    }

    let headers: Vec<(Field, String)> = Field::all()
        .iter()
        .map(|field| (*field, state.translator.field_label(*field).to_string()))
        .collect();
    let copy_id_label = state.t("copy_guild_id").to_string();
    let copy_owner_label = state.t("copy_owner").to_string();
    let copy_all_label = state.t("copy_all").to_string();

    let sort_field = state.sort_field;
    let sort_ascending = state.sort_order.is_ascending();
    let selected = state.selected_row;
    let row_height = state.config.row_height;
    let session = &state.session;

    let mut header_clicked: Option<Field> = None;
    let mut row_clicked: Option<usize> = None;
    let mut copy_request: Option<CopyRequest> = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .sense(egui::Sense::click())
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(
            Column::remainder()
                .at_least(theme::MIN_COLUMN_WIDTH)
                .clip(true),
            headers.len(),
        )
        .header(theme::HEADER_HEIGHT, |mut header| {
            for (field, label) in &headers {
                header.col(|ui| {
                    let arrow = match (*field == sort_field, sort_ascending) {
                        (true, true) => " \u{25b2}",
                        (true, false) => " \u{25bc}",
                        (false, _) => "",
                    };
                    let text = egui::RichText::new(format!("{label}{arrow}")).strong();
                    let response = ui.add(
                        egui::Label::new(text)
                            .sense(egui::Sense::click())
                            .truncate(),
                    );
                    if response.clicked() {
                        header_clicked = Some(*field);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(row_height, session.len(), |mut row| {
                let idx = row.index();
                let Some(record) = session.record_at(idx) else {
                    return;
                };
                row.set_selected(selected == Some(idx));

                for field in Field::all() {
                    row.col(|ui| {
                        let text = record.field_text(*field);
                        if field.is_numeric() {
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| ui.label(&*text),
                            );
                        } else {
                            ui.add(egui::Label::new(&*text).truncate());
                        }
                    });
                }

                let response = row.response();
                if response.clicked() || response.secondary_clicked() {
                    row_clicked = Some(idx);
                }
                response.context_menu(|ui| {
                    if ui.button(copy_id_label.as_str()).clicked() {
                        copy_request = Some(CopyRequest::Field(idx, Field::Id));
                        ui.close_menu();
                    }
                    if ui.button(copy_owner_label.as_str()).clicked() {
                        copy_request = Some(CopyRequest::Field(idx, Field::Owner));
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button(copy_all_label.as_str()).clicked() {
                        copy_request = Some(CopyRequest::Row(idx));
                        ui.close_menu();
                    }
                });
            });
        });

    if let Some(field) = header_clicked {
        state.sort_by_header(field);
    }
    if let Some(idx) = row_clicked {
        state.selected_row = Some(idx);
    }
    if let Some(request) = copy_request {
        let text = match request {
            CopyRequest::Field(idx, field) => state.copy_field(idx, field),
            CopyRequest::Row(idx) => state.copy_row(idx),
        };
        if let Some(text) = text {
            ui.ctx().copy_text(text);
            state.status_message = state.t("status_copied").to_string();
        }
    }

    Ok(())
}
