// GuildView - ui/panels/sidebar.rs
//
// Left sidebar: file management, sort controls and search controls.

use crate::app::state::AppState;
use crate::core::export::ExportFormat;
use crate::core::locale::Translator;
use crate::core::model::{Field, SortOrder};
use crate::ui::{dialogs, theme};

/// Render the sidebar sections.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading(state.t("title"));
    ui.add_space(theme::SECTION_SPACING);

    file_section(ui, state);
    ui.add_space(theme::SECTION_SPACING);
    sort_section(ui, state);
    ui.add_space(theme::SECTION_SPACING);
    search_section(ui, state);
}

fn file_section(ui: &mut egui::Ui, state: &mut AppState) {
    ui.strong(state.t("file_management"));
    ui.separator();

    let full = egui::vec2(ui.available_width(), 0.0);
    if ui
        .add_sized(full, egui::Button::new(state.t("load_file")))
        .clicked()
    {
        dialogs::open_guild_file(state);
    }
    if ui
        .add_sized(full, egui::Button::new(state.t("export_data")))
        .clicked()
    {
        dialogs::export_displayed(state, ExportFormat::Xlsx);
    }
}

fn sort_section(ui: &mut egui::Ui, state: &mut AppState) {
    ui.strong(state.t("sort"));
    ui.separator();

    field_combo(ui, "sort_field", &state.translator, &mut state.sort_field);

    let width = ui.available_width();
    let selected = state.translator.order_label(state.sort_order).to_string();
    egui::ComboBox::from_id_salt("sort_order")
        .width(width)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for order in [SortOrder::Ascending, SortOrder::Descending] {
                let label = state.translator.order_label(order).to_string();
                ui.selectable_value(&mut state.sort_order, order, label);
            }
        });

    let enabled = state.session.is_loaded();
    if ui
        .add_enabled(
            enabled,
            egui::Button::new(state.t("sort_button")).min_size(egui::vec2(width, 0.0)),
        )
        .clicked()
    {
        state.apply_sort();
    }
}

fn search_section(ui: &mut egui::Ui, state: &mut AppState) {
    ui.strong(state.t("search"));
    ui.separator();

    field_combo(ui, "search_field", &state.translator, &mut state.search_field);

    let placeholder = state.t("search_placeholder").to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.search_term)
            .hint_text(placeholder)
            .desired_width(f32::INFINITY),
    );
    if state.focus_search {
        response.request_focus();
        state.focus_search = false;
    }
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    let case_label = state.t("case_sensitive").to_string();
    ui.checkbox(&mut state.search_case_sensitive, case_label);
    let regex_label = state.t("regex_search").to_string();
    ui.checkbox(&mut state.search_regex, regex_label);

    let width = ui.available_width();
    let clicked = ui
        .add_enabled(
            state.session.is_loaded(),
            egui::Button::new(state.t("search_button")).min_size(egui::vec2(width, 0.0)),
        )
        .clicked();

    if submitted || clicked {
        state.apply_search();
    }
}

/// Column selector showing localized labels for a `Field` value.
fn field_combo(ui: &mut egui::Ui, id: &str, translator: &Translator, target: &mut Field) {
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(translator.field_label(*target).to_string())
        .show_ui(ui, |ui| {
            for field in Field::all() {
                ui.selectable_value(target, *field, translator.field_label(*field).to_string());
            }
        });
}
