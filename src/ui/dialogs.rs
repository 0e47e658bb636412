// GuildView - ui/dialogs.rs
//
// Native file dialogs for loading and exporting. Shared by the menu bar
// and the sidebar buttons.

use crate::app::state::AppState;
use crate::core::export::ExportFormat;
use crate::util::constants::{DEFAULT_EXPORT_STEM, INPUT_FILE_EXTENSIONS};
use crate::util::error::ExportError;

/// Ask for a guild list and load it. Cancelling the dialog does nothing.
pub fn open_guild_file(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title(state.t("load_file"))
        .add_filter("Text Files", INPUT_FILE_EXTENSIONS)
        .pick_file()
    else {
        return;
    };
    state.load_file(&path);
}

/// Ask for an export target and write the displayed rows to it.
///
/// `preferred` decides the first filter and the suggested file name; the
/// written format follows the extension actually chosen.
pub fn export_displayed(state: &mut AppState, preferred: ExportFormat) {
    if !state.session.is_loaded() || state.session.is_empty() {
        state.report_error("error_export", ExportError::NoData);
        return;
    }

    let mut dialog = rfd::FileDialog::new()
        .set_title(state.t("export_data"))
        .set_file_name(format!("{DEFAULT_EXPORT_STEM}.{}", preferred.extension()))
        .add_filter(preferred.label(), &[preferred.extension()]);
    for format in ExportFormat::all().iter().filter(|f| **f != preferred) {
        dialog = dialog.add_filter(format.label(), &[format.extension()]);
    }

    let Some(mut path) = dialog.save_file() else {
        return;
    };
    if path.extension().is_none() {
        path.set_extension(preferred.extension());
    }
    // Outcome is reported through the state's notification.
    let _ = state.export_to(&path);
}
