// GuildView - ui/panels/notification.rs
//
// Modal notification window for errors and successful exports.
// Stays open until dismissed; the rest of the UI remains usable.

use crate::app::state::{AppState, NotificationKind};
use crate::ui::theme;

/// Render the pending notification (if any).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let Some(notification) = state.notification.as_ref() else {
        return;
    };

    let colour = match notification.kind {
        NotificationKind::Success => theme::SUCCESS_COLOUR,
        NotificationKind::Error => theme::ERROR_COLOUR,
    };
    let ok_label = state.t("ok").to_string();

    let mut open = true;
    let mut dismissed = false;
    egui::Window::new(egui::RichText::new(&notification.title).color(colour).strong())
        .id(egui::Id::new("notification"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(&notification.message);
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if ui.button(ok_label).clicked() {
                    dismissed = true;
                }
            });
        });

    let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
    if !open || dismissed || escape {
        state.notification = None;
    }
}
