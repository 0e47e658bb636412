// GuildView - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the menu bar, sidebar, table, status bar and dialogs.

use crate::app::state::AppState;
use crate::core::export::ExportFormat;
use crate::ui;
use crate::util::constants::APP_NAME;

/// The GuildView application.
pub struct GuildViewApp {
    pub state: AppState,

    /// (dark, accent) last applied to the egui context.
    applied_theme: Option<(bool, String)>,

    /// Window title last sent to the viewport.
    applied_title: String,
}

impl GuildViewApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            applied_theme: None,
            applied_title: String::new(),
        }
    }

    /// Re-apply visuals and the window title when preferences change.
    fn sync_appearance(&mut self, ctx: &egui::Context) {
        let theme_key = (self.state.prefs.is_dark(), self.state.prefs.accent_color.clone());
        if self.applied_theme.as_ref() != Some(&theme_key) {
            ui::theme::apply(ctx, &self.state.prefs);
            self.applied_theme = Some(theme_key);
        }

        let title = format!("{} - {APP_NAME}", self.state.t("title"));
        if title != self.applied_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.applied_title = title;
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                let state = &mut self.state;

                ui.menu_button(state.t("menu_file").to_string(), |ui| {
                    if ui.button(format!("{}\u{2026}", state.t("load_file"))).clicked() {
                        ui.close_menu();
                        ui::dialogs::open_guild_file(state);
                    }
                    ui.separator();
                    let can_export = state.session.is_loaded() && !state.session.is_empty();
                    ui.add_enabled_ui(can_export, |ui| {
                        ui.menu_button(state.t("export_as").to_string(), |ui| {
                            for format in ExportFormat::all() {
                                if ui.button(format!("{}\u{2026}", format.label())).clicked() {
                                    ui.close_menu();
                                    ui::dialogs::export_displayed(state, *format);
                                }
                            }
                        });
                    });
                    ui.separator();
                    if ui.button(state.t("exit")).clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button(state.t("menu_view").to_string(), |ui| {
                    if ui.button(state.t("load_summary")).clicked() {
                        state.show_load_summary = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.label(state.t("theme"));
                    let dark = state.prefs.is_dark();
                    if ui.radio(dark, state.t("theme_dark")).clicked() {
                        state.set_dark_mode(true);
                        ui.close_menu();
                    }
                    if ui.radio(!dark, state.t("theme_light")).clicked() {
                        state.set_dark_mode(false);
                        ui.close_menu();
                    }
                });

                ui.menu_button(state.t("menu_language").to_string(), |ui| {
                    let languages: Vec<(String, String)> = state
                        .translator
                        .languages()
                        .map(|(code, name)| (code.to_string(), name.to_string()))
                        .collect();
                    for (code, name) in languages {
                        let active = state.translator.language() == code;
                        if ui.radio(active, name).clicked() {
                            state.set_language(&code);
                            ui.close_menu();
                        }
                    }
                });

                ui.menu_button(state.t("menu_help").to_string(), |ui| {
                    if ui.button(state.t("about")).clicked() {
                        state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.state.session.is_loaded() {
                        ui.label(self.state.rows_shown_label());
                    }
                });
            });
        });
    }
}

impl eframe::App for GuildViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_appearance(ctx);

        // Ctrl+F (Cmd+F on macOS) focuses the search entry.
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::F)) {
            self.state.focus_search = true;
        }

        self.menu_bar(ctx);
        self.status_bar(ctx);

        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("sidebar_scroll")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::sidebar::render(ui, &mut self.state);
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if ui::panels::table::render(ui, &mut self.state).is_err() {
                ui.centered_and_justified(|ui| {
                    ui.label(self.state.t("error_table"));
                });
            }
        });

        // Modal-ish windows
        ui::panels::load_summary::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
        ui::panels::notification::render(ctx, &mut self.state);
    }
}
