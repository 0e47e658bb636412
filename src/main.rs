// GuildView - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Preferences and locale catalog loading
// 4. Optional initial file load
// 5. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use guildview::app;
pub use guildview::core;
pub use guildview::platform;
pub use guildview::ui;
pub use guildview::util;

use clap::Parser;
use std::path::PathBuf;
use util::error::{DisplayError, GuildViewError};

/// GuildView - view, sort, search and export guild listings.
///
/// Reads text files with one guild per line in the form
/// `NAME - MEMBER_COUNT - ID - OWNER`.
#[derive(Parser, Debug)]
#[command(name = "GuildView", version, about)]
struct Cli {
    /// Guild list to load at startup.
    file: Option<PathBuf>,

    /// Preferences file to use instead of the platform default.
    #[arg(long = "prefs")]
    prefs: Option<PathBuf>,

    /// Additional directory containing user locale catalogs.
    #[arg(long = "locale-dir")]
    locale_dir: Option<PathBuf>,

    /// Language code for this run (overrides the saved preference).
    #[arg(long = "lang")]
    lang: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging starts so its level can take part in
    // filter resolution; its warnings are logged once the subscriber is up.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) =
        platform::config::load_config(&platform_paths.config_file());

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "GuildView starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    // Preferences: CLI override > platform default
    let prefs_path = cli
        .prefs
        .clone()
        .unwrap_or_else(|| platform_paths.preferences_file());
    let (prefs, _) = platform::prefs::load_or_create(&prefs_path);

    // Locale catalogs: CLI directory > platform default
    let locale_dir = cli
        .locale_dir
        .as_deref()
        .unwrap_or(&platform_paths.locales_dir);
    let (catalogs, locale_errors) = app::locale_mgr::load_all_catalogs(Some(locale_dir));
    for err in &locale_errors {
        tracing::warn!(error = %err, "Locale loading warning");
    }

    let language = cli.lang.clone().unwrap_or_else(|| prefs.language.clone());
    let translator = crate::core::locale::Translator::new(catalogs, &language);

    let mut state = app::state::AppState::new(config, prefs, Some(prefs_path), translator);
    state.warnings.extend(config_warnings);
    state.warnings.extend(
        locale_errors
            .into_iter()
            .map(|e| GuildViewError::from(e).to_string()),
    );

    if let Some(ref path) = cli.file {
        state.load_file(path);
    }

    tracing::info!(
        language = state.translator.language(),
        locales = state.translator.catalogs().len(),
        "Ready to launch GUI"
    );

    if let Err(e) = run(state) {
        let err = GuildViewError::from(e);
        tracing::error!(error = %err, "Failed to launch GUI");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Open the native window and run the event loop until it closes.
fn run(state: app::state::AppState) -> Result<(), DisplayError> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(gui::GuildViewApp::new(state)))),
    )
    .map_err(|source| DisplayError::Launch { source })
}
