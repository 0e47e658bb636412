// GuildView - platform/mod.rs
//
// Platform abstraction layer: directories, config files, preferences and
// input file reading.
// Must NOT depend on: app, ui.

pub mod config;
pub mod fs;
pub mod prefs;
