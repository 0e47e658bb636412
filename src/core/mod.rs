// GuildView - core/mod.rs
//
// Core business logic layer: parsing, the view session, export and locale
// catalogs.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod locale;
pub mod model;
pub mod parser;
pub mod view;
