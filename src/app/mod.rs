// GuildView - app/mod.rs
//
// Application layer: orchestration, state management, locale loading.
// Dependencies: core and platform layers.
// Must NOT depend on: ui.

pub mod loader;
pub mod locale_mgr;
pub mod state;
