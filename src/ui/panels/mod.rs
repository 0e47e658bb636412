// GuildView - ui/panels/mod.rs

pub mod about;
pub mod load_summary;
pub mod notification;
pub mod sidebar;
pub mod table;
