// GuildView - ui/theme.rs
//
// Colour scheme, accent colour handling, and layout constants.
// No dependencies on app state or business logic.

use crate::platform::prefs::Preferences;
use egui::Color32;

/// Notification title colours.
pub const SUCCESS_COLOUR: Color32 = Color32::from_rgb(34, 197, 94); // Green 500
pub const ERROR_COLOUR: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Highlight for counts that need attention (rejected lines).
pub const WARN_COLOUR: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300

/// Accent used when the preference value cannot be parsed.
pub const FALLBACK_ACCENT: Color32 = Color32::from_rgb(0, 123, 255);

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 250.0;
pub const HEADER_HEIGHT: f32 = 24.0;
pub const MIN_COLUMN_WIDTH: f32 = 100.0;
pub const SECTION_SPACING: f32 = 12.0;

/// Parse `#rrggbb` (leading '#' optional) into a colour.
pub fn parse_hex_colour(value: &str) -> Option<Color32> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Apply the dark/light theme and accent colour from `prefs` to `ctx`.
pub fn apply(ctx: &egui::Context, prefs: &Preferences) {
    let accent = parse_hex_colour(&prefs.accent_color).unwrap_or_else(|| {
        tracing::warn!(value = %prefs.accent_color, "Invalid accent colour, using default");
        FALLBACK_ACCENT
    });

    let mut visuals = if prefs.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    visuals.selection.bg_fill = accent;
    visuals.hyperlink_color = accent;
    visuals.widgets.hovered.bg_stroke.color = accent;
    ctx.set_visuals(visuals);

    tracing::debug!(theme = %prefs.theme, accent = %prefs.accent_color, "Theme applied");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colour() {
        assert_eq!(
            parse_hex_colour("#007bff"),
            Some(Color32::from_rgb(0, 123, 255))
        );
        assert_eq!(parse_hex_colour("FF0000"), Some(Color32::from_rgb(255, 0, 0)));
        assert_eq!(parse_hex_colour("#12345"), None);
        assert_eq!(parse_hex_colour("#zzzzzz"), None);
        assert_eq!(parse_hex_colour("#ééé"), None);
    }
}
