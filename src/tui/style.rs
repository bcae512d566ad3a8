//! Color constants and small styling helpers for the TUI.

use ratatui::style::Color;

use crate::machine::ChapterStatus;
use crate::tariff::FuelType;

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Footer status message color.
pub const STATUS_FG: Color = Color::Yellow;
/// Electricity panels and bars.
pub const ELECTRICITY: Color = Color::Cyan;
/// Gas panels and bars.
pub const GAS: Color = Color::LightRed;
/// Concept the user has opened at least once.
pub const VISITED: Color = Color::Green;
/// Highlighted entry in a list.
pub const HIGHLIGHT: Color = Color::Magenta;
/// Story progress gauge.
pub const PROGRESS: Color = Color::Green;

/// Returns the accent color for a fuel.
pub fn fuel_color(fuel: &FuelType) -> Color {
    match fuel {
        FuelType::Electricity => ELECTRICITY,
        FuelType::Gas => GAS,
        FuelType::Other(_) => Color::Gray,
    }
}

/// Returns the marker and color for a chapter in the chapter strip.
pub fn chapter_marker(status: ChapterStatus) -> (&'static str, Color) {
    match status {
        ChapterStatus::Done => ("✓", Color::Green),
        ChapterStatus::Current => ("▶", Color::Yellow),
        ChapterStatus::Locked => ("·", Color::DarkGray),
    }
}

/// Marker shown next to a concept in the dashboard list.
pub fn visited_marker(visited: bool) -> &'static str {
    if visited { "●" } else { "○" }
}
