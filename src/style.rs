//! Status → colour mapping and the legend.
//!
//! The palette is keyed by the status string so hosts can add their own
//! statuses without touching the engine. Unknown statuses use `fallback`.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::zone::ZoneStatus;

/// An sRGB colour, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fill and stroke parameters for one status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneStyle {
    pub color: Rgb,
    /// Fill alpha at rest.
    pub fill_alpha: f64,
    /// Fill alpha when hovered, highlighted or selected.
    pub fill_alpha_active: f64,
    /// Stroke width in screen pixels at rest.
    pub stroke_width: f64,
    /// Stroke width in screen pixels when emphasised.
    pub stroke_width_active: f64,
}

impl Default for ZoneStyle {
    fn default() -> Self {
        Self::with_color(Rgb(148, 163, 184))
    }
}

impl ZoneStyle {
    #[must_use]
    pub fn with_color(color: Rgb) -> Self {
        Self { color, fill_alpha: 0.25, fill_alpha_active: 0.45, stroke_width: 2.0, stroke_width_active: 3.0 }
    }

    #[must_use]
    pub fn fill_css(&self, active: bool) -> String {
        let alpha = if active { self.fill_alpha_active } else { self.fill_alpha };
        let Rgb(r, g, b) = self.color;
        format!("rgba({r}, {g}, {b}, {alpha})")
    }

    #[must_use]
    pub fn stroke_css(&self) -> String {
        let Rgb(r, g, b) = self.color;
        format!("rgb({r}, {g}, {b})")
    }

    #[must_use]
    pub fn line_width(&self, active: bool) -> f64 {
        if active { self.stroke_width_active } else { self.stroke_width }
    }
}

/// Open status-to-style table.
///
/// Deserialized palettes are merged over [`StatusPalette::default`]: listed
/// entries replace or extend the built-in ones and `fallback` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PaletteOverrides")]
pub struct StatusPalette {
    pub entries: HashMap<String, ZoneStyle>,
    pub fallback: ZoneStyle,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct PaletteOverrides {
    entries: HashMap<String, ZoneStyle>,
    fallback: Option<ZoneStyle>,
}

impl From<PaletteOverrides> for StatusPalette {
    fn from(overrides: PaletteOverrides) -> Self {
        let mut palette = Self::default();
        palette.entries.extend(overrides.entries);
        if let Some(fallback) = overrides.fallback {
            palette.fallback = fallback;
        }
        palette
    }
}

impl Default for StatusPalette {
    fn default() -> Self {
        let entries = [
            (ZoneStatus::Available, Rgb(34, 197, 94)),
            (ZoneStatus::ComingSoon, Rgb(59, 130, 246)),
            (ZoneStatus::SoldOut, Rgb(239, 68, 68)),
            (ZoneStatus::Reserved, Rgb(245, 158, 11)),
            (ZoneStatus::Sold, Rgb(220, 38, 38)),
        ]
        .into_iter()
        .map(|(status, color)| (status.key().to_owned(), ZoneStyle::with_color(color)))
        .collect();
        Self { entries, fallback: ZoneStyle::default() }
    }
}

impl StatusPalette {
    /// Style for `status`, or the fallback for statuses the palette does not know.
    #[must_use]
    pub fn style_for(&self, status: &ZoneStatus) -> &ZoneStyle {
        self.entries.get(status.key()).unwrap_or(&self.fallback)
    }

    /// Add or replace the style for a status key.
    pub fn set(&mut self, status: &ZoneStatus, style: ZoneStyle) {
        self.entries.insert(status.key().to_owned(), style);
    }
}

/// One row of the on-canvas legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub status: ZoneStatus,
    pub label: String,
}

/// Legend rows for the three statuses hosts use most.
#[must_use]
pub fn default_legend() -> Vec<LegendEntry> {
    [(ZoneStatus::Available, "Available"), (ZoneStatus::Reserved, "Reserved"), (ZoneStatus::Sold, "Sold")]
        .into_iter()
        .map(|(status, label)| LegendEntry { status, label: label.to_owned() })
        .collect()
}
