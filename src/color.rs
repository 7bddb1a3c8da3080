use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::chart::SeriesColor;

/// Accent for single-series charts.
pub const DEFAULT_SERIES_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb.into_format())
        })
        .collect()
}

pub fn to_color32(rgb: Srgb<u8>) -> Color32 {
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: marketing channel → Color32
// ---------------------------------------------------------------------------

/// Maps each marketing channel to a distinct colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from channels in order of first appearance, so a
    /// channel keeps its colour however the view is filtered.
    pub fn new(channels: &[String]) -> Self {
        let palette = generate_palette(channels.len());
        let mapping = channels.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a channel.
    pub fn color_for(&self, channel: &str) -> Color32 {
        self.mapping
            .get(channel)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Resolve a chart series colour.
    pub fn series_color(&self, color: &SeriesColor) -> Color32 {
        match color {
            SeriesColor::Default => DEFAULT_SERIES_COLOR,
            SeriesColor::Channel(channel) => self.color_for(channel),
            SeriesColor::Fixed(rgb) => to_color32(*rgb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::named;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_channel_falls_back_to_gray() {
        let cm = ColorMap::new(&["Email".to_string(), "TV".to_string()]);
        assert_ne!(cm.color_for("Email"), cm.color_for("TV"));
        assert_eq!(cm.color_for("Radio"), Color32::GRAY);
    }

    #[test]
    fn fixed_series_colours_resolve_to_named_rgb() {
        let cm = ColorMap::new(&[]);
        assert_eq!(
            cm.series_color(&SeriesColor::Fixed(named::ROYALBLUE)),
            Color32::from_rgb(65, 105, 225)
        );
        assert_eq!(cm.series_color(&SeriesColor::Default), DEFAULT_SERIES_COLOR);
    }
}
