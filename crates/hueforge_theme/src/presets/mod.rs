//! Built-in palette presets.
//!
//! Neutral scales follow the shadcn base colors (white prepended so each
//! scale has twelve shades); data color sets are tuned for chart series.

use crate::palette::{ColorPalette, NeutralPalette};
use std::fmt::{Display, Formatter};

/// Built-in data color palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorPalettePreset {
    /// Report-surface default series colors.
    Default,
    /// Cool blues and teals.
    Ocean,
    /// Warm oranges and reds.
    Sunset,
}

impl ColorPalettePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ocean => "ocean",
            Self::Sunset => "sunset",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Ocean => "Ocean",
            Self::Sunset => "Sunset",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ColorPalettePreset] {
        const PRESETS: [ColorPalettePreset; 3] = [
            ColorPalettePreset::Default,
            ColorPalettePreset::Ocean,
            ColorPalettePreset::Sunset,
        ];
        &PRESETS
    }

    pub fn palette(self) -> ColorPalette {
        let colors: &[&str] = match self {
            Self::Default => &[
                "#118DFF", "#12239E", "#E66C37", "#6B007B", "#E044A7", "#744EC2", "#D9B300",
                "#D64550",
            ],
            Self::Ocean => &[
                "#0EA5E9", "#0369A1", "#14B8A6", "#0F766E", "#6366F1", "#38BDF8", "#2DD4BF",
                "#1E3A8A",
            ],
            Self::Sunset => &[
                "#F97316", "#DC2626", "#F59E0B", "#BE185D", "#EA580C", "#FB7185", "#FBBF24",
                "#7C2D12",
            ],
        };
        builtin_color(self.id(), self.display_name(), colors)
    }
}

impl Display for ColorPalettePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Built-in neutral shade scales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NeutralPalettePreset {
    /// Warm report gray.
    NeutralGray,
    /// shadcn-inspired slate scale.
    Slate,
    /// shadcn-inspired zinc scale.
    Zinc,
    /// shadcn-inspired neutral scale.
    Neutral,
}

impl NeutralPalettePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::NeutralGray => "neutral-gray",
            Self::Slate => "slate",
            Self::Zinc => "zinc",
            Self::Neutral => "neutral",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::NeutralGray => "Neutral Gray",
            Self::Slate => "Slate",
            Self::Zinc => "Zinc",
            Self::Neutral => "Neutral",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [NeutralPalettePreset] {
        const PRESETS: [NeutralPalettePreset; 4] = [
            NeutralPalettePreset::NeutralGray,
            NeutralPalettePreset::Slate,
            NeutralPalettePreset::Zinc,
            NeutralPalettePreset::Neutral,
        ];
        &PRESETS
    }

    pub fn palette(self) -> NeutralPalette {
        let shades: &[&str; 12] = match self {
            Self::NeutralGray => &[
                "#FFFFFF", "#FAF9F8", "#F3F2F1", "#E1DFDD", "#C8C6C4", "#A19F9D", "#797775",
                "#605E5C", "#3B3A39", "#323130", "#252423", "#11100F",
            ],
            Self::Slate => &[
                "#FFFFFF", "#F8FAFC", "#F1F5F9", "#E2E8F0", "#CBD5E1", "#94A3B8", "#64748B",
                "#475569", "#334155", "#1E293B", "#0F172A", "#020817",
            ],
            Self::Zinc => &[
                "#FFFFFF", "#FAFAFA", "#F4F4F5", "#E4E4E7", "#D4D4D8", "#A1A1AA", "#71717A",
                "#52525B", "#3F3F46", "#27272A", "#18181B", "#09090B",
            ],
            Self::Neutral => &[
                "#FFFFFF", "#FAFAFA", "#F5F5F5", "#E5E5E5", "#D4D4D4", "#A3A3A3", "#737373",
                "#525252", "#404040", "#262626", "#171717", "#0A0A0A",
            ],
        };
        NeutralPalette {
            id: self.id().to_string(),
            name: self.display_name().to_string(),
            colors: shades.iter().map(|s| s.to_string()).collect(),
            is_built_in: true,
        }
    }
}

impl Display for NeutralPalettePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

fn builtin_color(id: &str, name: &str, colors: &[&str]) -> ColorPalette {
    ColorPalette {
        id: id.to_string(),
        name: name.to_string(),
        colors: colors.iter().map(|s| s.to_string()).collect(),
        is_built_in: true,
    }
}
