//! Palettes and palette resolution
//!
//! Palettes are owned by an external store. The engine reads them through
//! [`PaletteSource`] and never holds on to them: [`resolve_palettes`] is
//! re-run for every preview or export, so both a changed palette id on the
//! theme and an edited or deleted palette in the store are picked up.

use crate::presets::{ColorPalettePreset, NeutralPalettePreset};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Number of shades in a complete neutral scale
pub const NEUTRAL_SHADE_COUNT: usize = 12;

pub const DEFAULT_COLOR_PALETTE_ID: &str = "default";
pub const DEFAULT_NEUTRAL_PALETTE_ID: &str = "neutral-gray";

/// Ordered data series colors
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub id: String,
    pub name: String,
    pub colors: Vec<String>,
    #[serde(default)]
    pub is_built_in: bool,
}

impl ColorPalette {
    pub fn new(id: impl Into<String>, name: impl Into<String>, colors: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            colors,
            is_built_in: false,
        }
    }

    /// The palette used when a theme's color palette id cannot be found.
    pub fn builtin_default() -> Self {
        ColorPalettePreset::Default.palette()
    }
}

/// A shade scale from lightest (index 0) to darkest
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeutralPalette {
    pub id: String,
    pub name: String,
    pub colors: Vec<String>,
    #[serde(default)]
    pub is_built_in: bool,
}

impl NeutralPalette {
    pub fn new(id: impl Into<String>, name: impl Into<String>, colors: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            colors,
            is_built_in: false,
        }
    }

    /// The palette used when a theme's neutral palette id cannot be found.
    pub fn builtin_default() -> Self {
        NeutralPalettePreset::NeutralGray.palette()
    }

    /// Whether the scale has every shade tokens may reference.
    pub fn is_complete(&self) -> bool {
        self.colors.len() >= NEUTRAL_SHADE_COUNT
    }
}

/// Read access to the palette collection.
pub trait PaletteSource: Send + Sync {
    fn color_palette(&self, id: &str) -> Option<ColorPalette>;
    fn neutral_palette(&self, id: &str) -> Option<NeutralPalette>;
}

/// In-memory palette collection
#[derive(Clone, Debug, Default)]
pub struct PaletteStore {
    colors: FxHashMap<String, ColorPalette>,
    neutrals: FxHashMap<String, NeutralPalette>,
}

impl PaletteStore {
    /// An empty store. Lookups fall back to built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with every built-in palette.
    pub fn with_builtins() -> Self {
        let mut store = Self::new();
        for preset in ColorPalettePreset::all() {
            store.insert_color(preset.palette());
        }
        for preset in NeutralPalettePreset::all() {
            store.insert_neutral(preset.palette());
        }
        store
    }

    pub fn insert_color(&mut self, palette: ColorPalette) -> Option<ColorPalette> {
        self.colors.insert(palette.id.clone(), palette)
    }

    pub fn insert_neutral(&mut self, palette: NeutralPalette) -> Option<NeutralPalette> {
        self.neutrals.insert(palette.id.clone(), palette)
    }

    pub fn remove_color(&mut self, id: &str) -> Option<ColorPalette> {
        self.colors.remove(id)
    }

    pub fn remove_neutral(&mut self, id: &str) -> Option<NeutralPalette> {
        self.neutrals.remove(id)
    }

    /// Color palettes sorted by id.
    pub fn color_palettes(&self) -> Vec<&ColorPalette> {
        let mut out: Vec<_> = self.colors.values().collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    /// Neutral palettes sorted by id.
    pub fn neutral_palettes(&self) -> Vec<&NeutralPalette> {
        let mut out: Vec<_> = self.neutrals.values().collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }
}

impl PaletteSource for PaletteStore {
    fn color_palette(&self, id: &str) -> Option<ColorPalette> {
        self.colors.get(id).cloned()
    }

    fn neutral_palette(&self, id: &str) -> Option<NeutralPalette> {
        self.neutrals.get(id).cloned()
    }
}

/// Shared, editable collection: writers take the lock, editors read through it.
impl<T: PaletteSource> PaletteSource for RwLock<T> {
    fn color_palette(&self, id: &str) -> Option<ColorPalette> {
        self.read()
            .unwrap_or_else(|e| e.into_inner())
            .color_palette(id)
    }

    fn neutral_palette(&self, id: &str) -> Option<NeutralPalette> {
        self.read()
            .unwrap_or_else(|e| e.into_inner())
            .neutral_palette(id)
    }
}

/// Concrete palettes for one theme
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPalettes {
    pub color: ColorPalette,
    pub neutral: NeutralPalette,
}

/// Look up both palettes, falling back to the built-in defaults.
pub fn resolve_palettes(
    color_palette_id: &str,
    neutral_palette_id: &str,
    source: &dyn PaletteSource,
) -> ResolvedPalettes {
    let color = source.color_palette(color_palette_id).unwrap_or_else(|| {
        tracing::debug!(
            id = color_palette_id,
            "color palette not found; using built-in default"
        );
        ColorPalette::builtin_default()
    });
    let neutral = source.neutral_palette(neutral_palette_id).unwrap_or_else(|| {
        tracing::debug!(
            id = neutral_palette_id,
            "neutral palette not found; using built-in default"
        );
        NeutralPalette::builtin_default()
    });
    ResolvedPalettes { color, neutral }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_fall_back_to_builtins() {
        let store = PaletteStore::new();
        let resolved = resolve_palettes("gone", "also-gone", &store);
        assert_eq!(resolved.color, ColorPalette::builtin_default());
        assert_eq!(resolved.neutral, NeutralPalette::builtin_default());
    }

    #[test]
    fn store_edits_are_visible_to_next_resolution() {
        let mut store = PaletteStore::with_builtins();
        store.insert_color(ColorPalette::new(
            "brand",
            "Brand",
            vec!["#FF0000".into(), "#00FF00".into()],
        ));
        assert_eq!(resolve_palettes("brand", "slate", &store).color.colors[0], "#FF0000");

        store.insert_color(ColorPalette::new("brand", "Brand", vec!["#0000FF".into()]));
        assert_eq!(resolve_palettes("brand", "slate", &store).color.colors[0], "#0000FF");

        store.remove_color("brand");
        assert_eq!(
            resolve_palettes("brand", "slate", &store).color.id,
            DEFAULT_COLOR_PALETTE_ID
        );
    }

    #[test]
    fn builtin_neutrals_are_complete() {
        let store = PaletteStore::with_builtins();
        for palette in store.neutral_palettes() {
            assert!(palette.is_complete(), "{} is short", palette.id);
            assert!(palette.is_built_in);
        }
    }
}
