//! Hueforge Theme Engine
//!
//! Semantic theme resolution and compilation for report themes.
//!
//! # Overview
//!
//! A theme is authored symbolically: colors are written as semantic tokens
//! (`@text-primary`, `@border-subtle`, `@accent`) rather than literal hex
//! values. The engine provides:
//! - **Token resolution**: tokens map to shades of the selected neutral
//!   palette (or data palette) depending on light/dark mode
//! - **Compilation**: a single pure pass turns the symbolic theme into the
//!   concrete theme document the rendering surface consumes
//! - **Variants**: named style overlays merged over a visual's defaults
//! - **Quick customizations**: one-click presets (padding, radius, border,
//!   background) with detection and reconciliation
//! - **Editing sessions**: change tracking and memoized preview/export
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hueforge_theme::{PaletteStore, Theme, ThemeEditor, ColorMode};
//! use std::sync::Arc;
//!
//! let mut editor = ThemeEditor::new(
//!     Theme::new("t1", "Quarterly Report"),
//!     Arc::new(PaletteStore::with_builtins()),
//! );
//!
//! editor.set_mode(ColorMode::Dark);
//! let json = editor.export_json(true)?;
//! ```
//!
//! # Architecture
//!
//! - [`compile`] is the only expansion routine. Preview, export, and variant
//!   previews all go through it.
//! - [`CompileCache`] decides when to recompile. A name-only edit patches the
//!   previous document instead of recompiling.
//! - [`PaletteSource`] is injected, so palette edits are picked up on the
//!   next compile request.
//!
//! # Tokens
//!
//! - [`ColorToken`]: the semantic token set and its per-mode shade rules
//! - [`TokenCategory`]: fallback literals when a shade cannot be resolved
//!
//! # Palettes
//!
//! Built-in palettes:
//!
//! - [`ColorPalettePreset`]: data color palettes
//! - [`NeutralPalettePreset`]: 12-shade neutral scales, lightest first

pub mod cache;
pub mod changes;
pub mod compiler;
pub mod editor;
pub mod error;
pub mod palette;
pub mod presets;
pub mod quick;
pub mod style;
pub mod theme;
pub mod tokens;
pub mod variant;

// Re-export commonly used types
pub use cache::{CacheStats, CompileCache};
pub use changes::{ChangeTracker, PropertyPath};
pub use compiler::{compile, CompileDiagnostic, CompileInput, ResolvedTheme};
pub use editor::ThemeEditor;
pub use error::{Result, ThemeError};
pub use palette::{
    resolve_palettes, ColorPalette, NeutralPalette, PaletteSource, PaletteStore,
    ResolvedPalettes, DEFAULT_COLOR_PALETTE_ID, DEFAULT_NEUTRAL_PALETTE_ID, NEUTRAL_SHADE_COUNT,
};
pub use presets::{ColorPalettePreset, NeutralPalettePreset};
pub use quick::{
    apply_quick_customization, detect_quick_customizations, BackgroundStyle, BorderRadius,
    BorderStyle, PaddingStyle, QuickCategory, QuickCustomization, QuickCustomizations,
};
pub use style::{ColorValue, StyleBag, StyleValue, VisualStyles, DEFAULT_VARIANT};
pub use theme::{ColorMode, Theme};
pub use tokens::*;
pub use variant::{compute_variant_style, deep_merge};
