//! Theme editing session
//!
//! [`ThemeEditor`] owns the symbolic theme being edited and is the only way
//! to mutate it. Every mutation:
//! - records its property path in the [`ChangeTracker`]
//! - reconciles stored quick customizations after visual-style writes
//! - leaves compilation to the next `preview()`/`export()` call
//!
//! Palettes are read through an injected [`PaletteSource`] on every
//! compile request, so edits to the palette collection show up without
//! notifying the editor.

use crate::cache::{CacheStats, CompileCache};
use crate::changes::ChangeTracker;
use crate::compiler::{compile, CompileInput, ResolvedTheme};
use crate::error::{Result, ThemeError};
use crate::palette::{resolve_palettes, PaletteSource, ResolvedPalettes};
use crate::quick::{
    apply_quick_customization, detect_quick_customizations, reconcile, QuickCustomization,
    QuickCustomizations,
};
use crate::style::{StyleBag, StyleValue, DEFAULT_VARIANT};
use crate::theme::{ColorMode, Theme};
use crate::variant::compute_variant_style;
use std::sync::Arc;

/// Editing session for a single theme
pub struct ThemeEditor {
    theme: Theme,
    palettes: Arc<dyn PaletteSource>,
    changes: ChangeTracker,
    cache: CompileCache,
}

impl ThemeEditor {
    /// Start editing `theme`; it becomes the saved baseline.
    ///
    /// Stored quick customizations the style tree does not match are cleared
    /// before the baseline is taken.
    pub fn new(theme: Theme, palettes: Arc<dyn PaletteSource>) -> Self {
        let theme = with_reconciled_quick(theme);
        let mut changes = ChangeTracker::new();
        changes.set_original_theme(theme.clone());
        Self {
            theme,
            palettes,
            changes,
            cache: CompileCache::new(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    // ========== Lifecycle ==========

    /// Replace the edited theme with a freshly loaded one.
    pub fn load(&mut self, theme: Theme) {
        tracing::debug!(id = %theme.id, "loading theme");
        let theme = with_reconciled_quick(theme);
        self.changes.set_original_theme(theme.clone());
        self.theme = theme;
    }

    /// Take the current theme as the saved baseline.
    pub fn mark_saved(&mut self) {
        self.changes.set_original_theme(self.theme.clone());
    }

    /// Discard edits and return to the baseline.
    pub fn reset(&mut self) {
        if let Some(original) = self.changes.original_theme() {
            self.theme = with_reconciled_quick(original.clone());
        }
        self.changes.clear_changes();
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    // ========== Top-level Fields ==========

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.theme.name = name.into();
        self.changes.track_change("name");
    }

    pub fn set_mode(&mut self, mode: ColorMode) {
        if self.theme.mode != mode {
            tracing::debug!("ThemeEditor::set_mode - {} -> {}", self.theme.mode, mode);
        }
        self.theme.mode = mode;
        self.changes.track_change("mode");
    }

    /// Toggle between light and dark mode
    pub fn toggle_mode(&mut self) {
        self.set_mode(self.theme.mode.toggle());
    }

    pub fn set_color_palette(&mut self, id: impl Into<String>) {
        self.theme.color_palette_id = id.into();
        self.changes.track_change("colorPaletteId");
    }

    pub fn set_neutral_palette(&mut self, id: impl Into<String>) {
        self.theme.neutral_palette_id = id.into();
        self.changes.track_change("neutralPaletteId");
    }

    pub fn set_font_family(&mut self, font_family: impl Into<String>) {
        self.theme.font_family = font_family.into();
        self.changes.track_change("fontFamily");
    }

    // ========== Visual Styles ==========

    /// Write a property inside a variant bag.
    ///
    /// `path` addresses into the bag (`["border", "0", "radius"]`); the change
    /// is recorded at `visualStyles.<visual>.<variant>.<path[0]>`.
    pub fn set_visual_property<S: AsRef<str>>(
        &mut self,
        visual_type: &str,
        variant: &str,
        path: &[S],
        value: StyleValue,
    ) -> Result<()> {
        let property = top_property(path)?;
        self.theme
            .visual_styles
            .variant_mut(visual_type, variant)
            .set_path(path, value)?;
        self.changes
            .track_change(["visualStyles", visual_type, variant, property.as_str()]);
        self.reconcile_quick();
        Ok(())
    }

    /// Remove a property from a variant bag. Returns the removed value.
    pub fn remove_visual_property<S: AsRef<str>>(
        &mut self,
        visual_type: &str,
        variant: &str,
        path: &[S],
    ) -> Result<Option<StyleValue>> {
        let property = top_property(path)?;
        let removed = match self.theme.visual_styles.variant(visual_type, variant) {
            Some(_) => self
                .theme
                .visual_styles
                .variant_mut(visual_type, variant)
                .remove_path(path),
            None => None,
        };
        if removed.is_some() {
            self.changes
                .track_change(["visualStyles", visual_type, variant, property.as_str()]);
            self.reconcile_quick();
        }
        Ok(removed)
    }

    /// Replace a whole variant bag.
    pub fn set_variant_bag(&mut self, visual_type: &str, variant: &str, bag: StyleBag) {
        self.theme
            .visual_styles
            .set_variant(visual_type, variant, bag);
        self.changes
            .track_change(["visualStyles", visual_type, variant]);
        self.reconcile_quick();
    }

    pub fn remove_variant(&mut self, visual_type: &str, variant: &str) -> Option<StyleBag> {
        let removed = self.theme.visual_styles.remove_variant(visual_type, variant);
        self.changes
            .track_change(["visualStyles", visual_type, variant]);
        self.reconcile_quick();
        removed
    }

    // ========== Overlays ==========

    pub fn set_structural_color(&mut self, key: &str, value: StyleValue) {
        self.theme
            .structural_colors
            .insert(key.to_string(), value);
        self.changes.track_change(["structuralColors", key]);
    }

    pub fn remove_structural_color(&mut self, key: &str) -> Option<StyleValue> {
        let removed = self.theme.structural_colors.shift_remove(key);
        self.changes.track_change(["structuralColors", key]);
        removed
    }

    pub fn set_text_class_property(&mut self, class: &str, property: &str, value: StyleValue) {
        self.theme
            .text_classes
            .entry(class.to_string())
            .or_default()
            .insert(property, value);
        self.changes
            .track_change(["textClasses", class, property]);
    }

    // ========== Quick Customizations ==========

    /// Apply a preset and remember it as the chosen value for its category.
    pub fn apply_quick_customization(&mut self, choice: QuickCustomization) {
        let writes = apply_quick_customization(&mut self.theme.visual_styles, choice);
        for write in &writes {
            self.changes.track_change([
                "visualStyles",
                write.visual_type,
                DEFAULT_VARIANT,
                write.property,
            ]);
        }
        self.theme.quick_customizations.set(choice);
        self.changes
            .track_change(["quickCustomizations", choice.category().id()]);
        self.reconcile_quick();
    }

    /// Stored quick customizations (already reconciled with the style tree).
    pub fn quick_customizations(&self) -> &QuickCustomizations {
        &self.theme.quick_customizations
    }

    /// What the current style tree matches, regardless of stored state.
    pub fn detected_quick_customizations(&self) -> QuickCustomizations {
        detect_quick_customizations(&self.theme.visual_styles)
    }

    fn reconcile_quick(&mut self) {
        let reconciled = reconcile(
            &self.theme.quick_customizations,
            &self.theme.visual_styles,
        );
        if reconciled != self.theme.quick_customizations {
            self.theme.quick_customizations = reconciled;
            self.changes.track_change("quickCustomizations");
        }
    }

    // ========== Compilation ==========

    /// Palettes the theme currently resolves to.
    pub fn resolved_palettes(&self) -> ResolvedPalettes {
        resolve_palettes(
            &self.theme.color_palette_id,
            &self.theme.neutral_palette_id,
            self.palettes.as_ref(),
        )
    }

    /// Input for the compiler; shared by preview, export, and projections.
    pub fn compile_input(&self) -> CompileInput {
        CompileInput::from_theme(&self.theme, &self.resolved_palettes())
    }

    /// The live preview document (memoized).
    pub fn preview(&mut self) -> Arc<ResolvedTheme> {
        let input = self.compile_input();
        self.cache.get_or_compile(&input)
    }

    /// The exported document. Same compile path as [`preview`](Self::preview).
    pub fn export(&mut self) -> Arc<ResolvedTheme> {
        self.preview()
    }

    /// The exported document as JSON text.
    pub fn export_json(&mut self, pretty: bool) -> Result<String> {
        self.export()
            .to_json_string(pretty)
            .map_err(ThemeError::from)
    }

    /// Compile the theme as if `variant` were `visual_type`'s default.
    ///
    /// Read-only: the stored theme and the preview cache are untouched.
    pub fn preview_variant(&self, visual_type: &str, variant: &str) -> ResolvedTheme {
        let mut input = self.compile_input();
        let merged = compute_variant_style(&self.theme.visual_styles, visual_type, variant);
        input
            .visual_styles
            .set_variant(visual_type, DEFAULT_VARIANT, merged);
        compile(&input)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

fn with_reconciled_quick(mut theme: Theme) -> Theme {
    theme.quick_customizations = reconcile(&theme.quick_customizations, &theme.visual_styles);
    theme
}

fn top_property<S: AsRef<str>>(path: &[S]) -> Result<String> {
    path.first()
        .map(|s| s.as_ref().to_string())
        .ok_or_else(|| ThemeError::InvalidPath(String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteStore;
    use crate::quick::BorderStyle;

    fn editor() -> ThemeEditor {
        ThemeEditor::new(
            Theme::new("t1", "Draft"),
            Arc::new(PaletteStore::with_builtins()),
        )
    }

    #[test]
    fn every_mutation_is_tracked() {
        let mut ed = editor();
        ed.set_name("Renamed");
        ed.set_mode(ColorMode::Dark);
        ed.set_color_palette("ocean");
        ed.set_neutral_palette("slate");
        ed.set_font_family("Inter");
        ed.set_visual_property("card", "*", &["title", "show"], StyleValue::Bool(true))
            .unwrap();
        ed.set_structural_color("background", StyleValue::from("@background"));
        ed.set_text_class_property("title", "fontSize", StyleValue::from(14i64));

        for path in [
            "name",
            "mode",
            "colorPaletteId",
            "neutralPaletteId",
            "fontFamily",
            "visualStyles.card.*.title",
            "structuralColors.background",
            "textClasses.title.fontSize",
        ] {
            assert!(ed.changes().has_changes(path), "{path} not tracked");
        }
    }

    #[test]
    fn empty_path_is_rejected_without_tracking() {
        let mut ed = editor();
        let empty: [&str; 0] = [];
        assert!(ed
            .set_visual_property("card", "*", &empty, StyleValue::Null)
            .is_err());
        assert!(!ed.has_unsaved_changes());
    }

    #[test]
    fn direct_edit_clears_quick_customization() {
        let mut ed = editor();
        ed.apply_quick_customization(QuickCustomization::Border(BorderStyle::Subtle));
        assert_eq!(ed.quick_customizations().border_style, Some(BorderStyle::Subtle));

        ed.set_visual_property(
            "*",
            "*",
            &["border", "0", "color", "solid", "color"],
            StyleValue::from("#123456"),
        )
        .unwrap();
        assert_eq!(ed.quick_customizations().border_style, None);
    }

    #[test]
    fn stale_stored_choice_is_cleared_on_open_and_load() {
        let mut stale = Theme::new("t2", "Stale");
        stale.quick_customizations.border_style = Some(BorderStyle::Subtle);

        let mut ed = ThemeEditor::new(stale.clone(), Arc::new(PaletteStore::with_builtins()));
        assert_eq!(ed.quick_customizations().border_style, None);
        assert!(!ed.has_unsaved_changes());
        assert_eq!(
            ed.changes()
                .original_theme()
                .and_then(|t| t.quick_customizations.border_style),
            None
        );

        ed.load(Theme::new("t1", "Draft"));
        ed.load(stale);
        assert_eq!(ed.quick_customizations().border_style, None);
        assert!(!ed.has_unsaved_changes());
    }

    #[test]
    fn removing_a_missing_property_is_not_a_change() {
        let mut ed = editor();
        let removed = ed
            .remove_visual_property("card", "*", &["title"])
            .unwrap();
        assert_eq!(removed, None);
        assert!(!ed.has_unsaved_changes());

        ed.set_visual_property("card", "*", &["title", "show"], StyleValue::Bool(true))
            .unwrap();
        ed.mark_saved();
        assert!(ed
            .remove_visual_property("card", "*", &["title", "show"])
            .unwrap()
            .is_some());
        assert!(ed.changes().has_changes("visualStyles.card.*.title"));
    }

    #[test]
    fn reset_restores_baseline() {
        let mut ed = editor();
        ed.set_name("Changed");
        ed.reset();
        assert_eq!(ed.theme().name, "Draft");
        assert!(!ed.has_unsaved_changes());

        ed.set_name("Kept");
        ed.mark_saved();
        ed.set_mode(ColorMode::Dark);
        ed.reset();
        assert_eq!(ed.theme().name, "Kept");
        assert_eq!(ed.theme().mode, ColorMode::Light);
    }
}
