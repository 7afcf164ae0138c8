//! Quick customizations
//!
//! A quick customization is a named preset that expands into a fixed set of
//! writes on the global default style (`visualStyles["*"]["*"]`) and, for
//! backgrounds, the page style (`visualStyles["page"]["*"]`). The inverse
//! direction classifies a style tree by checking which preset's writes are
//! all present with exactly the expected values.
//!
//! Stored quick customizations are a view of the style tree, not a source of
//! truth: [`reconcile`] clears any stored choice the tree no longer matches.

use crate::error::{Result, ThemeError};
use crate::style::{
    ColorValue, StyleValue, VisualStyles, DEFAULT_VARIANT, GLOBAL_VISUAL, PAGE_VISUAL,
};
use crate::tokens::ColorToken;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The four quick customization families
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuickCategory {
    PaddingStyle,
    BorderRadius,
    BorderStyle,
    BackgroundStyle,
}

impl QuickCategory {
    pub fn all() -> &'static [QuickCategory] {
        const CATEGORIES: [QuickCategory; 4] = [
            QuickCategory::PaddingStyle,
            QuickCategory::BorderRadius,
            QuickCategory::BorderStyle,
            QuickCategory::BackgroundStyle,
        ];
        &CATEGORIES
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::PaddingStyle => "paddingStyle",
            Self::BorderRadius => "borderRadius",
            Self::BorderStyle => "borderStyle",
            Self::BackgroundStyle => "backgroundStyle",
        }
    }

    pub fn parse(id: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.id() == id)
            .ok_or_else(|| ThemeError::UnknownCategory(id.to_string()))
    }

    /// Every preset in this category, in detection order.
    pub fn choices(self) -> Vec<QuickCustomization> {
        match self {
            Self::PaddingStyle => PaddingStyle::ALL
                .iter()
                .map(|v| QuickCustomization::Padding(*v))
                .collect(),
            Self::BorderRadius => BorderRadius::ALL
                .iter()
                .map(|v| QuickCustomization::Radius(*v))
                .collect(),
            Self::BorderStyle => BorderStyle::ALL
                .iter()
                .map(|v| QuickCustomization::Border(*v))
                .collect(),
            Self::BackgroundStyle => BackgroundStyle::ALL
                .iter()
                .map(|v| QuickCustomization::Background(*v))
                .collect(),
        }
    }
}

impl Display for QuickCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for QuickCategory {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingStyle {
    Compact,
    Default,
    Spacious,
}

impl PaddingStyle {
    pub const ALL: [PaddingStyle; 3] = [Self::Compact, Self::Default, Self::Spacious];

    pub fn id(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Default => "default",
            Self::Spacious => "spacious",
        }
    }

    fn inset(self) -> i64 {
        match self {
            Self::Compact => 4,
            Self::Default => 8,
            Self::Spacious => 16,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderRadius {
    None,
    Small,
    Medium,
    Large,
}

impl BorderRadius {
    pub const ALL: [BorderRadius; 4] = [Self::None, Self::Small, Self::Medium, Self::Large];

    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn radius(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Small => 4,
            Self::Medium => 8,
            Self::Large => 16,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Default,
    Subtle,
    None,
}

impl BorderStyle {
    pub const ALL: [BorderStyle; 3] = [Self::Default, Self::Subtle, Self::None];

    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Subtle => "subtle",
            Self::None => "none",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundStyle {
    Default,
    Tinted,
    Transparent,
}

impl BackgroundStyle {
    pub const ALL: [BackgroundStyle; 3] = [Self::Default, Self::Tinted, Self::Transparent];

    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Tinted => "tinted",
            Self::Transparent => "transparent",
        }
    }
}

/// One quick customization choice
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuickCustomization {
    Padding(PaddingStyle),
    Radius(BorderRadius),
    Border(BorderStyle),
    Background(BackgroundStyle),
}

impl QuickCustomization {
    /// Every category/value pair.
    pub fn all() -> Vec<QuickCustomization> {
        QuickCategory::all()
            .iter()
            .flat_map(|c| c.choices())
            .collect()
    }

    pub fn category(self) -> QuickCategory {
        match self {
            Self::Padding(_) => QuickCategory::PaddingStyle,
            Self::Radius(_) => QuickCategory::BorderRadius,
            Self::Border(_) => QuickCategory::BorderStyle,
            Self::Background(_) => QuickCategory::BackgroundStyle,
        }
    }

    pub fn value_id(self) -> &'static str {
        match self {
            Self::Padding(v) => v.id(),
            Self::Radius(v) => v.id(),
            Self::Border(v) => v.id(),
            Self::Background(v) => v.id(),
        }
    }

    /// Parse textual ids, e.g. `("borderStyle", "subtle")`.
    pub fn parse(category: &str, value: &str) -> Result<Self> {
        let category = QuickCategory::parse(category)?;
        category
            .choices()
            .into_iter()
            .find(|c| c.value_id() == value)
            .ok_or_else(|| ThemeError::UnknownQuickValue {
                category: category.id().to_string(),
                value: value.to_string(),
            })
    }
}

impl Display for QuickCustomization {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.category(), self.value_id())
    }
}

/// Parses the `Display` form, `category=value`.
impl FromStr for QuickCustomization {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        let (category, value) = s
            .split_once('=')
            .ok_or_else(|| ThemeError::UnknownCategory(s.to_string()))?;
        Self::parse(category.trim(), value.trim())
    }
}

/// Stored or detected quick customization state; `None` means unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickCustomizations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_style: Option<PaddingStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BorderRadius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_style: Option<BackgroundStyle>,
}

impl QuickCustomizations {
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    pub fn get(&self, category: QuickCategory) -> Option<QuickCustomization> {
        match category {
            QuickCategory::PaddingStyle => self.padding_style.map(QuickCustomization::Padding),
            QuickCategory::BorderRadius => self.border_radius.map(QuickCustomization::Radius),
            QuickCategory::BorderStyle => self.border_style.map(QuickCustomization::Border),
            QuickCategory::BackgroundStyle => {
                self.background_style.map(QuickCustomization::Background)
            }
        }
    }

    pub fn set(&mut self, choice: QuickCustomization) {
        match choice {
            QuickCustomization::Padding(v) => self.padding_style = Some(v),
            QuickCustomization::Radius(v) => self.border_radius = Some(v),
            QuickCustomization::Border(v) => self.border_style = Some(v),
            QuickCustomization::Background(v) => self.background_style = Some(v),
        }
    }

    pub fn clear(&mut self, category: QuickCategory) {
        match category {
            QuickCategory::PaddingStyle => self.padding_style = None,
            QuickCategory::BorderRadius => self.border_radius = None,
            QuickCategory::BorderStyle => self.border_style = None,
            QuickCategory::BackgroundStyle => self.background_style = None,
        }
    }
}

/// A single write of a quick customization: `visual["*"].property[0].field = value`
#[derive(Clone, Debug, PartialEq)]
pub struct QuickWrite {
    pub visual_type: &'static str,
    pub property: &'static str,
    pub field: &'static str,
    pub value: StyleValue,
}

impl QuickWrite {
    fn global(property: &'static str, field: &'static str, value: impl Into<StyleValue>) -> Self {
        Self {
            visual_type: GLOBAL_VISUAL,
            property,
            field,
            value: value.into(),
        }
    }

    fn page(property: &'static str, field: &'static str, value: impl Into<StyleValue>) -> Self {
        Self {
            visual_type: PAGE_VISUAL,
            property,
            field,
            value: value.into(),
        }
    }

    fn is_satisfied(&self, visual_styles: &VisualStyles) -> bool {
        visual_styles
            .default_bag(self.visual_type)
            .and_then(|bag| bag.field(self.property, self.field))
            == Some(&self.value)
    }
}

fn solid(token: ColorToken) -> StyleValue {
    StyleValue::solid(ColorValue::token(token))
}

/// Current visual background fill, or the fill the background presets use.
fn current_background(visual_styles: &VisualStyles) -> StyleValue {
    visual_styles
        .default_bag(GLOBAL_VISUAL)
        .and_then(|bag| bag.field("background", "color"))
        .cloned()
        .unwrap_or_else(|| solid(ColorToken::Surface))
}

/// The writes `choice` performs against the current tree.
///
/// Only `borderStyle = none` depends on the tree: its border color mirrors
/// the current background so the border keeps its geometry but vanishes.
pub fn quick_writes(choice: QuickCustomization, visual_styles: &VisualStyles) -> Vec<QuickWrite> {
    match choice {
        QuickCustomization::Padding(style) => ["top", "bottom", "left", "right"]
            .into_iter()
            .map(|side| QuickWrite::global("padding", side, style.inset()))
            .collect(),
        QuickCustomization::Radius(radius) => {
            vec![QuickWrite::global("border", "radius", radius.radius())]
        }
        QuickCustomization::Border(style) => {
            let color = match style {
                BorderStyle::Default => solid(ColorToken::BorderPrimary),
                BorderStyle::Subtle => solid(ColorToken::BorderSubtle),
                BorderStyle::None => current_background(visual_styles),
            };
            vec![
                QuickWrite::global("border", "show", true),
                QuickWrite::global("border", "width", 1i64),
                QuickWrite::global("border", "color", color),
            ]
        }
        QuickCustomization::Background(style) => {
            let (transparency, page) = match style {
                BackgroundStyle::Default => (0i64, ColorToken::Background),
                BackgroundStyle::Tinted => (0, ColorToken::BackgroundSecondary),
                BackgroundStyle::Transparent => (100, ColorToken::Background),
            };
            vec![
                QuickWrite::global("background", "show", true),
                QuickWrite::global("background", "color", solid(ColorToken::Surface)),
                QuickWrite::global("background", "transparency", transparency),
                QuickWrite::page("background", "color", solid(page)),
                QuickWrite::page("background", "transparency", 0i64),
            ]
        }
    }
}

/// Apply a preset to the style tree, returning every write performed.
///
/// Changing the background while borders are hidden re-syncs the hidden
/// border to the new background.
pub fn apply_quick_customization(
    visual_styles: &mut VisualStyles,
    choice: QuickCustomization,
) -> Vec<QuickWrite> {
    let hidden_border = matches!(choice, QuickCustomization::Background(_))
        && detect_category(visual_styles, QuickCategory::BorderStyle)
            == Some(QuickCustomization::Border(BorderStyle::None));

    let planned = quick_writes(choice, visual_styles);
    let mut writes = write_all(visual_styles, planned);
    if hidden_border {
        let resync = quick_writes(QuickCustomization::Border(BorderStyle::None), visual_styles);
        writes.extend(write_all(visual_styles, resync));
    }
    tracing::debug!(%choice, writes = writes.len(), "applied quick customization");
    writes
}

fn write_all(visual_styles: &mut VisualStyles, writes: Vec<QuickWrite>) -> Vec<QuickWrite> {
    for write in &writes {
        visual_styles
            .variant_mut(write.visual_type, DEFAULT_VARIANT)
            .set_field(write.property, write.field, write.value.clone());
    }
    writes
}

fn detect_category(
    visual_styles: &VisualStyles,
    category: QuickCategory,
) -> Option<QuickCustomization> {
    category.choices().into_iter().find(|choice| {
        quick_writes(*choice, visual_styles)
            .iter()
            .all(|w| w.is_satisfied(visual_styles))
    })
}

/// Classify a style tree against every preset.
pub fn detect_quick_customizations(visual_styles: &VisualStyles) -> QuickCustomizations {
    let mut detected = QuickCustomizations::default();
    for category in QuickCategory::all() {
        if let Some(choice) = detect_category(visual_styles, *category) {
            detected.set(choice);
        }
    }
    detected
}

/// Clear stored choices the style tree no longer matches.
pub fn reconcile(
    stored: &QuickCustomizations,
    visual_styles: &VisualStyles,
) -> QuickCustomizations {
    let detected = detect_quick_customizations(visual_styles);
    let mut out = stored.clone();
    for category in QuickCategory::all() {
        if let Some(choice) = stored.get(*category) {
            if detected.get(*category) != Some(choice) {
                tracing::debug!(%choice, "quick customization no longer matches; clearing");
                out.clear(*category);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_choice_round_trips() {
        for choice in QuickCustomization::all() {
            let mut vs = VisualStyles::new();
            apply_quick_customization(&mut vs, choice);
            let detected = detect_quick_customizations(&vs);
            assert_eq!(detected.get(choice.category()), Some(choice), "{choice}");
        }
    }

    #[test]
    fn round_trip_holds_on_top_of_other_presets() {
        let mut vs = VisualStyles::new();
        for choice in QuickCustomization::all() {
            apply_quick_customization(&mut vs, choice);
            assert_eq!(
                detect_quick_customizations(&vs).get(choice.category()),
                Some(choice),
                "{choice}"
            );
        }
    }

    #[test]
    fn hand_edit_invalidates_border_style() {
        let mut vs = VisualStyles::new();
        let subtle = QuickCustomization::Border(BorderStyle::Subtle);
        apply_quick_customization(&mut vs, subtle);

        let mut stored = QuickCustomizations::default();
        stored.set(subtle);
        assert_eq!(reconcile(&stored, &vs), stored);

        vs.variant_mut("*", "*").set_field(
            "border",
            "color",
            StyleValue::solid(ColorValue::hex("#FF00AA")),
        );
        assert_eq!(detect_quick_customizations(&vs).border_style, None);
        assert_eq!(reconcile(&stored, &vs).border_style, None);
    }

    #[test]
    fn hidden_border_follows_background() {
        let mut vs = VisualStyles::new();
        apply_quick_customization(&mut vs, QuickCustomization::Border(BorderStyle::None));
        apply_quick_customization(
            &mut vs,
            QuickCustomization::Background(BackgroundStyle::Tinted),
        );
        let detected = detect_quick_customizations(&vs);
        assert_eq!(detected.border_style, Some(BorderStyle::None));
        assert_eq!(detected.background_style, Some(BackgroundStyle::Tinted));
    }

    #[test]
    fn border_none_mirrors_a_custom_background() {
        let mut vs = VisualStyles::new();
        let fill = StyleValue::solid(ColorValue::hex("#FAFAFA"));
        vs.variant_mut("*", "*")
            .set_field("background", "color", fill.clone());
        apply_quick_customization(&mut vs, QuickCustomization::Border(BorderStyle::None));

        assert_eq!(
            vs.default_bag("*").and_then(|b| b.field("border", "color")),
            Some(&fill)
        );
    }

    #[test]
    fn empty_tree_is_unset() {
        assert!(detect_quick_customizations(&VisualStyles::new()).is_unset());
    }

    #[test]
    fn parse_textual_ids() {
        assert_eq!(
            QuickCustomization::parse("borderStyle", "subtle").unwrap(),
            QuickCustomization::Border(BorderStyle::Subtle)
        );
        assert!(matches!(
            QuickCustomization::parse("borderStyle", "dotted"),
            Err(ThemeError::UnknownQuickValue { .. })
        ));
        assert!(matches!(
            QuickCustomization::parse("shadow", "none"),
            Err(ThemeError::UnknownCategory(_))
        ));
    }

    #[test]
    fn display_form_parses_back() {
        for choice in QuickCustomization::all() {
            assert_eq!(choice.to_string().parse::<QuickCustomization>().unwrap(), choice);
        }
        assert!("borderStyle".parse::<QuickCustomization>().is_err());
        assert_eq!(
            "backgroundStyle".parse::<QuickCategory>().unwrap(),
            QuickCategory::BackgroundStyle
        );
    }
}
