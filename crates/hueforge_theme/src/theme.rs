//! Symbolic theme record

use crate::error::{Result, ThemeError};
use crate::quick::QuickCustomizations;
use crate::style::{StyleBag, StyleValue, VisualStyles};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Light or dark appearance
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    /// Toggle between light and dark
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for ColorMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ColorMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ThemeError::UnknownMode(s.to_string())),
        }
    }
}

/// The mutable authoring model of a theme.
///
/// Colors are stored symbolically (tokens, palette ids); nothing here is
/// resolved against a palette until compilation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mode: ColorMode,
    #[serde(default)]
    pub color_palette_id: String,
    #[serde(default)]
    pub neutral_palette_id: String,
    #[serde(default)]
    pub font_family: String,
    #[serde(default)]
    pub visual_styles: VisualStyles,
    /// Top-level document colors (`background`, `foreground`, `tableAccent`, ...)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub structural_colors: IndexMap<String, StyleValue>,
    /// Named text styles; malformed entries are dropped on load
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "text_classes_lossy"
    )]
    pub text_classes: IndexMap<String, StyleBag>,
    #[serde(default, skip_serializing_if = "QuickCustomizations::is_unset")]
    pub quick_customizations: QuickCustomizations,
}

fn text_classes_lossy<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, StyleBag>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(StyleBag::map_from_json_lossy("textClasses", &value))
}

impl Theme {
    /// An empty theme using the built-in default palettes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color_palette_id: crate::palette::DEFAULT_COLOR_PALETTE_ID.to_string(),
            neutral_palette_id: crate::palette::DEFAULT_NEUTRAL_PALETTE_ID.to_string(),
            font_family: "Segoe UI".to_string(),
            ..Self::default()
        }
    }

    /// Parse a theme record from JSON.
    ///
    /// Malformed style bags are dropped individually; only a record that is
    /// not valid JSON (or has wrongly-typed scalar fields) fails.
    pub fn from_json_str(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mode_parses_and_toggles() {
        assert_eq!("Dark".parse::<ColorMode>().unwrap(), ColorMode::Dark);
        assert!("dim".parse::<ColorMode>().is_err());
        assert_eq!(ColorMode::Light.toggle(), ColorMode::Dark);
    }

    #[test]
    fn record_uses_camel_case() {
        let theme: Theme = serde_json::from_value(json!({
            "id": "t1",
            "name": "Quarterly",
            "mode": "dark",
            "colorPaletteId": "ocean",
            "neutralPaletteId": "slate",
            "fontFamily": "Inter",
            "visualStyles": {"card": {"*": {"border": [{"radius": 4}]}}},
            "textClasses": {"title": {"fontSize": 14}}
        }))
        .unwrap();

        assert_eq!(theme.mode, ColorMode::Dark);
        assert_eq!(theme.neutral_palette_id, "slate");
        assert!(theme.visual_styles.default_bag("card").is_some());
        assert!(theme.quick_customizations.is_unset());

        let back = serde_json::to_value(&theme).unwrap();
        assert_eq!(back["colorPaletteId"], "ocean");
        assert!(back.get("structuralColors").is_none());
    }

    #[test]
    fn malformed_text_class_is_skipped() {
        let theme = Theme::from_json_str(
            r#"{
                "name": "T",
                "textClasses": {"title": 7, "label": {"fontSize": 10}},
                "visualStyles": {"card": {"*": {"border": [{"radius": 4}]}}}
            }"#,
        )
        .unwrap();

        assert!(!theme.text_classes.contains_key("title"));
        assert_eq!(
            theme.text_classes["label"].get("fontSize"),
            Some(&StyleValue::from(10i64))
        );
        assert!(theme.visual_styles.default_bag("card").is_some());
    }
}
