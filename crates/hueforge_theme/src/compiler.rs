//! Theme compilation
//!
//! [`compile`] expands a symbolic theme into the concrete document the
//! rendering surface consumes. It is the only expansion routine: live preview
//! and export both build their input with [`CompileInput::from_theme`] and
//! run it through here, so what is previewed is what is exported.
//!
//! Compilation never fails. Unresolvable tokens get their documented fallback
//! literal and a [`CompileDiagnostic`].

use crate::palette::ResolvedPalettes;
use crate::style::{ColorValue, StyleBag, StyleValue, VisualStyles};
use crate::theme::{ColorMode, Theme};
use crate::tokens::{resolve_token_or_fallback, TokenContext};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Top-level document keys structural colors may not shadow
const RESERVED_KEYS: [&str; 4] = ["name", "dataColors", "visualStyles", "textClasses"];

/// Everything a compile reads
#[derive(Clone, Debug, PartialEq)]
pub struct CompileInput {
    pub name: String,
    pub mode: ColorMode,
    pub data_colors: Vec<String>,
    pub neutral_palette: Vec<String>,
    pub font_family: String,
    pub visual_styles: VisualStyles,
    pub structural_colors: IndexMap<String, StyleValue>,
    pub text_classes: IndexMap<String, StyleBag>,
}

impl CompileInput {
    /// Build the compile input for a theme and its resolved palettes.
    pub fn from_theme(theme: &Theme, palettes: &ResolvedPalettes) -> Self {
        Self {
            name: theme.name.clone(),
            mode: theme.mode,
            data_colors: palettes.color.colors.clone(),
            neutral_palette: palettes.neutral.colors.clone(),
            font_family: theme.font_family.clone(),
            visual_styles: theme.visual_styles.clone(),
            structural_colors: theme.structural_colors.clone(),
            text_classes: theme.text_classes.clone(),
        }
    }
}

/// A token that fell back to a literal during compilation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileDiagnostic {
    /// Dotted location of the field in the document
    pub path: String,
    pub token: String,
    pub fallback: String,
}

/// The compiled, fully concrete theme document
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTheme {
    pub name: String,
    pub data_colors: Vec<String>,
    pub structural_colors: IndexMap<String, StyleValue>,
    pub visual_styles: VisualStyles,
    pub text_classes: IndexMap<String, StyleBag>,
    /// Not part of the document
    pub diagnostics: Vec<CompileDiagnostic>,
}

impl ResolvedTheme {
    /// The document in the rendering surface's theme-JSON shape.
    pub fn to_json(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("name".into(), Value::String(self.name.clone()));
        doc.insert(
            "dataColors".into(),
            Value::Array(
                self.data_colors
                    .iter()
                    .map(|c| Value::String(c.clone()))
                    .collect(),
            ),
        );
        for (key, value) in &self.structural_colors {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            doc.insert(key.clone(), value.to_json());
        }
        doc.insert("visualStyles".into(), self.visual_styles.to_json());
        if !self.text_classes.is_empty() {
            let classes: Map<String, Value> = self
                .text_classes
                .iter()
                .map(|(k, bag)| (k.clone(), bag.to_json()))
                .collect();
            doc.insert("textClasses".into(), Value::Object(classes));
        }
        Value::Object(doc)
    }

    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        let doc = self.to_json();
        if pretty {
            serde_json::to_string_pretty(&doc)
        } else {
            serde_json::to_string(&doc)
        }
    }
}

impl Serialize for ResolvedTheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Expand every token in the input into a literal.
pub fn compile(input: &CompileInput) -> ResolvedTheme {
    let mut walker = Walker {
        mode: input.mode,
        ctx: TokenContext::new(&input.neutral_palette, &input.data_colors),
        diagnostics: Vec::new(),
    };

    let mut path = vec!["visualStyles".to_string()];
    let mut visual_styles = VisualStyles::new();
    for (visual_type, variants) in input.visual_styles.iter() {
        path.push(visual_type.clone());
        for (variant, bag) in variants {
            path.push(variant.clone());
            visual_styles.set_variant(visual_type, variant, walker.bag(bag, &mut path));
            path.pop();
        }
        path.pop();
    }

    let mut structural_colors = IndexMap::with_capacity(input.structural_colors.len());
    for (key, value) in &input.structural_colors {
        if RESERVED_KEYS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "structural color shadows a document key; skipping");
            continue;
        }
        let mut path = vec![key.clone()];
        structural_colors.insert(key.clone(), walker.value(value, &mut path));
    }

    let mut text_classes = IndexMap::with_capacity(input.text_classes.len());
    let mut path = vec!["textClasses".to_string()];
    for (class, bag) in &input.text_classes {
        path.push(class.clone());
        let mut compiled = walker.bag(bag, &mut path);
        if !input.font_family.is_empty() && !compiled.contains_key("fontFace") {
            compiled.insert("fontFace", StyleValue::Text(input.font_family.clone()));
        }
        text_classes.insert(class.clone(), compiled);
        path.pop();
    }

    ResolvedTheme {
        name: input.name.clone(),
        data_colors: input.data_colors.clone(),
        structural_colors,
        visual_styles,
        text_classes,
        diagnostics: walker.diagnostics,
    }
}

struct Walker<'a> {
    mode: ColorMode,
    ctx: TokenContext<'a>,
    diagnostics: Vec<CompileDiagnostic>,
}

impl Walker<'_> {
    fn bag(&mut self, bag: &StyleBag, path: &mut Vec<String>) -> StyleBag {
        let mut out = StyleBag::new();
        for (key, value) in bag.iter() {
            path.push(key.clone());
            out.insert(key.clone(), self.value(value, path));
            path.pop();
        }
        out
    }

    fn value(&mut self, value: &StyleValue, path: &mut Vec<String>) -> StyleValue {
        match value {
            StyleValue::Color(ColorValue::Token(token)) => {
                let (hex, resolved) = resolve_token_or_fallback(token, self.mode, &self.ctx);
                if !resolved {
                    let location = path.join(".");
                    tracing::warn!(
                        path = %location,
                        token = %token,
                        fallback = %hex,
                        "unresolved token; using fallback"
                    );
                    self.diagnostics.push(CompileDiagnostic {
                        path: location,
                        token: token.clone(),
                        fallback: hex.clone(),
                    });
                }
                StyleValue::Color(ColorValue::Hex(hex))
            }
            StyleValue::List(items) => StyleValue::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        path.push(i.to_string());
                        let out = self.value(item, path);
                        path.pop();
                        out
                    })
                    .collect(),
            ),
            StyleValue::Group(bag) => StyleValue::Group(self.bag(bag, path)),
            StyleValue::Color(_)
            | StyleValue::Number(_)
            | StyleValue::Bool(_)
            | StyleValue::Text(_)
            | StyleValue::Null => value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ColorPalette, NeutralPalette};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn shades(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| {
                let v = 250 - i * 20;
                format!("#{v:02X}{v:02X}{v:02X}")
            })
            .collect()
    }

    fn input(mode: ColorMode, neutral: Vec<String>) -> CompileInput {
        let theme: Theme = serde_json::from_value(json!({
            "name": "Test",
            "mode": mode,
            "fontFamily": "Inter",
            "visualStyles": {
                "*": {"*": {
                    "title": [{"fontColor": {"solid": {"color": "@text-primary"}}, "show": true}],
                    "border": [{"color": {"solid": {"color": "@border-primary"}}, "radius": 8}]
                }},
                "lineChart": {"*": {"dataPoint": [{"fill": {"solid": {"color": "@accent"}}}]}}
            },
            "structuralColors": {"background": "@background", "tableAccent": "#118DFF"},
            "textClasses": {"title": {"fontSize": 14, "color": "@text-secondary"}}
        }))
        .unwrap();
        let palettes = ResolvedPalettes {
            color: ColorPalette::new("c", "C", vec!["#118DFF".into(), "#12239E".into()]),
            neutral: NeutralPalette::new("n", "N", neutral),
        };
        let mut input = CompileInput::from_theme(&theme, &palettes);
        input.mode = mode;
        input
    }

    #[test]
    fn tokens_become_literals() {
        let neutral = shades(12);
        let doc = compile(&input(ColorMode::Light, neutral.clone())).to_json();

        assert_eq!(
            doc["visualStyles"]["*"]["*"]["title"][0]["fontColor"]["solid"]["color"],
            json!(neutral[9])
        );
        assert_eq!(
            doc["visualStyles"]["lineChart"]["*"]["dataPoint"][0]["fill"]["solid"]["color"],
            json!("#118DFF")
        );
        assert_eq!(doc["background"], json!(neutral[0]));
        assert_eq!(doc["tableAccent"], json!("#118DFF"));
        assert_eq!(doc["textClasses"]["title"]["color"], json!(neutral[7]));
        assert_eq!(doc["textClasses"]["title"]["fontFace"], json!("Inter"));
        assert_eq!(doc["visualStyles"]["*"]["*"]["border"][0]["radius"], json!(8));
    }

    #[test]
    fn mode_switch_changes_only_resolved_values() {
        let neutral = shades(12);
        let light = compile(&input(ColorMode::Light, neutral.clone())).to_json();
        let dark = compile(&input(ColorMode::Dark, neutral.clone())).to_json();

        let title_color =
            |d: &Value| d["visualStyles"]["*"]["*"]["title"][0]["fontColor"]["solid"]["color"].clone();
        assert_eq!(title_color(&light), json!(neutral[9]));
        assert_eq!(title_color(&dark), json!(neutral[1]));
    }

    #[test]
    fn compile_is_deterministic() {
        let a = compile(&input(ColorMode::Dark, shades(12)));
        let b = compile(&input(ColorMode::Dark, shades(12)));
        assert_eq!(a, b);
        assert_eq!(
            a.to_json_string(false).unwrap(),
            b.to_json_string(false).unwrap()
        );
    }

    #[test]
    fn short_neutral_palette_falls_back() {
        let resolved = compile(&input(ColorMode::Light, shades(3)));
        let doc = resolved.to_json();

        assert_eq!(
            doc["visualStyles"]["*"]["*"]["title"][0]["fontColor"]["solid"]["color"],
            json!("#252423")
        );
        assert_eq!(
            doc["visualStyles"]["*"]["*"]["border"][0]["color"]["solid"]["color"],
            json!("#E1DFDD")
        );
        assert!(resolved
            .diagnostics
            .iter()
            .any(|d| d.path == "visualStyles.*.*.title.0.fontColor.solid.color"
                && d.token == "@text-primary"));
    }

    #[test]
    fn structural_colors_cannot_shadow_document_keys() {
        let mut input = input(ColorMode::Light, shades(12));
        input
            .structural_colors
            .insert("name".into(), StyleValue::from("#000000"));
        let doc = compile(&input).to_json();
        assert_eq!(doc["name"], json!("Test"));
    }
}
