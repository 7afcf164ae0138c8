//! Per-visual style trees

use super::bag::StyleBag;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Variant name of the default style for a visual type
pub const DEFAULT_VARIANT: &str = "*";

/// Visual-type key whose default applies to every visual
pub const GLOBAL_VISUAL: &str = "*";

/// Visual-type key holding page-level styles
pub const PAGE_VISUAL: &str = "page";

type Variants = IndexMap<String, StyleBag>;

/// Style overrides: visual type → variant name → property bag.
///
/// Each visual type holds at most one default (`"*"`) variant. A visual type
/// without one behaves as if its default were empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualStyles {
    visuals: IndexMap<String, Variants>,
}

impl VisualStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Number of visual types
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn visual_types(&self) -> impl Iterator<Item = &String> {
        self.visuals.keys()
    }

    /// Variant names stored for a visual type, default first when present.
    pub fn variant_names(&self, visual_type: &str) -> Vec<&str> {
        let Some(variants) = self.visuals.get(visual_type) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = variants.keys().map(String::as_str).collect();
        names.sort_by_key(|name| *name != DEFAULT_VARIANT);
        names
    }

    pub fn variant(&self, visual_type: &str, variant: &str) -> Option<&StyleBag> {
        self.visuals.get(visual_type)?.get(variant)
    }

    pub fn default_bag(&self, visual_type: &str) -> Option<&StyleBag> {
        self.variant(visual_type, DEFAULT_VARIANT)
    }

    /// Mutable access to a variant bag, creating it (and its visual type)
    /// when missing.
    pub fn variant_mut(&mut self, visual_type: &str, variant: &str) -> &mut StyleBag {
        self.visuals
            .entry(visual_type.to_string())
            .or_default()
            .entry(variant.to_string())
            .or_default()
    }

    /// Replace a variant bag wholesale.
    pub fn set_variant(&mut self, visual_type: &str, variant: &str, bag: StyleBag) {
        *self.variant_mut(visual_type, variant) = bag;
    }

    /// Remove a variant. A visual type left without variants is dropped.
    pub fn remove_variant(&mut self, visual_type: &str, variant: &str) -> Option<StyleBag> {
        let variants = self.visuals.get_mut(visual_type)?;
        let removed = variants.shift_remove(variant);
        if variants.is_empty() {
            self.visuals.shift_remove(visual_type);
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexMap<String, StyleBag>)> {
        self.visuals.iter()
    }

    /// Build from JSON, skipping entries that are not objects.
    ///
    /// One malformed visual or variant never discards its siblings.
    pub fn from_json_lossy(value: &Value) -> Self {
        let Some(visuals) = value.as_object() else {
            if !value.is_null() {
                tracing::warn!("visualStyles is not an object; ignoring");
            }
            return Self::default();
        };

        let mut out = Self::default();
        for (visual_type, variants) in visuals {
            let Some(variants) = variants.as_object() else {
                tracing::warn!(visual_type = %visual_type, "skipping visual style: not an object");
                continue;
            };
            let mut entry = Variants::with_capacity(variants.len());
            for (variant, bag) in variants {
                match bag.as_object() {
                    Some(map) => {
                        entry.insert(variant.clone(), StyleBag::from_json_map(map));
                    }
                    None => {
                        tracing::warn!(
                            visual_type = %visual_type,
                            variant = %variant,
                            "skipping style bag: not an object"
                        );
                    }
                }
            }
            if !entry.is_empty() {
                out.visuals.insert(visual_type.clone(), entry);
            }
        }
        out
    }

    pub fn to_json(&self) -> Value {
        let mut visuals = Map::new();
        for (visual_type, variants) in &self.visuals {
            let variants: Map<String, Value> = variants
                .iter()
                .map(|(name, bag)| (name.clone(), bag.to_json()))
                .collect();
            visuals.insert(visual_type.clone(), Value::Object(variants));
        }
        Value::Object(visuals)
    }
}

impl FromIterator<(String, String, StyleBag)> for VisualStyles {
    fn from_iter<I: IntoIterator<Item = (String, String, StyleBag)>>(iter: I) -> Self {
        let mut out = Self::default();
        for (visual_type, variant, bag) in iter {
            out.set_variant(&visual_type, &variant, bag);
        }
        out
    }
}

impl Serialize for VisualStyles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VisualStyles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json_lossy(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn malformed_bags_are_skipped_individually() {
        let styles = VisualStyles::from_json_lossy(&json!({
            "card": {
                "*": {"border": [{"show": true}]},
                "bad": 7
            },
            "lineChart": "nope",
            "slicer": {"*": {"padding": [{"top": 2}]}}
        }));

        assert!(styles.default_bag("card").is_some());
        assert!(styles.variant("card", "bad").is_none());
        assert!(styles.variant_names("lineChart").is_empty());
        assert!(styles.visual_types().all(|v| v != "lineChart"));
        assert_eq!(
            styles.default_bag("slicer").and_then(|b| b.field("padding", "top")),
            Some(&StyleValue::from(2i64))
        );
    }

    #[test]
    fn visual_with_only_malformed_bags_is_dropped() {
        let styles = VisualStyles::from_json_lossy(&json!({
            "gauge": {"*": 1, "compact": "x"},
            "card": {"*": {"title": [{"show": true}]}}
        }));
        assert_eq!(styles.visual_types().collect::<Vec<_>>(), vec!["card"]);
        assert_eq!(styles.to_json(), json!({"card": {"*": {"title": [{"show": true}]}}}));
    }

    #[test]
    fn removing_last_variant_drops_visual() {
        let mut styles = VisualStyles::new();
        styles.variant_mut("card", "*").insert("x", 1i64);
        styles.variant_mut("card", "compact").insert("x", 2i64);

        assert_eq!(styles.variant_names("card"), vec!["*", "compact"]);
        styles.remove_variant("card", "*");
        styles.remove_variant("card", "compact");
        assert!(styles.is_empty());
    }

    #[test]
    fn json_shape_is_preserved() {
        let src = json!({
            "*": {"*": {"border": [{"color": {"solid": {"color": "@border-primary"}}, "radius": 8}]}},
            "page": {"*": {"background": [{"transparency": 0}]}}
        });
        assert_eq!(VisualStyles::from_json_lossy(&src).to_json(), src);
    }
}
