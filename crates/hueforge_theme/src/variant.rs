//! Variant inheritance
//!
//! A named variant is a sparse override layered on its visual type's default
//! (`"*"`) bag. Merging recurses through groups; lists and scalars from the
//! variant replace the default's value wholesale.

use crate::style::{StyleBag, StyleValue, VisualStyles, DEFAULT_VARIANT};

/// The effective style of `variant_name` for `visual_type`.
///
/// Read-only projection: neither input is touched and the result owns all
/// of its data. A missing variant yields the default bag; a missing default
/// is treated as empty.
pub fn compute_variant_style(
    visual_styles: &VisualStyles,
    visual_type: &str,
    variant_name: &str,
) -> StyleBag {
    let base = visual_styles
        .default_bag(visual_type)
        .cloned()
        .unwrap_or_default();
    if variant_name == DEFAULT_VARIANT {
        return base;
    }
    match visual_styles.variant(visual_type, variant_name) {
        Some(overlay) => deep_merge(&base, overlay),
        None => base,
    }
}

/// Merge `overlay` onto `base`, overlay winning.
pub fn deep_merge(base: &StyleBag, overlay: &StyleBag) -> StyleBag {
    let mut out = base.clone();
    for (key, value) in overlay.iter() {
        let merged = match (out.get(key), value) {
            (Some(StyleValue::Group(a)), StyleValue::Group(b)) => {
                StyleValue::Group(deep_merge(a, b))
            }
            _ => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn styles(value: serde_json::Value) -> VisualStyles {
        VisualStyles::from_json_lossy(&value)
    }

    #[test]
    fn named_variant_overrides_and_inherits() {
        let vs = styles(json!({
            "card": {
                "*": {"border": {"color": "@border-primary", "radius": 8}},
                "outlined": {"border": {"color": "@border-secondary"}}
            }
        }));
        let merged = compute_variant_style(&vs, "card", "outlined");
        assert_eq!(
            merged.to_json(),
            json!({"border": {"color": "@border-secondary", "radius": 8}})
        );
    }

    #[test]
    fn lists_replace_instead_of_merging() {
        let vs = styles(json!({
            "lineChart": {
                "*": {"dataColors": ["#111111", "#222222", "#333333"]},
                "mono": {"dataColors": ["#999999"]}
            }
        }));
        let merged = compute_variant_style(&vs, "lineChart", "mono");
        assert_eq!(merged.to_json(), json!({"dataColors": ["#999999"]}));
    }

    #[test]
    fn missing_variant_or_default() {
        let vs = styles(json!({
            "card": {"*": {"padding": [{"top": 4}]}},
            "slicer": {"compact": {"padding": [{"top": 2}]}}
        }));

        assert_eq!(
            compute_variant_style(&vs, "card", "nope"),
            vs.default_bag("card").cloned().unwrap()
        );
        assert!(compute_variant_style(&vs, "table", "nope").is_empty());
        assert_eq!(
            compute_variant_style(&vs, "slicer", "compact").to_json(),
            json!({"padding": [{"top": 2}]})
        );
    }

    #[test]
    fn result_is_independent_of_inputs() {
        let vs = styles(json!({"card": {"*": {"title": {"show": true}}}}));
        let mut merged = compute_variant_style(&vs, "card", "*");
        merged
            .set_path(&["title", "show"], StyleValue::Bool(false))
            .unwrap();
        assert_eq!(
            vs.default_bag("card").unwrap().get_path(&["title", "show"]),
            Some(&StyleValue::Bool(true))
        );
    }

    #[test]
    fn scalar_overlay_replaces_group() {
        let base: StyleBag = [("border", StyleValue::from(json_group()))].into_iter().collect();
        let overlay: StyleBag = [("border", StyleValue::Bool(false))].into_iter().collect();
        assert_eq!(
            deep_merge(&base, &overlay).get("border"),
            Some(&StyleValue::Bool(false))
        );
    }

    fn json_group() -> StyleBag {
        [("radius", StyleValue::from(4i64))].into_iter().collect()
    }
}
