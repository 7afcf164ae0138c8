//! Style leaf values

use super::bag::StyleBag;
use crate::tokens::{is_token, ColorToken};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Number, Value};

/// A color field value
#[derive(Clone, Debug, PartialEq)]
pub enum ColorValue {
    /// Symbolic token, sigil included (`@border-primary`)
    Token(String),
    /// Literal hex string
    Hex(String),
    /// Reference to a theme data color by index, with a shade percent
    ThemeData { color_id: u64, percent: Number },
}

impl ColorValue {
    pub fn token(token: ColorToken) -> Self {
        Self::Token(token.name().to_string())
    }

    pub fn hex(hex: impl Into<String>) -> Self {
        Self::Hex(hex.into())
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Token(s) | Self::Hex(s) => Value::String(s.clone()),
            Self::ThemeData { color_id, percent } => json!({
                "expr": {
                    "ThemeDataColor": {
                        "ColorId": color_id,
                        "Percent": percent,
                    }
                }
            }),
        }
    }

    /// Recognize `{"expr":{"ThemeDataColor":{"ColorId":n,"Percent":p}}}`.
    fn theme_data_from_json(map: &Map<String, Value>) -> Option<Self> {
        if map.len() != 1 {
            return None;
        }
        let expr = map.get("expr")?.as_object()?;
        if expr.len() != 1 {
            return None;
        }
        let data = expr.get("ThemeDataColor")?.as_object()?;
        if data.len() != 2 {
            return None;
        }
        let color_id = data.get("ColorId")?.as_u64()?;
        let percent = match data.get("Percent")? {
            Value::Number(n) => n.clone(),
            _ => return None,
        };
        Some(Self::ThemeData { color_id, percent })
    }
}

/// A single property value inside a style bag
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Color(ColorValue),
    Number(Number),
    Bool(bool),
    Text(String),
    List(Vec<StyleValue>),
    Group(StyleBag),
    Null,
}

impl StyleValue {
    /// Wrap a color the way report themes expect fills: `{"solid":{"color":…}}`.
    pub fn solid(color: ColorValue) -> Self {
        let mut inner = StyleBag::new();
        inner.insert("color", StyleValue::Color(color));
        let mut outer = StyleBag::new();
        outer.insert("solid", StyleValue::Group(inner));
        StyleValue::Group(outer)
    }

    /// The color inside a `{"solid":{"color":…}}` fill, or a bare color.
    pub fn as_solid_color(&self) -> Option<&ColorValue> {
        match self {
            StyleValue::Color(c) => Some(c),
            StyleValue::Group(bag) => match bag.get_path(&["solid", "color"])? {
                StyleValue::Color(c) => Some(c),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&StyleBag> {
        match self {
            StyleValue::Group(bag) => Some(bag),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut StyleBag> {
        match self {
            StyleValue::Group(bag) => Some(bag),
            _ => None,
        }
    }

    /// Classify a JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => StyleValue::Null,
            Value::Bool(b) => StyleValue::Bool(*b),
            Value::Number(n) => StyleValue::Number(n.clone()),
            Value::String(s) => StyleValue::from(s.as_str()),
            Value::Array(items) => StyleValue::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => match ColorValue::theme_data_from_json(map) {
                Some(color) => StyleValue::Color(color),
                None => StyleValue::Group(StyleBag::from_json_map(map)),
            },
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            StyleValue::Color(c) => c.to_json(),
            StyleValue::Number(n) => Value::Number(n.clone()),
            StyleValue::Bool(b) => Value::Bool(*b),
            StyleValue::Text(s) => Value::String(s.clone()),
            StyleValue::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            StyleValue::Group(bag) => bag.to_json(),
            StyleValue::Null => Value::Null,
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        if is_token(s) {
            StyleValue::Color(ColorValue::Token(s.to_string()))
        } else if is_hex_color(s) {
            StyleValue::Color(ColorValue::Hex(s.to_string()))
        } else {
            StyleValue::Text(s.to_string())
        }
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::from(s.as_str())
    }
}

impl From<bool> for StyleValue {
    fn from(b: bool) -> Self {
        StyleValue::Bool(b)
    }
}

impl From<i64> for StyleValue {
    fn from(n: i64) -> Self {
        StyleValue::Number(n.into())
    }
}

impl From<u32> for StyleValue {
    fn from(n: u32) -> Self {
        StyleValue::Number(n.into())
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(StyleValue::Null, StyleValue::Number)
    }
}

impl From<ColorToken> for StyleValue {
    fn from(token: ColorToken) -> Self {
        StyleValue::Color(ColorValue::token(token))
    }
}

impl From<ColorValue> for StyleValue {
    fn from(color: ColorValue) -> Self {
        StyleValue::Color(color)
    }
}

impl From<StyleBag> for StyleValue {
    fn from(bag: StyleBag) -> Self {
        StyleValue::Group(bag)
    }
}

impl From<Vec<StyleValue>> for StyleValue {
    fn from(items: Vec<StyleValue>) -> Self {
        StyleValue::List(items)
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(StyleValue::from_json(&value))
    }
}
