//! Typed property bags for visual styles
//!
//! Theme documents are loosely-typed JSON. Ingestion classifies every leaf
//! once into a [`StyleValue`] so the merge and compile walks can match on
//! the value kind instead of probing shapes at runtime:
//!
//! - `"@text-primary"` → [`ColorValue::Token`]
//! - `"#118DFF"` → [`ColorValue::Hex`]
//! - `{"expr":{"ThemeDataColor":{"ColorId":1,"Percent":0}}}` → [`ColorValue::ThemeData`]
//! - objects → [`StyleValue::Group`], arrays → [`StyleValue::List`]
//!
//! Property paths are lists of segments. A segment addressing a list is a
//! decimal index.

mod bag;
mod value;
mod visual;

pub use bag::StyleBag;
pub use value::{ColorValue, StyleValue};
pub use visual::{VisualStyles, DEFAULT_VARIANT, GLOBAL_VISUAL, PAGE_VISUAL};
