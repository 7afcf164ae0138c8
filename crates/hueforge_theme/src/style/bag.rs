//! Property bags

use super::value::StyleValue;
use crate::error::{Result, ThemeError};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// An ordered property bag: property name → value.
///
/// Equality ignores key order; serialization keeps insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleBag {
    entries: IndexMap<String, StyleValue>,
}

impl StyleBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut StyleValue> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Option<StyleValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Follow a path through nested groups and lists.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&StyleValue> {
        let (first, rest) = path.split_first()?;
        let mut current = self.entries.get(first.as_ref())?;
        for segment in rest {
            current = match current {
                StyleValue::Group(bag) => bag.get(segment.as_ref())?,
                StyleValue::List(items) => items.get(segment.as_ref().parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Write a value at a path, creating intermediate groups.
    ///
    /// A scalar in the way is replaced by a group. List segments must be an
    /// existing index.
    pub fn set_path<S: AsRef<str>>(&mut self, path: &[S], value: StyleValue) -> Result<()> {
        let Some((first, rest)) = path.split_first() else {
            return Err(ThemeError::InvalidPath(String::new()));
        };
        let slot = self
            .entries
            .entry(first.as_ref().to_string())
            .or_insert(StyleValue::Null);
        write_into(slot, rest, value, path)
    }

    /// Remove the value at a path. Empty parent groups are kept.
    pub fn remove_path<S: AsRef<str>>(&mut self, path: &[S]) -> Option<StyleValue> {
        let (last, parents) = path.split_last()?;
        if parents.is_empty() {
            return self.remove(last.as_ref());
        }
        match self.get_path_mut(parents)? {
            StyleValue::Group(bag) => bag.remove(last.as_ref()),
            StyleValue::List(items) => {
                let index = last.as_ref().parse::<usize>().ok()?;
                (index < items.len()).then(|| items.remove(index))
            }
            _ => None,
        }
    }

    fn get_path_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Option<&mut StyleValue> {
        let (first, rest) = path.split_first()?;
        let mut current = self.entries.get_mut(first.as_ref())?;
        for segment in rest {
            current = match current {
                StyleValue::Group(bag) => bag.get_mut(segment.as_ref())?,
                StyleValue::List(items) => {
                    items.get_mut(segment.as_ref().parse::<usize>().ok()?)?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    /// Read `field` from the first entry of a list-valued property
    /// (`property: [{ field: … }]`).
    pub fn field(&self, property: &str, field: &str) -> Option<&StyleValue> {
        self.get_path(&[property, "0", field])
    }

    /// Write `field` into the first entry of a list-valued property,
    /// creating the list and its first entry when missing.
    pub fn set_field(&mut self, property: &str, field: &str, value: impl Into<StyleValue>) {
        let slot = self
            .entries
            .entry(property.to_string())
            .or_insert(StyleValue::Null);
        match slot {
            StyleValue::List(items) => {
                if items.is_empty() {
                    items.push(StyleValue::Group(StyleBag::new()));
                } else if !matches!(items[0], StyleValue::Group(_)) {
                    items[0] = StyleValue::Group(StyleBag::new());
                }
            }
            _ => *slot = StyleValue::List(vec![StyleValue::Group(StyleBag::new())]),
        }
        if let StyleValue::List(items) = slot {
            if let Some(StyleValue::Group(entry)) = items.first_mut() {
                entry.insert(field, value);
            }
        }
    }

    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        Self {
            entries: map
                .iter()
                .map(|(k, v)| (k.clone(), StyleValue::from_json(v)))
                .collect(),
        }
    }

    /// Build a name → bag map from JSON, skipping entries that are not
    /// objects. `section` names the map in diagnostics.
    pub fn map_from_json_lossy(section: &str, value: &Value) -> IndexMap<String, StyleBag> {
        let Some(entries) = value.as_object() else {
            if !value.is_null() {
                tracing::warn!(section, "not an object; ignoring");
            }
            return IndexMap::new();
        };

        let mut out = IndexMap::with_capacity(entries.len());
        for (name, bag) in entries {
            match bag.as_object() {
                Some(map) => {
                    out.insert(name.clone(), StyleBag::from_json_map(map));
                }
                None => {
                    tracing::warn!(section, name = %name, "skipping style bag: not an object");
                }
            }
        }
        out
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

fn write_into<S: AsRef<str>>(
    slot: &mut StyleValue,
    rest: &[S],
    value: StyleValue,
    full: &[S],
) -> Result<()> {
    let Some((segment, tail)) = rest.split_first() else {
        *slot = value;
        return Ok(());
    };
    match slot {
        StyleValue::List(items) => {
            let len = items.len();
            let index = segment
                .as_ref()
                .parse::<usize>()
                .ok()
                .filter(|i| *i < len)
                .ok_or_else(|| invalid(full))?;
            write_into(&mut items[index], tail, value, full)
        }
        StyleValue::Group(bag) => {
            let child = bag
                .entries
                .entry(segment.as_ref().to_string())
                .or_insert(StyleValue::Null);
            write_into(child, tail, value, full)
        }
        _ => {
            *slot = StyleValue::Group(StyleBag::new());
            write_into(slot, rest, value, full)
        }
    }
}

fn invalid<S: AsRef<str>>(path: &[S]) -> ThemeError {
    ThemeError::InvalidPath(
        path.iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join("."),
    )
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for StyleBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StyleBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_json_map(&map))
    }
}
