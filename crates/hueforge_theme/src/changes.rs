//! Change tracking for unsaved-state indicators
//!
//! Every mutation of the symbolic theme records the property path it touched.
//! The set is cleared whenever a new baseline is taken (load, save, reset).

use crate::theme::Theme;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// A property path, e.g. `visualStyles.lineChart.*.categoryAxis`
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    pub fn new<S: AsRef<str>>(segments: &[S]) -> Self {
        Self(segments.iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// Split a dotted path. Empty segments are dropped.
    pub fn parse(dotted: &str) -> Self {
        Self(
            dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segment-wise prefix test: `visualStyles.card` is under `visualStyles`
    /// but not under `visualStyles.car`.
    pub fn starts_with(&self, prefix: &PropertyPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for PropertyPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for PropertyPath {
    fn from(segments: [S; N]) -> Self {
        Self::new(&segments)
    }
}

impl From<Vec<String>> for PropertyPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

/// Changed paths since the last baseline
#[derive(Clone, Debug, Default)]
pub struct ChangeTracker {
    changes: BTreeSet<PropertyPath>,
    original: Option<Theme>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track_change(&mut self, path: impl Into<PropertyPath>) {
        let path = path.into();
        if path.is_empty() {
            return;
        }
        if self.changes.insert(path.clone()) {
            tracing::trace!(path = %path, "tracked change");
        }
    }

    /// Exact membership.
    pub fn has_changes(&self, path: impl Into<PropertyPath>) -> bool {
        self.changes.contains(&path.into())
    }

    /// Whether any changed path lies under `prefix`.
    pub fn has_changes_in_section(&self, prefix: impl Into<PropertyPath>) -> bool {
        let prefix = prefix.into();
        self.changes.iter().any(|p| p.starts_with(&prefix))
    }

    /// Number of changed paths under `prefix`.
    pub fn changed_properties_count(&self, prefix: impl Into<PropertyPath>) -> usize {
        let prefix = prefix.into();
        self.changes.iter().filter(|p| p.starts_with(&prefix)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Changed paths in sorted order.
    pub fn changed_paths(&self) -> impl Iterator<Item = &PropertyPath> {
        self.changes.iter()
    }

    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }

    /// Take `snapshot` as the new baseline and clear all changes.
    pub fn set_original_theme(&mut self, snapshot: Theme) {
        self.original = Some(snapshot);
        self.clear_changes();
    }

    pub fn original_theme(&self) -> Option<&Theme> {
        self.original.as_ref()
    }
}
