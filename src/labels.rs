//! Label identifiers and region size accounting.

use crate::interval::{LabelId, Span};
use rustc_hash::FxHashMap;

/// Dense name <-> id table with one size accumulator per label.
///
/// Ids are assigned in first-seen order starting at 0 and never change.
/// Sizes only ever grow: every inserted interval credits its full length,
/// duplicates included.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    names: Vec<String>,
    ids: FxHashMap<String, LabelId>,
    sizes: Vec<u64>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `name`, assigning the next free id if unseen.
    pub fn intern(&mut self, name: &str) -> LabelId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        self.sizes.push(0);
        id
    }

    /// Add the length of `span` to the size of `label`.
    ///
    /// Saturates at `u64::MAX`, so a size never decreases.
    #[inline]
    pub fn credit(&mut self, label: LabelId, span: Span) {
        self.sizes[label] = self.sizes[label].saturating_add(span.len());
    }

    pub fn id(&self, name: &str) -> Option<LabelId> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, label: LabelId) -> Option<&str> {
        self.names.get(label).map(String::as_str)
    }

    /// Accumulated size of `name`, or 0 if unknown.
    pub fn size(&self, name: &str) -> u64 {
        self.id(name).map_or(0, |id| self.sizes[id])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Label names in id order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Label of a region file spec plus whether it may split into sub-labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabel {
    pub name: String,
    pub fixed: bool,
}

/// Label reserved for the confident (truth) region set.
pub const CONF_LABEL: &str = "CONF";

impl FileLabel {
    /// `CONF` is always fixed.
    pub fn new(name: impl Into<String>, fixed: bool) -> Self {
        let name = name.into();
        let fixed = fixed || name == CONF_LABEL;
        Self { name, fixed }
    }

    /// Name of the compound label for a sub-label value, or `None` when this
    /// file does not split.
    pub fn compound(&self, sublabel: &str) -> Option<String> {
        (!self.fixed).then(|| format!("{}_{}", self.name, sublabel))
    }
}
