use crate::config::model::AspectRatioEntry;

/// Aspect-ratio entries kept in ascending ratio order.
///
/// Index 0 is the innermost (smallest) ratio; mask bands are composited outwards from it, so
/// the order is part of the draw contract. Entries with equal ratios keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<AspectRatioEntry>", into = "Vec<AspectRatioEntry>")]
pub struct AspectRatioSet {
    entries: Vec<AspectRatioEntry>,
}

impl AspectRatioSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts after any entries with an equal or smaller ratio; returns the new index.
    pub fn insert(&mut self, entry: AspectRatioEntry) -> usize {
        let idx = self
            .entries
            .partition_point(|e| e.ratio.total_cmp(&entry.ratio).is_le());
        self.entries.insert(idx, entry);
        idx
    }

    pub fn remove(&mut self, idx: usize) -> Option<AspectRatioEntry> {
        (idx < self.entries.len()).then(|| self.entries.remove(idx))
    }

    pub fn get(&self, idx: usize) -> Option<&AspectRatioEntry> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AspectRatioEntry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[AspectRatioEntry] {
        &self.entries
    }
}

impl From<Vec<AspectRatioEntry>> for AspectRatioSet {
    fn from(mut entries: Vec<AspectRatioEntry>) -> Self {
        entries.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));
        Self { entries }
    }
}

impl From<AspectRatioSet> for Vec<AspectRatioEntry> {
    fn from(set: AspectRatioSet) -> Self {
        set.entries
    }
}

impl FromIterator<AspectRatioEntry> for AspectRatioSet {
    fn from_iter<I: IntoIterator<Item = AspectRatioEntry>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a AspectRatioSet {
    type Item = &'a AspectRatioEntry;
    type IntoIter = std::slice::Iter<'a, AspectRatioEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/aspect_set.rs"]
mod tests;
