use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of one source slot. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(u64);

impl SourceId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub id: SourceId,
    pub link: String,
}

/// How small the list may get through removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinEntries {
    Zero,
    #[default]
    One,
}

impl MinEntries {
    pub fn count(self) -> usize {
        match self {
            MinEntries::Zero => 0,
            MinEntries::One => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
    /// Removal would take the list below its configured minimum.
    AtMinimum,
}

/// Ordered list of source URL entries.
///
/// Entries live in a map keyed by [`SourceId`]. Ids are handed out in
/// increasing order and only ever appended, so key order is insertion order
/// and removing one entry never disturbs the identity of its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceList {
    entries: BTreeMap<SourceId, String>,
    next_id: u64,
    min_entries: MinEntries,
}

impl Default for SourceList {
    fn default() -> Self {
        Self::new(MinEntries::default())
    }
}

impl SourceList {
    /// Creates the initial list: as many empty entries as the policy requires.
    pub fn new(min_entries: MinEntries) -> Self {
        let mut list = Self {
            entries: BTreeMap::new(),
            next_id: 1,
            min_entries,
        };
        list.fill_to_minimum();
        list
    }

    pub fn min_entries(&self) -> MinEntries {
        self.min_entries
    }

    pub fn append(&mut self) -> SourceId {
        let id = SourceId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, String::new());
        id
    }

    pub fn remove(&mut self, id: SourceId) -> RemoveOutcome {
        if !self.entries.contains_key(&id) {
            return RemoveOutcome::NotFound;
        }
        if self.entries.len() <= self.min_entries.count() {
            return RemoveOutcome::AtMinimum;
        }
        self.entries.remove(&id);
        RemoveOutcome::Removed
    }

    /// Replaces the link text of `id`. Returns `false` if no such entry exists.
    pub fn update(&mut self, id: SourceId, link: impl Into<String>) -> bool {
        match self.entries.get_mut(&id) {
            Some(slot) => {
                *slot = link.into();
                true
            }
            None => false,
        }
    }

    /// Drops every entry and refills to the initial shape with fresh ids.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.fill_to_minimum();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: SourceId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: SourceId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Id of the entry at `position` in display order.
    pub fn id_at(&self, position: usize) -> Option<SourceId> {
        self.entries.keys().nth(position).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.entries.keys().copied()
    }

    pub fn entries(&self) -> Vec<SourceEntry> {
        self.entries
            .iter()
            .map(|(id, link)| SourceEntry {
                id: *id,
                link: link.clone(),
            })
            .collect()
    }

    /// Links in display order; ids dropped, text passed through untouched.
    pub fn links(&self) -> Vec<String> {
        self.entries.values().cloned().collect()
    }

    fn fill_to_minimum(&mut self) {
        while self.entries.len() < self.min_entries.count() {
            self.append();
        }
    }
}
