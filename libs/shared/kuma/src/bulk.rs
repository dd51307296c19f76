use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A reading the engine reports for all monitors at once, keyed by monitor id.
///
/// A missing key means the engine has no data for that monitor yet. That is
/// not an error: a read that failed outright is a `KumaError` instead. The
/// engine reports `null` for monitors it has no samples for; those entries
/// decode as missing keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BulkReading<V> {
    entries: HashMap<i64, V>,
}

impl<V> BulkReading<V> {
    pub fn new(entries: HashMap<i64, V>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, id: i64) -> Option<&V> {
        self.entries.get(&id)
    }

    /// Remove and return the entry for `id`.
    pub fn take(&mut self, id: i64) -> Option<V> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for BulkReading<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<i64, Option<V>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(id, value)| value.map(|value| (id, value)))
            .collect())
    }
}

impl<V> Default for BulkReading<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> FromIterator<(i64, V)> for BulkReading<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
