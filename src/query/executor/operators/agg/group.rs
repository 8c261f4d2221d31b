use linked_hash_map::LinkedHashMap;
use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::query::executor::result::{DataValue, Dataset, Record};
use crate::query::executor::type_conversion::{ValueKey, comparison_text};

/// Records sharing one group key
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// The key value as first seen in the dataset
    pub key: DataValue,
    pub records: Dataset,
}

/// Result of `group_by`: groups in first-seen key order.
///
/// Keys are matched with loose equality, so `1`, `1.0` and `"1"` land in the
/// same group.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    groups: LinkedHashMap<ValueKey, Group>,
}

impl Grouping {
    pub fn get(&self, key: &DataValue) -> Option<&Group> {
        self.groups.get(&ValueKey::from(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &DataValue> {
        self.groups.values().map(|g| &g.key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> Vec<Group> {
        self.groups.into_iter().map(|(_, g)| g).collect()
    }
}

// Serialized as an object from key text to records; a null key becomes "".
impl Serialize for Grouping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in self.groups.values() {
            map.serialize_entry(comparison_text(&group.key).as_ref(), &group.records)?;
        }
        map.end()
    }
}

/// Partition `records` by the value of `column`
pub fn group_by(records: &[Record], column: &str) -> Grouping {
    let mut groups: LinkedHashMap<ValueKey, Group> = LinkedHashMap::new();

    for record in records {
        let value = record.resolve(column);
        groups
            .entry(ValueKey::from(value))
            .or_insert_with(|| Group {
                key: value.clone(),
                records: Vec::new(),
            })
            .records
            .push(record.clone());
    }

    debug!("Grouped {} records by {} into {} groups", records.len(), column, groups.len());
    Grouping { groups }
}
