use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output of [`normalize`](crate::normalize).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Normalized {
    /// Flattened records, one table per entity key
    pub entities: Entities,

    /// The input with every entity replaced by its id
    pub result: Value,
}

/// Entity tables: entity key -> id -> record.
///
/// Ids are stored as strings; a numeric id `1` and a string id `"1"` name the
/// same record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entities {
    tables: IndexMap<String, IndexMap<String, Value>>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str, id: &str) -> Option<&Value> {
        self.tables.get(key)?.get(id)
    }

    pub fn table(&self, key: &str) -> Option<&IndexMap<String, Value>> {
        self.tables.get(key)
    }

    pub(crate) fn table_mut(&mut self, key: &str) -> &mut IndexMap<String, Value> {
        self.tables.entry(key.to_string()).or_default()
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert(&mut self, key: &str, id: impl Into<String>, record: Value) -> Option<Value> {
        self.table_mut(key).insert(id.into(), record)
    }

    pub fn tables(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Value>)> {
        self.tables.iter().map(|(key, table)| (key.as_str(), table))
    }

    /// Number of entity tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn to_value(&self) -> Value {
        let tables = self
            .tables
            .iter()
            .map(|(key, table)| {
                let records: Map<String, Value> = table
                    .iter()
                    .map(|(id, record)| (id.clone(), record.clone()))
                    .collect();
                (key.clone(), Value::Object(records))
            })
            .collect();

        Value::Object(tables)
    }
}

/// The table id for an entity id value: strings as-is, numbers in their
/// decimal form.
pub(crate) fn id_key(id: &Value) -> Option<String> {
    match id {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
