use super::Shape;
use crate::{Error, Result};

use by_address::ByAddress;
use indexmap::IndexMap;
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Computes an entity id from `(value, parent, key)`.
pub type IdFn = dyn Fn(&Value, &Value, Option<&str>) -> Option<Value> + Send + Sync;

/// Combines an already stored record with a newly normalized one.
pub type MergeFn = dyn Fn(Value, Value) -> Result<Value> + Send + Sync;

/// Prepares an input value before its relations are normalized.
pub type ProcessFn = dyn Fn(&Value, &Value, Option<&str>) -> Result<Value> + Send + Sync;

/// Supplies a record for an id that has no entry in the entity table.
pub type FallbackFn = dyn Fn(&Value, &Entity) -> Option<Value> + Send + Sync;

/// User callbacks compare by address.
pub type Callback<F> = ByAddress<Arc<F>>;

/// One normalizable entity type in a [`Schema`](super::Schema) arena.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Uniquely identifies the entity within the schema
    pub id: EntityId,

    /// Name of the entity table, e.g. `users`
    pub key: String,

    pub options: EntityOptions,

    /// Nested shapes keyed by field name
    pub relations: IndexMap<String, Shape>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

#[derive(Clone, Default, PartialEq)]
pub struct EntityOptions {
    /// How the id of an instance is found. Defaults to the `id` field.
    pub id_attribute: IdAttribute,

    /// Defaults to a shallow merge where the incoming record wins.
    pub merge_strategy: Option<Callback<MergeFn>>,

    /// Defaults to a shallow copy of the input.
    pub process_strategy: Option<Callback<ProcessFn>>,

    /// Consulted by denormalize when an id is missing from the entity table.
    pub fallback_strategy: Option<Callback<FallbackFn>>,
}

#[derive(Clone, PartialEq)]
pub enum IdAttribute {
    /// Read the id from the named field of the instance.
    Field(String),

    /// Compute the id from the instance, its parent and the parent's key.
    Fn(Callback<IdFn>),
}

impl Entity {
    /// Returns the id of `value`, a string or a number.
    pub fn id_of(&self, value: &Value, parent: &Value, key: Option<&str>) -> Result<Value> {
        let (id, attribute) = match &self.options.id_attribute {
            IdAttribute::Field(name) => (value.get(name).cloned(), Some(name.as_str())),
            IdAttribute::Fn(f) => (f(value, parent, key), None),
        };

        match id {
            Some(id @ (Value::String(_) | Value::Number(_))) => Ok(id),
            _ => Err(Error::missing_id(&self.key, attribute)),
        }
    }

    pub(crate) fn process(&self, value: &Value, parent: &Value, key: Option<&str>) -> Result<Value> {
        match &self.options.process_strategy {
            Some(process) => process(value, parent, key),
            None => Ok(value.clone()),
        }
    }

    pub(crate) fn merge(&self, existing: Value, incoming: Value) -> Result<Value> {
        match &self.options.merge_strategy {
            Some(merge) => merge(existing, incoming),
            None => Ok(shallow_merge(existing, incoming)),
        }
    }

    pub(crate) fn fallback(&self, id: &Value) -> Option<Value> {
        self.options
            .fallback_strategy
            .as_ref()
            .and_then(|fallback| fallback(id, self))
    }
}

fn shallow_merge(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(mut existing), Value::Object(incoming)) => {
            existing.extend(incoming);
            Value::Object(existing)
        }
        (_, incoming) => incoming,
    }
}

impl EntityOptions {
    /// Read ids from the named field instead of `id`.
    pub fn id_attribute(mut self, name: impl Into<String>) -> Self {
        self.id_attribute = IdAttribute::Field(name.into());
        self
    }

    pub fn id_fn(
        mut self,
        f: impl Fn(&Value, &Value, Option<&str>) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        let f: Arc<IdFn> = Arc::new(f);
        self.id_attribute = IdAttribute::Fn(ByAddress(f));
        self
    }

    pub fn merge_strategy(
        mut self,
        f: impl Fn(Value, Value) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        let f: Arc<MergeFn> = Arc::new(f);
        self.merge_strategy = Some(ByAddress(f));
        self
    }

    pub fn process_strategy(
        mut self,
        f: impl Fn(&Value, &Value, Option<&str>) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        let f: Arc<ProcessFn> = Arc::new(f);
        self.process_strategy = Some(ByAddress(f));
        self
    }

    pub fn fallback_strategy(
        mut self,
        f: impl Fn(&Value, &Entity) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        let f: Arc<FallbackFn> = Arc::new(f);
        self.fallback_strategy = Some(ByAddress(f));
        self
    }
}

impl Default for IdAttribute {
    fn default() -> Self {
        Self::Field("id".to_string())
    }
}

impl From<&str> for IdAttribute {
    fn from(value: &str) -> Self {
        Self::Field(value.to_string())
    }
}

impl fmt::Debug for IdAttribute {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => fmt.debug_tuple("Field").field(name).finish(),
            Self::Fn(_) => fmt.write_str("Fn(..)"),
        }
    }
}

impl fmt::Debug for EntityOptions {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("EntityOptions")
            .field("id_attribute", &self.id_attribute)
            .field("merge_strategy", &self.merge_strategy.is_some())
            .field("process_strategy", &self.process_strategy.is_some())
            .field("fallback_strategy", &self.fallback_strategy.is_some())
            .finish()
    }
}

impl From<&Entity> for EntityId {
    fn from(value: &Entity) -> Self {
        value.id
    }
}

impl From<&Self> for EntityId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EntityId({})", self.0)
    }
}
