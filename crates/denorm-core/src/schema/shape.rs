use super::{Callback, EntityId};

use by_address::ByAddress;
use indexmap::IndexMap;
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Picks a union branch from `(value, parent, key)`.
pub type SchemaAttributeFn = dyn Fn(&Value, &Value, Option<&str>) -> Option<String> + Send + Sync;

/// A node in the schema graph.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A single instance of an entity in the arena.
    Entity(EntityId),

    /// Zero or more values of the inner shape.
    Array(Box<Shape>),

    /// One of several shapes, chosen per value by a discriminator.
    Union(Union),
}

#[derive(Debug, Clone)]
pub struct Union {
    /// Branch shapes keyed by discriminator value
    pub branches: IndexMap<String, Shape>,

    pub schema_attribute: SchemaAttribute,
}

#[derive(Clone, PartialEq)]
pub enum SchemaAttribute {
    /// Read the discriminator from the named field of each value.
    Field(String),

    Fn(Callback<SchemaAttributeFn>),
}

impl Shape {
    pub fn array(item: impl Into<Shape>) -> Self {
        Self::Array(Box::new(item.into()))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    #[track_caller]
    pub fn expect_entity(&self) -> EntityId {
        match self {
            Self::Entity(id) => *id,
            _ => panic!("expected entity shape, but was {self:?}"),
        }
    }

    #[track_caller]
    pub fn expect_array(&self) -> &Shape {
        match self {
            Self::Array(item) => item,
            _ => panic!("expected array shape, but was {self:?}"),
        }
    }

    #[track_caller]
    pub fn expect_union(&self) -> &Union {
        match self {
            Self::Union(union) => union,
            _ => panic!("expected union shape, but was {self:?}"),
        }
    }

    /// Every entity id this shape refers to directly, without following
    /// entity relations.
    pub(crate) fn entity_ids(&self, out: &mut Vec<EntityId>) {
        match self {
            Self::Entity(id) => out.push(*id),
            Self::Array(item) => item.entity_ids(out),
            Self::Union(union) => {
                for branch in union.branches.values() {
                    branch.entity_ids(out);
                }
            }
        }
    }
}

impl From<EntityId> for Shape {
    fn from(value: EntityId) -> Self {
        Self::Entity(value)
    }
}

impl From<Union> for Shape {
    fn from(value: Union) -> Self {
        Self::Union(value)
    }
}

impl Union {
    pub fn new(schema_attribute: impl Into<SchemaAttribute>) -> Self {
        Self {
            branches: IndexMap::new(),
            schema_attribute: schema_attribute.into(),
        }
    }

    pub fn branch(mut self, name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        self.branches.insert(name.into(), shape.into());
        self
    }

    /// Returns the discriminator of `value` as read, if present.
    pub fn discriminator(&self, value: &Value, parent: &Value, key: Option<&str>) -> Option<Value> {
        match &self.schema_attribute {
            SchemaAttribute::Field(name) => value.get(name).cloned(),
            SchemaAttribute::Fn(f) => f(value, parent, key).map(Value::String),
        }
    }

    /// The branch a discriminator selects. Numbers and booleans match the
    /// branch named by their string form.
    pub fn branch_for(&self, discriminator: &Value) -> Option<&Shape> {
        self.branches.get(&discriminator_str(discriminator)?)
    }
}

fn discriminator_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl SchemaAttribute {
    pub fn from_fn(
        f: impl Fn(&Value, &Value, Option<&str>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        let f: Arc<SchemaAttributeFn> = Arc::new(f);
        Self::Fn(ByAddress(f))
    }
}

impl From<&str> for SchemaAttribute {
    fn from(value: &str) -> Self {
        Self::Field(value.to_string())
    }
}

impl From<String> for SchemaAttribute {
    fn from(value: String) -> Self {
        Self::Field(value)
    }
}

impl fmt::Debug for SchemaAttribute {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => fmt.debug_tuple("Field").field(name).finish(),
            Self::Fn(_) => fmt.write_str("Fn(..)"),
        }
    }
}
