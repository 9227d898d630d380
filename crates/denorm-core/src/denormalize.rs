use crate::{
    entities,
    schema::{Entity, EntityId, Shape, Union},
    Entities, Result, Schema,
};

use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Rebuild nested data from `input` (a normalized `result`) and the entity
/// tables produced by [`normalize`](crate::normalize).
///
/// Ids with no record in `entities` resolve through the entity's fallback
/// strategy, or to `null` when there is none. When the data itself is
/// cyclic, the inner occurrence of an entity that is still being expanded is
/// left as its id.
pub fn denormalize(input: &Value, schema: &Schema, entities: &Entities) -> Result<Value> {
    let _span = tracing::debug_span!("denormalize").entered();

    Denormalizer {
        schema,
        entities,
        cache: HashMap::new(),
        expanding: HashSet::new(),
    }
    .unvisit(input, &schema.root)
}

struct Denormalizer<'a> {
    schema: &'a Schema,
    entities: &'a Entities,

    /// Fully denormalized entities, by entity and table id
    cache: HashMap<(EntityId, String), Value>,

    /// Entities currently being expanded further up the stack
    expanding: HashSet<(EntityId, String)>,
}

impl Denormalizer<'_> {
    fn unvisit(&mut self, value: &Value, shape: &Shape) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        let schema = self.schema;
        match shape {
            Shape::Entity(id) => self.unvisit_entity(value, schema.entity(*id)),
            Shape::Array(item) => self.unvisit_array(value, item),
            Shape::Union(union) => self.unvisit_union(value, union),
        }
    }

    fn unvisit_entity(&mut self, value: &Value, entity: &Entity) -> Result<Value> {
        // Inline records are expanded as given and are not cached
        let (record, cache_key) = match value {
            Value::Object(_) => (Some(value.clone()), None),
            _ => match entities::id_key(value) {
                Some(table_id) => {
                    let cache_key = (entity.id, table_id);

                    if let Some(done) = self.cache.get(&cache_key) {
                        return Ok(done.clone());
                    }

                    if self.expanding.contains(&cache_key) {
                        tracing::trace!(entity = %entity.key, id = %cache_key.1, "cycle; keeping id");
                        return Ok(value.clone());
                    }

                    let record = self
                        .entities
                        .get(&entity.key, &cache_key.1)
                        .cloned()
                        .or_else(|| entity.fallback(value));
                    (record, Some(cache_key))
                }
                None => (entity.fallback(value), None),
            },
        };

        let mut record = match record {
            Some(Value::Object(record)) => record,
            other => return Ok(other.unwrap_or(Value::Null)),
        };

        if let Some(cache_key) = &cache_key {
            self.expanding.insert(cache_key.clone());
        }

        for (field, shape) in &entity.relations {
            let Some(nested) = record.get(field) else {
                continue;
            };

            let denormalized = self.unvisit(nested, shape)?;
            record.insert(field.clone(), denormalized);
        }

        let record = Value::Object(record);

        if let Some(cache_key) = cache_key {
            self.expanding.remove(&cache_key);
            self.cache.insert(cache_key, record.clone());
        }

        Ok(record)
    }

    fn unvisit_array(&mut self, value: &Value, item: &Shape) -> Result<Value> {
        let Value::Array(values) = value else {
            return Ok(value.clone());
        };

        values
            .iter()
            .map(|value| self.unvisit(value, item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn unvisit_union(&mut self, value: &Value, union: &Union) -> Result<Value> {
        let Some(attribute) = value.get("schema") else {
            return Ok(value.clone());
        };

        let Some(shape) = union.branch_for(attribute) else {
            tracing::warn!(schema = %attribute, "no union branch named by the value; leaving it as-is");
            return Ok(value.clone());
        };

        let target = match value.get("id") {
            Some(id) if !id.is_null() => id,
            _ => value,
        };

        self.unvisit(target, shape)
    }
}
