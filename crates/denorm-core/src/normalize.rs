use crate::{
    entities,
    schema::{Entity, Shape, Union},
    Entities, Error, Normalized, Result, Schema,
};

use serde_json::{json, Value};

/// Flatten `data` into per-entity tables according to `schema`.
///
/// Every entity found in `data` is replaced by its id in `result` and stored
/// in `entities` under its entity key. Records reached more than once are
/// combined with the entity's merge strategy.
pub fn normalize(data: &Value, schema: &Schema) -> Result<Normalized> {
    match data {
        Value::Object(_) | Value::Array(_) => {}
        other => return Err(Error::invalid_input(json_type(other))),
    }

    let _span = tracing::debug_span!("normalize").entered();

    let mut normalizer = Normalizer {
        schema,
        entities: Entities::new(),
    };
    let result = normalizer.visit(data, data, None, &schema.root)?;

    tracing::debug!(tables = normalizer.entities.len(), "normalized");

    Ok(Normalized {
        entities: normalizer.entities,
        result,
    })
}

struct Normalizer<'a> {
    schema: &'a Schema,
    entities: Entities,
}

impl Normalizer<'_> {
    fn visit(
        &mut self,
        value: &Value,
        parent: &Value,
        key: Option<&str>,
        shape: &Shape,
    ) -> Result<Value> {
        // Scalars and nulls are already in normalized form
        if !value.is_object() && !value.is_array() {
            return Ok(value.clone());
        }

        let schema = self.schema;
        match shape {
            Shape::Entity(id) => self.visit_entity(value, parent, key, schema.entity(*id)),
            Shape::Array(item) => self.visit_array(value, parent, key, item),
            Shape::Union(union) => self.visit_union(value, parent, key, union),
        }
    }

    fn visit_entity(
        &mut self,
        value: &Value,
        parent: &Value,
        key: Option<&str>,
        entity: &Entity,
    ) -> Result<Value> {
        let id = entity.id_of(value, parent, key)?;
        let mut processed = entity.process(value, parent, key)?;

        for (field, shape) in &entity.relations {
            let nested = match processed.get(field) {
                Some(nested @ (Value::Object(_) | Value::Array(_))) => nested.clone(),
                _ => continue,
            };

            let normalized = self.visit(&nested, &processed, Some(field), shape)?;

            if let Some(slot) = processed.get_mut(field) {
                *slot = normalized;
            }
        }

        self.add_entity(entity, &id, processed)?;
        Ok(id)
    }

    fn add_entity(&mut self, entity: &Entity, id: &Value, record: Value) -> Result<()> {
        let Some(id) = entities::id_key(id) else {
            return Err(Error::missing_id(&entity.key, None));
        };

        tracing::trace!(entity = %entity.key, %id, "add entity");

        let table = self.entities.table_mut(&entity.key);
        match table.get_mut(&id) {
            Some(existing) => {
                let merged = entity.merge(std::mem::take(existing), record)?;
                *existing = merged;
            }
            None => {
                table.insert(id, record);
            }
        }

        Ok(())
    }

    fn visit_array(
        &mut self,
        value: &Value,
        parent: &Value,
        key: Option<&str>,
        item: &Shape,
    ) -> Result<Value> {
        let values: Vec<&Value> = match value {
            Value::Array(values) => values.iter().collect(),
            Value::Object(map) => map.values().collect(),
            other => return Ok(other.clone()),
        };

        let mut normalized = Vec::with_capacity(values.len());
        for value in values {
            let value = self.visit(value, parent, key, item)?;
            if !value.is_null() {
                normalized.push(value);
            }
        }

        Ok(Value::Array(normalized))
    }

    fn visit_union(
        &mut self,
        value: &Value,
        parent: &Value,
        key: Option<&str>,
        union: &Union,
    ) -> Result<Value> {
        let branch = union
            .discriminator(value, parent, key)
            .and_then(|attribute| Some((union.branch_for(&attribute)?, attribute)));

        let Some((shape, attribute)) = branch else {
            tracing::warn!(
                key = key.unwrap_or_default(),
                schema_attribute = ?union.schema_attribute,
                "no union branch matches the value; leaving it as-is"
            );
            return Ok(value.clone());
        };

        let id = self.visit(value, parent, key, shape)?;
        if id.is_null() {
            return Ok(id);
        }

        Ok(json!({ "id": id, "schema": attribute }))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
