use crate::{Registry, Root, Target};
use denorm_core::{
    schema::{self, EntityId, Shape, Union},
    Error, Result, Schema,
};

use std::collections::HashMap;

/// State for one schema build.
struct Define<'a> {
    registry: &'a Registry,

    /// Arena under construction
    builder: schema::Builder,

    /// Entities already allocated in this build. A type reached again maps
    /// to the same arena slot, which is what terminates reference cycles.
    resolved: HashMap<Target, EntityId>,
}

impl Registry {
    /// Build the schema graph for `root` from the registered declarations.
    ///
    /// Each call builds a fresh arena, so repeated calls return equal,
    /// independent schemas.
    pub fn define(&self, root: impl Into<Root>) -> Result<Schema> {
        let root = root.into();
        let _span = tracing::debug_span!("define", %root).entered();

        let mut define = Define {
            registry: self,
            builder: Schema::builder(),
            resolved: HashMap::new(),
        };

        let entity = define.entity(root.target())?;
        let shape = match root {
            Root::Entity(_) => Shape::Entity(entity),
            Root::Array(_) => Shape::array(entity),
        };

        define.builder.build(shape)
    }
}

impl Define<'_> {
    fn entity(&mut self, target: Target) -> Result<EntityId> {
        if let Some(id) = self.resolved.get(&target) {
            return Ok(*id);
        }

        let registry = self.registry;
        let Some(declaration) = registry.entities.get(&target) else {
            return Err(Error::undeclared_entity(target.name()));
        };

        // Record the stub before walking relations so that cycles back to
        // this entity resolve to it.
        let id = self
            .builder
            .entity_with(&declaration.key, declaration.options.clone());
        self.resolved.insert(target, id);

        tracing::debug!(entity = %declaration.key, ty = target.name(), ?id, "define entity");

        let Some(references) = registry.references.get(&target) else {
            return Ok(id);
        };

        for (field, target) in references.singles() {
            let related = self.entity(target)?;
            self.builder.define(id, field, related);
        }

        for (field, target) in references.arrays() {
            let related = self.entity(target)?;
            self.builder.define(id, field, Shape::array(related));
        }

        for (field, union) in references.unions() {
            let mut shape = Union::new(union.schema_attribute.clone());
            for (name, target) in &union.branches {
                shape = shape.branch(name.as_str(), self.entity(*target)?);
            }
            self.builder.define(id, field, shape);
        }

        Ok(id)
    }
}
