use super::{Entity, EntityId, EntityOptions, Schema, Shape};
use crate::Result;

use indexmap::IndexMap;

/// Assembles a [`Schema`] arena by hand.
///
/// Entities are allocated first and linked afterwards, so cyclic graphs are
/// built the same way as acyclic ones:
///
/// ```
/// use denorm_core::schema::{Schema, Shape};
///
/// let mut builder = Schema::builder();
/// let user = builder.entity("users");
/// let comment = builder.entity("comments");
/// builder.define(comment, "commenter", user);
/// builder.define(user, "comments", Shape::array(comment));
///
/// let schema = builder.build(Shape::array(comment)).unwrap();
/// assert_eq!(schema.entities().count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    entities: IndexMap<EntityId, Entity>,
}

impl Builder {
    /// Allocate an entity with default options.
    pub fn entity(&mut self, key: impl Into<String>) -> EntityId {
        self.entity_with(key, EntityOptions::default())
    }

    /// Allocate an entity stub with no relations.
    pub fn entity_with(&mut self, key: impl Into<String>, options: EntityOptions) -> EntityId {
        let id = EntityId(self.entities.len());
        self.entities.insert(
            id,
            Entity {
                id,
                key: key.into(),
                options,
                relations: IndexMap::new(),
            },
        );
        id
    }

    /// Attach `shape` to `entity` under `field`, replacing any shape already
    /// attached there.
    ///
    /// # Panics
    ///
    /// Panics if `entity` was not allocated by this builder.
    #[track_caller]
    pub fn define(
        &mut self,
        entity: impl Into<EntityId>,
        field: impl Into<String>,
        shape: impl Into<Shape>,
    ) -> &mut Self {
        self.entities
            .get_mut(&entity.into())
            .expect("invalid entity ID")
            .relations
            .insert(field.into(), shape.into());
        self
    }

    /// Finish the arena with `root` as the entry shape.
    pub fn build(self, root: impl Into<Shape>) -> Result<Schema> {
        let schema = Schema {
            entities: self.entities,
            root: root.into(),
        };
        schema.verify()?;
        Ok(schema)
    }
}
