mod builder;
pub use builder::Builder;

mod entity;
pub use entity::{
    Callback, Entity, EntityId, EntityOptions, FallbackFn, IdAttribute, IdFn, MergeFn, ProcessFn,
};

mod shape;
pub use shape::{SchemaAttribute, SchemaAttributeFn, Shape, Union};

mod verify;

use indexmap::IndexMap;
use std::collections::HashSet;

/// A schema graph: an arena of entity schemas plus the shape normalization
/// starts from.
///
/// Relations between entities are [`Shape::Entity`] edges into the arena, so
/// a cyclic reference graph is a finite value.
#[derive(Debug, Clone)]
pub struct Schema {
    pub entities: IndexMap<EntityId, Entity>,

    pub root: Shape,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Get an entity by ID
    pub fn entity(&self, id: impl Into<EntityId>) -> &Entity {
        self.entities.get(&id.into()).expect("invalid entity ID")
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Find the entity stored under the table name `key`.
    pub fn entity_by_key(&self, key: &str) -> Option<&Entity> {
        self.entities().find(|entity| entity.key == key)
    }

    pub fn root(&self) -> &Shape {
        &self.root
    }
}

/// Two schemas are equal when their graphs have the same structure from the
/// root: same entity keys and options, same relation names and shapes.
/// Arena numbering and relation order are not significant.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        Equivalence {
            lhs: self,
            rhs: other,
            assumed: HashSet::new(),
        }
        .shapes(&self.root, &other.root)
    }
}

struct Equivalence<'a> {
    lhs: &'a Schema,
    rhs: &'a Schema,

    /// Entity pairs already under comparison. Revisiting a pair is assumed
    /// equal, which terminates cycles.
    assumed: HashSet<(EntityId, EntityId)>,
}

impl Equivalence<'_> {
    fn shapes(&mut self, lhs: &Shape, rhs: &Shape) -> bool {
        match (lhs, rhs) {
            (Shape::Entity(lhs), Shape::Entity(rhs)) => self.entities(*lhs, *rhs),
            (Shape::Array(lhs), Shape::Array(rhs)) => self.shapes(lhs, rhs),
            (Shape::Union(lhs), Shape::Union(rhs)) => {
                lhs.schema_attribute == rhs.schema_attribute
                    && self.relations(&lhs.branches, &rhs.branches)
            }
            _ => false,
        }
    }

    fn entities(&mut self, lhs: EntityId, rhs: EntityId) -> bool {
        if !self.assumed.insert((lhs, rhs)) {
            return true;
        }

        let (lhs_schema, rhs_schema) = (self.lhs, self.rhs);
        let (Some(lhs), Some(rhs)) = (lhs_schema.entities.get(&lhs), rhs_schema.entities.get(&rhs))
        else {
            return false;
        };

        lhs.key == rhs.key
            && lhs.options == rhs.options
            && self.relations(&lhs.relations, &rhs.relations)
    }

    fn relations(&mut self, lhs: &IndexMap<String, Shape>, rhs: &IndexMap<String, Shape>) -> bool {
        lhs.len() == rhs.len()
            && lhs.iter().all(|(name, lhs)| match rhs.get(name) {
                Some(rhs) => self.shapes(lhs, rhs),
                None => false,
            })
    }
}
