use crate::{Reference, References, Root, Target, UnionRef};
use denorm_core::{schema::EntityOptions, Entities, Error, Normalized, Result};

use indexmap::IndexMap;
use serde_json::Value;

/// Entity and reference declarations, keyed by Rust type.
///
/// Declarations are registered up front; [`define`](Registry::define)
/// then walks them to build a schema graph. Targets must be declared as
/// entities before a field can reference them.
///
/// ```
/// use denorm::{Registry, Target};
/// use serde_json::json;
///
/// struct User;
/// struct Comment;
///
/// let mut registry = Registry::new();
/// registry.entity::<User>("users").unwrap();
/// registry.entity::<Comment>("comments").unwrap();
/// registry.field::<Comment>("commenter").single::<User>().unwrap();
///
/// let data = json!({ "id": 1, "commenter": { "id": 7 } });
/// let normalized = registry.normalize(&data, Target::of::<Comment>()).unwrap();
/// assert_eq!(normalized.result, json!(1));
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    /// Entity declarations
    pub(crate) entities: IndexMap<Target, EntityDeclaration>,

    /// Reference declarations, by owning type. An owner does not need to be
    /// declared as an entity before its fields are.
    pub(crate) references: IndexMap<Target, References>,
}

/// Marks a type as a normalizable entity.
#[derive(Debug, Clone)]
pub struct EntityDeclaration {
    pub target: Target,

    /// Entity table name
    pub key: String,

    pub options: EntityOptions,
}

/// Declares a reference on one field of an owning type. Returned by
/// [`Registry::field`].
#[derive(Debug)]
pub struct FieldDeclarator<'a> {
    registry: &'a mut Registry,
    owner: Target,
    field: String,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `T` as an entity stored under `key`, with default options.
    pub fn entity<T: 'static>(&mut self, key: impl Into<String>) -> Result<()> {
        self.entity_with::<T>(key, EntityOptions::default())
    }

    pub fn entity_with<T: 'static>(
        &mut self,
        key: impl Into<String>,
        options: EntityOptions,
    ) -> Result<()> {
        let target = Target::of::<T>();

        if let Some(existing) = self.entities.get(&target) {
            return Err(Error::invalid_declaration(format!(
                "`{}` is already declared as entity `{}`",
                target, existing.key
            )));
        }

        let key = key.into();
        tracing::debug!(ty = target.name(), entity = %key, "declare entity");

        self.entities.insert(
            target,
            EntityDeclaration {
                target,
                key,
                options,
            },
        );

        Ok(())
    }

    /// Start declaring a reference on field `name` of `T`.
    pub fn field<T: 'static>(&mut self, name: impl Into<String>) -> FieldDeclarator<'_> {
        FieldDeclarator {
            registry: self,
            owner: Target::of::<T>(),
            field: name.into(),
        }
    }

    pub fn declaration<T: 'static>(&self) -> Option<&EntityDeclaration> {
        self.entities.get(&Target::of::<T>())
    }

    pub fn references<T: 'static>(&self) -> Option<&References> {
        self.references.get(&Target::of::<T>())
    }

    pub fn is_declared<T: 'static>(&self) -> bool {
        self.entities.contains_key(&Target::of::<T>())
    }

    /// Build the schema for `root` and normalize `data` with it.
    pub fn normalize(&self, data: &Value, root: impl Into<Root>) -> Result<Normalized> {
        let schema = self.define(root)?;
        denorm_core::normalize(data, &schema)
    }

    /// Build the schema for `root` and rebuild nested data from a normalized
    /// `input` and its entity tables.
    pub fn denormalize(
        &self,
        input: &Value,
        root: impl Into<Root>,
        entities: &Entities,
    ) -> Result<Value> {
        let schema = self.define(root)?;
        denorm_core::denormalize(input, &schema, entities)
    }
}

impl FieldDeclarator<'_> {
    /// The field holds one `T`.
    pub fn single<T: 'static>(self) -> Result<()> {
        self.declare(Reference::Single(Target::of::<T>()))
    }

    /// The field holds a sequence of `T`.
    pub fn array<T: 'static>(self) -> Result<()> {
        self.declare(Reference::Array(Target::of::<T>()))
    }

    /// The field holds one of the union's branch types.
    pub fn union(self, union: UnionRef) -> Result<()> {
        self.declare(Reference::Union(union))
    }

    fn declare(self, reference: Reference) -> Result<()> {
        let Self {
            registry,
            owner,
            field,
        } = self;

        if let Some(target) = reference
            .targets()
            .into_iter()
            .find(|target| !registry.entities.contains_key(target))
        {
            return Err(Error::unresolved_target(owner.name(), field, target.name()));
        }

        let references = registry.references.entry(owner).or_default();

        if let Some(existing) = references.get(&field) {
            return Err(Error::conflicting_reference(
                owner.name(),
                field,
                existing.kind(),
                reference.kind(),
            ));
        }

        tracing::debug!(
            ty = owner.name(),
            field = %field,
            kind = reference.kind(),
            "declare reference"
        );

        references.insert(field, reference);
        Ok(())
    }
}
