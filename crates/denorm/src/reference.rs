use crate::Target;
use denorm_core::schema::SchemaAttribute;

use indexmap::IndexMap;

/// An edge declared on a field of an owning type.
#[derive(Debug, Clone)]
pub enum Reference {
    /// The field holds one instance of the target.
    Single(Target),

    /// The field holds zero or more instances of the target.
    Array(Target),

    /// The field holds an instance of one of several targets.
    Union(UnionRef),
}

/// Branches of a union reference, keyed by discriminator value.
///
/// ```
/// use denorm::UnionRef;
///
/// struct User;
/// struct Group;
///
/// let owner = UnionRef::on("type")
///     .branch::<User>("user")
///     .branch::<Group>("group");
/// assert_eq!(owner.branches.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct UnionRef {
    pub branches: IndexMap<String, Target>,

    /// Read from each value to pick its branch
    pub schema_attribute: SchemaAttribute,
}

/// Reference declarations of one owning type.
///
/// Field names are kept per kind, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct References {
    single: Vec<String>,
    array: Vec<String>,
    union: Vec<String>,

    by_field: IndexMap<String, Reference>,
}

impl Reference {
    /// Short name of the reference kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::Array(_) => "array",
            Self::Union(_) => "union",
        }
    }

    /// Every type the reference points at.
    pub fn targets(&self) -> Vec<Target> {
        match self {
            Self::Single(target) | Self::Array(target) => vec![*target],
            Self::Union(union) => union.branches.values().copied().collect(),
        }
    }
}

impl UnionRef {
    pub fn on(schema_attribute: impl Into<SchemaAttribute>) -> Self {
        Self {
            branches: IndexMap::new(),
            schema_attribute: schema_attribute.into(),
        }
    }

    pub fn branch<T: 'static>(mut self, name: impl Into<String>) -> Self {
        self.branches.insert(name.into(), Target::of::<T>());
        self
    }
}

impl References {
    pub fn get(&self, field: &str) -> Option<&Reference> {
        self.by_field.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    pub fn singles(&self) -> impl Iterator<Item = (&str, Target)> + '_ {
        self.single.iter().filter_map(|field| match self.get(field) {
            Some(Reference::Single(target)) => Some((field.as_str(), *target)),
            _ => None,
        })
    }

    pub fn arrays(&self) -> impl Iterator<Item = (&str, Target)> + '_ {
        self.array.iter().filter_map(|field| match self.get(field) {
            Some(Reference::Array(target)) => Some((field.as_str(), *target)),
            _ => None,
        })
    }

    pub fn unions(&self) -> impl Iterator<Item = (&str, &UnionRef)> + '_ {
        self.union.iter().filter_map(|field| match self.get(field) {
            Some(Reference::Union(union)) => Some((field.as_str(), union)),
            _ => None,
        })
    }

    pub(crate) fn insert(&mut self, field: String, reference: Reference) {
        match &reference {
            Reference::Single(_) => self.single.push(field.clone()),
            Reference::Array(_) => self.array.push(field.clone()),
            Reference::Union(_) => self.union.push(field.clone()),
        }
        self.by_field.insert(field, reference);
    }
}
