use std::{
    any::{self, TypeId},
    fmt,
    hash::{Hash, Hasher},
};

/// Identifies a declared Rust type.
#[derive(Clone, Copy)]
pub struct Target {
    id: TypeId,
    name: &'static str,
}

/// Where a schema build starts: one entity, or an array of it.
///
/// A one-element array of targets means "array of that entity":
///
/// ```
/// use denorm::{Root, Target};
///
/// struct Article;
///
/// let root: Root = [Target::of::<Article>()].into();
/// assert!(matches!(root, Root::Array(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    Entity(Target),
    Array(Target),
}

impl Target {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The type's path, as given by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Target {}

impl Hash for Target {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Target({})", self.name)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name)
    }
}

impl Root {
    pub fn target(&self) -> Target {
        match self {
            Self::Entity(target) | Self::Array(target) => *target,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl From<Target> for Root {
    fn from(value: Target) -> Self {
        Self::Entity(value)
    }
}

impl From<[Target; 1]> for Root {
    fn from([value]: [Target; 1]) -> Self {
        Self::Array(value)
    }
}

impl fmt::Display for Root {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(target) => write!(fmt, "{target}"),
            Self::Array(target) => write!(fmt, "[{target}]"),
        }
    }
}
