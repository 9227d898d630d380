use super::Error;

/// Error when a schema is built for a type that was never declared as an
/// entity.
#[derive(Debug)]
pub(super) struct UndeclaredEntity {
    type_name: Box<str>,
}

impl std::error::Error for UndeclaredEntity {}

impl core::fmt::Display for UndeclaredEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "type `{}` is not declared as an entity; did you forget to call `Registry::entity`?",
            self.type_name
        )
    }
}

impl Error {
    /// Creates an undeclared entity error.
    ///
    /// Raised when building a schema graph reaches a type (the root, or the
    /// target of a reference) that has no entity declaration.
    pub fn undeclared_entity(type_name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UndeclaredEntity(UndeclaredEntity {
            type_name: type_name.into().into(),
        }))
    }

    /// Returns `true` if this error is an undeclared entity error.
    pub fn is_undeclared_entity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UndeclaredEntity(_))
    }
}
