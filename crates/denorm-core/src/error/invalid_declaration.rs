use super::Error;

/// Error when a declaration is rejected by the registry, e.g. a type is
/// declared as an entity twice.
#[derive(Debug)]
pub(super) struct InvalidDeclaration {
    message: Box<str>,
}

impl std::error::Error for InvalidDeclaration {}

impl core::fmt::Display for InvalidDeclaration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid declaration: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid declaration error.
    pub fn invalid_declaration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidDeclaration(InvalidDeclaration {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid declaration error.
    pub fn is_invalid_declaration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidDeclaration(_))
    }
}
