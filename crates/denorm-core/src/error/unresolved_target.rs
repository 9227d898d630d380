use super::Error;

/// Error when a reference is declared against a target type that has no
/// entity declaration yet.
#[derive(Debug)]
pub(super) struct UnresolvedTarget {
    owner: Box<str>,
    field: Box<str>,
    target: Box<str>,
}

impl std::error::Error for UnresolvedTarget {}

impl core::fmt::Display for UnresolvedTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "field `{}::{}` references `{}`, which is not declared as an entity; \
             targets must be declared before they are referenced",
            self.owner, self.field, self.target
        )
    }
}

impl Error {
    /// Creates an unresolved target error.
    ///
    /// Declaration order matters: the target of a reference must already be
    /// declared as an entity when the reference is declared.
    pub fn unresolved_target(
        owner: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnresolvedTarget(UnresolvedTarget {
            owner: owner.into().into(),
            field: field.into().into(),
            target: target.into().into(),
        }))
    }

    /// Returns `true` if this error is an unresolved target error.
    pub fn is_unresolved_target(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnresolvedTarget(_))
    }
}
