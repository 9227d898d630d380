use super::Error;

/// Error when a field is declared as a reference more than once.
#[derive(Debug)]
pub(super) struct ConflictingReference {
    owner: Box<str>,
    field: Box<str>,
    existing: &'static str,
    requested: &'static str,
}

impl std::error::Error for ConflictingReference {}

impl core::fmt::Display for ConflictingReference {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "field `{}::{}` already carries a `{}` reference; cannot redeclare it as `{}`",
            self.owner, self.field, self.existing, self.requested
        )
    }
}

impl Error {
    /// Creates a conflicting reference error.
    ///
    /// `existing` and `requested` name the reference kinds (`"single"`,
    /// `"array"`, `"union"`).
    pub fn conflicting_reference(
        owner: impl Into<String>,
        field: impl Into<String>,
        existing: &'static str,
        requested: &'static str,
    ) -> Error {
        Error::from(super::ErrorKind::ConflictingReference(
            ConflictingReference {
                owner: owner.into().into(),
                field: field.into().into(),
                existing,
                requested,
            },
        ))
    }

    /// Returns `true` if this error is a conflicting reference error.
    pub fn is_conflicting_reference(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ConflictingReference(_))
    }
}
