use super::Error;

/// Error when the data handed to `normalize` is not an object or array.
#[derive(Debug)]
pub(super) struct InvalidInput {
    found: &'static str,
}

impl std::error::Error for InvalidInput {}

impl core::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unexpected input given to normalize: expected type to be \"object\", found \"{}\"",
            self.found
        )
    }
}

impl Error {
    /// Creates an invalid input error. `found` names the JSON type that was
    /// given instead.
    pub fn invalid_input(found: &'static str) -> Error {
        Error::from(super::ErrorKind::InvalidInput(InvalidInput { found }))
    }

    /// Returns `true` if this error is an invalid input error.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidInput(_))
    }
}
