use super::Error;

/// Error when an entity instance has no usable id.
#[derive(Debug)]
pub(super) struct MissingId {
    entity: Box<str>,
    attribute: Option<Box<str>>,
}

impl std::error::Error for MissingId {}

impl core::fmt::Display for MissingId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.attribute {
            Some(attribute) => write!(
                f,
                "`{}` entity is missing a string or number `{}` attribute",
                self.entity, attribute
            ),
            None => write!(
                f,
                "`{}` entity id function returned no string or number id",
                self.entity
            ),
        }
    }
}

impl Error {
    /// Creates a missing id error.
    ///
    /// `attribute` is the id attribute name, or `None` when the id comes from
    /// an id function.
    pub fn missing_id(entity: impl Into<String>, attribute: Option<&str>) -> Error {
        Error::from(super::ErrorKind::MissingId(MissingId {
            entity: entity.into().into(),
            attribute: attribute.map(Into::into),
        }))
    }

    /// Returns `true` if this error is a missing id error.
    pub fn is_missing_id(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingId(_))
    }
}
