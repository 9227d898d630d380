#[macro_use]
mod error;
pub use error::{Error, IntoError};

mod denormalize;
pub use denormalize::denormalize;

mod entities;
pub use entities::{Entities, Normalized};

mod normalize;
pub use normalize::normalize;

pub mod schema;
pub use schema::Schema;

/// A Result type alias that uses denorm's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
