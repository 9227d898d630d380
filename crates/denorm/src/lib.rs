//! Build normalization schema graphs from entity declarations on Rust types,
//! then normalize and denormalize nested JSON data with them.
//!
//! Types are declared on a [`Registry`]: each entity type gets a table key,
//! and fields that hold other entities are declared as single, array, or
//! union references. [`Registry::define`] walks those declarations into a
//! [`Schema`], resolving reference cycles, and [`Registry::normalize`] /
//! [`Registry::denormalize`] run the engine from `denorm-core` with it.

mod define;

mod reference;
pub use reference::{Reference, References, UnionRef};

mod registry;
pub use registry::{EntityDeclaration, FieldDeclarator, Registry};

mod target;
pub use target::{Root, Target};

pub use denorm_core::{
    bail, denormalize, err, normalize,
    schema::{self, EntityOptions, IdAttribute, SchemaAttribute, Shape},
    Entities, Error, Normalized, Result, Schema,
};
