use super::{Schema, Shape};
use crate::{Error, Result};

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_shape("root", &self.schema.root)?;

        for entity in self.schema.entities() {
            for (field, shape) in &entity.relations {
                self.verify_shape(&format!("`{}.{}`", entity.key, field), shape)?;
            }
        }

        Ok(())
    }

    fn verify_shape(&self, location: &str, shape: &Shape) -> Result<()> {
        let mut ids = vec![];
        shape.entity_ids(&mut ids);

        for id in ids {
            if !self.schema.entities.contains_key(&id) {
                return Err(Error::invalid_schema(format!(
                    "{location} refers to {id:?}, which is not in the schema"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EntityId, Union};

    #[test]
    fn dangling_relation() {
        let mut builder = Schema::builder();
        let user = builder.entity("users");
        builder.define(user, "friend", EntityId(7));

        let err = builder.build(user).unwrap_err();
        assert!(err.is_invalid_schema());
        assert_eq!(
            err.to_string(),
            "invalid schema: `users.friend` refers to EntityId(7), which is not in the schema"
        );
    }

    #[test]
    fn dangling_union_branch_at_root() {
        let mut builder = Schema::builder();
        let user = builder.entity("users");
        let root = Union::new("type")
            .branch("user", user)
            .branch("group", EntityId(3));

        let err = builder.build(Shape::array(root)).unwrap_err();
        assert!(err.is_invalid_schema());
    }
}
