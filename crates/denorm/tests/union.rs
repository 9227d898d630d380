mod support;
use support::*;

use denorm::{Registry, SchemaAttribute, Target, UnionRef};
use pretty_assertions::assert_eq;
use serde_json::json;

fn registry(schema_attribute: impl Into<SchemaAttribute>) -> anyhow::Result<Registry> {
    init_tracing();

    let mut registry = Registry::new();
    registry.entity::<User>("users")?;
    registry.entity::<Group>("groups")?;
    registry.entity::<Post>("posts")?;
    registry.field::<Post>("owner").union(
        UnionRef::on(schema_attribute)
            .branch::<User>("user")
            .branch::<Group>("group"),
    )?;

    Ok(registry)
}

#[test]
fn owners_of_both_kinds() -> anyhow::Result<()> {
    let registry = registry("type")?;

    let data = json!([
        { "id": 1, "owner": { "id": 1, "type": "user", "name": "Ada" } },
        { "id": 2, "owner": { "id": 1, "type": "group", "title": "Admins" } }
    ]);

    let normalized = registry.normalize(&data, [Target::of::<Post>()])?;

    assert_eq!(
        normalized.entities.to_value(),
        json!({
            "users": { "1": { "id": 1, "type": "user", "name": "Ada" } },
            "groups": { "1": { "id": 1, "type": "group", "title": "Admins" } },
            "posts": {
                "1": { "id": 1, "owner": { "id": 1, "schema": "user" } },
                "2": { "id": 2, "owner": { "id": 1, "schema": "group" } }
            }
        })
    );

    let denormalized =
        registry.denormalize(&normalized.result, [Target::of::<Post>()], &normalized.entities)?;
    assert_eq!(denormalized, data);

    Ok(())
}

#[test]
fn branch_chosen_by_function() -> anyhow::Result<()> {
    let registry = registry(SchemaAttribute::from_fn(|value, _, _| {
        let branch = if value.get("title").is_some() { "group" } else { "user" };
        Some(branch.to_string())
    }))?;

    let data = json!({ "id": 3, "owner": { "id": 8, "title": "Editors" } });
    let normalized = registry.normalize(&data, Target::of::<Post>())?;

    assert_eq!(
        normalized.entities.get("posts", "3"),
        Some(&json!({ "id": 3, "owner": { "id": 8, "schema": "group" } }))
    );
    assert_eq!(
        normalized.entities.get("groups", "8"),
        Some(&json!({ "id": 8, "title": "Editors" }))
    );

    Ok(())
}

#[test]
fn schema_graph() -> anyhow::Result<()> {
    let registry = registry("type")?;

    let schema = registry.define(Target::of::<Post>())?;
    let post = schema.entity(schema.root.expect_entity());
    let owner = post.relations["owner"].expect_union();

    assert_eq!(owner.schema_attribute, SchemaAttribute::from("type"));
    let branches: Vec<_> = owner
        .branches
        .iter()
        .map(|(name, shape)| (name.as_str(), schema.entity(shape.expect_entity()).key.as_str()))
        .collect();
    assert_eq!(branches, [("user", "users"), ("group", "groups")]);

    Ok(())
}
