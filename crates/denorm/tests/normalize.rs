mod support;
use support::*;

use denorm::{schema::Shape, EntityOptions, Entities, Registry, Schema, Target};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn article_with_comments() -> anyhow::Result<()> {
    let registry = blog()?;

    let data = json!({
        "id": 123,
        "key": 456,
        "author": { "id": 1, "name": "Paul" },
        "title": "My awesome blog post",
        "comments": [
            { "id": 324, "commenter": { "id": 2, "name": "Nicole" } }
        ]
    });

    let normalized = registry.normalize(&data, Target::of::<Article>())?;

    assert_eq!(normalized.result, json!(456));
    assert_eq!(
        normalized.entities.to_value(),
        json!({
            "users": {
                "1": { "id": 1, "name": "Paul" },
                "2": { "id": 2, "name": "Nicole" }
            },
            "comments": {
                "324": { "id": 324, "commenter": 2 }
            },
            "articles": {
                "456": {
                    "id": 123,
                    "key": 456,
                    "author": 1,
                    "title": "My awesome blog post",
                    "comments": [324]
                }
            }
        })
    );

    let denormalized = registry.denormalize(
        &normalized.result,
        Target::of::<Article>(),
        &normalized.entities,
    )?;
    assert_eq!(denormalized, data);

    Ok(())
}

#[test]
fn list_of_articles() -> anyhow::Result<()> {
    let registry = blog()?;

    let data = json!([
        { "key": "a", "author": { "id": 1 }, "comments": [] },
        { "key": "b", "author": { "id": 1 }, "comments": [{ "id": 9, "commenter": { "id": 1 } }] }
    ]);

    let normalized = registry.normalize(&data, [Target::of::<Article>()])?;

    assert_eq!(normalized.result, json!(["a", "b"]));
    assert_eq!(normalized.entities.table("users").map(|t| t.len()), Some(1));
    assert_eq!(
        normalized.entities.get("comments", "9"),
        Some(&json!({ "id": 9, "commenter": 1 }))
    );

    let denormalized = registry.denormalize(
        &normalized.result,
        [Target::of::<Article>()],
        &normalized.entities,
    )?;
    assert_eq!(denormalized, data);

    Ok(())
}

#[test]
fn cyclic_data() -> anyhow::Result<()> {
    init_tracing();

    let mut registry = Registry::new();
    registry.entity::<Author>("authors")?;
    registry.entity::<Post>("posts")?;
    registry.field::<Author>("posts").array::<Post>()?;
    registry.field::<Post>("author").single::<Author>()?;

    let data = json!({ "id": 1, "posts": [{ "id": 10, "author": { "id": 1 } }] });
    let normalized = registry.normalize(&data, Target::of::<Author>())?;

    assert_eq!(
        normalized.entities.to_value(),
        json!({
            "authors": { "1": { "id": 1, "posts": [10] } },
            "posts": { "10": { "id": 10, "author": 1 } }
        })
    );

    let denormalized = registry.denormalize(
        &normalized.result,
        Target::of::<Author>(),
        &normalized.entities,
    )?;
    assert_eq!(
        denormalized,
        json!({ "id": 1, "posts": [{ "id": 10, "author": 1 }] })
    );

    Ok(())
}

#[test]
fn denormalize_from_stored_tables() -> anyhow::Result<()> {
    let registry = blog()?;

    let entities: Entities = serde_json::from_value(json!({
        "users": { "1": { "id": 1, "name": "Paul" } },
        "comments": { "5": { "id": 5, "commenter": 1 } }
    }))?;

    let denormalized = registry.denormalize(&json!([5, 6]), [Target::of::<Comment>()], &entities)?;
    assert_eq!(
        denormalized,
        json!([{ "id": 5, "commenter": { "id": 1, "name": "Paul" } }, null])
    );

    Ok(())
}

#[test]
fn scalar_input_is_rejected() -> anyhow::Result<()> {
    let registry = blog()?;

    let err = registry
        .normalize(&json!("article"), Target::of::<Article>())
        .unwrap_err();
    assert!(err.is_invalid_input());

    Ok(())
}

fn hand_built_blog() -> Schema {
    let mut builder = Schema::builder();
    let user = builder.entity("users");
    let comment = builder.entity("comments");
    let article = builder.entity_with("articles", EntityOptions::default().id_attribute("key"));
    builder.define(comment, "commenter", user);
    builder.define(article, "author", user);
    builder.define(article, "comments", Shape::array(comment));
    builder.build(Shape::array(article)).unwrap()
}

#[test]
fn same_output_as_hand_built_schema() -> anyhow::Result<()> {
    let registry = blog()?;
    let schema = hand_built_blog();

    let data = json!([
        {
            "id": 123,
            "key": 456,
            "author": { "id": 1, "name": "Paul" },
            "comments": [{ "id": 324, "commenter": { "id": 2, "name": "Nicole" } }]
        },
        { "key": 457, "author": { "id": 2 }, "comments": [{ "id": 325, "commenter": { "id": 1 } }] }
    ]);

    let declared = registry.normalize(&data, [Target::of::<Article>()])?;
    let expected = denorm::normalize(&data, &schema)?;
    assert_eq!(declared, expected);

    assert_eq!(
        registry.denormalize(&declared.result, [Target::of::<Article>()], &declared.entities)?,
        denorm::denormalize(&expected.result, &schema, &expected.entities)?
    );

    Ok(())
}

#[test]
fn object_values_under_array_root() -> anyhow::Result<()> {
    let registry = blog()?;

    let data = json!({
        "first": { "key": "x", "author": { "id": 1 } },
        "second": { "key": 5, "author": { "id": 1 } }
    });

    let normalized = registry.normalize(&data, [Target::of::<Article>()])?;

    assert_eq!(normalized.result, json!(["x", 5]));
    assert_eq!(
        normalized.entities.get("articles", "5"),
        Some(&json!({ "key": 5, "author": 1 }))
    );
    assert_eq!(normalized.entities.table("users").map(|t| t.len()), Some(1));

    Ok(())
}
