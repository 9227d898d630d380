#![allow(dead_code)]

use denorm::{EntityOptions, Registry};

pub struct User;
pub struct Group;
pub struct Comment;
pub struct Article;
pub struct Author;
pub struct Post;

/// Send engine logs to the test harness. Set `RUST_LOG=denorm_core=trace` to
/// see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Users, comments by users, and articles with an author and comments.
/// Articles are identified by their `key` field.
pub fn blog() -> anyhow::Result<Registry> {
    init_tracing();

    let mut registry = Registry::new();
    registry.entity::<User>("users")?;
    registry.entity::<Comment>("comments")?;
    registry.entity_with::<Article>("articles", EntityOptions::default().id_attribute("key"))?;

    registry.field::<Comment>("commenter").single::<User>()?;
    registry.field::<Article>("author").single::<User>()?;
    registry.field::<Article>("comments").array::<Comment>()?;

    Ok(registry)
}
