//! Basic Repohaus usage against an in-memory SQLite database
//!
//! Run with `RUST_LOG=debug cargo run --example basic_usage` to see the
//! repository events.

use repohaus::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[model]
#[table(name = "events")]
pub struct Event {
    #[primary_key]
    pub id: Option<i64>,
    pub title: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let repohaus = RepoHaus::<Sqlite>::connect(&DatabaseConfig::from_url("sqlite::memory:")).await?;
    sqlx::query(
        "CREATE TABLE events (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL, start_date TEXT NOT NULL)",
    )
    .execute(repohaus.pool())
    .await?;

    // The struct speaks camelCase, the table snake_case
    let options = RepositoryOptions::new()
        .serialize(RowMapper::rename(&[("startDate", "start_date")]))
        .deserialize(RowMapper::rename(&[("start_date", "startDate")]));
    let events = repohaus.repository_with::<Event>("events", options)?;

    let launch = events
        .create(Event {
            id: None,
            title: "Launch".to_string(),
            start_date: "2024-05-01".to_string(),
        })
        .await?;
    println!("Created {:?}", launch);

    let mut loaded = events.load(&launch.id.unwrap_or_default()).await?;
    loaded.start_date = "2024-06-01".to_string();
    events.update(&loaded).await?;

    let june = events
        .list(&Filter::new().eq("start_date", "2024-06-01"))
        .await?;
    println!("Events in June: {:?}", june);

    events.delete(&loaded.id.unwrap_or_default()).await?;
    println!("Remaining events: {}", events.count(&Filter::new()).await?);

    repohaus.close().await;
    Ok(())
}
