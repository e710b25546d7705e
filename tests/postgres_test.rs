//! PostgreSQL integration test
//!
//! Runs against the database named by `DATABASE_URL` and returns early when
//! it is unset.

use repohaus::prelude::*;

#[model]
#[table(name = "repohaus_pg_articles")]
pub struct Article {
    #[primary_key]
    pub id: Option<i64>,
    pub title: String,
    pub published: bool,
    pub tags: Value,
    pub rating: Option<f64>,
}

#[tokio::test]
async fn test_postgres_round_trip() {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
        return;
    };

    let repohaus = RepoHaus::<Postgres>::connect(&DatabaseConfig::from_url(&url))
        .await
        .expect("Failed to connect");
    repohaus.health_check().await.unwrap();

    sqlx::query("DROP TABLE IF EXISTS repohaus_pg_articles")
        .execute(repohaus.pool())
        .await
        .unwrap();
    sqlx::query(
        "CREATE TABLE repohaus_pg_articles (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            published BOOLEAN NOT NULL,
            tags JSONB NOT NULL,
            rating DOUBLE PRECISION
        )",
    )
    .execute(repohaus.pool())
    .await
    .unwrap();

    let articles = repohaus.entity_repository::<Article>().unwrap();

    let first = articles
        .create(Article {
            id: None,
            title: "Hello".to_string(),
            published: false,
            tags: json!(["intro"]),
            rating: None,
        })
        .await
        .unwrap();
    let id = first.id.expect("generated id");

    let mut loaded = articles.load(&id).await.unwrap();
    assert_eq!(loaded.title, "Hello");
    assert_eq!(loaded.tags, json!(["intro"]));
    assert_eq!(loaded.rating, None);

    loaded.published = true;
    loaded.rating = Some(4.5);
    assert_eq!(articles.update_rows(&loaded).await.unwrap(), 1);

    let published = articles
        .list(&Filter::new().eq("published", true))
        .await
        .unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].rating, Some(4.5));

    assert!(articles.list(&Filter::new().is_null("rating")).await.unwrap().is_empty());

    assert!(articles.delete(&id).await.unwrap());
    assert!(articles.delete(&id).await.unwrap());
    assert!(articles.find(&id).await.unwrap().is_none());

    sqlx::query("DROP TABLE repohaus_pg_articles")
        .execute(repohaus.pool())
        .await
        .unwrap();
}
