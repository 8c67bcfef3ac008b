//! Integration tests for the infrastructure components
//!
//! These tests verify the public surface of the `common` crate without a
//! running PostgreSQL instance: connection URL handling, health check
//! failure mapping and the shape of the infrastructure error taxonomy.

use common::database::{DatabaseConfig, health_check, init_pool};
use common::error::DatabaseError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::error::Error;
use std::time::Duration;

#[tokio::test]
async fn test_init_pool_rejects_malformed_url() {
    let config = DatabaseConfig {
        database_url: "not-a-database-url".to_string(),
        max_connections: 1,
        acquire_timeout_secs: 1,
    };

    let err = init_pool(&config).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Configuration(_)));
    assert!(err.to_string().contains("Invalid database URL"));
}

#[tokio::test]
async fn test_health_check_reports_unreachable_database() {
    // Port 1 is never a PostgreSQL server, so the lazy pool's first acquire
    // fails and the health check must surface that as a query error.
    let options: PgConnectOptions = "postgresql://postgres@localhost:1/videos"
        .parse()
        .expect("connection url should parse");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy_with(options);

    let result = health_check(&pool).await;
    assert!(matches!(result, Err(DatabaseError::Query(_))));
}

#[test]
fn test_database_error_source_chain() {
    let err = DatabaseError::Query(sqlx::Error::RowNotFound);
    assert!(err.to_string().starts_with("Database query error"));
    assert!(err.source().is_some());

    let err = DatabaseError::Connection(sqlx::Error::PoolTimedOut);
    assert!(err.to_string().starts_with("Database connection error"));
    assert!(err.source().is_some());

    let err = DatabaseError::Configuration("unsupported connection scheme".to_string());
    assert_eq!(
        err.to_string(),
        "Database configuration error: unsupported connection scheme"
    );
    assert!(err.source().is_none());
}
