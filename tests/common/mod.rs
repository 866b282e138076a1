#![allow(dead_code)]

use rest_scaffold::{connect, PoolSettings};
use sqlx::AnyPool;

/// Statements of a SQL script, with `--` comment lines removed before splitting on `;`.
pub fn sql_statements(script: &str) -> Vec<String> {
    let code: String = script
        .lines()
        .filter(|l| !l.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");
    code.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Fresh in-memory SQLite with the sample schema. One connection, never recycled, so the
/// database lives as long as the pool.
pub async fn test_pool() -> AnyPool {
    let settings = PoolSettings {
        max_connections: 1,
        min_connections: 1,
        idle_timeout: None,
        max_lifetime: None,
        ..PoolSettings::default()
    };
    let pool = connect("sqlite::memory:", &settings).await.unwrap();
    for stmt in sql_statements(include_str!("../../schema.sql")) {
        sqlx::query(&stmt).execute(&pool).await.unwrap();
    }
    pool
}
