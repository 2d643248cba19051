//! PostgreSQL connection pool initialization.
//!
//! Reads `DATABASE_URL` and runs pending migrations on startup. The pool
//! is cheaply cloneable and is shared through [`crate::state::AppState`].

use sqlx::PgPool;
use std::env;

/// Initializes the connection pool and applies migrations.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset, the connection fails, or a
/// migration cannot be applied. All three are unrecoverable at startup.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    pool
}
