//! Store collaborator for users and tasks.
//!
//! Handlers only ever see the [`Store`] trait object. Two implementations
//! exist:
//!
//! - [`PgStore`] - `PostgreSQL` via `sqlx`, used by the server binary
//! - [`MemoryStore`] - in-process tables with the same semantics, used by the
//!   handler test suite
//!
//! # Tables
//!
//! - `users` - `id` primary key, `email` unique, `password` holds an `argon2` hash
//! - `tasks` - `id` primary key, `created_at` and `status` filled by column defaults
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p taskboard-cli -- migrate
//! ```

pub mod memory;
pub mod tasks;
pub mod users;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use taskboard_core::{NewTask, NewUser, Task, TaskId, User, UserId};

pub use memory::MemoryStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The store cannot serve requests right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Equality lookup on exactly one unique user field.
#[derive(Debug, Clone, Copy)]
pub enum UserKey<'a> {
    Id(&'a UserId),
    Email(&'a str),
}

impl UserKey<'_> {
    /// Column name the lookup filters on.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Email(_) => "email",
        }
    }

    /// Value the lookup compares against.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(id) => id.as_str(),
            Self::Email(email) => email,
        }
    }
}

impl fmt::Display for UserKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.field(), self.value())
    }
}

/// Queries over the `users` collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every user.
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError>;

    /// Users whose name contains `term`, ignoring case.
    async fn search_users_by_name(&self, term: &str) -> Result<Vec<User>, RepositoryError>;

    /// The first user matching `key`.
    async fn find_user(&self, key: UserKey<'_>) -> Result<Option<User>, RepositoryError>;

    /// Insert a user.
    ///
    /// Returns `RepositoryError::Conflict` if the store itself rejects a duplicate.
    async fn insert_user(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Delete a user, returning whether a row was removed.
    async fn delete_user(&self, id: &UserId) -> Result<bool, RepositoryError>;
}

/// Queries over the `tasks` collection.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Every task.
    async fn list_tasks(&self) -> Result<Vec<Task>, RepositoryError>;

    /// The task with `id`, if any.
    async fn find_task(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError>;

    /// Insert a task; the store assigns `created_at` and `status`.
    async fn insert_task(&self, task: &NewTask) -> Result<Task, RepositoryError>;

    /// Overwrite every column of an existing task.
    ///
    /// Returns `RepositoryError::NotFound` if the task vanished.
    async fn update_task(&self, task: &Task) -> Result<Task, RepositoryError>;
}

/// The full store collaborator handed to handlers.
#[async_trait]
pub trait Store: UserStore + TaskStore {
    /// Round-trip to the store without touching any collection.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// `PostgreSQL`-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map a unique violation to `Conflict`, naming the offending column.
pub(crate) fn map_unique_violation(entity: &str, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        let column = match db_err.constraint() {
            Some(c) if c.contains("email") => "email",
            _ => "id",
        };
        return RepositoryError::Conflict(format!("a {entity} with this {column} already exists"));
    }
    RepositoryError::Database(err)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
