//! Seed the database with demo data.
//!
//! Records are written as the HTTP handlers would write them: each one is
//! validated with the same field rules, passwords are hashed, and rows that
//! already exist are skipped, so the command can be run repeatedly.

use serde_json::{Value, json};
use thiserror::Error;

use taskboard_core::validate::{self, ValidationError, rules};
use taskboard_core::NewUser;
use taskboard_server::config::{ConfigError, ServerConfig};
use taskboard_server::db::{self, PgStore, RepositoryError, TaskStore, UserKey, UserStore};
use taskboard_server::error::ApiError;
use taskboard_server::services::password;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// A demo record broke a field rule.
    #[error("Invalid demo record: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] ApiError),
}

/// Counts reported after seeding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub tasks: usize,
    pub skipped: usize,
}

/// Demo users. Ids start with `f` so they can be removed through the API.
fn demo_users() -> Vec<Value> {
    vec![
        json!({ "id": "f001", "name": "Fulano de Tal", "email": "fulano@example.com", "password": "Fulano#2024" }),
        json!({ "id": "f002", "name": "Beltrana Souza", "email": "beltrana@example.com", "password": "Beltr@na99" }),
        json!({ "id": "f003", "name": "Ciclano Lima", "email": "ciclano@example.com", "password": "Cicl4no!ok" }),
    ]
}

fn demo_tasks() -> Vec<Value> {
    vec![
        json!({ "id": "t001", "title": "Set up the database", "description": "Run tb-cli migrate against a fresh instance" }),
        json!({ "id": "t002", "title": "Invite the team", "description": "Create an account for every team member" }),
        json!({ "id": "t003", "title": "Plan the sprint", "description": "Pick the tasks for the next two weeks" }),
    ]
}

/// Insert the demo users and tasks.
///
/// # Errors
///
/// Returns `SeedError` if configuration is missing, the database is
/// unreachable, or a write fails.
pub async fn run() -> Result<SeedSummary, SeedError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Connected to database");

    let store = PgStore::new(pool);
    let mut summary = SeedSummary::default();

    for record in demo_users() {
        let draft = rules::UserDraft::from_object(&validate::into_object(record)?)?;

        if store.find_user(UserKey::Id(&draft.id)).await?.is_some()
            || store.find_user(UserKey::Email(&draft.email)).await?.is_some()
        {
            tracing::info!(user_id = %draft.id, "User already present, skipping");
            summary.skipped += 1;
            continue;
        }

        let user = store
            .insert_user(&NewUser {
                password_hash: password::hash_password(&draft.password)?,
                id: draft.id,
                name: draft.name,
                email: draft.email,
            })
            .await?;
        tracing::info!(user_id = %user.id, "Seeded user");
        summary.users += 1;
    }

    for record in demo_tasks() {
        let new_task = rules::new_task_from_object(&validate::into_object(record)?)?;

        if store.find_task(&new_task.id).await?.is_some() {
            tracing::info!(task_id = %new_task.id, "Task already present, skipping");
            summary.skipped += 1;
            continue;
        }

        let task = store.insert_task(&new_task).await?;
        tracing::info!(task_id = %task.id, "Seeded task");
        summary.tasks += 1;
    }

    Ok(summary)
}
