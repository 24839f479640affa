//! In-process store with the same semantics as [`PgStore`](super::PgStore).
//!
//! Rows are kept in id order. Unique violations, column defaults and the
//! case-insensitive name search all mirror the `PostgreSQL` schema, so the
//! handler suite can run without a database. [`MemoryStore::set_unavailable`]
//! makes every call fail, standing in for an unreachable database.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use taskboard_core::{NewTask, NewUser, Task, TaskId, TaskStatus, User, UserId};

use super::{RepositoryError, Store, TaskStore, UserKey, UserStore};

/// Format of the `created_at` column default.
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Default)]
struct Tables {
    /// User plus stored password hash, keyed by id.
    users: BTreeMap<UserId, (User, String)>,
    tasks: BTreeMap<TaskId, Task>,
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `RepositoryError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Stored password hash for a user, if the user exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if the store is down.
    pub fn password_hash(&self, id: &UserId) -> Result<Option<String>, RepositoryError> {
        Ok(self.tables()?.users.get(id).map(|(_, hash)| hash.clone()))
    }

    /// Number of stored users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if the store is down.
    pub fn user_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.tables()?.users.len())
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "memory store switched off".to_owned(),
            ));
        }
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("memory store lock poisoned".to_owned()))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .tables()?
            .users
            .values()
            .map(|(user, _)| user.clone())
            .collect())
    }

    async fn search_users_by_name(&self, term: &str) -> Result<Vec<User>, RepositoryError> {
        let needle = term.to_lowercase();
        Ok(self
            .tables()?
            .users
            .values()
            .filter(|(user, _)| user.name.to_lowercase().contains(&needle))
            .map(|(user, _)| user.clone())
            .collect())
    }

    async fn find_user(&self, key: UserKey<'_>) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables()?;
        let found = match key {
            UserKey::Id(id) => tables.users.get(id).map(|(user, _)| user),
            UserKey::Email(email) => tables
                .users
                .values()
                .map(|(user, _)| user)
                .find(|user| user.email == email),
        };
        Ok(found.cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.tables()?;

        if tables.users.contains_key(&user.id) {
            return Err(RepositoryError::Conflict(
                "a user with this id already exists".to_owned(),
            ));
        }
        if tables.users.values().any(|(u, _)| u.email == user.email) {
            return Err(RepositoryError::Conflict(
                "a user with this email already exists".to_owned(),
            ));
        }

        let record = user.to_user();
        tables.users.insert(
            user.id.clone(),
            (record.clone(), user.password_hash.clone()),
        );
        Ok(record)
    }

    async fn delete_user(&self, id: &UserId) -> Result<bool, RepositoryError> {
        Ok(self.tables()?.users.remove(id).is_some())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        Ok(self.tables()?.tasks.values().cloned().collect())
    }

    async fn find_task(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError> {
        Ok(self.tables()?.tasks.get(id).cloned())
    }

    async fn insert_task(&self, task: &NewTask) -> Result<Task, RepositoryError> {
        let mut tables = self.tables()?;

        if tables.tasks.contains_key(&task.id) {
            return Err(RepositoryError::Conflict(
                "a task with this id already exists".to_owned(),
            ));
        }

        let record = Task {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            created_at: chrono::Utc::now().format(CREATED_AT_FORMAT).to_string(),
            status: TaskStatus::default(),
        };
        tables.tasks.insert(task.id.clone(), record.clone());
        Ok(record)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, RepositoryError> {
        let mut tables = self.tables()?;
        let slot = tables
            .tasks
            .get_mut(&task.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = task.clone();
        Ok(task.clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.tables().map(|_| ())
    }
}
