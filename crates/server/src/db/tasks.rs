//! `tasks` queries for the `PostgreSQL` store.

use async_trait::async_trait;

use taskboard_core::{NewTask, Task, TaskId};

use super::{PgStore, RepositoryError, TaskStore, map_unique_violation};

#[async_trait]
impl TaskStore for PgStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        let tasks = sqlx::query_as::<_, Task>(
            r"
            SELECT id, title, description, created_at, status
            FROM tasks
            ORDER BY id
            ",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(tasks)
    }

    async fn find_task(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError> {
        let task = sqlx::query_as::<_, Task>(
            r"
            SELECT id, title, description, created_at, status
            FROM tasks
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(task)
    }

    async fn insert_task(&self, task: &NewTask) -> Result<Task, RepositoryError> {
        let row = sqlx::query_as::<_, Task>(
            r"
            INSERT INTO tasks (id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, created_at, status
            ",
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.description)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_unique_violation("task", e))?;

        Ok(row)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, RepositoryError> {
        let row = sqlx::query_as::<_, Task>(
            r"
            UPDATE tasks
            SET title = $2, description = $3, created_at = $4, status = $5
            WHERE id = $1
            RETURNING id, title, description, created_at, status
            ",
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.created_at)
        .bind(task.status)
        .fetch_optional(self.pool())
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }
}
