//! `users` queries for the `PostgreSQL` store.
//!
//! Runtime-checked `sqlx` queries mapped straight into the core `User` record.
//! The `password` column is written on insert and never selected.

use async_trait::async_trait;

use taskboard_core::{NewUser, User, UserId};

use super::{PgStore, RepositoryError, UserKey, UserStore, map_unique_violation};

/// Escape `LIKE` metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl UserStore for PgStore {
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(
            r"
            SELECT id, name, email
            FROM users
            ORDER BY id
            ",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(users)
    }

    async fn search_users_by_name(&self, term: &str) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(
            r"
            SELECT id, name, email
            FROM users
            WHERE name ILIKE '%' || $1 || '%' ESCAPE '\'
            ORDER BY id
            ",
        )
        .bind(escape_like(term))
        .fetch_all(self.pool())
        .await?;

        Ok(users)
    }

    async fn find_user(&self, key: UserKey<'_>) -> Result<Option<User>, RepositoryError> {
        let query = match key {
            UserKey::Id(_) => "SELECT id, name, email FROM users WHERE id = $1 LIMIT 1",
            UserKey::Email(_) => "SELECT id, name, email FROM users WHERE email = $1 LIMIT 1",
        };

        let user = sqlx::query_as::<_, User>(query)
            .bind(key.value())
            .fetch_optional(self.pool())
            .await?;

        Ok(user)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (id, name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email
            ",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_unique_violation("user", e))?;

        Ok(row)
    }

    async fn delete_user(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ana"), "ana");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
