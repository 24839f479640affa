//! Per-handler field rules and the drafts they produce.
//!
//! Field order in each `from_object` is the order clients see errors in.

use crate::types::{NewTask, TaskId, UserId};

use super::{FieldRule, Object, ValidationError};

/// Rules for `POST /users`.
pub mod user_create {
    use super::FieldRule;

    pub const ID: FieldRule = FieldRule::text("id").min_len(4);
    pub const NAME: FieldRule = FieldRule::text("name").min_len(4);
    pub const EMAIL: FieldRule = FieldRule::text("email");
    pub const PASSWORD: FieldRule = FieldRule::password("password");
}

/// Rules for `POST /tasks`.
pub mod task_create {
    use super::FieldRule;

    pub const ID: FieldRule = FieldRule::text("id").min_len(4).prefix('t');
    pub const TITLE: FieldRule = FieldRule::text("title").min_len(1);
    pub const DESCRIPTION: FieldRule = FieldRule::text("description").min_len(1);
}

/// Rules for `PUT /tasks/{id}`. Every field is optional.
pub mod task_update {
    use super::FieldRule;

    // Stricter than on create.
    pub const TITLE: FieldRule = FieldRule::text("title").min_len(2);
    pub const DESCRIPTION: FieldRule = FieldRule::text("description");
    pub const CREATED_AT: FieldRule = FieldRule::text("created_at");
    pub const STATUS: FieldRule = FieldRule::integer("status");
}

/// A validated user creation request. The password is still in clear text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserDraft {
    /// Validate `id`, `name`, `email` and `password`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first field's `ValidationError`.
    pub fn from_object(body: &Object) -> Result<Self, ValidationError> {
        let id = user_create::ID.required_text(body)?;
        let name = user_create::NAME.required_text(body)?;
        let email = user_create::EMAIL.required_text(body)?;
        let password = user_create::PASSWORD.required_text(body)?;

        Ok(Self {
            id: UserId::new(id),
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        })
    }
}

/// Validate `id`, `title` and `description` of a task creation request.
///
/// # Errors
///
/// Returns the first field's `ValidationError`.
pub fn new_task_from_object(body: &Object) -> Result<NewTask, ValidationError> {
    let id = task_create::ID.required_text(body)?;
    let title = task_create::TITLE.required_text(body)?;
    let description = task_create::DESCRIPTION.required_text(body)?;

    Ok(NewTask {
        id: TaskId::new(id),
        title: title.to_owned(),
        description: description.to_owned(),
    })
}

/// Validate the `q` parameter of a user search.
///
/// # Errors
///
/// Returns `ValidationError::EmptySearchTerm` if `q` is missing or empty.
pub fn search_term(q: Option<&str>) -> Result<&str, ValidationError> {
    match q {
        Some(term) if !term.is_empty() => Ok(term),
        _ => Err(ValidationError::EmptySearchTerm),
    }
}
