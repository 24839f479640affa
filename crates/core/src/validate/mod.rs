//! Field validators.
//!
//! Pure checks over raw JSON request fields: type, minimum length, first
//! character and the password composition policy. Nothing here touches the
//! store. Handlers evaluate their fields one statement at a time, so the
//! first failing field short-circuits everything after it.

mod password;
pub mod rules;

use serde_json::{Map, Value};
use thiserror::Error;

pub use password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, validate_password};

/// A JSON request body.
pub type Object = Map<String, Value>;

/// Reasons a field (or a whole request) fails validation.
///
/// Every variant renders as one sentence suitable for a client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field is missing or holds the wrong JSON type.
    #[error("'{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// The string is shorter than allowed.
    #[error("'{field}' {}", length_rule(.min))]
    TooShort { field: &'static str, min: usize },

    /// The string does not begin with the required character.
    #[error("'{field}' must start with '{prefix}'")]
    MissingPrefix { field: &'static str, prefix: char },

    /// The password breaks the composition policy.
    #[error(
        "'password' must be {MIN_PASSWORD_LENGTH} to {MAX_PASSWORD_LENGTH} characters long and contain at least one lowercase letter, one uppercase letter, one digit and one special character"
    )]
    WeakPassword,

    /// The request body is not a JSON object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// The body could not be parsed as JSON at all.
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(String),

    /// A search was requested without a term.
    #[error("the search term 'q' must not be empty")]
    EmptySearchTerm,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn length_rule(min: &usize) -> String {
    match *min {
        1 => "must not be empty".to_owned(),
        n => format!("must be at least {n} characters long"),
    }
}

/// The JSON type a field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any JSON string.
    Text,
    /// A JSON string that also satisfies [`validate_password`].
    Password,
    /// A JSON number holding a whole value that fits in `i32`.
    Integer,
}

impl FieldKind {
    const fn expected(self) -> &'static str {
        match self {
            Self::Text | Self::Password => "a string",
            Self::Integer => "an integer",
        }
    }
}

/// Declarative constraints for a single request field.
///
/// Rules are `const`-constructible so each handler's field list reads as a
/// table:
///
/// ```
/// use taskboard_core::validate::FieldRule;
///
/// const TASK_ID: FieldRule = FieldRule::text("id").min_len(4).prefix('t');
///
/// let body = serde_json::json!({ "id": "t001" });
/// let body = body.as_object().expect("object literal");
/// assert_eq!(TASK_ID.required_text(body), Ok("t001"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: FieldKind,
    pub min_len: Option<usize>,
    pub prefix: Option<char>,
}

impl FieldRule {
    /// A string field with no further constraints.
    #[must_use]
    pub const fn text(field: &'static str) -> Self {
        Self {
            field,
            kind: FieldKind::Text,
            min_len: None,
            prefix: None,
        }
    }

    /// A string field checked against the password policy.
    #[must_use]
    pub const fn password(field: &'static str) -> Self {
        Self {
            kind: FieldKind::Password,
            ..Self::text(field)
        }
    }

    /// A whole-number field.
    #[must_use]
    pub const fn integer(field: &'static str) -> Self {
        Self {
            kind: FieldKind::Integer,
            ..Self::text(field)
        }
    }

    /// Require at least `min` characters.
    #[must_use]
    pub const fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    /// Require the first character to equal `prefix`.
    #[must_use]
    pub const fn prefix(mut self, prefix: char) -> Self {
        self.prefix = Some(prefix);
        self
    }

    const fn wrong_type(&self) -> ValidationError {
        ValidationError::WrongType {
            field: self.field,
            expected: self.kind.expected(),
        }
    }

    /// Check a raw value against this rule. An absent value fails the type check.
    ///
    /// # Errors
    ///
    /// Returns the first constraint the value breaks, checked in the order
    /// type, length, prefix, password policy.
    pub fn check(&self, value: Option<&Value>) -> Result<(), ValidationError> {
        match self.kind {
            FieldKind::Integer => {
                as_i32(value).ok_or_else(|| self.wrong_type())?;
                Ok(())
            }
            FieldKind::Text | FieldKind::Password => {
                let s = value
                    .and_then(Value::as_str)
                    .ok_or_else(|| self.wrong_type())?;

                if let Some(min) = self.min_len
                    && s.chars().count() < min
                {
                    return Err(ValidationError::TooShort {
                        field: self.field,
                        min,
                    });
                }

                if let Some(prefix) = self.prefix
                    && s.chars().next() != Some(prefix)
                {
                    return Err(ValidationError::MissingPrefix {
                        field: self.field,
                        prefix,
                    });
                }

                if self.kind == FieldKind::Password {
                    validate_password(s)?;
                }

                Ok(())
            }
        }
    }

    /// Validate a required string field of `body` and return it.
    ///
    /// # Errors
    ///
    /// See [`FieldRule::check`].
    pub fn required_text<'a>(&self, body: &'a Object) -> Result<&'a str, ValidationError> {
        let value = body.get(self.field);
        self.check(value)?;
        value.and_then(Value::as_str).ok_or_else(|| self.wrong_type())
    }

    /// Validate an optional string field; absent or `null` yields `None`.
    ///
    /// # Errors
    ///
    /// See [`FieldRule::check`].
    pub fn optional_text<'a>(&self, body: &'a Object) -> Result<Option<&'a str>, ValidationError> {
        match supplied(body, self.field) {
            None => Ok(None),
            Some(_) => self.required_text(body).map(Some),
        }
    }

    /// Validate an optional integer field; absent or `null` yields `None`.
    ///
    /// # Errors
    ///
    /// See [`FieldRule::check`].
    pub fn optional_integer(&self, body: &Object) -> Result<Option<i32>, ValidationError> {
        match supplied(body, self.field) {
            None => Ok(None),
            Some(value) => {
                self.check(Some(value))?;
                as_i32(Some(value)).map(Some).ok_or_else(|| self.wrong_type())
            }
        }
    }
}

/// Returns the field's value unless it is absent or JSON `null`.
fn supplied<'a>(body: &'a Object, field: &str) -> Option<&'a Value> {
    body.get(field).filter(|v| !v.is_null())
}

fn as_i32(value: Option<&Value>) -> Option<i32> {
    let value = value?;
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }
    // Accept `1.0` the way a JSON client would mean it, but not `1.5`.
    let f = value.as_f64()?;
    #[allow(clippy::cast_possible_truncation)] // range and fraction are checked first
    let truncated = f as i32;
    (f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX)).then_some(truncated)
}

/// Interpret a parsed request body as a JSON object.
///
/// # Errors
///
/// Returns `ValidationError::NotAnObject` for arrays, scalars and `null`.
pub fn into_object(body: Value) -> Result<Object, ValidationError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::NotAnObject),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(v: Value) -> Object {
        into_object(v).unwrap()
    }

    #[test]
    fn test_text_rejects_missing_and_non_strings() {
        let rule = FieldRule::text("name");
        assert!(matches!(
            rule.required_text(&obj(json!({}))),
            Err(ValidationError::WrongType { field: "name", .. })
        ));
        assert!(matches!(
            rule.required_text(&obj(json!({ "name": 42 }))),
            Err(ValidationError::WrongType { .. })
        ));
        assert!(matches!(
            rule.required_text(&obj(json!({ "name": null }))),
            Err(ValidationError::WrongType { .. })
        ));
    }

    #[test]
    fn test_min_len_counts_characters() {
        let rule = FieldRule::text("name").min_len(4);
        assert_eq!(
            rule.required_text(&obj(json!({ "name": "abc" }))),
            Err(ValidationError::TooShort {
                field: "name",
                min: 4
            })
        );
        // Four characters, eight bytes.
        assert_eq!(rule.required_text(&obj(json!({ "name": "éééé" }))), Ok("éééé"));
    }

    #[test]
    fn test_length_checked_before_prefix() {
        let rule = FieldRule::text("id").min_len(4).prefix('t');
        assert!(matches!(
            rule.required_text(&obj(json!({ "id": "ab" }))),
            Err(ValidationError::TooShort { .. })
        ));
        assert_eq!(
            rule.required_text(&obj(json!({ "id": "abc1" }))),
            Err(ValidationError::MissingPrefix {
                field: "id",
                prefix: 't'
            })
        );
    }

    #[test]
    fn test_password_rule_applies_policy() {
        let rule = FieldRule::password("password");
        assert_eq!(
            rule.required_text(&obj(json!({ "password": "Abcdefg1!" }))),
            Ok("Abcdefg1!")
        );
        assert_eq!(
            rule.required_text(&obj(json!({ "password": "abcdefgh" }))),
            Err(ValidationError::WeakPassword)
        );
    }

    #[test]
    fn test_optional_fields_absent_or_null() {
        let rule = FieldRule::text("title").min_len(2);
        assert_eq!(rule.optional_text(&obj(json!({}))), Ok(None));
        assert_eq!(rule.optional_text(&obj(json!({ "title": null }))), Ok(None));
        assert!(rule.optional_text(&obj(json!({ "title": "x" }))).is_err());
    }

    #[test]
    fn test_optional_integer() {
        let rule = FieldRule::integer("status");
        assert_eq!(rule.optional_integer(&obj(json!({}))), Ok(None));
        assert_eq!(rule.optional_integer(&obj(json!({ "status": 0 }))), Ok(Some(0)));
        assert_eq!(rule.optional_integer(&obj(json!({ "status": 1.0 }))), Ok(Some(1)));
        assert!(rule.optional_integer(&obj(json!({ "status": 1.5 }))).is_err());
        assert!(rule.optional_integer(&obj(json!({ "status": "1" }))).is_err());
        assert!(
            rule.optional_integer(&obj(json!({ "status": 9_999_999_999_i64 })))
                .is_err()
        );
    }

    #[test]
    fn test_into_object_rejects_non_objects() {
        assert_eq!(into_object(json!([1, 2])), Err(ValidationError::NotAnObject));
        assert_eq!(into_object(json!("x")), Err(ValidationError::NotAnObject));
    }

    #[test]
    fn test_error_messages() {
        let err = ValidationError::TooShort {
            field: "name",
            min: 4,
        };
        assert_eq!(err.to_string(), "'name' must be at least 4 characters long");

        let err = ValidationError::TooShort {
            field: "title",
            min: 1,
        };
        assert_eq!(err.to_string(), "'title' must not be empty");

        let err = ValidationError::MissingPrefix {
            field: "id",
            prefix: 't',
        };
        assert_eq!(err.to_string(), "'id' must start with 't'");
    }
}
