//! Taskboard Core - Domain types and request validation.
//!
//! This crate provides the pieces of the task board that need no I/O:
//! - [`types`] - Newtype IDs, the task status and the `User`/`Task` records
//! - [`validate`] - Per-field validators and the password policy
//! - [`merge`] - Partial-update merge for tasks
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no database
//! access, no HTTP. The `server` crate drives these from its handlers and the
//! `cli` crate reuses them when seeding.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod merge;
pub mod types;
pub mod validate;

pub use merge::{TaskPatch, merge};
pub use types::*;
pub use validate::{FieldRule, ValidationError};
