//! Core types for the task board.
//!
//! This module provides type-safe wrappers and records for the two entities.

pub mod id;
pub mod status;
pub mod task;
pub mod user;

pub use id::*;
pub use status::TaskStatus;
pub use task::{NewTask, Task};
pub use user::{NewUser, User};
