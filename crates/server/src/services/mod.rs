//! Business services shared by the route handlers.
//!
//! - [`existence`] - Store lookups that gate creates, deletes, reads and updates
//! - [`password`] - Password hashing for user creation

pub mod existence;
pub mod password;
