//! Client side of the user management page: a cached user list kept in step with a
//! remote REST store.
pub mod command;
pub mod controller;
pub mod error;
pub mod helpers;
pub mod models;
pub mod run_tool;
pub mod session;
pub mod user_store;

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
