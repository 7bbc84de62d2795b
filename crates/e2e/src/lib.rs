//! Scenario harness for the pizza-shop mock backend.
//!
//! The browser and the UI under test are external collaborators; what this
//! crate reproduces is the UI's *network* behavior — the exact request
//! sequences the login page, profile page, and admin dashboard issue —
//! driven against a fresh [`pizzamock::MockServer`] per test.

pub mod client;
pub mod error;
pub mod fixtures;

pub use client::ApiClient;
pub use error::{HarnessError, HarnessResult};
