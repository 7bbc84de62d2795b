//! Pizzamock — a stateful mock of the pizza-shop backend API.
//!
//! Browser e2e suites for the pizza shop need the backend to behave
//! deterministically: a fixed set of users to log in with, a fixed
//! franchise catalog to filter, and profile updates that survive a
//! logout/login round trip. This crate provides that backend double as a
//! per-test-session context:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       MockServer                         │
//! │  axum fallback ──► RouteTable (reverse-order dispatch)   │
//! │                      ├── PUT  */**/api/auth              │
//! │                      ├── PUT  /api/user/:id              │
//! │                      ├── GET  /api/user?…                │
//! │                      ├── GET  */**/api/user/me           │
//! │                      ├── GET  /api/franchise?…  (empty)  │
//! │                      └── GET  /api/franchise    (catalog)│
//! │  MockState { UserDirectory, logged_in, catalog }         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every [`MockServer::start`] builds fresh state, so parallel tests share
//! nothing. Requests that no route intercepts either proxy to a configured
//! upstream or answer 501, so a fixture gap is loud instead of silent.

pub mod catalog;
pub mod config;
pub mod directory;
pub mod error;
pub mod intercept;
pub mod routes;
pub mod server;
pub mod types;

pub use config::MockConfig;
pub use error::{MockError, Result};
pub use intercept::{InterceptedRequest, MockResponse, Outcome, RoutePattern, RouteTable};
pub use routes::{MockState, SharedState};
pub use server::MockServer;
