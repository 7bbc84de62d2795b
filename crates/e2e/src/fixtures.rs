//! Seed data and per-test session setup shared by the scenario tests.

use std::sync::Once;

use pizzamock::{MockConfig, MockServer};
use tracing_subscriber::EnvFilter;

use crate::client::ApiClient;
use crate::error::HarnessResult;

/// One seeded identity, as the directory starts every session with it.
#[derive(Debug, Clone, Copy)]
pub struct Persona {
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: &'static str,
}

pub const DINER: Persona = Persona {
    name: "dinerUser",
    email: "d@jwt.com",
    password: "diner",
    role: "diner",
};

pub const FRANCHISEE: Persona = Persona {
    name: "franchiseeUser",
    email: "f@jwt.com",
    password: "franchisee",
    role: "franchisee",
};

pub const ADMIN: Persona = Persona {
    name: "adminUser",
    email: "a@jwt.com",
    password: "admin",
    role: "admin",
};

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Fresh mock server plus a client pointed at it. Route registration
/// happens inside `start`, before the first request a test issues.
pub async fn session() -> HarnessResult<(MockServer, ApiClient)> {
    init_tracing();
    let server = MockServer::start(MockConfig::default()).await?;
    let client = ApiClient::new(server.base_url());
    Ok((server, client))
}
