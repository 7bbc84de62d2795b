//! Server configuration, environment-overridable.

use std::net::SocketAddr;

use crate::error::{MockError, Result};

/// Configuration for one [`crate::MockServer`] instance.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Listen address. Port 0 picks an ephemeral port, which is what
    /// per-test instances want.
    pub addr: SocketAddr,
    /// Real backend to forward unintercepted requests to. When unset,
    /// unintercepted requests answer 501 so fixture gaps surface in tests.
    pub upstream: Option<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            upstream: None,
        }
    }
}

impl MockConfig {
    /// Read overrides from `PIZZAMOCK_ADDR` and `PIZZAMOCK_UPSTREAM`.
    /// Empty values count as unset.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(addr) = env_nonempty("PIZZAMOCK_ADDR") {
            cfg.addr = addr
                .parse()
                .map_err(|_| MockError::InvalidConfig(format!("bad PIZZAMOCK_ADDR: {addr}")))?;
        }
        cfg.upstream = env_nonempty("PIZZAMOCK_UPSTREAM");
        Ok(cfg)
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|v| {
        let v = v.trim().to_string();
        if v.is_empty() {
            None
        } else {
            Some(v)
        }
    })
}
