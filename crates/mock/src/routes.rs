//! The scripted route set the pizza-shop UI relies on during a test
//! session.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use parking_lot::Mutex;
use tracing::warn;

use crate::catalog::{self, default_catalog};
use crate::directory::UserDirectory;
use crate::error::Result;
use crate::intercept::{InterceptedRequest, MockResponse, Outcome, RoutePattern, RouteTable};
use crate::types::{
    AuthResponse, Franchise, FranchiseListResponse, LoginRequest, UpdateUserRequest, User,
    UserListResponse, MOCK_TOKEN,
};

/// Mutable backend state for one test session. Built fresh per session and
/// discarded with it; never process-global.
#[derive(Debug, Clone)]
pub struct MockState {
    pub directory: UserDirectory,
    /// The session identity. Set only by a successful login; logout is a
    /// client-side affair the mock never observes.
    pub logged_in: Option<User>,
    pub catalog: Vec<Franchise>,
}

impl MockState {
    /// Fresh session state with the standard fixtures.
    pub fn seeded() -> Self {
        Self {
            directory: UserDirectory::seeded(),
            logged_in: None,
            catalog: default_catalog(),
        }
    }
}

pub type SharedState = Arc<Mutex<MockState>>;

pub fn shared(state: MockState) -> SharedState {
    Arc::new(Mutex::new(state))
}

/// Register the full fixture route set against one session's state.
///
/// Registration order matters: the catalog-filtering franchise route lands
/// after the always-empty variant, so reverse-order dispatch sends every
/// franchise query to the catalog. That precedence is what keeps the admin
/// dashboard and filter scenarios meaningful.
pub fn register(table: &mut RouteTable, state: SharedState) -> Result<()> {
    // PUT /api/auth: credential check, establishes the session identity.
    {
        let state = state.clone();
        table.register(RoutePattern::glob("*/**/api/auth")?, move |req| {
            if req.method != Method::PUT {
                return Outcome::Unhandled;
            }
            let Some(login) = req.json::<LoginRequest>() else {
                return Outcome::Fulfilled(MockResponse::error(
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized",
                ));
            };
            let mut state = state.lock();
            let Some(user) = state
                .directory
                .authenticate(&login.email, &login.password)
                .cloned()
            else {
                return Outcome::Fulfilled(MockResponse::error(
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized",
                ));
            };
            state.logged_in = Some(user.clone());
            Outcome::Fulfilled(MockResponse::json(&AuthResponse {
                user,
                token: MOCK_TOKEN.to_string(),
            }))
        });
    }

    // PUT /api/user/:id — partial update, looked up by id rather than the
    // directory's email key.
    {
        let state = state.clone();
        table.register(RoutePattern::regex(r"/api/user/\d+$")?, move |req| {
            if req.method != Method::PUT {
                return Outcome::Unhandled;
            }
            let Some(update) = req.json::<UpdateUserRequest>() else {
                return Outcome::Fulfilled(MockResponse::error(
                    StatusCode::NOT_FOUND,
                    "User not found",
                ));
            };
            let mut state = state.lock();
            match state.directory.update(&update) {
                Some(user) => Outcome::Fulfilled(MockResponse::json(&AuthResponse {
                    user,
                    token: MOCK_TOKEN.to_string(),
                })),
                None => Outcome::Fulfilled(MockResponse::error(
                    StatusCode::NOT_FOUND,
                    "User not found",
                )),
            }
        });
    }

    // GET /api/user?… — password-free listing, always a single page.
    {
        let state = state.clone();
        table.register(RoutePattern::regex(r"/api/user\?.+$")?, move |req| {
            if req.method != Method::GET {
                return Outcome::Unhandled;
            }
            let state = state.lock();
            Outcome::Fulfilled(MockResponse::json(&UserListResponse {
                users: state.directory.summaries(),
                more: false,
            }))
        });
    }

    // GET /api/user/me — whoever last logged in, or an empty body.
    {
        let state = state.clone();
        table.register(RoutePattern::glob("*/**/api/user/me")?, move |req| {
            if req.method != Method::GET {
                warn!(method = %req.method, "current-session route expects GET");
                return Outcome::Unhandled;
            }
            let state = state.lock();
            match &state.logged_in {
                Some(user) => Outcome::Fulfilled(MockResponse::json(user)),
                None => Outcome::Fulfilled(MockResponse::empty()),
            }
        });
    }

    // GET /api/franchise?… — always-empty variant, for flows that ignore
    // franchise content. Shadowed by the catalog route below.
    table.register(RoutePattern::regex(r"/api/franchise\?.+$")?, move |req| {
        if req.method != Method::GET {
            return Outcome::Unhandled;
        }
        Outcome::Fulfilled(MockResponse::json(&FranchiseListResponse {
            franchises: Vec::new(),
            more: Some(false),
        }))
    });

    // GET /api/franchise — name-filtered catalog, stores intact. Omits
    // `more`, unlike the variant above.
    table.register(RoutePattern::regex(r"/api/franchise(\?.*)?$")?, move |req| {
        if req.method != Method::GET {
            return Outcome::Unhandled;
        }
        let pattern = req
            .query_param("name")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "*".to_string());
        let state = state.lock();
        let franchises = match catalog::filter(&state.catalog, &pattern) {
            Ok(franchises) => franchises,
            Err(err) => {
                warn!(%err, pattern, "unusable franchise name filter");
                Vec::new()
            }
        };
        Outcome::Fulfilled(MockResponse::json(&FranchiseListResponse {
            franchises,
            more: None,
        }))
    });

    Ok(())
}
