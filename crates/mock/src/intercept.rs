//! Route interception: pattern-matched scripted handlers standing in for
//! a real backend.

use axum::http::{Method, StatusCode};
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};
use url::Url;

use crate::error::Result;

/// A request captured by the interception layer.
#[derive(Debug, Clone)]
pub struct InterceptedRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
}

impl InterceptedRequest {
    pub fn new(method: Method, url: Url, body: Option<Value>) -> Self {
        Self { method, url, body }
    }

    /// Deserialized JSON body, if one was sent and it fits `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        self.body
            .clone()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    /// First query parameter with the given name, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

/// A scripted status/body pair a handler fulfills a request with.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl MockResponse {
    /// 200 with a JSON body.
    pub fn json<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(v) => Self { status: StatusCode::OK, body: Some(v) },
            Err(err) => {
                error!(%err, "failed to serialize mock response body");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: Some(json!({"error": "mock serialization failure"})),
                }
            }
        }
    }

    /// 200 with no body, used by the current-session route when anonymous.
    pub fn empty() -> Self {
        Self { status: StatusCode::OK, body: None }
    }

    /// Status-coded rejection with the `{"error": message}` shape the UI
    /// surfaces to the user.
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self { status, body: Some(json!({ "error": message })) }
    }
}

/// What a matched route did with the request. `Unhandled` is the "let it
/// pass" policy: the route declined (or nothing matched) and the request
/// falls through to whatever sits behind the mock.
pub enum Outcome {
    Fulfilled(MockResponse),
    Unhandled,
}

/// URL pattern a route is bound to, matched against the full request URL.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    re: Regex,
}

impl RoutePattern {
    /// Browser-driver-style URL glob: `*` matches within a path segment,
    /// `**` matches across segments. Anchored at both ends.
    pub fn glob(pattern: &str) -> Result<Self> {
        let mut re = String::with_capacity(pattern.len() + 8);
        re.push('^');
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '*' {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    re.push_str(".*");
                } else {
                    re.push_str("[^/]*");
                }
            } else {
                re.push_str(&regex::escape(&c.to_string()));
            }
        }
        re.push('$');
        Ok(Self {
            raw: pattern.to_string(),
            re: Regex::new(&re)?,
        })
    }

    /// Raw regex, matched (unanchored unless the pattern anchors itself)
    /// against the full request URL.
    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(Self {
            raw: pattern.to_string(),
            re: Regex::new(pattern)?,
        })
    }

    pub fn matches(&self, url: &Url) -> bool {
        self.re.is_match(url.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

type RouteHandler = Box<dyn Fn(&InterceptedRequest) -> Outcome + Send + Sync>;

struct Route {
    pattern: RoutePattern,
    handler: RouteHandler,
}

/// Ordered set of scripted routes for one test session.
///
/// Dispatch follows browser-driver interception rules: routes are
/// consulted in reverse registration order and the first whose pattern
/// matches owns the request, whether or not its handler fulfills it.
/// Later registrations therefore shadow earlier ones on overlapping
/// patterns.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H>(&mut self, pattern: RoutePattern, handler: H)
    where
        H: Fn(&InterceptedRequest) -> Outcome + Send + Sync + 'static,
    {
        debug!(pattern = pattern.as_str(), "registering route");
        self.routes.push(Route {
            pattern,
            handler: Box::new(handler),
        });
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Dispatch a request to the owning route, if any.
    pub fn dispatch(&self, req: &InterceptedRequest) -> Outcome {
        for route in self.routes.iter().rev() {
            if route.pattern.matches(&req.url) {
                debug!(
                    method = %req.method,
                    url = %req.url,
                    pattern = route.pattern.as_str(),
                    "route intercepted"
                );
                return (route.handler)(req);
            }
        }
        debug!(method = %req.method, url = %req.url, "no route matched, letting the request pass");
        Outcome::Unhandled
    }
}
