//! API client that mimics the UI's network behavior.
//!
//! Each method issues the same request the corresponding page does: the
//! login form PUTs `/api/auth`, the profile editor PUTs `/api/user/{id}`,
//! the admin dashboard GETs the paginated listing endpoints. Logout is
//! client-side only — the token is dropped and the mock never hears about
//! it, which is exactly how the UI behaves.

use pizzamock::types::{
    AuthResponse, FranchiseListResponse, LoginRequest, UpdateUserRequest, User, UserListResponse,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// PUT `/api/auth` as the login form does; keeps the token on success.
    pub async fn login(&mut self, email: &str, password: &str) -> HarnessResult<AuthResponse> {
        debug!(email, "logging in");
        let resp = self
            .http
            .put(format!("{}/api/auth", self.base_url))
            .json(&LoginRequest {
                email: email.into(),
                password: password.into(),
            })
            .send()
            .await?;
        let auth: AuthResponse = expect_json(resp, StatusCode::OK).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Raw login attempt, for asserting on rejection status and body.
    pub async fn try_login(
        &self,
        email: &str,
        password: &str,
    ) -> HarnessResult<(StatusCode, Value)> {
        let resp = self
            .http
            .put(format!("{}/api/auth", self.base_url))
            .json(&LoginRequest {
                email: email.into(),
                password: password.into(),
            })
            .send()
            .await?;
        raw(resp).await
    }

    /// The UI clears its token locally; the mock never observes a logout.
    pub fn logout(&mut self) {
        debug!("client-side logout");
        self.token = None;
    }

    /// GET `/api/user/me`. `None` when the mock holds no session identity.
    pub async fn me(&self) -> HarnessResult<Option<User>> {
        let resp = self
            .authorized(self.http.get(format!("{}/api/user/me", self.base_url)))
            .send()
            .await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if status != StatusCode::OK {
            return Err(HarnessError::UnexpectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// PUT `/api/user/{id}` as the profile edit dialog does; refreshes the
    /// held token from the response.
    pub async fn update_user(&mut self, update: &UpdateUserRequest) -> HarnessResult<AuthResponse> {
        debug!(id = update.id.as_str(), "updating user");
        let resp = self
            .authorized(
                self.http
                    .put(format!("{}/api/user/{}", self.base_url, update.id)),
            )
            .json(update)
            .send()
            .await?;
        let auth: AuthResponse = expect_json(resp, StatusCode::OK).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Raw update attempt, for asserting on the not-found path.
    pub async fn try_update_user(
        &self,
        update: &UpdateUserRequest,
    ) -> HarnessResult<(StatusCode, Value)> {
        let resp = self
            .authorized(
                self.http
                    .put(format!("{}/api/user/{}", self.base_url, update.id)),
            )
            .json(update)
            .send()
            .await?;
        raw(resp).await
    }

    /// GET `/api/user?page=0&limit=10&name=*`, the admin dashboard query.
    pub async fn list_users(&self) -> HarnessResult<UserListResponse> {
        let resp = self.user_listing_request().send().await?;
        expect_json(resp, StatusCode::OK).await
    }

    /// Same request, untyped, for asserting on the raw payload.
    pub async fn list_users_raw(&self) -> HarnessResult<Value> {
        let resp = self.user_listing_request().send().await?;
        expect_json(resp, StatusCode::OK).await
    }

    /// GET `/api/franchise` with the dashboard's paging query and an
    /// optional name filter (the filter box wraps its input in `*…*`).
    pub async fn list_franchises(
        &self,
        name: Option<&str>,
    ) -> HarnessResult<FranchiseListResponse> {
        let resp = self
            .authorized(self.http.get(format!("{}/api/franchise", self.base_url)))
            .query(&[
                ("page", "0"),
                ("limit", "10"),
                ("name", name.unwrap_or("*")),
            ])
            .send()
            .await?;
        expect_json(resp, StatusCode::OK).await
    }

    fn user_listing_request(&self) -> reqwest::RequestBuilder {
        self.authorized(self.http.get(format!("{}/api/user", self.base_url)))
            .query(&[("page", "0"), ("limit", "10"), ("name", "*")])
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

async fn expect_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    expected: StatusCode,
) -> HarnessResult<T> {
    let status = resp.status();
    let body = resp.text().await?;
    if status != expected {
        return Err(HarnessError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

async fn raw(resp: reqwest::Response) -> HarnessResult<(StatusCode, Value)> {
    let status = resp.status();
    let body = resp.text().await?;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body)?
    };
    Ok((status, value))
}
