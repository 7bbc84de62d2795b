//! Rejection paths and the fall-through policy for unmocked endpoints.

use pizzamock::types::UpdateUserRequest;
use pizzamock_e2e::fixtures;
use reqwest::StatusCode;

#[tokio::test]
async fn session_endpoint_is_empty_before_any_login() {
    let (server, client) = fixtures::session().await.unwrap();
    assert!(client.me().await.unwrap().is_none());
    server.shutdown().await;
}

#[tokio::test]
async fn wrong_password_is_unauthorized_and_leaves_no_session() {
    let (server, client) = fixtures::session().await.unwrap();

    let (status, body) = client.try_login("d@jwt.com", "wrong").await.unwrap();
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    assert!(client.me().await.unwrap().is_none());

    server.shutdown().await;
}

#[tokio::test]
async fn unknown_email_is_unauthorized() {
    let (server, client) = fixtures::session().await.unwrap();

    let (status, body) = client.try_login("ghost@jwt.com", "diner").await.unwrap();
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    server.shutdown().await;
}

#[tokio::test]
async fn failed_login_does_not_clobber_an_existing_session() {
    let (server, mut client) = fixtures::session().await.unwrap();

    client
        .login(fixtures::DINER.email, fixtures::DINER.password)
        .await
        .unwrap();
    let (status, _) = client.try_login("d@jwt.com", "wrong").await.unwrap();
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let me = client.me().await.unwrap().unwrap();
    assert_eq!(me.name, "dinerUser");

    server.shutdown().await;
}

#[tokio::test]
async fn updating_an_unknown_id_is_not_found() {
    let (server, client) = fixtures::session().await.unwrap();

    let (status, body) = client
        .try_update_user(&UpdateUserRequest {
            id: "99".into(),
            name: Some("ghost".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    // Nothing was created or altered.
    let listing = client.list_users().await.unwrap();
    assert_eq!(listing.users.len(), 3);
    assert!(listing.users.iter().all(|u| u.name != "ghost"));

    server.shutdown().await;
}

#[tokio::test]
async fn unmocked_endpoint_falls_through() {
    let (server, _client) = fixtures::session().await.unwrap();

    let resp = reqwest::get(format!("{}/api/order/menu", server.base_url()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);

    server.shutdown().await;
}

#[tokio::test]
async fn wrong_method_on_a_mocked_pattern_also_falls_through() {
    let (server, _client) = fixtures::session().await.unwrap();

    // The auth route only answers PUT; a GET is declined, not 405'd.
    let resp = reqwest::get(format!("{}/api/auth", server.base_url()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);

    server.shutdown().await;
}
