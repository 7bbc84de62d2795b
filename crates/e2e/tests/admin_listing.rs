//! Admin dashboard user-table behavior: the listing projection, its
//! idempotence, and the exact seeded rows.

use pizzamock::types::UpdateUserRequest;
use pizzamock_e2e::fixtures;

#[tokio::test]
async fn listing_shows_the_three_seeded_rows() {
    let (server, mut client) = fixtures::session().await.unwrap();
    client
        .login(fixtures::ADMIN.email, fixtures::ADMIN.password)
        .await
        .unwrap();

    let listing = client.list_users().await.unwrap();
    assert!(!listing.more, "the mock always reports a single page");

    let rows: Vec<(String, String, &str)> = listing
        .users
        .iter()
        .map(|u| (u.name.clone(), u.email.clone(), u.roles[0].role.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("dinerUser".to_string(), "d@jwt.com".to_string(), "diner"),
            ("franchiseeUser".to_string(), "f@jwt.com".to_string(), "franchisee"),
            ("adminUser".to_string(), "a@jwt.com".to_string(), "admin"),
        ]
    );

    server.shutdown().await;
}

#[tokio::test]
async fn listing_twice_without_updates_is_identical() {
    let (server, mut client) = fixtures::session().await.unwrap();
    client
        .login(fixtures::ADMIN.email, fixtures::ADMIN.password)
        .await
        .unwrap();

    let first = client.list_users().await.unwrap();
    let second = client.list_users().await.unwrap();
    assert_eq!(first, second);

    server.shutdown().await;
}

#[tokio::test]
async fn listing_payload_never_carries_passwords() {
    let (server, client) = fixtures::session().await.unwrap();

    let raw = client.list_users_raw().await.unwrap();
    for user in raw["users"].as_array().unwrap() {
        assert!(user.get("password").is_none(), "leaked in {user}");
    }

    server.shutdown().await;
}

#[tokio::test]
async fn listing_reflects_an_email_change_exactly_once() {
    let (server, mut client) = fixtures::session().await.unwrap();
    client
        .login(fixtures::DINER.email, fixtures::DINER.password)
        .await
        .unwrap();
    client
        .update_user(&UpdateUserRequest {
            id: "1".into(),
            email: Some("d2@jwt.com".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    let listing = client.list_users().await.unwrap();
    assert_eq!(listing.users.len(), 3);
    let diner_rows: Vec<_> = listing.users.iter().filter(|u| u.id == "1").collect();
    assert_eq!(diner_rows.len(), 1);
    assert_eq!(diner_rows[0].email, "d2@jwt.com");
    assert!(!listing.users.iter().any(|u| u.email == "d@jwt.com"));

    server.shutdown().await;
}
