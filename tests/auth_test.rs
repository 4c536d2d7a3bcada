//! End-to-end tests for the register/login endpoints.
//!
//! These run against a live server (API_BASE_URL, default
//! http://localhost:5000) and skip themselves when none is listening.

mod common;

use serde_json::{json, Value};

async fn register_user(
    client: &reqwest::Client,
    username: &str,
    email: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(common::url("/api/register"))
        .json(&json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .send()
        .await
        .expect("Failed to send register request")
}

async fn login_user(
    client: &reqwest::Client,
    username: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(common::url("/api/login"))
        .json(&json!({
            "username": username,
            "password": password,
        }))
        .send()
        .await
        .expect("Failed to send login request")
}

/// Full auth flow: register then login.
#[tokio::test]
async fn register_and_login() {
    if !common::server_available() {
        eprintln!("Skipping: no server at {}", common::base_url());
        return;
    }

    let client = common::client();
    let suffix = common::unique_suffix();
    let username = format!("testuser_{suffix}");
    let email = format!("test_{suffix}@example.com");
    let password = "testpass123";

    let resp = register_user(&client, &username, &email, password).await;
    assert_eq!(resp.status(), 200, "Register should succeed");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "User registered successfully");

    let resp = login_user(&client, &username, password).await;
    assert_eq!(resp.status(), 200, "Login should succeed");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Logged in successfully");
    assert_eq!(body["user"]["username"], username);
    assert_eq!(body["user"]["email"], email);
}

/// Registering the same username twice should fail.
#[tokio::test]
async fn register_duplicate_username_fails() {
    if !common::server_available() {
        eprintln!("Skipping: no server at {}", common::base_url());
        return;
    }

    let client = common::client();
    let suffix = common::unique_suffix();
    let username = format!("dupuser_{suffix}");
    let password = "testpass123";

    let resp = register_user(&client, &username, "a@example.com", password).await;
    assert_eq!(resp.status(), 200);

    let resp = register_user(&client, &username, "b@example.com", password).await;
    assert_eq!(resp.status(), 400, "Duplicate username should be rejected");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Username already exists");
}

/// Wrong password is rejected with the same message as an unknown user.
#[tokio::test]
async fn login_wrong_password_fails() {
    if !common::server_available() {
        eprintln!("Skipping: no server at {}", common::base_url());
        return;
    }

    let client = common::client();
    let suffix = common::unique_suffix();
    let username = format!("pwuser_{suffix}");

    let resp = register_user(&client, &username, "pw@example.com", "correct_pass1").await;
    assert_eq!(resp.status(), 200);

    let resp = login_user(&client, &username, "wrong_pass_99").await;
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid credentials");
}

/// Missing fields come back as a 400, not a serde rejection.
#[tokio::test]
async fn register_missing_fields() {
    if !common::server_available() {
        eprintln!("Skipping: no server at {}", common::base_url());
        return;
    }

    let client = common::client();
    let resp = client
        .post(common::url("/api/register"))
        .json(&json!({ "username": "incomplete" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Missing fields");
}
