//! User API integration tests.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::common::{TestEnv, unique_email};

/// User representation as returned by the API.
#[derive(Debug, Deserialize)]
pub struct UserRepresentation {
    pub email: Option<String>,
    pub age: Option<i32>,
}

/// Validation error entry.
#[derive(Debug, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

async fn login(env: &TestEnv, email: &str, password: &str) -> anyhow::Result<(StatusCode, String)> {
    let response = env
        .client
        .get(env.url("/api/user/login"))
        .query(&[("email", email), ("password", password)])
        .send()
        .await?;
    let status = response.status();
    Ok((status, response.text().await?))
}

/// Tests that a created user is returned without its password.
#[tokio::test]
async fn test_create_user() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let email = unique_email("create");

    let response = env
        .client
        .post(env.url("/api/user"))
        .json(&serde_json::json!({"email": email, "password": "password", "age": 34}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["age"], 34);
    assert!(body.get("password").is_none(), "password must not be echoed");
    assert!(body.get("id").is_none(), "id must not be echoed");

    Ok(())
}

/// Tests that a second create with the same email is rejected.
#[tokio::test]
async fn test_create_user_when_email_already_exists() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let email = unique_email("duplicate");
    env.create_user(&email, "password", 34).await?;

    let response = env
        .client
        .post(env.url("/api/user"))
        .json(&serde_json::json!({"email": email, "password": "password", "age": 34}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors: Vec<FieldError> = response.json().await?;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "email");
    assert_eq!(errors[0].message, "Email already exists!");

    Ok(())
}

/// Tests that a malformed email is rejected on create.
#[tokio::test]
async fn test_create_user_with_malformed_email() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let response = env
        .client
        .post(env.url("/api/user"))
        .json(&serde_json::json!({"email": "not-an-email", "password": "password", "age": 20}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors: Vec<FieldError> = response.json().await?;
    assert_eq!(errors[0].field, "email");
    assert_eq!(errors[0].message, "must be a well-formed email address");

    Ok(())
}

/// Tests a partial update of email and password.
#[tokio::test]
async fn test_update_user() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let old_email = unique_email("old");
    let new_email = unique_email("new");
    env.create_user(&old_email, "password", 34).await?;

    let response = env
        .client
        .patch(env.url(&format!("/api/user/{old_email}")))
        .json(&serde_json::json!({"email": new_email, "password": "changed"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let user: UserRepresentation = response.json().await?;
    assert_eq!(user.email.as_deref(), Some(new_email.as_str()));
    assert_eq!(user.age, Some(34), "age must be preserved");

    let (status, _) = login(&env, &new_email, "changed").await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = login(&env, &old_email, "password").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Tests that age cannot be patched and nothing else is applied either.
#[tokio::test]
async fn test_update_user_when_age_is_patched() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let email = unique_email("aged");
    env.create_user(&email, "password", 34).await?;

    let response = env
        .client
        .patch(env.url(&format!("/api/user/{email}")))
        .json(&serde_json::json!({"email": unique_email("other"), "password": "password", "age": 12}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors: Vec<FieldError> = response.json().await?;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "age");
    assert_eq!(errors[0].message, "Field cannot be updated");

    let (status, _) = login(&env, &email, "password").await?;
    assert_eq!(status, StatusCode::OK, "record must be unchanged");

    Ok(())
}

/// Tests that patching an unknown user yields 404.
#[tokio::test]
async fn test_update_unknown_user() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let response = env
        .client
        .patch(env.url(&format!("/api/user/{}", unique_email("ghost"))))
        .json(&serde_json::json!({"password": "password"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Tests that delete removes the user and is idempotent.
#[tokio::test]
async fn test_delete_user() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let email = unique_email("delete");
    env.create_user(&email, "password", 34).await?;

    for _ in 0..2 {
        let response = env
            .client
            .delete(env.url(&format!("/api/user/{email}")))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let (status, _) = login(&env, &email, "password").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The email is free again
    env.create_user(&email, "password", 34).await?;

    Ok(())
}

/// Tests the half-open age range query.
#[tokio::test]
async fn test_get_users_in_given_age_range() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let inside_high = unique_email("user1");
    let inside_low = unique_email("user2");
    let at_max = unique_email("user3");
    env.create_user(&inside_high, "password1", 1033).await?;
    env.create_user(&inside_low, "password2", 1013).await?;
    env.create_user(&at_max, "password3", 1034).await?;

    let response = env
        .client
        .get(env.url("/api/user"))
        .query(&[("minAge", "1012"), ("maxAge", "1034")])
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<UserRepresentation> = response.json().await?;
    let ours: Vec<_> = users
        .iter()
        .filter(|u| {
            u.email
                .as_deref()
                .is_some_and(|e| e == inside_high || e == inside_low || e == at_max)
        })
        .collect();

    assert_eq!(ours.len(), 2);
    assert_eq!(ours[0].email.as_deref(), Some(inside_high.as_str()));
    assert_eq!(ours[0].age, Some(1033));
    assert_eq!(ours[1].email.as_deref(), Some(inside_low.as_str()));
    assert_eq!(ours[1].age, Some(1013));

    Ok(())
}

/// Tests that the age range query requires both bounds.
#[tokio::test]
async fn test_get_users_without_bounds() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let response = env
        .client
        .get(env.url("/api/user"))
        .query(&[("minAge", "12")])
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Tests a successful login via query parameters.
#[tokio::test]
async fn test_login_successful() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let email = unique_email("login");
    env.create_user(&email, "password", 33).await?;

    let (status, body) = login(&env, &email, "password").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Login Successful!");

    Ok(())
}

/// Tests a successful login via JSON body.
#[tokio::test]
async fn test_login_with_json_body() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let email = unique_email("login-json");
    env.create_user(&email, "password", 33).await?;

    let response = env
        .client
        .post(env.url("/api/user/login"))
        .json(&serde_json::json!({"email": email, "password": "password"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "Login Successful!");

    Ok(())
}

/// Tests that wrong passwords and unknown emails fail the same way.
#[tokio::test]
async fn test_login_failed() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let email = unique_email("login-fail");
    env.create_user(&email, "password1", 33).await?;

    let (status, body) = login(&env, &email, "password").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Login failed!");

    let (status, unknown_body) = login(&env, &unique_email("nobody"), "password1").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_body, body);

    Ok(())
}
