//! PostgreSQL repository tests.
//!
//! These run against the database owned by [`TestEnv`] and exercise
//! `PgUserRepository` directly, below the validation layer.

use std::sync::Arc;

use tokio::net::TcpListener;

use us_account::{AccountService, ConstraintEngine};
use us_api::{ApiError, UserState, user_router};
use us_auth::Base64CredentialEncoder;
use us_model::UserRecord;
use us_storage::{StorageError, UserRepository};
use us_storage_sql::PgUserRepository;

use crate::common::{TestEnv, unique_email};

fn user(email: &str, age: i32) -> UserRecord {
    UserRecord::new()
        .with_email(email)
        .with_credential("cGFzc3dvcmQ=")
        .with_age(age)
}

/// Account service with an empty rule table, so writes go straight to storage.
fn unvalidated_service(
    env: &TestEnv,
) -> AccountService<PgUserRepository, Base64CredentialEncoder> {
    AccountService::new(
        Arc::new(PgUserRepository::new(env.pool.clone())),
        ConstraintEngine::with_constraints(Vec::new()),
        Base64CredentialEncoder::new(),
    )
}

#[tokio::test]
async fn test_save_assigns_id_and_upsert_keeps_it() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let repo = PgUserRepository::new(env.pool.clone());
    let old_email = unique_email("upsert-old");
    let new_email = unique_email("upsert-new");

    let saved = repo.save(&user(&old_email, 40)).await?;
    let id = saved.id.ok_or_else(|| anyhow::anyhow!("no id assigned"))?;

    let updated = repo
        .save(&UserRecord {
            email: Some(new_email.clone()),
            ..saved
        })
        .await?;
    assert_eq!(updated.id, Some(id));

    assert!(repo.find_by_email(&old_email).await?.is_none());
    let found = repo
        .find_by_email(&new_email)
        .await?
        .ok_or_else(|| anyhow::anyhow!("updated user missing"))?;
    assert_eq!(found.id, Some(id));
    assert_eq!(found.age, Some(40));

    Ok(())
}

#[tokio::test]
async fn test_age_range_is_half_open_in_insertion_order() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let repo = PgUserRepository::new(env.pool.clone());
    let first = unique_email("range-first");
    let second = unique_email("range-second");
    let at_max = unique_email("range-max");

    repo.save(&user(&first, 2033)).await?;
    repo.save(&user(&second, 2013)).await?;
    repo.save(&user(&at_max, 2034)).await?;

    let emails: Vec<_> = repo
        .find_by_age_range(2013, 2034)
        .await?
        .into_iter()
        .filter_map(|u| u.email)
        .collect();
    assert_eq!(emails, vec![first, second]);

    Ok(())
}

#[tokio::test]
async fn test_credential_lookup_requires_exact_match() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let repo = PgUserRepository::new(env.pool.clone());
    let email = unique_email("credential");
    repo.save(&user(&email, 30)).await?;

    assert!(
        repo.find_by_email_and_credential(&email, "cGFzc3dvcmQ=")
            .await?
            .is_some()
    );
    assert!(
        repo.find_by_email_and_credential(&email, "password")
            .await?
            .is_none()
    );

    Ok(())
}

#[tokio::test]
async fn test_delete_by_id_removes_row() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let repo = PgUserRepository::new(env.pool.clone());
    let email = unique_email("pg-delete");
    let saved = repo.save(&user(&email, 30)).await?;
    let id = saved.id.ok_or_else(|| anyhow::anyhow!("no id assigned"))?;

    repo.delete_by_id(id).await?;
    assert!(repo.find_by_email(&email).await?.is_none());

    // Deleting again is a no-op.
    repo.delete_by_id(id).await?;

    Ok(())
}

#[tokio::test]
async fn test_unique_index_rejects_duplicate_insert() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let repo = PgUserRepository::new(env.pool.clone());
    let email = unique_email("pg-duplicate");
    repo.save(&user(&email, 30)).await?;

    let err = repo
        .save(&user(&email, 31))
        .await
        .expect_err("second insert must violate the unique index");
    assert!(err.is_duplicate());
    assert!(
        matches!(&err, StorageError::Duplicate { field, value } if *field == "email" && *value == email)
    );

    Ok(())
}

#[tokio::test]
async fn test_unvalidated_duplicate_create_maps_to_conflict() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let service = unvalidated_service(&env);
    let email = unique_email("conflict");

    service.create(user(&email, 30)).await?;
    let err = service
        .create(user(&email, 31))
        .await
        .expect_err("unique index must reject the second create");

    assert_eq!(ApiError::from(err).status_code().as_u16(), 409);

    Ok(())
}

#[tokio::test]
async fn test_unvalidated_duplicate_create_returns_409_over_http() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let app = user_router().with_state(UserState::new(unvalidated_service(&env)));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    let email = unique_email("conflict-http");
    let body = serde_json::json!({"email": email, "password": "password", "age": 30});

    let first = env
        .client
        .post(format!("{base_url}/api/user"))
        .json(&body)
        .send()
        .await?;
    assert_eq!(first.status().as_u16(), 201);

    let second = env
        .client
        .post(format!("{base_url}/api/user"))
        .json(&body)
        .send()
        .await?;
    assert_eq!(second.status().as_u16(), 409);

    let json: serde_json::Value = second.json().await?;
    assert_eq!(json["error"], "conflict");
    assert!(
        json["error_description"]
            .as_str()
            .is_some_and(|d| d.contains(&email))
    );

    Ok(())
}
