//! User API router configuration.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use us_auth::CredentialEncoder;
use us_storage::UserRepository;

use crate::dto::{AgeRangeParams, LoginRequest, UserRepresentation, UserRequest};
use crate::error::ApiResult;
use crate::state::UserState;

/// Body returned on a successful login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login Successful!";

/// POST /api/user - Create a user
async fn create_user<U, E>(
    State(state): State<UserState<U, E>>,
    Json(request): Json<UserRequest>,
) -> ApiResult<impl IntoResponse>
where
    U: UserRepository + ?Sized + 'static,
    E: CredentialEncoder + 'static,
{
    let user = state.service.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(UserRepresentation::from(user))))
}

/// PATCH /api/user/{email} - Partially update a user
async fn patch_user<U, E>(
    State(state): State<UserState<U, E>>,
    Path(email): Path<String>,
    Json(request): Json<UserRequest>,
) -> ApiResult<Json<UserRepresentation>>
where
    U: UserRepository + ?Sized + 'static,
    E: CredentialEncoder + 'static,
{
    let user = state.service.patch(&email, request.into()).await?;
    Ok(Json(UserRepresentation::from(user)))
}

/// DELETE /api/user/{email} - Delete a user
async fn delete_user<U, E>(
    State(state): State<UserState<U, E>>,
    Path(email): Path<String>,
) -> ApiResult<StatusCode>
where
    U: UserRepository + ?Sized + 'static,
    E: CredentialEncoder + 'static,
{
    state.service.delete(&email).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/user?minAge=&maxAge= - List users in an age range
async fn query_users<U, E>(
    State(state): State<UserState<U, E>>,
    Query(params): Query<AgeRangeParams>,
) -> ApiResult<Json<Vec<UserRepresentation>>>
where
    U: UserRepository + ?Sized + 'static,
    E: CredentialEncoder + 'static,
{
    let users = state
        .service
        .query(params.min_age, params.max_age)
        .await?;
    Ok(Json(users.into_iter().map(UserRepresentation::from).collect()))
}

/// POST /api/user/login - Check credentials sent as JSON
async fn login<U, E>(
    State(state): State<UserState<U, E>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<&'static str>
where
    U: UserRepository + ?Sized + 'static,
    E: CredentialEncoder + 'static,
{
    state.service.login(&request.email, &request.password).await?;
    Ok(LOGIN_SUCCESS_MESSAGE)
}

/// GET /api/user/login?email=&password= - Check credentials sent as query parameters
async fn login_query<U, E>(
    State(state): State<UserState<U, E>>,
    Query(request): Query<LoginRequest>,
) -> ApiResult<&'static str>
where
    U: UserRepository + ?Sized + 'static,
    E: CredentialEncoder + 'static,
{
    state.service.login(&request.email, &request.password).await?;
    Ok(LOGIN_SUCCESS_MESSAGE)
}

/// Creates the user API router.
///
/// # Routes
///
/// - `POST /api/user` - Create a user
/// - `GET /api/user` - List users by age range
/// - `PATCH /api/user/{email}` - Partially update a user
/// - `DELETE /api/user/{email}` - Delete a user
/// - `POST /api/user/login` - Login with a JSON body
/// - `GET /api/user/login` - Login with query parameters
///
/// # Example
///
/// ```ignore
/// let state = UserState::new(service);
/// let app = user_router().with_state(state);
/// ```
pub fn user_router<U, E>() -> Router<UserState<U, E>>
where
    U: UserRepository + ?Sized + 'static,
    E: CredentialEncoder + 'static,
{
    Router::new()
        .route(
            "/api/user",
            get(query_users::<U, E>).post(create_user::<U, E>),
        )
        .route(
            "/api/user/login",
            get(login_query::<U, E>).post(login::<U, E>),
        )
        .route(
            "/api/user/{email}",
            patch(patch_user::<U, E>).delete(delete_user::<U, E>),
        )
}
