//! User CRUD endpoints

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::state::AppState;
use super::types::{decode_body, ApiError, ApiResponse, Json};
use crate::domain::user::{UserId, UserProfile, UserUpdate, ValidationErrors};
use crate::domain::{DomainError, UniqueField};
use crate::infrastructure::user::CreateUserRequest;

pub const USER_NOT_FOUND: &str = "User not found";
pub const INVALID_USER_ID: &str = "Invalid user ID format";
pub const USER_UPDATED: &str = "User updated successfully";
pub const USER_DELETED: &str = "User deleted successfully";

/// Body of `POST /user/`; missing or null fields decode as empty strings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserBody {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of `PUT /user/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserBody {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Response carrying only the assigned ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdResponse {
    pub id: UserId,
}

/// Create the `/user` router
pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_users).post(create_user))
        .route("/user/", get(list_users).post(create_user))
        .route(
            "/user/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// POST /user/
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<ApiResponse<UserIdResponse>, ApiError> {
    let request = CreateUserRequest {
        username: body.username.unwrap_or_default(),
        email: body.email.unwrap_or_default(),
        password: body.password.unwrap_or_default(),
    };

    state
        .validator
        .validate_new_user(&request.username, &request.email, &request.password)
        .map_err(validation_error)?;

    debug!(username = %request.username, "Creating user");

    let id = state
        .user_service
        .create(request)
        .await
        .map_err(create_error)?;

    Ok(ApiResponse::success(UserIdResponse { id }))
}

/// GET /user/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<ApiResponse<UserProfile>, ApiError> {
    let id = parse_id(&raw_id, ApiError::bad_request(INVALID_USER_ID))?;

    let user = state.user_service.get(id).await.map_err(|e| {
        if e.is_not_found() {
            warn!(id = %id, "User not found");
            ApiError::not_found(USER_NOT_FOUND)
        } else {
            error!(id = %id, error = %e, "Failed to retrieve user");
            ApiError::internal("Failed to retrieve user")
        }
    })?;

    Ok(ApiResponse::success(UserProfile::from(user)))
}

/// PUT /user/{id}
///
/// The path ID is checked before the body is decoded.
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiResponse<&'static str>, ApiError> {
    let id = parse_id(&raw_id, ApiError::bad_request(INVALID_USER_ID))?;
    let body: UpdateUserBody = decode_body(body)?;

    let update = UserUpdate {
        id,
        username: body.username,
        email: body.email,
    };

    state
        .validator
        .validate_update(&update)
        .map_err(validation_error)?;

    state.user_service.update(update).await.map_err(|e| {
        if e.is_not_found() {
            warn!(id = %id, "Update target not found");
            ApiError::not_found(USER_NOT_FOUND)
        } else {
            error!(id = %id, error = %e, "Failed to update user");
            ApiError::internal("Failed to update user")
        }
    })?;

    Ok(ApiResponse::success(USER_UPDATED))
}

/// DELETE /user/{id}
///
/// A malformed ID answers 404 rather than 400, and a missing user still
/// reports success.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<ApiResponse<&'static str>, ApiError> {
    let id = parse_id(&raw_id, ApiError::not_found(USER_NOT_FOUND))?;

    state.user_service.delete(id).await.map_err(|e| {
        error!(id = %id, error = %e, "Failed to delete user");
        ApiError::internal("Something wrong")
    })?;

    Ok(ApiResponse::success(USER_DELETED))
}

/// GET /user/
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<UserProfile>>, ApiError> {
    let users = state.user_service.list().await.map_err(|e| {
        error!(error = %e, "Failed to list users");
        ApiError::internal("Something wrong")
    })?;

    Ok(ApiResponse::success(users))
}

fn parse_id(raw: &str, rejection: ApiError) -> Result<UserId, ApiError> {
    UserId::parse(raw).ok_or_else(|| {
        warn!(id = %raw, "Malformed user ID");
        rejection
    })
}

fn validation_error(errors: ValidationErrors) -> ApiError {
    warn!(error = %errors, "Validation failed");
    ApiError::bad_request(errors.message())
}

fn create_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::Conflict { field, .. } => {
            warn!(field = %field, error = %err, "User already exists");
            match field {
                UniqueField::Username => ApiError::forbidden("Username is already exist"),
                UniqueField::Email => ApiError::forbidden("Email is already exist"),
            }
        }
        _ => {
            error!(error = %err, "Failed to create user");
            ApiError::internal("Something went wrong")
        }
    }
}
