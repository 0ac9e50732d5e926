//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use vellum_core::domain::NewUser;
use vellum_core::ports::{AuthError, PasswordService, TokenService};
use vellum_shared::dto::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    // Advisory pre-checks; the unique indexes cover racing registrations.
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::BadRequest("username already registered".to_string()));
    }
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::BadRequest("email already registered".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .insert(NewUser {
            username: req.username,
            email: req.email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "user registered");

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AuthError::InvalidCredentials.into());
    }

    let issued = token_service
        .issue_token(user.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(
        issued.token,
        token_service.lifetime_seconds(),
    )))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    // A valid token for a since-deleted user is still an invalid credential.
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
