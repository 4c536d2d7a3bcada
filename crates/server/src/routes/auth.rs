use axum::{Extension, Json};
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use sqlx::PgPool;

use crate::auth::password;
use crate::db::users;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /api/register
pub async fn register(
    Extension(pool): Extension<PgPool>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let (username, email, pass) = match (&req.username, &req.email, &req.password) {
        (Some(u), Some(e), Some(p)) if !u.is_empty() && !e.is_empty() && !p.is_empty() => {
            (u, e, p)
        }
        _ => return Err(AppError::BadRequest("Missing fields".into())),
    };

    // Validate username
    if username.len() < 3 {
        return Err(AppError::BadRequest(
            "Username must be at least 3 characters".into(),
        ));
    }
    if username.len() > 20 {
        return Err(AppError::BadRequest(
            "Username must be at most 20 characters".into(),
        ));
    }
    let username_re = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
    if !username_re.is_match(username) {
        return Err(AppError::BadRequest(
            "Username can only contain letters, numbers, and underscores".into(),
        ));
    }

    // Validate password
    if pass.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".into(),
        ));
    }

    if users::username_exists(&pool, username).await? {
        return Err(AppError::BadRequest("Username already exists".into()));
    }

    let hash = password::hash_password(pass)
        .map_err(|e| AppError::Internal(format!("Password hash error: {e}")))?;

    let user_id = users::create_user(&pool, username, email, &hash).await?;
    tracing::info!("Registered user {} (id {})", username, user_id);

    Ok(Json(json!({ "message": "User registered successfully" })))
}

/// POST /api/login
pub async fn login(
    Extension(pool): Extension<PgPool>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let (username, pass) = match (&req.username, &req.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => return Err(AppError::BadRequest("Missing fields".into())),
    };

    let user = users::get_user_by_username(&pool, username)
        .await?
        .ok_or(AppError::BadRequest("Invalid credentials".into()))?;

    let valid = password::verify_password(pass, &user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verify error: {e}")))?;

    if !valid {
        return Err(AppError::BadRequest("Invalid credentials".into()));
    }

    Ok(Json(json!({
        "message": "Logged in successfully",
        "user": {
            "username": user.username,
            "email": user.email,
        },
    })))
}
