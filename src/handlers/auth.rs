// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, SignupRequest, SignupResponse, User},
    utils::{
        email::{EmailClient, EmailVerdict},
        hash::{hash_password, verify_password},
        jwt::{Claims, sign_jwt},
    },
};

/// Registers a new user.
///
/// Username and email must be globally unique. The email is checked
/// against the external verifier (fail-open) and enriched with
/// name/surname best-effort. The password is hashed with Argon2 before
/// storage. Returns 201 Created and the new user's public fields.
pub async fn signup(
    State(pool): State<PgPool>,
    State(email_client): State<EmailClient>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = SignupRequest {
        username: payload.username.trim().to_string(),
        ..payload
    };
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    // Uniqueness checks up front for precise error messages. The unique
    // indexes on users remain the backstop for concurrent signups.
    let username_taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
    )
    .bind(&payload.username)
    .fetch_one(&pool)
    .await?;

    if username_taken {
        return Err(AppError::Conflict(
            "The user with this username already exists in the system".to_string(),
        ));
    }

    let email_taken =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(&payload.email)
            .fetch_one(&pool)
            .await?;

    if email_taken {
        return Err(AppError::Conflict(
            "The user with this email already exists in the system".to_string(),
        ));
    }

    // External calls happen before the insert and outside any
    // transaction; only an explicit "invalid" verdict blocks signup.
    if email_client.verify(&payload.email).await == EmailVerdict::Invalid {
        return Err(AppError::Validation(
            "The specified email does not exist".to_string(),
        ));
    }

    let extra_fields = email_client.enrich(&payload.email).await;
    let (name, surname) = match extra_fields {
        Some(fields) => (Some(fields.name), Some(fields.surname)),
        None => (None, None),
    };

    let hashed_password = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, name, surname, password)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, username, email, name, surname, password, registration_date
        "#,
    )
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(&name)
    .bind(&surname)
    .bind(&hashed_password)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        // Postgres error code for unique violation is 23505
        if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
            AppError::Conflict("The user already exists in the system".to_string())
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            registration_date: user.registration_date,
        }),
    ))
}

/// Authenticates a user and returns an access token.
///
/// Verifies the username and password against the database. Unknown
/// user and wrong password produce the same error, so the response
/// does not reveal which usernames exist.
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.validate().is_err() {
        return Err(AppError::InvalidCredentials);
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, name, surname, password, registration_date
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(&payload.username)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::Internal(e.to_string())
    })?;

    let user = user.ok_or(AppError::InvalidCredentials)?;

    let is_valid = verify_password(&payload.password, &user.password)?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = sign_jwt(user.id, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "access_token": token,
        "token_type": "bearer"
    })))
}

/// Fetch the current logged-in user profile.
pub async fn me(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, name, surname, password, registration_date
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
