// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Unique email address.
    pub email: String,

    /// First name, filled best-effort from the enrichment service.
    pub name: Option<String>,

    /// Last name, filled best-effort from the enrichment service.
    pub surname: Option<String>,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub registration_date: chrono::NaiveDate,
}

/// DTO for creating a new user (Signup).
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(
        min = 4,
        max = 20,
        message = "Username length must be between 4 and 20 characters."
    ))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,

    #[validate(email(message = "Email address is not valid."))]
    pub email: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 20))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Response body for a successful signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub registration_date: chrono::NaiveDate,
}

/// Extra fields (name, surname) fetched from the person enrichment API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraUserFields {
    pub name: String,
    pub surname: String,
}
