// src/models/post.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Maximum post length in characters, after trimming.
pub const MAX_POST_LEN: usize = 560;

/// A post joined with its author's username, as returned by the API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub publication_date: chrono::NaiveDate,
    pub likes: i32,
    pub dislikes: i32,
}

/// DTO for creating a new post.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
}

/// DTO for editing an existing post.
#[derive(Debug, Deserialize)]
pub struct EditPostRequest {
    pub post_id: i64,
    pub text: String,
}

/// Query parameters for delete/like/dislike, which address a post by id.
#[derive(Debug, Deserialize)]
pub struct PostIdParams {
    pub post_id: i64,
}

/// Trims the text and enforces the 1..=560 character bound.
/// Returns the trimmed text that should be stored.
pub fn validate_post_text(text: &str) -> Result<String, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "Post text must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_POST_LEN {
        return Err(AppError::Validation(format!(
            "Post text must be at most {} characters",
            MAX_POST_LEN
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validate_post_text("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn rejects_empty_and_whitespace_only_text() {
        assert!(validate_post_text("").is_err());
        assert!(validate_post_text("   \n\t ").is_err());
    }

    #[test]
    fn accepts_text_at_the_limit() {
        let text = "x".repeat(MAX_POST_LEN);
        assert_eq!(validate_post_text(&text).unwrap(), text);
    }

    #[test]
    fn rejects_text_over_the_limit() {
        let text = "x".repeat(MAX_POST_LEN + 1);
        assert!(validate_post_text(&text).is_err());
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        // 560 multi-byte characters are within bounds.
        let text = "é".repeat(MAX_POST_LEN);
        assert!(validate_post_text(&text).is_ok());
    }
}
