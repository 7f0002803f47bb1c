// src/handlers/post.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::post::{CreatePostRequest, EditPostRequest, Post, PostIdParams, validate_post_text},
    utils::jwt::Claims,
};

/// List all posts, newest first, with author usernames.
pub async fn list_posts(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.text, u.username AS author, p.publication_date, p.likes, p.dislikes
        FROM posts p
        JOIN users u ON p.author_id = u.id
        ORDER BY p.id DESC
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list posts: {:?}", e);
        AppError::Internal(e.to_string())
    })?;

    Ok(Json(posts))
}

/// Create a new post authored by the current user.
pub async fn create_post(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let text = validate_post_text(&payload.text)?;
    let user_id = claims.user_id()?;

    let post = sqlx::query_as::<_, Post>(
        r#"
        WITH inserted AS (
            INSERT INTO posts (text, author_id)
            VALUES ($1, $2)
            RETURNING id, text, author_id, publication_date, likes, dislikes
        )
        SELECT p.id, p.text, u.username AS author, p.publication_date, p.likes, p.dislikes
        FROM inserted p
        JOIN users u ON p.author_id = u.id
        "#,
    )
    .bind(&text)
    .bind(user_id)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create post: {:?}", e);
        AppError::Internal(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Edit a post's text. Only the author may edit their own post.
pub async fn edit_post(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<EditPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let text = validate_post_text(&payload.text)?;
    let user_id = claims.user_id()?;

    // Lock the post row so the author check and the update commit as
    // one unit; a concurrent delete cannot sneak in between them.
    let mut tx = pool.begin().await?;

    let author_id = fetch_author_id(&mut tx, payload.post_id).await?;
    if author_id != user_id {
        return Err(AppError::Forbidden(
            "Access denied. You can only modify your own posts.".to_string(),
        ));
    }

    let post = sqlx::query_as::<_, Post>(
        r#"
        WITH updated AS (
            UPDATE posts SET text = $1
            WHERE id = $2
            RETURNING id, text, author_id, publication_date, likes, dislikes
        )
        SELECT p.id, p.text, u.username AS author, p.publication_date, p.likes, p.dislikes
        FROM updated p
        JOIN users u ON p.author_id = u.id
        "#,
    )
    .bind(&text)
    .bind(payload.post_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Json(post))
}

/// Delete a post. Only the author may delete their own post.
/// Reactions referencing the post are removed by the FK cascade.
pub async fn delete_post(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<PostIdParams>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let mut tx = pool.begin().await?;

    let author_id = fetch_author_id(&mut tx, params.post_id).await?;
    if author_id != user_id {
        return Err(AppError::Forbidden(
            "Access denied. You can only delete your own posts.".to_string(),
        ));
    }

    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(params.post_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete post: {:?}", e);
            AppError::Internal(e.to_string())
        })?;

    tx.commit().await?;

    Ok(Json(serde_json::json!({
        "message": format!("Post with ID: {} successfully deleted", params.post_id)
    })))
}

/// Looks up the post's author inside the caller's transaction, taking
/// a row lock so the post cannot change or vanish before the caller's
/// mutation commits. A missing post is `NotFound`.
async fn fetch_author_id(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    post_id: i64,
) -> Result<i64, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT author_id FROM posts WHERE id = $1 FOR UPDATE")
        .bind(post_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(AppError::NotFound(format!(
            "Post with ID: {post_id} not found"
        )))
}
