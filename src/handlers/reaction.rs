// src/handlers/reaction.rs

//! HTTP surface of the Reaction Engine. All row and counter mutations
//! for one intent happen in a single transaction, with the post row
//! locked up front so concurrent intents against the same post are
//! serialized and lost updates are impossible.

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    engine::apply_intent,
    error::AppError,
    models::{post::PostIdParams, reaction::ReactionKind},
    utils::jwt::Claims,
};

/// Like a post. Repeating removes the like, a standing dislike is
/// replaced in one step.
pub async fn like_post(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<PostIdParams>,
) -> Result<impl IntoResponse, AppError> {
    apply_reaction(&pool, &claims, params.post_id, ReactionKind::Like).await
}

/// Dislike a post. Mirror image of `like_post`.
pub async fn dislike_post(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<PostIdParams>,
) -> Result<impl IntoResponse, AppError> {
    apply_reaction(&pool, &claims, params.post_id, ReactionKind::Dislike).await
}

async fn apply_reaction(
    pool: &PgPool,
    claims: &Claims,
    post_id: i64,
    intent: ReactionKind,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = claims.user_id()?;

    let mut tx = pool.begin().await?;

    // Lock the post row for the duration of the transaction. This
    // serializes concurrent intents on the same post: the reaction row
    // and both counters commit or roll back as one unit.
    let author_id = sqlx::query_scalar::<_, i64>(
        "SELECT author_id FROM posts WHERE id = $1 FOR UPDATE",
    )
    .bind(post_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound(format!(
        "Post with ID: {post_id} not found"
    )))?;

    if author_id == user_id {
        return Err(AppError::OwnPostReaction(format!(
            "You cannot {} your own post",
            intent.as_str()
        )));
    }

    let existing = sqlx::query_scalar::<_, String>(
        "SELECT reaction_type FROM reactions WHERE post_id = $1 AND user_id = $2",
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .map(|raw| {
        raw.parse::<ReactionKind>()
            .map_err(|e| AppError::Internal(e.to_string()))
    })
    .transpose()?;

    let transition = apply_intent(existing, intent);

    if existing.is_some() {
        sqlx::query("DELETE FROM reactions WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    if let Some(kind) = transition.next {
        sqlx::query("INSERT INTO reactions (post_id, user_id, reaction_type) VALUES ($1, $2, $3)")
            .bind(post_id)
            .bind(user_id)
            .bind(kind.as_str())
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("UPDATE posts SET likes = likes + $1, dislikes = dislikes + $2 WHERE id = $3")
        .bind(transition.likes_delta)
        .bind(transition.dislikes_delta)
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(Json(serde_json::json!({ "message": transition.message })))
}
