// src/handlers/admin.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::error::AppError;

/// Recompute every post's like/dislike counters from the reactions
/// table. Maintenance path for when the counters are suspected to have
/// drifted; the reaction transaction keeps them in sync in normal
/// operation.
pub async fn reconcile_counters(
    State(pool): State<PgPool>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE posts p
        SET likes = agg.likes,
            dislikes = agg.dislikes
        FROM (
            SELECT p2.id,
                   CAST(COUNT(r.id) FILTER (WHERE r.reaction_type = 'like') AS INT) AS likes,
                   CAST(COUNT(r.id) FILTER (WHERE r.reaction_type = 'dislike') AS INT) AS dislikes
            FROM posts p2
            LEFT JOIN reactions r ON r.post_id = p2.id
            GROUP BY p2.id
        ) agg
        WHERE agg.id = p.id
          AND (p.likes <> agg.likes OR p.dislikes <> agg.dislikes)
        "#,
    )
    .execute(&pool)
    .await?;

    let reconciled = result.rows_affected();
    if reconciled > 0 {
        tracing::warn!("Reconciled counters on {} posts", reconciled);
    }

    Ok(Json(serde_json::json!({ "reconciled": reconciled })))
}
