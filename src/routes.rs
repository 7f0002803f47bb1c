// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, post as post_handlers, reaction},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, posts, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config, Email Client).
pub fn create_router(state: AppState) -> Router {
    let origins: [axum::http::HeaderValue; 2] = [
        "http://localhost".parse().unwrap(),
        "http://127.0.0.1".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    // Protected routes first, then route_layer so the auth middleware
    // only guards them; public routes are added after.
    let auth_routes = Router::new()
        .route("/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login));

    let post_routes = Router::new()
        .route("/", post(post_handlers::create_post))
        .route("/", put(post_handlers::edit_post))
        .route("/", delete(post_handlers::delete_post))
        .route("/like", post(reaction::like_post))
        .route("/dislike", post(reaction::dislike_post))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .route("/", get(post_handlers::list_posts));

    let admin_routes = Router::new()
        .route("/reconcile", post(admin::reconcile_counters))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api_v1/auth", auth_routes)
        .nest("/api_v1/posts", post_routes)
        .nest("/api_v1/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
