pub mod admin;
pub mod auth;
pub mod post;
pub mod reaction;
