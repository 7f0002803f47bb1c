pub mod post;
pub mod reaction;
pub mod user;
