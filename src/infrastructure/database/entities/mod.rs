//! Database entities module

pub mod post;

pub use post::Entity as Post;
