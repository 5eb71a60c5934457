//! Application layer - use cases over the domain

pub mod posts;
pub mod transaction;

// Re-export key types for convenience
pub use posts::{CreatePostDto, DeletedPostDto, PostDto, PostService, UpdatePostDto};
