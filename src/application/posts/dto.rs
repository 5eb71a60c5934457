//! Inputs and projections of the post use-cases

use crate::domain::{Post, PostId};

#[derive(Debug, Clone)]
pub struct CreatePostDto {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct UpdatePostDto {
    pub title: String,
    pub content: String,
}

/// Read-side projection returned by every post use-case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDto {
    pub post_id: PostId,
    pub title: String,
    pub content: String,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        let (post_id, title, content) = post.into_parts();
        Self {
            post_id,
            title,
            content,
        }
    }
}

/// Confirmation of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletedPostDto {
    pub post_id: PostId,
}
