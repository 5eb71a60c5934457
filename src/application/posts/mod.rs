//! Post lifecycle use-cases

pub mod dto;
pub mod service;

pub use dto::{CreatePostDto, DeletedPostDto, PostDto, UpdatePostDto};
pub use service::PostService;
