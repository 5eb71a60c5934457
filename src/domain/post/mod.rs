//! Post aggregate
//!
//! The board's single entity, its builder, and the store it is persisted through.

pub mod model;
pub mod repository;

pub use model::{NewPost, Post, PostBuilder, PostId, PostPageRequest, PostSortProperty};
pub use repository::{PostStore, PostTx, TxMode};
