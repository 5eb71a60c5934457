pub mod post;

// Re-export commonly used types
pub use post::{
    NewPost, Post, PostBuilder, PostId, PostPageRequest, PostSortProperty, PostStore, PostTx,
    TxMode,
};

pub use crate::shared::{DomainError, DomainResult};
