//! Post store interfaces

use async_trait::async_trait;

use super::model::{NewPost, Post, PostId, PostPageRequest};
use crate::shared::{InfraResult, Page};

/// Access mode requested when opening a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

/// Persistence for posts. All reads and writes go through a [`PostTx`].
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn begin(&self, mode: TxMode) -> InfraResult<Box<dyn PostTx>>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> InfraResult<()>;
}

/// Open store transaction.
///
/// Dropping a transaction without calling [`commit`](PostTx::commit) discards
/// every change made through it.
#[async_trait]
pub trait PostTx: Send {
    async fn save(&mut self, post: NewPost) -> InfraResult<Post>;
    async fn find_by_id(&mut self, post_id: PostId) -> InfraResult<Option<Post>>;
    async fn find_page(&mut self, request: &PostPageRequest) -> InfraResult<Page<Post>>;
    async fn update(&mut self, post: &Post) -> InfraResult<Post>;
    async fn delete(&mut self, post: &Post) -> InfraResult<()>;

    async fn commit(self: Box<Self>) -> InfraResult<()>;
    async fn rollback(self: Box<Self>) -> InfraResult<()>;
}
