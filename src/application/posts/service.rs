//! Post lifecycle service — application-layer orchestration
//!
//! Every use-case runs in its own store transaction: writes open a
//! read-write transaction, reads a read-only one. HTTP handlers are thin
//! wrappers that delegate here.
//!
//! There is no version column, so two concurrent updates of the same post are
//! last-commit-wins.

use std::sync::Arc;

use tracing::{debug, info};

use super::dto::{CreatePostDto, DeletedPostDto, PostDto, UpdatePostDto};
use crate::application::transaction::finish;
use crate::domain::{DomainError, Post, PostId, PostPageRequest, PostStore, PostTx, TxMode};
use crate::shared::{AppError, AppResult, Page};

pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Liveness of the underlying store
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await?;
        Ok(())
    }

    // ── Create ──────────────────────────────────────────────────

    pub async fn create_post(&self, dto: CreatePostDto) -> AppResult<PostDto> {
        let new_post = Post::builder()
            .title(dto.title)
            .content(dto.content)
            .build()?;

        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let outcome = tx.save(new_post).await.map_err(AppError::from);
        let saved = finish(tx, outcome).await?;

        info!(post_id = saved.post_id(), "Post created");
        Ok(saved.into())
    }

    // ── Read ────────────────────────────────────────────────────

    pub async fn read_post_by_id(&self, post_id: PostId) -> AppResult<PostDto> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        let outcome = find_or_fail(tx.as_mut(), post_id).await;
        let post = finish(tx, outcome).await?;

        debug!(post_id, "Post read");
        Ok(post.into())
    }

    pub async fn read_all_posts(&self, request: &PostPageRequest) -> AppResult<Page<PostDto>> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        let outcome = tx.find_page(request).await.map_err(AppError::from);
        let page = finish(tx, outcome).await?;

        debug!(
            page = page.page_index,
            size = page.page_size,
            total = page.total_elements,
            "Post page read"
        );
        Ok(page.map(PostDto::from))
    }

    // ── Update ──────────────────────────────────────────────────

    /// Replace title and content of an existing post. The mutation is
    /// written explicitly before commit.
    pub async fn update_post(&self, post_id: PostId, dto: UpdatePostDto) -> AppResult<PostDto> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let outcome = apply_update(tx.as_mut(), post_id, dto).await;
        let updated = finish(tx, outcome).await?;

        info!(post_id, "Post updated");
        Ok(updated.into())
    }

    // ── Delete ──────────────────────────────────────────────────

    pub async fn delete_post(&self, post_id: PostId) -> AppResult<DeletedPostDto> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let outcome = apply_delete(tx.as_mut(), post_id).await;
        let deleted = finish(tx, outcome).await?;

        info!(post_id, "Post deleted");
        Ok(DeletedPostDto { post_id: deleted })
    }
}

async fn find_or_fail(tx: &mut dyn PostTx, post_id: PostId) -> AppResult<Post> {
    tx.find_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::PostNotFound { post_id }.into())
}

async fn apply_update(tx: &mut dyn PostTx, post_id: PostId, dto: UpdatePostDto) -> AppResult<Post> {
    let mut post = find_or_fail(tx, post_id).await?;
    post.update(dto.title, dto.content);
    Ok(tx.update(&post).await?)
}

async fn apply_delete(tx: &mut dyn PostTx, post_id: PostId) -> AppResult<PostId> {
    let post = find_or_fail(tx, post_id).await?;
    tx.delete(&post).await?;
    Ok(post.post_id())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::NewPost;
    use crate::infrastructure::InMemoryPostStore;
    use crate::shared::{InfraError, InfraResult, PageRequest};

    fn service() -> PostService {
        PostService::new(Arc::new(InMemoryPostStore::new()))
    }

    fn create(title: &str, content: &str) -> CreatePostDto {
        CreatePostDto {
            title: title.into(),
            content: content.into(),
        }
    }

    fn update(title: &str, content: &str) -> UpdatePostDto {
        UpdatePostDto {
            title: title.into(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn create_then_read_returns_same_fields() {
        let svc = service();
        let created = svc.create_post(create("hello", "world")).await.unwrap();

        let read = svc.read_post_by_id(created.post_id).await.unwrap();
        assert_eq!(read, created);
        assert_eq!(read.title, "hello");
        assert_eq!(read.content, "world");
    }

    #[tokio::test]
    async fn empty_fields_are_accepted() {
        let svc = service();
        let created = svc.create_post(create("", "")).await.unwrap();
        assert_eq!(created.title, "");
        assert_eq!(created.content, "");
    }

    #[tokio::test]
    async fn read_of_unknown_id_is_not_found() {
        let svc = service();
        let err = svc.read_post_by_id(42).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no post found for this postId");
    }

    #[tokio::test]
    async fn update_changes_fields_but_not_id() {
        let svc = service();
        let created = svc.create_post(create("hello", "world")).await.unwrap();

        let updated = svc
            .update_post(created.post_id, update("bye", "moon"))
            .await
            .unwrap();
        assert_eq!(updated.post_id, created.post_id);
        assert_eq!(updated.title, "bye");
        assert_eq!(updated.content, "moon");

        let read = svc.read_post_by_id(created.post_id).await.unwrap();
        assert_eq!(read, updated);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found_and_mutates_nothing() {
        let svc = service();
        let existing = svc.create_post(create("hello", "world")).await.unwrap();

        let err = svc.update_post(99, update("bye", "moon")).await.unwrap_err();
        assert!(err.is_not_found());

        let page = svc
            .read_all_posts(&PageRequest::of(0, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(page.items, vec![existing]);
    }

    #[tokio::test]
    async fn delete_removes_post() {
        let svc = service();
        let created = svc.create_post(create("hello", "world")).await.unwrap();

        let deleted = svc.delete_post(created.post_id).await.unwrap();
        assert_eq!(deleted.post_id, created.post_id);

        let err = svc.read_post_by_id(created.post_id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_not_found() {
        let svc = service();
        svc.create_post(create("keep", "me")).await.unwrap();

        let err = svc.delete_post(2).await.unwrap_err();
        assert!(err.is_not_found());

        let page = svc
            .read_all_posts(&PageRequest::of(0, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total_elements, 1);
    }

    #[tokio::test]
    async fn first_page_of_five_holds_two_items() {
        let svc = service();
        for i in 0..5 {
            svc.create_post(create(&format!("title {i}"), "body"))
                .await
                .unwrap();
        }

        let page = svc
            .read_all_posts(&PageRequest::of(0, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].post_id, 1);
    }

    #[tokio::test]
    async fn create_update_delete_scenario() {
        let svc = service();

        let created = svc.create_post(create("hello", "world")).await.unwrap();
        assert_eq!(
            created,
            PostDto {
                post_id: 1,
                title: "hello".into(),
                content: "world".into()
            }
        );

        let updated = svc.update_post(1, update("bye", "world")).await.unwrap();
        assert_eq!(
            updated,
            PostDto {
                post_id: 1,
                title: "bye".into(),
                content: "world".into()
            }
        );

        let deleted = svc.delete_post(1).await.unwrap();
        assert_eq!(deleted, DeletedPostDto { post_id: 1 });

        assert!(svc.read_post_by_id(1).await.unwrap_err().is_not_found());
    }

    // ── Failure propagation ─────────────────────────────────────

    /// Store whose writes fail, counting how transactions end.
    #[derive(Default)]
    struct BrokenStore {
        commits: Arc<AtomicUsize>,
        rollbacks: Arc<AtomicUsize>,
    }

    struct BrokenTx {
        commits: Arc<AtomicUsize>,
        rollbacks: Arc<AtomicUsize>,
    }

    fn broken() -> InfraError {
        InfraError::Database(sea_orm::DbErr::Custom("connection reset".into()))
    }

    #[async_trait]
    impl PostStore for BrokenStore {
        async fn begin(&self, _mode: TxMode) -> InfraResult<Box<dyn PostTx>> {
            Ok(Box::new(BrokenTx {
                commits: self.commits.clone(),
                rollbacks: self.rollbacks.clone(),
            }))
        }

        async fn ping(&self) -> InfraResult<()> {
            Err(broken())
        }
    }

    #[async_trait]
    impl PostTx for BrokenTx {
        async fn save(&mut self, _post: NewPost) -> InfraResult<Post> {
            Err(broken())
        }

        async fn find_by_id(&mut self, post_id: PostId) -> InfraResult<Option<Post>> {
            Ok(Some(Post::from_stored(post_id, "t".into(), "c".into())))
        }

        async fn find_page(&mut self, _request: &PostPageRequest) -> InfraResult<Page<Post>> {
            Err(broken())
        }

        async fn update(&mut self, _post: &Post) -> InfraResult<Post> {
            Err(broken())
        }

        async fn delete(&mut self, _post: &Post) -> InfraResult<()> {
            Err(broken())
        }

        async fn commit(self: Box<Self>) -> InfraResult<()> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> InfraResult<()> {
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn store_failures_propagate_and_roll_back() {
        let store = BrokenStore::default();
        let commits = store.commits.clone();
        let rollbacks = store.rollbacks.clone();
        let svc = PostService::new(Arc::new(store));

        let err = svc.create_post(create("a", "b")).await.unwrap_err();
        assert!(matches!(err, AppError::Infra(InfraError::Database(_))));

        let err = svc.update_post(1, update("a", "b")).await.unwrap_err();
        assert!(matches!(err, AppError::Infra(_)));

        let err = svc.delete_post(1).await.unwrap_err();
        assert!(matches!(err, AppError::Infra(_)));

        assert_eq!(rollbacks.load(Ordering::SeqCst), 3);
        assert_eq!(commits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_read_commits() {
        let store = BrokenStore::default();
        let commits = store.commits.clone();
        let svc = PostService::new(Arc::new(store));

        let post = svc.read_post_by_id(5).await.unwrap();
        assert_eq!(post.post_id, 5);
        assert_eq!(commits.load(Ordering::SeqCst), 1);
        assert!(svc.ping().await.is_err());
    }
}
