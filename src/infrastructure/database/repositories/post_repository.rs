//! SeaORM implementation of PostStore

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::{
    AccessMode, ActiveModelTrait,
    ActiveValue::{NotSet, Unchanged},
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction, EntityTrait, Order,
    PaginatorTrait, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

use crate::domain::{
    NewPost, Post, PostId, PostPageRequest, PostSortProperty, PostStore, PostTx, TxMode,
};
use crate::infrastructure::database::entities::post;
use crate::shared::{InfraResult, Page, SortDirection};

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(p: post::Model) -> Post {
    Post::from_stored(p.post_id, p.title, p.content)
}

fn sort_column(property: PostSortProperty) -> post::Column {
    match property {
        PostSortProperty::PostId => post::Column::PostId,
        PostSortProperty::Title => post::Column::Title,
        PostSortProperty::Content => post::Column::Content,
    }
}

fn sort_order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

fn apply_sort(mut query: Select<post::Entity>, request: &PostPageRequest) -> Select<post::Entity> {
    let mut has_id = false;
    for order in &request.sort {
        has_id |= order.property == PostSortProperty::PostId;
        query = query.order_by(sort_column(order.property), sort_order(order.direction));
    }
    // Ties on title/content need a stable order so pages never overlap.
    if !has_id {
        query = query.order_by_asc(post::Column::PostId);
    }
    query
}

// ── SeaOrmPostStore ─────────────────────────────────────────────

pub struct SeaOrmPostStore {
    db: DatabaseConnection,
}

impl SeaOrmPostStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for SeaOrmPostStore {
    async fn begin(&self, mode: TxMode) -> InfraResult<Box<dyn PostTx>> {
        // SQLite has no per-transaction access mode; asking for one only logs a warning.
        let access_mode = match (mode, self.db.get_database_backend()) {
            (_, DatabaseBackend::Sqlite) => None,
            (TxMode::ReadOnly, _) => Some(AccessMode::ReadOnly),
            (TxMode::ReadWrite, _) => Some(AccessMode::ReadWrite),
        };
        let txn = self.db.begin_with_config(None, access_mode).await?;
        Ok(Box::new(SeaOrmPostTx { txn }))
    }

    async fn ping(&self) -> InfraResult<()> {
        self.db.ping().await?;
        Ok(())
    }
}

// ── SeaOrmPostTx ────────────────────────────────────────────────

/// Wraps a `DatabaseTransaction`, which rolls back when dropped uncommitted.
pub struct SeaOrmPostTx {
    txn: DatabaseTransaction,
}

#[async_trait]
impl PostTx for SeaOrmPostTx {
    async fn save(&mut self, new_post: NewPost) -> InfraResult<Post> {
        let model = post::ActiveModel {
            post_id: NotSet,
            title: Set(new_post.title),
            content: Set(new_post.content),
        };
        let result = model.insert(&self.txn).await?;
        info!("Post saved: {}", result.post_id);
        Ok(entity_to_domain(result))
    }

    async fn find_by_id(&mut self, post_id: PostId) -> InfraResult<Option<Post>> {
        let model = post::Entity::find_by_id(post_id).one(&self.txn).await?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_page(&mut self, request: &PostPageRequest) -> InfraResult<Page<Post>> {
        let query = apply_sort(post::Entity::find(), request);

        let total = query.clone().count(&self.txn).await?;
        let models = query
            .offset(request.offset())
            .limit(request.page_size)
            .all(&self.txn)
            .await?;
        debug!(
            "Fetched post page {} (size {}): {} of {} posts",
            request.page_index,
            request.page_size,
            models.len(),
            total
        );

        let items = models.into_iter().map(entity_to_domain).collect();
        Ok(Page::new(items, request.page_index, request.page_size, total))
    }

    async fn update(&mut self, post: &Post) -> InfraResult<Post> {
        let model = post::ActiveModel {
            post_id: Unchanged(post.post_id()),
            title: Set(post.title().to_string()),
            content: Set(post.content().to_string()),
        };
        let result = model.update(&self.txn).await?;
        info!("Post updated: {}", result.post_id);
        Ok(entity_to_domain(result))
    }

    async fn delete(&mut self, post: &Post) -> InfraResult<()> {
        let result = post::Entity::delete_by_id(post.post_id())
            .exec(&self.txn)
            .await?;
        info!(
            "Post deleted: {} ({} rows)",
            post.post_id(),
            result.rows_affected
        );
        Ok(())
    }

    async fn commit(self: Box<Self>) -> InfraResult<()> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> InfraResult<()> {
        self.txn.rollback().await?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
