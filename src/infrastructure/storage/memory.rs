//! In-memory post store

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{
    NewPost, Post, PostId, PostPageRequest, PostSortProperty, PostStore, PostTx, TxMode,
};
use crate::shared::{InfraResult, Page, SortDirection, SortOrder};

#[derive(Debug, Clone)]
struct MemoryState {
    posts: BTreeMap<PostId, Post>,
    next_id: PostId,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            posts: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory storage for development and testing
///
/// Transactions are serialised: each one holds the store lock until it is
/// committed, rolled back, or dropped.
#[derive(Clone, Default)]
pub struct InMemoryPostStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn begin(&self, mode: TxMode) -> InfraResult<Box<dyn PostTx>> {
        let guard = self.state.clone().lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(InMemoryPostTx {
            guard,
            working,
            read_only: mode == TxMode::ReadOnly,
        }))
    }

    async fn ping(&self) -> InfraResult<()> {
        Ok(())
    }
}

/// Works on a private copy of the state; `commit` publishes it.
pub struct InMemoryPostTx {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
    read_only: bool,
}

fn compare(a: &Post, b: &Post, sort: &[SortOrder<PostSortProperty>]) -> Ordering {
    for order in sort {
        let ord = match order.property {
            PostSortProperty::PostId => a.post_id().cmp(&b.post_id()),
            PostSortProperty::Title => a.title().cmp(b.title()),
            PostSortProperty::Content => a.content().cmp(b.content()),
        };
        let ord = match order.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.post_id().cmp(&b.post_id())
}

#[async_trait]
impl PostTx for InMemoryPostTx {
    async fn save(&mut self, new_post: NewPost) -> InfraResult<Post> {
        let post_id = self.working.next_id;
        self.working.next_id += 1;
        let post = Post::from_stored(post_id, new_post.title, new_post.content);
        self.working.posts.insert(post_id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&mut self, post_id: PostId) -> InfraResult<Option<Post>> {
        Ok(self.working.posts.get(&post_id).cloned())
    }

    async fn find_page(&mut self, request: &PostPageRequest) -> InfraResult<Page<Post>> {
        let mut posts: Vec<&Post> = self.working.posts.values().collect();
        posts.sort_by(|a, b| compare(a, b, &request.sort));

        let total = posts.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.page_size).unwrap_or(usize::MAX);
        let items = posts
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(Page::new(items, request.page_index, request.page_size, total))
    }

    async fn update(&mut self, post: &Post) -> InfraResult<Post> {
        self.working.posts.insert(post.post_id(), post.clone());
        Ok(post.clone())
    }

    async fn delete(&mut self, post: &Post) -> InfraResult<()> {
        self.working.posts.remove(&post.post_id());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> InfraResult<()> {
        let InMemoryPostTx {
            mut guard,
            working,
            read_only,
        } = *self;
        if !read_only {
            *guard = working;
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> InfraResult<()> {
        Ok(())
    }
}
