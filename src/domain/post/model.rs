//! Post domain entity

use std::str::FromStr;

use crate::shared::{DomainError, DomainResult, PageRequest};

/// Store-assigned post identifier
pub type PostId = i32;

/// Board post that has been persisted and therefore carries an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    post_id: PostId,
    title: String,
    content: String,
}

impl Post {
    pub fn builder() -> PostBuilder {
        PostBuilder::default()
    }

    /// Rebuild a post from its stored representation.
    pub fn from_stored(post_id: PostId, title: String, content: String) -> Self {
        Self {
            post_id,
            title,
            content,
        }
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace both title and content. The id never changes.
    pub fn update(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
    }

    pub fn into_parts(self) -> (PostId, String, String) {
        (self.post_id, self.title, self.content)
    }
}

/// Post that has not been saved yet (no id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct PostBuilder {
    title: Option<String>,
    content: Option<String>,
}

impl PostBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Both fields are required; empty strings are accepted.
    pub fn build(self) -> DomainResult<NewPost> {
        let title = self
            .title
            .ok_or_else(|| DomainError::Validation("title is required".to_string()))?;
        let content = self
            .content
            .ok_or_else(|| DomainError::Validation("content is required".to_string()))?;
        Ok(NewPost { title, content })
    }
}

/// Properties a post page can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortProperty {
    PostId,
    Title,
    Content,
}

impl FromStr for PostSortProperty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postId" | "post_id" | "id" => Ok(Self::PostId),
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            other => Err(DomainError::Validation(format!(
                "unknown sort property: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for PostSortProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PostId => write!(f, "postId"),
            Self::Title => write!(f, "title"),
            Self::Content => write!(f, "content"),
        }
    }
}

pub type PostPageRequest = PageRequest<PostSortProperty>;

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{SortDirection, SortOrder};

    #[test]
    fn builder_requires_title() {
        let err = Post::builder().content("body").build().unwrap_err();
        assert_eq!(err.to_string(), "Validation: title is required");
    }

    #[test]
    fn builder_requires_content() {
        let err = Post::builder().title("hello").build().unwrap_err();
        assert_eq!(err.to_string(), "Validation: content is required");
    }

    #[test]
    fn builder_accepts_empty_strings() {
        let new_post = Post::builder().title("").content("").build().unwrap();
        assert_eq!(new_post.title, "");
        assert_eq!(new_post.content, "");
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let mut post = Post::from_stored(3, "hello".into(), "world".into());
        post.update("bye", "moon");
        assert_eq!(post.post_id(), 3);
        assert_eq!(post.title(), "bye");
        assert_eq!(post.content(), "moon");
    }

    #[test]
    fn sort_property_aliases() {
        assert_eq!("postId".parse::<PostSortProperty>().unwrap(), PostSortProperty::PostId);
        assert_eq!("id".parse::<PostSortProperty>().unwrap(), PostSortProperty::PostId);
        assert!("author".parse::<PostSortProperty>().is_err());
    }

    #[test]
    fn parses_post_sort_text() {
        let orders = SortOrder::<PostSortProperty>::parse_all("title,desc").unwrap();
        assert_eq!(orders[0].property, PostSortProperty::Title);
        assert_eq!(orders[0].direction, SortDirection::Desc);
    }
}
