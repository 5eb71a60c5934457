//! Post DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{CreatePostDto, DeletedPostDto, PostDto, UpdatePostDto};
use crate::domain::PostId;
use crate::shared::Page;

/// Board post
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub post_id: PostId,
    pub title: String,
    pub content: String,
}

impl From<PostDto> for PostResponse {
    fn from(p: PostDto) -> Self {
        Self {
            post_id: p.post_id,
            title: p.title,
            content: p.content,
        }
    }
}

/// Confirmation of a delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletePostResponse {
    pub post_id: PostId,
}

impl From<DeletedPostDto> for DeletePostResponse {
    fn from(d: DeletedPostDto) -> Self {
        Self { post_id: d.post_id }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(max = 255, message = "title must be at most 255 characters"))]
    pub title: String,
    pub content: String,
}

impl From<CreatePostRequest> for CreatePostDto {
    fn from(r: CreatePostRequest) -> Self {
        Self {
            title: r.title,
            content: r.content,
        }
    }
}

/// Both fields are replaced
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[validate(length(max = 255, message = "title must be at most 255 characters"))]
    pub title: String,
    pub content: String,
}

impl From<UpdatePostRequest> for UpdatePostDto {
    fn from(r: UpdatePostRequest) -> Self {
        Self {
            title: r.title,
            content: r.content,
        }
    }
}

/// Paging parameters for the post list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostPageQuery {
    /// Page index, starting at 0. Default: 0
    pub page: Option<u64>,
    /// Page size. Default and maximum come from configuration
    pub size: Option<u64>,
    /// `property[,property...][,asc|desc]`, e.g. `title,desc`. Default: `postId`
    pub sort: Option<String>,
}

/// One page of posts
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostPageResponse {
    pub items: Vec<PostResponse>,
    /// Current page index (0-based)
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<Page<PostDto>> for PostPageResponse {
    fn from(page: Page<PostDto>) -> Self {
        Self {
            page: page.page_index,
            size: page.page_size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            items: page.items.into_iter().map(Into::into).collect(),
        }
    }
}
