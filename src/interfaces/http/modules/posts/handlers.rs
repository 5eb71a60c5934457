//! Post REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreatePostRequest, DeletePostResponse, PostPageQuery, PostPageResponse, PostResponse,
    UpdatePostRequest,
};
use crate::application::PostService;
use crate::config::PaginationConfig;
use crate::domain::{PostId, PostPageRequest};
use crate::interfaces::http::common::{error_response, ApiError, ApiResponse, ValidatedJson};
use crate::shared::{AppError, SortOrder};

/// Shared state of the post routes
#[derive(Clone)]
pub struct PostsState {
    pub service: Arc<PostService>,
    pub pagination: PaginationConfig,
}

/// Missing `size` takes the configured default, oversized ones the maximum.
fn page_request(query: &PostPageQuery, paging: PaginationConfig) -> Result<PostPageRequest, AppError> {
    let size = query
        .size
        .unwrap_or(paging.default_page_size)
        .min(paging.max_page_size);
    let sort = match query.sort.as_deref() {
        Some(text) => SortOrder::parse_all(text)?,
        None => Vec::new(),
    };
    Ok(PostPageRequest::new(query.page.unwrap_or(0), size, sort)?)
}

#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "Posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<PostResponse>),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Invalid field values")
    )
)]
pub async fn create_post(
    State(state): State<PostsState>,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponse>>), ApiError> {
    let created = state
        .service
        .create_post(request.into())
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(created.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "Posts",
    params(PostPageQuery),
    responses(
        (status = 200, description = "Page of posts", body = ApiResponse<PostPageResponse>),
        (status = 400, description = "Bad page size or sort")
    )
)]
pub async fn list_posts(
    State(state): State<PostsState>,
    Query(query): Query<PostPageQuery>,
) -> Result<Json<ApiResponse<PostPageResponse>>, ApiError> {
    let request = page_request(&query, state.pagination).map_err(error_response)?;
    let page = state
        .service
        .read_all_posts(&request)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post details", body = ApiResponse<PostResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_post(
    State(state): State<PostsState>,
    Path(post_id): Path<PostId>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let post = state
        .service
        .read_post_by_id(post_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(post.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = i32, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<PostResponse>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Invalid field values")
    )
)]
pub async fn update_post(
    State(state): State<PostsState>,
    Path(post_id): Path<PostId>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let updated = state
        .service
        .update_post(post_id, request.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(updated.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<DeletePostResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_post(
    State(state): State<PostsState>,
    Path(post_id): Path<PostId>,
) -> Result<Json<ApiResponse<DeletePostResponse>>, ApiError> {
    let deleted = state
        .service
        .delete_post(post_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(deleted.into())))
}
