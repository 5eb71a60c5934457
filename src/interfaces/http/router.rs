//! API Router with Swagger UI

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::PostService;
use crate::config::PaginationConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::posts::{self as posts, PostsState};
use crate::interfaces::http::modules::request_id::request_id_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        posts::create_post,
        posts::list_posts,
        posts::get_post,
        posts::update_post,
        posts::delete_post,
    ),
    components(
        schemas(
            ApiResponse<String>,
            posts::PostResponse,
            posts::PostPageResponse,
            posts::DeletePostResponse,
            posts::CreatePostRequest,
            posts::UpdatePostRequest,
            health::HealthResponse,
            health::StorageHealth,
        )
    ),
    tags(
        (name = "Health", description = "Service and store health"),
        (name = "Posts", description = "Board post create, read, update and delete"),
    ),
    info(
        title = "Board Service API",
        version = "1.0.0",
        description = "REST API for board posts",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    service: Arc<PostService>,
    pagination: PaginationConfig,
    prometheus: PrometheusHandle,
) -> Router {
    let post_routes = Router::new()
        .route(
            "/api/v1/posts",
            get(posts::list_posts).post(posts::create_post),
        )
        .route(
            "/api/v1/posts/{post_id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .with_state(PostsState {
            service: service.clone(),
            pagination,
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState::new(service));

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState { handle: prometheus });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(post_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::InMemoryPostStore;

    fn app() -> Router {
        let service = Arc::new(PostService::new(Arc::new(InMemoryPostStore::new())));
        let handle = PrometheusBuilder::new().build_recorder().handle();
        create_api_router(service, PaginationConfig::default(), handle)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn create_update_delete_over_http() {
        let app = app();

        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/posts",
            Some(json!({"title": "hello", "content": "world"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(
            body["data"],
            json!({"postId": 1, "title": "hello", "content": "world"})
        );

        let (status, body) = call(
            &app,
            "PUT",
            "/api/v1/posts/1",
            Some(json!({"title": "bye", "content": "world"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!({"postId": 1, "title": "bye", "content": "world"})
        );

        let (status, body) = call(&app, "DELETE", "/api/v1/posts/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({"postId": 1}));

        let (status, body) = call(&app, "GET", "/api/v1/posts/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "no post found for this postId");
    }

    #[tokio::test]
    async fn list_returns_page_metadata() {
        let app = app();
        for i in 0..5 {
            call(
                &app,
                "POST",
                "/api/v1/posts",
                Some(json!({"title": format!("t{i}"), "content": "c"})),
            )
            .await;
        }

        let (status, body) = call(&app, "GET", "/api/v1/posts?page=0&size=2", None).await;
        assert_eq!(status, StatusCode::OK);
        let page = &body["data"];
        assert_eq!(page["items"].as_array().unwrap().len(), 2);
        assert_eq!(page["page"], 0);
        assert_eq!(page["size"], 2);
        assert_eq!(page["totalElements"], 5);
        assert_eq!(page["totalPages"], 3);

        let (_, body) = call(&app, "GET", "/api/v1/posts?sort=postId,desc&size=1", None).await;
        assert_eq!(body["data"]["items"][0]["postId"], 5);
    }

    #[tokio::test]
    async fn bad_page_input_is_bad_request() {
        let app = app();

        let (status, body) = call(&app, "GET", "/api/v1/posts?sort=author", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = call(&app, "GET", "/api/v1/posts?size=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = format!("/api/v1/posts?page={}", u64::MAX);
        let (status, body) = call(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let app = app();
        call(
            &app,
            "POST",
            "/api/v1/posts",
            Some(json!({"title": "only", "content": "one"})),
        )
        .await;

        let (status, body) =
            call(&app, "GET", "/api/v1/posts?page=1000000&size=20", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["items"].as_array().unwrap().is_empty());
        assert_eq!(body["data"]["totalElements"], 1);
        assert_eq!(body["data"]["totalPages"], 1);
    }

    #[tokio::test]
    async fn long_title_is_unprocessable() {
        let app = app();
        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/posts",
            Some(json!({"title": "x".repeat(256), "content": "c"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "title: title must be at most 255 characters");
    }

    #[tokio::test]
    async fn update_of_missing_post_is_not_found() {
        let app = app();
        let (status, _) = call(
            &app,
            "PUT",
            "/api/v1/posts/7",
            Some(json!({"title": "a", "content": "b"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_and_openapi_are_served() {
        let app = app();

        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = call(&app, "GET", "/api-doc/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/posts/{post_id}"].is_object());
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "trace-me")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.headers()["x-request-id"], "trace-me");
    }
}
