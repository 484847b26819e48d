pub mod companies;

use axum::{
    routing::{get, post},
    Json, Router,
};
use common::types::{EndpointInfo, ServiceBanner};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::errors::handle_panic;
use crate::state::ServerState;

/// Service banner plus the route listing.
pub async fn home() -> Json<ServiceBanner> {
    Json(ServiceBanner::ok(
        "Company registry API running",
        vec![
            EndpointInfo::new("/process-data", "POST"),
            EndpointInfo::new("/update-status", "POST"),
            EndpointInfo::new("/empresas", "GET"),
            EndpointInfo::new("/empresa/<tax_id>", "GET"),
            EndpointInfo::new("/empresa/<tax_id>", "DELETE"),
        ],
    ))
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/", get(home))
        .route("/process-data", post(companies::process_data))
        .route("/update-status", post(companies::update_status))
        .route("/empresas", get(companies::list))
        .route("/empresa/:tax_id", get(companies::get).delete(companies::delete))
        .with_state(state);
    with_middleware(api, cors)
}

/// Panic recovery, CORS and request tracing shared by every route.
pub fn with_middleware(router: Router, cors: CorsLayer) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::INTERNAL_ERROR_MESSAGE;
    use tokio::net::TcpListener;

    async fn explode() -> &'static str {
        panic!("handler exploded with secret detail")
    }

    #[tokio::test]
    async fn panicking_route_returns_opaque_500() -> anyhow::Result<()> {
        let app = with_middleware(
            Router::new().route("/explode", get(explode)).route("/", get(home)),
            CorsLayer::very_permissive(),
        );
        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
        });

        let res = reqwest::get(format!("http://{}/explode", addr)).await?;
        assert_eq!(res.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body = res.text().await?;
        assert!(!body.contains("secret detail"));
        let body: serde_json::Value = serde_json::from_str(&body)?;
        assert_eq!(body, serde_json::json!({"error": INTERNAL_ERROR_MESSAGE}));

        // the server keeps serving after a panic
        let res = reqwest::get(format!("http://{}/", addr)).await?;
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        Ok(())
    }
}
