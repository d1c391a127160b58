//! 应用层

pub mod product;

use std::sync::Arc;

use axum::{extract::State, middleware, response::Json, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::core::{error::CoreError, middleware::request_logging_middleware};
use product::{repository::ProductRepository, service::ProductService};

/// 产品路由前缀，`/produtos` 保留旧客户端的路径
pub const PRODUCT_PREFIXES: [&str; 2] = ["/products", "/produtos"];

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            product_service: ProductService::new(repository),
        }
    }
}

/// 健康检查
async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, CoreError> {
    state.product_service.check_store().await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "database": "connected",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// 创建完整路由
pub fn build_router(state: AppState) -> Router {
    let router = PRODUCT_PREFIXES
        .iter()
        .fold(Router::new(), |router, prefix| product::routes(router, prefix));

    router
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}
