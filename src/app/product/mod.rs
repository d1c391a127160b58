//! 产品管理

pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

use axum::{routing::get, Router};

use crate::app::AppState;

/// 产品路由，挂载在给定前缀下（`/products` 与 `/produtos`）
pub fn routes(router: Router<AppState>, prefix: &str) -> Router<AppState> {
    router
        .route(
            prefix,
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            &format!("{prefix}/:id"),
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
}
