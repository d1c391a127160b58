//! 产品业务服务
//!
//! 每个操作都是单次存储调用：校验 → 存储 → 结果映射。

use std::sync::Arc;

use serde_json::Number;
use tracing::{debug, info};
use validator::Validate;

use super::model::{CreateProductRequest, Product, ProductEcho, ProductFields, UpdateProductRequest};
use super::repository::ProductRepository;
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

/// 路径中的 id 转换为存储的 id 类型；无法解析的 id 不可能匹配任何行
fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

fn price_value(price: &Number) -> Result<f64, CoreError> {
    price
        .as_f64()
        .ok_or_else(|| CoreError::BadRequest("price must be a number".to_string()))
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        self.repository
            .list()
            .await
            .map_err(CoreError::store("failed to list products"))
    }

    pub async fn get_product(&self, raw_id: &str) -> Result<Product, CoreError> {
        let id = parse_id(raw_id).ok_or(CoreError::NotFound)?;
        self.repository
            .find(id)
            .await
            .map_err(CoreError::store("failed to fetch product"))?
            .ok_or(CoreError::NotFound)
    }

    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductEcho, CoreError> {
        debug!(?request, "create product");
        request.validate()?;

        let fields = ProductFields {
            name: request.name.clone(),
            description: request.description.clone().flatten(),
            price: request.price.as_ref().map(price_value).transpose()?,
        };
        let id = self
            .repository
            .insert(&fields)
            .await
            .map_err(CoreError::store("failed to create product"))?;

        info!("Created product {}", id);

        Ok(ProductEcho {
            id,
            name: request.name,
            description: request.description,
            price: request.price,
        })
    }

    /// 整体覆盖三个字段；受影响行数为 0 视为不存在
    pub async fn update_product(
        &self,
        raw_id: &str,
        request: UpdateProductRequest,
    ) -> Result<ProductEcho, CoreError> {
        let id = parse_id(raw_id).ok_or(CoreError::NotFound)?;

        let fields = ProductFields {
            name: request.name.clone(),
            description: request.description.clone().flatten(),
            price: request.price.as_ref().map(price_value).transpose()?,
        };
        let affected = self
            .repository
            .update(id, &fields)
            .await
            .map_err(CoreError::store("failed to update product"))?;

        if affected == 0 {
            return Err(CoreError::NotFound);
        }

        info!("Updated product {}", id);

        Ok(ProductEcho {
            id,
            name: request.name,
            description: request.description,
            price: request.price,
        })
    }

    pub async fn delete_product(&self, raw_id: &str) -> Result<(), CoreError> {
        let id = parse_id(raw_id).ok_or(CoreError::NotFound)?;
        let affected = self
            .repository
            .delete(id)
            .await
            .map_err(CoreError::store("failed to delete product"))?;

        if affected == 0 {
            return Err(CoreError::NotFound);
        }

        info!("Deleted product {}", id);
        Ok(())
    }

    pub async fn check_store(&self) -> Result<(), CoreError> {
        self.repository.ping().await.map_err(CoreError::Unavailable)
    }
}
