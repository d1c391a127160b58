//! 产品数据模型

use serde::{Deserialize, Serialize};
use serde_json::Number;
use validator::Validate;

/// 存储中的一行产品记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// 创建产品请求
///
/// `price` 必须存在且非 null，0 是合法价格；`name` 必须存在且非空。
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[serde(default, alias = "nome")]
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    pub name: Option<String>,

    /// 外层 `None` 表示字段缺失，`Some(None)` 表示显式 null
    #[serde(
        default,
        alias = "descricao",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,

    #[serde(default, alias = "preco")]
    #[validate(required(message = "price is required"))]
    pub price: Option<Number>,
}

/// 更新产品请求，三个字段整体覆盖，不做校验
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,

    #[serde(
        default,
        alias = "descricao",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,

    #[serde(default, alias = "preco")]
    pub price: Option<Number>,
}

/// 创建/更新后回显给调用方的产品
///
/// 请求中缺失的字段不会出现在回显里，`price` 保持提交时的数字形式。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductEcho {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
}

/// 写入 `produtos` 表的列值（nome, descricao, preco）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}
