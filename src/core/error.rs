//! 核心错误处理模块
//!
//! 所有处理器统一返回 [`CoreError`]，错误响应一律为纯文本。

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;
use validator::ValidationErrors;

use crate::app::product::repository::StoreError;

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    NotFound,
    /// 存储层错误，`context` 描述失败的操作
    Store {
        context: &'static str,
        source: StoreError,
    },
    /// 健康检查时存储不可达
    Unavailable(StoreError),
}

impl CoreError {
    /// 生成一个把 [`StoreError`] 包装为 [`CoreError::Store`] 的闭包，配合 `map_err` 使用
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> CoreError {
        move |source| CoreError::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound => StatusCode::NOT_FOUND,
            CoreError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            CoreError::BadRequest(msg) => msg,
            CoreError::NotFound => "Product not found".to_string(),
            CoreError::Store { context, source } => {
                // 内部细节只写日志，不返回给调用方
                error!(error = %source, "{}", context);
                "Internal server error".to_string()
            }
            CoreError::Unavailable(source) => {
                error!(error = %source, "health check failed");
                "Database unavailable".to_string()
            }
        };

        (status, message).into_response()
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(err: ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(_, errors)| {
                errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| "Validation error".to_string())
                })
            })
            .collect();
        // field_errors 是 HashMap，排序保证消息稳定
        messages.sort();

        CoreError::BadRequest(messages.join(", "))
    }
}
