//! # 产品目录服务
//!
//! 对单张 `produtos` 表提供增删改查的 HTTP 服务：
//! - `app`: 路由、处理器、业务服务与存储访问
//! - `core`: 统一错误类型与请求日志中间件
//! - `infrastructure`: MySQL 连接池与日志初始化
//! - `config`: 环境变量配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{build_router, AppState};
