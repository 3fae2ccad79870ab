//! 统一错误处理 for CityRoute
//!
//! ## 设计理念
//!
//! 1. **硬错误与结构化结果分离**：
//!    - 错误的节点/边引用、非法请求、配置问题使用 `RouteError` 传播
//!    - 无路径、负权环、拒绝执行、组合实例不可行等情况作为结果字段返回，不视为错误
//!
//! 2. **统一接口**：`RouteResult<T>` 提供统一的返回类型，简化错误传播

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// 统一的引擎错误类型
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("节点不存在: {0}")]
    NodeNotFound(NodeId),

    #[error("边不存在: {0}")]
    EdgeNotFound(EdgeId),

    #[error("节点标签重复: {0}")]
    DuplicateLabel(String),

    #[error("非法请求: {0}")]
    InvalidRequest(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 统一的结果类型
pub type RouteResult<T> = Result<T, RouteError>;

impl RouteError {
    /// 是否为调用方引用了不存在的图元素
    pub fn is_missing_reference(&self) -> bool {
        matches!(self, RouteError::NodeNotFound(_) | RouteError::EdgeNotFound(_))
    }
}

// ==================== 外部错误转换实现 ====================

impl From<toml::de::Error> for RouteError {
    fn from(err: toml::de::Error) -> Self {
        RouteError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for RouteError {
    fn from(err: toml::ser::Error) -> Self {
        RouteError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for RouteError {
    fn from(err: serde_json::Error) -> Self {
        RouteError::Serialization(err.to_string())
    }
}

impl From<flexi_logger::FlexiLoggerError> for RouteError {
    fn from(err: flexi_logger::FlexiLoggerError) -> Self {
        RouteError::Internal(err.to_string())
    }
}
