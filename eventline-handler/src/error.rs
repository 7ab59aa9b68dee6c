//! 事件处理器错误定义
//!
//! 两类错误严格分开：
//! - [`HandlerError`]：构造期错误（配置/编程缺陷），直接返回给构造方；
//! - [`DispatchError`]：分发期错误，由隔离边界捕获并转为总线上的非致命错误事件，
//!   永远不会抛回给总线的调用方。
//!
use thiserror::Error;

/// 构造期错误
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Forbidden event-name: {event}")]
    ForbiddenEventName { event: String },

    #[error("duplicate event-name: {event}")]
    DuplicateEventName { event: String },
}

/// 构造期 Result 别名
pub type HandlerResult<T> = Result<T, HandlerError>;

/// 分发期错误
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("event {event} has no generic handler in this {handler} class (tried {method})")]
    MissingHandler {
        event: String,
        method: String,
        handler: String,
    },

    #[error("payload type mismatch for event {event}: expected={expected}, found={found}")]
    PayloadMismatch {
        event: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("handler failed on event {event}: {source}")]
    Handler {
        event: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("handler panicked on event {event}: {message}")]
    Panicked { event: String, message: String },
}

impl DispatchError {
    /// 出错时正在处理的事件名
    pub fn event(&self) -> &str {
        match self {
            DispatchError::MissingHandler { event, .. }
            | DispatchError::PayloadMismatch { event, .. }
            | DispatchError::Handler { event, .. }
            | DispatchError::Panicked { event, .. } => event,
        }
    }

    /// 是否为解析失败（找不到处理方法）
    pub fn is_resolution(&self) -> bool {
        matches!(self, DispatchError::MissingHandler { .. })
    }
}
