//! 错误报告（ReportedError）
//!
//! 分发失败后发布到总线上的载荷。只承载“类别 + 细节 + 是否致命 + 错误对象”，
//! 完整的错误分类体系不在本 crate 范围内。
//!
use crate::error::DispatchError;
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// 错误类别
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "otherError")]
    Other,
}

/// 错误细节
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorDetails {
    #[serde(rename = "internalException")]
    InternalException,
}

/// 分发失败报告
#[derive(Debug, Clone, Serialize)]
pub struct ReportedError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub details: ErrorDetails,
    pub fatal: bool,
    /// 出错时正在处理的事件名
    pub event: String,
    #[serde(rename = "err", serialize_with = "serialize_display")]
    pub error: Arc<DispatchError>,
}

impl ReportedError {
    /// 处理器内部异常：`Other / InternalException`，非致命
    pub fn internal_exception(error: DispatchError) -> Self {
        Self {
            kind: ErrorKind::Other,
            details: ErrorDetails::InternalException,
            fatal: false,
            event: error.event().to_string(),
            error: Arc::new(error),
        }
    }
}

fn serialize_display<S: Serializer>(error: &Arc<DispatchError>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error.as_ref())
}
