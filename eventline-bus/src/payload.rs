//! 事件载荷（Payload）
//!
//! 载荷形状由事件的发布方与处理方约定，总线只负责搬运。
//! 这里以 `Arc<dyn Any>` 做类型擦除，处理方在调用端按具体类型还原。
//!
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// 类型擦除的事件载荷，克隆只增加引用计数
#[derive(Clone)]
pub struct Payload {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Payload {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// 空载荷（`()`），用于只关心事件本身的场景
    pub fn empty() -> Self {
        Self::new(())
    }

    /// 按具体类型还原载荷，类型不符时返回 `None`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// 载荷的原始类型名（用于诊断信息）
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value)
    }
}
