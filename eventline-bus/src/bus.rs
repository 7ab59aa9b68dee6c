//! 事件总线（EventBus）协议
//!
//! 同步、进程内的发布/订阅抽象：
//! - `on`：按事件名注册监听器，同名可注册多个，按注册顺序调用；
//! - `off`：按监听器身份（`Arc` 指针）移除，不存在时为空操作；
//! - `trigger`：在调用方栈上依次同步调用当前全部监听器。
//!
use crate::payload::Payload;
use std::sync::Arc;

/// 监听器：接收 `(事件名, 载荷)`
///
/// 身份以 `Arc` 指针区分，注销时必须传入注册时的同一个 `Arc`。
pub type Listener = Arc<dyn Fn(&str, &Payload) + Send + Sync>;

/// 将闭包包装为 [`Listener`]
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&str, &Payload) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// 事件总线：负责注册、注销监听器与同步分发事件
pub trait EventBus: Send + Sync {
    /// 为 `event` 注册监听器
    fn on(&self, event: &str, listener: Listener);

    /// 注销此前以同一身份注册的监听器
    fn off(&self, event: &str, listener: &Listener);

    /// 同步分发事件到 `event` 的全部监听器
    fn trigger(&self, event: &str, payload: Payload);

    /// 当前注册在 `event` 下的监听器数量
    fn listener_count(&self, event: &str) -> usize;

    fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }
}
