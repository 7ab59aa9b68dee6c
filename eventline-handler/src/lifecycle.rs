//! 生命周期控制
//!
//! `Constructed → Active → Destroying → Destroyed`，单向、不可重入。
//! 销毁顺序：销毁前钩子 → 注销监听 → 销毁后钩子，每一步都不依赖上一步是否成功。
//!
use crate::boundary::panic_message;
use crate::handler::EventHandler;
use crate::instance::HandlerInstance;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use tracing::{debug, error};

/// 处理器实例的生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LifecycleState {
    Constructed = 0,
    Active = 1,
    Destroying = 2,
    Destroyed = 3,
}

impl LifecycleState {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => LifecycleState::Constructed,
            1 => LifecycleState::Active,
            2 => LifecycleState::Destroying,
            _ => LifecycleState::Destroyed,
        }
    }
}

impl<H: EventHandler> HandlerInstance<H> {
    pub fn state(&self) -> LifecycleState {
        self.core.state()
    }

    /// 销毁实例：调用销毁前钩子、注销全部监听、调用销毁后钩子
    ///
    /// 重复调用为空操作；正在进行中的分发会照常完成，只阻止之后的分发。
    pub fn destroy(&self) {
        if let Err(state) = self.core.state.compare_exchange(
            LifecycleState::Active as u8,
            LifecycleState::Destroying as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            debug!(
                handler = self.handler_name(),
                state = ?LifecycleState::from_u8(state),
                "destroy ignored"
            );
            return;
        }

        debug!(handler = self.handler_name(), "handler destroying");

        self.run_hook("on_handler_destroying", |h| h.on_handler_destroying());
        self.unregister_listeners();
        self.run_hook("on_handler_destroyed", |h| h.on_handler_destroyed());

        self.core.set_state(LifecycleState::Destroyed);
        debug!(handler = self.handler_name(), "handler destroyed");
    }

    fn run_hook(&self, hook: &'static str, f: impl FnOnce(&H)) {
        let handler = &self.core.handler;
        if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| f(handler))) {
            error!(
                handler = self.handler_name(),
                hook,
                panic = %panic_message(panic.as_ref()),
                "lifecycle hook panicked"
            );
        }
    }
}
