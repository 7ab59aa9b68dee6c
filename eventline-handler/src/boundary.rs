//! 异常隔离边界
//!
//! 包住“解析 + 调用”整个过程：任何失败（含 panic）都会被记录日志，
//! 并以 `ReportedError` 载荷发布到总线的错误事件上，然后正常返回。
//! 失败不会沿调用栈向上传播，也不会中断总线对同名事件其他监听器的分发。
//!
use crate::error::DispatchError;
use crate::report::ReportedError;
use eventline_bus::{EventBus, Payload};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::error;

pub(crate) struct Boundary<'a> {
    pub(crate) bus: &'a dyn EventBus,
    pub(crate) error_event: &'a str,
    pub(crate) handler: &'a str,
}

impl Boundary<'_> {
    /// 执行分发并吞掉失败，返回值仅表示本次是否成功
    pub(crate) fn contain<F>(&self, event: &str, dispatch: F) -> bool
    where
        F: FnOnce() -> Result<(), DispatchError>,
    {
        let outcome = panic::catch_unwind(AssertUnwindSafe(dispatch)).unwrap_or_else(|panic| {
            Err(DispatchError::Panicked {
                event: event.to_string(),
                message: panic_message(panic.as_ref()),
            })
        });

        let Err(err) = outcome else {
            return true;
        };

        // 错误事件自身处理失败时只记录，不再回发
        let republished = event != self.error_event;

        error!(
            event,
            handler = self.handler,
            republished,
            error = %err,
            detail = ?err,
            "An internal error happened while handling event"
        );

        if republished {
            let report = ReportedError::internal_exception(err);
            self.bus.trigger(self.error_event, Payload::new(report));
        }

        false
    }
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
