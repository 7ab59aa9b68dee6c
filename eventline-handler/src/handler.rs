//! 事件处理器（EventHandler）
//!
//! 具体组件实现该 trait 并通过组合挂载到 `HandlerInstance` 上，
//! 由实例负责订阅、分发、异常隔离与生命周期。
//!
use crate::error::DispatchError;
use crate::routes::RouteTable;
use eventline_bus::Payload;
use std::any::type_name;

/// 事件处理器
pub trait EventHandler: RouteTable + Send + Sync {
    /// 处理器名称（用于日志与错误信息），默认取类型名（不含模块路径）
    fn handler_name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// 分发入口：默认按命名约定查路由表调用对应方法
    ///
    /// 需要改变路由方式时覆写此方法即可，订阅与异常隔离不受影响。
    fn on_event(&self, event: &str, payload: &Payload) -> Result<(), DispatchError> {
        Self::routes().dispatch(self, self.handler_name(), event, payload)
    }

    /// 销毁前钩子（注销监听之前）
    fn on_handler_destroying(&self) {}

    /// 销毁后钩子（注销监听之后）
    fn on_handler_destroyed(&self) {}
}

pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let head_end = full.find('<').unwrap_or(full.len());
    let start = full[..head_end].rfind("::").map(|i| i + 2).unwrap_or(0);
    &full[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    mod player {
        pub struct StreamController;
        pub struct Wrapper<T>(pub T);
    }

    struct Probe {
        seen: std::sync::Mutex<Vec<u32>>,
    }

    #[eventline_macros::event_routes(prefix = "x")]
    impl Probe {
        fn on_level_switched(&self, level: &u32) {
            self.seen.lock().unwrap().push(*level);
        }
    }

    impl EventHandler for Probe {}

    #[test]
    fn default_entry_point_dispatches_through_routes() {
        let probe = Probe {
            seen: Default::default(),
        };
        probe.on_event("xLevelSwitched", &Payload::new(3_u32)).unwrap();
        assert_eq!(*probe.seen.lock().unwrap(), vec![3]);
        assert_eq!(probe.handler_name(), "Probe");

        let err = probe.on_event("xLevelLoaded", &Payload::new(3_u32)).unwrap_err();
        assert!(err.is_resolution());
    }

    #[test]
    fn short_type_name_strips_module_path() {
        assert_eq!(short_type_name::<player::StreamController>(), "StreamController");
        assert_eq!(short_type_name::<u32>(), "u32");
        assert!(short_type_name::<player::Wrapper<player::StreamController>>().starts_with("Wrapper<"));
    }
}
