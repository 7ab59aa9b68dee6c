//! 处理器实例（HandlerInstance）
//!
//! 以组合方式为具体处理器提供订阅管理与分发入口：
//! - 构造时校验事件名（保留名、重复名）并一次性注册监听器；
//! - 监听器在构造时绑定一次，注销时按同一身份移除；
//! - 分发经由异常隔离边界，失败转为总线上的错误事件。
//!
//! 实例被丢弃时自动注销全部监听器；总线上的监听器只弱引用实例内部状态，
//! 即便注销前有分发已取到快照，也不会再进入被丢弃的处理器。
//!
use crate::boundary::Boundary;
use crate::config::DispatchConfig;
use crate::error::{HandlerError, HandlerResult};
use crate::handler::EventHandler;
use crate::lifecycle::LifecycleState;
use eventline_bus::{EventBus, Listener, Payload, events};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use tracing::debug;

pub(crate) struct Core<H> {
    pub(crate) bus: Arc<dyn EventBus>,
    pub(crate) handler: H,
    pub(crate) handled: Vec<String>,
    pub(crate) config: DispatchConfig,
    pub(crate) debug_log: AtomicBool,
    pub(crate) state: AtomicU8,
    pub(crate) registered: AtomicBool,
}

impl<H: EventHandler> Core<H> {
    fn on_event(&self, event: &str, payload: &Payload) {
        let handler = self.handler.handler_name();

        if self.debug_log.load(Ordering::Relaxed) {
            debug!(event, handler, "Enter handling event");
        }

        let boundary = Boundary {
            bus: self.bus.as_ref(),
            error_event: &self.config.error_event,
            handler,
        };
        boundary.contain(event, || self.handler.on_event(event, payload));

        if self.debug_log.load(Ordering::Relaxed) {
            debug!(event, handler, "Done handling event");
        }
    }

    pub(crate) fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_state(&self, state: LifecycleState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// 挂载在总线上的处理器实例
pub struct HandlerInstance<H: EventHandler> {
    pub(crate) core: Arc<Core<H>>,
    pub(crate) listener: Listener,
}

impl<H: EventHandler> HandlerInstance<H> {
    /// 以默认配置挂载处理器并订阅 `events`
    pub fn attach<I, S>(bus: Arc<dyn EventBus>, handler: H, events: I) -> HandlerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::attach_with_config(bus, handler, events, DispatchConfig::default())
    }

    /// 挂载处理器并订阅 `events`
    ///
    /// 事件名中含保留名或重复名时返回错误，且不会在总线上留下任何监听器。
    pub fn attach_with_config<I, S>(
        bus: Arc<dyn EventBus>,
        handler: H,
        events: I,
        config: DispatchConfig,
    ) -> HandlerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let core = Arc::new(Core {
            bus,
            handler,
            handled: events.into_iter().map(Into::into).collect(),
            debug_log: AtomicBool::new(config.debug_log),
            config,
            state: AtomicU8::new(LifecycleState::Constructed as u8),
            registered: AtomicBool::new(false),
        });

        let weak = Arc::downgrade(&core);
        let listener: Listener = Arc::new(move |event: &str, payload: &Payload| {
            if let Some(core) = weak.upgrade() {
                core.on_event(event, payload);
            }
        });

        let instance = Self { core, listener };
        instance.register_listeners()?;
        instance.core.set_state(LifecycleState::Active);

        Ok(instance)
    }

    /// 向总线注册全部处理事件
    ///
    /// 处理事件集为空时为空操作；已注册或已进入销毁流程时同样为空操作。
    pub fn register_listeners(&self) -> HandlerResult<()> {
        if !self.is_event_handler() {
            return Ok(());
        }

        validate_event_names(&self.core.handled)?;

        if self.core.state() >= LifecycleState::Destroying {
            debug!(handler = self.handler_name(), "handler destroyed, skip registration");
            return Ok(());
        }

        if self.core.registered.swap(true, Ordering::AcqRel) {
            debug!(handler = self.handler_name(), "listeners already registered");
            return Ok(());
        }

        for event in &self.core.handled {
            self.core.bus.on(event, self.listener.clone());
        }

        debug!(
            handler = self.handler_name(),
            events = ?self.core.handled,
            "listeners registered"
        );

        Ok(())
    }

    /// 从总线注销全部处理事件，未注册过的事件名为空操作
    pub fn unregister_listeners(&self) {
        if !self.is_event_handler() {
            return;
        }

        for event in &self.core.handled {
            self.core.bus.off(event, &self.listener);
        }
        self.core.registered.store(false, Ordering::Release);

        debug!(handler = self.handler_name(), "listeners unregistered");
    }

    /// 直接以分发入口处理一个事件（与总线回调走同一条路径）
    pub fn on_event(&self, event: &str, payload: &Payload) {
        self.core.on_event(event, payload);
    }

    pub fn set_debug_log_enabled(&self, enabled: bool) {
        self.core.debug_log.store(enabled, Ordering::Relaxed);
    }

    pub fn debug_log_enabled(&self) -> bool {
        self.core.debug_log.load(Ordering::Relaxed)
    }

    /// 是否为有效的分发目标（至少处理一个事件）
    pub fn is_event_handler(&self) -> bool {
        !self.core.handled.is_empty()
    }

    pub fn handled_events(&self) -> &[String] {
        &self.core.handled
    }

    pub fn handler(&self) -> &H {
        &self.core.handler
    }

    pub fn handler_name(&self) -> &str {
        self.core.handler.handler_name()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.core.config
    }

    pub fn bus(&self) -> &Arc<dyn EventBus> {
        &self.core.bus
    }
}

impl<H: EventHandler> fmt::Debug for HandlerInstance<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerInstance")
            .field("handler", &self.handler_name())
            .field("handled_events", &self.core.handled)
            .field("state", &self.state())
            .field("debug_log", &self.debug_log_enabled())
            .finish()
    }
}

impl<H: EventHandler> Drop for HandlerInstance<H> {
    fn drop(&mut self) {
        // 未调用 destroy 就丢弃时同样注销，不在总线上留下死监听器
        if self.core.registered.load(Ordering::Acquire) {
            self.unregister_listeners();
        }
    }
}

fn validate_event_names(handled: &[String]) -> HandlerResult<()> {
    let mut seen = HashSet::with_capacity(handled.len());
    for event in handled {
        if events::is_reserved(event) {
            return Err(HandlerError::ForbiddenEventName {
                event: event.clone(),
            });
        }
        if !seen.insert(event.as_str()) {
            return Err(HandlerError::DuplicateEventName {
                event: event.clone(),
            });
        }
    }
    Ok(())
}
