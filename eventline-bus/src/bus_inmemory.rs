//! 内存版事件总线（InMemoryEventBus）
//!
//! 基于 `DashMap` 的同步总线，满足 `EventBus` 协议：
//! - `on`：按事件名追加监听器，保持注册顺序；
//! - `off`：按 `Arc` 指针身份移除一个监听器；
//! - `trigger`：先对监听器列表做快照并释放表锁，再在调用方栈上依次调用。
//!
//! 快照语义保证监听器在分发过程中可以重入调用 `on/off/trigger`：
//! 分发中途的注销只影响之后的分发，不影响本轮已经取到的快照。

use crate::bus::{EventBus, Listener};
use crate::payload::Payload;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::trace;

/// 简单的内存事件总线实现
#[derive(Default)]
pub struct InMemoryEventBus {
    listeners: DashMap<String, Vec<Listener>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前存在监听器的事件名（无序）
    pub fn event_names(&self) -> Vec<String> {
        self.listeners.iter().map(|e| e.key().clone()).collect()
    }
}

fn same_listener(a: &Listener, b: &Listener) -> bool {
    // 只比较数据指针，忽略 vtable
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl EventBus for InMemoryEventBus {
    fn on(&self, event: &str, listener: Listener) {
        self.listeners
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    fn off(&self, event: &str, listener: &Listener) {
        let now_empty = match self.listeners.get_mut(event) {
            Some(mut list) => {
                if let Some(pos) = list.iter().position(|l| same_listener(l, listener)) {
                    list.remove(pos);
                }
                list.is_empty()
            }
            None => return,
        };

        if now_empty {
            self.listeners.remove_if(event, |_, list| list.is_empty());
        }
    }

    fn trigger(&self, event: &str, payload: Payload) {
        // 快照后立即释放分片锁，监听器内部可安全重入
        let Some(snapshot) = self.listeners.get(event).map(|list| list.value().clone()) else {
            trace!(event, "no listeners for event");
            return;
        };

        for listener in snapshot {
            listener(event, &payload);
        }
    }

    fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map(|list| list.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::listener;
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Listener {
        let log = log.clone();
        listener(move |event, _payload| {
            log.lock().unwrap().push(format!("{tag}:{event}"));
        })
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let bus = InMemoryEventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        bus.on("hlsLoaded", recorder(&log, "a"));
        bus.on("hlsLoaded", recorder(&log, "b"));
        bus.on("hlsOther", recorder(&log, "c"));

        bus.trigger("hlsLoaded", Payload::empty());

        assert_eq!(*log.lock().unwrap(), vec!["a:hlsLoaded", "b:hlsLoaded"]);
        assert_eq!(bus.listener_count("hlsLoaded"), 2);
        assert!(bus.has_listeners("hlsOther"));
    }

    #[test]
    fn off_removes_exactly_the_given_identity() {
        let bus = InMemoryEventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let first = recorder(&log, "same");
        let second = recorder(&log, "same");
        bus.on("hlsLoaded", first.clone());
        bus.on("hlsLoaded", second.clone());

        bus.off("hlsLoaded", &first);
        assert_eq!(bus.listener_count("hlsLoaded"), 1);

        // 再次注销同一身份为空操作
        bus.off("hlsLoaded", &first);
        assert_eq!(bus.listener_count("hlsLoaded"), 1);

        bus.off("hlsLoaded", &second);
        assert_eq!(bus.listener_count("hlsLoaded"), 0);
        assert!(bus.event_names().is_empty());
    }

    #[test]
    fn off_unknown_event_is_noop() {
        let bus = InMemoryEventBus::new();
        let l = listener(|_, _| {});
        bus.off("hlsNever", &l);
        assert!(!bus.has_listeners("hlsNever"));
    }

    #[test]
    fn trigger_without_listeners_is_noop() {
        let bus = InMemoryEventBus::new();
        bus.trigger("hlsNobody", Payload::empty());
    }

    #[test]
    fn listener_may_trigger_reentrantly() {
        let bus = Arc::new(InMemoryEventBus::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let inner_bus = Arc::downgrade(&bus);
        bus.on(
            "hlsOuter",
            listener(move |_, _| {
                if let Some(bus) = inner_bus.upgrade() {
                    bus.trigger("hlsInner", Payload::empty());
                }
            }),
        );
        bus.on("hlsInner", recorder(&log, "inner"));

        bus.trigger("hlsOuter", Payload::empty());
        assert_eq!(*log.lock().unwrap(), vec!["inner:hlsInner"]);
    }

    #[test]
    fn off_during_dispatch_only_affects_future_dispatch() {
        let bus = Arc::new(InMemoryEventBus::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        let victim = recorder(&log, "victim");

        let weak_bus = Arc::downgrade(&bus);
        let victim_for_remover = victim.clone();
        bus.on(
            "hlsTick",
            listener(move |event, _| {
                if let Some(bus) = weak_bus.upgrade() {
                    bus.off(event, &victim_for_remover);
                }
            }),
        );
        bus.on("hlsTick", victim);

        bus.trigger("hlsTick", Payload::empty());
        bus.trigger("hlsTick", Payload::empty());

        // 第一轮快照内仍包含 victim，第二轮已被移除
        assert_eq!(*log.lock().unwrap(), vec!["victim:hlsTick"]);
    }

    #[test]
    fn listeners_receive_event_name_and_payload() {
        let bus = InMemoryEventBus::new();
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        bus.on(
            "hlsLevelLoaded",
            listener(move |event, payload| {
                *sink.lock().unwrap() = Some((event.to_string(), *payload.downcast_ref::<u32>().unwrap()));
            }),
        );

        bus.trigger("hlsLevelLoaded", Payload::new(3_u32));
        assert_eq!(*seen.lock().unwrap(), Some(("hlsLevelLoaded".to_string(), 3)));
    }
}
