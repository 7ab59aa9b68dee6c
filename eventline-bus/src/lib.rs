//! 事件总线基础库（eventline-bus）
//!
//! 为事件处理器提供最小的同步总线协议与配套构件：
//! - 总线协议（`bus`）：`on/off/trigger` 三个操作与监听器类型；
//! - 事件载荷（`payload`）：类型擦除、可廉价克隆的载荷容器；
//! - 事件名（`events`）：库级事件名常量与保留事件名集合；
//! - 内存总线（`bus_inmemory`）：进程内同步分发的参考实现。
//!
//! 本 crate 不关心事件如何被路由到具体处理方法，
//! 路由、异常隔离与生命周期由 `eventline-handler` 负责。
//!
pub mod bus;
pub mod bus_inmemory;
pub mod events;
pub mod payload;

pub use bus::{EventBus, Listener, listener};
pub use bus_inmemory::InMemoryEventBus;
pub use payload::Payload;
