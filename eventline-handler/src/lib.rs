//! 事件处理器基础库（eventline-handler）
//!
//! 为挂载到共享事件总线上的组件提供统一的“订阅 + 分发 + 异常隔离”能力：
//! - 订阅管理（`instance`）：构造时按事件名注册监听器，拒绝保留事件名；
//! - 约定式分发（`routes`/`naming`）：`{prefix}FooBar` 路由到 `on_foo_bar`；
//! - 异常隔离（`boundary`）：处理方法的失败与 panic 转为总线上的非致命错误事件；
//! - 生命周期（`lifecycle`）：销毁前钩子 → 注销监听 → 销毁后钩子。
//!
//! 典型用法：
//! 1. 在处理器的 inherent impl 上标注 `#[event_routes]`（`eventline-macros`），
//!    或手写 `RouteTable` 实现；
//! 2. 为处理器实现 `EventHandler`（按需覆写钩子）；
//! 3. 通过 `HandlerInstance::attach` 挂载到总线，用完调用 `destroy`。
//!
//! 只有构造期错误（`HandlerError`）会返回给调用方，分发期的失败一律在边界内消化。
//!
mod boundary;
pub mod config;
pub mod error;
pub mod handler;
pub mod instance;
pub mod lifecycle;
pub mod naming;
pub mod report;
pub mod routes;

pub use config::DispatchConfig;
pub use error::{DispatchError, HandlerError, HandlerResult};
pub use handler::EventHandler;
pub use instance::HandlerInstance;
pub use lifecycle::LifecycleState;
pub use report::{ErrorDetails, ErrorKind, ReportedError};
pub use routes::{RouteTable, Routes};

pub use eventline_bus::{self as bus, EventBus, InMemoryEventBus, Listener, Payload, events};

// 允许在本 crate 内部通过 ::eventline_handler 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::eventline_handler 路径。
extern crate self as eventline_handler;
