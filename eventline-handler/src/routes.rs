//! 路由表（Routes）
//!
//! 每个具体处理器类型维护一张只构建一次的路由表：处理方法名 → 类型化的调用闭包。
//! 分发时按命名约定由事件名推导方法名，再查表调用；
//! 载荷在这里按方法参数类型还原，类型不符视为分发失败。
//!
//! 通常由 `#[event_routes]` 宏生成，也可以手写：
//!
//! ```rust
//! use eventline_handler::{Routes, RouteTable};
//! use std::sync::OnceLock;
//!
//! struct Probe;
//!
//! impl Probe {
//!     fn on_loaded(&self, _id: &u32) {}
//! }
//!
//! impl RouteTable for Probe {
//!     fn routes() -> &'static Routes<Self> {
//!         static ROUTES: OnceLock<Routes<Probe>> = OnceLock::new();
//!         ROUTES.get_or_init(|| Routes::with_prefix("x").route_infallible("on_loaded", Probe::on_loaded))
//!     }
//! }
//!
//! assert!(Probe::routes().resolves("xLoaded"));
//! ```
//!
use crate::error::DispatchError;
use crate::naming;
use eventline_bus::{Payload, events};
use std::any::{Any, type_name};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;

type RouteFn<H> = Box<dyn Fn(&H, &str, &Payload) -> Result<(), DispatchError> + Send + Sync>;

/// 处理器类型的路由表
pub struct Routes<H> {
    prefix: String,
    table: HashMap<&'static str, RouteFn<H>>,
}

/// 提供类型级路由表的处理器
pub trait RouteTable: Sized + 'static {
    fn routes() -> &'static Routes<Self>;
}

impl<H> Default for Routes<H> {
    fn default() -> Self {
        Self::with_prefix(events::PREFIX)
    }
}

impl<H> Routes<H> {
    /// 使用库级默认前缀创建空路由表
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            table: HashMap::new(),
        }
    }

    /// 注册返回 `Result` 的处理方法；同名方法重复注册时后者覆盖前者
    pub fn route<T, E, F>(mut self, method: &'static str, f: F) -> Self
    where
        T: Any,
        E: Into<anyhow::Error>,
        F: Fn(&H, &T) -> Result<(), E> + Send + Sync + 'static,
    {
        let route: RouteFn<H> = Box::new(move |handler: &H, event: &str, payload: &Payload| {
            let Some(data) = payload.downcast_ref::<T>() else {
                return Err(DispatchError::PayloadMismatch {
                    event: event.to_string(),
                    expected: type_name::<T>(),
                    found: payload.type_name(),
                });
            };

            f(handler, data).map_err(|e| DispatchError::Handler {
                event: event.to_string(),
                source: e.into(),
            })
        });

        self.table.insert(method, route);
        self
    }

    /// 注册无返回值的处理方法
    pub fn route_infallible<T, F>(self, method: &'static str, f: F) -> Self
    where
        T: Any,
        F: Fn(&H, &T) + Send + Sync + 'static,
    {
        self.route(method, move |handler: &H, data: &T| {
            f(handler, data);
            Ok::<(), Infallible>(())
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 事件名对应的处理方法名
    pub fn method_for(&self, event: &str) -> String {
        naming::handler_method_name(&self.prefix, event)
    }

    pub fn contains(&self, method: &str) -> bool {
        self.table.contains_key(method)
    }

    /// 事件是否能解析到已注册的处理方法
    pub fn resolves(&self, event: &str) -> bool {
        self.contains(&self.method_for(event))
    }

    /// 已注册的处理方法名（按字典序）
    pub fn method_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.table.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 解析并调用处理方法
    ///
    /// 找不到方法时返回 `DispatchError::MissingHandler`，错误信息中带上
    /// 方法名、事件名与处理器名。
    pub fn dispatch(
        &self,
        handler: &H,
        handler_name: &str,
        event: &str,
        payload: &Payload,
    ) -> Result<(), DispatchError> {
        let method = self.method_for(event);
        let Some(route) = self.table.get(method.as_str()) else {
            return Err(DispatchError::MissingHandler {
                event: event.to_string(),
                method,
                handler: handler_name.to_string(),
            });
        };

        route(handler, event, payload)
    }
}

impl<H> fmt::Debug for Routes<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routes")
            .field("prefix", &self.prefix)
            .field("methods", &self.method_names())
            .finish()
    }
}
