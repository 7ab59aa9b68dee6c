use proc_macro::TokenStream;

mod event_routes;

/// 路由表宏
/// - 作用于处理器类型的 inherent impl 块（不支持泛型 impl）
/// - 收集所有 `on_*` 方法：接收 `&self` 与一个引用形式的载荷参数
/// - 无返回值的方法以 `route_infallible` 注册，其余以 `route` 注册（要求返回 `Result<(), E>`）
/// - 方法可用 `#[route(skip)]` 排除
/// - 为类型生成 `::eventline_handler::RouteTable` 实现，路由表只构建一次
/// - 支持参数：`#[event_routes(prefix = "x")]`，默认使用库级前缀
#[proc_macro_attribute]
pub fn event_routes(attr: TokenStream, item: TokenStream) -> TokenStream {
    event_routes::expand(attr, item)
}
