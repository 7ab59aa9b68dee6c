use bon::Builder;
use eventline_bus::events;

/// 处理器实例的分发配置
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// 是否在分发前后输出调试追踪（构造后仍可通过 `set_debug_log_enabled` 切换）
    #[builder(default)]
    pub debug_log: bool,
    /// 分发失败时发布的错误事件名
    #[builder(into, default = events::ERROR.to_string())]
    pub error_event: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            debug_log: false,
            error_event: events::ERROR.to_string(),
        }
    }
}
