//! 库级事件名
//!
//! 所有库级事件名均以 [`PREFIX`] 开头。[`RESERVED_EVENT_NAMES`] 中的名称
//! 保留给总线自身的生命周期信号，普通处理器不得订阅。
//!

/// 库级事件名前缀
pub const PREFIX: &str = "hls";

/// 分发失败时发布的通用错误信号
pub const ERROR: &str = "hlsError";

/// 通用兜底事件名
pub const EVENT_GENERIC: &str = "hlsEventGeneric";

/// 处理器即将销毁
pub const HANDLER_DESTROYING: &str = "hlsHandlerDestroying";

/// 处理器已销毁
pub const HANDLER_DESTROYED: &str = "hlsHandlerDestroyed";

/// 保留事件名集合（进程内只读）
pub const RESERVED_EVENT_NAMES: [&str; 3] = [EVENT_GENERIC, HANDLER_DESTROYING, HANDLER_DESTROYED];

pub fn is_reserved(event: &str) -> bool {
    RESERVED_EVENT_NAMES.iter().any(|name| *name == event)
}
