//! 事件名 → 处理方法名的命名约定
//!
//! `{prefix}FooBar` 去掉前缀后转为蛇形并加上 `on_`，得到 `on_foo_bar`。
//! 前缀只在事件名开头时才会被去掉。
//!

/// 处理方法名前缀
pub const METHOD_PREFIX: &str = "on_";

/// 由事件名推导处理方法名
pub fn handler_method_name(prefix: &str, event: &str) -> String {
    let rest = event.strip_prefix(prefix).unwrap_or(event);
    let mut out = String::with_capacity(METHOD_PREFIX.len() + rest.len() + 4);
    out.push_str(METHOD_PREFIX);
    push_snake_case(&mut out, rest);
    out
}

// 驼峰转蛇形，连续大写视为缩写：`FPSDrop` -> `fps_drop`
fn push_snake_case(out: &mut String, camel: &str) {
    let chars: Vec<char> = camel.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                None => false,
                Some(p) if p == '_' => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) => p.is_uppercase() && next.is_some_and(|n| n.is_lowercase()),
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
}
