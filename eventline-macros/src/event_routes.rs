use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{ToTokens, quote};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    FnArg, Ident, ImplItem, Item, LitStr, Result, ReturnType, Signature, Token, Type,
    parse::Parse, parse::ParseStream, parse_macro_input,
};

/// #[event_routes] 宏实现
/// - 仅支持非泛型的 inherent impl 块
/// - `on_*` 方法签名必须为 `fn on_xxx(&self, payload: &T) [-> Result<(), E>]`
/// - 生成 `::eventline_handler::RouteTable` 实现（`OnceLock` 静态路由表）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as RoutesAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let item_impl = match &mut input {
        Item::Impl(i) => i,
        other => {
            return syn::Error::new(
                first_token_span(other),
                "#[event_routes] can only be used on inherent impl blocks",
            )
            .to_compile_error()
            .into();
        }
    };

    if let Some((_, path, _)) = &item_impl.trait_ {
        return syn::Error::new(
            first_token_span(path),
            "#[event_routes] cannot be used on trait impl blocks",
        )
        .to_compile_error()
        .into();
    }

    if let Some(param) = item_impl.generics.params.first() {
        return syn::Error::new(
            first_token_span(param),
            "#[event_routes] does not support generic impl blocks",
        )
        .to_compile_error()
        .into();
    }

    let self_ty = item_impl.self_ty.clone();
    let mut routes: Vec<(Ident, RouteKind)> = Vec::new();

    for impl_item in item_impl.items.iter_mut() {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        let skip = match take_route_attr(&mut method.attrs) {
            Ok(skip) => skip,
            Err(e) => return e.to_compile_error().into(),
        };

        if skip || !method.sig.ident.to_string().starts_with("on_") {
            continue;
        }

        match route_kind(&method.sig) {
            Ok(kind) => routes.push((method.sig.ident.clone(), kind)),
            Err(e) => return e.to_compile_error().into(),
        }
    }

    let prefix = match cfg.prefix {
        Some(lit) => quote! { #lit },
        None => quote! { ::eventline_handler::events::PREFIX },
    };

    let calls: Vec<TokenStream2> = routes
        .iter()
        .map(|(ident, kind)| {
            let name = ident.to_string();
            match kind {
                RouteKind::Fallible => quote! { .route(#name, <#self_ty>::#ident) },
                RouteKind::Infallible => quote! { .route_infallible(#name, <#self_ty>::#ident) },
            }
        })
        .collect();

    let expanded = quote! {
        #input

        impl ::eventline_handler::RouteTable for #self_ty {
            fn routes() -> &'static ::eventline_handler::Routes<Self> {
                static ROUTES: ::std::sync::OnceLock<::eventline_handler::Routes<#self_ty>> =
                    ::std::sync::OnceLock::new();
                ROUTES.get_or_init(|| {
                    ::eventline_handler::Routes::with_prefix(#prefix)
                        #(#calls)*
                })
            }
        }
    };

    TokenStream::from(expanded)
}

enum RouteKind {
    /// 返回 `Result<(), E>`
    Fallible,
    /// 无返回值
    Infallible,
}

// 校验路由方法签名：&self + 一个引用形式的载荷参数
fn route_kind(sig: &Signature) -> Result<RouteKind> {
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "route methods must be synchronous",
        ));
    }

    if let Some(param) = sig.generics.type_params().next() {
        return Err(syn::Error::new(
            param.ident.span(),
            "route methods cannot have type parameters",
        ));
    }

    let mut inputs = sig.inputs.iter();

    // `&self` 与 `self: &Self` 均可；syn 对简写形式同样给出 `&Self` 类型
    match inputs.next() {
        Some(FnArg::Receiver(r)) if r.mutability.is_none() && is_shared_self(&r.ty) => {}
        _ => {
            return Err(syn::Error::new(
                sig.ident.span(),
                "route methods must take `&self`; mark other `on_*` methods with #[route(skip)]",
            ));
        }
    }

    let payload = match (inputs.next(), inputs.next()) {
        (Some(FnArg::Typed(pat)), None) => pat,
        _ => {
            return Err(syn::Error::new(
                sig.ident.span(),
                "route methods take exactly one payload parameter: fn on_xxx(&self, payload: &T)",
            ));
        }
    };

    match payload.ty.as_ref() {
        Type::Reference(r) if r.mutability.is_none() => {}
        other => {
            return Err(syn::Error::new(
                first_token_span(other),
                "route payload must be taken by shared reference (&T)",
            ));
        }
    }

    match &sig.output {
        ReturnType::Default => Ok(RouteKind::Infallible),
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Tuple(t) if t.elems.is_empty() => Ok(RouteKind::Infallible),
            Type::Path(p) if is_result_path(&p.path) => Ok(RouteKind::Fallible),
            other => Err(syn::Error::new(
                first_token_span(other),
                "route methods must return `()` or `Result<(), E>`",
            )),
        },
    }
}

fn is_shared_self(ty: &Type) -> bool {
    match ty {
        Type::Reference(r) if r.mutability.is_none() => matches!(
            r.elem.as_ref(),
            Type::Path(p) if p.qself.is_none() && p.path.is_ident("Self")
        ),
        _ => false,
    }
}

// 末段以 `Result` 结尾即可，兼容 `anyhow::Result<()>` 与各类别名
fn is_result_path(path: &syn::Path) -> bool {
    path.segments
        .last()
        .is_some_and(|seg| seg.ident.to_string().ends_with("Result"))
}

// 报错位置取第一个 token，避免跨 token 的区间在不同工具链上表现不一
fn first_token_span<T: ToTokens>(tokens: &T) -> Span {
    tokens
        .to_token_stream()
        .into_iter()
        .next()
        .map(|tt| tt.span())
        .unwrap_or_else(Span::call_site)
}

// 取出并移除 #[route(...)] 属性，返回是否标记了 skip
fn take_route_attr(attrs: &mut Vec<syn::Attribute>) -> Result<bool> {
    let mut skip = false;
    let mut retained = Vec::with_capacity(attrs.len());

    for attr in attrs.drain(..) {
        if !attr.path().is_ident("route") {
            retained.push(attr);
            continue;
        }

        let arg: Ident = attr.parse_args()?;
        if arg != "skip" {
            return Err(syn::Error::new(arg.span(), "expected #[route(skip)]"));
        }
        skip = true;
    }

    *attrs = retained;
    Ok(skip)
}

// 解析 event_routes 宏键值参数：prefix = "<str>"
struct RoutesAttrConfig {
    prefix: Option<LitStr>,
}

struct KvLit {
    key: Ident,
    _eq: Token![=],
    value: LitStr,
}

impl Parse for KvLit {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            key: input.parse()?,
            _eq: input.parse()?,
            value: input.parse()?,
        })
    }
}

impl Parse for RoutesAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut prefix: Option<LitStr> = None;

        if input.is_empty() {
            return Ok(Self { prefix });
        }

        let pairs: Punctuated<KvLit, Token![,]> =
            Punctuated::<KvLit, Token![,]>::parse_terminated(input)?;

        for kv in pairs.into_iter() {
            let key = kv.key.to_string();
            match key.as_str() {
                "prefix" => {
                    if prefix.is_some() {
                        return Err(syn::Error::new(
                            kv.key.span(),
                            "duplicate key 'prefix' in attribute",
                        ));
                    }
                    prefix = Some(kv.value);
                }
                _ => {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        "unknown key in attribute; expected 'prefix'",
                    ));
                }
            }
        }

        Ok(Self { prefix })
    }
}
