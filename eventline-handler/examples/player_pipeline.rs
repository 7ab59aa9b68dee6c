use eventline_handler::{
    DispatchConfig, EventBus, EventHandler, HandlerInstance, InMemoryEventBus, Payload,
    ReportedError, bus::listener, events,
};
use eventline_macros::event_routes;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct Manifest {
    url: String,
    levels: Vec<u32>,
}

#[derive(Debug, Clone)]
struct Fragment {
    level: usize,
    sn: u64,
}

/// 加载清单后切到最高码率，并逐个请求分片
struct StreamController {
    bus: Arc<InMemoryEventBus>,
    level: Mutex<Option<usize>>,
}

#[event_routes]
impl StreamController {
    fn on_manifest_loaded(&self, manifest: &Manifest) -> anyhow::Result<()> {
        let Some(top) = manifest.levels.len().checked_sub(1) else {
            anyhow::bail!("manifest {} has no levels", manifest.url);
        };
        *self.level.lock().unwrap() = Some(top);
        println!("manifest loaded: {} ({} levels)", manifest.url, manifest.levels.len());

        self.bus
            .trigger("hlsFragLoading", Payload::new(Fragment { level: top, sn: 1 }));
        Ok(())
    }

    fn on_frag_loaded(&self, frag: &Fragment) {
        println!("fragment loaded: level={} sn={}", frag.level, frag.sn);
    }
}

impl EventHandler for StreamController {
    fn on_handler_destroying(&self) {
        println!("stream controller stopping at level {:?}", self.level.lock().unwrap());
    }
}

/// 模拟分片加载器：收到请求后立即回发加载完成
struct FragmentLoader {
    bus: Arc<InMemoryEventBus>,
}

#[event_routes]
impl FragmentLoader {
    fn on_frag_loading(&self, frag: &Fragment) {
        println!("fragment loading: level={} sn={}", frag.level, frag.sn);
        self.bus.trigger("hlsFragLoaded", Payload::new(frag.clone()));
    }
}

impl EventHandler for FragmentLoader {}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let bus = Arc::new(InMemoryEventBus::new());

    bus.on(
        events::ERROR,
        listener(|_, payload| {
            if let Some(report) = payload.downcast_ref::<ReportedError>() {
                println!("error reported: {}", serde_json::to_string(report).unwrap());
            }
        }),
    );

    let controller = HandlerInstance::attach_with_config(
        bus.clone(),
        StreamController {
            bus: bus.clone(),
            level: Mutex::new(None),
        },
        ["hlsManifestLoaded", "hlsFragLoaded"],
        DispatchConfig::builder().debug_log(true).build(),
    )?;
    let loader = HandlerInstance::attach(
        bus.clone(),
        FragmentLoader { bus: bus.clone() },
        ["hlsFragLoading"],
    )?;

    // 正常流程：清单 → 请求分片 → 分片完成
    bus.trigger(
        "hlsManifestLoaded",
        Payload::new(Manifest {
            url: "https://example.com/live.m3u8".into(),
            levels: vec![800_000, 1_600_000, 3_200_000],
        }),
    );

    // 失败流程：空清单会转成一条非致命错误报告
    bus.trigger(
        "hlsManifestLoaded",
        Payload::new(Manifest {
            url: "https://example.com/empty.m3u8".into(),
            levels: vec![],
        }),
    );

    // 保留事件名在构造时即被拒绝
    let rejected = HandlerInstance::attach(
        bus.clone(),
        FragmentLoader { bus: bus.clone() },
        [events::HANDLER_DESTROYING],
    );
    println!("reserved subscription: {:?}", rejected.err());

    controller.destroy();
    loader.destroy();

    // 销毁后不再分发
    bus.trigger("hlsFragLoaded", Payload::new(Fragment { level: 0, sn: 2 }));
    println!("listeners left: {:?}", bus.event_names());

    Ok(())
}
