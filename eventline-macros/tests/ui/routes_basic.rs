use eventline_handler::{EventHandler, RouteTable};
use eventline_macros::event_routes;

struct StreamController;

#[event_routes]
impl StreamController {
    fn on_manifest_loaded(&self, _manifest: &serde_json::Value) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_level_switched(&self, _level: &u32) {}

    fn tick(&self) -> u32 {
        1
    }
}

impl EventHandler for StreamController {}

fn main() {
    let routes = StreamController::routes();
    assert_eq!(routes.prefix(), "hls");
    assert_eq!(
        routes.method_names(),
        vec!["on_level_switched", "on_manifest_loaded"]
    );
    assert!(routes.resolves("hlsManifestLoaded"));
    assert!(!routes.resolves("hlsTick"));
    assert_eq!(StreamController.tick(), 1);
}
