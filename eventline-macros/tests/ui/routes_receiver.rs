use eventline_handler::{EventHandler, Payload, RouteTable};
use eventline_macros::event_routes;
use std::sync::Mutex;

struct Levels {
    seen: Mutex<Vec<u32>>,
}

#[event_routes]
impl Levels {
    fn on_level_switched(self: &Self, level: &u32) -> () {
        self.seen.lock().unwrap().push(*level);
    }

    fn on_level_loaded(&self, level: &u32) -> Result<(), std::fmt::Error> {
        self.seen.lock().unwrap().push(*level + 100);
        Ok(())
    }
}

impl EventHandler for Levels {}

fn main() {
    assert_eq!(
        Levels::routes().method_names(),
        vec!["on_level_loaded", "on_level_switched"]
    );

    let levels = Levels {
        seen: Mutex::new(Vec::new()),
    };
    levels.on_event("hlsLevelSwitched", &Payload::new(2_u32)).unwrap();
    levels.on_event("hlsLevelLoaded", &Payload::new(2_u32)).unwrap();
    assert_eq!(*levels.seen.lock().unwrap(), vec![2, 102]);
}
