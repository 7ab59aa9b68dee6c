#![allow(dead_code)]
use eventline_macros::event_routes;

struct Controller;

#[event_routes]
impl Controller {
    fn on_level_switched(&self, _level: &u32, _extra: &u32) {}
}

fn main() {}
