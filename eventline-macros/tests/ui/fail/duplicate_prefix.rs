#![allow(dead_code)]
use eventline_macros::event_routes;

struct Controller;

#[event_routes(prefix = "x", prefix = "y")]
impl Controller {}

fn main() {}
