#![allow(dead_code)]
use eventline_macros::event_routes;

struct Controller;

#[event_routes(prefx = "x")]
impl Controller {}

fn main() {}
