#![allow(dead_code)]
use eventline_macros::event_routes;

struct Controller;
trait Component {}

#[event_routes]
impl Component for Controller {}

fn main() {}
