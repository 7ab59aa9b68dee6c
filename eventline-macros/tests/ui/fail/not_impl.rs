#![allow(dead_code)]
use eventline_macros::event_routes;

#[event_routes]
struct Controller;

fn main() {}
