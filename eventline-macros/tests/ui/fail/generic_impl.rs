#![allow(dead_code)]
use eventline_macros::event_routes;

struct Wrapper<T>(T);

#[event_routes]
impl<T> Wrapper<T> {}

fn main() {}
