use eventline_handler::{EventHandler, RouteTable};
use eventline_macros::event_routes;
use std::sync::Mutex;

struct Buffer {
    flushed: Mutex<usize>,
}

#[event_routes]
impl Buffer {
    fn on_buffer_flushing(&self, _: &()) {
        *self.flushed.lock().unwrap() += 1;
    }

    #[route(skip)]
    fn on_internal_reset(&mut self) {
        *self.flushed.get_mut().unwrap() = 0;
    }

    #[route(skip)]
    fn on_helper(&self, a: u32, b: u32) -> u32 {
        a + b
    }
}

impl EventHandler for Buffer {}

fn main() {
    let routes = Buffer::routes();
    assert_eq!(routes.method_names(), vec!["on_buffer_flushing"]);

    let mut buffer = Buffer {
        flushed: Mutex::new(3),
    };
    buffer.on_internal_reset();
    assert_eq!(buffer.on_helper(1, 2), 3);
}
