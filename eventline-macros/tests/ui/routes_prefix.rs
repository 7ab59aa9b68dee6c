use eventline_handler::{EventHandler, Payload, RouteTable};
use eventline_macros::event_routes;
use std::io;

struct Loader;

#[event_routes(prefix = "x")]
impl Loader {
    fn on_frag_loaded(&self, sn: &u64) -> Result<(), io::Error> {
        if *sn == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "empty fragment"));
        }
        Ok(())
    }
}

impl EventHandler for Loader {}

fn main() {
    let routes = Loader::routes();
    assert_eq!(routes.prefix(), "x");
    assert!(routes.resolves("xFragLoaded"));
    assert!(!routes.resolves("hlsFragLoaded"));

    Loader.on_event("xFragLoaded", &Payload::new(7_u64)).unwrap();
    let err = Loader.on_event("xFragLoaded", &Payload::new(0_u64)).unwrap_err();
    assert_eq!(err.event(), "xFragLoaded");
}
