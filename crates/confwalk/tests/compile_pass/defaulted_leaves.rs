//! Test: defaults and env fallbacks on every leaf kind that accepts them

use confwalk::Populate;

#[derive(Default, Populate)]
struct Server {
    #[config(key = "Host", default = "127.0.0.1")]
    host: String,

    #[config(key = "Port", default = 8080, env = "PORT")]
    port: i32,

    #[config(key = "Level", default = -1)]
    level: i8,

    #[config(key = "Debug", default = false, env = "DEBUG")]
    debug: bool,

    #[config(key = "Max")]
    max: u32,
}

#[derive(Default, Populate)]
struct Wrapper<T> {
    #[config(key = "Inner")]
    inner: T,

    #[config(key = "Name", default = "svc")]
    name: String,
}

fn main() {
    let _ = Wrapper::<Server>::default();
}
