//! Test: nested records with key overrides and an env fallback

use confwalk::Populate;

#[derive(Default, Populate)]
struct Api {
    #[config(key = "Port", env = "PORT")]
    port: i32,

    #[config(key = "Host", default = "localhost")]
    host: String,
}

#[derive(Default, Populate)]
struct Configuration {
    #[config(key = "API")]
    api: Api,
}

fn main() {
    let backend = confwalk::MemoryBackend::new();
    let _ = confwalk::Populator::new(&backend).load::<Configuration>();
}
