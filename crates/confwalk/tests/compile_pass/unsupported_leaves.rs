//! Test: unsupported leaf kinds compile and fail at runtime instead

use confwalk::Populate;

#[derive(Default, Populate)]
struct Config {
    ratio: f64,
    port: u16,
    tags: Vec<String>,
    maybe: Option<i32>,
    limits: std::collections::HashMap<String, i32>,
}

fn main() {
    let backend = confwalk::MemoryBackend::new();
    let mut config = Config::default();
    assert!(confwalk::Populator::new(&backend).populate(&mut config).is_err());
}
