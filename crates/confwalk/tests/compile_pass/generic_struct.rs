//! Test: generic records get a Populate bound on their type parameters

use confwalk::Populate;

#[derive(Default, Populate)]
struct Section<T> {
    #[config(key = "Inner")]
    inner: T,

    #[config(key = "Enabled")]
    enabled: bool,
}

#[derive(Default, Populate)]
struct Config {
    #[config(key = "Cache")]
    cache: Section<i32>,

    #[config(skip)]
    untouched: Vec<u8>,

    r#type: String,
}

fn main() {
    let keys = confwalk::Populator::keys::<Config>();
    assert_eq!(keys.len(), 3);
    assert_eq!(keys[0].key, "Cache.Inner");
    assert_eq!(keys[2].key, "type");
}
