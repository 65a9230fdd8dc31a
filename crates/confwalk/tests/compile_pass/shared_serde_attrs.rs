//! Test: serde attributes with options the derive does not interpret

use confwalk::Populate;

#[derive(Default, Populate)]
struct Config {
    #[serde(rename = "Name", default, skip_serializing_if = "String::is_empty")]
    name: String,

    #[serde(alias = "lvl", with = "some_module")]
    level: i32,

    #[serde(rename(serialize = "out", deserialize = "in"))]
    input: bool,
}

fn main() {}
