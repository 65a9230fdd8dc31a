//! Test: a flat struct with every supported leaf type

use confwalk::Populate;

#[derive(Default, Populate)]
struct Config {
    a: i8,
    b: i16,
    c: i32,
    d: i64,
    e: i128,
    f: isize,
    g: bool,
    h: String,
}

fn main() {}
