#[seedbed_derive::seedbed_error]
pub enum DemoError {
    Parse { source: std::num::ParseIntError },
}

fn main() {}
