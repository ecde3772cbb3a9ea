#[seedbed_derive::seedbed_error]
pub enum DemoError {
    Broken(String),
}

fn main() {}
