#[seedbed_derive::seedbed_error]
pub enum DemoError {
    Internal { message: std::borrow::Cow<'static, str>, context: Option<String> },
}

fn main() {}
