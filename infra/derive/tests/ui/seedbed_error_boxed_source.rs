use seedbed_derive::seedbed_error;
use std::borrow::Cow;

#[seedbed_error]
pub enum DemoError {
    #[error("Foreign failure{}: {source}", format_context(.context))]
    Foreign {
        source: Box<dyn std::error::Error + Send + Sync>,
        context: Option<Cow<'static, str>>,
    },
}

fn main() {
    let boxed: Box<dyn std::error::Error + Send + Sync> = "disk on fire".into();
    let err = DemoError::from(boxed);
    assert_eq!(err.to_string(), "Foreign failure: disk on fire");
}
