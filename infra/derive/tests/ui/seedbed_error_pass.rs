use seedbed_derive::seedbed_error;
use std::borrow::Cow;

#[seedbed_error]
pub enum DemoError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u32, DemoError> {
    Ok(raw.parse::<u32>().context("Parsing demo value")?)
}

fn main() {
    assert_eq!(parse("42").ok(), Some(42));

    let err = parse("nope").unwrap_err();
    assert!(err.to_string().starts_with("Parse error (Parsing demo value)"));

    let err: DemoError = "boom".into();
    let err: Result<(), DemoError> = Err(err);
    let err = err.context("while testing").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (while testing): boom");
}
