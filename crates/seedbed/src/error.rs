use std::borrow::Cow;

/// Errors raised while registering seeds or materializing records from them.
#[seedbed_derive::seedbed_error]
pub enum SeedError {
    /// A seed with the same slot-name set is already registered for the target type.
    #[error("Duplicate seed{}: {message}", format_context(.context))]
    DuplicateSeed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Supplied seed data does not carry exactly the template's slot names.
    #[error("Seed data does not match template keys{}: {message}", format_context(.context))]
    DataMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No seed of the target type declares exactly the supplied slot names.
    #[error("Seed not found{}: {message}", format_context(.context))]
    SeedNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A recipe tried to seed an attribute the target type does not declare.
    #[error("Unknown attribute{}: {message}", format_context(.context))]
    UnknownAttribute { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The template is empty, repeats a slot name or exceeds the configured size.
    #[error("Invalid template{}: {message}", format_context(.context))]
    InvalidTemplate { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A generator asked for a slot that is not part of the seed data.
    #[error("Slot missing{}: {message}", format_context(.context))]
    SlotMissing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A slot holds an object of a different type than the one requested.
    #[error("Slot type mismatch{}: {message}", format_context(.context))]
    SlotTypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A type-erased seed was asked to build a record of another target type.
    #[error("Target mismatch{}: {message}", format_context(.context))]
    TargetMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A target constructor asked for an attribute the recipe did not produce.
    #[error("Attribute missing{}: {message}", format_context(.context))]
    AttributeMissing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A generated attribute has a different type than the constructor expects.
    #[error("Attribute type mismatch{}: {message}", format_context(.context))]
    AttributeTypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A generator failed with a foreign error.
    #[error("Generator failed{}: {source}", format_context(.context))]
    Generator {
        source: Box<dyn std::error::Error + Send + Sync>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
