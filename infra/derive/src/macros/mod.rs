pub mod error;
pub mod slots;
