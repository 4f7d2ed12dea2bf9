//! Core types for repodist: the error enum and the user-facing error
//! presenter shared by every command.

pub mod error;

pub use error::{user_friendly_error, ErrorContext, RepodistError};
