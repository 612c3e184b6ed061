//! Field error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("field \"{0}\" has no target element")]
    MissingElement(String),

    #[error("field configuration requires a name")]
    MissingName,
}
