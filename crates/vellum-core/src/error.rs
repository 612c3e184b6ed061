//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("tab error: {0}")]
    Tab(#[from] vellum_tabs::TabError),

    #[error("field error: {0}")]
    Field(#[from] vellum_forms::FieldError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
