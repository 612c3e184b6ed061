//! Tab error types

use thiserror::Error;
use vellum_dom::ElementId;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("element {0} has no enclosing tab group")]
    MissingGroup(ElementId),

    #[error("no method named \"{0}\"")]
    NoSuchMethod(String),
}
