// Form State Manager: the five profile fields, quick-fill chips, and the
// single-flight submission session that hands profiles to the gateway.

pub mod chips;
pub mod profile;
pub mod session;
pub mod state;

use thiserror::Error;

use crate::form::profile::Field;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Required fields are empty: {}", join_fields(.0))]
    MissingFields(Vec<Field>),

    #[error("Unknown form field '{0}'")]
    UnknownField(String),

    #[error("Field '{0}' does not accept quick-fill tokens")]
    NotMultiValue(Field),

    #[error("A submission is already in progress")]
    Busy,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
