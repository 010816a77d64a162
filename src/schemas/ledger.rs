use serde::Serialize;
use validator::{Validate, ValidationError};

/// Ledger query row, serialized as `{"Key": .., "Record": ..}`.
#[derive(Debug, Serialize)]
pub(crate) struct KeyedRecord<T> {
    #[serde(rename = "Key")]
    pub(crate) key: String,
    #[serde(rename = "Record")]
    pub(crate) record: T,
}

impl<T> From<(String, T)> for KeyedRecord<T> {
    fn from((key, record): (String, T)) -> Self {
        Self { key, record }
    }
}

pub(crate) fn keyed<T>(rows: Vec<(String, T)>) -> Vec<KeyedRecord<T>> {
    rows.into_iter().map(KeyedRecord::from).collect()
}

#[derive(Debug, Validate)]
pub(crate) struct GroupCreate {
    #[validate(
        length(min = 1, max = 64, message = "generator must be 1 to 64 characters"),
        custom(function = "validate_label")
    )]
    pub(crate) generator: String,
}

#[derive(Debug, Validate)]
pub(crate) struct ExamSelector {
    #[validate(
        length(min = 1, max = 64, message = "exam must be 1 to 64 characters"),
        custom(function = "validate_label")
    )]
    pub(crate) exam: String,
}

#[derive(Debug, Validate)]
pub(crate) struct TakeTestQuery {
    #[validate(
        length(min = 1, max = 64, message = "student must be 1 to 64 characters"),
        custom(function = "validate_label")
    )]
    pub(crate) student: String,
}

fn validate_label(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.chars().any(char::is_control) {
        let mut error = ValidationError::new("label");
        error.message = Some("must contain printable characters".into());
        return Err(error);
    }
    Ok(())
}
