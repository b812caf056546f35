use crate::api::ApiError;

/// Failure surfaced to the user, rendered inside the UI instead of being
/// propagated as an unhandled error.
#[derive(Debug, Clone, PartialEq)]
pub struct UserError {
    pub title: &'static str,
    pub message: Box<str>,
}

impl From<(&'static str, &str)> for UserError {
    fn from(value: (&'static str, &str)) -> Self {
        Self { title: value.0, message: value.1.to_string().into_boxed_str() }
    }
}

impl From<(&'static str, String)> for UserError {
    fn from(value: (&'static str, String)) -> Self {
        Self { title: value.0, message: value.1.into_boxed_str() }
    }
}

impl From<(&'static str, ApiError)> for UserError {
    fn from(value: (&'static str, ApiError)) -> Self {
        Self { title: value.0, message: value.1.to_string().into_boxed_str() }
    }
}
