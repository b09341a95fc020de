use parseprims_value::Value;

use crate::parse_error::{ErrorList, FlatError};

/// Failure of one parse call. Carries exactly one [`ErrorList`].
///
/// When a transform reports errors after computing its output, that
/// best-effort output is kept in [`ParseFailure::output`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", summarize(.errors))]
pub struct ParseFailure {
    errors: ErrorList,
    output: Option<Value>,
}

impl ParseFailure {
    pub fn new(errors: ErrorList) -> Self {
        Self {
            errors,
            output: None,
        }
    }

    pub(crate) fn with_output(errors: ErrorList, output: Value) -> Self {
        Self {
            errors,
            output: Some(output),
        }
    }

    pub fn errors(&self) -> &ErrorList {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorList {
        self.errors
    }

    /// Value computed by a transform that nevertheless reported errors.
    pub fn output(&self) -> Option<&Value> {
        self.output.as_ref()
    }

    /// Every error with its rendered path.
    pub fn flatten(&self) -> Vec<FlatError> {
        self.errors.flatten()
    }
}

fn summarize(errors: &ErrorList) -> String {
    let flat = errors.flatten();
    let mut message = format!("parse failed with {} error(s)", flat.len());
    for error in flat {
        message.push_str("; ");
        message.push_str(&error.to_string());
    }
    message
}

/// Outcome of a non-failing parse: exactly one of `data` or `error` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct SafeParse {
    outcome: Result<Value, ParseFailure>,
}

impl SafeParse {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn data(&self) -> Option<&Value> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ParseFailure> {
        self.outcome.as_ref().err()
    }

    pub fn into_data(self) -> Option<Value> {
        self.outcome.ok()
    }

    pub fn into_result(self) -> Result<Value, ParseFailure> {
        self.outcome
    }
}

impl From<Result<Value, ParseFailure>> for SafeParse {
    fn from(outcome: Result<Value, ParseFailure>) -> Self {
        Self { outcome }
    }
}
