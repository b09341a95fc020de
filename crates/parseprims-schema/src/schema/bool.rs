use parseprims_value::Value;

use crate::contract::{Modifiers, Schema, SchemaExt};
use crate::failure::ParseFailure;
use crate::parse_error::{ErrorList, ParseError};

/// Accepts booleans.
#[derive(Debug, Clone)]
pub struct BoolSchema {
    modifiers: Modifiers,
}

impl BoolSchema {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            modifiers: Modifiers::default(),
        }
    }

    fn check(&self, input: &Value) -> Result<Value, ErrorList> {
        match input {
            Value::Bool(_) => Ok(input.clone()),
            other => Err(ErrorList::from(ParseError::type_mismatch("bool", "boolean", other))),
        }
    }
}

impl Schema for BoolSchema {
    fn parse(&self, input: &Value) -> Result<Value, ParseFailure> {
        self.modifiers.apply(input, |value| self.check(value))
    }
}

impl SchemaExt for BoolSchema {
    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}
