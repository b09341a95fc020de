use std::sync::Arc;

use parseprims_value::Value;

use crate::contract::{Modifiers, Schema, SchemaExt};
use crate::failure::ParseFailure;
use crate::parse_error::{ErrorList, ParseError, PathSegment};

/// Applies one item schema to every element of a sequence.
///
/// Every element is parsed, even after a failure, so one call reports every
/// bad index.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    item: Arc<dyn Schema>,
    modifiers: Modifiers,
}

impl ArraySchema {
    pub fn new(item: impl Schema + 'static) -> Self {
        Self {
            item: Arc::new(item),
            modifiers: Modifiers::default(),
        }
    }

    pub fn item_schema(&self) -> &Arc<dyn Schema> {
        &self.item
    }

    fn check(&self, input: &Value) -> Result<Value, ErrorList> {
        let Value::Array(items) = input else {
            return Err(ErrorList::from(ParseError::type_mismatch("array", "array", input)));
        };

        let mut errors = ErrorList::new();
        let mut output = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.item.parse(item) {
                Ok(value) => output.push(value),
                Err(failure) => errors.nest(PathSegment::Index(index), failure.into_errors()),
            }
        }

        if errors.is_empty() {
            Ok(Value::Array(output))
        } else {
            Err(errors)
        }
    }
}

impl Schema for ArraySchema {
    fn parse(&self, input: &Value) -> Result<Value, ParseFailure> {
        self.modifiers.apply(input, |value| self.check(value))
    }
}

impl SchemaExt for ArraySchema {
    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}
