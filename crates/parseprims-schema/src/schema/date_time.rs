use chrono::{DateTime, FixedOffset};
use parseprims_value::Value;

use crate::contract::{Modifiers, Schema, SchemaExt};
use crate::failure::ParseFailure;
use crate::parse_error::{ErrorList, ParseError};
use crate::refine::{run_refinements, Refinement};

/// Accepts date-time values. Strings are not parsed here; use
/// `StringSchema::to_date_time` for that.
#[derive(Debug, Clone)]
pub struct DateTimeSchema {
    refinements: Vec<Refinement<DateTime<FixedOffset>>>,
    modifiers: Modifiers,
}

impl DateTimeSchema {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            refinements: Vec::new(),
            modifiers: Modifiers::default(),
        }
    }

    /// Reject date-times before `from`.
    pub fn not_before(&self, from: DateTime<FixedOffset>) -> Self {
        self.refine("from", move |value| {
            if *value >= from {
                return Ok(());
            }
            Err(ParseError::new("datetime.from", "From {{from}}, {{given}} given")
                .with_variable("from", from.to_rfc3339())
                .with_variable("given", value.to_rfc3339()))
        })
    }

    /// Reject date-times after `to`.
    pub fn not_after(&self, to: DateTime<FixedOffset>) -> Self {
        self.refine("to", move |value| {
            if *value <= to {
                return Ok(());
            }
            Err(ParseError::new("datetime.to", "To {{to}}, {{given}} given")
                .with_variable("to", to.to_rfc3339())
                .with_variable("given", value.to_rfc3339()))
        })
    }

    pub fn refine<F>(&self, name: &'static str, check: F) -> Self
    where
        F: Fn(&DateTime<FixedOffset>) -> Result<(), ParseError> + Send + Sync + 'static,
    {
        let mut schema = self.clone();
        schema.refinements.push(Refinement::new(name, check));
        schema
    }

    fn check(&self, input: &Value) -> Result<Value, ErrorList> {
        let Value::DateTime(value) = input else {
            return Err(ErrorList::from(ParseError::type_mismatch(
                "datetime", "datetime", input,
            )));
        };
        run_refinements(&self.refinements, value)?;
        Ok(input.clone())
    }
}

impl Schema for DateTimeSchema {
    fn parse(&self, input: &Value) -> Result<Value, ParseFailure> {
        self.modifiers.apply(input, |value| self.check(value))
    }
}

impl SchemaExt for DateTimeSchema {
    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}
