use parseprims_value::Value;

use crate::contract::{Modifiers, Schema, SchemaExt};
use crate::failure::ParseFailure;
use crate::parse_error::{ErrorList, ParseError};
use crate::refine::{gte, lte, run_refinements, Refinement};

/// Accepts floats. Integers are a type mismatch.
#[derive(Debug, Clone)]
pub struct FloatSchema {
    refinements: Vec<Refinement<f64>>,
    modifiers: Modifiers,
}

impl FloatSchema {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            refinements: Vec::new(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn gte(&self, min: f64) -> Self {
        self.with_refinement(gte("float", min))
    }

    pub fn lte(&self, max: f64) -> Self {
        self.with_refinement(lte("float", max))
    }

    pub fn refine<F>(&self, name: &'static str, check: F) -> Self
    where
        F: Fn(&f64) -> Result<(), ParseError> + Send + Sync + 'static,
    {
        self.with_refinement(Refinement::new(name, check))
    }

    fn with_refinement(&self, refinement: Refinement<f64>) -> Self {
        let mut schema = self.clone();
        schema.refinements.push(refinement);
        schema
    }

    fn check(&self, input: &Value) -> Result<Value, ErrorList> {
        let Value::Float(value) = input else {
            return Err(ErrorList::from(ParseError::type_mismatch("float", "float", input)));
        };
        run_refinements(&self.refinements, value)?;
        Ok(input.clone())
    }
}

impl Schema for FloatSchema {
    fn parse(&self, input: &Value) -> Result<Value, ParseFailure> {
        self.modifiers.apply(input, |value| self.check(value))
    }
}

impl SchemaExt for FloatSchema {
    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}
