use parseprims_value::Value;

use crate::contract::{Modifiers, Schema, SchemaExt};
use crate::failure::ParseFailure;
use crate::parse_error::{ErrorList, ParseError};
use crate::refine::{gte, lte, run_refinements, Refinement};

/// Accepts integers, with optional refinements.
#[derive(Debug, Clone)]
pub struct IntSchema {
    refinements: Vec<Refinement<i64>>,
    modifiers: Modifiers,
}

impl IntSchema {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            refinements: Vec::new(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn gte(&self, min: i64) -> Self {
        self.with_refinement(gte("int", min))
    }

    pub fn lte(&self, max: i64) -> Self {
        self.with_refinement(lte("int", max))
    }

    /// Add a custom rule, run after the built-in ones declared before it.
    pub fn refine<F>(&self, name: &'static str, check: F) -> Self
    where
        F: Fn(&i64) -> Result<(), ParseError> + Send + Sync + 'static,
    {
        self.with_refinement(Refinement::new(name, check))
    }

    fn with_refinement(&self, refinement: Refinement<i64>) -> Self {
        let mut schema = self.clone();
        schema.refinements.push(refinement);
        schema
    }

    fn check(&self, input: &Value) -> Result<Value, ErrorList> {
        let Value::Int(value) = input else {
            return Err(ErrorList::from(ParseError::type_mismatch("int", "integer", input)));
        };
        run_refinements(&self.refinements, value)?;
        Ok(input.clone())
    }
}

impl Schema for IntSchema {
    fn parse(&self, input: &Value) -> Result<Value, ParseFailure> {
        self.modifiers.apply(input, |value| self.check(value))
    }
}

impl SchemaExt for IntSchema {
    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_success() {
        assert_eq!(IntSchema::new().parse(&Value::from(42)), Ok(Value::from(42)));
    }

    #[test]
    fn rejects_float_and_numeric_string() {
        let schema = IntSchema::new();
        let float = schema.parse(&Value::from(1.5)).unwrap_err().flatten();
        assert_eq!(float[0].message(), "Type should be \"integer\", \"float\" given");

        let string = schema.parse(&Value::from("42")).unwrap_err().flatten();
        assert_eq!(string[0].variables.get("given"), Some(&json!("string")));
    }

    #[test]
    fn range_refinements() {
        let schema = IntSchema::new().gte(1).lte(10);

        assert!(schema.parse(&Value::from(1)).is_ok());
        assert!(schema.parse(&Value::from(10)).is_ok());

        let low = schema.parse(&Value::from(0)).unwrap_err().flatten();
        assert_eq!(low[0].code, "int.gte");
        let high = schema.parse(&Value::from(11)).unwrap_err().flatten();
        assert_eq!(high[0].code, "int.lte");
        assert_eq!(high[0].variables.get("lte"), Some(&json!(10)));
    }

    #[test]
    fn custom_refinement() {
        let even = IntSchema::new().refine("even", |value| {
            if value % 2 == 0 {
                Ok(())
            } else {
                Err(ParseError::new("int.even", "{{given}} is odd").with_variable("given", *value))
            }
        });

        assert!(even.parse(&Value::from(4)).is_ok());
        let flat = even.parse(&Value::from(3)).unwrap_err().flatten();
        assert_eq!(flat[0].message(), "3 is odd");
    }

    #[test]
    fn refinements_do_not_alter_receiver() {
        let base = IntSchema::new();
        let bounded = base.gte(100);

        assert!(base.parse(&Value::from(1)).is_ok());
        assert!(bounded.parse(&Value::from(1)).is_err());
    }

    #[test]
    fn nullable_overrides_refinements() {
        let schema = IntSchema::new().gte(5).nullable();
        assert_eq!(schema.parse(&Value::Null), Ok(Value::Null));
    }
}
