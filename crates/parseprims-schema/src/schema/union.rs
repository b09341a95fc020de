use std::sync::Arc;

use parseprims_value::Value;
use tracing::trace;

use crate::contract::{Modifiers, Schema, SchemaExt};
use crate::error::{Result, SchemaError};
use crate::failure::ParseFailure;
use crate::parse_error::{ErrorList, PathSegment};

/// Tries each alternative in order; the first success wins.
///
/// When every alternative fails, the failure holds one child list per
/// alternative under [`PathSegment::Member`], so flattened paths point at the
/// union itself.
#[derive(Debug, Clone)]
pub struct UnionSchema {
    members: Vec<Arc<dyn Schema>>,
    modifiers: Modifiers,
}

impl UnionSchema {
    pub fn new(members: Vec<Arc<dyn Schema>>) -> Result<Self> {
        if members.is_empty() {
            return Err(SchemaError::EmptyUnion);
        }
        Ok(Self {
            members,
            modifiers: Modifiers::default(),
        })
    }

    pub fn members(&self) -> &[Arc<dyn Schema>] {
        &self.members
    }

    fn check(&self, input: &Value) -> std::result::Result<Value, ErrorList> {
        let mut errors = ErrorList::new();
        for (index, member) in self.members.iter().enumerate() {
            let outcome = member.safe_parse(input);
            match outcome.into_result() {
                Ok(value) => {
                    trace!(member = index, "union alternative matched");
                    return Ok(value);
                }
                Err(failure) => errors.nest(PathSegment::Member(index), failure.into_errors()),
            }
        }
        Err(errors)
    }
}

impl Schema for UnionSchema {
    fn parse(&self, input: &Value) -> std::result::Result<Value, ParseFailure> {
        self.modifiers.apply(input, |value| self.check(value))
    }
}

impl SchemaExt for UnionSchema {
    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_error::ErrorEntry;
    use crate::schema::int::IntSchema;
    use crate::schema::string::StringSchema;

    fn int_or_string() -> UnionSchema {
        UnionSchema::new(vec![IntSchema::new().boxed(), StringSchema::new().boxed()]).unwrap()
    }

    #[test]
    fn empty_union_is_rejected() {
        assert!(matches!(UnionSchema::new(vec![]), Err(SchemaError::EmptyUnion)));
    }

    #[test]
    fn first_matching_alternative_wins() {
        let schema = UnionSchema::new(vec![
            StringSchema::new().upper().boxed(),
            StringSchema::new().lower().boxed(),
        ])
        .unwrap();
        assert_eq!(schema.parse(&Value::from("MiXeD")), Ok(Value::from("MIXED")));
    }

    #[test]
    fn later_alternative_matches() {
        assert_eq!(int_or_string().parse(&Value::from("1")), Ok(Value::from("1")));
        assert_eq!(int_or_string().parse(&Value::from(1)), Ok(Value::from(1)));
    }

    #[test]
    fn aggregates_every_alternative_failure() {
        let failure = int_or_string().parse(&Value::from(true)).unwrap_err();

        let members: Vec<&PathSegment> = failure
            .errors()
            .entries()
            .iter()
            .filter_map(|entry| match entry {
                ErrorEntry::Nested { segment, .. } => Some(segment),
                ErrorEntry::Error(_) => None,
            })
            .collect();
        assert_eq!(members, vec![&PathSegment::Member(0), &PathSegment::Member(1)]);

        let flat = failure.flatten();
        let codes: Vec<&str> = flat.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["int.type", "string.type"]);
        assert!(flat.iter().all(|e| e.path.is_empty()));
    }

    #[test]
    fn alternative_transform_applies() {
        let schema = UnionSchema::new(vec![
            IntSchema::new().boxed(),
            StringSchema::new().to_int().boxed(),
        ])
        .unwrap();
        assert_eq!(schema.parse(&Value::from("42")), Ok(Value::from(42)));
    }

    #[test]
    fn nullable_union_accepts_null() {
        assert_eq!(int_or_string().nullable().parse(&Value::Null), Ok(Value::Null));
        assert!(int_or_string().parse(&Value::Null).is_err());
    }
}
