use std::fmt;

use parseprims_value::Value;

use crate::contract::{Modifiers, Schema, SchemaExt};
use crate::failure::ParseFailure;
use crate::parse_error::{ErrorList, ParseError};

/// A value a [`LiteralSchema`] accepts exactly. Also the key type of a
/// discriminated union lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    String(String),
    Int(i64),
    Bool(bool),
}

impl Literal {
    /// Literal view of a scalar value; `None` for shapes a literal cannot hold.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Literal::String(s.clone())),
            Value::Int(i) => Some(Literal::Int(*i)),
            Value::Bool(b) => Some(Literal::Bool(*b)),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Int(i) => Value::Int(*i),
            Literal::Bool(b) => Value::Bool(*b),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Literal::String(s) => serde_json::Value::String(s.clone()),
            Literal::Int(i) => serde_json::Value::from(*i),
            Literal::Bool(b) => serde_json::Value::Bool(*b),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Int(_) => "integer",
            Literal::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "\"{s}\""),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

/// Accepts exactly one scalar value.
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    literal: Literal,
    modifiers: Modifiers,
}

impl LiteralSchema {
    pub fn new(literal: impl Into<Literal>) -> Self {
        Self {
            literal: literal.into(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    fn check(&self, input: &Value) -> Result<Value, ErrorList> {
        let given = match Literal::from_value(input) {
            Some(given) if given.kind() == self.literal.kind() => given,
            _ => {
                return Err(ErrorList::from(ParseError::type_mismatch(
                    "literal",
                    self.literal.kind(),
                    input,
                )))
            }
        };

        if given != self.literal {
            return Err(ErrorList::from(
                ParseError::new("literal.equals", "Input should be {{expected}}, {{given}} given")
                    .with_variable("expected", self.literal.to_json())
                    .with_variable("given", given.to_json()),
            ));
        }

        Ok(input.clone())
    }
}

impl Schema for LiteralSchema {
    fn parse(&self, input: &Value) -> Result<Value, ParseFailure> {
        self.modifiers.apply(input, |value| self.check(value))
    }

    fn as_literal(&self) -> Option<&Literal> {
        Some(&self.literal)
    }
}

impl SchemaExt for LiteralSchema {
    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}
