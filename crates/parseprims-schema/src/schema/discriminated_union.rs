use std::collections::HashMap;

use parseprims_value::Value;
use tracing::debug;

use crate::contract::{Modifiers, Schema, SchemaExt};
use crate::error::{Result, SchemaError};
use crate::failure::ParseFailure;
use crate::parse_error::{ErrorList, ParseError, PathSegment};
use crate::schema::literal::Literal;
use crate::schema::object::ObjectSchema;

/// Union of object schemas selected by the literal value of one field.
///
/// Exactly one member is consulted per parse, and its errors are returned
/// unchanged.
#[derive(Debug, Clone)]
pub struct DiscriminatedUnionSchema {
    members: Vec<ObjectSchema>,
    discriminator: String,
    lookup: HashMap<Literal, usize>,
    accepted: Vec<Literal>,
    modifiers: Modifiers,
}

impl DiscriminatedUnionSchema {
    /// Every member must declare `discriminator` with a literal schema, and no
    /// two members may share a literal.
    pub fn new(members: Vec<ObjectSchema>, discriminator: impl Into<String>) -> Result<Self> {
        let discriminator = discriminator.into();
        if members.is_empty() {
            return Err(SchemaError::EmptyUnion);
        }

        let mut lookup = HashMap::with_capacity(members.len());
        let mut accepted = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            let field = member.field_schema(&discriminator).ok_or_else(|| {
                SchemaError::MissingDiscriminator {
                    index,
                    field: discriminator.clone(),
                }
            })?;
            let literal = field
                .as_literal()
                .ok_or_else(|| SchemaError::DiscriminatorNotLiteral {
                    index,
                    field: discriminator.clone(),
                })?
                .clone();

            if let Some(first) = lookup.insert(literal.clone(), index) {
                return Err(SchemaError::DuplicateDiscriminator {
                    value: literal.to_string(),
                    first,
                    second: index,
                });
            }
            accepted.push(literal);
        }

        debug!(
            discriminator = %discriminator,
            members = members.len(),
            "built discriminated union"
        );

        Ok(Self {
            members,
            discriminator,
            lookup,
            accepted,
            modifiers: Modifiers::default(),
        })
    }

    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    /// Discriminator literals in member order.
    pub fn accepted(&self) -> &[Literal] {
        &self.accepted
    }

    pub fn members(&self) -> &[ObjectSchema] {
        &self.members
    }

    fn check(&self, input: &Value) -> std::result::Result<Value, ErrorList> {
        let Some(fields) = input.fields() else {
            return Err(ErrorList::from(ParseError::type_mismatch(
                "discriminatedUnion",
                "object",
                input,
            )));
        };

        let raw = fields.get(&self.discriminator);
        let member = raw
            .and_then(Literal::from_value)
            .and_then(|literal| self.lookup.get(&literal).copied());

        let Some(index) = member else {
            let mut errors = ErrorList::new();
            errors.nest(
                PathSegment::Field(self.discriminator.clone()),
                ErrorList::from(self.unknown_discriminator(raw)),
            );
            return Err(errors);
        };

        debug!(
            discriminator = %self.discriminator,
            member = index,
            "dispatching discriminated union"
        );
        self.members[index]
            .parse(input)
            .map_err(ParseFailure::into_errors)
    }

    fn unknown_discriminator(&self, given: Option<&Value>) -> ParseError {
        let accepted = self
            .accepted
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        ParseError::new(
            "discriminatedUnion.discriminator",
            concat!(
                "Input should have discriminator \"{{discriminator}}\" ",
                "with one of {{accepted}}, {{given}} given",
            ),
        )
        .with_variable("discriminator", self.discriminator.as_str())
        .with_variable("accepted", accepted)
        .with_variable("given", given.map_or(serde_json::Value::Null, Value::to_json))
    }
}

impl Schema for DiscriminatedUnionSchema {
    fn parse(&self, input: &Value) -> std::result::Result<Value, ParseFailure> {
        self.modifiers.apply(input, |value| self.check(value))
    }
}

impl SchemaExt for DiscriminatedUnionSchema {
    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}
