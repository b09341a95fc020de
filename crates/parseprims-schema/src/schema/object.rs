use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parseprims_value::{Map, Record, Value};
use serde::de::DeserializeOwned;

use crate::contract::{Modifiers, Schema, SchemaExt};
use crate::failure::ParseFailure;
use crate::parse_error::{ErrorList, ParseError, PathSegment};

type BuildFn = dyn Fn(Map) -> Result<Record, String> + Send + Sync;

/// Named product type an object schema materializes into.
#[derive(Clone)]
struct Target {
    type_name: &'static str,
    build: Arc<BuildFn>,
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Target").field(&self.type_name).finish()
    }
}

/// Applies named field schemas to a mapping.
///
/// Fields are parsed in declaration order and every field is always attempted.
/// A missing key is parsed as null. Output is an open [`Value::Object`], or a
/// [`Value::Record`] when a target type is set with [`ObjectSchema::target`].
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    fields: Vec<(String, Arc<dyn Schema>)>,
    strict: Option<Vec<String>>,
    target: Option<Target>,
    modifiers: Modifiers,
}

impl ObjectSchema {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            strict: None,
            target: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Declare a field. Redeclaring a name replaces its schema in place.
    pub fn field(&self, name: impl Into<String>, schema: impl Schema + 'static) -> Self {
        let name = name.into();
        let schema: Arc<dyn Schema> = Arc::new(schema);
        let mut object = self.clone();
        match object.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = schema,
            None => object.fields.push((name, schema)),
        }
        object
    }

    /// Schema of a declared field.
    pub fn field_schema(&self, name: &str) -> Option<&Arc<dyn Schema>> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, schema)| schema)
    }

    /// Declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Reject input keys that are not declared.
    pub fn strict(&self) -> Self {
        self.strict_allowing(Vec::<String>::new())
    }

    /// Reject input keys that are neither declared nor listed in `allow`.
    pub fn strict_allowing<I, S>(&self, allow: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = self.clone();
        schema.strict = Some(allow.into_iter().map(Into::into).collect());
        schema
    }

    /// Materialize successful output into `T`, deserialized from the parsed
    /// field map.
    pub fn target<T>(&self) -> Self
    where
        T: DeserializeOwned + Any + Send + Sync,
    {
        let build = |fields: Map| -> Result<Record, String> {
            let json = serde_json::to_value(&fields).map_err(|err| err.to_string())?;
            let instance: T = serde_json::from_value(json).map_err(|err| err.to_string())?;
            Ok(Record::from_parts(fields, instance))
        };

        let mut schema = self.clone();
        schema.target = Some(Target {
            type_name: std::any::type_name::<T>(),
            build: Arc::new(build),
        });
        schema
    }

    fn check(&self, input: &Value) -> Result<Value, ErrorList> {
        let Some(fields) = input.fields() else {
            return Err(ErrorList::from(ParseError::type_mismatch("object", "object", input)));
        };

        let mut errors = ErrorList::new();
        let mut output = Map::new();
        for (name, schema) in &self.fields {
            let raw = fields.get(name).unwrap_or(&Value::Null);
            match schema.parse(raw) {
                Ok(value) => {
                    output.insert(name.clone(), value);
                }
                Err(failure) => {
                    errors.nest(PathSegment::Field(name.clone()), failure.into_errors())
                }
            }
        }

        if let Some(allow) = &self.strict {
            for key in fields.keys() {
                if self.field_schema(key).is_some() || allow.contains(key) {
                    continue;
                }
                errors.nest(
                    PathSegment::Field(key.clone()),
                    ErrorList::from(
                        ParseError::new("object.unknownField", "Unknown field \"{{fieldName}}\"")
                            .with_variable("fieldName", key.as_str()),
                    ),
                );
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        match &self.target {
            None => Ok(Value::Object(output)),
            Some(target) => (target.build)(output).map(Value::Record).map_err(|reason| {
                ErrorList::from(
                    ParseError::new("object.materialize", "Cannot build \"{{type}}\": {{reason}}")
                        .with_variable("type", target.type_name)
                        .with_variable("reason", reason),
                )
            }),
        }
    }
}

impl Schema for ObjectSchema {
    fn parse(&self, input: &Value) -> Result<Value, ParseFailure> {
        self.modifiers.apply(input, |value| self.check(value))
    }
}

impl SchemaExt for ObjectSchema {
    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}
