//! Behavior shared by every schema kind.
//!
//! A parse call runs in a fixed order:
//!
//! 1. null input with a default configured returns the default as-is
//! 2. null input on a nullable schema returns null
//! 3. the kind-specific check (type test plus refinements)
//! 4. the transform, which may append errors while still producing a value
//! 5. on failure, the catch handler replaces the failure with a value

use std::fmt;
use std::sync::Arc;

use parseprims_value::Value;
use tracing::debug;

use crate::failure::{ParseFailure, SafeParse};
use crate::parse_error::ErrorList;
use crate::schema::literal::Literal;

/// Output rewrite applied after a successful check. Errors pushed onto the
/// list fail the parse.
pub type TransformFn = Arc<dyn Fn(Value, &mut ErrorList) -> Value + Send + Sync>;

/// Recovery handler receiving the raw input and the failure.
pub type CatchFn = Arc<dyn Fn(&Value, &ParseFailure) -> Value + Send + Sync>;

/// Object-safe parse contract implemented by every schema kind.
pub trait Schema: fmt::Debug + Send + Sync {
    /// Validate and coerce `input`.
    fn parse(&self, input: &Value) -> Result<Value, ParseFailure>;

    /// Like [`Schema::parse`], with the outcome folded into an envelope.
    fn safe_parse(&self, input: &Value) -> SafeParse {
        SafeParse::from(self.parse(input))
    }

    /// The literal this schema accepts, for literal-valued schemas.
    fn as_literal(&self) -> Option<&Literal> {
        None
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    fn parse(&self, input: &Value) -> Result<Value, ParseFailure> {
        (**self).parse(input)
    }

    fn safe_parse(&self, input: &Value) -> SafeParse {
        (**self).safe_parse(input)
    }

    fn as_literal(&self) -> Option<&Literal> {
        (**self).as_literal()
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    fn parse(&self, input: &Value) -> Result<Value, ParseFailure> {
        (**self).parse(input)
    }

    fn safe_parse(&self, input: &Value) -> SafeParse {
        (**self).safe_parse(input)
    }

    fn as_literal(&self) -> Option<&Literal> {
        (**self).as_literal()
    }
}

/// Fluent modifiers. Each call returns a modified copy and leaves the
/// receiver untouched.
pub trait SchemaExt: Schema + Clone + Sized + 'static {
    fn modifiers_mut(&mut self) -> &mut Modifiers;

    /// Accept null, skipping the check and the transform.
    fn nullable(&self) -> Self {
        let mut schema = self.clone();
        schema.modifiers_mut().nullable = true;
        schema
    }

    /// Substitute `value` for null input. The default is returned unvalidated.
    fn default(&self, value: impl Into<Value>) -> Self {
        let mut schema = self.clone();
        schema.modifiers_mut().default = Some(value.into());
        schema
    }

    fn transform<F>(&self, transform: F) -> Self
    where
        F: Fn(Value, &mut ErrorList) -> Value + Send + Sync + 'static,
    {
        let mut schema = self.clone();
        schema.modifiers_mut().transform = Some(Arc::new(transform));
        schema
    }

    fn catch<F>(&self, catch: F) -> Self
    where
        F: Fn(&Value, &ParseFailure) -> Value + Send + Sync + 'static,
    {
        let mut schema = self.clone();
        schema.modifiers_mut().catch = Some(Arc::new(catch));
        schema
    }

    /// Share this schema as a trait object.
    fn boxed(&self) -> Arc<dyn Schema> {
        Arc::new(self.clone())
    }
}

/// Modifier state common to every schema kind.
#[derive(Clone, Default)]
pub struct Modifiers {
    nullable: bool,
    default: Option<Value>,
    transform: Option<TransformFn>,
    catch: Option<CatchFn>,
}

impl Modifiers {
    /// Run the full pipeline around a kind-specific `check`.
    pub fn apply<F>(&self, input: &Value, check: F) -> Result<Value, ParseFailure>
    where
        F: FnOnce(&Value) -> Result<Value, ErrorList>,
    {
        if input.is_null() {
            if let Some(default) = &self.default {
                return Ok(default.clone());
            }
            if self.nullable {
                return Ok(Value::Null);
            }
        }

        let result = check(input)
            .map_err(ParseFailure::new)
            .and_then(|output| self.run_transform(output));

        match (result, &self.catch) {
            (Err(failure), Some(catch)) => {
                debug!(errors = failure.errors().count(), "parse failure recovered by catch");
                Ok(catch(input, &failure))
            }
            (result, _) => result,
        }
    }

    fn run_transform(&self, output: Value) -> Result<Value, ParseFailure> {
        let Some(transform) = &self.transform else {
            return Ok(output);
        };

        let mut errors = ErrorList::new();
        let output = transform(output, &mut errors);
        if errors.is_empty() {
            Ok(output)
        } else {
            Err(ParseFailure::with_output(errors, output))
        }
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modifiers")
            .field("nullable", &self.nullable)
            .field("default", &self.default)
            .field("transform", &self.transform.is_some())
            .field("catch", &self.catch.is_some())
            .finish()
    }
}
