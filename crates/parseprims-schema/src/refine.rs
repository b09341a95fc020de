use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::parse_error::ParseError;

type CheckFn<T> = dyn Fn(&T) -> Result<(), ParseError> + Send + Sync;

/// A named post-type-check rule over an already type-checked value.
pub struct Refinement<T: ?Sized> {
    name: Cow<'static, str>,
    check: Arc<CheckFn<T>>,
}

impl<T: ?Sized> Refinement<T> {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&T) -> Result<(), ParseError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, value: &T) -> Result<(), ParseError> {
        (self.check)(value)
    }
}

impl<T: ?Sized> Clone for Refinement<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Refinement<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Refinement").field(&self.name).finish()
    }
}

/// Run refinements in order, stopping at the first violation.
pub(crate) fn run_refinements<T: ?Sized>(
    refinements: &[Refinement<T>],
    value: &T,
) -> Result<(), ParseError> {
    refinements
        .iter()
        .try_for_each(|refinement| refinement.check(value))
}

/// Inclusive lower bound refinement shared by numeric schemas.
pub(crate) fn gte<T>(prefix: &'static str, min: T) -> Refinement<T>
where
    T: PartialOrd + Copy + Into<serde_json::Value> + Send + Sync + 'static,
{
    Refinement::new("gte", move |value: &T| {
        if *value >= min {
            return Ok(());
        }
        Err(ParseError::new(
            format!("{prefix}.gte"),
            "Value should be greater than or equal {{gte}}, {{given}} given",
        )
        .with_variable("gte", min)
        .with_variable("given", *value))
    })
}

/// Inclusive upper bound refinement shared by numeric schemas.
pub(crate) fn lte<T>(prefix: &'static str, max: T) -> Refinement<T>
where
    T: PartialOrd + Copy + Into<serde_json::Value> + Send + Sync + 'static,
{
    Refinement::new("lte", move |value: &T| {
        if *value <= max {
            return Ok(());
        }
        Err(ParseError::new(
            format!("{prefix}.lte"),
            "Value should be lesser than or equal {{lte}}, {{given}} given",
        )
        .with_variable("lte", max)
        .with_variable("given", *value))
    })
}
