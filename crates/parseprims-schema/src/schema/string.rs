use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use parseprims_value::Value;
use regex::Regex;
use url::Url;
use uuid::{Uuid, Variant};

use crate::config::DateTimeConfig;
use crate::contract::{Modifiers, Schema, SchemaExt};
use crate::error::{Result, SchemaError};
use crate::failure::ParseFailure;
use crate::parse_error::{ErrorList, ParseError};
use crate::refine::{run_refinements, Refinement};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@",
        r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    ))
    .expect("email pattern compiles")
});

#[derive(Debug, Clone, Copy)]
enum Coercion {
    Trim,
    Lower,
    Upper,
}

impl Coercion {
    fn apply(self, value: String) -> String {
        match self {
            Coercion::Trim => value.trim().to_string(),
            Coercion::Lower => value.to_lowercase(),
            Coercion::Upper => value.to_uppercase(),
        }
    }
}

#[derive(Debug, Clone)]
enum Conversion {
    Int,
    DateTime(DateTimeConfig),
}

/// Accepts strings.
///
/// Refinements run in declaration order and stop at the first violation.
/// Once they all pass, coercions (`trim`, `lower`, `upper`) rewrite the value
/// in declaration order, then the optional conversion (`to_int` or
/// `to_date_time`, last call wins) replaces it.
#[derive(Debug, Clone)]
pub struct StringSchema {
    refinements: Vec<Refinement<str>>,
    coercions: Vec<Coercion>,
    conversion: Option<Conversion>,
    modifiers: Modifiers,
}

impl StringSchema {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            refinements: Vec::new(),
            coercions: Vec::new(),
            conversion: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Minimum length in characters.
    pub fn min(&self, min: usize) -> Self {
        self.refine("min", move |value| {
            let given = value.chars().count();
            if given >= min {
                return Ok(());
            }
            Err(ParseError::new("string.min", "Min length {{min}}, {{given}} given")
                .with_variable("min", min)
                .with_variable("given", given))
        })
    }

    /// Maximum length in characters.
    pub fn max(&self, max: usize) -> Self {
        self.refine("max", move |value| {
            let given = value.chars().count();
            if given <= max {
                return Ok(());
            }
            Err(ParseError::new("string.max", "Max length {{max}}, {{given}} given")
                .with_variable("max", max)
                .with_variable("given", given))
        })
    }

    /// Exact length in characters.
    pub fn length(&self, length: usize) -> Self {
        self.refine("length", move |value| {
            let given = value.chars().count();
            if given == length {
                return Ok(());
            }
            Err(ParseError::new("string.length", "Length {{length}}, {{given}} given")
                .with_variable("length", length)
                .with_variable("given", given))
        })
    }

    pub fn contains(&self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        self.refine("contains", move |value| {
            if value.contains(needle.as_str()) {
                return Ok(());
            }
            Err(ParseError::new(
                "string.contains",
                "\"{{given}}\" does not contain \"{{contains}}\"",
            )
            .with_variable("given", value)
            .with_variable("contains", needle.as_str()))
        })
    }

    pub fn starts_with(&self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.refine("startsWith", move |value| {
            if value.starts_with(prefix.as_str()) {
                return Ok(());
            }
            Err(ParseError::new(
                "string.startsWith",
                "\"{{given}}\" does not start with \"{{startsWith}}\"",
            )
            .with_variable("given", value)
            .with_variable("startsWith", prefix.as_str()))
        })
    }

    pub fn ends_with(&self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.refine("endsWith", move |value| {
            if value.ends_with(suffix.as_str()) {
                return Ok(());
            }
            Err(ParseError::new(
                "string.endsWith",
                "\"{{given}}\" does not end with \"{{endsWith}}\"",
            )
            .with_variable("given", value)
            .with_variable("endsWith", suffix.as_str()))
        })
    }

    /// Require a match of `pattern` (`regex` crate syntax). Fails immediately
    /// if the pattern does not compile.
    pub fn regex(&self, pattern: &str) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|err| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;

        Ok(self.refine("regex", move |value| {
            if compiled.is_match(value) {
                return Ok(());
            }
            Err(
                ParseError::new("string.regex", "\"{{given}}\" does not match \"{{regex}}\"")
                    .with_variable("given", value)
                    .with_variable("regex", compiled.as_str()),
            )
        }))
    }

    pub fn email(&self) -> Self {
        self.refine("email", |value| {
            if EMAIL.is_match(value) {
                return Ok(());
            }
            Err(ParseError::new("string.email", "Invalid email \"{{given}}\"")
                .with_variable("given", value))
        })
    }

    pub fn ip_v4(&self) -> Self {
        self.refine("ipV4", |value| {
            if value.parse::<Ipv4Addr>().is_ok() {
                return Ok(());
            }
            Err(invalid_ip("v4", value))
        })
    }

    pub fn ip_v6(&self) -> Self {
        self.refine("ipV6", |value| {
            if value.parse::<Ipv6Addr>().is_ok() {
                return Ok(());
            }
            Err(invalid_ip("v6", value))
        })
    }

    pub fn url(&self) -> Self {
        self.refine("url", |value| {
            if Url::parse(value).is_ok() {
                return Ok(());
            }
            Err(ParseError::new("string.url", "Invalid url \"{{given}}\"")
                .with_variable("given", value))
        })
    }

    pub fn uuid_v4(&self) -> Self {
        self.refine("uuidV4", |value| {
            if is_uuid(value, 4) {
                return Ok(());
            }
            Err(invalid_uuid("v4", value))
        })
    }

    pub fn uuid_v5(&self) -> Self {
        self.refine("uuidV5", |value| {
            if is_uuid(value, 5) {
                return Ok(());
            }
            Err(invalid_uuid("v5", value))
        })
    }

    /// Add a custom rule after the ones already declared.
    pub fn refine<F>(&self, name: &'static str, check: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<(), ParseError> + Send + Sync + 'static,
    {
        let mut schema = self.clone();
        schema.refinements.push(Refinement::new(name, check));
        schema
    }

    pub fn trim(&self) -> Self {
        self.with_coercion(Coercion::Trim)
    }

    pub fn lower(&self) -> Self {
        self.with_coercion(Coercion::Lower)
    }

    pub fn upper(&self) -> Self {
        self.with_coercion(Coercion::Upper)
    }

    /// Convert to an integer. Only canonical decimal forms are accepted.
    pub fn to_int(&self) -> Self {
        self.with_conversion(Conversion::Int)
    }

    /// Convert to a date-time using [`DateTimeConfig::default`].
    pub fn to_date_time(&self) -> Self {
        self.to_date_time_with(DateTimeConfig::default())
    }

    pub fn to_date_time_with(&self, config: DateTimeConfig) -> Self {
        self.with_conversion(Conversion::DateTime(config))
    }

    fn with_coercion(&self, coercion: Coercion) -> Self {
        let mut schema = self.clone();
        schema.coercions.push(coercion);
        schema
    }

    fn with_conversion(&self, conversion: Conversion) -> Self {
        let mut schema = self.clone();
        schema.conversion = Some(conversion);
        schema
    }

    fn check(&self, input: &Value) -> std::result::Result<Value, ErrorList> {
        let Value::String(value) = input else {
            return Err(ErrorList::from(ParseError::type_mismatch("string", "string", input)));
        };

        run_refinements(&self.refinements, value.as_str())?;

        let value = self
            .coercions
            .iter()
            .fold(value.clone(), |value, coercion| coercion.apply(value));

        match &self.conversion {
            None => Ok(Value::String(value)),
            Some(Conversion::Int) => to_int(&value).map(Value::Int).ok_or_else(|| {
                ErrorList::from(
                    ParseError::new("string.int", "Invalid int \"{{given}}\"")
                        .with_variable("given", value.as_str()),
                )
            }),
            Some(Conversion::DateTime(config)) => to_date_time(&value, config)
                .map(Value::DateTime)
                .ok_or_else(|| {
                    ErrorList::from(
                        ParseError::new("string.datetime", "Invalid datetime \"{{given}}\"")
                            .with_variable("given", value.as_str()),
                    )
                }),
        }
    }
}

impl Schema for StringSchema {
    fn parse(&self, input: &Value) -> std::result::Result<Value, ParseFailure> {
        self.modifiers.apply(input, |value| self.check(value))
    }
}

impl SchemaExt for StringSchema {
    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

fn invalid_ip(version: &str, value: &str) -> ParseError {
    ParseError::new("string.ip", "Invalid ip {{version}} \"{{given}}\"")
        .with_variable("version", version)
        .with_variable("given", value)
}

fn invalid_uuid(version: &str, value: &str) -> ParseError {
    ParseError::new("string.uuid", "Invalid uuid {{version}} \"{{given}}\"")
        .with_variable("version", version)
        .with_variable("given", value)
}

// Hyphenated form only; braced, urn and simple forms are rejected.
fn is_uuid(value: &str, version: usize) -> bool {
    value.len() == 36
        && Uuid::parse_str(value)
            .map(|uuid| uuid.get_version_num() == version && uuid.get_variant() == Variant::RFC4122)
            .unwrap_or(false)
}

fn to_int(value: &str) -> Option<i64> {
    value
        .parse::<i64>()
        .ok()
        .filter(|parsed| parsed.to_string() == value)
}

fn to_date_time(value: &str, config: &DateTimeConfig) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }

    config.formats.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(value, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .and_then(|naive| naive.and_local_timezone(config.offset).single())
    })
}
