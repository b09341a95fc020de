use std::fmt;

use parseprims_value::Value;
use serde::Serialize;

/// Variables referenced by a [`ParseError`] template.
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// One validation violation: a stable code, a message template with
/// `{{name}}` placeholders, and the variables that fill them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseError {
    pub code: String,
    pub template: String,
    pub variables: Variables,
}

impl ParseError {
    pub fn new(code: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            template: template.into(),
            variables: Variables::new(),
        }
    }

    /// Attach a template variable.
    pub fn with_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// `Type should be "<expected>", "<kind of given>" given`.
    pub fn type_mismatch(prefix: &str, expected: &str, given: &Value) -> Self {
        Self::new(
            format!("{prefix}.type"),
            format!("Type should be \"{expected}\", \"{{{{given}}}}\" given"),
        )
        .with_variable("given", given.kind())
    }

    /// Render the template with its variables substituted.
    pub fn message(&self) -> String {
        let mut message = self.template.clone();
        for (name, value) in &self.variables {
            let placeholder = format!("{{{{{name}}}}}");
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            message = message.replace(&placeholder, &rendered);
        }
        message
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Location of a nested error list inside its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object field name.
    Field(String),
    /// Array index.
    Index(usize),
    /// Union alternative. Kept in the tree, omitted from rendered paths.
    Member(usize),
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        PathSegment::Field(value.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(value: String) -> Self {
        PathSegment::Field(value)
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        PathSegment::Index(value)
    }
}

/// Direct entry of an [`ErrorList`].
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorEntry {
    Error(ParseError),
    Nested {
        segment: PathSegment,
        errors: ErrorList,
    },
}

/// Ordered, path-structured collection of the violations found by one parse
/// attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorList {
    entries: Vec<ErrorEntry>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error at this level.
    pub fn push(&mut self, error: ParseError) {
        self.entries.push(ErrorEntry::Error(error));
    }

    /// Append a child list under `segment`. Empty lists are dropped.
    pub fn nest(&mut self, segment: impl Into<PathSegment>, errors: ErrorList) {
        if errors.is_empty() {
            return;
        }
        self.entries.push(ErrorEntry::Nested {
            segment: segment.into(),
            errors,
        });
    }

    /// Append every entry of `other` at this level.
    pub fn extend(&mut self, other: ErrorList) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of errors in the whole tree.
    pub fn count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                ErrorEntry::Error(_) => 1,
                ErrorEntry::Nested { errors, .. } => errors.count(),
            })
            .sum()
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Errors recorded directly at this level.
    pub fn errors(&self) -> impl Iterator<Item = &ParseError> {
        self.entries.iter().filter_map(|entry| match entry {
            ErrorEntry::Error(error) => Some(error),
            ErrorEntry::Nested { .. } => None,
        })
    }

    /// First child list recorded under `segment`.
    pub fn nested(&self, segment: impl Into<PathSegment>) -> Option<&ErrorList> {
        let segment = segment.into();
        self.entries.iter().find_map(|entry| match entry {
            ErrorEntry::Nested {
                segment: found,
                errors,
            } if *found == segment => Some(errors),
            _ => None,
        })
    }

    /// Flatten the tree into records carrying a rendered path such as
    /// `contactDetails[1].value`.
    pub fn flatten(&self) -> Vec<FlatError> {
        let mut out = Vec::new();
        self.flatten_into(String::new(), &mut out);
        out
    }

    fn flatten_into(&self, prefix: String, out: &mut Vec<FlatError>) {
        for entry in &self.entries {
            match entry {
                ErrorEntry::Error(error) => out.push(FlatError {
                    path: prefix.clone(),
                    code: error.code.clone(),
                    template: error.template.clone(),
                    variables: error.variables.clone(),
                }),
                ErrorEntry::Nested { segment, errors } => {
                    errors.flatten_into(join_path(&prefix, segment), out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, segment: &PathSegment) -> String {
    match segment {
        PathSegment::Field(name) if prefix.is_empty() => name.clone(),
        PathSegment::Field(name) => format!("{prefix}.{name}"),
        PathSegment::Index(index) => format!("{prefix}[{index}]"),
        PathSegment::Member(_) => prefix.to_string(),
    }
}

impl From<ParseError> for ErrorList {
    fn from(error: ParseError) -> Self {
        let mut list = Self::new();
        list.push(error);
        list
    }
}

/// A single error with its location rendered as a path string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatError {
    pub path: String,
    pub code: String,
    pub template: String,
    pub variables: Variables,
}

impl FlatError {
    pub fn message(&self) -> String {
        ParseError {
            code: self.code.clone(),
            template: self.template.clone(),
            variables: self.variables.clone(),
        }
        .message()
    }
}

impl fmt::Display for FlatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message())
        } else {
            write!(f, "{}: {}", self.path, self.message())
        }
    }
}
