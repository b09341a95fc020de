//! Parses a list of people with contact details and prints either the
//! validated records or every violation with its path.
//!
//! Run with:
//!   cargo run --example person-registry -- people.json
//!
//! Without an argument a built-in payload containing one invalid entry is used.
//! Set `PARSEPRIMS_LOG=debug` to see union dispatch in the logs.

use std::fs;

use parseprims::schema::{
    ArraySchema, DiscriminatedUnionSchema, ErrorList, IntSchema, LiteralSchema, ObjectSchema,
    ParseError, Schema, SchemaExt, StringSchema, UnionSchema,
};
use parseprims::value::Value;
use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;

const SAMPLE: &str = r#"[
    {
        "firstname": "James",
        "lastname": "Smith",
        "age": 32,
        "contactDetails": [
            {"_type": "email", "value": "james.smith@example.com"},
            {"_type": "phone", "value": "+41790000000"}
        ]
    },
    {"firstname": "Jane", "lastname": "Smith", "age": "28"},
    {"firstname": "John", "age": "old", "contactDetails": [{"_type": "fax", "value": "1"}]}
]"#;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Person {
    firstname: String,
    lastname: String,
    age: Option<i64>,
    #[serde(rename = "contactDetails")]
    contact_details: Vec<ContactDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
#[allow(dead_code)]
enum ContactDetail {
    Email { value: String },
    Phone { value: String },
}

fn init_logging() {
    let level = match std::env::var("PARSEPRIMS_LOG").as_deref() {
        Ok("trace") => LevelFilter::TRACE,
        Ok("debug") => LevelFilter::DEBUG,
        Ok("info") => LevelFilter::INFO,
        _ => LevelFilter::WARN,
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

fn schema() -> Result<ArraySchema, Box<dyn std::error::Error>> {
    let age_from_string = StringSchema::new()
        .transform(|value: Value, errors: &mut ErrorList| {
            let Some(age) = value.as_str().map(str::to_owned) else {
                return value;
            };
            match age.parse::<i64>() {
                Ok(parsed) if parsed.to_string() == age => Value::from(parsed),
                _ => {
                    errors.push(
                        ParseError::new("age.int", "Age '{{given}}' is not parseable to integer")
                            .with_variable("given", age),
                    );
                    value
                }
            }
        })
        .nullable();

    let contact_detail = DiscriminatedUnionSchema::new(
        vec![
            ObjectSchema::new()
                .field("_type", LiteralSchema::new("email"))
                .field("value", StringSchema::new().email()),
            ObjectSchema::new()
                .field("_type", LiteralSchema::new("phone"))
                .field("value", StringSchema::new()),
        ],
        "_type",
    )?;

    let person = ObjectSchema::new()
        .field("firstname", StringSchema::new())
        .field("lastname", StringSchema::new())
        .field(
            "age",
            UnionSchema::new(vec![IntSchema::new().boxed(), age_from_string.boxed()])?,
        )
        .field(
            "contactDetails",
            ArraySchema::new(contact_detail).default(Value::Array(vec![])),
        )
        .target::<Person>();

    Ok(ArraySchema::new(person))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let payload = match std::env::args().nth(1) {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };
    let input = Value::from(serde_json::from_str::<serde_json::Value>(&payload)?);

    match schema()?.parse(&input) {
        Ok(output) => {
            for person in output.as_array().unwrap_or_default() {
                if let Some(person) = person.downcast_ref::<Person>() {
                    println!("{person:?}");
                }
            }
        }
        Err(failure) => {
            eprintln!("{failure}");
            println!("{}", serde_json::to_string_pretty(&failure.flatten())?);
            std::process::exit(1);
        }
    }

    Ok(())
}
