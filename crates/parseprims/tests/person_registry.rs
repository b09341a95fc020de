#![cfg(feature = "schema")]

use std::sync::Arc;
use std::thread;

use parseprims::schema::{
    ArraySchema, DiscriminatedUnionSchema, ErrorList, IntSchema, LiteralSchema, ObjectSchema,
    ParseError, Schema, SchemaExt, StringSchema, UnionSchema,
};
use parseprims::value::Value;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Person {
    firstname: String,
    lastname: String,
    age: Option<i64>,
    #[serde(rename = "contactDetails")]
    contact_details: Vec<ContactDetail>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
enum ContactDetail {
    Email { value: String },
    Phone { value: String },
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Email {
    #[serde(rename = "_type")]
    kind: String,
    value: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Phone {
    #[serde(rename = "_type")]
    kind: String,
    value: String,
}

fn age_from_string() -> StringSchema {
    StringSchema::new()
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
        .nullable()
}

fn contact_detail() -> DiscriminatedUnionSchema {
    DiscriminatedUnionSchema::new(
        vec![
            ObjectSchema::new()
                .field("_type", LiteralSchema::new("email"))
                .field("value", StringSchema::new().email())
                .target::<Email>(),
            ObjectSchema::new()
                .field("_type", LiteralSchema::new("phone"))
                .field("value", StringSchema::new())
                .target::<Phone>(),
        ],
        "_type",
    )
    .expect("contact detail union should build")
}

fn person() -> ObjectSchema {
    let age = UnionSchema::new(vec![IntSchema::new().boxed(), age_from_string().boxed()])
        .expect("age union should build");

    ObjectSchema::new()
        .field("firstname", StringSchema::new())
        .field("lastname", StringSchema::new())
        .field("age", age)
        .field(
            "contactDetails",
            ArraySchema::new(contact_detail()).default(Value::Array(vec![])),
        )
        .target::<Person>()
}

fn persons() -> ArraySchema {
    ArraySchema::new(person())
}

fn input(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn parses_people_into_target_types() {
    let result = persons().safe_parse(&input(json!([
        {
            "firstname": "James",
            "lastname": "Smith",
            "age": 32,
            "contactDetails": [
                {"_type": "email", "value": "james.smith@example.com"},
                {"_type": "phone", "value": "+41790000000"}
            ]
        },
        {"firstname": "Jane", "lastname": "Smith", "age": "28"}
    ])));

    assert!(result.is_success());
    let data = result.into_data().expect("successful parse should carry data");
    let people = data.as_array().expect("output should be a sequence");
    assert_eq!(people.len(), 2);

    assert_eq!(
        people[0].downcast_ref::<Person>(),
        Some(&Person {
            firstname: "James".to_string(),
            lastname: "Smith".to_string(),
            age: Some(32),
            contact_details: vec![
                ContactDetail::Email {
                    value: "james.smith@example.com".to_string(),
                },
                ContactDetail::Phone {
                    value: "+41790000000".to_string(),
                },
            ],
        })
    );

    let jane = people[1]
        .downcast_ref::<Person>()
        .expect("second entry should be a person");
    assert_eq!(jane.age, Some(28));
    assert!(jane.contact_details.is_empty());

    let contacts = people[0]
        .get("contactDetails")
        .and_then(Value::as_array)
        .expect("contact details should be a sequence");
    assert!(contacts[0].downcast_ref::<Email>().is_some());
    assert!(contacts[1].downcast_ref::<Phone>().is_some());
}

#[test]
fn null_age_is_accepted_by_the_nullable_alternative() {
    let output = person()
        .parse(&input(json!({"firstname": "Jane", "lastname": "Smith", "age": null})))
        .expect("null age should parse");
    assert_eq!(output.downcast_ref::<Person>().map(|p| p.age), Some(None));
}

#[test]
fn unparseable_age_reports_every_alternative() {
    let failure = persons()
        .parse(&input(json!([
            {"firstname": "Jane", "lastname": "Smith", "age": "twenty"}
        ])))
        .expect_err("non-numeric age should fail");

    let flat = failure.flatten();
    let codes: Vec<&str> = flat.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["int.type", "age.int"]);
    assert!(flat.iter().all(|e| e.path == "[0].age"));
    assert_eq!(flat[1].message(), "Age 'twenty' is not parseable to integer");
}

#[test]
fn failed_transform_keeps_its_computed_value() {
    let failure = age_from_string()
        .parse(&Value::from("twenty"))
        .expect_err("transform error should fail the parse");
    assert_eq!(failure.output(), Some(&Value::from("twenty")));
    assert_eq!(failure.errors().count(), 1);
}

#[test]
fn nested_failure_paths_are_rendered() {
    let failure = person()
        .parse(&input(json!({
            "firstname": "Jane",
            "lastname": "Smith",
            "age": 28,
            "contactDetails": [
                {"_type": "email", "value": "jane@example.com"},
                {"_type": "phone", "value": 41790000000i64}
            ]
        })))
        .expect_err("numeric phone value should fail");

    let flat = failure.flatten();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].path, "contactDetails[1].value");
    assert_eq!(flat[0].code, "string.type");
    assert_eq!(
        flat[0].to_string(),
        "contactDetails[1].value: Type should be \"string\", \"integer\" given"
    );
}

#[test]
fn every_violation_in_the_payload_is_collected() {
    let failure = persons()
        .parse(&input(json!([
            {"firstname": 123},
            {"firstname": "Jane", "lastname": "Smith", "age": 1, "contactDetails": [
                {"_type": "fax", "value": "1"},
                {"_type": "email", "value": "not-an-email"}
            ]}
        ])))
        .expect_err("payload should fail");

    let paths: Vec<String> = failure.flatten().into_iter().map(|e| e.path).collect();
    assert_eq!(
        paths,
        vec![
            "[0].firstname",
            "[0].lastname",
            "[1].contactDetails[0]._type",
            "[1].contactDetails[1].value",
        ]
    );
}

#[test]
fn unknown_discriminator_names_accepted_set() {
    let flat = contact_detail()
        .parse(&input(json!({"_type": "fax", "value": "1"})))
        .expect_err("fax is not a contact detail")
        .flatten();

    assert_eq!(flat[0].code, "discriminatedUnion.discriminator");
    assert_eq!(
        flat[0].message(),
        "Input should have discriminator \"_type\" with one of \"email\", \"phone\", fax given"
    );
}

#[test]
fn strict_person_rejects_extra_keys() {
    let payload = input(json!({"firstname": "Jane", "lastname": "Smith", "age": 28, "extra": 1}));

    assert!(person().parse(&payload).is_ok());

    let flat = person()
        .strict()
        .parse(&payload)
        .expect_err("strict schema should reject extra")
        .flatten();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].path, "extra");
    assert_eq!(flat[0].variables.get("fieldName"), Some(&json!("extra")));
}

#[test]
fn parsed_output_parses_again() {
    let first = person()
        .parse(&input(json!({
            "firstname": "Jane",
            "lastname": "Smith",
            "age": "28",
            "contactDetails": [{"_type": "phone", "value": "+41790000000"}]
        })))
        .expect("first parse should succeed");

    let second = person().parse(&first).expect("record input should parse");
    assert_eq!(first, second);
    assert_eq!(
        second.downcast_ref::<Person>(),
        first.downcast_ref::<Person>()
    );
}

#[test]
fn safe_parse_envelope_holds_exactly_one_side() {
    let result = persons().safe_parse(&input(json!("not a list")));
    assert!(!result.is_success());
    assert!(result.data().is_none());

    let failure = result.into_result().expect_err("envelope should hold an error");
    assert_eq!(failure.flatten()[0].code, "array.type");
}

#[test]
fn flattened_errors_serialize() {
    let failure = person()
        .parse(&input(json!({"firstname": "Jane"})))
        .expect_err("missing fields should fail");

    let report = serde_json::to_value(failure.flatten()).expect("flat errors should serialize");
    assert_eq!(report[0]["path"], json!("lastname"));
    assert_eq!(report[0]["code"], json!("string.type"));
    assert_eq!(report[0]["variables"]["given"], json!("null"));
}

#[test]
fn modifiers_leave_the_original_untouched() {
    let base = person();
    let with_default = base.default(json!({"firstname": "Nobody"}));

    assert!(with_default.parse(&Value::Null).is_ok());
    assert_eq!(
        base.parse(&Value::Null)
            .expect_err("base schema should still reject null")
            .flatten()[0]
            .code,
        "object.type"
    );
}

#[test]
fn one_schema_serves_many_threads() {
    let schema: Arc<dyn Schema> = persons().boxed();

    thread::scope(|scope| {
        for age in 0..8i64 {
            let schema = Arc::clone(&schema);
            scope.spawn(move || {
                let output = schema
                    .parse(&input(json!([
                        {"firstname": "Jane", "lastname": "Smith", "age": age.to_string()}
                    ])))
                    .expect("parse should succeed on every thread");
                let people = output.as_array().expect("output should be a sequence");
                assert_eq!(
                    people[0].downcast_ref::<Person>().and_then(|p| p.age),
                    Some(age)
                );
            });
        }
    });
}
