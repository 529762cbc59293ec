//! Field validation for book payloads.
//!
//! A [`Schema`] lists the fields a payload must carry and the JSON type of
//! each. [`validate`] reports every violation, grouped per field, instead of
//! stopping at the first one.

use std::collections::BTreeMap;

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use bookhouse_http::error::AppError;
use serde_json::Value;

use super::models::BookFields;

pub const BOOK_VALIDATION_FAILED: &str = "Book validation failed";

/// JSON type a field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Whole number that fits an `i64`. Floats are rejected even when they
    /// have no fractional part.
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub required: bool,
    pub kind: FieldKind,
}

impl Rule {
    pub const fn required(kind: FieldKind) -> Self {
        Self {
            required: true,
            kind,
        }
    }

    pub const fn optional(kind: FieldKind) -> Self {
        Self {
            required: false,
            kind,
        }
    }
}

/// Ordered set of field rules.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [(&'static str, Rule)],
}

impl Schema {
    pub const fn new(fields: &'static [(&'static str, Rule)]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> impl Iterator<Item = &(&'static str, Rule)> {
        self.fields.iter()
    }
}

pub const BOOK_SCHEMA: Schema = Schema::new(&[
    ("name", Rule::required(FieldKind::String)),
    ("description", Rule::required(FieldKind::String)),
    ("author", Rule::required(FieldKind::String)),
    ("publication", Rule::required(FieldKind::Integer)),
]);

/// Violations keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: String) {
        self.fields.entry(field).or_default().push(message);
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the fields that failed, in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// `{field: [messages]}` as sent in the 412 body.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(field, messages)| {
                    let messages = messages.iter().cloned().map(Value::String).collect();
                    (field.to_string(), Value::Array(messages))
                })
                .collect(),
        )
    }
}

/// Check `candidate` against `schema`.
///
/// Anything that is not a JSON object is treated as an object with no fields.
/// `null` and blank strings count as absent.
pub fn validate(candidate: &Value, schema: &Schema) -> Result<(), ValidationErrors> {
    let empty = serde_json::Map::new();
    let object = candidate.as_object().unwrap_or(&empty);
    let mut errors = ValidationErrors::default();

    for &(field, rule) in schema.fields() {
        match object.get(field) {
            None | Some(Value::Null) => {
                if rule.required {
                    errors.add(field, format!("The {field} field is required."));
                }
            }
            Some(Value::String(text)) if text.trim().is_empty() => {
                if rule.required {
                    errors.add(field, format!("The {field} field is required."));
                }
            }
            Some(value) => {
                if let Some(message) = type_violation(field, rule.kind, value) {
                    errors.add(field, message);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn type_violation(field: &str, kind: FieldKind, value: &Value) -> Option<String> {
    match kind {
        FieldKind::String if !value.is_string() => Some(format!("The {field} must be a string.")),
        FieldKind::Integer if value.as_i64().is_none() => {
            Some(format!("The {field} must be an integer."))
        }
        _ => None,
    }
}

/// Extractor that validates the `book` member of a JSON body.
///
/// Rejects with a 412 listing every failing field; handlers only ever see a
/// well-typed [`BookFields`].
pub struct ValidatedBook(pub BookFields);

impl<S> FromRequest<S> for ValidatedBook
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        let candidate = body.get("book").cloned().unwrap_or(Value::Null);

        if let Err(errors) = validate(&candidate, &BOOK_SCHEMA) {
            tracing::debug!(
                fields = ?errors.field_names().collect::<Vec<_>>(),
                "book payload failed validation"
            );
            return Err(AppError::validation(errors.to_json(), BOOK_VALIDATION_FAILED));
        }

        let fields = serde_json::from_value(candidate).map_err(|err| {
            AppError::Internal(anyhow::Error::new(err).context("validated book did not decode"))
        })?;

        Ok(ValidatedBook(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_book() -> Value {
        json!({
            "name": "Neuromancer",
            "description": "Cyberspace heist",
            "author": "William Gibson",
            "publication": 1984
        })
    }

    #[test]
    fn valid_payload_passes() {
        assert_eq!(validate(&valid_book(), &BOOK_SCHEMA), Ok(()));
    }

    #[test]
    fn each_missing_field_is_reported_alone() {
        for field in ["name", "description", "author", "publication"] {
            let mut book = valid_book();
            book.as_object_mut().unwrap().remove(field);

            let errors = validate(&book, &BOOK_SCHEMA).unwrap_err();
            assert_eq!(errors.field_names().collect::<Vec<_>>(), vec![field]);
            assert_eq!(
                errors.get(field).unwrap(),
                [format!("The {field} field is required.")]
            );
        }
    }

    #[test]
    fn missing_payload_fails_every_field() {
        let errors = validate(&Value::Null, &BOOK_SCHEMA).unwrap_err();
        assert_eq!(
            errors.field_names().collect::<Vec<_>>(),
            vec!["author", "description", "name", "publication"]
        );
    }

    #[test]
    fn blank_string_counts_as_missing() {
        let mut book = valid_book();
        book["author"] = json!("   ");

        let errors = validate(&book, &BOOK_SCHEMA).unwrap_err();
        assert_eq!(
            errors.get("author").unwrap(),
            ["The author field is required."]
        );
    }

    #[test]
    fn wrong_types_are_reported() {
        let mut book = valid_book();
        book["name"] = json!(42);
        book["publication"] = json!("1984");

        let errors = validate(&book, &BOOK_SCHEMA).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["The name must be a string."]);
        assert_eq!(
            errors.get("publication").unwrap(),
            ["The publication must be an integer."]
        );
        assert!(errors.get("author").is_none());
    }

    #[test]
    fn fractional_publication_is_not_an_integer() {
        for publication in [json!(1984.5), json!(1984.0), json!(true)] {
            let mut book = valid_book();
            book["publication"] = publication;
            let errors = validate(&book, &BOOK_SCHEMA).unwrap_err();
            assert!(errors.get("publication").is_some());
        }
    }

    #[test]
    fn optional_fields_may_be_absent_but_typed() {
        const SCHEMA: Schema = Schema::new(&[("edition", Rule::optional(FieldKind::Integer))]);

        assert_eq!(validate(&json!({}), &SCHEMA), Ok(()));
        let errors = validate(&json!({"edition": "first"}), &SCHEMA).unwrap_err();
        assert_eq!(
            errors.get("edition").unwrap(),
            ["The edition must be an integer."]
        );
    }

    #[test]
    fn messages_accumulate_per_field() {
        let mut errors = ValidationErrors::default();
        errors.add("name", "first".to_string());
        errors.add("name", "second".to_string());

        assert_eq!(errors.to_json(), json!({"name": ["first", "second"]}));
    }
}
