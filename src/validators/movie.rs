use super::{FieldViolation, ValidationError, ViolationCode};
use crate::interfaces::movies::{CreatingMovie, Genre, UpdatingMovie};
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use url::Url;

pub const YEAR_RANGE: RangeInclusive<i64> = 1900..=2100;
pub const RATE_RANGE: RangeInclusive<f64> = 0.0..=10.0;

/// Validates a body for creation. Every field is required.
pub fn validate_movie(payload: &Value) -> Result<CreatingMovie, ValidationError> {
    let mut fields = Fields::new(payload)?;

    let title = fields.required("title", text);
    let genre = fields.required("genre", genres);
    let year = fields.required("year", year);
    let director = fields.required("director", text);
    let duration = fields.required("duration", duration);
    let rate = fields.required("rate", rate);
    let poster = fields.required("poster", poster);

    match (title, genre, year, director, duration, rate, poster) {
        (
            Some(title),
            Some(genre),
            Some(year),
            Some(director),
            Some(duration),
            Some(rate),
            Some(poster),
        ) if fields.is_clean() => Ok(CreatingMovie {
            title,
            genre,
            year,
            director,
            duration,
            rate,
            poster,
        }),
        _ => Err(fields.into_error()),
    }
}

/// Validates a body for update. Nothing is required; an empty object is an empty update.
pub fn validate_partial_movie(payload: &Value) -> Result<UpdatingMovie, ValidationError> {
    let mut fields = Fields::new(payload)?;

    let movie = UpdatingMovie {
        title: fields.optional("title", text),
        genre: fields.optional("genre", genres),
        year: fields.optional("year", year),
        director: fields.optional("director", text),
        duration: fields.optional("duration", duration),
        rate: fields.optional("rate", rate),
        poster: fields.optional("poster", poster),
    };

    if fields.is_clean() {
        Ok(movie)
    } else {
        Err(fields.into_error())
    }
}

type Parser<T> = fn(&str, &Value) -> Result<T, FieldViolation>;

struct Fields<'a> {
    object: &'a Map<String, Value>,
    violations: Vec<FieldViolation>,
}

impl<'a> Fields<'a> {
    fn new(payload: &'a Value) -> Result<Self, ValidationError> {
        match payload.as_object() {
            Some(object) => Ok(Self {
                object,
                violations: Vec::new(),
            }),
            None => Err(ValidationError {
                violations: vec![FieldViolation::new(
                    "",
                    ViolationCode::InvalidType,
                    format!("expected object, received {}", type_name(payload)),
                )],
            }),
        }
    }

    fn required<T>(&mut self, field: &str, parse: Parser<T>) -> Option<T> {
        if !self.object.contains_key(field) {
            self.violations.push(FieldViolation::new(
                field,
                ViolationCode::Required,
                format!("`{field}` is required"),
            ));
            return None;
        }

        self.optional(field, parse)
    }

    fn optional<T>(&mut self, field: &str, parse: Parser<T>) -> Option<T> {
        let value = self.object.get(field)?;

        match parse(field, value) {
            Ok(value) => Some(value),
            Err(violation) => {
                self.violations.push(violation);
                None
            }
        }
    }

    fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn into_error(self) -> ValidationError {
        ValidationError {
            violations: self.violations,
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid_type(field: &str, expected: &str, value: &Value) -> FieldViolation {
    FieldViolation::new(
        field,
        ViolationCode::InvalidType,
        format!("expected {expected}, received {}", type_name(value)),
    )
}

fn text(field: &str, value: &Value) -> Result<String, FieldViolation> {
    let text = value
        .as_str()
        .ok_or_else(|| invalid_type(field, "string", value))?;

    if text.trim().is_empty() {
        return Err(FieldViolation::new(
            field,
            ViolationCode::TooSmall,
            format!("`{field}` must not be empty"),
        ));
    }

    Ok(text.to_owned())
}

fn integer(field: &str, value: &Value) -> Result<i64, FieldViolation> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }

    if value.as_u64().is_some() {
        return Ok(i64::MAX);
    }

    // 2020.0 is still an integer
    match value.as_f64() {
        Some(n) if n.fract() == 0.0 => Ok(n as i64),
        _ => Err(invalid_type(field, "integer", value)),
    }
}

fn bounded(field: &str, n: i64, range: RangeInclusive<i64>) -> Result<i64, FieldViolation> {
    if n < *range.start() {
        return Err(FieldViolation::new(
            field,
            ViolationCode::TooSmall,
            format!("`{field}` must be greater than or equal to {}", range.start()),
        ));
    }

    if n > *range.end() {
        return Err(FieldViolation::new(
            field,
            ViolationCode::TooBig,
            format!("`{field}` must be less than or equal to {}", range.end()),
        ));
    }

    Ok(n)
}

fn year(field: &str, value: &Value) -> Result<u16, FieldViolation> {
    let year = bounded(field, integer(field, value)?, YEAR_RANGE)?;

    // the range keeps it well inside u16
    Ok(year as u16)
}

fn duration(field: &str, value: &Value) -> Result<u32, FieldViolation> {
    let duration = bounded(field, integer(field, value)?, 1..=u32::MAX as i64)?;

    Ok(duration as u32)
}

fn rate(field: &str, value: &Value) -> Result<f64, FieldViolation> {
    let rate = value
        .as_f64()
        .ok_or_else(|| invalid_type(field, "number", value))?;

    if rate < *RATE_RANGE.start() {
        return Err(FieldViolation::new(
            field,
            ViolationCode::TooSmall,
            format!("`{field}` must be greater than or equal to {}", RATE_RANGE.start()),
        ));
    }

    if rate > *RATE_RANGE.end() {
        return Err(FieldViolation::new(
            field,
            ViolationCode::TooBig,
            format!("`{field}` must be less than or equal to {}", RATE_RANGE.end()),
        ));
    }

    Ok(rate)
}

fn poster(field: &str, value: &Value) -> Result<String, FieldViolation> {
    let poster = value
        .as_str()
        .ok_or_else(|| invalid_type(field, "string", value))?;

    match Url::parse(poster) {
        Ok(url) if !url.cannot_be_a_base() => Ok(poster.to_owned()),
        _ => Err(FieldViolation::new(
            field,
            ViolationCode::InvalidUrl,
            format!("`{field}` must be a valid URL"),
        )),
    }
}

fn genres(field: &str, value: &Value) -> Result<Vec<Genre>, FieldViolation> {
    let tags = value
        .as_array()
        .ok_or_else(|| invalid_type(field, "array", value))?;

    if tags.is_empty() {
        return Err(FieldViolation::new(
            field,
            ViolationCode::TooSmall,
            format!("`{field}` must contain at least one genre"),
        ));
    }

    let mut genres = Vec::with_capacity(tags.len());

    for tag in tags {
        match tag.as_str().and_then(Genre::from_tag) {
            Some(genre) => genres.push(genre),
            None => {
                let expected = Genre::ALL
                    .iter()
                    .map(|genre| format!("'{}'", genre.to_str()))
                    .collect::<Vec<_>>()
                    .join(" | ");

                return Err(FieldViolation::new(
                    field,
                    ViolationCode::InvalidEnumValue,
                    format!("invalid genre {tag}, expected {expected}"),
                ));
            }
        }
    }

    Ok(genres)
}
