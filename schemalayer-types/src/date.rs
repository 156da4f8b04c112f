//! Date field type.

use bson::{Bson, DateTime};
use chrono::NaiveDate;
use schemalayer_core::{
    error::{ValidationError, ValidationResult},
    field::{FieldBase, FieldType},
    options::{FieldDefault, FieldOptions},
    update::{UpdateFn, UpdateOp},
    value::{FieldContext, display, is_absent, to_number},
};

/// A date field stored as a BSON `DateTime` (milliseconds since the Unix epoch).
///
/// Cast accepts RFC 3339 strings, `YYYY-MM-DD` dates (midnight UTC) and epoch milliseconds.
/// Input that cannot be read as a date is returned unchanged and fails validation.
///
/// `inc` and `dec` shift the current date by a number of milliseconds. An absent current value
/// has nothing to shift and stays absent.
#[derive(Debug, Clone)]
pub struct DateType {
    base: FieldBase,
}

impl DateType {
    /// Creates a date field with the given name and options.
    pub fn new(name: impl Into<String>, options: FieldOptions) -> Self {
        Self {
            base: FieldBase::new(name, options),
        }
    }

    /// Creates a date field whose absent values default to the time of the cast.
    ///
    /// Any default in `options` is replaced.
    pub fn timestamped(name: impl Into<String>, options: FieldOptions) -> Self {
        let options = FieldOptions {
            default: Some(FieldDefault::producer(|| Bson::DateTime(DateTime::now()))),
            ..options
        };
        Self::new(name, options)
    }
}

fn parse_date(s: &str) -> Option<DateTime> {
    let s = s.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(DateTime::from_millis(dt.timestamp_millis()));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| DateTime::from_millis(midnight.and_utc().timestamp_millis()))
}

impl FieldType for DateType {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        "Date"
    }

    fn cast(&self, value: Bson, _ctx: FieldContext<'_>) -> Bson {
        let value = self.base.cast(value);
        let parsed = match &value {
            Bson::String(s) => parse_date(s),
            Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) => {
                let millis = to_number(&value);
                millis
                    .is_finite()
                    .then(|| DateTime::from_millis(millis as i64))
            }
            _ => None,
        };

        parsed.map(Bson::DateTime).unwrap_or(value)
    }

    fn validate<'v>(&self, value: &'v Bson, _ctx: FieldContext<'_>) -> ValidationResult<&'v Bson> {
        let value = self.base.validate(value)?;
        if is_absent(value) || matches!(value, Bson::DateTime(_)) {
            return Ok(value);
        }

        Err(ValidationError::new(format!(
            "`{}` is not a valid date!",
            display(value)
        )))
    }

    fn update_fn(&self, op: UpdateOp) -> Option<UpdateFn> {
        let f: UpdateFn = match op {
            UpdateOp::Inc => inc,
            UpdateOp::Dec => dec,
            _ => return None,
        };
        Some(f)
    }
}

fn shift(current: &Bson, offset: f64) -> Bson {
    match current {
        Bson::DateTime(dt) if offset.is_finite() => Bson::DateTime(DateTime::from_millis(
            dt.timestamp_millis().saturating_add(offset as i64),
        )),
        other => other.clone(),
    }
}

fn inc(current: &Bson, update: &Bson, _ctx: FieldContext<'_>) -> Bson {
    shift(current, to_number(update))
}

fn dec(current: &Bson, update: &Bson, _ctx: FieldContext<'_>) -> Bson {
    shift(current, -to_number(update))
}
