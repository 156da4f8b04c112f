//! CUID field type and CUID generation.
//!
//! A CUID is a 25 character, lowercase base-36 identifier: a leading `c`, then timestamp,
//! counter, fingerprint and random blocks.

use bson::Bson;
use chrono::Utc;
use rand::Rng;
use regex::Regex;
use schemalayer_core::{
    error::{ValidationError, ValidationResult},
    field::{FieldBase, FieldType},
    options::{FieldDefault, FieldOptions},
    value::{FieldContext, display, is_absent},
};
use std::{
    process,
    sync::{
        LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

static CUID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^c[a-z0-9]{24}$").expect("valid CUID pattern"));

const BASE: u64 = 36;
const BLOCK_SIZE: usize = 4;
const DISCRETE_VALUES: u64 = 36 * 36 * 36 * 36;

static COUNTER: AtomicU64 = AtomicU64::new(0);

static FINGERPRINT: LazyLock<String> = LazyLock::new(|| {
    let pid = pad(&to_base36(u64::from(process::id())), 2);
    let salt = pad(&to_base36(rand::thread_rng().gen_range(0..BASE * BASE)), 2);
    format!("{pid}{salt}")
});

/// Returns `true` if `value` has the lexical form of a CUID.
pub fn is_cuid(value: &str) -> bool {
    CUID_PATTERN.is_match(value)
}

/// Generates a new CUID.
///
/// Layout: `c` + 8 timestamp chars + 4 counter chars + 4 fingerprint chars + 8 random chars.
pub fn generate() -> String {
    let timestamp = pad(&to_base36(Utc::now().timestamp_millis().max(0) as u64), 8);
    let counter = pad(
        &to_base36(COUNTER.fetch_add(1, Ordering::Relaxed) % DISCRETE_VALUES),
        BLOCK_SIZE,
    );
    let mut rng = rand::thread_rng();
    let random = format!(
        "{}{}",
        pad(&to_base36(rng.gen_range(0..DISCRETE_VALUES)), BLOCK_SIZE),
        pad(&to_base36(rng.gen_range(0..DISCRETE_VALUES)), BLOCK_SIZE),
    );

    format!("c{timestamp}{counter}{}{random}", FINGERPRINT.as_str())
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        let digit = (n % BASE) as u32;
        digits.push(char::from_digit(digit, BASE as u32).unwrap_or('0'));
        n /= BASE;
    }
    digits.iter().rev().collect()
}

// Left-pads with zeros and keeps the trailing `size` chars.
fn pad(s: &str, size: usize) -> String {
    let padded = format!("{s:0>size$}");
    padded[padded.len() - size..].to_string()
}

/// A CUID identifier field.
///
/// Casting performs no coercion. Validation accepts only strings of CUID form.
/// Identifiers register no update operators; replacement is the only way to change them.
#[derive(Debug, Clone)]
pub struct CuidType {
    base: FieldBase,
}

impl CuidType {
    /// Creates a CUID field with the given name and options.
    pub fn new(name: impl Into<String>, options: FieldOptions) -> Self {
        Self {
            base: FieldBase::new(name, options),
        }
    }

    /// Creates a CUID field whose absent values are filled with a freshly generated CUID.
    ///
    /// Any default in `options` is replaced.
    pub fn generated(name: impl Into<String>, options: FieldOptions) -> Self {
        let options = FieldOptions {
            default: Some(FieldDefault::producer(|| Bson::String(generate()))),
            ..options
        };
        Self::new(name, options)
    }
}

impl FieldType for CuidType {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        "CUID"
    }

    fn validate<'v>(&self, value: &'v Bson, _ctx: FieldContext<'_>) -> ValidationResult<&'v Bson> {
        let value = self.base.validate(value)?;
        if is_absent(value) {
            return Ok(value);
        }

        match value {
            Bson::String(s) if is_cuid(s) => Ok(value),
            _ => Err(ValidationError::new(format!(
                "`{}` is not a valid CUID",
                display(value)
            ))),
        }
    }
}
