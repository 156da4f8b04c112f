//! Helpers for inspecting and rendering field values.
//!
//! Field values are plain [`Bson`] values. Both `Bson::Null` and `Bson::Undefined` mean
//! "absent"; every type treats them the same way for default resolution and required checks.

use bson::Bson;

/// Opaque per-call context handed through to field types, usually the owning document.
pub type FieldContext<'a> = Option<&'a bson::Document>;

/// Returns `true` if the value is `null` or `undefined`.
pub fn is_absent(value: &Bson) -> bool {
    matches!(value, Bson::Null | Bson::Undefined)
}

/// Returns `true` for the numeric BSON kinds (`Int32`, `Int64`, `Double`), NaN included.
pub fn is_numeric(value: &Bson) -> bool {
    matches!(value, Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_))
}

/// Returns the numeric value as `f64`, or `None` for non-numeric kinds.
pub fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(*v as f64),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

/// Coerces any value to a number the way a script runtime's unary plus does.
///
/// Strings are trimmed; the empty string is `0`. Decimal, exponent, `Infinity` and
/// `0x`/`0o`/`0b` literals are understood. Booleans become `1`/`0`, `null` becomes `0`,
/// dates become epoch milliseconds. Everything else is NaN.
pub fn to_number(value: &Bson) -> f64 {
    match value {
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) => as_f64(value).unwrap_or(f64::NAN),
        Bson::String(s) => parse_number(s),
        Bson::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Bson::Null => 0.0,
        Bson::DateTime(dt) => dt.timestamp_millis() as f64,
        _ => f64::NAN,
    }
}

fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust also accepts "inf" and "nan" spellings; only plain decimal literals count here.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Renders a number the way a script runtime prints it: `5`, `1.5`, `NaN`, `-Infinity`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Renders a value for use inside an error message.
pub fn display(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::Double(v) => format_number(*v),
        Bson::Int32(v) => v.to_string(),
        Bson::Int64(v) => v.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null => "null".to_string(),
        Bson::Undefined => "undefined".to_string(),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .unwrap_or_else(|_| dt.timestamp_millis().to_string()),
        other => other.to_string(),
    }
}
