//! Update operators for partial, in-place field updates.
//!
//! An update statement such as `{ "$inc": { "views": 1 } }` is parsed elsewhere; by the time it
//! reaches a field type it is an [`UpdateOp`] plus the current value and the update argument.
//! Each type exposes the operators it supports through
//! [`FieldType::update_fn`](crate::field::FieldType::update_fn).

use bson::Bson;
use std::{fmt, str::FromStr};

use crate::value::FieldContext;

/// A pure update function: `(current, update, context) -> new value`.
pub type UpdateFn = fn(&Bson, &Bson, FieldContext<'_>) -> Bson;

/// Update operators a field type may register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    /// Add the argument to the current value.
    Inc,
    /// Subtract the argument from the current value.
    Dec,
    /// Multiply the current value by the argument.
    Mul,
    /// Divide the current value by the argument.
    Div,
    /// Remainder of dividing the current value by the argument.
    Mod,
    /// Keep the larger of the current value and the argument.
    Max,
    /// Keep the smaller of the current value and the argument.
    Min,
}

impl UpdateOp {
    /// Every operator, in declaration order.
    pub const ALL: [UpdateOp; 7] = [
        UpdateOp::Inc,
        UpdateOp::Dec,
        UpdateOp::Mul,
        UpdateOp::Div,
        UpdateOp::Mod,
        UpdateOp::Max,
        UpdateOp::Min,
    ];

    /// Returns the canonical operator name without the `$` prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOp::Inc => "inc",
            UpdateOp::Dec => "dec",
            UpdateOp::Mul => "mul",
            UpdateOp::Div => "div",
            UpdateOp::Mod => "mod",
            UpdateOp::Max => "max",
            UpdateOp::Min => "min",
        }
    }
}

impl fmt::Display for UpdateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an operator name is not one of [`UpdateOp::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUpdateOp(pub String);

impl FromStr for UpdateOp {
    type Err = UnknownUpdateOp;

    /// Parses `"inc"` as well as the statement form `"$inc"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix('$').unwrap_or(s);
        UpdateOp::ALL
            .into_iter()
            .find(|op| op.as_str() == name)
            .ok_or_else(|| UnknownUpdateOp(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_prefixed_names() {
        assert_eq!("inc".parse::<UpdateOp>(), Ok(UpdateOp::Inc));
        assert_eq!("$mod".parse::<UpdateOp>(), Ok(UpdateOp::Mod));
        for op in UpdateOp::ALL {
            assert_eq!(op.as_str().parse::<UpdateOp>(), Ok(op));
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        assert_eq!(
            "push".parse::<UpdateOp>(),
            Err(UnknownUpdateOp("push".to_string()))
        );
        assert!("INC".parse::<UpdateOp>().is_err());
        assert!("$$inc".parse::<UpdateOp>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(UpdateOp::Max.to_string(), "max");
    }
}
