//! Number field type.

use bson::Bson;
use schemalayer_core::{
    error::{ValidationError, ValidationResult},
    field::{FieldBase, FieldType},
    options::FieldOptions,
    update::{UpdateFn, UpdateOp},
    value::{FieldContext, as_f64, display, is_absent, is_numeric, to_number},
};

/// A numeric field.
///
/// Any numeric BSON kind is canonical. Other input is coerced like a script runtime's unary
/// plus, so `"42"` casts to `42` and `"abc"` casts to NaN, which [`validate`](FieldType::validate)
/// then rejects. Update operators always produce a `Double`.
///
/// For `inc`, `dec`, `mul`, `div` and `mod` a falsy current value (absent, `0`, NaN, `false`
/// or `""`) is treated as unset: `inc` yields the argument, `dec` its negation and the others
/// yield `0`. A stored `0` is therefore indistinguishable from a missing value.
#[derive(Debug, Clone)]
pub struct NumberType {
    base: FieldBase,
}

impl NumberType {
    /// Creates a number field with the given name and options.
    pub fn new(name: impl Into<String>, options: FieldOptions) -> Self {
        Self {
            base: FieldBase::new(name, options),
        }
    }
}

impl FieldType for NumberType {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        "Number"
    }

    fn cast(&self, value: Bson, _ctx: FieldContext<'_>) -> Bson {
        let value = self.base.cast(value);
        if is_absent(&value) || is_numeric(&value) {
            return value;
        }

        Bson::Double(to_number(&value))
    }

    fn validate<'v>(&self, value: &'v Bson, _ctx: FieldContext<'_>) -> ValidationResult<&'v Bson> {
        let value = self.base.validate(value)?;
        if is_absent(value) {
            return Ok(value);
        }

        match as_f64(value) {
            Some(v) if !v.is_nan() => Ok(value),
            _ => Err(ValidationError::new(format!(
                "`{}` is not a number!",
                display(value)
            ))),
        }
    }

    fn update_fn(&self, op: UpdateOp) -> Option<UpdateFn> {
        Some(match op {
            UpdateOp::Inc => inc,
            UpdateOp::Dec => dec,
            UpdateOp::Mul => mul,
            UpdateOp::Div => div,
            UpdateOp::Mod => rem,
            UpdateOp::Max => max,
            UpdateOp::Min => min,
        })
    }
}

fn is_unset(value: &Bson) -> bool {
    match value {
        Bson::Null | Bson::Undefined => true,
        Bson::Boolean(b) => !b,
        Bson::String(s) => s.is_empty(),
        other => matches!(as_f64(other), Some(v) if v == 0.0 || v.is_nan()),
    }
}

fn inc(current: &Bson, update: &Bson, _ctx: FieldContext<'_>) -> Bson {
    if is_unset(current) {
        return Bson::Double(to_number(update));
    }
    Bson::Double(to_number(current) + to_number(update))
}

fn dec(current: &Bson, update: &Bson, _ctx: FieldContext<'_>) -> Bson {
    if is_unset(current) {
        return Bson::Double(-to_number(update));
    }
    Bson::Double(to_number(current) - to_number(update))
}

fn mul(current: &Bson, update: &Bson, _ctx: FieldContext<'_>) -> Bson {
    if is_unset(current) {
        return Bson::Double(0.0);
    }
    Bson::Double(to_number(current) * to_number(update))
}

fn div(current: &Bson, update: &Bson, _ctx: FieldContext<'_>) -> Bson {
    if is_unset(current) {
        return Bson::Double(0.0);
    }
    Bson::Double(to_number(current) / to_number(update))
}

fn rem(current: &Bson, update: &Bson, _ctx: FieldContext<'_>) -> Bson {
    if is_unset(current) {
        return Bson::Double(0.0);
    }
    Bson::Double(to_number(current) % to_number(update))
}

// Comparisons involving NaN are false, so the current value is kept.
fn max(current: &Bson, update: &Bson, _ctx: FieldContext<'_>) -> Bson {
    let u = to_number(update);
    if is_absent(current) {
        return Bson::Double(u);
    }
    let c = to_number(current);
    Bson::Double(if u > c { u } else { c })
}

fn min(current: &Bson, update: &Bson, _ctx: FieldContext<'_>) -> Bson {
    let u = to_number(update);
    if is_absent(current) {
        return Bson::Double(u);
    }
    let c = to_number(current);
    Bson::Double(if u < c { u } else { c })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use schemalayer_core::error::FieldError;

    fn number() -> NumberType {
        NumberType::new("test", FieldOptions::default())
    }

    fn apply(op: &str, current: Bson, update: f64) -> Bson {
        number()
            .apply_update(op, &current, &Bson::Double(update), None)
            .unwrap()
    }

    #[test]
    fn test_cast() {
        let field = number();
        assert_eq!(field.cast(Bson::String("42".into()), None), Bson::Double(42.0));
        assert_eq!(field.cast(Bson::Int32(3), None), Bson::Int32(3));
        assert_eq!(field.cast(Bson::Double(1.5), None), Bson::Double(1.5));
        assert_eq!(field.cast(Bson::Boolean(true), None), Bson::Double(1.0));
        assert_eq!(field.cast(Bson::Undefined, None), Bson::Undefined);
        assert_eq!(field.cast(Bson::Null, None), Bson::Null);
    }

    #[test]
    fn test_cast_unparseable_is_rejected_by_validate() {
        let field = number();
        let value = field.cast(Bson::String("abc".into()), None);
        assert!(matches!(value, Bson::Double(v) if v.is_nan()));

        let err = field.validate(&value, None).unwrap_err();
        assert_eq!(err.message(), "`NaN` is not a number!");
    }

    #[test]
    fn test_cast_is_idempotent() {
        let field = number();
        for raw in [
            Bson::String("12.5".into()),
            Bson::String("nope".into()),
            Bson::Int64(9),
            Bson::Null,
        ] {
            let once = field.cast(raw, None);
            let twice = field.cast(once.clone(), None);
            assert_eq!(format!("{:?}", once), format!("{:?}", twice));
        }
    }

    #[test]
    fn test_cast_default() {
        let field = NumberType::new("test", FieldOptions::builder().default_value(10).build());
        assert_eq!(field.cast(Bson::Undefined, None), Bson::Int32(10));
        assert_eq!(field.cast(Bson::Int32(1), None), Bson::Int32(1));
    }

    #[test]
    fn test_validate() {
        let field = number();
        assert_eq!(field.validate(&Bson::Int32(1), None), Ok(&Bson::Int32(1)));
        assert_eq!(field.validate(&Bson::Double(-0.5), None), Ok(&Bson::Double(-0.5)));
        assert_eq!(field.validate(&Bson::Undefined, None), Ok(&Bson::Undefined));

        let err = field.validate(&Bson::Double(f64::NAN), None).unwrap_err();
        assert_eq!(err.message(), "`NaN` is not a number!");

        let err = field.validate(&Bson::String("x".into()), None).unwrap_err();
        assert_eq!(err.message(), "`x` is not a number!");
    }

    #[test]
    fn test_validate_required() {
        let field = NumberType::new("views", FieldOptions::required());
        let err = field.validate(&Bson::Null, None).unwrap_err();
        assert_eq!(err.message(), "`views` is required!");
    }

    #[test]
    fn test_update_unset_current() {
        assert_eq!(apply("inc", Bson::Undefined, 5.0), Bson::Double(5.0));
        assert_eq!(apply("dec", Bson::Undefined, 5.0), Bson::Double(-5.0));
        assert_eq!(apply("mul", Bson::Undefined, 5.0), Bson::Double(0.0));
        assert_eq!(apply("div", Bson::Undefined, 5.0), Bson::Double(0.0));
        assert_eq!(apply("mod", Bson::Undefined, 5.0), Bson::Double(0.0));
        assert_eq!(apply("inc", Bson::Null, 5.0), Bson::Double(5.0));
    }

    #[test]
    fn test_update_stored_zero_counts_as_unset() {
        assert_eq!(apply("inc", Bson::Int32(0), 5.0), Bson::Double(5.0));
        assert_eq!(apply("dec", Bson::Double(0.0), 5.0), Bson::Double(-5.0));
        assert_eq!(apply("mul", Bson::Int32(0), 5.0), Bson::Double(0.0));
    }

    #[test]
    fn test_update_defined_current() {
        assert_eq!(apply("inc", Bson::Int32(2), 3.0), Bson::Double(5.0));
        assert_eq!(apply("dec", Bson::Int32(2), 3.0), Bson::Double(-1.0));
        assert_eq!(apply("mul", Bson::Int64(4), 2.5), Bson::Double(10.0));
        assert_eq!(apply("div", Bson::Double(9.0), 2.0), Bson::Double(4.5));
        assert_eq!(apply("mod", Bson::Int32(10), 4.0), Bson::Double(2.0));
        assert_eq!(apply("mod", Bson::Int32(-7), 3.0), Bson::Double(-1.0));
    }

    #[test]
    fn test_update_max_min() {
        assert_eq!(apply("max", Bson::Double(3.0), 5.0), Bson::Double(5.0));
        assert_eq!(apply("max", Bson::Double(5.0), 3.0), Bson::Double(5.0));
        assert_eq!(apply("min", Bson::Double(3.0), 5.0), Bson::Double(3.0));
        assert_eq!(apply("min", Bson::Double(5.0), 3.0), Bson::Double(3.0));
        assert_eq!(apply("max", Bson::Undefined, 5.0), Bson::Double(5.0));
        assert_eq!(apply("min", Bson::Null, 5.0), Bson::Double(5.0));
        assert_eq!(apply("max", Bson::Int32(0), -1.0), Bson::Double(0.0));
    }

    #[test]
    fn test_update_prefixed_operator_name() {
        assert_eq!(apply("$inc", Bson::Int32(1), 1.0), Bson::Double(2.0));
    }

    #[test]
    fn test_update_unknown_operator() {
        let err = number()
            .apply_update("push", &Bson::Int32(1), &Bson::Int32(1), None)
            .unwrap_err();
        assert!(matches!(
            err,
            FieldError::UnsupportedOperator { type_name: "Number", .. }
        ));
    }

    #[test]
    fn test_supports_all_operators() {
        let field = number();
        assert!(UpdateOp::ALL.iter().all(|op| field.supports(*op)));
    }

    fn integral() -> impl Strategy<Value = f64> {
        (-1_000_000i32..1_000_000).prop_map(f64::from)
    }

    proptest! {
        #[test]
        fn prop_inc_adds(v in integral(), d in integral()) {
            prop_assert_eq!(apply("inc", Bson::Double(v), d), Bson::Double(v + d));
        }

        #[test]
        fn prop_dec_undoes_inc(v in integral(), d in integral()) {
            let incremented = apply("inc", Bson::Double(v), d);
            let field = number();
            let restored = field
                .apply_update("dec", &incremented, &Bson::Double(d), None)
                .unwrap();
            prop_assert_eq!(restored, Bson::Double(v));
        }

        #[test]
        fn prop_max_min_bound(v in integral(), d in integral()) {
            let hi = as_f64(&apply("max", Bson::Double(v), d)).unwrap();
            let lo = as_f64(&apply("min", Bson::Double(v), d)).unwrap();
            prop_assert_eq!(hi, v.max(d));
            prop_assert_eq!(lo, v.min(d));
        }
    }
}
