//! Dynamically typed operands and the numeric subset they can be narrowed to.
//!
//! A [`Value`] can hold anything a caller might hand to [`crate::add`]. Only
//! the numeric kinds survive the conversion to [`Number`]: integers, floats,
//! and booleans (which count as the integers 0 and 1). Everything else is
//! rejected with
//! [`Error::InvalidArgument`](crate::Error::InvalidArgument).

use std::fmt;
use std::ops::Add;

use log::debug;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Runtime type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    List,
}

impl Kind {
    /// A bool is an integer that is either 0 or 1.
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Bool | Kind::Integer | Kind::Float)
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::List => "list",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An operand of unknown kind.
///
/// Serializes untagged, so a JSON document decodes straight into it:
/// `3` is `Int`, `2.5` is `Float`, `"x"` is `Str`. Integers outside the
/// `i64` range are a decode error, never a float.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::List(_) => Kind::List,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// Numeric view of this value, if it has one.
    pub fn as_number(&self) -> Option<Number> {
        match *self {
            Value::Bool(b) => Some(Number::Int(i64::from(b))),
            Value::Int(n) => Some(Number::Int(n)),
            Value::Float(x) => Some(Number::Float(x)),
            _ => None,
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a bool, a number, a string or a list")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Value, D::Error> {
        Value::deserialize(d)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<Value, E> {
        Ok(Value::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<Value, E> {
        i64::try_from(n)
            .map(Value::Int)
            .map_err(|_| E::custom(format!("integer {} is out of range for i64", n)))
    }

    fn visit_f64<E: de::Error>(self, x: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(x))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<Value, E> {
        Ok(Value::Str(s.to_owned()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> std::result::Result<Value, E> {
        Ok(Value::Str(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_any(ValueVisitor)
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(i64::from(n))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(n) => Value::Int(n),
            Number::Float(x) => Value::Float(x),
        }
    }
}

/// An integer or a float.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn kind(self) -> Kind {
        match self {
            Number::Int(_) => Kind::Integer,
            Number::Float(_) => Kind::Float,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Float(x)
    }
}

/// Decodes through [`Value`], so anything `add` would reject fails to decode.
impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        Number::try_from(value).map_err(de::Error::custom)
    }
}

impl TryFrom<Value> for Number {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        value.as_number().ok_or_else(|| {
            let kind = value.kind();
            debug!("Rejecting non-numeric operand of kind {}", kind);
            Error::invalid_argument(kind)
        })
    }
}

/// Int + Int stays Int (wrapping on overflow); anything involving a Float is a Float.
impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a.wrapping_add(b)),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_each_variant() {
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::from(true).kind(), Kind::Bool);
        assert_eq!(Value::from(7u8).kind(), Kind::Integer);
        assert_eq!(Value::from(1.5f32).kind(), Kind::Float);
        assert_eq!(Value::from("abc").kind(), Kind::String);
        assert_eq!(Value::from(vec![1, 2]).kind(), Kind::List);
        assert_eq!(Value::from(None::<i32>).kind(), Kind::Null);
        assert_eq!(Value::from(Some(4)).kind(), Kind::Integer);
    }

    #[test]
    fn test_numeric_kinds() {
        let numeric: Vec<Kind> = [
            Kind::Null,
            Kind::Bool,
            Kind::Integer,
            Kind::Float,
            Kind::String,
            Kind::List,
        ]
        .into_iter()
        .filter(|k| k.is_numeric())
        .collect();
        assert_eq!(numeric, vec![Kind::Bool, Kind::Integer, Kind::Float]);

        assert!(Value::from(false).is_numeric());
        assert!(Value::from(2.0).is_numeric());
        assert!(!Value::from("2").is_numeric());
        assert!(!Value::Null.is_numeric());
    }

    #[test]
    fn test_try_from_bool_is_zero_or_one() {
        assert_eq!(Number::try_from(Value::Bool(true)).unwrap(), Number::Int(1));
        assert_eq!(Number::try_from(Value::Bool(false)).unwrap(), Number::Int(0));
    }

    #[test]
    fn test_try_from_rejects_string() {
        let err = Number::try_from(Value::from("1")).unwrap_err();
        assert_eq!(err.kind(), Kind::String);
    }

    #[test]
    fn test_number_kind_and_from() {
        assert_eq!(Number::from(4i64), Number::Int(4));
        assert_eq!(Number::from(0.5), Number::Float(0.5));
        assert_eq!(Number::from(4i64).kind(), Kind::Integer);
        assert_eq!(Number::from(0.5).kind(), Kind::Float);
        assert_eq!(Number::Int(3).as_f64(), 3.0);
    }

    #[test]
    fn test_try_from_accepts_numbers() {
        assert_eq!(Number::try_from(Value::Int(-3)).unwrap(), Number::Int(-3));
        assert_eq!(Number::try_from(Value::Float(0.25)).unwrap(), Number::Float(0.25));
    }

    #[test]
    fn test_add_promotion() {
        assert_eq!(Number::Int(2) + Number::Int(3), Number::Int(5));
        assert_eq!(Number::Int(1) + Number::Float(2.5), Number::Float(3.5));
        assert_eq!(Number::Float(2.5) + Number::Int(1), Number::Float(3.5));
        assert_eq!(Number::Float(0.5) + Number::Float(0.25), Number::Float(0.75));
    }

    #[test]
    fn test_int_overflow_wraps() {
        assert_eq!(Number::Int(i64::MAX) + Number::Int(1), Number::Int(i64::MIN));
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::Int(5).to_string(), "5");
        assert_eq!(Number::Float(3.5).to_string(), "3.5");
        assert_eq!(Number::Float(3.0).to_string(), "3.0");
        assert_eq!(Number::Int(3).to_string(), "3");
        assert_eq!(Kind::Integer.to_string(), "integer");
    }

    #[test]
    fn test_number_roundtrips_into_value() {
        assert_eq!(Value::from(Number::Float(1.0)), Value::Float(1.0));
        assert_eq!(Value::from(Number::Int(9)).as_number(), Some(Number::Int(9)));
    }
}
