use crate::error::Result;
use crate::value::{Number, Value};

/// Adds two inputs.
///
/// Both operands must be integers or floats. If either is a float the sum is a
/// float, otherwise it is an integer. `a` is checked before `b`; a non-numeric
/// operand on either side yields the same
/// [`Error::InvalidArgument`](crate::Error::InvalidArgument).
///
/// ```
/// use numadd::{add, Number};
///
/// assert_eq!(add(3, 2).unwrap(), Number::Int(5));
/// assert_eq!(add(1, 2.5).unwrap(), Number::Float(3.5));
/// assert!(add("not a number", 5).is_err());
/// ```
pub fn add(a: impl Into<Value>, b: impl Into<Value>) -> Result<Number> {
    let a = Number::try_from(a.into())?;
    let b = Number::try_from(b.into())?;
    Ok(a + b)
}
