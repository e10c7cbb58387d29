//! Type-checked addition over dynamically typed operands.
//!
//! [`add`] accepts anything convertible into a [`Value`] and succeeds only when
//! both operands are integers or floats.

pub mod error;
mod math;
pub mod value;

pub use error::{Error, Result};
pub use math::add;
pub use value::{Kind, Number, Value};
