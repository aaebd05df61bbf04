//! Typed configuration values.
//!
//! A [`Value`] is one element of a variable's value list. The variant must
//! match the owning variable's [`ValueType`], which is fixed on first
//! assignment. Floats use the structured [`FloatValue`] representation
//! produced by the lexer rather than raw `f64` bits, so values stay `Eq` and
//! `Hash` and the original mantissa/exponent components remain inspectable.

use std::fmt;

/// Type tag of a variable, fixed on first assignment.
///
/// `Invalid` marks a freshly created variable that has never been assigned.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ValueType {
    #[default]
    Invalid,
    Bool,
    Signed,
    Unsigned,
    Float,
    Str,
    Blob,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Invalid => "invalid",
            ValueType::Bool => "bool",
            ValueType::Signed => "signed",
            ValueType::Unsigned => "unsigned",
            ValueType::Float => "float",
            ValueType::Str => "string",
            ValueType::Blob => "blob",
        };
        write!(f, "{name}")
    }
}

/// Structured float representation.
///
/// The lexer decomposes a float literal into its mantissa and exponent parts
/// instead of binding to `f64` eagerly:
///
/// ```text
/// value = sign · (whole + fract / radix^fract_digits) · 10^exp
/// ```
///
/// The exponent always applies base-10 scaling, even when the mantissa radix
/// is 16 or 2. This matches the configuration language's numeric semantics
/// and must be preserved.
///
/// `whole` holds the magnitude of the integral part; the sign lives in
/// `negative` so values in `(-1, 0)` keep their sign.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FloatValue {
    /// Sign of the whole value.
    pub negative: bool,
    /// Magnitude of the integral part.
    pub whole: i64,
    /// Fractional digits accumulated as an integer in the mantissa radix.
    pub fract: u32,
    /// Number of fractional digits represented by `fract`.
    pub fract_digits: u8,
    /// Radix of the mantissa (2, 8, 10, or 16).
    pub radix: u8,
    /// Signed base-10 exponent.
    pub exp: i32,
}

impl FloatValue {
    /// Bind the structured representation to an `f64`.
    #[allow(
        clippy::cast_precision_loss,
        reason = "binding to f64 is inherently lossy for extreme components"
    )]
    pub fn to_f64(&self) -> f64 {
        let fract_scale = f64::from(self.radix).powi(i32::from(self.fract_digits));
        let mut value = self.whole as f64;
        if self.fract_digits > 0 {
            value += f64::from(self.fract) / fract_scale;
        }
        value *= 10f64.powi(self.exp);
        if self.negative {
            -value
        } else {
            value
        }
    }
}

/// A single typed value in a variable's value list.
///
/// Values are stored in insertion order by the owning [`Variable`]. String
/// and blob payloads own their bytes; removing a value releases them.
///
/// [`Variable`]: crate::Variable
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Value {
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    Float(FloatValue),
    Str(String),
    Blob(Vec<u8>),
}

impl Value {
    /// The [`ValueType`] this value belongs under.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Signed(_) => ValueType::Signed,
            Value::Unsigned(_) => ValueType::Unsigned,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::Blob(_) => ValueType::Blob,
        }
    }
}
