//! Parameter kinds and the values they carry.

use core::fmt;

use heapless::String;

use crate::config::PARAM_TEXT_LEN;

/// Bounded text stored in `Text` slots.
pub type ParamText = String<PARAM_TEXT_LEN>;

/// Copies `src` into `dst`, stopping at the first character that does not fit.
pub fn copy_truncated<const N: usize>(dst: &mut String<N>, src: &str) {
    dst.clear();
    for c in src.chars() {
        if dst.push(c).is_err() {
            break;
        }
    }
}

/// Kind of one parameter slot.
///
/// | Kind      | Rust type   | Conversion                        |
/// |-----------|-------------|-----------------------------------|
/// | `Int8`    | `i8`        | base-10 prefix, truncated         |
/// | `Int16`   | `i16`       | base-10 prefix, truncated         |
/// | `Int32`   | `i32`       | base-10 prefix, truncated         |
/// | `Int64`   | `i64`       | base-10 prefix                    |
/// | `Float32` | `f32`       | decimal prefix                    |
/// | `Float64` | `f64`       | decimal prefix                    |
/// | `Text`    | `ParamText` | verbatim                          |
/// | `Raw`     | opaque      | never written                     |
/// | `None`    | -           | unused slot                       |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Text,
    Raw,
    None,
}

impl ParameterKind {
    /// Human-readable name used by the help listing.
    pub const fn name(self) -> &'static str {
        match self {
            ParameterKind::Int8 => "Signed 8-bit integer",
            ParameterKind::Int16 => "Signed 16-bit integer",
            ParameterKind::Int32 => "Signed 32-bit integer",
            ParameterKind::Int64 => "Signed 64-bit integer",
            ParameterKind::Float32 => "Floating-point number",
            ParameterKind::Float64 => "Double-precision floating-point number",
            ParameterKind::Text => "String",
            ParameterKind::Raw => "Opaque value",
            ParameterKind::None => "No Parameter",
        }
    }

    /// `true` for the kinds the converter writes to.
    pub const fn is_convertible(self) -> bool {
        !matches!(self, ParameterKind::Raw | ParameterKind::None)
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of a slot's current content, as read by callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Text(ParamText),
    Raw,
    None,
}

impl Value {
    pub fn kind(&self) -> ParameterKind {
        match self {
            Value::Int8(_) => ParameterKind::Int8,
            Value::Int16(_) => ParameterKind::Int16,
            Value::Int32(_) => ParameterKind::Int32,
            Value::Int64(_) => ParameterKind::Int64,
            Value::Float32(_) => ParameterKind::Float32,
            Value::Float64(_) => ParameterKind::Float64,
            Value::Text(_) => ParameterKind::Text,
            Value::Raw => ParameterKind::Raw,
            Value::None => ParameterKind::None,
        }
    }

    /// Integer content widened to `i64`, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int8(v) => Some(v as i64),
            Value::Int16(v) => Some(v as i64),
            Value::Int32(v) => Some(v as i64),
            Value::Int64(v) => Some(v),
            _ => None,
        }
    }

    /// Float content widened to `f64`, if this is a float value.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float32(v) => Some(v as f64),
            Value::Float64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }
}
