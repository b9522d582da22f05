// ============================================================================
// spark-foundation - Property Values
// The default value type carried by a ValueSet
// ============================================================================

use std::fmt;

// =============================================================================
// VALUE KIND
// =============================================================================

/// Discriminant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    UInt,
    Double,
    Char,
    String,
    Bytes,
    Strings,
}

// =============================================================================
// VALUE
// =============================================================================

/// A property value as it travels through a settings-like bag.
///
/// Null is not a variant: a present-but-null entry is `None` in the map's
/// `Option<Value>` slot, which keeps it distinct from an absent key.
///
/// # Example
///
/// ```
/// use spark_foundation::{Value, ValueKind};
///
/// let v = Value::from("dark");
/// assert_eq!(v.kind(), ValueKind::String);
/// assert_eq!(v.as_str(), Some("dark"));
/// assert_eq!(Value::from(3).as_int(), Some(3));
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    Strings(Vec<String>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::UInt(_) => ValueKind::UInt,
            Value::Double(_) => ValueKind::Double,
            Value::Char(_) => ValueKind::Char,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Strings(_) => ValueKind::Strings,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UInt(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

/// Doubles compare with NaN equal to NaN, so an entry holding NaN can still
/// be found by `contains_entry`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Strings(a), Value::Strings(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::String(s) => f.write_str(s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::Strings(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

macro_rules! impl_from {
    ($variant:ident, $target:ty; $($src:ty),+) => {
        $(
            impl From<$src> for Value {
                fn from(v: $src) -> Self {
                    Value::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

impl_from!(Bool, bool; bool);
impl_from!(Int, i64; i8, i16, i32, i64);
impl_from!(UInt, u64; u8, u16, u32, u64);
impl_from!(Double, f64; f32, f64);
impl_from!(Char, char; char);
impl_from!(String, String; String, &str);
impl_from!(Bytes, Vec<u8>; Vec<u8>, &[u8]);
impl_from!(Strings, Vec<String>; Vec<String>);

// =============================================================================
// TESTS
// =============================================================================
