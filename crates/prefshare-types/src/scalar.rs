use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The closed set of supported value types.
///
/// The kind is part of an entry's identity: the same textual key stored
/// under two different kinds is two distinct entries, addressed as
/// `(key, kind)` pairs. Wire names are the lowercase strings used in the
/// addressing scheme and the broadcast payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Boolean,
    Integer,
    Long,
    Float,
}

impl ScalarKind {
    /// The wire name of this kind.
    pub fn as_wire(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Long => "long",
            ScalarKind::Float => "float",
        }
    }

    /// Parse a wire type tag.
    ///
    /// Anything outside the five supported names is an
    /// [`TypeError::UnsupportedType`] — the single explicit error arm that
    /// replaces the open-ended runtime type dispatch of dynamically typed
    /// stores.
    pub fn from_wire(tag: &str) -> Result<Self, TypeError> {
        match tag {
            "string" => Ok(ScalarKind::String),
            "boolean" => Ok(ScalarKind::Boolean),
            "integer" => Ok(ScalarKind::Integer),
            "long" => Ok(ScalarKind::Long),
            "float" => Ok(ScalarKind::Float),
            other => Err(TypeError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A typed scalar value.
///
/// Exhaustive matching on this enum at every read/write/serialize boundary
/// is what guarantees the protocol never silently carries a value it cannot
/// replicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ScalarValue {
    #[serde(rename = "string")]
    Str(String),
    #[serde(rename = "boolean")]
    Bool(bool),
    #[serde(rename = "integer")]
    I32(i32),
    #[serde(rename = "long")]
    I64(i64),
    #[serde(rename = "float")]
    F32(f32),
}

impl ScalarValue {
    /// The kind of this value. Total: every value has exactly one kind.
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Str(_) => ScalarKind::String,
            ScalarValue::Bool(_) => ScalarKind::Boolean,
            ScalarValue::I32(_) => ScalarKind::Integer,
            ScalarValue::I64(_) => ScalarKind::Long,
            ScalarValue::F32(_) => ScalarKind::Float,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ScalarValue::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ScalarValue::F32(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Str(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Str(v)
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Bool(v)
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::I32(v)
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::I64(v)
    }
}

impl From<f32> for ScalarValue {
    fn from(v: f32) -> Self {
        ScalarValue::F32(v)
    }
}
