use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::foundation::core::Size;

/// A host-supplied per-datum function, e.g. `pointLat = |d| d["coords"][0]`.
///
/// Accessors compare by identity: two handles are equal only when they share
/// the same closure.
#[derive(Clone)]
pub struct Accessor(Rc<dyn Fn(&Value) -> Value>);

impl Accessor {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&Value) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Evaluate against one datum.
    pub fn call(&self, datum: &Value) -> Value {
        (self.0)(datum)
    }
}

impl PartialEq for Accessor {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Accessor(..)")
    }
}

/// Value carried by a configuration property.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    /// Plain data: arrays, numbers, strings, booleans or null.
    Json(Value),
    /// Output resolution in pixels.
    Size(Size),
    /// Per-datum function.
    Accessor(Accessor),
}

impl PropValue {
    /// JSON null.
    pub const NULL: Self = Self::Json(Value::Null);

    /// Borrow the JSON payload, if any.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric payload, if any.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_json().and_then(Value::as_f64)
    }

    /// Size payload, if any. A JSON `{ "width", "height" }` object also counts.
    pub fn as_size(&self) -> Option<Size> {
        match self {
            Self::Size(s) => Some(*s),
            Self::Json(v @ Value::Object(_)) => serde_json::from_value(v.clone()).ok(),
            _ => None,
        }
    }

    /// Resolve this value for one datum.
    ///
    /// Accessors are called, strings name a field of the datum (missing fields
    /// resolve to null), and every other value is a constant.
    pub fn resolve(&self, datum: &Value) -> Value {
        match self {
            Self::Accessor(f) => f.call(datum),
            Self::Json(Value::String(field)) => datum.get(field).cloned().unwrap_or(Value::Null),
            Self::Json(v) => v.clone(),
            Self::Size(s) => serde_json::json!({ "width": s.width, "height": s.height }),
        }
    }
}

impl From<Value> for PropValue {
    fn from(v: Value) -> Self {
        Self::Json(v)
    }
}

impl From<Size> for PropValue {
    fn from(s: Size) -> Self {
        Self::Size(s)
    }
}

impl From<Accessor> for PropValue {
    fn from(f: Accessor) -> Self {
        Self::Accessor(f)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Json(Value::from(v))
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Json(Value::Bool(v))
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Json(Value::String(v.to_string()))
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Json(Value::String(v))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/value.rs"]
mod tests;
