/*!
 * Typed values carried by subcommand parameters.
 */

use std::fmt;

/// Element type of a subcommand parameter.
///
/// `Bool` parameters are flags; everything else takes a value on the
/// command line as `name:value` (or `name:v1,v2,...` when list-valued).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Str,
    Int,
    Float,
}

impl ValueType {
    /// Name shown in help and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
        }
    }

    /// Convert one raw command-line string into a value of this type
    pub fn convert(&self, raw: &str) -> Option<Value> {
        match self {
            Self::Str => Some(Value::Str(raw.to_string())),
            Self::Int => raw.trim().parse::<i64>().ok().map(Value::Int),
            Self::Float => raw.trim().parse::<f64>().ok().map(Value::Float),
            // Flags never take a value
            Self::Bool => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parameter value: either a scalar or a list of scalars
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
    List(Vec<Value>),
}

impl Value {
    /// Scalar type of this value, `None` for lists
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::Bool(_) => Some(ValueType::Bool),
            Self::Str(_) => Some(ValueType::Str),
            Self::Int(_) => Some(ValueType::Int),
            Self::Float(_) => Some(ValueType::Float),
            Self::List(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Whether the value has the given scalar type, or is a list of it
    pub fn conforms_to(&self, value_type: ValueType) -> bool {
        match self {
            Self::List(items) => items.iter().all(|x| x.value_type() == Some(value_type)),
            _ => self.value_type() == Some(value_type),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Scalars as a one-element slice, lists as their elements
    pub fn elements(&self) -> Vec<&Value> {
        match self {
            Self::List(items) => items.iter().collect(),
            other => vec![other],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(|x| x.to_string()).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Join admissible values for display, naming the empty string explicitly
pub fn format_admissible(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| {
            let s = v.to_string();
            if s.is_empty() { "<empty>".to_string() } else { s }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
