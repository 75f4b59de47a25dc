use asvg_graph::{picture::element::fmt_num, UnitPoint};
use std::fmt::{self, Display, Formatter};

/// The value of a script argument or variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `null`, the value of an omitted argument.
    Null,

    Bool(bool),
    Number(f64),
    Str(String),

    /// A bracketed list, such as a point `[1, 2]` or a list of points.
    List(Vec<Value>),
}

impl Value {
    /// Describes the type of the value, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::Str(_) => "a string",
            Value::List(items) if items.len() == 2 && items.iter().all(|v| matches!(v, Value::Number(_))) => "a point",
            Value::List(_) => "a list",
        }
    }

    /// Returns the value as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as a point, a list of exactly two numbers.
    pub fn as_point(&self) -> Option<UnitPoint> {
        match self {
            Value::List(items) => match items.as_slice() {
                [Value::Number(x), Value::Number(y)] => Some(UnitPoint(*x, *y)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns the value as a list of points.
    pub fn as_points(&self) -> Option<Vec<UnitPoint>> {
        match self {
            Value::List(items) => items.iter().map(Value::as_point).collect(),
            _ => None,
        }
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", fmt_num(*n)),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn point(x: f64, y: f64) -> Value {
        Value::List(vec![Value::Number(x), Value::Number(y)])
    }

    #[test]
    fn points() {
        assert_eq!(point(1.0, 2.0).as_point(), Some(UnitPoint(1.0, 2.0)));
        assert_eq!(point(1.0, 2.0).describe(), "a point");
        assert_eq!(Value::List(vec![Value::Number(1.0)]).as_point(), None);

        let list = Value::List(vec![point(0.0, 0.0), point(1.0, 1.0)]);
        assert_eq!(list.as_points(), Some(vec![UnitPoint(0.0, 0.0), UnitPoint(1.0, 1.0)]));
        assert_eq!(list.describe(), "a list");
        assert_eq!(Value::List(vec![point(0.0, 0.0), Value::Null]).as_points(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(point(1.0, -2.0).to_string(), "[1,-2]");
        assert_eq!(Value::Str("π".to_string()).to_string(), "π");
    }
}
