use std::fmt;

use crate::error::RuntimeError;
use crate::season::Season;

/// Runtime value representation.
///
/// Values are immutable; every operation builds a new one. Equality is
/// structural and values of different kinds are never equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 64-bit integer value
    Int(i64),
    /// Boolean value
    Bool(bool),
    /// Season value
    Season(Season),
    /// Pair owning both of its components
    Pair(Box<Value>, Box<Value>),
}

impl Value {
    /// Creates a pair value
    pub fn pair(fst: Value, snd: Value) -> Self {
        Value::Pair(Box::new(fst), Box::new(snd))
    }

    /// Converts value to integer
    pub fn as_int(&self) -> Result<i64, RuntimeError> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(other.expecting("an integer")),
        }
    }

    /// Converts value to boolean
    pub fn as_bool(&self) -> Result<bool, RuntimeError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.expecting("a boolean")),
        }
    }

    /// Converts value to season
    pub fn as_season(&self) -> Result<Season, RuntimeError> {
        match self {
            Value::Season(s) => Ok(*s),
            other => Err(other.expecting("a season")),
        }
    }

    /// Borrows both components of a pair
    pub fn as_pair(&self) -> Result<(&Value, &Value), RuntimeError> {
        match self {
            Value::Pair(fst, snd) => Ok((fst.as_ref(), snd.as_ref())),
            other => Err(other.expecting("a pair")),
        }
    }

    /// Kind-specific strict ordering used by `<`.
    ///
    /// Integers compare numerically, `false < true`, seasons by ordinal.
    /// A pair is less than another only if *both* components are less; this
    /// is a conjunction, not a lexicographic order, so `<<1,5>> < <<2,0>>` is
    /// false.
    pub fn less(&self, other: &Value) -> Result<bool, RuntimeError> {
        match self {
            Value::Int(a) => Ok(*a < other.as_int()?),
            Value::Bool(a) => Ok(!*a && other.as_bool()?),
            Value::Season(a) => Ok(*a < other.as_season()?),
            Value::Pair(fst, snd) => {
                let (other_fst, other_snd) = other.as_pair()?;
                Ok(fst.less(other_fst)? && snd.less(other_snd)?)
            }
        }
    }

    fn expecting(&self, expected: &'static str) -> RuntimeError {
        RuntimeError::Expecting {
            expected,
            found: self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Season(s) => write!(f, "{}", s),
            Value::Pair(fst, snd) => write!(f, "<<{}, {}>>", fst, snd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_pair(a: i64, b: i64) -> Value {
        Value::pair(Value::Int(a), Value::Int(b))
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Season(Season::Spring).to_string(), "Spring");
        assert_eq!(
            Value::pair(Value::Int(1), Value::pair(Value::Bool(true), Value::Season(Season::Winter)))
                .to_string(),
            "<<1, <<true, Winter>>>>"
        );
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(int_pair(1, 2), int_pair(1, 2));
        assert_ne!(int_pair(1, 2), int_pair(2, 1));
        assert_ne!(Value::Int(0), Value::Bool(false));
        assert_ne!(Value::Int(0), Value::Season(Season::Winter));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::Int(3).as_int().unwrap(), 3);
        assert!(Value::Int(3).as_bool().is_err());
        assert_eq!(Value::Season(Season::Summer).as_season().unwrap(), Season::Summer);

        let err = Value::Bool(true).as_int().unwrap_err();
        assert_eq!(err.to_string(), "expecting an integer, found true");
    }

    #[test]
    fn test_scalar_ordering() {
        assert!(Value::Int(1).less(&Value::Int(2)).unwrap());
        assert!(!Value::Int(2).less(&Value::Int(2)).unwrap());
        assert!(Value::Bool(false).less(&Value::Bool(true)).unwrap());
        assert!(!Value::Bool(true).less(&Value::Bool(true)).unwrap());
        assert!(!Value::Bool(false).less(&Value::Bool(false)).unwrap());
        assert!(Value::Season(Season::Winter)
            .less(&Value::Season(Season::Fall))
            .unwrap());
    }

    #[test]
    fn test_pair_ordering_is_componentwise_conjunction() {
        assert!(int_pair(1, 0).less(&int_pair(2, 5)).unwrap());
        // First component not less
        assert!(!int_pair(2, 0).less(&int_pair(1, 5)).unwrap());
        // Second component not less, although lexicographically smaller
        assert!(!int_pair(1, 5).less(&int_pair(2, 0)).unwrap());
        assert!(!int_pair(1, 1).less(&int_pair(1, 2)).unwrap());
    }

    #[test]
    fn test_ordering_across_kinds_fails() {
        assert!(Value::Int(1).less(&Value::Bool(true)).is_err());
        assert!(int_pair(1, 2).less(&Value::Int(3)).is_err());
    }
}
