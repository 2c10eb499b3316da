use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid id {value:?}: ids must be positive integers")]
pub struct IdError {
    value: String,
}

/// Row identifier shared by owners, accounts and commodities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(i64);

impl Id {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Create an id, rejecting zero and negative values.
    pub fn checked(value: i64) -> Result<Self, IdError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(IdError {
                value: value.to_string(),
            })
        }
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<i64>().map_err(|_| IdError {
            value: s.to_string(),
        })?;
        Self::checked(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_positive_ids() {
        assert_eq!("42".parse::<Id>(), Ok(Id::new(42)));
        assert_eq!(" 7 ".parse::<Id>(), Ok(Id::new(7)));
    }

    #[test]
    fn test_parse_rejects_invalid_ids() {
        assert!("0".parse::<Id>().is_err());
        assert!("-3".parse::<Id>().is_err());
        assert!("abc".parse::<Id>().is_err());
        assert!("".parse::<Id>().is_err());
    }

    #[test]
    fn test_ids_order_numerically() {
        assert!(Id::new(2) < Id::new(10));
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Id::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
