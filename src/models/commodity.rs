use serde::{Deserialize, Serialize};

use super::Id;

/// Anything with a price series: securities, currencies, placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commodity {
    pub id: Id,
    pub symbol: String,
    pub name: String,
}

impl Commodity {
    pub fn new(id: Id, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}
