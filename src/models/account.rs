use serde::{Deserialize, Serialize};

use super::Id;

/// A brokerage or retirement account belonging to one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Id,
    pub name: String,
    pub owner_id: Id,
}

impl Account {
    pub fn new(id: Id, name: impl Into<String>, owner_id: Id) -> Self {
        Self {
            id,
            name: name.into(),
            owner_id,
        }
    }
}
