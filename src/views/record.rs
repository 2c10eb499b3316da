use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ViewError;
use crate::format::format_decimal;
use crate::models::{Account, Commodity, Holding, Id, Owner, Price};
use crate::storage::Catalog;

/// Tables the view layer can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Owner,
    Account,
    Commodity,
    Holding,
    Price,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Owner,
        Table::Account,
        Table::Commodity,
        Table::Holding,
        Table::Price,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Account => "account",
            Self::Commodity => "commodity",
            Self::Holding => "holding",
            Self::Price => "price",
        }
    }

    /// Columns shown in list views and entry forms, in display order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Owner => &["id", "first_name", "last_name", "email"],
            Self::Account => &["id", "name", "owner_id"],
            Self::Commodity => &["id", "symbol", "name"],
            Self::Holding => &["owner_id", "account_id", "commodity_id", "date", "shares"],
            Self::Price => &["commodity_id", "date", "native_price"],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| ViewError::UnknownTable(s.to_string()))
    }
}

/// Named access to a row's columns and relations, for presentation code.
pub trait Record {
    fn table(&self) -> Table;

    /// Display value of a column, or `None` if the table has no such column.
    fn field(&self, name: &str) -> Option<String>;

    /// Id of the row a relation points at, or `None` if there is no such relation.
    fn relation_id(&self, _relation: &str) -> Option<(Table, Id)> {
        None
    }

    fn require_field(&self, name: &str) -> Result<String, ViewError> {
        self.field(name).ok_or_else(|| ViewError::UnknownField {
            table: self.table(),
            field: name.to_string(),
        })
    }

    /// Follow a relation to its row in the catalog.
    fn related<'c>(&self, relation: &str, catalog: &'c Catalog) -> Result<&'c dyn Record, ViewError> {
        let (table, id) = self
            .relation_id(relation)
            .ok_or_else(|| ViewError::UnknownRelation {
                table: self.table(),
                relation: relation.to_string(),
            })?;
        let found: Option<&'c dyn Record> = match table {
            Table::Owner => catalog.owner(id).map(|r| r as &dyn Record),
            Table::Account => catalog.account(id).map(|r| r as &dyn Record),
            Table::Commodity => catalog.commodity(id).map(|r| r as &dyn Record),
            Table::Holding | Table::Price => None,
        };
        found.ok_or_else(|| ViewError::DanglingRelation {
            table: self.table(),
            relation: relation.to_string(),
            id,
        })
    }
}

impl Record for Owner {
    fn table(&self) -> Table {
        Table::Owner
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "first_name" => Some(self.first_name.clone()),
            "last_name" => Some(self.last_name.clone()),
            "name" => Some(self.full_name()),
            "email" => Some(self.email.clone().unwrap_or_default()),
            _ => None,
        }
    }
}

impl Record for Account {
    fn table(&self) -> Table {
        Table::Account
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "owner_id" => Some(self.owner_id.to_string()),
            _ => None,
        }
    }

    fn relation_id(&self, relation: &str) -> Option<(Table, Id)> {
        match relation {
            "owner" => Some((Table::Owner, self.owner_id)),
            _ => None,
        }
    }
}

impl Record for Commodity {
    fn table(&self) -> Table {
        Table::Commodity
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "symbol" => Some(self.symbol.clone()),
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }
}

impl Record for Holding {
    fn table(&self) -> Table {
        Table::Holding
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "owner_id" => Some(self.owner_id.to_string()),
            "account_id" => Some(self.account_id.to_string()),
            "commodity_id" => Some(self.commodity_id.to_string()),
            "date" => Some(self.date.to_string()),
            "shares" => Some(format_decimal(self.shares)),
            _ => None,
        }
    }

    fn relation_id(&self, relation: &str) -> Option<(Table, Id)> {
        match relation {
            "owner" => Some((Table::Owner, self.owner_id)),
            "account" => Some((Table::Account, self.account_id)),
            "commodity" => Some((Table::Commodity, self.commodity_id)),
            _ => None,
        }
    }
}

impl Record for Price {
    fn table(&self) -> Table {
        Table::Price
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "commodity_id" => Some(self.commodity_id.to_string()),
            "date" => Some(self.date.to_string()),
            "native_price" => Some(format_decimal(self.native_price)),
            _ => None,
        }
    }

    fn relation_id(&self, relation: &str) -> Option<(Table, Id)> {
        match relation {
            "commodity" => Some((Table::Commodity, self.commodity_id)),
            _ => None,
        }
    }
}
