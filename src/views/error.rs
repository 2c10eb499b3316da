use super::Table;
use crate::models::Id;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("Unknown table {0:?}. Use: owner, account, commodity, holding, price")]
    UnknownTable(String),

    #[error("Table {table} has no field {field:?}")]
    UnknownField { table: Table, field: String },

    #[error("Table {table} has no relation {relation:?}")]
    UnknownRelation { table: Table, relation: String },

    #[error("{table} {relation} {id} does not exist")]
    DanglingRelation {
        table: Table,
        relation: String,
        id: Id,
    },

    #[error("At least one label field is required")]
    EmptyLabels,

    #[error("{0}")]
    Validation(String),
}
