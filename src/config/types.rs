//! Raw resource-file types matching the JSON layout of `resources.json`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResourcesConfig {
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub table: String,
    /// URL segment; defaults to the table name.
    #[serde(default)]
    pub path: Option<String>,
    /// Display label; defaults to the table name in capital case.
    #[serde(default)]
    pub label: Option<String>,
    pub primary_key: String,
    pub columns: Vec<ColumnConfig>,
    /// Enabled operations; defaults to all of them.
    #[serde(default)]
    pub operations: Option<Vec<Operation>>,
    #[serde(default)]
    pub queries: Vec<QueryConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_: ColumnType,
}

/// Storage class used to convert path and query-string values before binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Real,
    #[default]
    Text,
    Boolean,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    Delete,
    Query,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::List,
        Operation::Read,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::Query,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Query => "query",
        }
    }
}

/// Named raw SELECT exposed at `/:resource/:id/:name`; the path id is its sole parameter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryConfig {
    pub name: String,
    pub sql: String,
}
