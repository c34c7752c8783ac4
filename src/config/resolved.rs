//! Resolved resource registry: config validated and flattened for runtime use.

use crate::config::{ColumnType, Operation};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug)]
pub struct ColumnInfo {
    pub name: String,
    pub type_: ColumnType,
}

#[derive(Clone, Debug)]
pub struct ResolvedResource {
    pub table: String,
    pub path: String,
    pub label: String,
    pub primary_key: String,
    pub columns: Vec<ColumnInfo>,
    pub operations: HashSet<Operation>,
    /// Named raw SELECT statements, by name.
    pub queries: HashMap<String, String>,
}

impl ResolvedResource {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn allows(&self, op: Operation) -> bool {
        self.operations.contains(&op)
    }

    pub fn primary_key_type(&self) -> ColumnType {
        self.column(&self.primary_key).map(|c| c.type_).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResourceRegistry {
    pub resources: Vec<ResolvedResource>,
    by_path: HashMap<String, usize>,
}

impl ResourceRegistry {
    pub fn new(resources: Vec<ResolvedResource>) -> Self {
        let by_path = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.path.clone(), i))
            .collect();
        ResourceRegistry { resources, by_path }
    }

    pub fn by_path(&self, path: &str) -> Option<&ResolvedResource> {
        self.by_path.get(path).map(|&i| &self.resources[i])
    }
}
