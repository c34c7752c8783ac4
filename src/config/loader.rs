//! Load the resource file and resolve it into a registry.

use crate::case::capital_case;
use crate::config::resolved::{ColumnInfo, ResolvedResource, ResourceRegistry};
use crate::config::{validate, Operation, ResourcesConfig};
use crate::error::ConfigError;
use std::path::Path;

/// Read and parse `resources.json`-style JSON from disk.
pub async fn load_from_path(path: impl AsRef<Path>) -> Result<ResourcesConfig, ConfigError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    parse(&text)
}

pub fn parse(text: &str) -> Result<ResourcesConfig, ConfigError> {
    serde_json::from_str(text).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Build the registry from config (validates first).
pub fn resolve(config: &ResourcesConfig) -> Result<ResourceRegistry, ConfigError> {
    validate(config)?;

    let resources = config
        .resources
        .iter()
        .map(|r| ResolvedResource {
            table: r.table.clone(),
            path: r.path.clone().unwrap_or_else(|| r.table.clone()),
            label: r.label.clone().unwrap_or_else(|| capital_case(&r.table)),
            primary_key: r.primary_key.clone(),
            columns: r
                .columns
                .iter()
                .map(|c| ColumnInfo {
                    name: c.name.clone(),
                    type_: c.type_,
                })
                .collect(),
            operations: r
                .operations
                .as_deref()
                .unwrap_or(&Operation::ALL)
                .iter()
                .copied()
                .collect(),
            queries: r
                .queries
                .iter()
                .map(|q| (q.name.clone(), q.sql.clone()))
                .collect(),
        })
        .collect();

    Ok(ResourceRegistry::new(resources))
}
