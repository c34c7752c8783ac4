//! Resource-file validation: identifiers, uniqueness and primary keys.

use crate::config::ResourcesConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

/// Table and column names are interpolated into SQL, so they must be plain identifiers.
const SQL_IDENT: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
/// Path segments and query names may also contain `-`.
const URL_IDENT: &str = r"^[A-Za-z_][A-Za-z0-9_-]*$";

fn check(re: &Regex, kind: &'static str, name: &str) -> Result<(), ConfigError> {
    if re.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

pub fn validate(config: &ResourcesConfig) -> Result<(), ConfigError> {
    let sql_ident = Regex::new(SQL_IDENT).map_err(|e| ConfigError::Validation(e.to_string()))?;
    let url_ident = Regex::new(URL_IDENT).map_err(|e| ConfigError::Validation(e.to_string()))?;

    let mut paths = HashSet::new();
    for r in &config.resources {
        check(&sql_ident, "table", &r.table)?;
        let path = r.path.as_deref().unwrap_or(&r.table);
        check(&url_ident, "path", path)?;
        if !paths.insert(path) {
            return Err(ConfigError::DuplicatePathSegment(path.to_string()));
        }

        if r.columns.is_empty() {
            return Err(ConfigError::Validation(format!(
                "resource {} must declare at least one column",
                r.table
            )));
        }
        let mut columns = HashSet::new();
        for c in &r.columns {
            check(&sql_ident, "column", &c.name)?;
            if !columns.insert(c.name.as_str()) {
                return Err(ConfigError::Duplicate {
                    kind: "column",
                    name: c.name.clone(),
                    resource: r.table.clone(),
                });
            }
        }
        if !columns.contains(r.primary_key.as_str()) {
            return Err(ConfigError::InvalidPrimaryKey {
                table: r.table.clone(),
                column: r.primary_key.clone(),
            });
        }

        let mut queries = HashSet::new();
        for q in &r.queries {
            check(&url_ident, "query", &q.name)?;
            if !queries.insert(q.name.as_str()) {
                return Err(ConfigError::Duplicate {
                    kind: "query",
                    name: q.name.clone(),
                    resource: r.table.clone(),
                });
            }
            if q.sql.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "query {} on {} has empty sql",
                    q.name, r.table
                )));
            }
        }
    }

    Ok(())
}
