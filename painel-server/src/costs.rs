//! Cost-table storage
//!
//! Simple JSON-file-backed key-value persistence written by the settings
//! surface and read at aggregation time. The aggregator only ever receives
//! a [`CostTables`] snapshot from [`CostStore::snapshot`]; it never touches
//! the store directly.

use std::path::{Path, PathBuf};

use shared::error::{AppError, AppResult};
use shared::models::CostTables;
use tokio::sync::RwLock;

/// File-backed cost-table store
#[derive(Debug)]
pub struct CostStore {
    path: PathBuf,
    tables: RwLock<CostTables>,
}

impl CostStore {
    /// Load the store from disk; a missing file starts with defaults,
    /// an unreadable file is an error.
    pub fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let tables = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::internal(format!("Corrupt cost tables at {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No cost tables on disk, starting with defaults");
                CostTables::default()
            }
            Err(e) => {
                return Err(AppError::internal(format!(
                    "Failed to read cost tables at {}: {e}",
                    path.display()
                )));
            }
        };

        Ok(Self {
            path,
            tables: RwLock::new(tables),
        })
    }

    /// Immutable snapshot for one aggregation call
    pub async fn snapshot(&self) -> CostTables {
        self.tables.read().await.clone()
    }

    /// Replace the tables and persist them to disk
    pub async fn replace(&self, tables: CostTables) -> AppResult<()> {
        validate(&tables)?;

        let json = serde_json::to_string_pretty(&tables)
            .map_err(|e| AppError::internal(format!("Failed to serialize cost tables: {e}")))?;
        std::fs::write(&self.path, json).map_err(|e| {
            AppError::internal(format!(
                "Failed to write cost tables to {}: {e}",
                self.path.display()
            ))
        })?;

        *self.tables.write().await = tables;
        tracing::info!(path = %self.path.display(), "Cost tables updated");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn validate(tables: &CostTables) -> AppResult<()> {
    if tables.tax_rate < 0.0 {
        return Err(AppError::validation("tax_rate must be non-negative"));
    }
    if tables.fixed_tax_per_order < 0.0 {
        return Err(AppError::validation(
            "fixed_tax_per_order must be non-negative",
        ));
    }
    if tables.product_costs.values().any(|c| *c < 0.0) {
        return Err(AppError::validation("product costs must be non-negative"));
    }
    if tables.shipping_costs.values().any(|c| *c < 0.0) {
        return Err(AppError::validation("shipping costs must be non-negative"));
    }
    Ok(())
}
