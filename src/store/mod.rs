// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Storage boundary. Two interchangeable backends sit behind [`Store`]:
//! a CSV "sheet" workbook (the spreadsheet variant) and an embedded SQLite
//! database. All coercion from untyped cells happens here so the engine
//! only ever sees typed records.

pub mod sheet;
pub mod sqlite;

use crate::models::{Target, Transaction};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Prodbook", "prodbook"));

pub const TX_HEADERS: [&str; 14] = [
    "id",
    "tx_date",
    "project",
    "tx_type",
    "category",
    "vendor",
    "description",
    "qty",
    "unit_price",
    "vat_percent",
    "payment",
    "status",
    "ref",
    "created_at",
];

pub const TARGET_HEADERS: [&str; 3] = ["year", "month", "target"];

#[derive(Error, Debug)]
pub enum StoreError {
    /// The persisted header/column layout does not match what this version
    /// expects. Fatal configuration error; never auto-migrated.
    #[error("schema mismatch in '{table}': expected columns {expected}")]
    SchemaMismatch { table: String, expected: String },
    #[error("storage I/O error")]
    Io(#[from] std::io::Error),
    #[error("csv error")]
    Csv(#[from] csv::Error),
    #[error("sqlite error")]
    Sqlite(#[from] rusqlite::Error),
}

/// Persistence contract for the ledger. Mutations hit the backing store
/// immediately; there is no write-behind buffering, and callers re-load
/// before acting on ids rather than caching row positions.
pub trait Store {
    fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError>;
    fn append_transaction(&self, tx: &Transaction) -> Result<(), StoreError>;
    /// Delete by id; `false` when no row carries that id (store unchanged).
    fn delete_transaction(&self, id: i64) -> Result<bool, StoreError>;
    fn load_targets(&self) -> Result<Vec<Target>, StoreError>;
    /// At most one row per (year, month): overwrite if present, else append.
    fn upsert_target(&self, year: i32, month: u32, target: Decimal) -> Result<(), StoreError>;
}

/// Next transaction id: max(existing) + 1, or 1 on an empty ledger. Ids are
/// never reused after deletion because deletions cannot lower the max
/// below previously assigned ids still present.
pub fn next_id(txs: &[Transaction]) -> i64 {
    txs.iter().map(|t| t.id).max().map(|m| m + 1).unwrap_or(1)
}

pub fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

/// Open the backend named on the command line, rooted at `dir` (or the
/// platform data dir when unset).
pub fn open(backend: &str, dir: Option<PathBuf>) -> Result<Box<dyn Store>> {
    let dir = match dir {
        Some(d) => {
            fs::create_dir_all(&d)
                .with_context(|| format!("Failed to create data dir {}", d.display()))?;
            d
        }
        None => default_data_dir()?,
    };
    match backend {
        "sheet" => Ok(Box::new(sheet::SheetStore::open(dir)?)),
        "sqlite" => Ok(Box::new(sqlite::SqliteStore::open_or_init(
            dir.join("prodbook.sqlite"),
        )?)),
        other => Err(anyhow::anyhow!(
            "Unknown backend '{}' (use sheet|sqlite)",
            other
        )),
    }
}
