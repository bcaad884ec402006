// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spreadsheet-style backend: a workbook directory holding
//! `transactions.csv` and `targets.csv`. Cells are untyped text; everything
//! numeric is coerced on the way in. Delete and upsert locate the row by
//! content and rewrite the file, so the row position is never part of the
//! contract.

use super::{Store, StoreError, TARGET_HEADERS, TX_HEADERS};
use crate::models::{Target, Transaction};
use crate::utils::{coerce_date, coerce_decimal, coerce_int};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct SheetStore {
    dir: PathBuf,
}

impl SheetStore {
    /// Open a workbook directory, creating header rows for any sheet that
    /// is missing or empty. A non-empty sheet with a different header is a
    /// fatal schema mismatch.
    pub fn open(dir: PathBuf) -> Result<Self, StoreError> {
        let store = Self { dir };
        ensure_headers(&store.tx_path(), &TX_HEADERS)?;
        ensure_headers(&store.target_path(), &TARGET_HEADERS)?;
        Ok(store)
    }

    fn tx_path(&self) -> PathBuf {
        self.dir.join("transactions.csv")
    }

    fn target_path(&self) -> PathBuf {
        self.dir.join("targets.csv")
    }

    fn read_rows(&self, path: &Path, expected: &[&str]) -> Result<Vec<StringRecord>, StoreError> {
        ensure_headers(path, expected)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let mut rows = Vec::new();
        for rec in rdr.records() {
            rows.push(rec?);
        }
        Ok(rows)
    }

    fn write_all(
        &self,
        path: &Path,
        headers: &[&str],
        rows: &[StringRecord],
    ) -> Result<(), StoreError> {
        let mut wtr = WriterBuilder::new().from_path(path)?;
        wtr.write_record(headers)?;
        for r in rows {
            wtr.write_record(r)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn ensure_headers(path: &Path, expected: &[&str]) -> Result<(), StoreError> {
    if !path.exists() || std::fs::metadata(path)?.len() == 0 {
        let mut wtr = WriterBuilder::new().from_path(path)?;
        wtr.write_record(expected)?;
        wtr.flush()?;
        debug!("initialized sheet {} with header row", path.display());
        return Ok(());
    }
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers = rdr.headers()?;
    if headers.iter().collect::<Vec<_>>() != expected {
        return Err(StoreError::SchemaMismatch {
            table: path.display().to_string(),
            expected: expected.join(","),
        });
    }
    Ok(())
}

fn cell(rec: &StringRecord, i: usize) -> &str {
    rec.get(i).unwrap_or("")
}

fn record_to_tx(rec: &StringRecord) -> Option<Transaction> {
    let tx_type = match cell(rec, 3).parse() {
        Ok(t) => t,
        Err(_) => {
            warn!("skipping row with unknown tx_type '{}'", cell(rec, 3));
            return None;
        }
    };
    Some(Transaction {
        id: coerce_int(cell(rec, 0)),
        date: coerce_date(cell(rec, 1)),
        project: cell(rec, 2).to_string(),
        tx_type,
        category: cell(rec, 4).to_string(),
        vendor: cell(rec, 5).to_string(),
        description: cell(rec, 6).to_string(),
        qty: coerce_decimal(cell(rec, 7)),
        unit_price: coerce_decimal(cell(rec, 8)),
        vat_percent: coerce_decimal(cell(rec, 9)),
        payment: cell(rec, 10).to_string(),
        status: cell(rec, 11).to_string(),
        reference: cell(rec, 12).to_string(),
        created_at: cell(rec, 13).to_string(),
    })
}

fn tx_to_record(tx: &Transaction) -> StringRecord {
    StringRecord::from(vec![
        tx.id.to_string(),
        tx.date.map(|d| d.to_string()).unwrap_or_default(),
        tx.project.clone(),
        tx.tx_type.to_string(),
        tx.category.clone(),
        tx.vendor.clone(),
        tx.description.clone(),
        tx.qty.to_string(),
        tx.unit_price.to_string(),
        tx.vat_percent.to_string(),
        tx.payment.clone(),
        tx.status.clone(),
        tx.reference.clone(),
        tx.created_at.clone(),
    ])
}

impl Store for SheetStore {
    fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let rows = self.read_rows(&self.tx_path(), &TX_HEADERS)?;
        Ok(rows.iter().filter_map(record_to_tx).collect())
    }

    fn append_transaction(&self, tx: &Transaction) -> Result<(), StoreError> {
        ensure_headers(&self.tx_path(), &TX_HEADERS)?;
        let file = OpenOptions::new().append(true).open(self.tx_path())?;
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        wtr.write_record(&tx_to_record(tx))?;
        wtr.flush()?;
        debug!("appended transaction id={}", tx.id);
        Ok(())
    }

    fn delete_transaction(&self, id: i64) -> Result<bool, StoreError> {
        let rows = self.read_rows(&self.tx_path(), &TX_HEADERS)?;
        // First row whose id cell parses to the target; junk id cells are
        // passed over, matching how the sheet is scanned by hand.
        let pos = rows
            .iter()
            .position(|r| cell(r, 0).trim().parse::<i64>() == Ok(id));
        let Some(pos) = pos else {
            return Ok(false);
        };
        let remaining: Vec<StringRecord> = rows
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i != pos)
            .map(|(_, r)| r)
            .collect();
        self.write_all(&self.tx_path(), &TX_HEADERS, &remaining)?;
        debug!("deleted transaction id={}", id);
        Ok(true)
    }

    fn load_targets(&self) -> Result<Vec<Target>, StoreError> {
        let rows = self.read_rows(&self.target_path(), &TARGET_HEADERS)?;
        Ok(rows
            .iter()
            .map(|r| Target {
                year: coerce_int(cell(r, 0)) as i32,
                month: coerce_int(cell(r, 1)).max(0) as u32,
                target: coerce_decimal(cell(r, 2)),
            })
            .collect())
    }

    fn upsert_target(&self, year: i32, month: u32, target: Decimal) -> Result<(), StoreError> {
        let mut rows = self.read_rows(&self.target_path(), &TARGET_HEADERS)?;
        let pos = rows.iter().position(|r| {
            cell(r, 0).trim().parse::<i32>() == Ok(year)
                && cell(r, 1).trim().parse::<u32>() == Ok(month)
        });
        match pos {
            Some(i) => {
                rows[i] = StringRecord::from(vec![
                    year.to_string(),
                    month.to_string(),
                    target.to_string(),
                ]);
                self.write_all(&self.target_path(), &TARGET_HEADERS, &rows)?;
            }
            None => {
                let file = OpenOptions::new().append(true).open(self.target_path())?;
                let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
                wtr.write_record([
                    year.to_string(),
                    month.to_string(),
                    target.to_string(),
                ])?;
                wtr.flush()?;
            }
        }
        debug!("upserted target {}-{:02}", year, month);
        Ok(())
    }
}
