// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Embedded-database backend. Same column layout as the sheet backend, so
//! the schema check compares `PRAGMA table_info` names against the shared
//! expected header list.

use super::{Store, StoreError, TARGET_HEADERS, TX_HEADERS};
use crate::models::{Target, Transaction};
use crate::utils::{coerce_date, coerce_decimal, coerce_int};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::PathBuf;

const TX_DDL: &str = r#"
    CREATE TABLE transactions(
        id INTEGER PRIMARY KEY,
        tx_date TEXT,
        project TEXT NOT NULL DEFAULT '',
        tx_type TEXT NOT NULL,
        category TEXT NOT NULL DEFAULT '',
        vendor TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        qty TEXT NOT NULL DEFAULT '0',
        unit_price TEXT NOT NULL DEFAULT '0',
        vat_percent TEXT NOT NULL DEFAULT '0',
        payment TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT '',
        "ref" TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(tx_date);
"#;

const TARGET_DDL: &str = r#"
    CREATE TABLE targets(
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        target TEXT NOT NULL DEFAULT '0',
        UNIQUE(year, month)
    );
"#;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open_or_init(path: PathBuf) -> Result<Self, StoreError> {
        let conn = Connection::open(&path)?;
        Self::from_connection(conn)
    }

    /// Wrap an existing connection (tests use `open_in_memory`).
    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        check_or_create(&conn, "transactions", &TX_HEADERS, TX_DDL)?;
        check_or_create(&conn, "targets", &TARGET_HEADERS, TARGET_DDL)?;
        Ok(Self { conn })
    }
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let cols = stmt
        .query_map([], |r| r.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(cols)
}

fn check_or_create(
    conn: &Connection,
    table: &str,
    expected: &[&str],
    ddl: &str,
) -> Result<(), StoreError> {
    let cols = table_columns(conn, table)?;
    if cols.is_empty() {
        conn.execute_batch(ddl)?;
        debug!("created table {}", table);
        return Ok(());
    }
    if cols != expected {
        return Err(StoreError::SchemaMismatch {
            table: table.to_string(),
            expected: expected.join(","),
        });
    }
    Ok(())
}

/// Untyped cell read: external edits may leave numbers where we store text.
fn cell_str(v: Value) -> String {
    match v {
        Value::Text(s) => s,
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Null | Value::Blob(_) => String::new(),
    }
}

impl Store for SqliteStore {
    fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"SELECT id, tx_date, project, tx_type, category, vendor, description,
                      qty, unit_price, vat_percent, payment, status, "ref", created_at
               FROM transactions ORDER BY id"#,
        )?;
        let rows = stmt.query_map([], |r| {
            let mut cells = Vec::with_capacity(TX_HEADERS.len());
            for i in 0..TX_HEADERS.len() {
                cells.push(cell_str(r.get::<_, Value>(i)?));
            }
            Ok(cells)
        })?;
        let mut out = Vec::new();
        for row in rows {
            let c = row?;
            let tx_type = match c[3].parse() {
                Ok(t) => t,
                Err(_) => {
                    warn!("skipping row with unknown tx_type '{}'", c[3]);
                    continue;
                }
            };
            out.push(Transaction {
                id: coerce_int(&c[0]),
                date: coerce_date(&c[1]),
                project: c[2].clone(),
                tx_type,
                category: c[4].clone(),
                vendor: c[5].clone(),
                description: c[6].clone(),
                qty: coerce_decimal(&c[7]),
                unit_price: coerce_decimal(&c[8]),
                vat_percent: coerce_decimal(&c[9]),
                payment: c[10].clone(),
                status: c[11].clone(),
                reference: c[12].clone(),
                created_at: c[13].clone(),
            });
        }
        Ok(out)
    }

    fn append_transaction(&self, tx: &Transaction) -> Result<(), StoreError> {
        self.conn.execute(
            r#"INSERT INTO transactions(id, tx_date, project, tx_type, category, vendor,
                   description, qty, unit_price, vat_percent, payment, status, "ref", created_at)
               VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14)"#,
            params![
                tx.id,
                tx.date.map(|d| d.to_string()),
                tx.project,
                tx.tx_type.to_string(),
                tx.category,
                tx.vendor,
                tx.description,
                tx.qty.to_string(),
                tx.unit_price.to_string(),
                tx.vat_percent.to_string(),
                tx.payment,
                tx.status,
                tx.reference,
                tx.created_at,
            ],
        )?;
        debug!("appended transaction id={}", tx.id);
        Ok(())
    }

    fn delete_transaction(&self, id: i64) -> Result<bool, StoreError> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        debug!("delete transaction id={} matched {} row(s)", id, n);
        Ok(n > 0)
    }

    fn load_targets(&self) -> Result<Vec<Target>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT year, month, target FROM targets ORDER BY year, month")?;
        let rows = stmt.query_map([], |r| {
            Ok((
                cell_str(r.get::<_, Value>(0)?),
                cell_str(r.get::<_, Value>(1)?),
                cell_str(r.get::<_, Value>(2)?),
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (y, m, t) = row?;
            out.push(Target {
                year: coerce_int(&y) as i32,
                month: coerce_int(&m).max(0) as u32,
                target: coerce_decimal(&t),
            });
        }
        Ok(out)
    }

    fn upsert_target(&self, year: i32, month: u32, target: Decimal) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO targets(year, month, target) VALUES (?1,?2,?3)
             ON CONFLICT(year, month) DO UPDATE SET target=excluded.target",
            params![year, month, target.to_string()],
        )?;
        debug!("upserted target {}-{:02}", year, month);
        Ok(())
    }
}
