//! JSON file store for expenses. Identity is assigned here, not by the parser.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tally_ingest::{Category, RecordSink, TransactionRecord};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredExpense {
    pub id: u64,
    pub date: String,
    pub category: Category,
    pub amount: String,
    pub description: String,
    pub imported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct StoreFile {
    next_id: u64,
    expenses: Vec<StoredExpense>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            expenses: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    data: StoreFile,
}

impl JsonStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?
        } else {
            StoreFile::default()
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn expenses(&self) -> &[StoredExpense] {
        &self.data.expenses
    }

    /// Append records in memory, assigning ids. Call `save` to persist.
    pub fn append(&mut self, records: &[TransactionRecord], now: DateTime<Utc>) -> Vec<u64> {
        let mut ids = Vec::with_capacity(records.len());
        for rec in records {
            let id = self.data.next_id;
            self.data.next_id += 1;
            self.data.expenses.push(StoredExpense {
                id,
                date: rec.date.clone(),
                category: rec.category,
                amount: rec.amount.clone(),
                description: rec.description.clone(),
                imported_at: now,
            });
            ids.push(id);
        }
        ids
    }

    /// Write to a sibling temp file, then rename over the store.
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.data).context("serialize store")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("rename {} -> {}", tmp.display(), self.path.display()))?;
        Ok(())
    }
}

impl RecordSink for JsonStore {
    fn store(&mut self, records: &[TransactionRecord]) -> Result<usize> {
        let ids = self.append(records, Utc::now());
        self.save()?;
        tracing::debug!(count = ids.len(), path = %self.path.display(), "stored records");
        Ok(ids.len())
    }
}

/// Build a record from manual input, holding it to the same amount and sign
/// rules the parser produces.
pub fn manual_record(
    date: &str,
    description: &str,
    amount: &str,
    category: Category,
) -> Result<TransactionRecord> {
    let date = date.trim();
    if date.is_empty() {
        bail!("date must not be empty");
    }

    let amount = tally_ingest::normalize::clean_amount(amount.trim());
    if !tally_ingest::normalize::is_canonical_amount(&amount) {
        bail!("amount must look like 1234.50 or -1234.50, got {amount:?}");
    }
    match category {
        Category::Expense if !amount.starts_with('-') => {
            bail!("an Expense amount must be negative, got {amount}")
        }
        Category::Income if amount.starts_with('-') => {
            bail!("an Income amount must not be negative, got {amount}")
        }
        _ => {}
    }

    Ok(TransactionRecord {
        date: date.to_string(),
        description: description.trim().to_string(),
        amount,
        category,
    })
}
