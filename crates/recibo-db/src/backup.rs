//! # Backup Export / Import
//!
//! Moves every receipt in a store to a backup file and back.
//!
//! ## Import Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         import_all(text)                                │
//! │                                                                         │
//! │  decode_envelope(text)                                                 │
//! │       │                                                                 │
//! │       ├── not JSON          ──► Err(MalformedJson)    store untouched  │
//! │       ├── no version/receipts ► Err(InvalidEnvelope)  store untouched  │
//! │       ▼                                                                 │
//! │  for each record, last to first, one at a time:                        │
//! │       decode_record ──► store.create                                   │
//! │            │                 │                                          │
//! │            └── Err ──────────┴── Err ──► warn!, skip, keep going       │
//! │                                                                         │
//! │  Ok(number of records created)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Creates are awaited sequentially, so the returned count is exact and a
//! failing record never affects the others. Exports list newest first, so
//! records are created from the end of the file back to the start; the
//! restored store then lists them in the same order as the source.
//! Indexes in log lines are positions in the file.

use chrono::Utc;
use tracing::{info, warn};

use recibo_core::backup::{decode_envelope, decode_record, encode_envelope};

use crate::error::DbResult;
use crate::store::ReceiptStore;

/// Export/import over any [`ReceiptStore`].
#[derive(Debug, Clone)]
pub struct BackupService<S> {
    store: S,
}

impl<S: ReceiptStore> BackupService<S> {
    pub fn new(store: S) -> Self {
        BackupService { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serializes every stored receipt into a backup file.
    ///
    /// Store failures are returned unchanged.
    pub async fn export_all(&self) -> DbResult<String> {
        let receipts = self.store.list_all().await?;
        let text = encode_envelope(&receipts, Utc::now())?;

        info!(count = receipts.len(), bytes = text.len(), "Receipts exported");
        Ok(text)
    }

    /// Creates a receipt for every valid record of a backup file and returns
    /// how many were created.
    ///
    /// Fails only when the file itself is unreadable; see the module docs.
    pub async fn import_all(&self, text: &str) -> DbResult<usize> {
        let envelope = decode_envelope(text)?;
        let total = envelope.receipts.len();

        info!(
            version = %envelope.version,
            exported_at = envelope.exported_at.as_deref().unwrap_or("-"),
            total,
            "Importing backup"
        );

        let mut imported = 0;
        for (index, record) in envelope.receipts.into_iter().enumerate().rev() {
            let receipt = match decode_record(index, record) {
                Ok(receipt) => receipt,
                Err(e) => {
                    warn!(index, error = %e, "Skipping unreadable backup record");
                    continue;
                }
            };

            match self.store.create(&receipt).await {
                Ok(id) => {
                    imported += 1;
                    info!(index, id = %id, "Backup record imported");
                }
                Err(e) => {
                    warn!(index, error = %e, "Store rejected backup record, skipping");
                }
            }
        }

        info!(imported, skipped = total - imported, "Backup import finished");
        Ok(imported)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
