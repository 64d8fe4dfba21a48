//! # Receipt Store
//!
//! The three operations the backup workflow needs from wherever receipts
//! live. [`ReceiptRepository`] is the SQLite implementation; tests plug in
//! stores that fail on purpose.

use std::future::Future;

use recibo_core::{NewWarrantyReceipt, WarrantyReceipt};

use crate::error::DbResult;
use crate::repository::receipt::ReceiptRepository;

/// A collection of stored receipts.
pub trait ReceiptStore: Send + Sync {
    /// Stores a receipt, returning the identifier the store assigned.
    fn create(&self, receipt: &NewWarrantyReceipt) -> impl Future<Output = DbResult<String>> + Send;

    /// Every stored receipt, newest first.
    fn list_all(&self) -> impl Future<Output = DbResult<Vec<WarrantyReceipt>>> + Send;

    /// Removes a receipt.
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;
}

impl ReceiptStore for ReceiptRepository {
    async fn create(&self, receipt: &NewWarrantyReceipt) -> DbResult<String> {
        ReceiptRepository::create(self, receipt).await
    }

    async fn list_all(&self) -> DbResult<Vec<WarrantyReceipt>> {
        ReceiptRepository::list_all(self).await
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        ReceiptRepository::delete(self, id).await
    }
}
