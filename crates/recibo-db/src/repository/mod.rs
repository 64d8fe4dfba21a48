//! # Repository Module
//!
//! Database repository implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI / BackupService                                                   │
//! │       │                                                                 │
//! │       │  db.receipts().list_all()                                      │
//! │       ▼                                                                 │
//! │  ReceiptRepository                                                     │
//! │  ├── create(&self, receipt)                                            │
//! │  ├── list_all(&self)                                                   │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── search(&self, term)                                               │
//! │  ├── count(&self)                                                      │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ReceiptRepository`](receipt::ReceiptRepository) - Warranty receipts

pub mod receipt;
