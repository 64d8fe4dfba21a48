//! # recibo-db: Receipt Store
//!
//! SQLite storage for issued warranty receipts, plus backup export/import
//! on top of any store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Recibo Data Flow                                 │
//! │                                                                         │
//! │  recibo CLI (export / import / list / delete)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     recibo-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐    │   │
//! │  │   │ BackupService │──►│  ReceiptStore  │   │  Migrations  │    │   │
//! │  │   │ (backup.rs)   │   │  (store.rs)    │   │  (embedded)  │    │   │
//! │  │   └───────────────┘   └───────┬────────┘   └──────────────┘    │   │
//! │  │                               │ impl                            │   │
//! │  │   ┌───────────────┐   ┌───────▼────────┐                        │   │
//! │  │   │   Database    │◄──│ ReceiptRepo    │                        │   │
//! │  │   │   (pool.rs)   │   │ (receipt.rs)   │                        │   │
//! │  │   └───────────────┘   └────────────────┘                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (RECIBO_DATABASE_PATH, default ./recibos.db)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`repository`] - SQLite receipt repository
//! - [`store`] - The store seam used by the backup workflow
//! - [`backup`] - Export/import of backup files
//! - [`config`] - Environment configuration
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recibo_db::{BackupService, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./recibos.db")).await?;
//! let backup = BackupService::new(db.receipts());
//!
//! let text = backup.export_all().await?;
//! let imported = backup.import_all(&text).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backup::BackupService;
pub use config::{AppConfig, ConfigError};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::receipt::ReceiptRepository;
pub use store::ReceiptStore;

// =============================================================================
// Test Support
// =============================================================================
