//! # pandesal-backup: Export, Backup and Restore
//!
//! The data routines of the settings screen, wired to the store and to an
//! [`ExportSink`].
//!
//! ## Two Error Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  PROPAGATING                              RESULT                        │
//! │  ───────────                              ──────                        │
//! │  export_sales_csv()                       restore_backup_from_str()     │
//! │  export_products_csv()                    restore_backup_from_path()    │
//! │  create_backup()                                                        │
//! │  storage_info()                                                         │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  error! + Err(TransferError)              RestoreOutcome {              │
//! │                                             success, message }          │
//! │                                                                         │
//! │  No retries. Every failure leaves the store usable.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use pandesal_backup::{create_backup, restore_backup_from_path, DirectorySink};
//!
//! let sink = DirectorySink::new("/home/baker/Exports");
//! let receipt = create_backup(&db, &sink, "pandehabibi").await?;
//!
//! let outcome = restore_backup_from_path(&db, &receipt.location).await;
//! println!("{}", outcome.message);
//! ```

pub mod backup;
pub mod error;
pub mod export;
pub mod restore;
pub mod sink;
pub mod storage;

pub use backup::{create_backup, create_backup_at, BackupReceipt};
pub use error::{TransferError, TransferResult};
pub use export::{export_products_csv, export_sales_csv};
pub use restore::{restore_backup_from_path, restore_backup_from_str};
pub use sink::{DirectorySink, ExportFile, ExportSink, MemorySink};
pub use storage::storage_info;
