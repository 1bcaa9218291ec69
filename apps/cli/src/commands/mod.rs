//! # Commands
//!
//! One module per screen of the till. Every command takes the shared
//! [`Database`](pandesal_db::Database) handle and returns
//! `Result<T, ApiError>`; printing happens in the caller.
//!
//! - [`product`] - Catalog management
//! - [`sale`] - Checkout and sales history
//! - [`data`] - Exports, backup, restore, storage info

pub mod data;
pub mod product;
pub mod sale;
