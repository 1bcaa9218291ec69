//! # Repository Module
//!
//! One repository per collection.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CLI command / pandesal-backup                                         │
//! │       │                                                                 │
//! │       │  db.products().list_active()                                   │
//! │       ▼                                                                 │
//! │  ProductRepository ─┐                                                  │
//! │  SaleRepository ────┼── hold a SqlitePool clone                        │
//! │  SaleItemRepository ┘                                                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository also exposes `*_with` associated functions that run on a
//! borrowed connection. Multi-table writes (checkout, restore, seeding) open
//! one transaction and pass it to those.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD
//! - [`SaleRepository`](sale::SaleRepository) - Sales and checkout
//! - [`SaleItemRepository`](sale_item::SaleItemRepository) - Sale lines

pub mod product;
pub mod sale;
pub mod sale_item;
