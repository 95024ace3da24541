//! Library crate for admin-table.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, pager, selection, row editor and event loop (`app`)
//! - Error and result types (`error`)
//! - Search/filter derivation (`search`)
//! - Member record model and data source adapter (`source`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `admin-table` binary and by tests.
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod error;
pub mod search;
pub mod source;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
