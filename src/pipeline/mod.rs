// src/pipeline/mod.rs

//! Pipeline entry points for spreadsheet synchronization.
//!
//! - `run_sync`: Replace one worksheet's data region from a sync plan
//! - `run_export`: Pull everything from the content API and sync all
//!   three worksheets

pub mod export;
pub mod sync;

pub use export::{ExportReport, run_export};
pub use sync::run_sync;
